pub mod admin;
pub mod notes;
pub mod sharing;
pub mod wizards;

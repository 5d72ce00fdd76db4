pub mod json_file;
pub mod notes;
pub mod shares;
pub mod wizards;

pub mod create_wizard;
pub mod list_wizards;

pub mod clear_shares;
pub mod download_encrypted;
pub mod list_all_notes;

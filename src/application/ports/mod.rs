pub mod note_repository;
pub mod note_vault;
pub mod share_repository;
pub mod wizard_repository;

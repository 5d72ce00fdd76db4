pub mod note;
pub mod share;
pub mod wizard;

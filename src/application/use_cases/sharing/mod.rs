pub mod approve_request;
pub mod list_requests;
pub mod request_access;
pub mod share_note;

pub mod access;
pub mod ports;
pub mod use_cases;

pub mod claims;
pub mod errors;
pub mod models;
pub mod policy;
pub mod ports;
pub mod service;

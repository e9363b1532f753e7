pub mod mapping;
pub mod repositories;

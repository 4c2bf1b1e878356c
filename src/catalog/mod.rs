pub mod handlers;
pub mod repo;
pub mod rotation;
pub mod services;

mod dto;
pub mod handlers;
pub mod password;
pub mod repo;
pub mod services;

pub use dto::{AuthResponse, LoginRequest, RegisterRequest};

//! Registration and login endpoints

pub mod dto;
pub mod handlers;

pub use dto::{LoginRequest, LoginResponse, RegisterRequest};
pub use handlers::{login, register};

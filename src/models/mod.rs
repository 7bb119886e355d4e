//! Data models for the library server

pub mod book;
pub mod user;

// Re-export commonly used types
pub use book::{Book, BookFilter, BookQuery, CreateBook, NewBook, Pagination, UpdateBook};
pub use user::{Credentials, LoginRequest, NewUser, RegisterRequest, User};

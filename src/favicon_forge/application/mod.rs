pub mod config;
pub mod email_service;
pub mod error;
pub mod favicon_service;

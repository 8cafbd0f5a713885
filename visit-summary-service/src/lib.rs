pub mod config;
pub mod dtos;
pub mod error;
pub mod handlers;
pub mod prompt;
pub mod services;
pub mod startup;

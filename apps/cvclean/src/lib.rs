pub mod catalog;
pub mod chat;
pub mod config;
pub mod editor;
pub mod errors;
pub mod export;
pub mod models;

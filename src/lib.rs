pub mod app;
pub mod auth;
pub mod categories;
pub mod config;
pub mod error;
pub mod notes;
pub mod state;

pub mod cli;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod repl;
pub mod services;
pub mod state;

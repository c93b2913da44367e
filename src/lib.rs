pub mod actions;
pub mod analytics;
pub mod chat;
pub mod cli;
pub mod config;
pub mod fetch;
pub mod model;
pub mod radar;
pub mod render;
pub mod scheduler;
pub mod utils;
pub mod view;
pub mod web;

pub mod app;
pub mod config;
pub mod contact;
pub mod handlers;
pub mod service;
pub mod store;
pub mod ui;

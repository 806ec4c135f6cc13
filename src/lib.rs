pub mod api;
pub mod app;
pub mod catalog;
pub mod cli;
pub mod conditions;
pub mod config;
pub mod error;
pub mod forecast;
pub mod report;
pub mod scheduler;
pub mod session;
pub mod settings;
pub mod units;

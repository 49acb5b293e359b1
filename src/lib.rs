pub mod catalog;
pub mod config;
pub mod core;
pub mod report;
pub mod ui;

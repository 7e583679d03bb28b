pub mod cli;
pub mod config;
pub mod notice;
pub mod service;
pub mod view;

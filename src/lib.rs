pub mod api;
pub mod clients;
pub mod config;
pub mod domain;
pub mod error;
pub mod scrapers;
pub mod services;

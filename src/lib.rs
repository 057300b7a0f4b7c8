pub mod cache;
pub mod compare;
pub mod config;
pub mod errors;
pub mod metrics;
pub mod models;
pub mod ranking;
pub mod sources;
pub mod web;

//! Configuration and request/response data types

pub mod config;
pub mod models;

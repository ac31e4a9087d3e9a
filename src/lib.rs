// src/lib.rs

//! waktu: prayer-time fetch, cache, and current-slot resolution.

pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod resolver;
pub mod scheduler;
pub mod services;
pub mod store;
pub mod utils;

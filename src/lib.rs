//! Linkboard - a small URL shortener with per-link click analytics
//!
//! This library provides the core functionality for the Linkboard service:
//! account management, short link creation with collision-safe slug
//! generation, click tracking with visitor attribution, and the HTTP API.
//!
//! # Architecture
//! - `api`: HTTP handlers, JWT auth, and middleware
//! - `services`: Business logic (accounts, links, clicks)
//! - `storage`: SeaORM data access over SQLite/MySQL/PostgreSQL
//! - `config`: Configuration management (TOML file + env overrides)
//! - `system`: Logging setup
//! - `utils`: Slug generation, password hashing, URL validation

pub mod api;
pub mod config;
pub mod errors;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;

//! # Habits
//!
//! A REST backend for tracking habits and the days they were performed, usable
//! both as a standalone binary and as a library.
//!
//! ## Library Usage
//!
//! ```toml
//! [dependencies]
//! habits = { version = "0.0.1", default-features = false }
//! ```
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use habits::server::{AppState, create_router};
//! use habits::store::{SqliteStore, Store};
//!
//! let store = SqliteStore::new("./data/habits.db").unwrap();
//! store.initialize().unwrap();
//!
//! let state = Arc::new(AppState::new(Arc::new(store)));
//! let router = create_router(state);
//! // Serve with axum...
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` (default): Builds the `habits` binary. Disable with `default-features = false`.

pub mod config;
pub mod error;
pub mod server;
pub mod service;
pub mod store;
pub mod types;

//! Core data models for the application
//!
//! This module contains the primary data structures used throughout the application,
//! separated from the logic that operates on them.
//!
//! # Usage
//!
//! ```rust
//! use prosub::models::{OutputFormat, ResolvedNode};
//! use prosub::parser::explodes::explode_node;
//!
//! let node = ResolvedNode::new("Tokyo", "trojan://secret@jp.example.com:443");
//! let descriptor = explode_node(&node).unwrap();
//! assert_eq!(descriptor.name, "Tokyo");
//! assert_eq!(OutputFormat::parse("CLASH"), OutputFormat::Clash);
//! ```

pub mod app_state;
mod proxy;
mod records;
mod target;

pub use app_state::AppState;
pub use proxy::*;
pub use records::*;
pub use target::OutputFormat;

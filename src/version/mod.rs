//! Version checking for the results page
//!
//! Compares the running version against the one published in `latest.json`
//! and drives the update regions of the page.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Source    │────▶│   Checker   │────▶│  Renderer   │
//! │  (fetch)    │     │   (states)  │     │  (regions)  │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                            │
//!                            ▼
//!                     ┌─────────────┐
//!                     │    Parse    │
//!                     │  (compare)  │
//!                     └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`checker`]: Update checker state machine with in-flight and closed-view guards
//! - [`error`]: Error types for fetching the latest version
//! - [`parse`]: Three-part version parsing and fail-safe comparison
//! - [`remote`]: `latest.json` fetched over HTTP
//! - [`source`]: Trait for fetching the latest version
//! - [`state`]: Checker states and their mapping onto page regions

pub mod checker;
pub mod error;
pub mod parse;
pub mod remote;
pub mod source;
pub mod state;

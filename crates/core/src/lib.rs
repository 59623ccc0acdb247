//! Core library for planka
//!
//! This crate implements the **Functional Core** of the planka CLI,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! The project uses a two-crate architecture to enforce separation of concerns:
//!
//! - **`planka_core`** (this crate): Pure transformation and decision functions with zero network I/O
//! - **`planka`**: HTTP calls, credential storage, and terminal rendering (the Imperative Shell)
//!
//! ## Functional Core Principles
//!
//! - **Pure functions**: Same input always produces the same output
//! - **No side effects**: No network calls, no process-wide state
//! - **Testable**: Can be tested with simple fixture data, no mocking required
//!
//! # Module Organization
//!
//! - [`planka`]: Planka API models, the resource locator, position and datetime
//!   parsing, the card update reconciler and output transforms
//! - [`credentials`]: Reading and rewriting the dotenv credential file format
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use planka_core::planka::{find_list_with_parent, Project};
//!
//! let projects: Vec<Project> = vec![];
//!
//! // An empty hierarchy is not an error, the list is simply not found
//! assert!(find_list_with_parent(&projects, "123").is_none());
//! ```

pub mod credentials;
pub mod planka;

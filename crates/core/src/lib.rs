//! Core library for scaffold
//!
//! This crate implements the **Functional Core** of the scaffold application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! - **`scaffold_core`** (this crate): Pure transformation functions with zero I/O
//! - **`scaffold`**: HTTP server, provider adapters and CLI (the Imperative Shell)
//!
//! Everything here is deterministic and testable with fixture strings: request
//! validation, the prompt templates, provider request/response envelopes, and
//! the extraction of project files from model output.
//!
//! # Module Organization
//!
//! - [`request`]: Wire body, validated request and provider identifiers
//! - [`models`]: Model catalog and default model per provider
//! - [`prompt`]: System prompt and the project-generation template
//! - [`envelope`]: Per-provider request builders and response parsers
//! - [`files`]: Fenced block → pathed file extraction
//! - [`blocks`]: Linear text/code view for output without files
//! - [`view`]: Chooses between the file and block views
//! - [`tree`]: Directory tree of extracted files
//!
//! # Example Usage
//!
//! ```rust
//! use scaffold_core::files::extract_files;
//!
//! let files = extract_files("```python:app.py\nprint(1)\n```");
//!
//! assert_eq!(files.len(), 1);
//! assert_eq!(files[0].name, "app.py");
//! assert_eq!(files[0].content, "print(1)\n");
//! ```

pub mod blocks;
pub mod envelope;
pub mod files;
pub mod models;
pub mod prompt;
pub mod request;
pub mod tree;
pub mod view;

//! Longan - A Rust library for the RTF subset used by nested note documents
//!
//! This library decodes RTF source text into a nested document tree and
//! encodes in-memory content back into valid RTF, covering the subset needed
//! to round-trip plain text, paragraph breaks, and embedded PNG images.
//!
//! # Features
//!
//! - **Lexer**: Single-pass tokenizer with zero-copy literal runs
//! - **Tree builder**: Brace-group tree with depth-classified text and
//!   payload runs
//! - **Writer**: Total serializer with escaping and Unicode fallback escapes
//! - **Document layer**: Header-shape validation and content extraction,
//!   including embedded PNG payload recovery
//!
//! # Example - Decoding a document
//!
//! ```rust
//! use longan::rtf::RtfDocument;
//!
//! let rtf = "{\\rtf1\\ansi\\pard {\\fonttbl\\f0\\fswiss Consolas;}\\f0 Hello\\par World}";
//! let doc = RtfDocument::parse(rtf)?;
//! assert_eq!(doc.text(), "Hello\nWorld");
//! # Ok::<(), longan::common::Error>(())
//! ```
//!
//! # Example - Encoding content
//!
//! ```rust
//! use longan::rtf::{encode, ContentItem};
//!
//! let header = "{\\rtf1\\ansi\\pard {\\fonttbl\\f0\\fswiss Consolas;}\\f0 ";
//! let rtf = encode(header, &[ContentItem::Text("Hello".to_string())]);
//! assert!(rtf.ends_with("Hello}"));
//! ```
//!
//! # Example - Working with the raw tree
//!
//! ```rust
//! use longan::rtf;
//!
//! let root = rtf::decode("{outer{inner}}")?;
//! // Runs directly inside the outermost group are document text; deeper
//! // runs are command payloads.
//! assert!(root.children()[0].as_text().is_some());
//! # Ok::<(), longan::rtf::RtfError>(())
//! ```

/// Common types, traits, and utilities shared across the crate
pub mod common;

/// RTF codec: lexer, tree builder, writer, and document consumption
pub mod rtf;

// Re-export commonly used types for convenience
pub use common::{Error, Result};
pub use rtf::{ContentItem, Group, Node, RtfDocument, RtfError, decode, encode};

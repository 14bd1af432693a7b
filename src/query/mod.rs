//! Query understanding for the clinical assistant.
//!
//! `parse_query` classifies a free-form question into a structured intent;
//! `build_context` uses that intent to pull the matching record sections
//! into one framed text block. Both are synchronous and never fail:
//! parsing is pure, and context assembly degrades per section when a store
//! read goes wrong.

pub mod context;
pub mod parser;
mod vocab;

pub use context::build_context;
pub use parser::{parse_query, ParsedQuery};

//! In-memory shape of a parsed TL schema.
//!
//! The parser that produces these values lives outside this workspace; it
//! hands over either the values directly or the JSON export understood by
//! [`Schema::from_json`].

pub mod node;
pub mod types;

/// Separator between a method namespace and the method name (`messages.getHistory`).
pub const NAMESPACE_SEPARATOR: char = '.';

use thiserror::Error as ThisError;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        node::{Constructor, Function, Param, Schema},
        types::Type,
    };
    pub use serde::{Deserialize, Serialize};
}

///
/// SchemaError
///

#[derive(Debug, ThisError)]
pub enum SchemaError {
    #[error("schema json: {0}")]
    Json(#[from] serde_json::Error),
}

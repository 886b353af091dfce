//! Type-directed code generation engine.
//!
//! Walks a parsed [`Schema`](tlgen_schema::node::Schema) and produces two
//! trees for a renderer:
//! - [`TypeTree`]: one [`BaseType`] per result type, carrying the unified
//!   field table and one [`MessageShape`] per constructor.
//! - [`FunctionTree`]: RPC methods grouped into [`Service`]s plus the
//!   deduplicated [`VectorWrapper`] types their responses need.
//!
//! Encode/decode steps are emitted as [`fragment`] nodes rather than text, so
//! any backend can lower them into its own language.

pub mod codec;
pub mod config;
pub mod error;
pub mod fragment;
pub mod generate;
pub mod ident;
pub mod ir;
pub mod map;
pub mod service;
pub mod types;

pub use config::{FlagBits, GeneratorConfig, IGNORED_METHODS};
pub use error::{ErrorKind, GenerateError};
pub use generate::Generator;
pub use ir::{
    BaseType, Field, FieldRef, FunctionTree, Generated, MessageShape, Method, ResponseType,
    Service, TypeTree, VectorWrapper,
};

use tlgen_schema::node::Schema;

/// Run one generation pass with the given configuration.
pub fn generate(schema: &Schema, config: GeneratorConfig) -> Result<Generated, GenerateError> {
    Generator::new(config).generate(schema)
}

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        fragment::{Blob, Decode, Element, Encode, FlagBit, Presence, Scalar},
        ir::*,
        map::{FieldType, TypeRef},
    };
    pub use serde::{Deserialize, Serialize};
    pub use tlgen_schema::prelude::{Constructor, Function, Param, Schema, Type};
}

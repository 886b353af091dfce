//! ## Crate layout
//! - `schema`: parsed TL schema nodes and JSON loading.
//! - `core`: type mapping, base-type and service aggregation, codec fragments.
//! - `build`: Rust backend and the `build!` helper for build scripts.
//! - `wire`: runtime encoder/decoder used by generated code.
//!
//! Code rendered through [`generate`] refers to the runtime as
//! `::tlgen::wire`, so depending on this crate alone is enough.

pub use tlgen_build as build;
pub use tlgen_core as core;
pub use tlgen_schema as schema;
pub use tlgen_wire as wire;

use tlgen_build::{BuildError, CodeBuilder, CratePaths};
use tlgen_core::{Generator, GeneratorConfig};
use tlgen_schema::node::Schema;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Compile a schema into Rust source targeting `::tlgen::wire`.
pub fn generate(schema: &Schema, config: &GeneratorConfig) -> Result<String, BuildError> {
    let generated = Generator::new(config.clone()).generate(schema)?;
    let tokens = CodeBuilder::new(&generated, CratePaths::facade()).generate()?;

    Ok(tokens.to_string())
}

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        build::BuildError,
        core::{FlagBits, GenerateError, Generated, Generator, GeneratorConfig},
        schema::node::{Constructor, Function, Schema},
        schema::types::Type,
        wire::{Decoder, Encoder, TlObject, WireError},
    };
}

///
/// TESTS
///

//! Rust backend: lowers a [`Generated`] tree into Rust source that targets
//! the `tlgen-wire` runtime.
//!
//! The output is two modules, `types` (one struct per base type) and
//! `functions` (requests, vector wrappers and one trait per service).

mod fragment;
mod functions;
mod ident;
mod macros;
pub mod paths;
mod types;

pub use paths::CratePaths;
pub use tlgen_core::GeneratorConfig;

use proc_macro2::{Ident, TokenStream};
use quote::quote;
use thiserror::Error as ThisError;
use tlgen_core::{GenerateError, Generated, Generator, ResponseType, map::FieldType, map::TypeRef};
use tlgen_schema::{SchemaError, node::Schema};
use tracing::info;

///
/// BuildError
///

#[derive(Debug, ThisError)]
pub enum BuildError {
    #[error(transparent)]
    Generate(#[from] GenerateError),

    #[error("`{member}` appears twice in `{owner}` after identifier casing")]
    DuplicateIdent { owner: String, member: String },

    #[error("`{0}` is not a valid rust identifier")]
    InvalidIdent(String),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("unresolved type reference `{0}`")]
    UnresolvedType(String),
}

/// Render generated trees with the default crate paths.
pub fn generate(generated: &Generated) -> Result<TokenStream, BuildError> {
    CodeBuilder::new(generated, CratePaths::new()).generate()
}

/// Run the generator and render its output as Rust source.
pub fn generate_from_schema(schema: &Schema, config: &GeneratorConfig) -> Result<String, BuildError> {
    let generated = Generator::new(config.clone()).generate(schema)?;
    let tokens = generate(&generated)?;

    Ok(tokens.to_string())
}

/// [`generate_from_schema`] for a schema stored as JSON.
pub fn generate_from_json(json: &str, config: &GeneratorConfig) -> Result<String, BuildError> {
    let schema = Schema::from_json(json)?;

    generate_from_schema(&schema, config)
}

///
/// CodeBuilder
///

pub struct CodeBuilder<'a> {
    pub(crate) generated: &'a Generated,
    pub(crate) paths: CratePaths,
}

impl<'a> CodeBuilder<'a> {
    #[must_use]
    pub const fn new(generated: &'a Generated, paths: CratePaths) -> Self {
        Self { generated, paths }
    }

    pub fn generate(&self) -> Result<TokenStream, BuildError> {
        let types = types::generate(self)?;
        let functions = functions::generate(self)?;

        info!(
            base_types = self.generated.types.base_types.len(),
            services = self.generated.functions.services.len(),
            "rendered rust module"
        );

        Ok(quote! {
            pub mod types {
                #![allow(clippy::all, clippy::pedantic, unused_assignments, unused_mut)]

                #types
            }

            pub mod functions {
                #![allow(clippy::all, clippy::pedantic, unused_assignments, unused_imports, unused_mut)]

                use super::types::*;

                #functions
            }
        })
    }

    /// Struct name of the base type a reference points at. Constructor
    /// references resolve to their constructor's base type.
    pub(crate) fn resolve(&self, target: &TypeRef) -> Result<Ident, BuildError> {
        let types = &self.generated.types;
        let base = match target {
            TypeRef::Base(name) => types.get(name),
            TypeRef::Constructor(predicate) => types.find_constructor(predicate).map(|(base, _)| base),
        };
        let base = base.ok_or_else(|| BuildError::UnresolvedType(target.name().to_string()))?;

        ident::type_name(&base.name)
    }

    pub(crate) fn field_type(&self, ty: &FieldType) -> Result<TokenStream, BuildError> {
        let tokens = match ty {
            FieldType::Bool => quote!(bool),
            FieldType::Bytes => quote!(::std::vec::Vec<u8>),
            FieldType::Double => quote!(f64),
            FieldType::Int => quote!(i32),
            FieldType::Long => quote!(i64),
            FieldType::Ref(target) => {
                let target = self.resolve(target)?;
                quote!(::core::option::Option<::std::boxed::Box<#target>>)
            }
            FieldType::Seq(elem) => {
                // elements are owned inline
                let elem = match elem.as_ref() {
                    FieldType::Ref(target) => {
                        let target = self.resolve(target)?;
                        quote!(#target)
                    }
                    other => self.field_type(other)?,
                };
                quote!(::std::vec::Vec<#elem>)
            }
            FieldType::Text => quote!(::std::string::String),
        };

        Ok(tokens)
    }

    pub(crate) fn response_type(&self, response: &ResponseType) -> Result<TokenStream, BuildError> {
        match response {
            ResponseType::Wrapper(name) => {
                let ident = ident::type_name(name)?;
                Ok(quote!(#ident))
            }
            ResponseType::Named(name) if self.generated.types.get(name).is_some() => {
                let ident = self.resolve(&TypeRef::Base(name.clone()))?;
                Ok(quote!(#ident))
            }
            // `%predicate` results answer with the owning base type
            ResponseType::Named(name) if self.generated.types.find_constructor(name).is_some() => {
                let ident = self.resolve(&TypeRef::Constructor(name.clone()))?;
                Ok(quote!(#ident))
            }
            ResponseType::Named(name) => match name.as_str() {
                "Bool" => Ok(quote!(bool)),
                "int" => Ok(quote!(i32)),
                "long" => Ok(quote!(i64)),
                "double" => Ok(quote!(f64)),
                "string" => Ok(quote!(::std::string::String)),
                "bytes" | "int128" | "int256" | "!X" => Ok(quote!(::std::vec::Vec<u8>)),
                _ => Err(BuildError::UnresolvedType(name.clone())),
            },
        }
    }
}

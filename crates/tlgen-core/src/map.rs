//! Type Mapper: schema type -> target field representation.

use crate::{error::ErrorKind, fragment::Element, ident::message_name};
use serde::{Deserialize, Serialize};
use std::fmt;
use tlgen_schema::types::Type;

///
/// TypeRef
///
/// An owned reference to another generated type. The containing message owns
/// the referenced value exclusively.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum TypeRef {
    /// A base (union) type by name.
    Base(String),
    /// One specific constructor's shape by predicate.
    Constructor(String),
}

impl TypeRef {
    #[must_use]
    pub fn base(name: &str) -> Self {
        Self::Base(message_name(name))
    }

    #[must_use]
    pub fn constructor(predicate: &str) -> Self {
        Self::Constructor(message_name(predicate))
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Base(name) | Self::Constructor(name) => name,
        }
    }
}

///
/// FieldType
///
/// Target representation of a materialized field.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[remain::sorted]
pub enum FieldType {
    Bool,
    Bytes,
    Double,
    Int,
    Long,
    Ref(TypeRef),
    Seq(Box<FieldType>),
    Text,
}

impl FieldType {
    #[must_use]
    pub const fn is_ref(&self) -> bool {
        matches!(self, Self::Ref(_))
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => write!(f, "bool"),
            Self::Bytes => write!(f, "bytes"),
            Self::Double => write!(f, "double"),
            Self::Int => write!(f, "int32"),
            Self::Long => write!(f, "int64"),
            Self::Ref(target) => write!(f, "{}", target.name()),
            Self::Seq(elem) => write!(f, "[{elem}]"),
            Self::Text => write!(f, "text"),
        }
    }
}

/// Map a schema type to its field representation.
///
/// `Ok(None)` is the flags word: it gets codec fragments but no field.
pub fn map(ty: &Type) -> Result<Option<FieldType>, ErrorKind> {
    let mapped = match ty {
        Type::Bool => FieldType::Bool,
        Type::Int => FieldType::Int,
        Type::Long => FieldType::Long,
        Type::Double => FieldType::Double,
        Type::Int128 | Type::Int256 | Type::Bytes | Type::OpaqueBlob => FieldType::Bytes,
        Type::String => FieldType::Text,
        Type::FlagsMarker => return Ok(None),
        Type::OptionalField { inner, .. } => match inner.as_ref() {
            Type::True => FieldType::Bool,
            Type::FlagsMarker | Type::OptionalField { .. } => {
                return Err(ErrorKind::UnmappedType { ty: ty.to_string() });
            }
            inner => return map(inner),
        },
        Type::BuiltinVector(elem) | Type::GenericVector(elem) => {
            FieldType::Seq(Box::new(Element::from_type(elem)?.field_type()))
        }
        Type::NamedTypeRef(name) => FieldType::Ref(TypeRef::base(name)),
        Type::ConstructorRef(predicate) => FieldType::Ref(TypeRef::constructor(predicate)),
        // only meaningful behind a flags bit
        Type::True => return Err(ErrorKind::UnmappedType { ty: ty.to_string() }),
    };

    Ok(Some(mapped))
}

///
/// TESTS
///

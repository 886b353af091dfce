//! Codec fragments.
//!
//! One [`Encode`] and one [`Decode`] node per declared parameter, in declared
//! order. The wire format carries no field tags, so a renderer must emit them
//! in exactly the order given.

use crate::{
    error::ErrorKind,
    map::{FieldType, TypeRef},
};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use tlgen_schema::types::Type;

///
/// Scalar
/// Fixed-width primitive read/written inline.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
pub enum Scalar {
    Bool,
    Int,
    Long,
    Double,
}

impl Scalar {
    #[must_use]
    pub const fn field_type(self) -> FieldType {
        match self {
            Self::Bool => FieldType::Bool,
            Self::Int => FieldType::Int,
            Self::Long => FieldType::Long,
            Self::Double => FieldType::Double,
        }
    }
}

///
/// Blob
/// Length-prefixed byte sequence. Both kinds share one wire shape.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
pub enum Blob {
    Bytes,
    Text,
}

impl Blob {
    #[must_use]
    pub const fn field_type(self) -> FieldType {
        match self {
            Self::Bytes => FieldType::Bytes,
            Self::Text => FieldType::Text,
        }
    }
}

///
/// Element
/// Vector element kinds that have a codec rule.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Element {
    Scalar(Scalar),
    Blob(Blob),
    Nested(TypeRef),
}

impl Element {
    /// Scalars, strings/bytes and references are the only legal elements.
    pub fn from_type(elem: &Type) -> Result<Self, ErrorKind> {
        let element = match elem {
            Type::Bool => Self::Scalar(Scalar::Bool),
            Type::Int => Self::Scalar(Scalar::Int),
            Type::Long => Self::Scalar(Scalar::Long),
            Type::Double => Self::Scalar(Scalar::Double),
            Type::String => Self::Blob(Blob::Text),
            Type::Bytes | Type::Int128 | Type::Int256 => Self::Blob(Blob::Bytes),
            Type::NamedTypeRef(name) => Self::Nested(TypeRef::base(name)),
            Type::ConstructorRef(predicate) => Self::Nested(TypeRef::constructor(predicate)),
            Type::True
            | Type::FlagsMarker
            | Type::OptionalField { .. }
            | Type::BuiltinVector(_)
            | Type::GenericVector(_)
            | Type::OpaqueBlob => {
                return Err(ErrorKind::UnsupportedVectorElement {
                    elem: elem.to_string(),
                });
            }
        };

        Ok(element)
    }

    #[must_use]
    pub fn field_type(&self) -> FieldType {
        match self {
            Self::Scalar(scalar) => scalar.field_type(),
            Self::Blob(blob) => blob.field_type(),
            Self::Nested(target) => FieldType::Ref(target.clone()),
        }
    }
}

///
/// Presence
/// Test deciding whether an optional field sets its flag bit.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
pub enum Presence {
    /// Booleans: set when true.
    IsTrue,
    /// Numbers: set when non-zero.
    NonZero,
    /// Strings, bytes and sequences: set when non-empty.
    NonEmpty,
    /// References: set when a value is held.
    IsSet,
}

impl Presence {
    pub fn of(ty: &Type) -> Result<Self, ErrorKind> {
        let presence = match ty {
            Type::Bool | Type::True => Self::IsTrue,
            Type::Int | Type::Long | Type::Double => Self::NonZero,
            Type::String
            | Type::Bytes
            | Type::Int128
            | Type::Int256
            | Type::OpaqueBlob
            | Type::BuiltinVector(_)
            | Type::GenericVector(_) => Self::NonEmpty,
            Type::NamedTypeRef(_) | Type::ConstructorRef(_) => Self::IsSet,
            Type::FlagsMarker | Type::OptionalField { .. } => {
                return Err(ErrorKind::UnmappedType { ty: ty.to_string() });
            }
        };

        Ok(presence)
    }
}

///
/// FlagBit
/// One optional field folded into the synthesized flags word.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct FlagBit {
    pub field: String,
    pub bit: u32,
    pub presence: Presence,
}

///
/// Encode
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Encode {
    Scalar {
        field: String,
        scalar: Scalar,
    },

    Blob {
        field: String,
        blob: Blob,
    },

    /// Build the 32-bit flags word from the presence of each optional field
    /// and write it. Assumes one flags word per message: a second marker
    /// would carry the same bits.
    Flags { bits: Vec<FlagBit> },

    /// `if <presence> { inner }`; `inner` is `None` for bit-only `true` fields.
    Conditional {
        field: String,
        bit: u32,
        presence: Presence,
        inner: Option<Box<Encode>>,
    },

    /// Count then elements; `tagged` writes the generic vector tag first.
    Sequence {
        field: String,
        element: Element,
        tagged: bool,
    },

    /// The value's own self-describing encoding (it writes its own tag).
    Nested { field: String, target: TypeRef },
}

///
/// Decode
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Decode {
    Scalar {
        field: String,
        scalar: Scalar,
    },

    Blob {
        field: String,
        blob: Blob,
    },

    /// Read the flags word and keep it for later conditional reads.
    Flags,

    /// `if flags & (1 << bit) != 0 { inner }`; with no `inner` the field is
    /// set to true.
    Conditional {
        field: String,
        bit: u32,
        inner: Option<Box<Decode>>,
    },

    /// Count then elements; `tagged` verifies the generic vector tag first.
    Sequence {
        field: String,
        element: Element,
        tagged: bool,
    },

    /// Decode a fresh instance of `target` from the shared cursor and bind it.
    Nested { field: String, target: TypeRef },
}

impl Encode {
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Scalar { field, .. }
            | Self::Blob { field, .. }
            | Self::Conditional { field, .. }
            | Self::Sequence { field, .. }
            | Self::Nested { field, .. } => Some(field),
            Self::Flags { .. } => None,
        }
    }
}

impl Decode {
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Scalar { field, .. }
            | Self::Blob { field, .. }
            | Self::Conditional { field, .. }
            | Self::Sequence { field, .. }
            | Self::Nested { field, .. } => Some(field),
            Self::Flags => None,
        }
    }
}

///
/// TESTS
///

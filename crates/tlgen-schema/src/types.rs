use crate::prelude::*;
use std::fmt;

///
/// Type
///
/// A parameter or result type as written in the schema.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[remain::sorted]
pub enum Type {
    Bool,
    /// Bare `vector<T>`: count followed by the elements, no tag.
    BuiltinVector(Box<Type>),
    Bytes,
    /// Reference to one specific constructor (`%Predicate`).
    ConstructorRef(String),
    Double,
    /// The `#` parameter holding the optional-field bitmask.
    FlagsMarker,
    /// Boxed `Vector<T>`: the generic vector tag, then count and elements.
    GenericVector(Box<Type>),
    Int,
    Int128,
    Int256,
    Long,
    /// Reference to a base (union) type by name.
    NamedTypeRef(String),
    /// Template argument (`!X`) carried as opaque bytes.
    OpaqueBlob,
    /// `flags.<bit>?<inner>`.
    OptionalField { bit: u32, inner: Box<Type> },
    String,
    /// The bit-only `true` type; its value is the flag bit itself.
    True,
}

impl Type {
    #[must_use]
    pub fn optional(bit: u32, inner: Self) -> Self {
        Self::OptionalField {
            bit,
            inner: Box::new(inner),
        }
    }

    #[must_use]
    pub fn vector(elem: Self) -> Self {
        Self::BuiltinVector(Box::new(elem))
    }

    #[must_use]
    pub fn generic_vector(elem: Self) -> Self {
        Self::GenericVector(Box::new(elem))
    }

    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::NamedTypeRef(name.into())
    }

    #[must_use]
    pub fn constructor(predicate: impl Into<String>) -> Self {
        Self::ConstructorRef(predicate.into())
    }

    /// Element type of a bare or generic vector.
    #[must_use]
    pub fn vector_element(&self) -> Option<&Self> {
        match self {
            Self::BuiltinVector(elem) | Self::GenericVector(elem) => Some(elem),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_flags(&self) -> bool {
        matches!(self, Self::FlagsMarker)
    }

    #[must_use]
    pub const fn is_optional(&self) -> bool {
        matches!(self, Self::OptionalField { .. })
    }
}

// schema notation, used in error reports and synthesized source lines
impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => write!(f, "Bool"),
            Self::BuiltinVector(elem) => write!(f, "vector<{elem}>"),
            Self::Bytes => write!(f, "bytes"),
            Self::ConstructorRef(predicate) => write!(f, "%{predicate}"),
            Self::Double => write!(f, "double"),
            Self::FlagsMarker => write!(f, "#"),
            Self::GenericVector(elem) => write!(f, "Vector<{elem}>"),
            Self::Int => write!(f, "int"),
            Self::Int128 => write!(f, "int128"),
            Self::Int256 => write!(f, "int256"),
            Self::Long => write!(f, "long"),
            Self::NamedTypeRef(name) => write!(f, "{name}"),
            Self::OpaqueBlob => write!(f, "!X"),
            Self::OptionalField { bit, inner } => write!(f, "flags.{bit}?{inner}"),
            Self::String => write!(f, "string"),
            Self::True => write!(f, "true"),
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_schema_notation() {
        let ty = Type::optional(3, Type::generic_vector(Type::named("messages.Message")));

        assert_eq!(ty.to_string(), "flags.3?Vector<messages.Message>");
        assert_eq!(Type::vector(Type::Long).to_string(), "vector<long>");
        assert_eq!(Type::constructor("inputPeerSelf").to_string(), "%inputPeerSelf");
    }

    #[test]
    fn vector_element_only_for_vectors() {
        assert_eq!(Type::vector(Type::Int).vector_element(), Some(&Type::Int));
        assert_eq!(
            Type::generic_vector(Type::String).vector_element(),
            Some(&Type::String)
        );
        assert_eq!(Type::optional(0, Type::vector(Type::Int)).vector_element(), None);
    }

    #[test]
    fn json_representation_is_externally_tagged() {
        let ty = Type::optional(1, Type::vector(Type::Int));
        let json = serde_json::to_string(&ty).unwrap();

        assert_eq!(
            json,
            r#"{"OptionalField":{"bit":1,"inner":{"BuiltinVector":"Int"}}}"#
        );
        assert_eq!(serde_json::from_str::<Type>(&json).unwrap(), ty);
    }
}

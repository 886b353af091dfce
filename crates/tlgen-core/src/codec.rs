//! Codec Fragment Generator.

use crate::{
    config::FlagBits,
    error::ErrorKind,
    fragment::{Blob, Decode, Element, Encode, FlagBit, Presence, Scalar},
    map::TypeRef,
};
use tlgen_schema::{node::Param, types::Type};
use tracing::trace;

///
/// CodecGen
///
/// Fragment generator for one parameter list. `names[i]` is the field name
/// emitted for `params[i]`, after any collision renaming.
///

pub struct CodecGen<'a> {
    params: &'a [Param],
    names: &'a [String],
    flag_bits: FlagBits,
}

impl<'a> CodecGen<'a> {
    #[must_use]
    pub fn new(params: &'a [Param], names: &'a [String], flag_bits: FlagBits) -> Self {
        debug_assert_eq!(params.len(), names.len());

        Self {
            params,
            names,
            flag_bits,
        }
    }

    /// Fragments for every parameter, in declared order.
    pub fn fragments(&self) -> Result<(Vec<Encode>, Vec<Decode>), ErrorKind> {
        let mut encode = Vec::with_capacity(self.params.len());
        let mut decode = Vec::with_capacity(self.params.len());

        for (param, name) in self.params.iter().zip(self.names) {
            let (e, d) = self.codec(name, &param.ty, param.position)?;
            trace!(field = %name, ty = %param.ty, "codec fragments");

            encode.push(e);
            decode.push(d);
        }

        Ok((encode, decode))
    }

    /// Encode/decode pair for one field, recursing through optionals.
    pub fn codec(
        &self,
        field: &str,
        ty: &Type,
        position: usize,
    ) -> Result<(Encode, Decode), ErrorKind> {
        match ty {
            Type::Bool => Ok(scalar(field, Scalar::Bool)),
            Type::Int => Ok(scalar(field, Scalar::Int)),
            Type::Long => Ok(scalar(field, Scalar::Long)),
            Type::Double => Ok(scalar(field, Scalar::Double)),
            Type::Int128 | Type::Int256 | Type::Bytes | Type::OpaqueBlob => {
                Ok(blob(field, Blob::Bytes))
            }
            Type::String => Ok(blob(field, Blob::Text)),
            Type::FlagsMarker => Ok((
                Encode::Flags {
                    bits: self.flag_bits()?,
                },
                Decode::Flags,
            )),
            Type::OptionalField { bit, inner } => self.conditional(field, ty, *bit, inner, position),
            Type::BuiltinVector(elem) => sequence(field, elem, false),
            Type::GenericVector(elem) => sequence(field, elem, true),
            Type::NamedTypeRef(name) => Ok(nested(field, TypeRef::base(name))),
            Type::ConstructorRef(predicate) => Ok(nested(field, TypeRef::constructor(predicate))),
            // only meaningful behind a flags bit
            Type::True => Err(ErrorKind::UnmappedType { ty: ty.to_string() }),
        }
    }

    fn conditional(
        &self,
        field: &str,
        ty: &Type,
        declared_bit: u32,
        inner: &Type,
        position: usize,
    ) -> Result<(Encode, Decode), ErrorKind> {
        let bit = self.flag_bits.resolve(declared_bit, position);
        let presence = Presence::of(inner).map_err(|_| ErrorKind::UnmappedType {
            ty: ty.to_string(),
        })?;

        let (encode_inner, decode_inner) = match inner {
            Type::True => (None, None),
            inner => {
                let (e, d) = self.codec(field, inner, position)?;
                (Some(Box::new(e)), Some(Box::new(d)))
            }
        };

        Ok((
            Encode::Conditional {
                field: field.to_string(),
                bit,
                presence,
                inner: encode_inner,
            },
            Decode::Conditional {
                field: field.to_string(),
                bit,
                inner: decode_inner,
            },
        ))
    }

    // flag_bits
    // one entry per optional parameter of this list, never the shared field table
    fn flag_bits(&self) -> Result<Vec<FlagBit>, ErrorKind> {
        let mut bits = Vec::new();

        for (param, name) in self.params.iter().zip(self.names) {
            if let Type::OptionalField { bit, inner } = &param.ty {
                let presence = Presence::of(inner).map_err(|_| ErrorKind::UnmappedType {
                    ty: param.ty.to_string(),
                })?;

                bits.push(FlagBit {
                    field: name.clone(),
                    bit: self.flag_bits.resolve(*bit, param.position),
                    presence,
                });
            }
        }

        Ok(bits)
    }
}

fn scalar(field: &str, scalar: Scalar) -> (Encode, Decode) {
    (
        Encode::Scalar {
            field: field.to_string(),
            scalar,
        },
        Decode::Scalar {
            field: field.to_string(),
            scalar,
        },
    )
}

fn blob(field: &str, blob: Blob) -> (Encode, Decode) {
    (
        Encode::Blob {
            field: field.to_string(),
            blob,
        },
        Decode::Blob {
            field: field.to_string(),
            blob,
        },
    )
}

fn sequence(field: &str, elem: &Type, tagged: bool) -> Result<(Encode, Decode), ErrorKind> {
    let element = Element::from_type(elem)?;

    Ok((
        Encode::Sequence {
            field: field.to_string(),
            element: element.clone(),
            tagged,
        },
        Decode::Sequence {
            field: field.to_string(),
            element,
            tagged,
        },
    ))
}

fn nested(field: &str, target: TypeRef) -> (Encode, Decode) {
    (
        Encode::Nested {
            field: field.to_string(),
            target: target.clone(),
        },
        Decode::Nested {
            field: field.to_string(),
            target,
        },
    )
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use tlgen_schema::node::Constructor;

    fn fragments_of(ctor: &Constructor, flag_bits: FlagBits) -> (Vec<Encode>, Vec<Decode>) {
        let names: Vec<String> = ctor.params.iter().map(|p| p.name.clone()).collect();

        CodecGen::new(&ctor.params, &names, flag_bits)
            .fragments()
            .unwrap()
    }

    #[test]
    fn fragments_follow_declared_order() {
        let ctor = Constructor::new("c", 1, "C")
            .param("a", Type::Int)
            .param("b", Type::String)
            .param("c", Type::optional(0, Type::Bool));

        let (encode, decode) = fragments_of(&ctor, FlagBits::Declared);

        assert_eq!(
            encode,
            vec![
                Encode::Scalar {
                    field: "a".to_string(),
                    scalar: Scalar::Int
                },
                Encode::Blob {
                    field: "b".to_string(),
                    blob: Blob::Text
                },
                Encode::Conditional {
                    field: "c".to_string(),
                    bit: 0,
                    presence: Presence::IsTrue,
                    inner: Some(Box::new(Encode::Scalar {
                        field: "c".to_string(),
                        scalar: Scalar::Bool
                    })),
                },
            ]
        );
        let fields: Vec<_> = decode.iter().map(Decode::field).collect();
        assert_eq!(fields, vec![Some("a"), Some("b"), Some("c")]);
    }

    #[test]
    fn flags_word_covers_this_constructors_optionals() {
        let ctor = Constructor::new("user", 1, "User")
            .param("flags", Type::FlagsMarker)
            .param("id", Type::Long)
            .param("bot", Type::optional(0, Type::True))
            .param("username", Type::optional(3, Type::String))
            .param("photo", Type::optional(5, Type::named("UserProfilePhoto")));

        let (encode, decode) = fragments_of(&ctor, FlagBits::Declared);

        let Encode::Flags { bits } = &encode[0] else {
            panic!("expected flags first, got {:?}", encode[0]);
        };
        let summary: Vec<_> = bits
            .iter()
            .map(|b| (b.field.as_str(), b.bit, b.presence))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("bot", 0, Presence::IsTrue),
                ("username", 3, Presence::NonEmpty),
                ("photo", 5, Presence::IsSet),
            ]
        );
        assert_eq!(decode[0], Decode::Flags);
    }

    #[test]
    fn bit_only_true_has_no_payload() {
        let ctor = Constructor::new("c", 1, "C")
            .param("flags", Type::FlagsMarker)
            .param("pinned", Type::optional(7, Type::True));

        let (encode, decode) = fragments_of(&ctor, FlagBits::Declared);

        assert_eq!(
            encode[1],
            Encode::Conditional {
                field: "pinned".to_string(),
                bit: 7,
                presence: Presence::IsTrue,
                inner: None,
            }
        );
        assert_eq!(
            decode[1],
            Decode::Conditional {
                field: "pinned".to_string(),
                bit: 7,
                inner: None,
            }
        );
    }

    #[test]
    fn positional_policy_uses_parameter_position() {
        let ctor = Constructor::new("c", 1, "C")
            .param("flags", Type::FlagsMarker)
            .param("a", Type::Int)
            .param("b", Type::optional(0, Type::Int));

        let (encode, decode) = fragments_of(&ctor, FlagBits::Positional);

        let Encode::Flags { bits } = &encode[0] else {
            panic!("expected flags");
        };
        assert_eq!(bits[0].bit, 2);
        assert!(matches!(decode[2], Decode::Conditional { bit: 2, .. }));
    }

    #[test]
    fn optional_vector_recurses_into_vector_codec() {
        let ctor = Constructor::new("c", 1, "C")
            .param("flags", Type::FlagsMarker)
            .param("ids", Type::optional(1, Type::vector(Type::Long)));

        let (_, decode) = fragments_of(&ctor, FlagBits::Declared);

        assert_eq!(
            decode[1],
            Decode::Conditional {
                field: "ids".to_string(),
                bit: 1,
                inner: Some(Box::new(Decode::Sequence {
                    field: "ids".to_string(),
                    element: Element::Scalar(Scalar::Long),
                    tagged: false,
                })),
            }
        );
    }

    #[test]
    fn generic_vector_is_tagged() {
        let ctor = Constructor::new("c", 1, "C").param("users", Type::generic_vector(Type::named("User")));

        let (encode, _) = fragments_of(&ctor, FlagBits::Declared);

        assert_eq!(
            encode[0],
            Encode::Sequence {
                field: "users".to_string(),
                element: Element::Nested(TypeRef::Base("User".to_string())),
                tagged: true,
            }
        );
    }

    #[test]
    fn bare_true_is_rejected() {
        let params = vec![Param::new("t", Type::True, 0)];
        let names = vec!["t".to_string()];

        let err = CodecGen::new(&params, &names, FlagBits::Declared)
            .fragments()
            .unwrap_err();

        assert_eq!(err, ErrorKind::UnmappedType { ty: "true".to_string() });
    }

    #[test]
    fn unsupported_vector_element_is_rejected() {
        let params = vec![Param::new("v", Type::vector(Type::OpaqueBlob), 0)];
        let names = vec!["v".to_string()];

        let err = CodecGen::new(&params, &names, FlagBits::Declared)
            .fragments()
            .unwrap_err();

        assert!(matches!(err, ErrorKind::UnsupportedVectorElement { .. }));
    }
}

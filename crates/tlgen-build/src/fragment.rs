//! Lowers codec fragments to Rust statements.
//!
//! Encoders run with `x: &mut Encoder` and read fields through `self`;
//! decoders run with `x: &mut Decoder` and assign into a local `value`.
//! Both reach a field through a [`Place`].

use crate::{BuildError, CodeBuilder, ident};
use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote};
use tlgen_core::fragment::{Blob, Decode, Element, Encode, Presence, Scalar};

/// Expression naming a field of the value being encoded or decoded.
pub type Place<'p> = &'p dyn Fn(&str) -> Result<TokenStream, BuildError>;

/// `self.<field>`
pub fn self_place(field: &str) -> Result<TokenStream, BuildError> {
    let member = ident::member(field)?;
    Ok(quote!(self.#member))
}

/// `value.<field>`
pub fn value_place(field: &str) -> Result<TokenStream, BuildError> {
    let member = ident::member(field)?;
    Ok(quote!(value.#member))
}

pub fn encode(b: &CodeBuilder<'_>, fragments: &[Encode], place: Place<'_>) -> Result<TokenStream, BuildError> {
    let mut tokens = quote!();
    for fragment in fragments {
        tokens.extend(encode_one(b, fragment, place)?);
    }

    Ok(tokens)
}

pub fn decode(fragments: &[Decode], place: Place<'_>) -> Result<TokenStream, BuildError> {
    let mut tokens = quote!();

    // the flags word lives for the whole message
    if fragments
        .iter()
        .any(|f| matches!(f, Decode::Flags | Decode::Conditional { .. }))
    {
        tokens.extend(quote!(let mut flags: u32 = 0;));
    }

    for fragment in fragments {
        tokens.extend(decode_one(fragment, place)?);
    }

    Ok(tokens)
}

fn encode_one(b: &CodeBuilder<'_>, fragment: &Encode, place: Place<'_>) -> Result<TokenStream, BuildError> {
    let tokens = match fragment {
        Encode::Scalar { field, scalar } => {
            let at = place(field)?;
            let method = scalar_method(*scalar);
            quote!(x.#method(#at);)
        }
        Encode::Blob { field, blob } => {
            let at = place(field)?;
            let method = blob_method(*blob);
            quote!(x.#method(&#at)?;)
        }
        Encode::Flags { bits } => {
            let mut sets = quote!();
            for bit in bits {
                let present = presence(bit.presence, &place(&bit.field)?);
                let n = bit.bit;
                sets.extend(quote!(if #present { flags |= 1u32 << #n; }));
            }
            quote!({
                let mut flags: u32 = 0;
                #sets
                x.uint(flags);
            })
        }
        Encode::Conditional {
            field,
            presence: test,
            inner,
            ..
        } => match inner {
            // bit-only; the flags word already carries it
            None => quote!(),
            Some(inner) => {
                let present = presence(*test, &place(field)?);
                let inner = encode_one(b, inner, place)?;
                quote!(if #present { #inner })
            }
        },
        Encode::Sequence {
            field,
            element,
            tagged,
        } => {
            let at = place(field)?;
            let tag = tagged.then(|| quote!(x.vector_tag();));
            let method = sequence_method(element);
            quote!(#tag x.#method(&#at)?;)
        }
        Encode::Nested { field, .. } => {
            let at = place(field)?;
            let wire = &b.paths.wire;
            quote! {
                match &#at {
                    ::core::option::Option::Some(v) => x.object(&**v)?,
                    ::core::option::Option::None => {
                        return ::core::result::Result::Err(#wire::WireError::MissingField(#field));
                    }
                }
            }
        }
    };

    Ok(tokens)
}

fn decode_one(fragment: &Decode, place: Place<'_>) -> Result<TokenStream, BuildError> {
    let tokens = match fragment {
        Decode::Scalar { field, scalar } => {
            let at = place(field)?;
            let method = scalar_method(*scalar);
            quote!(#at = x.#method()?;)
        }
        Decode::Blob { field, blob } => {
            let at = place(field)?;
            let method = blob_method(*blob);
            quote!(#at = x.#method()?;)
        }
        Decode::Flags => quote!(flags = x.uint()?;),
        Decode::Conditional { field, bit, inner } => {
            let body = match inner {
                Some(inner) => decode_one(inner, place)?,
                None => {
                    let at = place(field)?;
                    quote!(#at = true;)
                }
            };
            quote!(if flags & (1u32 << #bit) != 0 { #body })
        }
        Decode::Sequence {
            field,
            element,
            tagged,
        } => {
            let at = place(field)?;
            let tag = tagged.then(|| quote!(x.expect_vector_tag()?;));
            let method = sequence_method(element);
            quote!(#tag #at = x.#method()?;)
        }
        Decode::Nested { field, .. } => {
            let at = place(field)?;
            quote!(#at = ::core::option::Option::Some(::std::boxed::Box::new(x.object()?));)
        }
    };

    Ok(tokens)
}

fn presence(test: Presence, at: &TokenStream) -> TokenStream {
    match test {
        Presence::IsTrue => quote!(#at),
        Presence::NonZero => quote!(#at != ::core::default::Default::default()),
        Presence::NonEmpty => quote!(!#at.is_empty()),
        Presence::IsSet => quote!(#at.is_some()),
    }
}

fn scalar_method(scalar: Scalar) -> Ident {
    match scalar {
        Scalar::Bool => format_ident!("bool"),
        Scalar::Int => format_ident!("int"),
        Scalar::Long => format_ident!("long"),
        Scalar::Double => format_ident!("double"),
    }
}

fn blob_method(blob: Blob) -> Ident {
    match blob {
        Blob::Bytes => format_ident!("bytes"),
        Blob::Text => format_ident!("string"),
    }
}

fn sequence_method(element: &Element) -> Ident {
    match element {
        Element::Scalar(scalar) => format_ident!("vector_{}", scalar_method(*scalar)),
        Element::Blob(blob) => format_ident!("vector_{}", blob_method(*blob)),
        Element::Nested(_) => format_ident!("objects"),
    }
}

///
/// TESTS
///

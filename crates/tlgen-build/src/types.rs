use crate::{
    BuildError, CodeBuilder,
    fragment::{self, self_place, value_place},
    ident,
};
use proc_macro2::{Ident, TokenStream};
use quote::quote;
use tlgen_core::{BaseType, MessageShape};
use tracing::debug;

pub fn generate(b: &CodeBuilder<'_>) -> Result<TokenStream, BuildError> {
    let mut tokens = quote!();
    for base in &b.generated.types.base_types {
        tokens.extend(base_type(b, base)?);
    }

    Ok(tokens)
}

/// `TL_<PREDICATE>`
pub fn tag_constant(shape: &MessageShape) -> Result<Ident, BuildError> {
    ident::constant(&format!("tl_{}", shape.predicate))
}

// base_type
// one struct for the whole union; the tag field picks the active constructor
fn base_type(b: &CodeBuilder<'_>, base: &BaseType) -> Result<TokenStream, BuildError> {
    let name = ident::type_name(&base.name)?;
    let wire = &b.paths.wire;
    let tag = ident::field(ident::TAG_FIELD)?;

    let members = ident::members(
        &base.name,
        base.fields.iter().map(|f| f.name.as_str()),
        &[ident::TAG_FIELD],
    )?;

    let mut fields = quote!();
    for (field, member) in base.fields.iter().zip(members) {
        let ty = b.field_type(&field.ty)?;
        fields.extend(quote!(pub #member: #ty,));
    }

    let mut consts = quote!();
    let mut encode_arms = quote!();
    let mut decode_arms = quote!();
    for shape in &base.constructors {
        let c = tag_constant(shape)?;
        let id = shape.id;
        let line = &shape.line;
        consts.extend(quote! {
            #[doc = #line]
            pub const #c: u32 = #id;
        });

        let encode = fragment::encode(b, &shape.encode, &self_place)?;
        encode_arms.extend(quote! {
            #c => {
                x.uint(#c);
                #encode
            }
        });

        let decode = fragment::decode(&shape.decode, &value_place)?;
        decode_arms.extend(quote! {
            #c => {
                #decode
            }
        });
    }

    debug!(
        base_type = %base.name,
        fields = base.fields.len(),
        constructors = base.constructors.len(),
        "rendered base type"
    );

    Ok(quote! {
        #consts

        #[derive(Clone, Debug, Default, PartialEq)]
        pub struct #name {
            pub #tag: u32,
            #fields
        }

        impl #wire::TlObject for #name {
            fn encode(&self, x: &mut #wire::Encoder) -> ::core::result::Result<(), #wire::WireError> {
                match self.#tag {
                    #encode_arms
                    other => {
                        return ::core::result::Result::Err(#wire::WireError::UnknownConstructor(other));
                    }
                }

                ::core::result::Result::Ok(())
            }

            fn decode(x: &mut #wire::Decoder<'_>) -> ::core::result::Result<Self, #wire::WireError> {
                let #tag = x.uint()?;
                let mut value = Self {
                    #tag,
                    ..::core::default::Default::default()
                };

                match #tag {
                    #decode_arms
                    other => {
                        return ::core::result::Result::Err(#wire::WireError::UnknownConstructor(other));
                    }
                }

                ::core::result::Result::Ok(value)
            }
        }
    })
}

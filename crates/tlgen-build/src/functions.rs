use crate::{
    BuildError, CodeBuilder,
    fragment::{self, self_place, value_place},
    ident,
};
use proc_macro2::TokenStream;
use quote::quote;
use tlgen_core::{MessageShape, Service, VectorWrapper};
use tracing::debug;

pub fn generate(b: &CodeBuilder<'_>) -> Result<TokenStream, BuildError> {
    let functions = &b.generated.functions;
    let mut tokens = quote!();

    for request in functions.requests() {
        tokens.extend(request_struct(b, request)?);
    }
    for wrapper in &functions.vector_wrappers {
        tokens.extend(vector_wrapper(b, wrapper)?);
    }
    for service in &functions.services {
        tokens.extend(service_trait(b, service)?);
    }

    Ok(tokens)
}

fn request_struct(b: &CodeBuilder<'_>, shape: &MessageShape) -> Result<TokenStream, BuildError> {
    let name = ident::type_name(&shape.predicate)?;
    let wire = &b.paths.wire;
    let id = shape.id;
    let line = &shape.line;

    let members = ident::members(&shape.predicate, shape.fields.iter().map(|f| f.name.as_str()), &[])?;

    let mut fields = quote!();
    for (field, member) in shape.fields.iter().zip(members) {
        let ty = b.field_type(&field.ty)?;
        fields.extend(quote!(pub #member: #ty,));
    }

    let encode = fragment::encode(b, &shape.encode, &self_place)?;
    let decode = fragment::decode(&shape.decode, &value_place)?;

    Ok(quote! {
        #[doc = #line]
        #[derive(Clone, Debug, Default, PartialEq)]
        pub struct #name {
            #fields
        }

        impl #name {
            pub const ID: u32 = #id;
        }

        impl #wire::TlObject for #name {
            fn encode(&self, x: &mut #wire::Encoder) -> ::core::result::Result<(), #wire::WireError> {
                x.uint(Self::ID);
                #encode

                ::core::result::Result::Ok(())
            }

            fn decode(x: &mut #wire::Decoder<'_>) -> ::core::result::Result<Self, #wire::WireError> {
                x.expect_tag(Self::ID)?;
                let mut value = <Self as ::core::default::Default>::default();
                #decode

                ::core::result::Result::Ok(value)
            }
        }
    })
}

// vector_wrapper
// newtype over the bare sequence; the generic vector tag is its only header
fn vector_wrapper(b: &CodeBuilder<'_>, wrapper: &VectorWrapper) -> Result<TokenStream, BuildError> {
    let name = ident::type_name(&wrapper.name)?;
    let wire = &b.paths.wire;
    let ty = b.field_type(&wrapper.field.ty)?;

    let encode = fragment::encode(b, std::slice::from_ref(&wrapper.encode), &self_items)?;
    let decode = fragment::decode(std::slice::from_ref(&wrapper.decode), &value_items)?;

    Ok(quote! {
        #[derive(Clone, Debug, Default, PartialEq)]
        pub struct #name(pub #ty);

        impl #wire::TlObject for #name {
            fn encode(&self, x: &mut #wire::Encoder) -> ::core::result::Result<(), #wire::WireError> {
                #encode

                ::core::result::Result::Ok(())
            }

            fn decode(x: &mut #wire::Decoder<'_>) -> ::core::result::Result<Self, #wire::WireError> {
                let mut value = <Self as ::core::default::Default>::default();
                #decode

                ::core::result::Result::Ok(value)
            }
        }
    })
}

fn self_items(_: &str) -> Result<TokenStream, BuildError> {
    Ok(quote!(self.0))
}

fn value_items(_: &str) -> Result<TokenStream, BuildError> {
    Ok(quote!(value.0))
}

fn service_trait(b: &CodeBuilder<'_>, service: &Service) -> Result<TokenStream, BuildError> {
    let name = ident::type_name(&format!("{}_service", service.name))?;
    let prefix = format!("{}_", service.name);

    let mut methods = quote!();
    for method in &service.methods {
        let predicate = &method.request.predicate;
        let fn_name = ident::field(predicate.strip_prefix(&prefix).unwrap_or(predicate))?;
        let request = ident::type_name(predicate)?;
        let response = b.response_type(&method.response)?;

        methods.extend(quote! {
            fn #fn_name(&mut self, request: #request) -> ::core::result::Result<#response, Self::Error>;
        });
    }

    debug!(service = %service.name, methods = service.methods.len(), "rendered service");

    Ok(quote! {
        pub trait #name {
            type Error;

            #methods
        }
    })
}

//! Service Aggregator.

use crate::{
    codec::CodecGen,
    config::GeneratorConfig,
    error::{ErrorKind, GenerateError},
    fragment::{Decode, Element, Encode},
    ident::{message_name, vector_wrapper_name},
    ir::{FieldRef, FunctionTree, MessageShape, Method, ResponseType, Service, VectorWrapper},
    map::{FieldType, map},
};
use indexmap::IndexMap;
use tlgen_schema::{node::Function, types::Type};
use tracing::debug;

/// Field name of every vector wrapper's single field.
pub const WRAPPER_FIELD: &str = "items";

///
/// ServiceAggregator
///
/// Groups methods by namespace. Services and wrappers keep the order in which
/// they were first needed.
///

pub struct ServiceAggregator<'a> {
    config: &'a GeneratorConfig,
    services: IndexMap<String, Vec<Method>>,
    wrappers: IndexMap<String, VectorWrapper>,
}

impl<'a> ServiceAggregator<'a> {
    #[must_use]
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self {
            config,
            services: IndexMap::new(),
            wrappers: IndexMap::new(),
        }
    }

    pub fn add(&mut self, function: &Function) -> Result<(), GenerateError> {
        if self.config.is_ignored(&function.method) {
            debug!(method = %function.method, "skipping ignored method");
            return Ok(());
        }

        let request = request(function, self.config)?;
        let response = self
            .response(&function.result)
            .map_err(|kind| kind.at(function.source_line()))?;

        self.services
            .entry(function.namespace().to_string())
            .or_default()
            .push(Method { request, response });

        Ok(())
    }

    #[must_use]
    pub fn finish(self) -> FunctionTree {
        let services = self
            .services
            .into_iter()
            .map(|(name, methods)| {
                debug!(service = %name, methods = methods.len(), "aggregated service");
                Service { name, methods }
            })
            .collect();

        FunctionTree {
            services,
            vector_wrappers: self.wrappers.into_values().collect(),
        }
    }

    fn response(&mut self, result: &Type) -> Result<ResponseType, ErrorKind> {
        match result {
            Type::BuiltinVector(elem) | Type::GenericVector(elem) => {
                let element = Element::from_type(elem)?;
                let element_name = element_name(elem, &element);
                let name = vector_wrapper_name(&element_name);

                if !self.wrappers.contains_key(&name) {
                    debug!(wrapper = %name, "synthesized vector wrapper");
                    self.wrappers
                        .insert(name.clone(), wrapper(&name, element_name, element));
                }

                Ok(ResponseType::Wrapper(name))
            }
            Type::NamedTypeRef(name) | Type::ConstructorRef(name) => {
                Ok(ResponseType::Named(message_name(name)))
            }
            Type::FlagsMarker | Type::OptionalField { .. } | Type::True => {
                Err(ErrorKind::UnmappedType {
                    ty: result.to_string(),
                })
            }
            scalar => Ok(ResponseType::Named(message_name(&scalar.to_string()))),
        }
    }
}

// request
// one field per materialized parameter, numbered by its own ordinal
fn request(function: &Function, config: &GeneratorConfig) -> Result<MessageShape, GenerateError> {
    let line = function.source_line();
    let names: Vec<String> = function.params.iter().map(|p| p.name.clone()).collect();

    let mut fields = Vec::new();
    for param in &function.params {
        if let Some(ty) = map(&param.ty).map_err(|kind| kind.at(line.clone()))? {
            fields.push(FieldRef {
                index: fields.len(),
                name: param.name.clone(),
                ty,
            });
        }
    }

    let (encode, decode) = CodecGen::new(&function.params, &names, config.flag_bits)
        .fragments()
        .map_err(|kind| kind.at(line.clone()))?;

    Ok(MessageShape {
        predicate: message_name(&function.method),
        id: function.id,
        fields,
        encode,
        decode,
        line,
    })
}

fn element_name(elem: &Type, element: &Element) -> String {
    match element {
        Element::Nested(target) => target.name().to_string(),
        Element::Scalar(_) | Element::Blob(_) => message_name(&elem.to_string()),
    }
}

fn wrapper(name: &str, element_name: String, element: Element) -> VectorWrapper {
    VectorWrapper {
        name: name.to_string(),
        element_name,
        field: FieldRef {
            index: 0,
            name: WRAPPER_FIELD.to_string(),
            ty: FieldType::Seq(Box::new(element.field_type())),
        },
        encode: Encode::Sequence {
            field: WRAPPER_FIELD.to_string(),
            element: element.clone(),
            tagged: true,
        },
        decode: Decode::Sequence {
            field: WRAPPER_FIELD.to_string(),
            element,
            tagged: true,
        },
    }
}

///
/// TESTS
///

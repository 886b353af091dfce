//! Output trees handed to the renderer. Built once per run, never mutated.

use crate::{
    fragment::{Decode, Encode},
    map::FieldType,
};
use serde::{Deserialize, Serialize};

///
/// Field
/// One entry of a base type's unified field table.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Field {
    pub index: usize,
    pub name: String,
    pub ty: FieldType,
}

///
/// FieldRef
/// A message's view of one field. For constructors `index` points into the
/// base type's field table; for requests it is the field's own ordinal.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct FieldRef {
    pub index: usize,
    pub name: String,
    pub ty: FieldType,
}

///
/// MessageShape
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct MessageShape {
    pub predicate: String,
    pub id: u32,
    pub fields: Vec<FieldRef>,
    pub encode: Vec<Encode>,
    pub decode: Vec<Decode>,
    pub line: String,
}

impl MessageShape {
    #[must_use]
    pub fn field_indices(&self) -> Vec<usize> {
        self.fields.iter().map(|f| f.index).collect()
    }
}

///
/// BaseType
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct BaseType {
    pub name: String,
    pub fields: Vec<Field>,
    pub constructors: Vec<MessageShape>,
}

impl BaseType {
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    #[must_use]
    pub fn constructor(&self, predicate: &str) -> Option<&MessageShape> {
        self.constructors.iter().find(|c| c.predicate == predicate)
    }
}

///
/// TypeTree
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct TypeTree {
    pub base_types: Vec<BaseType>,
}

impl TypeTree {
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&BaseType> {
        self.base_types.iter().find(|b| b.name == name)
    }

    /// Base type and shape for a constructor predicate.
    #[must_use]
    pub fn find_constructor(&self, predicate: &str) -> Option<(&BaseType, &MessageShape)> {
        self.base_types
            .iter()
            .find_map(|b| b.constructor(predicate).map(|c| (b, c)))
    }
}

///
/// ResponseType
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ResponseType {
    /// A declared type name.
    Named(String),
    /// A synthesized [`VectorWrapper`] name.
    Wrapper(String),
}

impl ResponseType {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Named(name) | Self::Wrapper(name) => name,
        }
    }
}

///
/// Method
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Method {
    pub request: MessageShape,
    pub response: ResponseType,
}

///
/// Service
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Service {
    pub name: String,
    pub methods: Vec<Method>,
}

///
/// VectorWrapper
/// Named stand-in for a bare sequence returned by an RPC method.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct VectorWrapper {
    pub name: String,
    pub element_name: String,
    pub field: FieldRef,
    pub encode: Encode,
    pub decode: Decode,
}

///
/// FunctionTree
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct FunctionTree {
    pub services: Vec<Service>,
    pub vector_wrappers: Vec<VectorWrapper>,
}

impl FunctionTree {
    #[must_use]
    pub fn service(&self, name: &str) -> Option<&Service> {
        self.services.iter().find(|s| s.name == name)
    }

    pub fn requests(&self) -> impl Iterator<Item = &MessageShape> {
        self.services
            .iter()
            .flat_map(|s| s.methods.iter().map(|m| &m.request))
    }
}

///
/// Generated
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Generated {
    pub types: TypeTree,
    pub functions: FunctionTree,
}

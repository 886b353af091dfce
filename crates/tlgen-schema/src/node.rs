use crate::{NAMESPACE_SEPARATOR, SchemaError, prelude::*};

///
/// Param
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Param {
    pub name: String,
    pub ty: Type,

    /// Declared position within the owning parameter list.
    pub position: usize,
}

impl Param {
    #[must_use]
    pub fn new(name: impl Into<String>, ty: Type, position: usize) -> Self {
        Self {
            name: name.into(),
            ty,
            position,
        }
    }
}

///
/// Constructor
///
/// One concrete, taggable variant of a base type.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Constructor {
    pub predicate: String,
    pub id: u32,
    pub result_type: String,

    #[serde(default)]
    pub params: Vec<Param>,

    /// Original schema line; synthesized by [`Self::source_line`] when empty.
    #[serde(default)]
    pub line: String,
}

impl Constructor {
    #[must_use]
    pub fn new(predicate: impl Into<String>, id: u32, result_type: impl Into<String>) -> Self {
        Self {
            predicate: predicate.into(),
            id,
            result_type: result_type.into(),
            params: Vec::new(),
            line: String::new(),
        }
    }

    /// Append a parameter at the next declared position.
    #[must_use]
    pub fn param(mut self, name: impl Into<String>, ty: Type) -> Self {
        let position = self.params.len();
        self.params.push(Param::new(name, ty, position));
        self
    }

    #[must_use]
    pub fn line(mut self, line: impl Into<String>) -> Self {
        self.line = line.into();
        self
    }

    #[must_use]
    pub fn source_line(&self) -> String {
        if self.line.is_empty() {
            render_line(&self.predicate, self.id, &self.params, &self.result_type)
        } else {
            self.line.clone()
        }
    }
}

///
/// Function
///
/// One RPC method.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Function {
    pub method: String,
    pub id: u32,

    #[serde(default)]
    pub params: Vec<Param>,

    pub result: Type,

    #[serde(default)]
    pub line: String,
}

impl Function {
    #[must_use]
    pub fn new(method: impl Into<String>, id: u32, result: Type) -> Self {
        Self {
            method: method.into(),
            id,
            params: Vec::new(),
            result,
            line: String::new(),
        }
    }

    #[must_use]
    pub fn param(mut self, name: impl Into<String>, ty: Type) -> Self {
        let position = self.params.len();
        self.params.push(Param::new(name, ty, position));
        self
    }

    #[must_use]
    pub fn line(mut self, line: impl Into<String>) -> Self {
        self.line = line.into();
        self
    }

    /// Text before the first namespace separator, or the whole method name.
    #[must_use]
    pub fn namespace(&self) -> &str {
        self.method
            .split_once(NAMESPACE_SEPARATOR)
            .map_or(self.method.as_str(), |(namespace, _)| namespace)
    }

    #[must_use]
    pub fn source_line(&self) -> String {
        if self.line.is_empty() {
            render_line(&self.method, self.id, &self.params, &self.result.to_string())
        } else {
            self.line.clone()
        }
    }
}

///
/// Schema
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Schema {
    #[serde(default)]
    pub constructors: Vec<Constructor>,

    #[serde(default)]
    pub functions: Vec<Function>,
}

impl Schema {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            constructors: Vec::new(),
            functions: Vec::new(),
        }
    }

    #[must_use]
    pub fn constructor(mut self, constructor: Constructor) -> Self {
        self.constructors.push(constructor);
        self
    }

    #[must_use]
    pub fn function(mut self, function: Function) -> Self {
        self.functions.push(function);
        self
    }

    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, SchemaError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    #[must_use]
    pub fn get_constructor(&self, predicate: &str) -> Option<&Constructor> {
        self.constructors.iter().find(|c| c.predicate == predicate)
    }
}

// render_line
// `name#id a:int b:flags.0?string = Result;`
fn render_line(name: &str, id: u32, params: &[Param], result: &str) -> String {
    let mut line = format!("{name}#{id:08x}");
    for param in params {
        line.push(' ');
        line.push_str(&param.name);
        line.push(':');
        line.push_str(&param.ty.to_string());
    }
    line.push_str(" = ");
    line.push_str(result);
    line.push(';');

    line
}

///
/// TESTS
///

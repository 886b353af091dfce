use thiserror::Error as ThisError;

///
/// GenerateError
///
/// A fatal generation failure, tagged with the schema line it came from so
/// the operator can find it. The first one aborts the run.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("{kind} in `{line}`")]
pub struct GenerateError {
    pub kind: ErrorKind,
    pub line: String,
}

impl GenerateError {
    pub fn new(kind: ErrorKind, line: impl Into<String>) -> Self {
        Self {
            kind,
            line: line.into(),
        }
    }
}

///
/// ErrorKind
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ErrorKind {
    #[error("no codec rule for type `{ty}`")]
    UnmappedType { ty: String },

    #[error("vector element type `{elem}` has no codec rule")]
    UnsupportedVectorElement { elem: String },

    #[error("base type `{base_type}` has ambiguous field `{field}` after collision resolution")]
    AmbiguousField { base_type: String, field: String },
}

impl ErrorKind {
    #[must_use]
    pub fn at(self, line: impl Into<String>) -> GenerateError {
        GenerateError::new(self, line)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_source_line() {
        let err = ErrorKind::UnmappedType {
            ty: "flags.0?#".to_string(),
        }
        .at("broken#1 a:flags.0?# = X;");

        assert_eq!(
            err.to_string(),
            "no codec rule for type `flags.0?#` in `broken#1 a:flags.0?# = X;`"
        );
    }
}

//! Rust identifiers for schema names.

use crate::BuildError;
use convert_case::{Case, Casing};
use proc_macro2::{Ident, Span};
use std::collections::BTreeSet;

/// Member holding a base type's constructor tag.
pub const TAG_FIELD: &str = "constructor";

// strict and reserved keywords that can be written as raw identifiers
const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do",
    "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized",
    "use", "virtual", "where", "while", "yield",
];

// keywords that cannot be raw
const SUFFIXED: &[&str] = &["crate", "self", "Self", "super", "_"];

/// Field or method name, `snake_case`.
pub fn field(name: &str) -> Result<Ident, BuildError> {
    ident(&name.to_case(Case::Snake), name)
}

/// Struct member; `constructor` is reserved for the tag.
pub fn member(name: &str) -> Result<Ident, BuildError> {
    let ident = field(name)?;
    if ident == TAG_FIELD {
        return Ok(Ident::new(&format!("{TAG_FIELD}_"), Span::call_site()));
    }

    Ok(ident)
}

/// Members for one struct, in field order.
///
/// Distinct schema names can case to the same identifier (`fromId` and
/// `from_id`); any repeat, including a clash with `reserved`, is an error.
pub fn members<'n>(
    owner: &str,
    names: impl IntoIterator<Item = &'n str>,
    reserved: &[&str],
) -> Result<Vec<Ident>, BuildError> {
    let mut seen: BTreeSet<String> = reserved.iter().map(ToString::to_string).collect();
    let mut out = Vec::new();

    for name in names {
        let member = member(name)?;
        if !seen.insert(member.to_string()) {
            return Err(BuildError::DuplicateIdent {
                owner: owner.to_string(),
                member: member.to_string(),
            });
        }
        out.push(member);
    }

    Ok(out)
}

/// Struct or trait name, `UpperCamelCase`.
pub fn type_name(name: &str) -> Result<Ident, BuildError> {
    ident(&name.to_case(Case::UpperCamel), name)
}

/// Constant name, `UPPER_SNAKE_CASE`.
pub fn constant(name: &str) -> Result<Ident, BuildError> {
    ident(&name.to_case(Case::UpperSnake), name)
}

fn ident(cased: &str, original: &str) -> Result<Ident, BuildError> {
    let mut chars = cased.chars();
    let valid = chars
        .next()
        .is_some_and(|c| c == '_' || c.is_ascii_alphabetic())
        && chars.all(|c| c == '_' || c.is_ascii_alphanumeric());

    if !valid {
        return Err(BuildError::InvalidIdent(original.to_string()));
    }

    let span = Span::call_site();
    let ident = if SUFFIXED.contains(&cased) {
        Ident::new(&format!("{cased}_"), span)
    } else if KEYWORDS.contains(&cased) {
        Ident::new_raw(cased, span)
    } else {
        Ident::new(cased, span)
    };

    Ok(ident)
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn casing() {
        assert_eq!(field("from_id").unwrap().to_string(), "from_id");
        assert_eq!(field("getHistory").unwrap().to_string(), "get_history");
        assert_eq!(type_name("messages_Messages").unwrap().to_string(), "MessagesMessages");
        assert_eq!(type_name("Vector_Message").unwrap().to_string(), "VectorMessage");
        assert_eq!(constant("userEmpty").unwrap().to_string(), "USER_EMPTY");
    }

    #[test]
    fn keywords_are_escaped() {
        assert_eq!(field("type").unwrap().to_string(), "r#type");
        assert_eq!(field("self").unwrap().to_string(), "self_");
        assert_eq!(type_name("self").unwrap().to_string(), "Self_");
        assert_eq!(member("constructor").unwrap().to_string(), "constructor_");
    }

    #[test]
    fn members_that_case_alike_are_rejected() {
        let ok = members("Message", ["fromId", "peer_id"], &[TAG_FIELD]).unwrap();
        assert_eq!(ok.iter().map(ToString::to_string).collect::<Vec<_>>(), ["from_id", "peer_id"]);

        let err = members("Message", ["fromId", "from_id"], &[]).unwrap_err();
        assert!(
            matches!(err, BuildError::DuplicateIdent { ref owner, ref member } if owner == "Message" && member == "from_id"),
            "{err}"
        );

        let err = members("Peer", ["constructor", "constructor_"], &[TAG_FIELD]).unwrap_err();
        assert!(matches!(err, BuildError::DuplicateIdent { ref member, .. } if member == "constructor_"), "{err}");
    }

    #[test]
    fn invalid_names_are_rejected() {
        assert!(matches!(field("9lives"), Err(BuildError::InvalidIdent(_))));
        assert!(matches!(field(""), Err(BuildError::InvalidIdent(_))));
    }
}

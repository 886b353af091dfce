use serde::{Deserialize, Serialize};

/// Connection and session bootstrap methods; these are written by hand and
/// never generated.
pub const IGNORED_METHODS: &[&str] = &[
    "invokeAfterMsg",
    "invokeAfterMsgs",
    "initConnection",
    "invokeWithLayer",
    "invokeWithoutUpdates",
];

///
/// FlagBits
///
/// Which bit of the flags word guards an optional field. `Positional` is
/// the legacy rule where the bit is the parameter's index.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagBits {
    /// The bit number written in the schema (`flags.3?string` uses bit 3).
    #[default]
    Declared,

    /// The parameter's position in its constructor's declared list.
    Positional,
}

impl FlagBits {
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn resolve(self, declared: u32, position: usize) -> u32 {
        match self {
            Self::Declared => declared,
            Self::Positional => position as u32,
        }
    }
}

///
/// GeneratorConfig
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub flag_bits: FlagBits,
    pub ignored_methods: Vec<String>,
}

impl GeneratorConfig {
    #[must_use]
    pub fn with_flag_bits(mut self, flag_bits: FlagBits) -> Self {
        self.flag_bits = flag_bits;
        self
    }

    #[must_use]
    pub fn is_ignored(&self, method: &str) -> bool {
        self.ignored_methods.iter().any(|m| m == method)
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            flag_bits: FlagBits::default(),
            ignored_methods: IGNORED_METHODS.iter().map(ToString::to_string).collect(),
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
    fn default_ignores_bootstrap_methods() {
        let config = GeneratorConfig::default();

        assert!(config.is_ignored("initConnection"));
        assert!(config.is_ignored("invokeWithLayer"));
        assert!(!config.is_ignored("messages.getHistory"));
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let config: GeneratorConfig = serde_json::from_str(r#"{ "flag_bits": "positional" }"#).unwrap();

        assert_eq!(config.flag_bits, FlagBits::Positional);
        assert_eq!(config.ignored_methods.len(), IGNORED_METHODS.len());
    }

    #[test]
    fn flag_bit_policy_resolution() {
        assert_eq!(FlagBits::Declared.resolve(5, 2), 5);
        assert_eq!(FlagBits::Positional.resolve(5, 2), 2);
    }
}

use proc_macro2::TokenStream;
use quote::quote;
use syn::Path;

/// Environment override for the wire runtime path.
pub const WIRE_CRATE_ENV: &str = "TLGEN_WIRE_CRATE";

fn env_path(name: &str) -> Option<TokenStream> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .and_then(|value| syn::parse_str::<Path>(&value).ok())
        .map(|path| quote!(#path))
}

///
/// CratePaths
///
/// Runtime crate roots referenced by generated code. Consumers of the
/// `tlgen` facade get `::tlgen::wire`; everything else defaults to
/// `::tlgen_wire`. `TLGEN_WIRE_CRATE` overrides both.
///

#[derive(Clone, Debug)]
pub struct CratePaths {
    pub wire: TokenStream,
}

impl CratePaths {
    #[must_use]
    pub fn new() -> Self {
        Self {
            wire: env_path(WIRE_CRATE_ENV).unwrap_or_else(|| quote!(::tlgen_wire)),
        }
    }

    /// Paths for code compiled against the `tlgen` facade.
    #[must_use]
    pub fn facade() -> Self {
        Self {
            wire: env_path(WIRE_CRATE_ENV).unwrap_or_else(|| quote!(::tlgen::wire)),
        }
    }
}

impl Default for CratePaths {
    fn default() -> Self {
        Self::new()
    }
}

///
/// TESTS
///

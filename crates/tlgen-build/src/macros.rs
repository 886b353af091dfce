//! Build-script helper that renders a JSON schema into `$OUT_DIR/tl.rs`.
//!
//! Use from a `build.rs` whose `main` returns
//! `Result<(), Box<dyn std::error::Error>>`, then
//! `include!(concat!(env!("OUT_DIR"), "/tl.rs"));` in the crate.
#[macro_export]
macro_rules! build {
    ($schema:expr) => {
        $crate::build!($schema, $crate::GeneratorConfig::default())
    };

    ($schema:expr, $config:expr) => {
        use std::{env::var, fs, path::PathBuf};

        //
        // CARGO
        //

        println!("cargo:rerun-if-changed=build.rs");
        println!("cargo:rerun-if-changed={}", $schema);
        println!("cargo:rerun-if-env-changed={}", $crate::paths::WIRE_CRATE_ENV);

        let out_dir = var("OUT_DIR")?;

        //
        // TL CODE
        //

        let json = fs::read_to_string($schema)?;
        let output = $crate::generate_from_json(&json, &$config)?;

        fs::write(PathBuf::from(out_dir).join("tl.rs"), output)?;
    };
}

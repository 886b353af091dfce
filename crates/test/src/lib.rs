//! Code generated from `schema/tl.json` at build time, compiled and exercised
//! against the wire runtime.

include!(concat!(env!("OUT_DIR"), "/tl.rs"));

///
/// TESTS
///

#[cfg(test)]
mod tests;

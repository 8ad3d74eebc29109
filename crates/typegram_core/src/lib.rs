//! Runtime compiler for flat struct type descriptions, plus the dynamic record
//! and result sequence types built on top of the compiled registry.

/// Type-description lexing, compilation, registry, and dynamic records.
pub mod schema;

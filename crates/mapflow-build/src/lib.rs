//! Lineage graph construction.
//!
//! [`build`] walks a compiled [`MappingConfig`](mapflow_ir::MappingConfig)
//! and produces a [`LineageGraph`](mapflow_core::LineageGraph): one node per
//! mapped target, literal, projector and projector argument, with value,
//! argument and condition edges describing how data flows between them.
//!
//! The walk tracks lexical scope in an environment arena (projector
//! activations, bound arguments, previously written targets, local
//! variables), resolves cross-scope references through cached lineage trees,
//! and rejects recursive mappings before descending into them. Builds either
//! run to completion or fail fast with a typed
//! [`BuildError`](mapflow_core::BuildError); there are no partial results.

pub mod ancestors;
pub mod builder;
pub mod builtins;
pub mod env;

pub use builder::build;
pub use builtins::DEFAULT_BUILTINS;

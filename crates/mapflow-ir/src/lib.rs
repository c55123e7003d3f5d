//! Compiled mapping-configuration IR.
//!
//! This crate defines the input contract of the lineage graph builder: the
//! data model a mapping-language frontend lowers its programs into. The
//! builder consumes these types by value and never interprets them beyond
//! what lineage extraction requires; in particular it does not evaluate
//! projectors or preserve numeric semantics beyond the stored width.
//!
//! All types are plain serde-serializable data so a compiled configuration
//! can be read from JSON by the CLI shell or constructed directly in tests.

pub mod config;
pub mod meta;
pub mod source;

pub use config::{FieldMapping, MappingConfig, ProjectorDefinition, Target};
pub use meta::FileMetaData;
pub use source::{InputSource, Source, ValueSource};

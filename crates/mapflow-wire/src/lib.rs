//! Wire format of the lineage graph.
//!
//! The wire message is a contract with downstream tooling, kept bijective
//! with the in-memory graph (minus the lineage cache, which is build-internal
//! and never serialized). Messages are hand-written `prost` structs rather
//! than generated from a `.proto`, which keeps the build free of a protoc
//! step; map fields are `BTreeMap` so encoding is byte-deterministic.

pub mod convert;
pub mod proto;

pub use convert::{encode, to_wire};

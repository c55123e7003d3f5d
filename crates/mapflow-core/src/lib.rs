//! Core data model for field-lineage graphs.
//!
//! A lineage graph is an id-indexed table of tagged nodes plus ordered
//! adjacency maps for the three edge kinds (value, argument, condition).
//! Nodes never reference each other directly; every cross-reference is a
//! [`NodeId`], which keeps the serializer a single pass and sidesteps
//! ownership cycles entirely.

pub mod error;
pub mod graph;
pub mod id;
pub mod lineage;
pub mod node;

pub use error::BuildError;
pub use graph::{EdgeKind, LineageGraph};
pub use id::{IdAllocator, NodeId};
pub use lineage::{match_up_to_diff, resolve_path, split_path, ArgLineage, ChildTargets, TargetLineage};
pub use node::{
    ArgumentNode, ConstBoolNode, ConstFloatNode, ConstIntNode, ConstStringNode, Node, NodeOrigin,
    ProjectorNode, RootNode, TargetNode,
};

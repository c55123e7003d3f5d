//! The unified error sum for graph construction.
//!
//! Every failure mode of the builder is a variant here; errors abort the
//! build and surface with the offending name, path or index. There is no
//! local recovery and no partially built graph on the error path.

use thiserror::Error;

use crate::id::NodeId;

/// Errors produced while building a lineage graph.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildError {
    /// The IR carried a shape the builder does not recognize.
    #[error("unsupported message: {0}")]
    UnsupportedMessage(String),

    /// A field mapping has no value source.
    #[error("mapping for target '{0}' has no value source")]
    MissingSource(String),

    /// A referenced projector is absent from the projector table.
    #[error("projector '{0}' is not defined")]
    UnknownProjector(String),

    /// A destination look-back found no previously written target.
    #[error("no target named '{0}' has been written in this scope")]
    UnknownDestination(String),

    /// A local variable reference found no binding in scope.
    #[error("local variable '{0}' is not bound in this scope")]
    UnknownLocalVar(String),

    /// An input reference is outside the active scope's argument bindings.
    #[error("argument index {index} is out of range in '{scope}'")]
    ArgIndexOutOfRange { index: i32, scope: String },

    /// Dotted navigation matched a head but reached no terminal target.
    #[error("path '{0}' does not resolve to a target")]
    PathNotFound(String),

    /// A non-argument cycle was detected.
    #[error("recursive mapping detected at {0}")]
    RecursiveMapping(String),

    /// Internal integrity failure: an edge was appended onto a node that is
    /// not in the graph.
    #[error("dangling edge: descendant node {0} is not in the graph")]
    DanglingEdge(NodeId),
}

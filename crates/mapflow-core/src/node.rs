//! The tagged node sum of the lineage graph.
//!
//! Every mapped target, literal, projector, projector argument and synthetic
//! root input materializes as one variant of [`Node`]. A node carries its
//! graph id, the name of the enclosing projector (`"root"` at top level),
//! optional file metadata, and [`NodeOrigin`]: the IR message it was
//! materialized from. The origin is what the recursion check compares, so
//! two appearances of the same computation are payload-equal even though
//! their ids differ.

use std::fmt;

use mapflow_ir::{FieldMapping, FileMetaData, ProjectorDefinition, ValueSource};

use crate::id::NodeId;

/// The IR message a node was materialized from.
///
/// Projector nodes store only the definition; the call site that bound their
/// arguments is deliberately excluded so repeated calls of one definition
/// compare equal.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeOrigin {
    Mapping(FieldMapping),
    Source(ValueSource),
    Definition(ProjectorDefinition),
}

/// A node in the lineage graph.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Target(TargetNode),
    ConstBool(ConstBoolNode),
    ConstInt(ConstIntNode),
    ConstFloat(ConstFloatNode),
    ConstString(ConstStringNode),
    Projector(ProjectorNode),
    Argument(ArgumentNode),
    Root(RootNode),
}

/// A destination field written by a mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetNode {
    pub id: NodeId,
    /// Target name with the overwrite marker stripped.
    pub name: String,
    pub context: String,
    pub is_variable: bool,
    pub is_overwrite: bool,
    pub is_root: bool,
    pub is_out: bool,
    pub file_data: Option<FileMetaData>,
    pub origin: NodeOrigin,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConstBoolNode {
    pub id: NodeId,
    pub value: bool,
    pub context: String,
    pub file_data: Option<FileMetaData>,
    pub origin: NodeOrigin,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConstIntNode {
    pub id: NodeId,
    pub value: i32,
    pub context: String,
    pub file_data: Option<FileMetaData>,
    pub origin: NodeOrigin,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConstFloatNode {
    pub id: NodeId,
    pub value: f32,
    pub context: String,
    pub file_data: Option<FileMetaData>,
    pub origin: NodeOrigin,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConstStringNode {
    pub id: NodeId,
    pub value: String,
    pub context: String,
    pub file_data: Option<FileMetaData>,
    pub origin: NodeOrigin,
}

/// A projector definition entered by a call.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectorNode {
    pub id: NodeId,
    pub name: String,
    pub context: String,
    pub is_builtin: bool,
    pub file_data: Option<FileMetaData>,
    pub origin: NodeOrigin,
}

/// A positional argument referenced from a projector body.
#[derive(Debug, Clone, PartialEq)]
pub struct ArgumentNode {
    pub id: NodeId,
    /// 1-based argument index.
    pub index: i32,
    /// Dotted sub-path into the argument, empty for the whole value.
    pub field: String,
    pub context: String,
    pub file_data: Option<FileMetaData>,
    pub origin: NodeOrigin,
}

/// The synthetic root input of the mapping configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RootNode {
    pub id: NodeId,
    pub field: String,
    pub context: String,
    pub file_data: Option<FileMetaData>,
    pub origin: NodeOrigin,
}

impl Node {
    pub fn id(&self) -> NodeId {
        match self {
            Node::Target(n) => n.id,
            Node::ConstBool(n) => n.id,
            Node::ConstInt(n) => n.id,
            Node::ConstFloat(n) => n.id,
            Node::ConstString(n) => n.id,
            Node::Projector(n) => n.id,
            Node::Argument(n) => n.id,
            Node::Root(n) => n.id,
        }
    }

    /// Name of the enclosing projector at materialization time.
    pub fn context(&self) -> &str {
        match self {
            Node::Target(n) => &n.context,
            Node::ConstBool(n) => &n.context,
            Node::ConstInt(n) => &n.context,
            Node::ConstFloat(n) => &n.context,
            Node::ConstString(n) => &n.context,
            Node::Projector(n) => &n.context,
            Node::Argument(n) => &n.context,
            Node::Root(n) => &n.context,
        }
    }

    /// The IR message this node was materialized from.
    pub fn origin(&self) -> &NodeOrigin {
        match self {
            Node::Target(n) => &n.origin,
            Node::ConstBool(n) => &n.origin,
            Node::ConstInt(n) => &n.origin,
            Node::ConstFloat(n) => &n.origin,
            Node::ConstString(n) => &n.origin,
            Node::Projector(n) => &n.origin,
            Node::Argument(n) => &n.origin,
            Node::Root(n) => &n.origin,
        }
    }

    /// Structural equality ignoring graph identity.
    ///
    /// Compares everything except `id` and `origin`; this is the equality
    /// tests use to match expected nodes against built graphs without
    /// predicting id assignment.
    pub fn eq_ignore_id(&self, other: &Node) -> bool {
        match (self, other) {
            (Node::Target(a), Node::Target(b)) => {
                a.name == b.name
                    && a.context == b.context
                    && a.is_variable == b.is_variable
                    && a.is_overwrite == b.is_overwrite
                    && a.is_root == b.is_root
                    && a.is_out == b.is_out
                    && a.file_data == b.file_data
            }
            (Node::ConstBool(a), Node::ConstBool(b)) => {
                a.value == b.value && a.context == b.context && a.file_data == b.file_data
            }
            (Node::ConstInt(a), Node::ConstInt(b)) => {
                a.value == b.value && a.context == b.context && a.file_data == b.file_data
            }
            (Node::ConstFloat(a), Node::ConstFloat(b)) => {
                a.value == b.value && a.context == b.context && a.file_data == b.file_data
            }
            (Node::ConstString(a), Node::ConstString(b)) => {
                a.value == b.value && a.context == b.context && a.file_data == b.file_data
            }
            (Node::Projector(a), Node::Projector(b)) => {
                a.name == b.name
                    && a.context == b.context
                    && a.is_builtin == b.is_builtin
                    && a.file_data == b.file_data
            }
            (Node::Argument(a), Node::Argument(b)) => {
                a.index == b.index
                    && a.field == b.field
                    && a.context == b.context
                    && a.file_data == b.file_data
            }
            (Node::Root(a), Node::Root(b)) => {
                a.field == b.field && a.context == b.context && a.file_data == b.file_data
            }
            _ => false,
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Target(n) => write!(f, "{}) Target: {}", n.id, n.name),
            Node::ConstBool(n) => write!(f, "{}) ConstBool: {}", n.id, n.value),
            Node::ConstInt(n) => write!(f, "{}) ConstInt: {}", n.id, n.value),
            Node::ConstFloat(n) => write!(f, "{}) ConstFloat: {}", n.id, n.value),
            Node::ConstString(n) => write!(f, "{}) ConstString: {}", n.id, n.value),
            Node::Projector(n) => write!(f, "{}) Projector: {}", n.id, n.name),
            Node::Argument(n) => write!(f, "{}) Arg: {}{}", n.id, n.index, n.field),
            Node::Root(n) => {
                if n.field.is_empty() {
                    write!(f, "{}) $Root", n.id)
                } else {
                    write!(f, "{}) $Root: {}", n.id, n.field)
                }
            }
        }
    }
}

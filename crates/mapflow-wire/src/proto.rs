//! Hand-written prost messages for the wire graph.
//!
//! Field numbers are part of the contract and must not be reordered. The
//! `Node` one-of reserves arms (tags 9-11) for array and JSON nodes that
//! other producers of this format emit; this builder never produces them.

use std::collections::BTreeMap;

/// The serialized lineage graph.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Graph {
    /// Value dependencies: node id to the ids it reads from.
    #[prost(btree_map = "int32, message", tag = "1")]
    pub edges: BTreeMap<i32, EdgeList>,
    /// Positional arguments, keyed by projector node id.
    #[prost(btree_map = "int32, message", tag = "2")]
    pub argument_edges: BTreeMap<i32, EdgeList>,
    /// Boolean gates, keyed by target node id.
    #[prost(btree_map = "int32, message", tag = "3")]
    pub condition_edges: BTreeMap<i32, EdgeList>,
    /// Root/out targets by name.
    #[prost(btree_map = "string, message", tag = "4")]
    pub root_and_out_targets: BTreeMap<String, EdgeList>,
    /// All nodes by id.
    #[prost(btree_map = "int32, message", tag = "5")]
    pub nodes: BTreeMap<i32, Node>,
}

/// An ordered list of node ids.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct EdgeList {
    #[prost(int32, repeated, tag = "1")]
    pub edges: Vec<i32>,
}

/// One node, as a tagged one-of.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Node {
    #[prost(oneof = "node::Kind", tags = "1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11")]
    pub kind: Option<node::Kind>,
}

pub mod node {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Kind {
        #[prost(message, tag = "1")]
        TargetNode(super::TargetNode),
        #[prost(message, tag = "2")]
        ConstBoolNode(super::ConstBoolNode),
        #[prost(message, tag = "3")]
        ConstIntNode(super::ConstIntNode),
        #[prost(message, tag = "4")]
        ConstFloatNode(super::ConstFloatNode),
        #[prost(message, tag = "5")]
        ConstStringNode(super::ConstStringNode),
        #[prost(message, tag = "6")]
        ProjectorNode(super::ProjectorNode),
        #[prost(message, tag = "7")]
        ArgumentNode(super::ArgumentNode),
        #[prost(message, tag = "8")]
        RootNode(super::RootNode),
        #[prost(message, tag = "9")]
        ArrayNode(super::ArrayNode),
        #[prost(message, tag = "10")]
        ArrayIndexNode(super::ArrayIndexNode),
        #[prost(message, tag = "11")]
        JsonNode(super::JsonNode),
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TargetNode {
    #[prost(int32, tag = "1")]
    pub id: i32,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(string, tag = "3")]
    pub context: String,
    #[prost(bool, tag = "4")]
    pub is_variable: bool,
    #[prost(bool, tag = "5")]
    pub is_overwrite: bool,
    #[prost(bool, tag = "6")]
    pub is_root: bool,
    #[prost(bool, tag = "7")]
    pub is_out: bool,
    #[prost(message, optional, tag = "8")]
    pub file_data: Option<FileMetaData>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ConstBoolNode {
    #[prost(int32, tag = "1")]
    pub id: i32,
    #[prost(bool, tag = "2")]
    pub value: bool,
    #[prost(string, tag = "3")]
    pub context: String,
    #[prost(message, optional, tag = "4")]
    pub file_data: Option<FileMetaData>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ConstIntNode {
    #[prost(int32, tag = "1")]
    pub id: i32,
    #[prost(int32, tag = "2")]
    pub value: i32,
    #[prost(string, tag = "3")]
    pub context: String,
    #[prost(message, optional, tag = "4")]
    pub file_data: Option<FileMetaData>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ConstFloatNode {
    #[prost(int32, tag = "1")]
    pub id: i32,
    #[prost(float, tag = "2")]
    pub value: f32,
    #[prost(string, tag = "3")]
    pub context: String,
    #[prost(message, optional, tag = "4")]
    pub file_data: Option<FileMetaData>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ConstStringNode {
    #[prost(int32, tag = "1")]
    pub id: i32,
    #[prost(string, tag = "2")]
    pub value: String,
    #[prost(string, tag = "3")]
    pub context: String,
    #[prost(message, optional, tag = "4")]
    pub file_data: Option<FileMetaData>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProjectorNode {
    #[prost(int32, tag = "1")]
    pub id: i32,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(bool, tag = "3")]
    pub is_builtin: bool,
    #[prost(string, tag = "4")]
    pub context: String,
    #[prost(message, optional, tag = "5")]
    pub file_data: Option<FileMetaData>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ArgumentNode {
    #[prost(int32, tag = "1")]
    pub id: i32,
    #[prost(int32, tag = "2")]
    pub index: i32,
    #[prost(string, tag = "3")]
    pub field: String,
    #[prost(string, tag = "4")]
    pub context: String,
    #[prost(message, optional, tag = "5")]
    pub file_data: Option<FileMetaData>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RootNode {
    #[prost(int32, tag = "1")]
    pub id: i32,
    #[prost(string, tag = "2")]
    pub field: String,
    #[prost(string, tag = "3")]
    pub context: String,
    #[prost(message, optional, tag = "4")]
    pub file_data: Option<FileMetaData>,
}

/// Reserved arm: an array constructor node. Not produced by this builder.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ArrayNode {
    #[prost(int32, tag = "1")]
    pub id: i32,
    #[prost(string, tag = "2")]
    pub context: String,
    #[prost(message, optional, tag = "3")]
    pub file_data: Option<FileMetaData>,
}

/// Reserved arm: an index into an array node. Not produced by this builder.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ArrayIndexNode {
    #[prost(int32, tag = "1")]
    pub id: i32,
    #[prost(int32, tag = "2")]
    pub index: i32,
    #[prost(string, tag = "3")]
    pub context: String,
    #[prost(message, optional, tag = "4")]
    pub file_data: Option<FileMetaData>,
}

/// Reserved arm: an inline JSON literal. Not produced by this builder.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct JsonNode {
    #[prost(int32, tag = "1")]
    pub id: i32,
    #[prost(string, tag = "2")]
    pub value: String,
    #[prost(string, tag = "3")]
    pub context: String,
    #[prost(message, optional, tag = "4")]
    pub file_data: Option<FileMetaData>,
}

/// File-position metadata, forwarded opaquely from the IR.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FileMetaData {
    #[prost(string, tag = "1")]
    pub file_name: String,
    #[prost(int32, tag = "2")]
    pub line_start: i32,
    #[prost(int32, tag = "3")]
    pub line_end: i32,
    #[prost(int32, tag = "4")]
    pub char_start: i32,
    #[prost(int32, tag = "5")]
    pub char_end: i32,
}

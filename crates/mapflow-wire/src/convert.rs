//! Projection of the in-memory graph into the wire message.
//!
//! The conversion is a single pass over the graph's tables; insertion order
//! inside every edge list is preserved verbatim. The builder's lineage cache
//! has no wire counterpart.

use prost::Message;

use mapflow_core::{LineageGraph, Node, NodeId};
use mapflow_ir::FileMetaData;

use crate::proto;

/// Renders a lineage graph as its wire message.
pub fn to_wire(graph: &LineageGraph) -> proto::Graph {
    let mut wire = proto::Graph::default();

    for (id, node) in &graph.nodes {
        wire.nodes.insert(wire_id(*id), node_to_wire(node));
    }
    for (id, ancestors) in &graph.edges {
        wire.edges.insert(wire_id(*id), edge_list(ancestors));
    }
    for (id, ancestors) in &graph.argument_edges {
        wire.argument_edges.insert(wire_id(*id), edge_list(ancestors));
    }
    for (id, ancestors) in &graph.condition_edges {
        wire.condition_edges.insert(wire_id(*id), edge_list(ancestors));
    }
    for (name, ids) in &graph.root_and_out_targets {
        wire.root_and_out_targets
            .insert(name.clone(), edge_list(ids));
    }

    wire
}

/// Encodes a lineage graph to wire bytes.
pub fn encode(graph: &LineageGraph) -> Vec<u8> {
    to_wire(graph).encode_to_vec()
}

fn wire_id(id: NodeId) -> i32 {
    id.0 as i32
}

fn edge_list(ids: &[NodeId]) -> proto::EdgeList {
    proto::EdgeList {
        edges: ids.iter().map(|id| wire_id(*id)).collect(),
    }
}

fn node_to_wire(node: &Node) -> proto::Node {
    let kind = match node {
        Node::Target(n) => proto::node::Kind::TargetNode(proto::TargetNode {
            id: wire_id(n.id),
            name: n.name.clone(),
            context: n.context.clone(),
            is_variable: n.is_variable,
            is_overwrite: n.is_overwrite,
            is_root: n.is_root,
            is_out: n.is_out,
            file_data: n.file_data.as_ref().map(meta_to_wire),
        }),
        Node::ConstBool(n) => proto::node::Kind::ConstBoolNode(proto::ConstBoolNode {
            id: wire_id(n.id),
            value: n.value,
            context: n.context.clone(),
            file_data: n.file_data.as_ref().map(meta_to_wire),
        }),
        Node::ConstInt(n) => proto::node::Kind::ConstIntNode(proto::ConstIntNode {
            id: wire_id(n.id),
            value: n.value,
            context: n.context.clone(),
            file_data: n.file_data.as_ref().map(meta_to_wire),
        }),
        Node::ConstFloat(n) => proto::node::Kind::ConstFloatNode(proto::ConstFloatNode {
            id: wire_id(n.id),
            value: n.value,
            context: n.context.clone(),
            file_data: n.file_data.as_ref().map(meta_to_wire),
        }),
        Node::ConstString(n) => proto::node::Kind::ConstStringNode(proto::ConstStringNode {
            id: wire_id(n.id),
            value: n.value.clone(),
            context: n.context.clone(),
            file_data: n.file_data.as_ref().map(meta_to_wire),
        }),
        Node::Projector(n) => proto::node::Kind::ProjectorNode(proto::ProjectorNode {
            id: wire_id(n.id),
            name: n.name.clone(),
            is_builtin: n.is_builtin,
            context: n.context.clone(),
            file_data: n.file_data.as_ref().map(meta_to_wire),
        }),
        Node::Argument(n) => proto::node::Kind::ArgumentNode(proto::ArgumentNode {
            id: wire_id(n.id),
            index: n.index,
            field: n.field.clone(),
            context: n.context.clone(),
            file_data: n.file_data.as_ref().map(meta_to_wire),
        }),
        Node::Root(n) => proto::node::Kind::RootNode(proto::RootNode {
            id: wire_id(n.id),
            field: n.field.clone(),
            context: n.context.clone(),
            file_data: n.file_data.as_ref().map(meta_to_wire),
        }),
    };
    proto::Node { kind: Some(kind) }
}

fn meta_to_wire(meta: &FileMetaData) -> proto::FileMetaData {
    proto::FileMetaData {
        file_name: meta.file_name.clone(),
        line_start: meta.line_start,
        line_end: meta.line_end,
        char_start: meta.char_start,
        char_end: meta.char_end,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mapflow_core::{
        ConstBoolNode, EdgeKind, NodeOrigin, ProjectorNode, TargetNode,
    };
    use mapflow_ir::ValueSource;

    fn origin() -> NodeOrigin {
        NodeOrigin::Source(ValueSource::default())
    }

    fn sample_graph() -> LineageGraph {
        let mut graph = LineageGraph::new();
        graph.insert_node(Node::Target(TargetNode {
            id: NodeId(0),
            name: "x".into(),
            context: "root".into(),
            is_variable: false,
            is_overwrite: true,
            is_root: true,
            is_out: false,
            file_data: Some(FileMetaData {
                file_name: "demo.map".into(),
                line_start: 1,
                line_end: 1,
                char_start: 0,
                char_end: 7,
            }),
            origin: origin(),
        }));
        graph.insert_node(Node::Projector(ProjectorNode {
            id: NodeId(1),
            name: "$Eq".into(),
            context: "root".into(),
            is_builtin: true,
            file_data: None,
            origin: origin(),
        }));
        graph.insert_node(Node::ConstBool(ConstBoolNode {
            id: NodeId(2),
            value: true,
            context: "root".into(),
            file_data: None,
            origin: origin(),
        }));
        graph.attach(NodeId(0), NodeId(2), EdgeKind::Value).unwrap();
        graph.attach(NodeId(0), NodeId(1), EdgeKind::Condition).unwrap();
        graph.attach(NodeId(1), NodeId(2), EdgeKind::Argument).unwrap();
        graph.record_root_or_out("x", NodeId(0));
        graph
    }

    #[test]
    fn empty_graph_encodes_to_nothing() {
        let graph = LineageGraph::new();
        assert!(encode(&graph).is_empty());
    }

    #[test]
    fn wire_mirrors_every_table() {
        let wire = to_wire(&sample_graph());

        assert_eq!(wire.nodes.len(), 3);
        assert_eq!(wire.edges[&0].edges, vec![2]);
        assert_eq!(wire.condition_edges[&0].edges, vec![1]);
        assert_eq!(wire.argument_edges[&1].edges, vec![2]);
        assert_eq!(wire.root_and_out_targets["x"].edges, vec![0]);

        match wire.nodes[&0].kind.as_ref().unwrap() {
            proto::node::Kind::TargetNode(target) => {
                assert_eq!(target.id, 0);
                assert_eq!(target.name, "x");
                assert!(target.is_overwrite);
                assert!(target.is_root);
                assert!(!target.is_out);
                assert_eq!(target.file_data.as_ref().unwrap().file_name, "demo.map");
            }
            other => panic!("expected a target node, got {other:?}"),
        }
        match wire.nodes[&1].kind.as_ref().unwrap() {
            proto::node::Kind::ProjectorNode(projector) => {
                assert_eq!(projector.name, "$Eq");
                assert!(projector.is_builtin);
            }
            other => panic!("expected a projector node, got {other:?}"),
        }
    }

    #[test]
    fn decode_reencode_is_byte_identical() {
        let bytes = encode(&sample_graph());
        let decoded = proto::Graph::decode(bytes.as_slice()).unwrap();
        assert_eq!(decoded.encode_to_vec(), bytes);
    }
}

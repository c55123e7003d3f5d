//! The lineage graph container.
//!
//! Adjacency is stored as ordered id lists in `BTreeMap`s keyed by node id,
//! one map per edge kind, plus the node table itself. Insertion order inside
//! each list is meaningful: argument lists encode argument position, value
//! lists encode mapping order. Map iteration order (ascending id) is what
//! makes serialization deterministic without a sort pass.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use petgraph::graph::DiGraph;

use crate::error::BuildError;
use crate::id::NodeId;
use crate::lineage::TargetLineage;
use crate::node::Node;

/// The three edge kinds of a lineage graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    /// "A reads from B": the default dependency.
    Value,
    /// A positional argument consumed by a projector.
    Argument,
    /// A boolean gate on a target write.
    Condition,
}

/// A field-lineage graph.
///
/// Edges point from a node to its ancestors (the nodes it reads from).
/// `argument_edges` is keyed only by projector nodes and `condition_edges`
/// only by target nodes; every id in any list exists in `nodes`.
#[derive(Debug, Default, Clone)]
pub struct LineageGraph {
    pub edges: BTreeMap<NodeId, Vec<NodeId>>,
    pub argument_edges: BTreeMap<NodeId, Vec<NodeId>>,
    pub condition_edges: BTreeMap<NodeId, Vec<NodeId>>,
    /// Targets written into the document root or an out-bucket, by name.
    pub root_and_out_targets: BTreeMap<String, Vec<NodeId>>,
    pub nodes: BTreeMap<NodeId, Node>,
    /// Lineage cache, populated as targets finalize. Never serialized.
    target_lineages: BTreeMap<NodeId, Rc<TargetLineage>>,
}

impl LineageGraph {
    pub fn new() -> Self {
        LineageGraph::default()
    }

    /// Installs a fresh node with the adjacency lists its variant carries:
    /// a value list for every node, an argument list for projectors, a
    /// condition list for targets.
    pub fn insert_node(&mut self, node: Node) {
        let id = node.id();
        self.edges.insert(id, Vec::new());
        match node {
            Node::Projector(_) => {
                self.argument_edges.insert(id, Vec::new());
            }
            Node::Target(_) => {
                self.condition_edges.insert(id, Vec::new());
            }
            _ => {}
        }
        self.nodes.insert(id, node);
    }

    /// Appends `ancestor` onto `descendant`'s list for the given edge kind.
    pub fn attach(
        &mut self,
        descendant: NodeId,
        ancestor: NodeId,
        kind: EdgeKind,
    ) -> Result<(), BuildError> {
        if !self.nodes.contains_key(&descendant) {
            return Err(BuildError::DanglingEdge(descendant));
        }
        debug_assert!(self.nodes.contains_key(&ancestor));
        let list = match kind {
            EdgeKind::Value => self.edges.get_mut(&descendant),
            EdgeKind::Argument => self.argument_edges.get_mut(&descendant),
            EdgeKind::Condition => self.condition_edges.get_mut(&descendant),
        };
        match list {
            Some(list) => {
                list.push(ancestor);
                Ok(())
            }
            None => Err(BuildError::DanglingEdge(descendant)),
        }
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Records a target's name under the root-and-out index.
    pub fn record_root_or_out(&mut self, name: &str, id: NodeId) {
        self.root_and_out_targets
            .entry(name.to_string())
            .or_default()
            .push(id);
    }

    pub fn cache_target_lineage(&mut self, id: NodeId, lineage: Rc<TargetLineage>) {
        self.target_lineages.insert(id, lineage);
    }

    pub fn target_lineage(&self, id: NodeId) -> Option<&Rc<TargetLineage>> {
        self.target_lineages.get(&id)
    }

    /// Checks referential integrity: every id in every adjacency list and in
    /// the root/out index must exist in the node table. The edge-kind keying
    /// itself is enforced by construction ([`Self::attach`] can only append
    /// onto a list [`Self::insert_node`] created for the right variant).
    pub fn validate(&self) -> Result<(), BuildError> {
        let lists = [&self.edges, &self.argument_edges, &self.condition_edges];
        for map in lists {
            for (descendant, ancestors) in map.iter() {
                if !self.nodes.contains_key(descendant) {
                    return Err(BuildError::DanglingEdge(*descendant));
                }
                for ancestor in ancestors {
                    if !self.nodes.contains_key(ancestor) {
                        return Err(BuildError::DanglingEdge(*ancestor));
                    }
                }
            }
        }
        for ids in self.root_and_out_targets.values() {
            for id in ids {
                if !self.nodes.contains_key(id) {
                    return Err(BuildError::DanglingEdge(*id));
                }
            }
        }
        Ok(())
    }

    /// An algorithmic view of the graph: one petgraph node per lineage node,
    /// one weighted edge per adjacency entry, descendant to ancestor.
    /// Used by the DOT renderer and by acyclicity checks.
    pub fn to_petgraph(&self) -> DiGraph<&Node, EdgeKind> {
        let mut graph = DiGraph::new();
        let mut indices = BTreeMap::new();
        for (id, node) in &self.nodes {
            indices.insert(*id, graph.add_node(node));
        }
        let lists = [
            (&self.edges, EdgeKind::Value),
            (&self.argument_edges, EdgeKind::Argument),
            (&self.condition_edges, EdgeKind::Condition),
        ];
        for (map, kind) in lists {
            for (descendant, ancestors) in map.iter() {
                for ancestor in ancestors {
                    graph.add_edge(indices[descendant], indices[ancestor], kind);
                }
            }
        }
        graph
    }
}

impl fmt::Display for LineageGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sections = [
            ("Primary edges:", &self.edges),
            ("Argument edges:", &self.argument_edges),
            ("Condition edges:", &self.condition_edges),
        ];
        for (header, map) in sections {
            writeln!(f, "{header}")?;
            for (id, ancestors) in map.iter() {
                let node = &self.nodes[id];
                let ancestors: Vec<String> = ancestors
                    .iter()
                    .map(|a| self.nodes[a].to_string())
                    .collect();
                writeln!(f, "\t{node}\n\t\t-> [{}]", ancestors.join(", "))?;
            }
        }
        writeln!(f, "'root' and 'out' targets:")?;
        for (name, ids) in &self.root_and_out_targets {
            let ids: Vec<String> = ids.iter().map(|id| id.to_string()).collect();
            writeln!(f, "\t{name}: [{}]", ids.join(", "))?;
        }
        Ok(())
    }
}

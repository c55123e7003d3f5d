//! The recursive graph builder.
//!
//! [`build`] seeds the projector table and the root environment, then walks
//! every root mapping through [`GraphBuilder::add_lineage`]. Each step
//! materializes (or reuses) a node, attaches it to its descendant under the
//! right edge kind, runs the recursion check, and recurses into the node's
//! ancestors — opening a fresh scope when the node is a projector entry.
//!
//! Targets finalize on the way back up: once a target's subtree is complete
//! its lineage tree is computed, cached on the graph and recorded in the
//! enclosing environment so later mappings can look it back up.

use std::collections::{BTreeMap, HashSet};
use std::rc::Rc;

use tracing::debug;

use mapflow_ir::{MappingConfig, ProjectorDefinition, Source, Target, ValueSource};

use mapflow_core::{
    ArgLineage, ArgumentNode, BuildError, ChildTargets, ConstBoolNode, ConstFloatNode,
    ConstIntNode, ConstStringNode, EdgeKind, IdAllocator, LineageGraph, Node, NodeId, NodeOrigin,
    ProjectorNode, RootNode, TargetLineage, TargetNode,
};

use crate::ancestors::{self, Ancestor, AncestorCollection};
use crate::builtins::builtin_definition;
use crate::env::{EnvArena, EnvId};

/// Builds the field-lineage graph of a compiled mapping configuration.
///
/// `builtins` is the set of projector names recognized without a
/// user-provided body; each is registered as an empty-body definition.
/// User definitions shadow built-ins of the same name.
pub fn build(config: &MappingConfig, builtins: &[&str]) -> Result<LineageGraph, BuildError> {
    let mut projectors = BTreeMap::new();
    for name in builtins {
        projectors.insert(name.to_string(), builtin_definition(name));
    }
    for def in &config.projector {
        projectors.insert(def.name.clone(), def.clone());
    }
    debug!(
        projectors = projectors.len(),
        root_mappings = config.root_mapping.len(),
        "building lineage graph"
    );

    let mut builder = GraphBuilder {
        ids: IdAllocator::new(),
        graph: LineageGraph::new(),
        projectors,
        envs: EnvArena::new(),
    };
    let root = builder.envs.new_root();
    for mapping in &config.root_mapping {
        builder.add_lineage(Ancestor::Mapping(mapping.clone()), root, None)?;
    }

    debug!(nodes = builder.graph.nodes.len(), "lineage graph complete");
    Ok(builder.graph)
}

/// Build state threaded through the recursive walk.
struct GraphBuilder {
    ids: IdAllocator,
    graph: LineageGraph,
    projectors: BTreeMap<String, ProjectorDefinition>,
    envs: EnvArena,
}

impl GraphBuilder {
    /// Adds one traversal item to the graph and recurses into its ancestors.
    ///
    /// `link` is the descendant this node hangs under, with the edge kind of
    /// the attachment; `None` only for root mappings.
    fn add_lineage(
        &mut self,
        item: Ancestor,
        env: EnvId,
        link: Option<(NodeId, EdgeKind)>,
    ) -> Result<NodeId, BuildError> {
        // Resolve or create. References to already-materialized nodes are
        // attached as-is and never re-expanded.
        let fresh = !matches!(item, Ancestor::Existing(_));
        let id = match &item {
            Ancestor::Existing(existing) => *existing,
            other => {
                let node = self.new_node(other, env)?;
                let id = node.id();
                self.graph.insert_node(node);
                id
            }
        };

        if let Some((descendant, kind)) = link {
            self.graph.attach(descendant, id, kind)?;
            // Argument attachments are exempt: a projector may reference
            // itself through an argument, only body cycles are rejected.
            if kind != EdgeKind::Argument {
                self.check_recursion(id)?;
            }
        }
        if !fresh {
            return Ok(id);
        }

        let AncestorCollection {
            main,
            args,
            conditions,
        } = ancestors::collect(&item, &self.envs, env, &self.projectors)?;

        // A projector entry opens a new scope. Its arguments are bound
        // under the caller's environment first, each slot keeping every
        // alternative the call site resolved to.
        let body_env = match &item {
            Ancestor::Call { def, .. } => {
                let mut slots = Vec::with_capacity(args.len());
                for slot in args {
                    let mut bindings = Vec::with_capacity(slot.len());
                    for alternative in slot {
                        let arg_id =
                            self.add_lineage(alternative, env, Some((id, EdgeKind::Argument)))?;
                        bindings.push(self.arg_lineage(arg_id));
                    }
                    slots.push(bindings);
                }
                Some(self.envs.new_projector(env, &def.name, slots))
            }
            _ => None,
        };

        // Conditions are lexically outside the callee: always the caller's
        // environment.
        for condition in conditions {
            self.add_lineage(condition, env, Some((id, EdgeKind::Condition)))?;
        }

        let scope = body_env.unwrap_or(env);
        for ancestor in main {
            self.add_lineage(ancestor, scope, Some((id, EdgeKind::Value)))?;
        }

        // Finalize a target: cache its lineage tree, record it in its
        // scope, and index root/out writes by name.
        let target_info = match self.graph.node(id) {
            Some(Node::Target(target)) => Some((
                target.name.clone(),
                target.is_variable,
                target.is_root || target.is_out,
            )),
            _ => None,
        };
        if let Some((name, is_variable, root_or_out)) = target_info {
            let lineage = Rc::new(self.target_lineage_of(id));
            self.graph.cache_target_lineage(id, lineage.clone());
            self.envs.record_target(env, &name, is_variable, lineage);
            if root_or_out {
                self.graph.record_root_or_out(&name, id);
            }
        }

        Ok(id)
    }

    /// Materializes a fresh node for a traversal item, with the enclosing
    /// projector's name as context.
    fn new_node(&mut self, item: &Ancestor, env: EnvId) -> Result<Node, BuildError> {
        let context = self.envs.get(env).name.clone();
        match item {
            Ancestor::Mapping(mapping) => {
                let target = mapping.target.as_ref().ok_or_else(|| {
                    BuildError::UnsupportedMessage("field mapping without a target".into())
                })?;
                let raw = target.name();
                let (name, is_overwrite) = match raw.strip_suffix('!') {
                    Some(stripped) => (stripped.to_string(), true),
                    None => (raw.to_string(), false),
                };
                Ok(Node::Target(TargetNode {
                    id: self.ids.next_id(),
                    name,
                    context,
                    is_variable: matches!(target, Target::LocalVar(_)),
                    is_overwrite,
                    is_root: matches!(target, Target::RootField(_)),
                    is_out: matches!(target, Target::Object(_)),
                    file_data: mapping.meta.clone(),
                    origin: NodeOrigin::Mapping(mapping.clone()),
                }))
            }
            Ancestor::Source(source) => self.new_source_node(source, env, context),
            Ancestor::Call { def, .. } => Ok(Node::Projector(ProjectorNode {
                id: self.ids.next_id(),
                name: def.name.clone(),
                context,
                is_builtin: def.name.starts_with('$'),
                file_data: def.meta.clone(),
                origin: NodeOrigin::Definition(def.clone()),
            })),
            Ancestor::Existing(_) => unreachable!("existing nodes are reused, not materialized"),
        }
    }

    fn new_source_node(
        &mut self,
        source: &ValueSource,
        env: EnvId,
        context: String,
    ) -> Result<Node, BuildError> {
        let origin = NodeOrigin::Source(source.clone());
        let file_data = source.meta.clone();
        match &source.source {
            Some(Source::ConstBool(value)) => Ok(Node::ConstBool(ConstBoolNode {
                id: self.ids.next_id(),
                value: *value,
                context,
                file_data,
                origin,
            })),
            Some(Source::ConstInt(value)) => Ok(Node::ConstInt(ConstIntNode {
                id: self.ids.next_id(),
                value: *value,
                context,
                file_data,
                origin,
            })),
            Some(Source::ConstFloat(value)) => Ok(Node::ConstFloat(ConstFloatNode {
                id: self.ids.next_id(),
                value: *value,
                context,
                file_data,
                origin,
            })),
            Some(Source::ConstString(value)) => Ok(Node::ConstString(ConstStringNode {
                id: self.ids.next_id(),
                value: value.clone(),
                context,
                file_data,
                origin,
            })),
            Some(Source::FromInput(input)) => {
                let scope = self.envs.get(env);
                let bound = scope.args.len() as i32;
                if input.arg < 1 || input.arg - 1 > bound {
                    return Err(BuildError::ArgIndexOutOfRange {
                        index: input.arg,
                        scope: scope.name.clone(),
                    });
                }
                if input.arg - 1 == bound {
                    // One past the bindings is the synthetic root input.
                    Ok(Node::Root(RootNode {
                        id: self.ids.next_id(),
                        field: input.field.clone(),
                        context,
                        file_data,
                        origin,
                    }))
                } else {
                    Ok(Node::Argument(ArgumentNode {
                        id: self.ids.next_id(),
                        index: input.arg,
                        field: input.field.clone(),
                        context,
                        file_data,
                        origin,
                    }))
                }
            }
            _ => Err(BuildError::UnsupportedMessage(format!(
                "value source {source:?} cannot materialize as a node"
            ))),
        }
    }

    /// The argument binding for a just-added argument node.
    ///
    /// Target arguments expose their cached lineage children; projector
    /// arguments expose the projector's immediate target children; anything
    /// else binds with no navigable children.
    fn arg_lineage(&self, arg_id: NodeId) -> ArgLineage {
        let child_targets = match self.graph.node(arg_id) {
            Some(Node::Target(_)) => self
                .graph
                .target_lineage(arg_id)
                .map(|lineage| lineage.child_targets.clone())
                .unwrap_or_default(),
            Some(Node::Projector(_)) => {
                let mut children = ChildTargets::new();
                if let Some(edges) = self.graph.edges.get(&arg_id) {
                    for child in edges {
                        if let Some(Node::Target(target)) = self.graph.node(*child) {
                            if let Some(lineage) = self.graph.target_lineage(*child) {
                                children
                                    .entry(target.name.clone())
                                    .or_default()
                                    .push(lineage.clone());
                            }
                        }
                    }
                }
                children
            }
            _ => ChildTargets::new(),
        };
        ArgLineage {
            node: arg_id,
            child_targets,
        }
    }

    /// Computes the lineage tree of a finalized target: every target in its
    /// value-edge subtree reachable via non-target intermediates.
    fn target_lineage_of(&self, target: NodeId) -> TargetLineage {
        let mut child_targets = ChildTargets::new();
        let mut visited = HashSet::new();
        visited.insert(target);
        self.collect_child_targets(target, &mut child_targets, &mut visited);
        TargetLineage {
            node: target,
            child_targets,
        }
    }

    fn collect_child_targets(
        &self,
        from: NodeId,
        out: &mut ChildTargets,
        visited: &mut HashSet<NodeId>,
    ) {
        let Some(children) = self.graph.edges.get(&from) else {
            return;
        };
        for child in children {
            if !visited.insert(*child) {
                continue;
            }
            match self.graph.node(*child) {
                Some(Node::Target(target)) => {
                    // A nested target contributes its cached lineage whole;
                    // no need to descend past it.
                    if let Some(lineage) = self.graph.target_lineage(*child) {
                        out.entry(target.name.clone())
                            .or_default()
                            .push(lineage.clone());
                    }
                }
                Some(_) => self.collect_child_targets(*child, out, visited),
                None => {}
            }
        }
    }

    /// Rejects the graph when the just-attached node closes a cycle.
    ///
    /// Every node payload-equal to the new one is a previous appearance of
    /// the same computation. If any of them reaches a payload-equal node
    /// through value edges — never through argument nodes, which break
    /// cycles — the mapping is recursive.
    fn check_recursion(&self, new_id: NodeId) -> Result<(), BuildError> {
        let Some(new_node) = self.graph.node(new_id) else {
            return Err(BuildError::DanglingEdge(new_id));
        };
        let payload = new_node.origin();
        for (id, node) in &self.graph.nodes {
            if *id == new_id || node.origin() != payload {
                continue;
            }
            let mut visited = HashSet::new();
            if self.reaches_payload(*id, payload, &mut visited) {
                return Err(BuildError::RecursiveMapping(new_node.to_string()));
            }
        }
        Ok(())
    }

    fn reaches_payload(
        &self,
        from: NodeId,
        payload: &NodeOrigin,
        visited: &mut HashSet<NodeId>,
    ) -> bool {
        let Some(children) = self.graph.edges.get(&from) else {
            return false;
        };
        for child in children {
            if !visited.insert(*child) {
                continue;
            }
            let Some(node) = self.graph.node(*child) else {
                continue;
            };
            if matches!(node, Node::Argument(_)) {
                continue;
            }
            if node.origin() == payload {
                return true;
            }
            if self.reaches_payload(*child, payload, visited) {
                return true;
            }
        }
        false
    }
}

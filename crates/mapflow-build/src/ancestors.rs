//! Ancestor extraction.
//!
//! Given an IR message and the active environment, this module classifies
//! everything the message reads from into an [`AncestorCollection`]: value
//! dependencies, positional argument slots (for a projector being entered)
//! and boolean conditions. The builder turns each entry into a node and an
//! edge; extraction itself never mutates anything.
//!
//! Reference sources never materialize nodes of their own. A destination
//! look-back or variable reference resolves here, against the environment's
//! lineage tables, into [`Ancestor::Existing`] entries pointing at nodes
//! already in the graph.

use std::collections::BTreeMap;

use mapflow_ir::{FieldMapping, ProjectorDefinition, Source, ValueSource};

use mapflow_core::{resolve_path, split_path, BuildError, NodeId};

use crate::env::{EnvArena, EnvId};

/// The condition projector elided into its operands.
pub const AND_PROJECTOR: &str = "$And";

/// The negation projector wrapping condition-else branches.
pub const NOT_PROJECTOR: &str = "$Not";

/// One ancestor of the message under traversal.
#[derive(Debug, Clone, PartialEq)]
pub enum Ancestor {
    /// A field mapping to materialize as a target node.
    Mapping(FieldMapping),
    /// A value source to materialize (constant, argument or root reference).
    Source(ValueSource),
    /// A projector definition entered through a call; `site` is the call's
    /// value source, which binds the arguments.
    Call {
        def: ProjectorDefinition,
        site: ValueSource,
    },
    /// A node already in the graph, referenced rather than re-created.
    Existing(NodeId),
}

/// The classified ancestors of one message.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct AncestorCollection {
    /// Value dependencies, attached under the graph's primary edges.
    pub main: Vec<Ancestor>,
    /// Positional argument slots; outer index is the slot, inner entries are
    /// the per-candidate alternatives. Non-empty only for a projector entry.
    pub args: Vec<Vec<Ancestor>>,
    /// Boolean gates on the current write.
    pub conditions: Vec<Ancestor>,
}

/// Extracts the ancestors of a traversal item.
pub fn collect(
    item: &Ancestor,
    envs: &EnvArena,
    env: EnvId,
    projectors: &BTreeMap<String, ProjectorDefinition>,
) -> Result<AncestorCollection, BuildError> {
    match item {
        Ancestor::Mapping(mapping) => field_mapping_ancestors(mapping, envs, env, projectors),
        Ancestor::Source(source) => Ok(AncestorCollection {
            main: value_source_ancestors(source, envs, env)?,
            ..Default::default()
        }),
        Ancestor::Call { def, site } => Ok(AncestorCollection {
            main: def.mapping.iter().cloned().map(Ancestor::Mapping).collect(),
            args: call_arg_slots(site, envs, env, projectors)?,
            conditions: Vec::new(),
        }),
        // Existing nodes are never re-expanded.
        Ancestor::Existing(_) => Ok(AncestorCollection::default()),
    }
}

/// Ancestors of a field mapping: the nodes standing for its value source,
/// plus its condition in normalized form.
fn field_mapping_ancestors(
    mapping: &FieldMapping,
    envs: &EnvArena,
    env: EnvId,
    projectors: &BTreeMap<String, ProjectorDefinition>,
) -> Result<AncestorCollection, BuildError> {
    let target_name = mapping
        .target
        .as_ref()
        .map(|t| t.name().to_string())
        .unwrap_or_default();
    let source = mapping
        .value_source
        .as_ref()
        .ok_or(BuildError::MissingSource(target_name))?;

    let main = resolve_source(source, None, envs, env, projectors)?;

    let conditions = match &mapping.condition {
        None => Vec::new(),
        // An $And condition is elided: each of its positional arguments
        // becomes an individual condition. Nested $And calls are left alone.
        Some(cond) if cond.projector_name() == Some(AND_PROJECTOR) => {
            let mut conditions = Vec::new();
            for slot in call_arg_slots(cond, envs, env, projectors)? {
                conditions.extend(slot);
            }
            conditions
        }
        Some(cond) => resolve_source(cond, None, envs, env, projectors)?,
    };

    Ok(AncestorCollection {
        main,
        args: Vec::new(),
        conditions,
    })
}

/// The nodes standing at a source position.
///
/// Constants and input references materialize fresh nodes; projector calls
/// become [`Ancestor::Call`]; destination and variable references resolve to
/// existing nodes. `outer` carries the projector name of the enclosing call
/// when resolving its argument, which is what legitimizes the bare
/// `ProjectedValue` shape produced for negated conditions.
fn resolve_source(
    source: &ValueSource,
    outer: Option<&str>,
    envs: &EnvArena,
    env: EnvId,
    projectors: &BTreeMap<String, ProjectorDefinition>,
) -> Result<Vec<Ancestor>, BuildError> {
    if let Some(name) = source.projector_name() {
        let def = projectors
            .get(name)
            .ok_or_else(|| BuildError::UnknownProjector(name.to_string()))?;
        return Ok(vec![Ancestor::Call {
            def: def.clone(),
            site: source.clone(),
        }]);
    }

    match &source.source {
        None => Ok(Vec::new()),
        Some(Source::ConstBool(_))
        | Some(Source::ConstInt(_))
        | Some(Source::ConstFloat(_))
        | Some(Source::ConstString(_))
        | Some(Source::FromInput(_)) => Ok(vec![Ancestor::Source(source.clone())]),
        Some(Source::FromDestination(path)) => {
            let parts = split_path(path);
            match resolve_path(&envs.get(env).targets, &parts) {
                None => Err(BuildError::UnknownDestination(path.clone())),
                Some(found) if found.is_empty() => Err(BuildError::PathNotFound(path.clone())),
                Some(found) => Ok(found
                    .into_iter()
                    .map(|lineage| Ancestor::Existing(lineage.node))
                    .collect()),
            }
        }
        Some(Source::FromLocalVar(path)) => {
            let parts = split_path(path);
            match envs.lookup_vars(env, &parts) {
                None => Err(BuildError::UnknownLocalVar(path.clone())),
                Some(found) if found.is_empty() => Err(BuildError::PathNotFound(path.clone())),
                Some(found) => Ok(found
                    .into_iter()
                    .map(|lineage| Ancestor::Existing(lineage.node))
                    .collect()),
            }
        }
        Some(Source::ProjectedValue(inner)) => {
            if inner.projector_name().is_some() {
                resolve_source(inner, None, envs, env, projectors)
            } else if outer == Some(NOT_PROJECTOR) {
                resolve_source(inner, None, envs, env, projectors)
            } else {
                Err(BuildError::UnknownProjector(
                    inner.projector.clone().unwrap_or_default(),
                ))
            }
        }
    }
}

/// Ancestors of a materialized value-source node.
///
/// Constants and the synthetic root have none. An argument node reads from
/// whatever its slot was bound to: the bound nodes themselves for a bare
/// reference, or the path-terminal targets for a dotted sub-field.
pub fn value_source_ancestors(
    source: &ValueSource,
    envs: &EnvArena,
    env: EnvId,
) -> Result<Vec<Ancestor>, BuildError> {
    let input = match &source.source {
        Some(Source::FromInput(input)) => input,
        _ => return Ok(Vec::new()),
    };

    let scope = envs.get(env);
    let bound = scope.args.len() as i32;
    if input.arg < 1 || input.arg - 1 > bound {
        return Err(BuildError::ArgIndexOutOfRange {
            index: input.arg,
            scope: scope.name.clone(),
        });
    }
    if input.arg - 1 == bound {
        // The synthetic root input has no ancestors.
        return Ok(Vec::new());
    }

    let slot = &scope.args[(input.arg - 1) as usize];
    let parts = split_path(&input.field);
    if parts.is_empty() {
        return Ok(slot
            .iter()
            .map(|binding| Ancestor::Existing(binding.node))
            .collect());
    }

    let mut terminals = Vec::new();
    for binding in slot {
        if let Some(found) = resolve_path(&binding.child_targets, &parts) {
            terminals.extend(
                found
                    .into_iter()
                    .map(|lineage| Ancestor::Existing(lineage.node)),
            );
        }
    }
    if terminals.is_empty() {
        return Err(BuildError::PathNotFound(input.field.clone()));
    }
    Ok(terminals)
}

/// Extracts the argument slots of a call site: the primary source first,
/// then each additional argument, in call order.
fn call_arg_slots(
    site: &ValueSource,
    envs: &EnvArena,
    env: EnvId,
    projectors: &BTreeMap<String, ProjectorDefinition>,
) -> Result<Vec<Vec<Ancestor>>, BuildError> {
    let mut slots = Vec::new();
    if let Some(primary) = &site.source {
        let standalone = ValueSource {
            source: Some(primary.clone()),
            projector: None,
            additional_arg: Vec::new(),
            meta: None,
        };
        slots.push(resolve_source(
            &standalone,
            site.projector_name(),
            envs,
            env,
            projectors,
        )?);
    }
    for arg in &site.additional_arg {
        slots.push(resolve_source(
            arg,
            site.projector_name(),
            envs,
            env,
            projectors,
        )?);
    }
    Ok(slots)
}

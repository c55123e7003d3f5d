//! Shared fixtures for builder tests: terse IR constructors and graph
//! queries. Configurations are built directly in compiled form, the same
//! shape a mapping-language frontend would emit.
#![allow(dead_code)]

use mapflow_core::{LineageGraph, Node, NodeId};
use mapflow_ir::{
    FieldMapping, InputSource, MappingConfig, ProjectorDefinition, Source, Target, ValueSource,
};

pub fn src(source: Source) -> ValueSource {
    ValueSource {
        source: Some(source),
        ..Default::default()
    }
}

pub fn const_bool(value: bool) -> ValueSource {
    src(Source::ConstBool(value))
}

pub fn const_int(value: i32) -> ValueSource {
    src(Source::ConstInt(value))
}

pub fn const_float(value: f32) -> ValueSource {
    src(Source::ConstFloat(value))
}

pub fn const_string(value: &str) -> ValueSource {
    src(Source::ConstString(value.to_string()))
}

pub fn from_input(arg: i32, field: &str) -> ValueSource {
    src(Source::FromInput(InputSource {
        arg,
        field: field.to_string(),
    }))
}

pub fn from_dest(path: &str) -> ValueSource {
    src(Source::FromDestination(path.to_string()))
}

pub fn from_var(path: &str) -> ValueSource {
    src(Source::FromLocalVar(path.to_string()))
}

/// A projector call. The first argument becomes the primary source, nested
/// calls are wrapped the way the frontend compiles them.
pub fn call(name: &str, args: Vec<ValueSource>) -> ValueSource {
    let mut args = args.into_iter();
    let primary = args.next().map(|arg| {
        if arg.projector_name().is_some() {
            Source::ProjectedValue(Box::new(arg))
        } else {
            arg.source.unwrap_or(Source::ConstBool(false))
        }
    });
    ValueSource {
        source: primary,
        projector: Some(name.to_string()),
        additional_arg: args.collect(),
        meta: None,
    }
}

/// The compiled shape of a negated condition: `$Not` around a projected
/// inner value.
pub fn not_condition(inner: ValueSource) -> ValueSource {
    ValueSource {
        source: Some(Source::ProjectedValue(Box::new(inner))),
        projector: Some("$Not".to_string()),
        additional_arg: Vec::new(),
        meta: None,
    }
}

pub fn field(name: &str) -> Target {
    Target::Field(name.to_string())
}

pub fn local_var(name: &str) -> Target {
    Target::LocalVar(name.to_string())
}

pub fn root_field(name: &str) -> Target {
    Target::RootField(name.to_string())
}

pub fn out_object(name: &str) -> Target {
    Target::Object(name.to_string())
}

pub fn fm(target: Target, value_source: ValueSource) -> FieldMapping {
    FieldMapping {
        target: Some(target),
        value_source: Some(value_source),
        condition: None,
        meta: None,
    }
}

pub fn fm_if(target: Target, value_source: ValueSource, condition: ValueSource) -> FieldMapping {
    FieldMapping {
        condition: Some(condition),
        ..fm(target, value_source)
    }
}

pub fn def(name: &str, mapping: Vec<FieldMapping>) -> ProjectorDefinition {
    ProjectorDefinition {
        name: name.to_string(),
        mapping,
        meta: None,
    }
}

pub fn config(
    projectors: Vec<ProjectorDefinition>,
    root_mapping: Vec<FieldMapping>,
) -> MappingConfig {
    MappingConfig {
        projector: projectors,
        root_mapping,
    }
}

/// The single node matching the predicate; panics when the match is not
/// unique so a test cannot silently pick the wrong node.
pub fn single(graph: &LineageGraph, what: &str, pred: impl Fn(&Node) -> bool) -> NodeId {
    let matches: Vec<NodeId> = graph
        .nodes
        .values()
        .filter(|node| pred(node))
        .map(|node| node.id())
        .collect();
    match matches.as_slice() {
        [id] => *id,
        other => panic!("expected exactly one {what}, found {}", other.len()),
    }
}

pub fn target_id(graph: &LineageGraph, name: &str) -> NodeId {
    single(graph, "target", |node| {
        matches!(node, Node::Target(t) if t.name == name)
    })
}

pub fn projector_id(graph: &LineageGraph, name: &str) -> NodeId {
    single(graph, "projector", |node| {
        matches!(node, Node::Projector(p) if p.name == name)
    })
}

pub fn argument_id(graph: &LineageGraph, index: i32, field: &str) -> NodeId {
    single(graph, "argument", |node| {
        matches!(node, Node::Argument(a) if a.index == index && a.field == field)
    })
}

pub fn const_bool_id(graph: &LineageGraph, value: bool) -> NodeId {
    single(graph, "bool constant", |node| {
        matches!(node, Node::ConstBool(c) if c.value == value)
    })
}

pub fn const_float_id(graph: &LineageGraph, value: f32) -> NodeId {
    single(graph, "float constant", |node| {
        matches!(node, Node::ConstFloat(c) if c.value == value)
    })
}

pub fn const_string_id(graph: &LineageGraph, value: &str) -> NodeId {
    single(graph, "string constant", |node| {
        matches!(node, Node::ConstString(c) if c.value == value)
    })
}

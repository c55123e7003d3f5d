//! Wire-format properties over full builds: deterministic bytes and
//! lossless re-encoding.

use prost::Message;

use mapflow_build::{build, DEFAULT_BUILTINS};
use mapflow_ir::{
    FieldMapping, InputSource, MappingConfig, ProjectorDefinition, Source, Target, ValueSource,
};
use mapflow_wire::{encode, proto, to_wire};

fn src(source: Source) -> ValueSource {
    ValueSource {
        source: Some(source),
        ..Default::default()
    }
}

fn sample_config() -> MappingConfig {
    MappingConfig {
        projector: vec![
            ProjectorDefinition {
                name: "foo".into(),
                mapping: vec![FieldMapping {
                    target: Some(Target::Field("a".into())),
                    value_source: Some(src(Source::FromInput(InputSource {
                        arg: 1,
                        field: String::new(),
                    }))),
                    condition: None,
                    meta: None,
                }],
                meta: None,
            },
        ],
        root_mapping: vec![
            FieldMapping {
                target: Some(Target::LocalVar("v".into())),
                value_source: Some(src(Source::ConstString("seed".into()))),
                condition: None,
                meta: None,
            },
            FieldMapping {
                target: Some(Target::RootField("x".into())),
                value_source: Some(ValueSource {
                    projector: Some("foo".into()),
                    source: Some(Source::FromLocalVar("v".into())),
                    additional_arg: vec![],
                    meta: None,
                }),
                condition: Some(ValueSource {
                    projector: Some("$Eq".into()),
                    source: Some(Source::ConstFloat(4.0)),
                    additional_arg: vec![src(Source::ConstFloat(2.0))],
                    meta: None,
                }),
                meta: None,
            },
        ],
    }
}

#[test]
fn rebuild_bytes_are_identical() {
    let config = sample_config();
    let first = encode(&build(&config, DEFAULT_BUILTINS).unwrap());
    let second = encode(&build(&config, DEFAULT_BUILTINS).unwrap());
    assert_eq!(first, second);
    assert!(!first.is_empty());
}

#[test]
fn serialize_deserialize_reserialize_is_stable() {
    let graph = build(&sample_config(), DEFAULT_BUILTINS).unwrap();
    let bytes = encode(&graph);
    let decoded = proto::Graph::decode(bytes.as_slice()).unwrap();
    assert_eq!(decoded.encode_to_vec(), bytes);
}

#[test]
fn wire_graph_matches_in_memory_shape() {
    let graph = build(&sample_config(), DEFAULT_BUILTINS).unwrap();
    let wire = to_wire(&graph);

    assert_eq!(wire.nodes.len(), graph.nodes.len());
    assert_eq!(wire.edges.len(), graph.edges.len());
    assert_eq!(wire.argument_edges.len(), graph.argument_edges.len());
    assert_eq!(wire.condition_edges.len(), graph.condition_edges.len());
    assert_eq!(
        wire.root_and_out_targets.len(),
        graph.root_and_out_targets.len()
    );

    // The root target survives with its flags.
    let root_target = wire
        .nodes
        .values()
        .find_map(|node| match node.kind.as_ref() {
            Some(proto::node::Kind::TargetNode(t)) if t.name == "x" => Some(t),
            _ => None,
        })
        .expect("target x missing from wire graph");
    assert!(root_target.is_root);
    assert_eq!(root_target.context, "root");

    // The lineage cache has no wire counterpart: every wire field is one of
    // the five tables checked above.
    let projector = wire
        .nodes
        .values()
        .find_map(|node| match node.kind.as_ref() {
            Some(proto::node::Kind::ProjectorNode(p)) if p.name == "foo" => Some(p),
            _ => None,
        })
        .expect("projector foo missing from wire graph");
    assert!(!projector.is_builtin);
}

//! DOT rendering of a lineage graph.
//!
//! Labels follow the conventions downstream graph viewers already expect:
//! constants print their value (strings quoted), targets carry a
//! `var `/`root `/`out ` prefix per flag, projectors print `def <name>`, and
//! arguments print their index with the sub-field on a second line. Value
//! edges are plain, argument edges dashed, condition edges dotted.

use petgraph::dot::{Config, Dot};

use mapflow_core::{EdgeKind, LineageGraph, Node};

/// Renders the graph as DOT text.
pub fn to_dot(graph: &LineageGraph) -> String {
    let view = graph.to_petgraph();
    let dot = Dot::with_attr_getters(
        &view,
        &[Config::NodeNoLabel, Config::EdgeNoLabel],
        &|_, edge| match edge.weight() {
            EdgeKind::Value => String::new(),
            EdgeKind::Argument => "label = \"arg\", style = \"dashed\"".to_string(),
            EdgeKind::Condition => "label = \"cond\", style = \"dotted\"".to_string(),
        },
        &|_, (_, node)| format!("label = \"{}\"", escape(&node_label(node))),
    );
    format!("{dot:?}")
}

/// The human-facing label of one node.
fn node_label(node: &Node) -> String {
    match node {
        Node::Target(n) => {
            let modifier = if n.is_variable {
                "var "
            } else if n.is_root {
                "root "
            } else if n.is_out {
                "out "
            } else {
                ""
            };
            format!("{modifier}{}", n.name)
        }
        Node::ConstBool(n) => n.value.to_string(),
        Node::ConstInt(n) => n.value.to_string(),
        Node::ConstFloat(n) => n.value.to_string(),
        Node::ConstString(n) => format!("\"{}\"", n.value),
        Node::Projector(n) => format!("def {}", n.name),
        Node::Argument(n) => {
            if n.field.is_empty() {
                format!("arg {}", n.index)
            } else {
                format!("arg {}\nfield {}", n.index, n.field)
            }
        }
        Node::Root(n) => {
            if n.field.is_empty() {
                "$root".to_string()
            } else {
                format!("$root\nfield {}", n.field)
            }
        }
    }
}

fn escape(label: &str) -> String {
    label
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use mapflow_build::{build, DEFAULT_BUILTINS};
    use mapflow_ir::{FieldMapping, MappingConfig, Source, Target, ValueSource};

    fn constant_config() -> MappingConfig {
        MappingConfig {
            root_mapping: vec![FieldMapping {
                target: Some(Target::Field("x".into())),
                value_source: Some(ValueSource {
                    source: Some(Source::ConstString("b\"c".into())),
                    ..Default::default()
                }),
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn labels_and_shape() {
        let graph = build(&constant_config(), DEFAULT_BUILTINS).unwrap();
        let dot = to_dot(&graph);
        assert!(dot.starts_with("digraph"));
        assert!(dot.contains("label = \"x\""));
        // The string constant is quoted, with inner quotes escaped.
        assert!(dot.contains("\\\"b\\\"c\\\""));
    }

    #[test]
    fn edge_styles_by_kind() {
        let config = MappingConfig {
            root_mapping: vec![FieldMapping {
                target: Some(Target::Field("x".into())),
                value_source: Some(ValueSource {
                    source: Some(Source::ConstFloat(5.0)),
                    ..Default::default()
                }),
                condition: Some(ValueSource {
                    projector: Some("$Eq".into()),
                    source: Some(Source::ConstFloat(4.0)),
                    additional_arg: vec![ValueSource {
                        source: Some(Source::ConstFloat(2.0)),
                        ..Default::default()
                    }],
                    meta: None,
                }),
                ..Default::default()
            }],
            ..Default::default()
        };
        let graph = build(&config, DEFAULT_BUILTINS).unwrap();
        let dot = to_dot(&graph);
        assert!(dot.contains("style = \"dashed\""));
        assert!(dot.contains("style = \"dotted\""));
        assert!(dot.contains("def $Eq"));
    }

    #[test]
    fn escape_handles_backslash_and_newline() {
        assert_eq!(escape("a\"b"), "a\\\"b");
        assert_eq!(escape("a\nb"), "a\\nb");
        assert_eq!(escape("a\\b"), "a\\\\b");
    }
}

//! Top-level structure of a compiled mapping configuration.
//!
//! A [`MappingConfig`] is the unit the builder consumes: the projector
//! definitions of the program plus the mappings executed against the root
//! input. Field mappings pair a write [`Target`] with a
//! [`ValueSource`](crate::source::ValueSource) and an optional boolean
//! condition gating the write.

use serde::{Deserialize, Serialize};

use crate::meta::FileMetaData;
use crate::source::ValueSource;

/// A complete compiled mapping program.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MappingConfig {
    /// User-defined projectors, in declaration order.
    #[serde(default)]
    pub projector: Vec<ProjectorDefinition>,
    /// Mappings executed at the top level against the root input.
    #[serde(default)]
    pub root_mapping: Vec<FieldMapping>,
}

/// A named, parameterized group of field mappings.
///
/// Arguments are positional and referenced from the body via
/// [`Source::FromInput`](crate::source::Source::FromInput); the definition
/// itself does not declare an arity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectorDefinition {
    pub name: String,
    /// Body mappings, in declaration order.
    #[serde(default)]
    pub mapping: Vec<FieldMapping>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<FileMetaData>,
}

/// A single write of a value into a target.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldMapping {
    /// What is written. `None` is rejected by the builder as unsupported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<Target>,
    /// Where the value comes from. `None` is a `MissingSource` error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_source: Option<ValueSource>,
    /// Boolean gate; the write only happens when it evaluates true.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<ValueSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<FileMetaData>,
}

/// The destination of a field mapping.
///
/// The variant decides the flags on the materialized target node: `LocalVar`
/// marks a local variable, `RootField` a write into the output document root,
/// `Object` a write into a named out-bucket. A trailing `!` on the name is
/// the overwrite marker; the builder strips it and sets `is_overwrite`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Target {
    /// A plain field write in the enclosing scope.
    Field(String),
    /// A local variable binding, visible to later mappings in the same body.
    LocalVar(String),
    /// A write into the root of the output document.
    RootField(String),
    /// A write into a named top-level object such as `out`.
    Object(String),
}

impl Target {
    /// The raw name as compiled, overwrite marker included.
    pub fn name(&self) -> &str {
        match self {
            Target::Field(name)
            | Target::LocalVar(name)
            | Target::RootField(name)
            | Target::Object(name) => name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::Source;

    #[test]
    fn target_name_covers_all_variants() {
        assert_eq!(Target::Field("a".into()).name(), "a");
        assert_eq!(Target::LocalVar("b".into()).name(), "b");
        assert_eq!(Target::RootField("c".into()).name(), "c");
        assert_eq!(Target::Object("out".into()).name(), "out");
    }

    #[test]
    fn config_json_roundtrip() {
        let config = MappingConfig {
            projector: vec![ProjectorDefinition {
                name: "proj1".into(),
                mapping: vec![FieldMapping {
                    target: Some(Target::Field("y".into())),
                    value_source: Some(ValueSource {
                        source: Some(Source::ConstBool(true)),
                        ..Default::default()
                    }),
                    ..Default::default()
                }],
                meta: None,
            }],
            root_mapping: vec![FieldMapping {
                target: Some(Target::Field("x".into())),
                value_source: Some(ValueSource {
                    projector: Some("proj1".into()),
                    ..Default::default()
                }),
                ..Default::default()
            }],
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: MappingConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }

    #[test]
    fn sparse_json_fills_defaults() {
        let back: MappingConfig = serde_json::from_str("{}").unwrap();
        assert!(back.projector.is_empty());
        assert!(back.root_mapping.is_empty());

        let mapping: FieldMapping = serde_json::from_str("{}").unwrap();
        assert!(mapping.target.is_none());
        assert!(mapping.value_source.is_none());
        assert!(mapping.condition.is_none());
    }
}

//! Value sources: where a mapped value comes from.

use serde::{Deserialize, Serialize};

use crate::meta::FileMetaData;

/// The right-hand side of a field mapping or a projector argument.
///
/// When `projector` is set, the source describes a projector call: `source`
/// holds the primary argument and `additional_arg` the rest. Without a
/// projector the `source` stands on its own.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValueSource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Source>,
    /// Name of the projector applied to this source, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projector: Option<String>,
    /// Arguments after the primary one, in call order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub additional_arg: Vec<ValueSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<FileMetaData>,
}

impl ValueSource {
    /// The projector name, treating an empty string the same as absent.
    pub fn projector_name(&self) -> Option<&str> {
        match self.projector.as_deref() {
            Some("") | None => None,
            Some(name) => Some(name),
        }
    }
}

/// The payload of a [`ValueSource`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Source {
    ConstBool(bool),
    ConstInt(i32),
    ConstFloat(f32),
    ConstString(String),
    /// A positional projector argument, with an optional dotted sub-path
    /// (stored with a leading `.`, e.g. `.a.b`).
    FromInput(InputSource),
    /// Look-back at a target already written in the enclosing body.
    FromDestination(String),
    /// Reference to a local variable bound in the enclosing body.
    FromLocalVar(String),
    /// A nested value, used by frontends to wrap inner projector calls and
    /// negated conditions.
    ProjectedValue(Box<ValueSource>),
}

/// A reference to a positional projector argument.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputSource {
    /// 1-based argument index. An index one past the bound argument count
    /// refers to the synthetic root input.
    pub arg: i32,
    /// Dotted sub-path into the argument, empty for the whole value.
    #[serde(default)]
    pub field: String,
}

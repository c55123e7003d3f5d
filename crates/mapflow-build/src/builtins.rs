//! The built-in projector table.
//!
//! Built-ins are registered by name only; the builder gives each an
//! empty-body definition and never interprets its semantics. The set is a
//! configuration input of [`build`](crate::build) — callers with custom
//! runtimes can pass their own slice — and `DEFAULT_BUILTINS` covers the
//! standard operator and helper names of the mapping language.

use mapflow_ir::ProjectorDefinition;

/// Built-in projector names recognized by the standard runtime.
pub const DEFAULT_BUILTINS: &[&str] = &[
    "$And",
    "$CurrentTime",
    "$Div",
    "$Eq",
    "$Gt",
    "$GtEq",
    "$Hash",
    "$IntHash",
    "$IsNil",
    "$IsNotNil",
    "$ListLen",
    "$ListOf",
    "$Lt",
    "$LtEq",
    "$MergeJSON",
    "$Mul",
    "$NEq",
    "$Not",
    "$Or",
    "$ParseFloat",
    "$ParseInt",
    "$SortAndTakeTop",
    "$StrCat",
    "$StrFmt",
    "$StrJoin",
    "$StrSplit",
    "$Sub",
    "$Sum",
    "$ToLower",
    "$ToUpper",
    "$UUID",
    "$UnixTime",
];

/// The empty-body definition a built-in is registered under.
pub fn builtin_definition(name: &str) -> ProjectorDefinition {
    ProjectorDefinition {
        name: name.to_string(),
        mapping: Vec::new(),
        meta: None,
    }
}

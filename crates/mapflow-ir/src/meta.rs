//! Source-position metadata attached to IR messages.

use serde::{Deserialize, Serialize};

/// File-position metadata carried by a compiled message.
///
/// The builder stores this on materialized nodes and forwards it to the wire
/// format without inspecting it; rendering a position into human-readable
/// text is a frontend concern.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileMetaData {
    pub file_name: String,
    pub line_start: i32,
    pub line_end: i32,
    pub char_start: i32,
    pub char_end: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_empty() {
        let meta = FileMetaData::default();
        assert_eq!(meta.file_name, "");
        assert_eq!(meta.line_start, 0);
        assert_eq!(meta.char_end, 0);
    }

    #[test]
    fn serde_roundtrip() {
        let meta = FileMetaData {
            file_name: "patient.map".into(),
            line_start: 3,
            line_end: 3,
            char_start: 0,
            char_end: 17,
        };
        let json = serde_json::to_string(&meta).unwrap();
        let back: FileMetaData = serde_json::from_str(&json).unwrap();
        assert_eq!(meta, back);
    }
}

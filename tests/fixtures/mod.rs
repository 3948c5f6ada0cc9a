//! Shared test fixtures for E2E CLI tests.
#![allow(dead_code)] // Some fixtures reserved for future tests

use std::fs;
use std::path::{Path, PathBuf};

/// Builds a complete, well-formed keymap in YAML with the given layer
/// names.
///
/// Ten columns, every key cell present, no combos, no shading and no
/// divider lines.
pub fn keymap_yaml(layer_names: &[&str]) -> String {
    let mut content =
        String::from("keyboard:\n  rows: 4\n  columns: 10\n  name: fixture board\n");
    for name in layer_names {
        content.push('\n');
        content.push_str(&layer_yaml(name));
    }
    content
}

/// Builds one layer block with every cell filled with a unique label.
pub fn layer_yaml(name: &str) -> String {
    let mut block = format!("{name}:\n");
    for row in ["top", "mid", "bot"] {
        let cells: Vec<String> = (0..10).map(|col| format!("{row}{col}")).collect();
        block.push_str(&format!("  {row}: [{}]\n", cells.join(", ")));
    }
    let thumbs: Vec<String> = (0..6).map(|col| format!("th{col}")).collect();
    block.push_str(&format!("  thumb: [{}]\n", thumbs.join(", ")));
    block
}

/// A single-layer keymap exercising combos, shading and divider lines.
pub fn decorated_keymap_yaml() -> String {
    let mut content =
        String::from("keyboard:\n  rows: 4\n  columns: 10\n  name: fixture board\n");
    content.push('\n');
    content.push_str(&layer_yaml("Base"));
    content.push_str("  tcomb: [Fn, '', '', '', '', '', '', '']\n");
    content.push_str("  tmcomb: ['', '', '', '', '', '', '', '', '', Cut]\n");
    content.push_str("  shading: [[3, 0], [3, 1]]\n");
    content.push_str("  lines: [[2, 4]]\n");
    content
}

/// A keymap whose keyboard block lacks the required `columns` field.
pub fn missing_columns_yaml() -> String {
    let mut content = String::from("keyboard:\n  rows: 4\n  name: fixture board\n");
    content.push('\n');
    content.push_str(&layer_yaml("Base"));
    content
}

/// Writes `content` under `file_name` in `dir` and returns the path.
pub fn write_keymap(dir: &Path, file_name: &str, content: &str) -> PathBuf {
    let path = dir.join(file_name);
    fs::write(&path, content).expect("Failed to write keymap file");
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_keymap_parses() {
        let content = keymap_yaml(&["Base", "Symbols"]);
        let keymap = keymaptex::parser::parse_keymap_str(&content, Path::new("fixture.yaml"))
            .expect("Fixture keymap should parse");
        assert_eq!(keymap.layers.len(), 2);
        assert_eq!(keymap.columns, 10);
        assert_eq!(keymap.name, "fixture board");
    }

    #[test]
    fn test_fixture_decorated_keymap_parses() {
        let content = decorated_keymap_yaml();
        let keymap = keymaptex::parser::parse_keymap_str(&content, Path::new("fixture.yaml"))
            .expect("Decorated fixture keymap should parse");
        assert_eq!(keymap.layers.len(), 1);
        assert_eq!(keymap.layers[0].tcomb[0].as_deref(), Some("Fn"));
        assert_eq!(keymap.layers[0].shading.len(), 2);
    }

    #[test]
    fn test_fixture_layer_has_full_rows() {
        let block = layer_yaml("Base");
        assert!(block.contains("top0"));
        assert!(block.contains("bot9"));
        assert!(block.contains("th5"));
    }
}

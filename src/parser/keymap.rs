//! YAML keymap loading.
//!
//! The input file has one `keyboard` block naming the board and its
//! dimensions, followed by one entry per layer. Layer entries map row
//! names (`top`, `mid`, `bot`, `thumb`) and combo names (`tcomb`,
//! `mcomb`, `bcomb`, `tmcomb`, `mbcomb`) to lists of cell values, plus
//! optional `shading` and `lines` coordinate lists. Top-level order is
//! preserved: layers render in the order they appear in the file.

use crate::error::RenderError;
use crate::models::{
    KeyCell, Keymap, Layer, Position, DEFAULT_KEYBOARD_NAME, THUMB_CELLS,
};
use anyhow::Context;
use log::debug;
use serde::Deserialize;
use serde_yml::Value;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

const KEYBOARD_KEY: &str = "keyboard";
const FIELD_ROWS: &str = "rows";
const FIELD_COLUMNS: &str = "columns";
const FIELD_NAME: &str = "name";

/// The four physical rows this layout family always has.
const REQUIRED_ROWS: i64 = 4;
/// Columns must stay in this range so both hands get a sane grid.
const MIN_COLUMNS: i64 = 2;
const MAX_COLUMNS: i64 = 64;

/// Reads and validates a keymap file.
///
/// # Errors
///
/// Returns a [`RenderError`] if the file cannot be read, is not valid
/// YAML, or fails schema validation.
pub fn parse_keymap_file(path: &Path) -> Result<Keymap, RenderError> {
    debug!("reading keymap file {}", path.display());
    let content = fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    parse_keymap_str(&content, path)
}

/// Parses keymap YAML text. `source` is the file path used in parse
/// diagnostics.
///
/// # Errors
///
/// Returns a [`RenderError`] if the text is not valid YAML or fails
/// schema validation.
pub fn parse_keymap_str(content: &str, source: &Path) -> Result<Keymap, RenderError> {
    let document: Value = serde_yml::from_str(content).map_err(|e| RenderError::Parse {
        path: source.to_path_buf(),
        source: e,
    })?;

    let Value::Mapping(root) = document else {
        return Err(RenderError::MissingDimensions {
            missing: vec![FIELD_ROWS, FIELD_COLUMNS],
        });
    };

    let (name, rows, columns) = read_keyboard_block(&root)?;

    let mut layers = Vec::with_capacity(root.len().saturating_sub(1));
    for (key, body) in &root {
        let Ok(Some(layer_name)) = scalar_text(key) else {
            return Err(RenderError::InvalidDocument(
                "top-level layer names must be scalars".to_string(),
            ));
        };
        if layer_name == KEYBOARD_KEY {
            continue;
        }
        layers.push(parse_layer(&layer_name, body, columns)?);
    }

    debug!("parsed '{}': {} columns, {} layers", name, columns, layers.len());
    Ok(Keymap {
        name,
        rows,
        columns,
        layers,
    })
}

/// Extracts `(name, rows, columns)` from the `keyboard` block.
fn read_keyboard_block(root: &serde_yml::Mapping) -> Result<(String, u8, u8), RenderError> {
    let block = root
        .get(KEYBOARD_KEY)
        .and_then(Value::as_mapping)
        .ok_or_else(|| RenderError::MissingDimensions {
            missing: vec![FIELD_ROWS, FIELD_COLUMNS],
        })?;

    let rows_value = block.get(FIELD_ROWS).and_then(Value::as_i64);
    let columns_value = block.get(FIELD_COLUMNS).and_then(Value::as_i64);

    let (Some(rows), Some(columns)) = (rows_value, columns_value) else {
        let mut missing = Vec::new();
        if rows_value.is_none() {
            missing.push(FIELD_ROWS);
        }
        if columns_value.is_none() {
            missing.push(FIELD_COLUMNS);
        }
        return Err(RenderError::MissingDimensions { missing });
    };

    if rows != REQUIRED_ROWS {
        return Err(RenderError::InvalidDocument(format!(
            "'keyboard.rows' must be {} (top, middle, bottom and thumb rows), got {}",
            REQUIRED_ROWS, rows
        )));
    }
    if !(MIN_COLUMNS..=MAX_COLUMNS).contains(&columns) || columns % 2 != 0 {
        return Err(RenderError::InvalidDocument(format!(
            "'keyboard.columns' must be an even number between {} and {}, got {}",
            MIN_COLUMNS, MAX_COLUMNS, columns
        )));
    }

    let name = match block.get(FIELD_NAME) {
        None | Some(Value::Null) => DEFAULT_KEYBOARD_NAME.to_string(),
        Some(value) => scalar_text(value)
            .ok()
            .flatten()
            .ok_or_else(|| {
                RenderError::InvalidDocument("'keyboard.name' must be a string".to_string())
            })?,
    };

    Ok((name, rows as u8, columns as u8))
}

/// Raw layer body straight out of serde, before cell normalization.
#[derive(Debug, Deserialize)]
struct LayerDoc {
    top: Vec<Value>,
    mid: Vec<Value>,
    bot: Vec<Value>,
    thumb: Vec<Value>,
    #[serde(default)]
    tcomb: Vec<Value>,
    #[serde(default)]
    mcomb: Vec<Value>,
    #[serde(default)]
    bcomb: Vec<Value>,
    #[serde(default)]
    tmcomb: Vec<Value>,
    #[serde(default)]
    mbcomb: Vec<Value>,
    #[serde(default)]
    shading: Vec<(u8, u8)>,
    #[serde(default)]
    lines: Vec<(u8, u8)>,
}

fn parse_layer(name: &str, body: &Value, columns: u8) -> Result<Layer, RenderError> {
    let doc: LayerDoc =
        serde_yml::from_value(body.clone()).map_err(|e| RenderError::InvalidLayer {
            layer: name.to_string(),
            detail: e.to_string(),
        })?;

    let width = usize::from(columns);
    let mut layer = Layer {
        name: name.to_string(),
        top: key_row(name, "top", &doc.top, width)?,
        mid: key_row(name, "mid", &doc.mid, width)?,
        bot: key_row(name, "bot", &doc.bot, width)?,
        thumb: key_row(name, "thumb", &doc.thumb, THUMB_CELLS)?,
        tcomb: combo_row(name, "tcomb", &doc.tcomb, width - 2)?,
        mcomb: combo_row(name, "mcomb", &doc.mcomb, width - 2)?,
        bcomb: combo_row(name, "bcomb", &doc.bcomb, width - 2)?,
        tmcomb: combo_row(name, "tmcomb", &doc.tmcomb, width)?,
        mbcomb: combo_row(name, "mbcomb", &doc.mbcomb, width)?,
        shading: HashSet::new(),
        lines: HashSet::new(),
    };
    layer.shading = decoration_set(&layer, "shading", &doc.shading)?;
    layer.lines = decoration_set(&layer, "lines", &doc.lines)?;
    Ok(layer)
}

/// Normalizes one key row, requiring exactly `expected` cells.
fn key_row(
    layer: &str,
    row_name: &str,
    values: &[Value],
    expected: usize,
) -> Result<Vec<KeyCell>, RenderError> {
    if values.len() != expected {
        return Err(RenderError::InvalidLayer {
            layer: layer.to_string(),
            detail: format!(
                "row '{}' has {} cells, expected {}",
                row_name,
                values.len(),
                expected
            ),
        });
    }
    values
        .iter()
        .map(|value| {
            scalar_text(value)
                .map(KeyCell::from_raw)
                .map_err(|detail| RenderError::InvalidLayer {
                    layer: layer.to_string(),
                    detail: format!("row '{}': {}", row_name, detail),
                })
        })
        .collect()
}

/// Normalizes one combo row. A missing or empty grid means "no combos";
/// a non-empty grid must have exactly `expected` entries. Empty strings
/// and nulls both mean "no combo between this pair".
fn combo_row(
    layer: &str,
    row_name: &str,
    values: &[Value],
    expected: usize,
) -> Result<Vec<Option<String>>, RenderError> {
    if values.is_empty() {
        return Ok(vec![None; expected]);
    }
    if values.len() != expected {
        return Err(RenderError::InvalidLayer {
            layer: layer.to_string(),
            detail: format!(
                "combo row '{}' has {} entries, expected {}",
                row_name,
                values.len(),
                expected
            ),
        });
    }
    values
        .iter()
        .map(|value| {
            scalar_text(value)
                .map(|text| text.filter(|t| !t.is_empty()))
                .map_err(|detail| RenderError::InvalidLayer {
                    layer: layer.to_string(),
                    detail: format!("combo row '{}': {}", row_name, detail),
                })
        })
        .collect()
}

/// Validates decoration coordinates against the layer's key grid. Every
/// entry must name a cell that exists and holds a key.
fn decoration_set(
    layer: &Layer,
    list_name: &str,
    entries: &[(u8, u8)],
) -> Result<HashSet<Position>, RenderError> {
    let mut set = HashSet::with_capacity(entries.len());
    for &(row, col) in entries {
        let position = Position::new(row, col);
        match layer.cell(position) {
            Some(cell) if cell.is_present() => {
                set.insert(position);
            }
            Some(_) => {
                return Err(RenderError::InvalidLayer {
                    layer: layer.name.clone(),
                    detail: format!(
                        "{} entry [{}, {}] marks an absent key",
                        list_name, row, col
                    ),
                });
            }
            None => {
                return Err(RenderError::InvalidLayer {
                    layer: layer.name.clone(),
                    detail: format!(
                        "{} entry [{}, {}] is outside the key grid",
                        list_name, row, col
                    ),
                });
            }
        }
    }
    Ok(set)
}

/// Coerces a YAML scalar to its text form. Null becomes `None`;
/// sequences and mappings are rejected.
fn scalar_text(value: &Value) -> Result<Option<String>, String> {
    match value {
        Value::Null => Ok(None),
        Value::String(text) => Ok(Some(text.clone())),
        Value::Number(number) => Ok(Some(number.to_string())),
        Value::Bool(flag) => Ok(Some(flag.to_string())),
        _ => Err("expected a scalar value".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ROW_MIDDLE, ROW_THUMB, ROW_TOP};

    const SOURCE: &str = "test.yaml";

    fn parse(content: &str) -> Result<Keymap, RenderError> {
        parse_keymap_str(content, Path::new(SOURCE))
    }

    /// One full-width 4-column layer block.
    fn layer_block(name: &str) -> String {
        format!(
            concat!(
                "{}:\n",
                "  top: [Q, W, E, R]\n",
                "  mid: [A, S, D, F]\n",
                "  bot: [Z, X, C, V]\n",
                "  thumb: [Esc, Bsp, Tab, Ent, Spc, Del]\n",
            ),
            name
        )
    }

    /// A well-formed 4-column keymap with one layer.
    fn minimal_keymap() -> String {
        format!(
            "keyboard:\n  name: test board\n  rows: 4\n  columns: 4\n\n{}",
            layer_block("Base")
        )
    }

    #[test]
    fn test_parse_minimal_keymap() {
        let keymap = parse(&minimal_keymap()).unwrap();
        assert_eq!(keymap.name, "test board");
        assert_eq!(keymap.rows, 4);
        assert_eq!(keymap.columns, 4);
        assert_eq!(keymap.layers.len(), 1);

        let layer = &keymap.layers[0];
        assert_eq!(layer.name, "Base");
        assert_eq!(layer.top[0], KeyCell::Present("Q".to_string()));
        assert_eq!(layer.thumb.len(), THUMB_CELLS);
        // Missing combo grids default to "no combos" at full width
        assert_eq!(layer.tcomb, vec![None, None]);
        assert_eq!(layer.tmcomb.len(), 4);
    }

    #[test]
    fn test_parse_default_keyboard_name() {
        let content = minimal_keymap().replace("  name: test board\n", "");
        let keymap = parse(&content).unwrap();
        assert_eq!(keymap.name, DEFAULT_KEYBOARD_NAME);
    }

    #[test]
    fn test_parse_preserves_layer_order() {
        let mut content = minimal_keymap();
        content.push_str(&layer_block("Symbols"));
        content.push_str(&layer_block("Numbers"));
        let keymap = parse(&content).unwrap();
        let names: Vec<&str> = keymap.layers.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["Base", "Symbols", "Numbers"]);
    }

    #[test]
    fn test_missing_keyboard_block() {
        let content = minimal_keymap().replace("keyboard:\n  name: test board\n  rows: 4\n  columns: 4\n\n", "");
        let err = parse(&content).unwrap_err();
        assert!(matches!(
            err,
            RenderError::MissingDimensions { ref missing } if missing.len() == 2
        ));
    }

    #[test]
    fn test_missing_columns() {
        let content = minimal_keymap().replace("  columns: 4\n", "");
        let err = parse(&content).unwrap_err();
        assert!(matches!(
            err,
            RenderError::MissingDimensions { ref missing } if *missing == vec!["columns"]
        ));
    }

    #[test]
    fn test_non_integer_columns_counts_as_missing() {
        let content = minimal_keymap().replace("columns: 4", "columns: wide");
        let err = parse(&content).unwrap_err();
        assert!(matches!(err, RenderError::MissingDimensions { .. }));
    }

    #[test]
    fn test_non_mapping_root() {
        let err = parse("- a\n- b\n").unwrap_err();
        assert!(matches!(err, RenderError::MissingDimensions { .. }));
    }

    #[test]
    fn test_rows_must_be_four() {
        let content = minimal_keymap().replace("rows: 4", "rows: 3");
        let err = parse(&content).unwrap_err();
        assert!(err.to_string().contains("'keyboard.rows' must be 4"));
    }

    #[test]
    fn test_columns_must_be_even() {
        let content = minimal_keymap().replace("columns: 4", "columns: 5");
        let err = parse(&content).unwrap_err();
        assert!(matches!(err, RenderError::InvalidDocument(_)));
        assert!(err.to_string().contains("even number"));
    }

    #[test]
    fn test_malformed_yaml_is_parse_error() {
        let err = parse("keyboard: [unterminated\n").unwrap_err();
        match err {
            RenderError::Parse { path, .. } => assert_eq!(path, Path::new(SOURCE)),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_row_length_mismatch() {
        let content = minimal_keymap().replace("mid: [A, S, D, F]", "mid: [A, S, D]");
        let err = parse(&content).unwrap_err();
        assert_eq!(
            err.to_string(),
            "ERROR: Invalid layer 'Base': row 'mid' has 3 cells, expected 4"
        );
    }

    #[test]
    fn test_thumb_row_is_fixed_size() {
        let content = minimal_keymap().replace(
            "thumb: [Esc, Bsp, Tab, Ent, Spc, Del]",
            "thumb: [Ent, Spc]",
        );
        let err = parse(&content).unwrap_err();
        assert!(err.to_string().contains("row 'thumb' has 2 cells, expected 6"));
    }

    #[test]
    fn test_missing_key_row() {
        let content = minimal_keymap().replace("  bot: [Z, X, C, V]\n", "");
        let err = parse(&content).unwrap_err();
        match err {
            RenderError::InvalidLayer { layer, detail } => {
                assert_eq!(layer, "Base");
                assert!(detail.contains("bot"));
            }
            other => panic!("expected layer error, got {other:?}"),
        }
    }

    #[test]
    fn test_absent_markers_and_nulls() {
        let content = minimal_keymap().replace("top: [Q, W, E, R]", "top: [Q, None, ~, R]");
        let keymap = parse(&content).unwrap();
        let top = &keymap.layers[0].top;
        assert_eq!(top[1], KeyCell::Absent);
        assert_eq!(top[2], KeyCell::Absent);
        assert!(top[3].is_present());
    }

    #[test]
    fn test_numeric_cells_become_text() {
        let content = minimal_keymap().replace("top: [Q, W, E, R]", "top: [1, 2, 3, 4]");
        let keymap = parse(&content).unwrap();
        assert_eq!(keymap.layers[0].top[0], KeyCell::Present("1".to_string()));
    }

    #[test]
    fn test_combo_empty_string_means_no_combo() {
        let mut content = minimal_keymap();
        content.push_str("  tcomb: ['', Fn]\n");
        let keymap = parse(&content).unwrap();
        assert_eq!(keymap.layers[0].tcomb, vec![None, Some("Fn".to_string())]);
    }

    #[test]
    fn test_combo_null_means_no_combo() {
        let mut content = minimal_keymap();
        content.push_str("  tmcomb: [~, Cut, Copy, ~]\n");
        let keymap = parse(&content).unwrap();
        assert_eq!(
            keymap.layers[0].tmcomb,
            vec![None, Some("Cut".to_string()), Some("Copy".to_string()), None]
        );
    }

    #[test]
    fn test_combo_length_mismatch() {
        let mut content = minimal_keymap();
        content.push_str("  mcomb: [a, b, c]\n");
        let err = parse(&content).unwrap_err();
        assert!(err
            .to_string()
            .contains("combo row 'mcomb' has 3 entries, expected 2"));
    }

    #[test]
    fn test_shading_accepts_present_cells() {
        let mut content = minimal_keymap();
        content.push_str("  shading: [[3, 0], [2, 1], [0, 5]]\n");
        let keymap = parse(&content).unwrap();
        let shading = &keymap.layers[0].shading;
        assert_eq!(shading.len(), 3);
        assert!(shading.contains(&Position::new(ROW_TOP, 0)));
        assert!(shading.contains(&Position::new(ROW_MIDDLE, 1)));
        assert!(shading.contains(&Position::new(ROW_THUMB, 5)));
    }

    #[test]
    fn test_shading_rejects_absent_cells() {
        let mut content = minimal_keymap().replace("top: [Q, W, E, R]", "top: [Q, None, E, R]");
        content.push_str("  shading: [[3, 1]]\n");
        let err = parse(&content).unwrap_err();
        assert!(err.to_string().contains("shading entry [3, 1] marks an absent key"));
    }

    #[test]
    fn test_lines_reject_out_of_grid_coordinates() {
        let mut content = minimal_keymap();
        content.push_str("  lines: [[3, 9]]\n");
        let err = parse(&content).unwrap_err();
        assert!(err.to_string().contains("lines entry [3, 9] is outside the key grid"));
    }

    #[test]
    fn test_zero_layers_is_valid() {
        let content = "keyboard:\n  rows: 4\n  columns: 10\n";
        let keymap = parse(content).unwrap();
        assert!(keymap.layers.is_empty());
        assert_eq!(keymap.columns, 10);
    }

    #[test]
    fn test_parse_keymap_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map.yaml");
        fs::write(&path, minimal_keymap()).unwrap();
        let keymap = parse_keymap_file(&path).unwrap();
        assert_eq!(keymap.layers.len(), 1);
    }
}

//! Placement engine for split keyboard diagrams.
//!
//! Converts one layer's text grids into absolute 2-D placements for key
//! faces, combo labels, divider lines, and the layer title. All
//! coordinates are in inches. The functions here are pure: placement of
//! a cell depends only on its grid position and the [`GeometryConfig`],
//! never on which other cells are present.
//!
//! The diagram is mirrored around a central gap between the hands.
//! Rows are numbered bottom-up (thumb row 0, top finger row 3) and grow
//! upward on the page; columns run left to right across both hands.

use crate::models::{
    KeyCell, Layer, Position, ROW_BOTTOM, ROW_MIDDLE, ROW_THUMB, ROW_TOP, THUMB_KEYS_PER_HAND,
};

/// Physical dimensions of the rendered diagram, in inches.
///
/// The defaults match a 0.55 in key face on a 0.75 in pitch with a
/// 2 in gap between the innermost columns of the two hands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryConfig {
    /// Distance from the board midline to the innermost key center of
    /// each hand
    pub separation: f32,
    /// Width of a key face
    pub key_width: f32,
    /// Height of a key face
    pub key_height: f32,
    /// Horizontal gap between adjacent key faces
    pub column_gap: f32,
    /// Vertical gap between adjacent key faces
    pub row_gap: f32,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            separation: 1.0,
            key_width: 0.55,
            key_height: 0.55,
            column_gap: 0.2,
            row_gap: 0.2,
        }
    }
}

impl GeometryConfig {
    /// Center-to-center distance between adjacent columns.
    #[must_use]
    pub fn column_pitch(&self) -> f32 {
        self.key_width + self.column_gap
    }

    /// Center-to-center distance between adjacent rows.
    #[must_use]
    pub fn row_pitch(&self) -> f32 {
        self.key_height + self.row_gap
    }

    /// Horizontal center of column `col` in a grid `columns` wide.
    ///
    /// Columns below `columns / 2` belong to the left hand and count
    /// inward toward the gap; the rest mirror outward on the right.
    #[must_use]
    pub fn key_x(&self, columns: u8, col: u8) -> f32 {
        let half = columns / 2;
        if col < half {
            -self.separation - self.column_pitch() * f32::from(half - 1 - col)
        } else {
            self.separation + self.column_pitch() * f32::from(col - half)
        }
    }

    /// Vertical center of a row.
    #[must_use]
    pub fn row_y(&self, row: u8) -> f32 {
        f32::from(row) * self.row_pitch()
    }

    /// Vertical midpoint between `lower_row` and the row above it.
    #[must_use]
    pub fn row_gap_midpoint_y(&self, lower_row: u8) -> f32 {
        (f32::from(lower_row) + 0.5) * self.row_pitch()
    }

    /// Horizontal center of thumb cell `col`.
    ///
    /// The thumb row does not follow the main column formula: each hand
    /// gets [`THUMB_KEYS_PER_HAND`] keys at fixed offsets, shifted half
    /// a pitch in from where the innermost main columns sit.
    #[must_use]
    pub fn thumb_x(&self, col: u8) -> f32 {
        let pitch = self.column_pitch();
        let per_hand = THUMB_KEYS_PER_HAND as u8;
        if col < per_hand {
            -self.separation - pitch * f32::from(per_hand - 1 - col) + pitch / 2.0
        } else {
            self.separation + pitch * f32::from(col - per_hand) - pitch / 2.0
        }
    }

    /// Vertical position of the layer title, one pitch above the top
    /// row.
    #[must_use]
    pub fn title_y(&self) -> f32 {
        f32::from(ROW_TOP + 1) * self.row_pitch()
    }
}

/// A key face to draw: grid anchor, position, legend, shading flag.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyPlacement {
    /// Grid column (anchor id component)
    pub col: u8,
    /// Grid row (anchor id component)
    pub row: u8,
    /// Horizontal center in inches
    pub x: f32,
    /// Vertical center in inches
    pub y: f32,
    /// Legend to print on the key face
    pub text: String,
    /// Whether the face gets the shaded background
    pub shaded: bool,
}

/// A horizontal divider line across the key at `(col, row)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DividerLine {
    /// Grid column of the decorated key
    pub col: u8,
    /// Grid row of the decorated key
    pub row: u8,
}

/// Plain positioned text (combo labels, the layer title).
#[derive(Debug, Clone, PartialEq)]
pub struct TextPlacement {
    /// Horizontal center in inches
    pub x: f32,
    /// Vertical center in inches
    pub y: f32,
    /// Text to place
    pub text: String,
}

/// One row's key faces and divider lines.
#[derive(Debug, Clone, PartialEq)]
pub struct RowFragment {
    /// Grid row these placements belong to
    pub row: u8,
    /// Key faces, left to right (absent cells emit nothing)
    pub keys: Vec<KeyPlacement>,
    /// Divider lines for keys in this row
    pub dividers: Vec<DividerLine>,
}

/// Combo labels between horizontally adjacent keys of one row.
#[derive(Debug, Clone, PartialEq)]
pub struct RowComboRun {
    /// The row whose neighbours these combos join
    pub row: u8,
    /// Labels at pair midpoints, left to right
    pub combos: Vec<TextPlacement>,
}

/// Combo labels between vertically adjacent keys of a row pair.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnComboRun {
    /// Lower row of the pair
    pub lower_row: u8,
    /// Upper row of the pair
    pub upper_row: u8,
    /// Labels at column centers, left to right
    pub combos: Vec<TextPlacement>,
}

/// Everything the renderer needs to draw one layer, in drawing order.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerFragment {
    /// Key rows top to bottom, thumb row last
    pub rows: Vec<RowFragment>,
    /// Same-row combo runs, top row first
    pub row_combos: Vec<RowComboRun>,
    /// Vertical combo runs, upper pair first
    pub column_combos: Vec<ColumnComboRun>,
    /// The layer title above the board
    pub title: TextPlacement,
}

impl LayerFragment {
    /// Total number of key faces across all rows.
    #[must_use]
    pub fn key_count(&self) -> usize {
        self.rows.iter().map(|row| row.keys.len()).sum()
    }
}

/// Computes all placements for one layer.
#[must_use]
pub fn layer_fragment(layer: &Layer, columns: u8, config: &GeometryConfig) -> LayerFragment {
    let main_rows = [
        (ROW_TOP, &layer.top),
        (ROW_MIDDLE, &layer.mid),
        (ROW_BOTTOM, &layer.bot),
    ];

    let mut rows = Vec::with_capacity(main_rows.len() + 1);
    for (row, cells) in main_rows {
        rows.push(main_row_fragment(layer, row, cells, columns, config));
    }
    rows.push(thumb_row_fragment(layer, config));

    let row_combos = vec![
        row_combo_run(ROW_TOP, &layer.tcomb, columns, config),
        row_combo_run(ROW_MIDDLE, &layer.mcomb, columns, config),
        row_combo_run(ROW_BOTTOM, &layer.bcomb, columns, config),
    ];
    let column_combos = vec![
        column_combo_run(ROW_MIDDLE, &layer.tmcomb, columns, config),
        column_combo_run(ROW_BOTTOM, &layer.mbcomb, columns, config),
    ];

    let title = TextPlacement {
        x: 0.0,
        y: config.title_y(),
        text: layer.name.clone(),
    };

    LayerFragment {
        rows,
        row_combos,
        column_combos,
        title,
    }
}

fn main_row_fragment(
    layer: &Layer,
    row: u8,
    cells: &[KeyCell],
    columns: u8,
    config: &GeometryConfig,
) -> RowFragment {
    let y = config.row_y(row);
    let mut keys = Vec::new();
    let mut dividers = Vec::new();
    for (col, cell) in cells.iter().enumerate() {
        let col = col as u8;
        let Some(text) = cell.text() else { continue };
        place_key(
            &mut keys,
            &mut dividers,
            layer,
            row,
            col,
            config.key_x(columns, col),
            y,
            text,
        );
    }
    RowFragment { row, keys, dividers }
}

fn thumb_row_fragment(layer: &Layer, config: &GeometryConfig) -> RowFragment {
    let y = config.row_y(ROW_THUMB);
    let mut keys = Vec::new();
    let mut dividers = Vec::new();
    for (col, cell) in layer.thumb.iter().enumerate() {
        let col = col as u8;
        let Some(text) = cell.text() else { continue };
        place_key(
            &mut keys,
            &mut dividers,
            layer,
            ROW_THUMB,
            col,
            config.thumb_x(col),
            y,
            text,
        );
    }
    RowFragment {
        row: ROW_THUMB,
        keys,
        dividers,
    }
}

#[allow(clippy::too_many_arguments)]
fn place_key(
    keys: &mut Vec<KeyPlacement>,
    dividers: &mut Vec<DividerLine>,
    layer: &Layer,
    row: u8,
    col: u8,
    x: f32,
    y: f32,
    text: &str,
) {
    let position = Position::new(row, col);
    keys.push(KeyPlacement {
        col,
        row,
        x,
        y,
        text: text.to_string(),
        shaded: layer.shading.contains(&position),
    });
    if layer.lines.contains(&position) {
        dividers.push(DividerLine { col, row });
    }
}

/// Combos between neighbours of one row: entry `i` joins keys `i` and
/// `i + 1` and sits at the exact midpoint of their centers.
fn row_combo_run(
    row: u8,
    combos: &[Option<String>],
    columns: u8,
    config: &GeometryConfig,
) -> RowComboRun {
    let y = config.row_y(row);
    let mut labels = Vec::new();
    for (i, combo) in combos.iter().enumerate() {
        let Some(text) = combo else { continue };
        let i = i as u8;
        let x = (config.key_x(columns, i) + config.key_x(columns, i + 1)) / 2.0;
        labels.push(TextPlacement {
            x,
            y,
            text: text.clone(),
        });
    }
    RowComboRun { row, combos: labels }
}

/// Combos between a row pair: entry `c` sits at column `c`'s center,
/// halfway between the two rows.
fn column_combo_run(
    lower_row: u8,
    combos: &[Option<String>],
    columns: u8,
    config: &GeometryConfig,
) -> ColumnComboRun {
    let y = config.row_gap_midpoint_y(lower_row);
    let mut labels = Vec::new();
    for (col, combo) in combos.iter().enumerate() {
        let Some(text) = combo else { continue };
        labels.push(TextPlacement {
            x: config.key_x(columns, col as u8),
            y,
            text: text.clone(),
        });
    }
    ColumnComboRun {
        lower_row,
        upper_row: lower_row + 1,
        combos: labels,
    }
}

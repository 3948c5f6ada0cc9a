//! Keymap, layer, and key cell data structures.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Row number of the thumb row (lowest on the page).
pub const ROW_THUMB: u8 = 0;
/// Row number of the bottom finger row.
pub const ROW_BOTTOM: u8 = 1;
/// Row number of the middle (home) finger row.
pub const ROW_MIDDLE: u8 = 2;
/// Row number of the top finger row.
pub const ROW_TOP: u8 = 3;

/// Thumb keys on each hand. The thumb row has a fixed shape regardless
/// of how many columns the finger rows have.
pub const THUMB_KEYS_PER_HAND: usize = 3;
/// Total cells in the thumb row (both hands).
pub const THUMB_CELLS: usize = 2 * THUMB_KEYS_PER_HAND;

/// Cell text that marks a physically absent key in the input file.
pub const ABSENT_KEY_MARKER: &str = "None";

/// Keyboard name used when the input file does not provide one.
pub const DEFAULT_KEYBOARD_NAME: &str = "unnamed keyboard";

/// Position in the diagram grid, addressed as (row, column).
///
/// Rows are numbered bottom-up: thumb row is 0, top finger row is 3.
/// Columns run left to right across both hands, 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Diagram row (0 = thumb, 3 = top)
    pub row: u8,
    /// Diagram column (0-based, spans both hands)
    pub col: u8,
}

impl Position {
    /// Creates a new Position with the given row and column.
    #[must_use]
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }
}

/// A single slot in a layer's key grid.
///
/// A slot either carries the legend to print on the key face, or marks
/// a position where the physical keyboard has no switch. Absent cells
/// keep their place in the grid so the cells after them do not shift.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyCell {
    /// A physical key with its printed legend (may be LaTeX markup).
    Present(String),
    /// No switch at this grid position; nothing is drawn.
    Absent,
}

impl KeyCell {
    /// Builds a cell from a raw parsed value.
    ///
    /// A missing value (YAML null) or the literal marker text
    /// [`ABSENT_KEY_MARKER`] both denote an absent key.
    #[must_use]
    pub fn from_raw(raw: Option<String>) -> Self {
        match raw {
            Some(text) if text != ABSENT_KEY_MARKER => Self::Present(text),
            _ => Self::Absent,
        }
    }

    /// Returns true if a key exists at this position.
    #[must_use]
    pub const fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    /// Returns the legend text, or None for an absent cell.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Present(text) => Some(text),
            Self::Absent => None,
        }
    }
}

/// One keymap layer: four key rows plus combo labels and decorations.
///
/// The finger rows (`top`, `mid`, `bot`) each hold one cell per column.
/// The thumb row always holds [`THUMB_CELLS`] cells. Combo vectors hold
/// `None` where no combo exists between the adjacent keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layer {
    /// Layer name as written in the input file (drawn as the title)
    pub name: String,
    /// Top finger row, one cell per column
    pub top: Vec<KeyCell>,
    /// Middle (home) finger row, one cell per column
    pub mid: Vec<KeyCell>,
    /// Bottom finger row, one cell per column
    pub bot: Vec<KeyCell>,
    /// Thumb row, always [`THUMB_CELLS`] cells
    pub thumb: Vec<KeyCell>,
    /// Horizontal combos between neighbours of the top row
    pub tcomb: Vec<Option<String>>,
    /// Horizontal combos between neighbours of the middle row
    pub mcomb: Vec<Option<String>>,
    /// Horizontal combos between neighbours of the bottom row
    pub bcomb: Vec<Option<String>>,
    /// Vertical combos between the top and middle rows, one per column
    pub tmcomb: Vec<Option<String>>,
    /// Vertical combos between the middle and bottom rows, one per column
    pub mbcomb: Vec<Option<String>>,
    /// Positions whose key face is drawn shaded
    pub shading: HashSet<Position>,
    /// Positions whose key face carries a horizontal divider line
    pub lines: HashSet<Position>,
}

impl Layer {
    /// Returns the key cells of the given row, or None for an unknown
    /// row number.
    #[must_use]
    pub fn row_cells(&self, row: u8) -> Option<&[KeyCell]> {
        match row {
            ROW_THUMB => Some(&self.thumb),
            ROW_BOTTOM => Some(&self.bot),
            ROW_MIDDLE => Some(&self.mid),
            ROW_TOP => Some(&self.top),
            _ => None,
        }
    }

    /// Gets the cell at the given grid position, if the position exists.
    #[must_use]
    pub fn cell(&self, position: Position) -> Option<&KeyCell> {
        self.row_cells(position.row)?.get(usize::from(position.col))
    }
}

/// A complete parsed keymap: keyboard dimensions plus its layers in
/// input-file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keymap {
    /// Keyboard name from the input file, or [`DEFAULT_KEYBOARD_NAME`]
    pub name: String,
    /// Number of rows (always 4: top, middle, bottom, thumb)
    pub rows: u8,
    /// Number of key columns across both hands (even)
    pub columns: u8,
    /// Layers in the order they appear in the input file
    pub layers: Vec<Layer>,
}

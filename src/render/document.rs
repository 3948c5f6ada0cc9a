//! Keymap document generation.
//!
//! Assembles one LaTeX/TikZ document from per-layer geometry fragments:
//! a fixed preamble, then for each layer a banner comment, a tikzpicture
//! with the layer's keys, combos, decorations and title, and finally the
//! document footer. Output is deterministic for a given keymap and
//! geometry.

use crate::models::Keymap;
use crate::services::geometry::{
    self, ColumnComboRun, GeometryConfig, LayerFragment, RowComboRun, RowFragment, TextPlacement,
};
use std::fmt::Write;

/// Width of the banner comment block above each layer.
const BANNER_WIDTH: usize = 78;
/// Characters available for the centered layer name inside the banner.
const BANNER_FIELD: usize = 68;

/// TikZ style prefix for shaded key faces.
const SHADING_STYLE: &str = "fill=black!7,";

/// Document preamble. The fbb font has no visible-space glyph, so one
/// is built by hand for use in key legends.
const DOCUMENT_HEADER: &str = r"\documentclass[]{article}
\usepackage[oldstyle,sups]{fbb}% to use free Bembo font (old style numbers)
\usepackage[margin=.75in]{geometry}
\pagestyle{empty}
\usepackage[T1]{fontenc}
\usepackage[utf8]{inputenc}
\usepackage{textcomp} % provide euro and other symbols
\usepackage{fontawesome}
\usepackage{menukeys}
\usepackage{tikz}
\usetikzlibrary{shapes}

% Manually define visible space (which otherwise doesn't appear in fbb font)
\newsavebox{\textvisiblespacebox}
\savebox{\textvisiblespacebox}{M}
\newcommand\vtextvisiblespace[1][\wd\textvisiblespacebox]{%
  \makebox[#1]{\kern.1em\rule{.4pt}{.3ex}%
  \hrulefill%
  \rule{.4pt}{.3ex}\kern.1em}%
}

\begin{document}
";

const LAYER_FOOTER: &str = r"
\end{tikzpicture}

} % resize box

\vspace{.4in}

\end{centering}
";

const DOCUMENT_FOOTER: &str = "\n\\end{document}\n";

/// Renders the whole keymap to LaTeX source.
#[must_use]
pub fn render_document(keymap: &Keymap, config: &GeometryConfig) -> String {
    let mut document = String::new();
    writeln!(document, "% Keymap: {}", keymap.name).unwrap();
    document.push_str(DOCUMENT_HEADER);

    for layer in &keymap.layers {
        let fragment = geometry::layer_fragment(layer, keymap.columns, config);
        document.push_str(&layer_banner(&layer.name));
        document.push_str(&layer_header(config));
        render_fragment(&mut document, &fragment);
        document.push_str(LAYER_FOOTER);
    }

    document.push_str(DOCUMENT_FOOTER);
    document
}

/// Banner comment announcing a layer: a rule, the upper-cased name
/// centered between `%` markers, and another rule.
fn layer_banner(name: &str) -> String {
    let rule = "%".repeat(BANNER_WIDTH);
    let name_upper = name.to_uppercase();
    let remainder = BANNER_FIELD.saturating_sub(name_upper.chars().count());
    format!(
        "\n\n{rule}\n% {}{} LAYER {}%\n{rule}\n\n",
        " ".repeat(remainder.div_ceil(2)),
        name_upper,
        " ".repeat(remainder / 2),
    )
}

/// Opens a layer's tikzpicture. Key and combo node styles carry their
/// sizes from the geometry config so face size and pitch stay in step.
fn layer_header(config: &GeometryConfig) -> String {
    format!(
        concat!(
            "\\begin{{centering}}\n",
            "\n",
            "\\resizebox{{6.33in}}{{!}}{{% 6.33in fits portrait; 9in for landscape\n",
            "\n",
            "\\begin{{tikzpicture}}[\n",
            "    rectStyle/.style={{inner sep=0pt,minimum size={} in,draw,font=\\Large,align=center}},\n",
            "    vcomboStyle/.style={{minimum width={} in, align=center, font=\\Large}},\n",
            "    hcomboStyle/.style={{minimum width={} in, align=center, font=\\Large}},\n",
            "    ]\n",
        ),
        config.key_height, config.key_width, config.column_gap
    )
}

fn render_fragment(out: &mut String, fragment: &LayerFragment) {
    for row in &fragment.rows {
        render_row(out, row);
    }
    for run in &fragment.row_combos {
        render_row_combos(out, run);
    }
    for run in &fragment.column_combos {
        render_column_combos(out, run);
    }
    render_title(out, &fragment.title);
}

/// One key row: a node per present key, anchored `key-<col>-<row>`,
/// then any divider lines drawn across those anchors.
fn render_row(out: &mut String, row: &RowFragment) {
    writeln!(out, "\n% Row #{}", row.row).unwrap();
    for key in &row.keys {
        let shading = if key.shaded { SHADING_STYLE } else { "" };
        writeln!(
            out,
            "\\node [{}rectStyle] (key-{}-{}) at ({} in, {} in) {{{}}};",
            shading, key.col, key.row, key.x, key.y, key.text
        )
        .unwrap();
    }
    for divider in &row.dividers {
        writeln!(
            out,
            "\\draw [color=gray] (key-{col}-{row}.west) -- (key-{col}-{row}.east);",
            col = divider.col,
            row = divider.row
        )
        .unwrap();
    }
}

fn render_row_combos(out: &mut String, run: &RowComboRun) {
    writeln!(out, "\n% Combos: row #{}", run.row).unwrap();
    for combo in &run.combos {
        writeln!(
            out,
            "\\node [hcomboStyle] at ({} in, {} in) {{\\vspace{{-1.25\\baselineskip}}{}}};",
            combo.x, combo.y, combo.text
        )
        .unwrap();
    }
}

fn render_column_combos(out: &mut String, run: &ColumnComboRun) {
    writeln!(
        out,
        "\n% Column combos: rows #{}--{}",
        run.lower_row, run.upper_row
    )
    .unwrap();
    for combo in &run.combos {
        writeln!(
            out,
            "\\node [vcomboStyle] at ({} in, {} in) {{{}}};",
            combo.x, combo.y, combo.text
        )
        .unwrap();
    }
}

fn render_title(out: &mut String, title: &TextPlacement) {
    writeln!(out, "\n% Layer name").unwrap();
    writeln!(
        out,
        "\\node at ({} in, {} in) {{\\huge\\textsc{{{}}}}};",
        title.x, title.y, title.text
    )
    .unwrap();
}

//! Built-in stroke font
//!
//! Glyphs are polylines on a 4 x 6 grid with the baseline at y = 0. They are
//! drawn with `Canvas::draw_line`, so text scales with the viewport like any
//! other shape. Letters are upper case only; lower case input is folded.

use super::Canvas;

/// Grid height of a capital letter
const CAP_HEIGHT: f64 = 6.0;

/// Horizontal advance per character, in grid units
const ADVANCE: f64 = 6.0;

/// Distance between baselines, in grid units
const LINE_SPACING: f64 = 9.0;

type Stroke = &'static [(i8, i8)];

const BOX: &[Stroke] = &[&[(0, 0), (4, 0), (4, 6), (0, 6), (0, 0)]];

fn glyph(c: char) -> Option<&'static [Stroke]> {
    let strokes: &'static [Stroke] = match c.to_ascii_uppercase() {
        ' ' => &[],
        '0' => &[&[(0, 0), (4, 0), (4, 6), (0, 6), (0, 0)], &[(0, 0), (4, 6)]],
        '1' => &[&[(1, 5), (2, 6), (2, 0)], &[(1, 0), (3, 0)]],
        '2' => &[&[(0, 6), (4, 6), (4, 3), (0, 3), (0, 0), (4, 0)]],
        '3' => &[&[(0, 6), (4, 6), (4, 0), (0, 0)], &[(1, 3), (4, 3)]],
        '4' => &[&[(0, 6), (0, 3), (4, 3)], &[(4, 6), (4, 0)]],
        '5' | 'S' => &[&[(4, 6), (0, 6), (0, 3), (4, 3), (4, 0), (0, 0)]],
        '6' => &[&[(4, 6), (0, 6), (0, 0), (4, 0), (4, 3), (0, 3)]],
        '7' => &[&[(0, 6), (4, 6), (1, 0)]],
        '8' => &[&[(0, 0), (4, 0), (4, 6), (0, 6), (0, 0)], &[(0, 3), (4, 3)]],
        '9' => &[&[(4, 3), (0, 3), (0, 6), (4, 6), (4, 0), (0, 0)]],
        'A' => &[&[(0, 0), (0, 4), (2, 6), (4, 4), (4, 0)], &[(0, 3), (4, 3)]],
        'B' => &[
            &[(0, 0), (0, 6), (3, 6), (4, 5), (4, 4), (3, 3), (0, 3)],
            &[(3, 3), (4, 2), (4, 1), (3, 0), (0, 0)],
        ],
        'C' => &[&[(4, 6), (0, 6), (0, 0), (4, 0)]],
        'D' => &[&[(0, 0), (0, 6), (2, 6), (4, 4), (4, 2), (2, 0), (0, 0)]],
        'E' => &[&[(4, 6), (0, 6), (0, 0), (4, 0)], &[(0, 3), (3, 3)]],
        'F' => &[&[(4, 6), (0, 6), (0, 0)], &[(0, 3), (3, 3)]],
        'G' => &[&[(4, 6), (0, 6), (0, 0), (4, 0), (4, 3), (2, 3)]],
        'H' => &[&[(0, 6), (0, 0)], &[(4, 6), (4, 0)], &[(0, 3), (4, 3)]],
        'I' => &[&[(1, 6), (3, 6)], &[(2, 6), (2, 0)], &[(1, 0), (3, 0)]],
        'J' => &[&[(4, 6), (4, 0), (0, 0), (0, 2)]],
        'K' => &[&[(0, 6), (0, 0)], &[(4, 6), (0, 3), (4, 0)]],
        'L' => &[&[(0, 6), (0, 0), (4, 0)]],
        'M' => &[&[(0, 0), (0, 6), (2, 3), (4, 6), (4, 0)]],
        'N' => &[&[(0, 0), (0, 6), (4, 0), (4, 6)]],
        'O' => &[&[(0, 0), (4, 0), (4, 6), (0, 6), (0, 0)]],
        'P' => &[&[(0, 0), (0, 6), (4, 6), (4, 3), (0, 3)]],
        'Q' => &[&[(0, 0), (4, 0), (4, 6), (0, 6), (0, 0)], &[(2, 2), (4, 0)]],
        'R' => &[&[(0, 0), (0, 6), (4, 6), (4, 3), (0, 3), (4, 0)]],
        'T' => &[&[(0, 6), (4, 6)], &[(2, 6), (2, 0)]],
        'U' => &[&[(0, 6), (0, 0), (4, 0), (4, 6)]],
        'V' => &[&[(0, 6), (2, 0), (4, 6)]],
        'W' => &[&[(0, 6), (1, 0), (2, 3), (3, 0), (4, 6)]],
        'X' => &[&[(0, 6), (4, 0)], &[(0, 0), (4, 6)]],
        'Y' => &[&[(0, 6), (2, 3), (4, 6)], &[(2, 3), (2, 0)]],
        'Z' => &[&[(0, 6), (4, 6), (0, 0), (4, 0)]],
        '.' => &[&[(2, 0), (2, 1)]],
        ',' => &[&[(2, 1), (1, -1)]],
        ':' => &[&[(2, 1), (2, 2)], &[(2, 4), (2, 5)]],
        ';' => &[&[(2, 4), (2, 5)], &[(2, 1), (1, -1)]],
        '-' => &[&[(1, 3), (3, 3)]],
        '+' => &[&[(0, 3), (4, 3)], &[(2, 1), (2, 5)]],
        '=' => &[&[(0, 2), (4, 2)], &[(0, 4), (4, 4)]],
        '*' => &[&[(0, 3), (4, 3)], &[(1, 5), (3, 1)], &[(1, 1), (3, 5)]],
        '/' => &[&[(0, 0), (4, 6)]],
        '\\' => &[&[(0, 6), (4, 0)]],
        '|' => &[&[(2, 6), (2, 0)]],
        '_' => &[&[(0, -1), (4, -1)]],
        '(' => &[&[(3, 6), (1, 4), (1, 2), (3, 0)]],
        ')' => &[&[(1, 6), (3, 4), (3, 2), (1, 0)]],
        '[' => &[&[(3, 6), (1, 6), (1, 0), (3, 0)]],
        ']' => &[&[(1, 6), (3, 6), (3, 0), (1, 0)]],
        '<' => &[&[(4, 5), (0, 3), (4, 1)]],
        '>' => &[&[(0, 5), (4, 3), (0, 1)]],
        '!' => &[&[(2, 6), (2, 2)], &[(2, 0), (2, 1)]],
        '?' => &[&[(0, 5), (1, 6), (4, 6), (4, 4), (2, 3), (2, 2)], &[(2, 0), (2, 1)]],
        '\'' => &[&[(2, 6), (2, 4)]],
        '"' => &[&[(1, 6), (1, 4)], &[(3, 6), (3, 4)]],
        '#' => &[&[(1, 0), (1, 6)], &[(3, 0), (3, 6)], &[(0, 2), (4, 2)], &[(0, 4), (4, 4)]],
        '%' => &[&[(0, 0), (4, 6)], &[(0, 6), (0, 5)], &[(4, 1), (4, 0)]],
        _ => return None,
    };
    Some(strokes)
}

/// Width of the widest line of `text` at cap height `height`
pub fn text_width(text: &str, height: f64) -> f64 {
    let columns = text.lines().map(|l| l.chars().count()).max().unwrap_or(0);
    columns as f64 * ADVANCE * height / CAP_HEIGHT
}

/// Draw `text` with the first baseline starting at (`x`, `y`)
///
/// Characters without a glyph are drawn as a box. `\n` starts a new line
/// below the previous one.
pub fn draw_text<C: Canvas + ?Sized>(canvas: &mut C, x: f64, y: f64, text: &str, height: f64) {
    let unit = height / CAP_HEIGHT;
    for (row, line) in text.lines().enumerate() {
        let baseline = y - row as f64 * LINE_SPACING * unit;
        for (column, c) in line.chars().enumerate() {
            let origin = x + column as f64 * ADVANCE * unit;
            for stroke in glyph(c).unwrap_or(BOX) {
                for seg in stroke.windows(2) {
                    let (x0, y0) = seg[0];
                    let (x1, y1) = seg[1];
                    canvas.draw_line(
                        origin + f64::from(x0) * unit,
                        baseline + f64::from(y0) * unit,
                        origin + f64::from(x1) * unit,
                        baseline + f64::from(y1) * unit,
                    );
                }
            }
        }
    }
}

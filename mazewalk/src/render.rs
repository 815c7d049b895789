//! Plain text drawing of a board, two characters per cell.

use std::fmt::Write as _;

use hashbrown::HashSet;
use mazecore::{CellType, Dims, Visit};

pub const PATH_MARK: &str = " .";

pub fn glyph(cell: CellType) -> &'static str {
    match cell {
        CellType::Wall => "##",
        CellType::InvisibleWall | CellType::Path => "  ",
        CellType::Start => " S",
        CellType::Finish => " F",
    }
}

/// Draws the rows of `raw`, marking the `overlay` cells that are plain paths.
pub fn render(raw: &[Vec<CellType>], overlay: &[Dims]) -> String {
    let overlay: HashSet<Dims> = overlay.iter().copied().collect();
    let mut out = String::new();

    for (y, row) in raw.iter().enumerate() {
        for (x, &cell) in row.iter().enumerate() {
            let pos = Dims(x as i32, y as i32);
            out.push_str(match cell {
                CellType::Path if overlay.contains(&pos) => PATH_MARK,
                cell => glyph(cell),
            });
        }
        out.push('\n');
    }

    out
}

/// One line of the `--steps` log.
pub fn visit_line(step: usize, visit: Visit<'_>) -> String {
    let mut line = format!("{step:>4}:");
    for Dims(x, y) in visit.cells() {
        let _ = write!(line, " ({x}, {y})");
    }
    line
}

use std::{fmt, str::FromStr};

use crate::{dims::Dims, error::MazeError};

use super::{CellType, Grid};

/// Parses the one-char-per-cell text form, see [`CellType::to_char`].
///
/// Leading whitespace of every line is treated as indentation and blank lines are skipped,
/// so a row can't start with a path cell.
impl FromStr for Grid {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows = s
            .lines()
            .map(|line| line.trim_start().trim_end_matches('\r'))
            .filter(|line| !line.is_empty())
            .map(|line| {
                line.chars()
                    .map(CellType::try_from)
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|row| row.len() != width) {
            return Err(MazeError::InvalidDimensions {
                width: width as i32,
                height: height as i32,
            });
        }

        let mut grid = Grid::new(width, height)?;
        for (y, row) in rows.into_iter().enumerate() {
            for (x, kind) in row.into_iter().enumerate() {
                grid.set(kind, Dims(x as i32, y as i32))?;
            }
        }

        Ok(grid)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.cells.rows().enumerate() {
            if y > 0 {
                writeln!(f)?;
            }
            for kind in row {
                write!(f, "{}", kind.to_char())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_indented_text() {
        let grid: Grid = "
            #####
            #S F#
            #.###
        "
        .parse()
        .unwrap();

        assert_eq!(grid.size(), Dims(5, 3));
        assert_eq!(grid.start(), Some(Dims(1, 1)));
        assert_eq!(grid.finish(), Some(Dims(3, 1)));
        assert_eq!(grid.get(Dims(2, 1)), Some(CellType::Path));
        assert_eq!(grid.get(Dims(1, 2)), Some(CellType::InvisibleWall));
        assert_eq!(grid.to_string(), "#####\n#S F#\n#.###");
    }

    #[test]
    fn rejects_bad_text() {
        assert_eq!(
            "##\n#x".parse::<Grid>(),
            Err(MazeError::InvalidType("x".to_owned()))
        );
        assert_eq!(
            "###\n##".parse::<Grid>(),
            Err(MazeError::InvalidDimensions {
                width: 3,
                height: 2
            })
        );
        assert_eq!(
            "".parse::<Grid>(),
            Err(MazeError::InvalidDimensions {
                width: 0,
                height: 0
            })
        );
    }
}

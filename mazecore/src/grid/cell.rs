use std::{fmt, str::FromStr};

use crate::error::MazeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellType {
    #[default]
    Wall,
    Path,
    /// Acts like [`CellType::Wall`], only renderers tell them apart.
    InvisibleWall,
    Start,
    Finish,
}

impl CellType {
    pub const ALL: [CellType; 5] = [
        CellType::Wall,
        CellType::Path,
        CellType::InvisibleWall,
        CellType::Start,
        CellType::Finish,
    ];

    pub fn is_traversable(self) -> bool {
        matches!(self, CellType::Path | CellType::Start | CellType::Finish)
    }

    pub fn to_char(self) -> char {
        match self {
            CellType::Wall => '#',
            CellType::Path => ' ',
            CellType::InvisibleWall => '.',
            CellType::Start => 'S',
            CellType::Finish => 'F',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CellType::Wall => "wall",
            CellType::Path => "path",
            CellType::InvisibleWall => "invisible_wall",
            CellType::Start => "start",
            CellType::Finish => "finish",
        }
    }
}

impl TryFrom<char> for CellType {
    type Error = MazeError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            '#' => Ok(CellType::Wall),
            ' ' => Ok(CellType::Path),
            '.' => Ok(CellType::InvisibleWall),
            'S' => Ok(CellType::Start),
            'F' => Ok(CellType::Finish),
            _ => Err(MazeError::InvalidType(c.to_string())),
        }
    }
}

impl FromStr for CellType {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        CellType::ALL
            .into_iter()
            .find(|kind| kind.name() == normalized)
            .ok_or_else(|| MazeError::InvalidType(s.to_owned()))
    }
}

impl fmt::Display for CellType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

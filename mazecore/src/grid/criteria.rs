use std::str::FromStr;

use crate::error::MazeError;

use super::CellType;

/// One predicate of a cell query. A query is a slice of these, all of which must hold.
///
/// Bounds are inclusive. Leaving out [`Criterion::Type`] matches any type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criterion {
    Type(CellType),
    XMin(i32),
    XMax(i32),
    YMin(i32),
    YMax(i32),
    Traversable(bool),
}

impl Criterion {
    /// Parses a comma separated list such as `type=wall, x_min=1, traversable=false`.
    ///
    /// `type=any` is accepted and adds no predicate.
    pub fn parse_list(s: &str) -> Result<Vec<Criterion>, MazeError> {
        s.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .filter(|part| !is_any_type(part))
            .map(str::parse)
            .collect()
    }
}

fn is_any_type(part: &str) -> bool {
    part.split_once('=')
        .is_some_and(|(k, v)| k.trim() == "type" && v.trim().eq_ignore_ascii_case("any"))
}

/// Parses one `key=value` predicate.
///
/// `type=any` stands for no predicate at all, so it is an [`MazeError::InvalidType`] here and
/// only accepted by [`Criterion::parse_list`].
impl FromStr for Criterion {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || MazeError::UnknownCriterion(s.to_owned());

        let (key, value) = s.split_once('=').ok_or_else(unknown)?;
        let (key, value) = (key.trim(), value.trim());
        let bound = || value.parse::<i32>().map_err(|_| unknown());

        Ok(match key {
            "type" => Criterion::Type(value.parse()?),
            "x_min" => Criterion::XMin(bound()?),
            "x_max" => Criterion::XMax(bound()?),
            "y_min" => Criterion::YMin(bound()?),
            "y_max" => Criterion::YMax(bound()?),
            "traversable" => Criterion::Traversable(value.parse().map_err(|_| unknown())?),
            _ => return Err(unknown()),
        })
    }
}

//! The board every other part of the crate works on.
//!
//! A [`Grid`] is a dense `width x height` matrix of [`CellType`]s together with the recorded
//! start and finish positions. It answers geometric queries (edges, corners, lines) and
//! type predicates ([`Criterion`]).

pub mod cell;
pub mod criteria;
mod ser;

use rand::{seq::SliceRandom as _, Rng};
use smallvec::SmallVec;

use crate::{
    array::Array2D,
    dims::Dims,
    error::{MazeError, Result},
};
pub use cell::CellType;
pub use criteria::Criterion;

/// Number of uniform samples [`Grid::random_cell`] draws before scanning the region.
pub const RANDOM_CELL_ATTEMPTS: usize = 100;

/// Orthogonal or diagonal neighbours of a cell, there are never more than four.
pub type Neighbors = SmallVec<[Dims; 4]>;

const EDGE_OFFSETS: [Dims; 4] = [Dims(0, -1), Dims(-1, 0), Dims(1, 0), Dims(0, 1)];
const CORNER_OFFSETS: [Dims; 4] = [Dims(-1, -1), Dims(1, -1), Dims(-1, 1), Dims(1, 1)];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Array2D<CellType>,
    start: Option<Dims>,
    finish: Option<Dims>,
}

impl Grid {
    /// Creates a board full of walls.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 || width > i32::MAX as usize || height > i32::MAX as usize {
            return Err(MazeError::InvalidDimensions {
                width: width.min(i32::MAX as usize) as i32,
                height: height.min(i32::MAX as usize) as i32,
            });
        }

        Ok(Grid {
            cells: Array2D::new(CellType::Wall, width, height),
            start: None,
            finish: None,
        })
    }

    pub fn size(&self) -> Dims {
        self.cells.size()
    }

    pub fn width(&self) -> usize {
        self.cells.width()
    }

    pub fn height(&self) -> usize {
        self.cells.height()
    }

    pub fn start(&self) -> Option<Dims> {
        self.start
    }

    pub fn finish(&self) -> Option<Dims> {
        self.finish
    }

    pub fn is_in_bounds(&self, cell: Dims) -> bool {
        self.cells.dim_to_idx(cell).is_some()
    }

    pub fn check_bounds(&self, cell: Dims) -> Result<()> {
        if self.is_in_bounds(cell) {
            Ok(())
        } else {
            Err(MazeError::OutOfBounds(cell))
        }
    }

    /// Type of the cell, `None` when it's off the board.
    pub fn get(&self, cell: Dims) -> Option<CellType> {
        self.cells.get(cell).copied()
    }

    pub fn cell_type(&self, cell: Dims) -> Result<CellType> {
        self.get(cell).ok_or(MazeError::OutOfBounds(cell))
    }

    /// Off-board cells are never traversable.
    pub fn is_traversable(&self, cell: Dims) -> bool {
        self.get(cell).is_some_and(CellType::is_traversable)
    }

    /// Overwrites the type of the cell.
    ///
    /// Setting [`CellType::Start`] or [`CellType::Finish`] moves the recorded position, the
    /// previous cell keeps its type. Overwriting the recorded start or finish cell with any
    /// other type forgets the recorded position.
    pub fn set(&mut self, kind: CellType, cell: Dims) -> Result<&mut Self> {
        let slot = self.cells.get_mut(cell).ok_or(MazeError::OutOfBounds(cell))?;
        *slot = kind;

        match kind {
            CellType::Start => self.start = Some(cell),
            CellType::Finish => self.finish = Some(cell),
            _ => {}
        }
        if kind != CellType::Start && self.start == Some(cell) {
            self.start = None;
        }
        if kind != CellType::Finish && self.finish == Some(cell) {
            self.finish = None;
        }

        Ok(self)
    }

    /// On-board orthogonal neighbours, in the order up, left, right, down.
    pub fn edges_of(&self, cell: Dims) -> Neighbors {
        self.offset_cells(cell, &EDGE_OFFSETS)
    }

    /// On-board diagonal neighbours, in the order upper-left, upper-right, lower-left,
    /// lower-right.
    pub fn corners_of(&self, cell: Dims) -> Neighbors {
        self.offset_cells(cell, &CORNER_OFFSETS)
    }

    fn offset_cells(&self, cell: Dims, offsets: &[Dims]) -> Neighbors {
        offsets
            .iter()
            .map(|&off| cell + off)
            .filter(|&pos| self.is_in_bounds(pos))
            .collect()
    }

    /// Edges both cells have in common.
    pub fn shared_edges(&self, a: Dims, b: Dims) -> Neighbors {
        let of_b = self.edges_of(b);
        self.edges_of(a)
            .into_iter()
            .filter(|edge| of_b.contains(edge))
            .collect()
    }

    /// Projects the step from `from` to `to` once more, `from + 2 * (to - from)`.
    ///
    /// The result may lie off the board.
    pub fn cell_line(&self, from: Dims, to: Dims) -> Dims {
        from + (to - from) * 2
    }

    /// Checks that every criterion holds for the cell.
    pub fn is(&self, cell: Dims, criteria: &[Criterion]) -> Result<bool> {
        let kind = self.cell_type(cell)?;
        let Dims(x, y) = cell;

        Ok(criteria.iter().all(|criterion| match *criterion {
            Criterion::Type(t) => kind == t,
            Criterion::XMin(min) => min <= x,
            Criterion::XMax(max) => x <= max,
            Criterion::YMin(min) => min <= y,
            Criterion::YMax(max) => y <= max,
            Criterion::Traversable(t) => kind.is_traversable() == t,
        }))
    }

    /// Picks a uniformly random cell satisfying the criteria.
    ///
    /// Draws up to [`RANDOM_CELL_ATTEMPTS`] samples from the bounded region first. If all of
    /// them miss, the region is scanned once and one of the matching cells is chosen, so the
    /// call only fails when nothing matches.
    pub fn random_cell<R: Rng + ?Sized>(
        &self,
        criteria: &[Criterion],
        rng: &mut R,
    ) -> Result<Dims> {
        let (from, to) = self.criteria_bounds(criteria);
        if from.0 > to.0 || from.1 > to.1 {
            return Err(MazeError::Unsatisfiable { attempts: 0 });
        }

        for _ in 0..RANDOM_CELL_ATTEMPTS {
            let cell = Dims(rng.gen_range(from.0..=to.0), rng.gen_range(from.1..=to.1));
            if self.is(cell, criteria)? {
                return Ok(cell);
            }
        }

        log::debug!(
            "random_cell: {} samples missed {:?}, scanning the region",
            RANDOM_CELL_ATTEMPTS,
            criteria
        );

        let matching = Dims::iter_fill(from, to + Dims(1, 1))
            .filter(|&cell| self.is(cell, criteria).unwrap_or(false))
            .collect::<Vec<_>>();

        matching
            .choose(rng)
            .copied()
            .ok_or(MazeError::Unsatisfiable {
                attempts: RANDOM_CELL_ATTEMPTS,
            })
    }

    /// Inclusive corners of the region the bounds in `criteria` describe, clamped to the board.
    fn criteria_bounds(&self, criteria: &[Criterion]) -> (Dims, Dims) {
        let mut from = Dims::ZERO;
        let mut to = self.size() - Dims(1, 1);

        for criterion in criteria {
            match *criterion {
                Criterion::XMin(min) => from.0 = from.0.max(min),
                Criterion::XMax(max) => to.0 = to.0.min(max),
                Criterion::YMin(min) => from.1 = from.1.max(min),
                Criterion::YMax(max) => to.1 = to.1.min(max),
                Criterion::Type(_) | Criterion::Traversable(_) => {}
            }
        }

        (from, to)
    }

    /// Every position on the board, row by row. Call again to restart.
    pub fn each_cell(&self) -> impl Iterator<Item = Dims> + Clone {
        self.cells.iter_pos()
    }

    pub fn cells_matching<'a>(
        &'a self,
        criteria: &'a [Criterion],
    ) -> impl Iterator<Item = Dims> + 'a {
        self.each_cell()
            .filter(move |&cell| self.is(cell, criteria).unwrap_or(false))
    }

    /// Copy of the whole type matrix, indexed `[y][x]`.
    pub fn to_raw_arrays(&self) -> Vec<Vec<CellType>> {
        self.cells.to_rows()
    }

    /// Criteria selecting cells of `kind` that are not on the outermost ring.
    pub fn interior_criteria(&self, kind: CellType) -> [Criterion; 5] {
        let Dims(w, h) = self.size();
        [
            Criterion::Type(kind),
            Criterion::XMin(1),
            Criterion::XMax(w - 2),
            Criterion::YMin(1),
            Criterion::YMax(h - 2),
        ]
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;

    use super::*;
    use crate::generator::Random;

    fn grid(s: &str) -> Grid {
        s.parse().unwrap()
    }

    #[test]
    fn new_grid_is_all_walls() {
        let g = Grid::new(4, 3).unwrap();
        assert_eq!(g.size(), Dims(4, 3));
        assert!(g.each_cell().all(|c| g.get(c) == Some(CellType::Wall)));
        assert_eq!(g.start(), None);
        assert_eq!(g.finish(), None);

        assert_eq!(
            Grid::new(0, 3),
            Err(MazeError::InvalidDimensions {
                width: 0,
                height: 3
            })
        );
    }

    #[test]
    fn set_then_type_round_trips() {
        let mut g = Grid::new(3, 3).unwrap();
        for kind in CellType::ALL {
            g.set(kind, Dims(1, 2)).unwrap();
            assert_eq!(g.cell_type(Dims(1, 2)), Ok(kind));
        }
    }

    #[test]
    fn set_records_start_and_finish() {
        let mut g = Grid::new(5, 5).unwrap();
        g.set(CellType::Start, Dims(1, 1))
            .unwrap()
            .set(CellType::Finish, Dims(3, 3))
            .unwrap();
        assert_eq!(g.start(), Some(Dims(1, 1)));
        assert_eq!(g.finish(), Some(Dims(3, 3)));

        // only the last one is tracked
        g.set(CellType::Start, Dims(2, 1)).unwrap();
        assert_eq!(g.start(), Some(Dims(2, 1)));
        assert_eq!(g.get(Dims(1, 1)), Some(CellType::Start));

        g.set(CellType::Path, Dims(3, 3)).unwrap();
        assert_eq!(g.finish(), None);
    }

    #[test]
    fn out_of_bounds_access() {
        let mut g = Grid::new(3, 3).unwrap();
        assert_eq!(g.cell_type(Dims(3, 0)), Err(MazeError::OutOfBounds(Dims(3, 0))));
        assert_eq!(
            g.set(CellType::Path, Dims(0, -1)).map(|_| ()),
            Err(MazeError::OutOfBounds(Dims(0, -1)))
        );
        assert_eq!(
            g.is(Dims(-1, -1), &[]),
            Err(MazeError::OutOfBounds(Dims(-1, -1)))
        );
    }

    #[test]
    fn edges_and_corners() {
        let g = Grid::new(3, 3).unwrap();
        assert_eq!(
            g.edges_of(Dims(1, 1)).as_slice(),
            &[Dims(1, 0), Dims(0, 1), Dims(2, 1), Dims(1, 2)]
        );
        assert_eq!(g.edges_of(Dims(0, 0)).as_slice(), &[Dims(1, 0), Dims(0, 1)]);
        assert_eq!(
            g.corners_of(Dims(1, 1)).as_slice(),
            &[Dims(0, 0), Dims(2, 0), Dims(0, 2), Dims(2, 2)]
        );
        assert_eq!(g.corners_of(Dims(2, 0)).as_slice(), &[Dims(1, 1)]);
    }

    #[test]
    fn shared_edges_and_lines() {
        let g = Grid::new(4, 4).unwrap();
        assert_eq!(
            g.shared_edges(Dims(1, 1), Dims(2, 2)).as_slice(),
            &[Dims(2, 1), Dims(1, 2)]
        );
        assert!(g.shared_edges(Dims(0, 0), Dims(3, 3)).is_empty());

        assert_eq!(g.cell_line(Dims(1, 1), Dims(2, 1)), Dims(3, 1));
        assert_eq!(g.cell_line(Dims(1, 1), Dims(1, 0)), Dims(1, -1));
    }

    #[test]
    fn criteria_are_conjunctive() {
        let g = grid(
            "###
             #S#
             ###",
        );
        let center = Dims(1, 1);
        assert_eq!(g.is(center, &[]), Ok(true));
        assert_eq!(g.is(center, &[Criterion::Traversable(true)]), Ok(true));
        assert_eq!(g.is(center, &[Criterion::Type(CellType::Path)]), Ok(false));
        assert_eq!(
            g.is(center, &[Criterion::XMin(1), Criterion::XMax(1), Criterion::YMin(1)]),
            Ok(true)
        );
        assert_eq!(g.is(center, &[Criterion::XMin(1), Criterion::YMax(0)]), Ok(false));
        assert_eq!(g.is(Dims(0, 0), &[Criterion::Traversable(false)]), Ok(true));
    }

    #[test]
    fn random_cell_respects_criteria() {
        let g = grid(
            "######
             #    #
             #    #
             ######",
        );
        let mut rng = Random::seed_from_u64(7);
        let criteria = [
            Criterion::Type(CellType::Path),
            Criterion::XMin(2),
            Criterion::XMax(3),
        ];
        for _ in 0..200 {
            let cell = g.random_cell(&criteria, &mut rng).unwrap();
            assert!((2..=3).contains(&cell.0));
            assert!((1..=2).contains(&cell.1));
        }
    }

    #[test]
    fn random_cell_finds_needles() {
        let mut g = Grid::new(60, 60).unwrap();
        g.set(CellType::Path, Dims(42, 17)).unwrap();
        let mut rng = Random::seed_from_u64(1);
        assert_eq!(
            g.random_cell(&[Criterion::Type(CellType::Path)], &mut rng),
            Ok(Dims(42, 17))
        );
    }

    #[test]
    fn random_cell_unsatisfiable() {
        let g = Grid::new(5, 5).unwrap();
        let mut rng = Random::seed_from_u64(3);
        assert_eq!(
            g.random_cell(&[Criterion::Type(CellType::Finish)], &mut rng),
            Err(MazeError::Unsatisfiable {
                attempts: RANDOM_CELL_ATTEMPTS
            })
        );
        assert_eq!(
            g.random_cell(&[Criterion::XMin(4), Criterion::XMax(2)], &mut rng),
            Err(MazeError::Unsatisfiable { attempts: 0 })
        );
    }

    #[test]
    fn each_cell_restarts() {
        let g = Grid::new(2, 2).unwrap();
        let cells = g.each_cell();
        assert_eq!(cells.clone().count(), 4);
        assert_eq!(
            cells.collect::<Vec<_>>(),
            vec![Dims(0, 0), Dims(1, 0), Dims(0, 1), Dims(1, 1)]
        );
        assert_eq!(g.each_cell().count(), 4);
    }

    #[test]
    fn raw_arrays_are_a_snapshot() {
        let mut g = grid(
            "#S
             F#",
        );
        let mut raw = g.to_raw_arrays();
        assert_eq!(
            raw,
            vec![
                vec![CellType::Wall, CellType::Start],
                vec![CellType::Finish, CellType::Wall]
            ]
        );

        raw[0][0] = CellType::Path;
        assert_eq!(g.get(Dims(0, 0)), Some(CellType::Wall));

        g.set(CellType::Path, Dims(0, 0)).unwrap();
        assert_eq!(raw[1][1], CellType::Wall);
    }

    #[test]
    fn cells_matching_filters() {
        let g = grid(
            "#####
             #S F#
             #####",
        );
        let traversable = [Criterion::Traversable(true)];
        assert_eq!(
            g.cells_matching(&traversable).collect::<Vec<_>>(),
            vec![Dims(1, 1), Dims(2, 1), Dims(3, 1)]
        );
    }
}

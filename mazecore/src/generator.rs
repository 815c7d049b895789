//! Randomized backtracking maze generator.
//!
//! Paving starts from a random interior cell and turns walls into paths depth-first. A wall
//! is only paved when it keeps the maze free of diagonal-only connections and of open 2x2
//! blocks, and the outermost ring is never touched.

use hashbrown::HashSet;
use rand::{seq::SliceRandom as _, thread_rng, Rng, SeedableRng as _};

use crate::{
    dims::Dims,
    error::{MazeError, Result},
    grid::{CellType, Criterion, Grid, Neighbors},
};

/// Random number generator used wherever results have to be reproducible.
pub type Random = rand_xoshiro::Xoshiro256StarStar;

/// What the paving callback gets to see.
#[derive(Debug, Clone, Copy)]
pub struct PavingState<'a> {
    grid: &'a Grid,
    explored: &'a [Dims],
}

impl<'a> PavingState<'a> {
    pub fn grid(&self) -> &'a Grid {
        self.grid
    }

    /// Paved cells in the order they were paved, the first one is the origin.
    pub fn explored(&self) -> &'a [Dims] {
        self.explored
    }

    pub fn origin(&self) -> Option<Dims> {
        self.explored.first().copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Generator {
    width: usize,
    height: usize,
}

impl Generator {
    /// The board needs at least two interior cells, so that start and finish can differ.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        let interior = width.saturating_sub(2) * height.saturating_sub(2);
        if width < 3 || height < 3 || interior < 2 {
            return Err(MazeError::InvalidDimensions {
                width: width.min(i32::MAX as usize) as i32,
                height: height.min(i32::MAX as usize) as i32,
            });
        }

        // validates the upper bound
        Grid::new(width, height)?;

        Ok(Self { width, height })
    }

    pub fn size(&self) -> Dims {
        Dims(self.width as i32, self.height as i32)
    }

    /// Seeded generator, or a randomly seeded one when `seed` is `None`.
    pub fn rng(seed: Option<u64>) -> Random {
        Random::seed_from_u64(seed.unwrap_or_else(|| thread_rng().gen()))
    }

    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Grid> {
        self.generate_with(rng, |_, _| {})
    }

    /// Generates the maze, calling `on_pave` right after each cell becomes a path.
    pub fn generate_with<R, F>(&self, rng: &mut R, on_pave: F) -> Result<Grid>
    where
        R: Rng + ?Sized,
        F: FnMut(Dims, &PavingState<'_>),
    {
        let grid = Grid::new(self.width, self.height)?;
        let interior = grid.interior_criteria(CellType::Wall);
        let origin = grid.random_cell(&interior, rng)?;

        let mut paver = Paver {
            grid,
            interior,
            explored: Vec::new(),
            seen: HashSet::new(),
            on_pave,
        };
        paver.pave_from(origin, rng)?;

        let Paver {
            mut grid, explored, ..
        } = paver;

        let finish = explored[1..]
            .choose(rng)
            .copied()
            .ok_or(MazeError::InvalidDimensions {
                width: self.width as i32,
                height: self.height as i32,
            })?;

        grid.set(CellType::Start, origin)?
            .set(CellType::Finish, finish)?;

        log::debug!(
            "paved {} cells of a {}x{} board, start {:?}, finish {:?}",
            explored.len(),
            self.width,
            self.height,
            origin,
            finish
        );

        Ok(grid)
    }
}

struct Paver<F> {
    grid: Grid,
    interior: [Criterion; 5],
    explored: Vec<Dims>,
    seen: HashSet<Dims>,
    on_pave: F,
}

impl<F> Paver<F>
where
    F: FnMut(Dims, &PavingState<'_>),
{
    /// Depth-first paving with an explicit stack of (cell, edges left to try) frames.
    fn pave_from<R: Rng + ?Sized>(&mut self, origin: Dims, rng: &mut R) -> Result<()> {
        self.pave(origin)?;
        let mut stack = vec![(origin, self.shuffled_edges(origin, rng))];

        while let Some(frame) = stack.last_mut() {
            let from = frame.0;
            let Some(edge) = frame.1.pop() else {
                stack.pop();
                continue;
            };

            if self.can_pave(from, edge)? {
                self.pave(edge)?;
                stack.push((edge, self.shuffled_edges(edge, rng)));
            }
        }

        Ok(())
    }

    fn pave(&mut self, cell: Dims) -> Result<()> {
        self.grid.set(CellType::Path, cell)?;
        self.explored.push(cell);
        self.seen.insert(cell);

        let state = PavingState {
            grid: &self.grid,
            explored: &self.explored,
        };
        (self.on_pave)(cell, &state);
        Ok(())
    }

    fn shuffled_edges<R: Rng + ?Sized>(&self, cell: Dims, rng: &mut R) -> Neighbors {
        let mut edges = self.grid.edges_of(cell);
        edges.shuffle(rng);
        edges
    }

    fn can_pave(&self, from: Dims, cell: Dims) -> Result<bool> {
        if self.seen.contains(&cell) || !self.grid.is(cell, &self.interior)? {
            return Ok(false);
        }

        let beyond = self.grid.cell_line(from, cell);
        if self.grid.get(beyond).is_some_and(|kind| kind != CellType::Wall) {
            return Ok(false);
        }

        Ok(self.no_problem_corners(cell))
    }

    /// Every diagonal neighbour has to be a wall, or a path sharing exactly one path edge
    /// with `cell`. Zero shared paths would connect them only through the corner, two would
    /// open a 2x2 block.
    fn no_problem_corners(&self, cell: Dims) -> bool {
        self.grid
            .corners_of(cell)
            .into_iter()
            .all(|corner| match self.grid.get(corner) {
                Some(CellType::Wall) => true,
                Some(CellType::Path) => {
                    let shared_paths = self
                        .grid
                        .shared_edges(cell, corner)
                        .into_iter()
                        .filter(|&edge| self.grid.get(edge) == Some(CellType::Path))
                        .count();
                    shared_paths == 1
                }
                _ => false,
            })
    }
}

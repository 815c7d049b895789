//! Traversal strategies over a [`Grid`] sharing one contract.
//!
//! A [`Search`] is bound to a grid, a start and a finish. Every run starts with fresh state,
//! reports each visited cell (or layer, for chunked breadth-first) to the `on_visit` hook,
//! reports the final path cell by cell to the `on_build_path` hook and returns a
//! [`SearchReport`]. Hooks only get a read-only [`SearchSnapshot`] of the run.

mod best_first;
mod breadth_first;
mod depth_first;

use std::{collections::VecDeque, fmt, slice, str::FromStr};

use hashbrown::{HashMap, HashSet};
use thiserror::Error;

use crate::{
    dims::Dims,
    error::Result,
    grid::{Grid, Neighbors},
    heap::MinHeap,
};
pub use best_first::BestFirst;
pub use breadth_first::BreadthFirst;
pub use depth_first::{DepthFirst, RecursiveDepthFirst};

/// What a single `on_visit` call reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit<'a> {
    Cell(Dims),
    /// All cells of one breadth-first depth level that were processed.
    Layer(&'a [Dims]),
}

impl Visit<'_> {
    pub fn cells(&self) -> &[Dims] {
        match self {
            Visit::Cell(cell) => slice::from_ref(cell),
            Visit::Layer(cells) => cells,
        }
    }
}

/// Collections a strategy keeps its pending cells in.
pub trait Frontier {
    fn frontier_cells(&self) -> Vec<Dims>;
}

impl Frontier for VecDeque<Dims> {
    fn frontier_cells(&self) -> Vec<Dims> {
        self.iter().copied().collect()
    }
}

impl Frontier for MinHeap<Dims> {
    fn frontier_cells(&self) -> Vec<Dims> {
        self.iter().copied().collect()
    }
}

/// Depth-first stack of (cell, candidates left to try) frames.
impl Frontier for Vec<(Dims, Neighbors)> {
    fn frontier_cells(&self) -> Vec<Dims> {
        self.iter()
            .flat_map(|(_, remaining)| remaining.iter().copied())
            .collect()
    }
}

pub type VisitHook<'cb> = Box<dyn FnMut(Visit<'_>, &SearchSnapshot<'_>) + 'cb>;
pub type BuildPathHook<'cb> = Box<dyn FnMut(Dims, &SearchSnapshot<'_>) + 'cb>;

struct Hooks<'cb> {
    on_visit: VisitHook<'cb>,
    on_build_path: BuildPathHook<'cb>,
}

#[derive(Debug, Default)]
struct SearchState {
    explored: Vec<Dims>,
    explored_set: HashSet<Dims>,
    /// The start maps to itself.
    came_from: HashMap<Dims, Dims>,
    success_path: Vec<Dims>,
    failed_paths: Vec<Vec<Dims>>,
}

fn trace(came_from: &HashMap<Dims, Dims>, cell: Dims) -> Vec<Dims> {
    let mut path = Vec::new();
    let mut current = cell;
    while let Some(&prev) = came_from.get(&current) {
        path.push(current);
        if prev == current {
            break;
        }
        current = prev;
    }
    path.reverse();
    path
}

/// Read-only view of a running search, handed to the hooks.
pub struct SearchSnapshot<'a> {
    grid: &'a Grid,
    start: Dims,
    finish: Dims,
    state: &'a SearchState,
    frontier: &'a dyn Frontier,
}

impl<'a> SearchSnapshot<'a> {
    pub fn grid(&self) -> &'a Grid {
        self.grid
    }

    pub fn start(&self) -> Dims {
        self.start
    }

    pub fn finish(&self) -> Dims {
        self.finish
    }

    /// Processed cells in visiting order.
    pub fn explored(&self) -> &'a [Dims] {
        &self.state.explored
    }

    pub fn is_explored(&self, cell: Dims) -> bool {
        self.state.explored_set.contains(&cell)
    }

    pub fn came_from(&self, cell: Dims) -> Option<Dims> {
        self.state.came_from.get(&cell).copied()
    }

    /// Cells waiting to be processed.
    pub fn frontier(&self) -> Vec<Dims> {
        let mut cells = self.frontier.frontier_cells();
        cells.retain(|cell| !self.is_explored(*cell));
        cells
    }

    pub fn success_path(&self) -> &'a [Dims] {
        &self.state.success_path
    }

    pub fn failed_paths(&self) -> &'a [Vec<Dims>] {
        &self.state.failed_paths
    }
}

/// State of one run, driven by a [`Traversal`].
pub struct SearchRun<'a, 'cb> {
    grid: &'a Grid,
    start: Dims,
    finish: Dims,
    state: SearchState,
    hooks: &'a mut Hooks<'cb>,
}

impl SearchRun<'_, '_> {
    pub fn start(&self) -> Dims {
        self.start
    }

    pub fn finish(&self) -> Dims {
        self.finish
    }

    pub fn is_explored(&self, cell: Dims) -> bool {
        self.state.explored_set.contains(&cell)
    }

    pub fn is_discovered(&self, cell: Dims) -> bool {
        self.state.came_from.contains_key(&cell)
    }

    pub fn mark_explored(&mut self, cell: Dims) {
        if self.state.explored_set.insert(cell) {
            self.state.explored.push(cell);
        }
    }

    /// Records how `cell` was reached, the first record wins.
    pub fn discover(&mut self, cell: Dims, from: Dims) {
        self.state.came_from.entry(cell).or_insert(from);
    }

    /// Traversable edges of `cell` that were not explored yet.
    pub fn candidates(&self, cell: Dims) -> Neighbors {
        self.traversable_edges(cell, |edge| !self.is_explored(edge))
    }

    /// Traversable edges of `cell` nobody reached yet.
    pub fn undiscovered(&self, cell: Dims) -> Neighbors {
        self.traversable_edges(cell, |edge| !self.is_discovered(edge))
    }

    fn traversable_edges(&self, cell: Dims, keep: impl Fn(Dims) -> bool) -> Neighbors {
        self.grid
            .edges_of(cell)
            .into_iter()
            .filter(|&edge| self.grid.is_traversable(edge) && keep(edge))
            .collect()
    }

    /// Path from the start to `cell` following the recorded predecessors.
    pub fn trace_to(&self, cell: Dims) -> Vec<Dims> {
        trace(&self.state.came_from, cell)
    }

    /// Discovers the undiscovered edges of `current` and hands them to `push`. A cell without
    /// any closes off a failed path.
    pub fn expand(&mut self, current: Dims, mut push: impl FnMut(Dims)) {
        let edges = self.undiscovered(current);
        if edges.is_empty() {
            let path = self.trace_to(current);
            self.close_failed(path);
        }

        for edge in edges {
            self.discover(edge, current);
            push(edge);
        }
    }

    pub fn visit(&mut self, visit: Visit<'_>, frontier: &dyn Frontier) {
        let snapshot = SearchSnapshot {
            grid: self.grid,
            start: self.start,
            finish: self.finish,
            state: &self.state,
            frontier,
        };
        (self.hooks.on_visit)(visit, &snapshot);
    }

    pub fn close_failed(&mut self, path: Vec<Dims>) {
        self.state.failed_paths.push(path);
    }

    /// Stores the success path and reports it cell by cell, start first.
    pub fn close_success(&mut self, path: Vec<Dims>, frontier: &dyn Frontier) {
        self.state.success_path = path;

        for i in 0..self.state.success_path.len() {
            let cell = self.state.success_path[i];
            let snapshot = SearchSnapshot {
                grid: self.grid,
                start: self.start,
                finish: self.finish,
                state: &self.state,
                frontier,
            };
            (self.hooks.on_build_path)(cell, &snapshot);
        }
    }
}

/// A way of walking the grid from start to finish.
pub trait Traversal: fmt::Debug {
    fn traverse(&self, run: &mut SearchRun<'_, '_>);
}

/// Result of one run. An empty success path means the finish can't be reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchReport {
    start: Dims,
    finish: Dims,
    explored: Vec<Dims>,
    came_from: HashMap<Dims, Dims>,
    success_path: Vec<Dims>,
    failed_paths: Vec<Vec<Dims>>,
}

impl SearchReport {
    pub fn start(&self) -> Dims {
        self.start
    }

    pub fn finish(&self) -> Dims {
        self.finish
    }

    pub fn explored(&self) -> &[Dims] {
        &self.explored
    }

    pub fn success_path(&self) -> &[Dims] {
        &self.success_path
    }

    pub fn failed_paths(&self) -> &[Vec<Dims>] {
        &self.failed_paths
    }

    /// Failed paths followed by the success path, which always closes a run.
    pub fn all_paths(&self) -> Vec<&[Dims]> {
        let mut paths: Vec<&[Dims]> = self.failed_paths.iter().map(Vec::as_slice).collect();
        if !self.success_path.is_empty() {
            paths.push(&self.success_path);
        }
        paths
    }

    pub fn found(&self) -> bool {
        !self.success_path.is_empty()
    }

    /// Whether the run discovered the cell.
    pub fn reached(&self, cell: Dims) -> bool {
        self.came_from.contains_key(&cell)
    }

    /// How the run got from the start to `cell`, empty if it never reached it.
    pub fn path_to(&self, cell: Dims) -> Vec<Dims> {
        trace(&self.came_from, cell)
    }
}

/// The built-in traversals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Strategy {
    #[default]
    BreadthFirst,
    BreadthFirstChunked,
    DepthFirst,
    RecursiveDepthFirst,
    BestFirst,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown search strategy {0:?}")]
pub struct UnknownStrategy(pub String);

impl Strategy {
    pub const ALL: [Strategy; 5] = [
        Strategy::BreadthFirst,
        Strategy::BreadthFirstChunked,
        Strategy::DepthFirst,
        Strategy::RecursiveDepthFirst,
        Strategy::BestFirst,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Strategy::BreadthFirst => "bfs",
            Strategy::BreadthFirstChunked => "bfs-chunked",
            Strategy::DepthFirst => "dfs",
            Strategy::RecursiveDepthFirst => "recursive-dfs",
            Strategy::BestFirst => "best-first",
        }
    }

    pub fn traversal(self) -> Box<dyn Traversal> {
        match self {
            Strategy::BreadthFirst => Box::new(BreadthFirst { chunked: false }),
            Strategy::BreadthFirstChunked => Box::new(BreadthFirst { chunked: true }),
            Strategy::DepthFirst => Box::new(DepthFirst),
            Strategy::RecursiveDepthFirst => Box::new(RecursiveDepthFirst),
            Strategy::BestFirst => Box::new(BestFirst),
        }
    }
}

impl FromStr for Strategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "bfs" | "breadth-first" => Ok(Strategy::BreadthFirst),
            "bfs-chunked" | "chunked-bfs" => Ok(Strategy::BreadthFirstChunked),
            "dfs" | "depth-first" => Ok(Strategy::DepthFirst),
            "recursive-dfs" | "rdfs" => Ok(Strategy::RecursiveDepthFirst),
            "best-first" | "best" | "greedy" => Ok(Strategy::BestFirst),
            _ => Err(UnknownStrategy(s.to_owned())),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A search bound to one grid and its endpoints.
pub struct Search<'g, 'cb> {
    grid: &'g Grid,
    start: Dims,
    finish: Dims,
    hooks: Hooks<'cb>,
}

impl<'g, 'cb> Search<'g, 'cb> {
    pub fn new(grid: &'g Grid, start: Dims, finish: Dims) -> Result<Self> {
        grid.check_bounds(start)?;
        grid.check_bounds(finish)?;

        Ok(Self {
            grid,
            start,
            finish,
            hooks: Hooks {
                on_visit: Box::new(|_, _| {}),
                on_build_path: Box::new(|_, _| {}),
            },
        })
    }

    pub fn on_visit(mut self, hook: impl FnMut(Visit<'_>, &SearchSnapshot<'_>) + 'cb) -> Self {
        self.hooks.on_visit = Box::new(hook);
        self
    }

    pub fn on_build_path(mut self, hook: impl FnMut(Dims, &SearchSnapshot<'_>) + 'cb) -> Self {
        self.hooks.on_build_path = Box::new(hook);
        self
    }

    pub fn run(&mut self, traversal: &dyn Traversal) -> SearchReport {
        let mut run = SearchRun {
            grid: self.grid,
            start: self.start,
            finish: self.finish,
            state: SearchState::default(),
            hooks: &mut self.hooks,
        };
        traversal.traverse(&mut run);

        let SearchState {
            explored,
            came_from,
            success_path,
            failed_paths,
            ..
        } = run.state;

        log::debug!(
            "{:?}: explored {} cells, {} dead ends, path of {}",
            traversal,
            explored.len(),
            failed_paths.len(),
            success_path.len()
        );

        SearchReport {
            start: self.start,
            finish: self.finish,
            explored,
            came_from,
            success_path,
            failed_paths,
        }
    }

    pub fn run_strategy(&mut self, strategy: Strategy) -> SearchReport {
        self.run(strategy.traversal().as_ref())
    }

    pub fn breadth_first(&mut self) -> SearchReport {
        self.run(&BreadthFirst { chunked: false })
    }

    pub fn breadth_first_chunked(&mut self) -> SearchReport {
        self.run(&BreadthFirst { chunked: true })
    }

    pub fn depth_first(&mut self) -> SearchReport {
        self.run(&DepthFirst)
    }

    pub fn recursive_depth_first(&mut self) -> SearchReport {
        self.run(&RecursiveDepthFirst)
    }

    pub fn best_first(&mut self) -> SearchReport {
        self.run(&BestFirst)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet as StdHashSet;

    use rand::SeedableRng as _;

    use super::*;
    use crate::{
        error::MazeError,
        generator::{Generator, Random},
    };

    fn run_all(grid: &Grid, start: Dims, finish: Dims) -> Vec<(Strategy, SearchReport)> {
        let mut search = Search::new(grid, start, finish).unwrap();
        Strategy::ALL
            .into_iter()
            .map(|strategy| (strategy, search.run_strategy(strategy)))
            .collect()
    }

    #[test]
    fn every_strategy_solves_generated_mazes() {
        for seed in 0..25 {
            let grid = Generator::new(33, 21)
                .unwrap()
                .generate(&mut Random::seed_from_u64(seed))
                .unwrap();
            let (start, finish) = (grid.start().unwrap(), grid.finish().unwrap());

            let reports = run_all(&grid, start, finish);
            let shortest = reports[0].1.success_path().len();

            for (strategy, report) in &reports {
                let path = report.success_path();
                assert_eq!(path.first(), Some(&start), "{strategy}");
                assert_eq!(path.last(), Some(&finish), "{strategy}");
                assert!(
                    path.windows(2).all(|w| w[0].is_orthogonal_to(w[1])),
                    "{strategy}: {path:?}"
                );
                assert!(path.len() >= shortest, "{strategy}");
                assert_eq!(report.explored().first(), Some(&start));

                let unique: StdHashSet<_> = report.explored().iter().collect();
                assert_eq!(unique.len(), report.explored().len(), "{strategy}");
            }
        }
    }

    #[test]
    fn unreachable_finish_explores_the_whole_component() {
        let grid: Grid = "
            #########
            #S  #   #
            # # # # #
            #   # #F#
            #########
        "
        .parse()
        .unwrap();
        let component: StdHashSet<_> = [
            (1, 1),
            (2, 1),
            (3, 1),
            (1, 2),
            (3, 2),
            (1, 3),
            (2, 3),
            (3, 3),
        ]
        .into_iter()
        .map(Dims::from)
        .collect();

        for (strategy, report) in run_all(&grid, Dims(1, 1), Dims(7, 3)) {
            assert!(!report.found(), "{strategy}");
            assert!(report.success_path().is_empty(), "{strategy}");
            let explored: StdHashSet<_> = report.explored().iter().copied().collect();
            assert_eq!(explored, component, "{strategy}");
            assert_eq!(report.all_paths().len(), report.failed_paths().len());
            assert!(report.path_to(Dims(7, 3)).is_empty());
        }
    }

    #[test]
    fn start_is_finish() {
        let grid: Grid = "###\n#S#\n###".parse().unwrap();
        for (strategy, report) in run_all(&grid, Dims(1, 1), Dims(1, 1)) {
            assert_eq!(report.success_path(), [Dims(1, 1)], "{strategy}");
            assert_eq!(report.explored(), [Dims(1, 1)], "{strategy}");
        }
    }

    #[test]
    fn walled_in_start_is_a_dead_end() {
        let grid: Grid = "#####\n#S#F#\n#####".parse().unwrap();
        for (strategy, report) in run_all(&grid, Dims(1, 1), Dims(3, 1)) {
            assert_eq!(report.failed_paths(), [vec![Dims(1, 1)]], "{strategy}");
            assert_eq!(report.explored(), [Dims(1, 1)], "{strategy}");
        }
    }

    #[test]
    fn invisible_walls_block_like_walls() {
        let grid: Grid = "#####\n#S.F#\n#####".parse().unwrap();
        for (strategy, report) in run_all(&grid, Dims(1, 1), Dims(3, 1)) {
            assert!(!report.found(), "{strategy}");
            assert_eq!(report.explored(), [Dims(1, 1)], "{strategy}");
            assert!(!report.reached(Dims(2, 1)), "{strategy}");
        }

        let grid: Grid = "
            #####
            #S.F#
            #   #
            #####
        "
        .parse()
        .unwrap();
        let detour = [Dims(1, 1), Dims(1, 2), Dims(2, 2), Dims(3, 2), Dims(3, 1)];
        for (strategy, report) in run_all(&grid, Dims(1, 1), Dims(3, 1)) {
            assert_eq!(report.success_path(), detour, "{strategy}");
            assert!(!report.explored().contains(&Dims(2, 1)), "{strategy}");
        }
    }

    #[test]
    fn endpoints_must_be_on_the_board() {
        let grid = Grid::new(4, 4).unwrap();
        assert_eq!(
            Search::new(&grid, Dims(4, 0), Dims(1, 1)).err(),
            Some(MazeError::OutOfBounds(Dims(4, 0)))
        );
        assert_eq!(
            Search::new(&grid, Dims(1, 1), Dims(0, -2)).err(),
            Some(MazeError::OutOfBounds(Dims(0, -2)))
        );
    }

    #[test]
    fn hooks_see_the_success_path_while_it_is_built() {
        let grid: Grid = "#####\n#S F#\n#####".parse().unwrap();
        let mut lens = Vec::new();
        Search::new(&grid, Dims(1, 1), Dims(3, 1))
            .unwrap()
            .on_build_path(|cell, snapshot| {
                assert!(snapshot.success_path().contains(&cell));
                assert_eq!(snapshot.came_from(Dims(1, 1)), Some(Dims(1, 1)));
                lens.push(snapshot.success_path().len());
            })
            .depth_first();
        assert_eq!(lens, vec![3, 3, 3]);
    }

    #[test]
    fn strategy_names() {
        for strategy in Strategy::ALL {
            assert_eq!(strategy.name().parse(), Ok(strategy));
        }
        assert_eq!("Breadth_First".parse(), Ok(Strategy::BreadthFirst));
        assert_eq!(
            "dijkstra".parse::<Strategy>(),
            Err(UnknownStrategy("dijkstra".to_owned()))
        );
    }
}

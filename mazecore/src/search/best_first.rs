use crate::{dims::Dims, heap::MinHeap};

use super::{SearchRun, Traversal, Visit};

/// Greedy search always expanding the pending cell closest to the finish in a straight line.
///
/// Cells at equal distance are expanded in the order they were discovered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BestFirst;

impl BestFirst {
    pub fn heuristic(cell: Dims, finish: Dims) -> f64 {
        cell.euclid_dist(finish)
    }
}

impl Traversal for BestFirst {
    fn traverse(&self, run: &mut SearchRun<'_, '_>) {
        let (start, finish) = (run.start(), run.finish());
        let mut heap = MinHeap::new();
        heap.insert(start, Self::heuristic(start, finish));
        run.discover(start, start);

        while let Some(current) = heap.extract_min() {
            run.mark_explored(current);
            run.visit(Visit::Cell(current), &heap);

            if current == finish {
                let path = run.trace_to(current);
                run.close_success(path, &heap);
                return;
            }

            run.expand(current, |edge| heap.insert(edge, Self::heuristic(edge, finish)));
        }
    }
}

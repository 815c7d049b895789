use std::collections::VecDeque;

use super::{SearchRun, Traversal, Visit};

/// Visits cells in order of their distance from the start.
///
/// With `chunked` set, a whole depth level is reported by one `on_visit` call. The explored
/// cells and the paths are the same either way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BreadthFirst {
    pub chunked: bool,
}

impl Traversal for BreadthFirst {
    fn traverse(&self, run: &mut SearchRun<'_, '_>) {
        if self.chunked {
            by_layer(run)
        } else {
            by_cell(run)
        }
    }
}

fn by_cell(run: &mut SearchRun<'_, '_>) {
    let (start, finish) = (run.start(), run.finish());
    let mut queue = VecDeque::from([start]);
    run.discover(start, start);

    while let Some(current) = queue.pop_front() {
        run.mark_explored(current);
        run.visit(Visit::Cell(current), &queue);

        if current == finish {
            let path = run.trace_to(current);
            run.close_success(path, &queue);
            return;
        }

        run.expand(current, |edge| queue.push_back(edge));
    }
}

fn by_layer(run: &mut SearchRun<'_, '_>) {
    let (start, finish) = (run.start(), run.finish());
    let mut queue = VecDeque::from([start]);
    run.discover(start, start);

    let mut layer = Vec::new();
    while !queue.is_empty() {
        layer.clear();
        let mut found = false;

        for _ in 0..queue.len() {
            let Some(current) = queue.pop_front() else {
                break;
            };

            run.mark_explored(current);
            layer.push(current);

            if current == finish {
                found = true;
                break;
            }

            run.expand(current, |edge| queue.push_back(edge));
        }

        run.visit(Visit::Layer(&layer), &queue);

        if found {
            let path = run.trace_to(finish);
            run.close_success(path, &queue);
            return;
        }
    }
}

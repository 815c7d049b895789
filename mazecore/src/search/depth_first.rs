use crate::{dims::Dims, grid::Neighbors};

use super::{SearchRun, Traversal, Visit};

/// Follows each branch to its end before backtracking, with an explicit stack of
/// (cell, candidates left to try) frames.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DepthFirst;

/// Same visiting order and results as [`DepthFirst`], written as a descent that carries the
/// path walked so far. Suspended calls live in a heap allocated stack, so long branches can't
/// overflow the thread stack.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecursiveDepthFirst;

type Frame = (Dims, Neighbors);

/// Drops candidates a sibling branch explored meanwhile and takes the next one.
fn next_candidate(run: &SearchRun<'_, '_>, remaining: &mut Neighbors) -> Option<Dims> {
    while !remaining.is_empty() {
        let cell = remaining.remove(0);
        if !run.is_explored(cell) {
            return Some(cell);
        }
    }
    None
}

impl Traversal for DepthFirst {
    fn traverse(&self, run: &mut SearchRun<'_, '_>) {
        let (start, finish) = (run.start(), run.finish());
        let mut stack: Vec<Frame> = Vec::new();

        run.discover(start, start);
        run.mark_explored(start);
        run.visit(Visit::Cell(start), &stack);

        if start == finish {
            run.close_success(vec![start], &stack);
            return;
        }

        let edges = run.candidates(start);
        if edges.is_empty() {
            run.close_failed(vec![start]);
        }
        stack.push((start, edges));

        while let Some((parent, remaining)) = stack.last_mut() {
            let parent = *parent;
            let Some(current) = next_candidate(run, remaining) else {
                stack.pop();
                continue;
            };

            run.discover(current, parent);
            run.mark_explored(current);
            run.visit(Visit::Cell(current), &stack);

            let mut path: Vec<_> = stack.iter().map(|(cell, _)| *cell).collect();
            path.push(current);

            if current == finish {
                run.close_success(path, &stack);
                return;
            }

            let edges = run.candidates(current);
            if edges.is_empty() {
                run.close_failed(path);
            }
            stack.push((current, edges));
        }
    }
}

impl Traversal for RecursiveDepthFirst {
    fn traverse(&self, run: &mut SearchRun<'_, '_>) {
        let start = run.start();
        run.discover(start, start);

        let mut frames = Vec::new();
        let mut path = Vec::new();
        descend(run, &mut frames, start, &mut path);
    }
}

/// Runs `descend(cell)` for `current` and everything below it, threading the path walked so
/// far. `frames` is the call stack: each entry is a suspended call with the candidates it has
/// left to try, so depth costs heap memory instead of thread stack.
fn descend(
    run: &mut SearchRun<'_, '_>,
    frames: &mut Vec<Frame>,
    current: Dims,
    path: &mut Vec<Dims>,
) {
    let mut call = Some(current);

    loop {
        if let Some(current) = call.take() {
            path.push(current);
            run.mark_explored(current);
            run.visit(Visit::Cell(current), &*frames);

            if current == run.finish() {
                run.close_success(path.clone(), &*frames);
                return;
            }

            let edges = run.candidates(current);
            if edges.is_empty() {
                run.close_failed(path.clone());
            }
            frames.push((current, edges));
        }

        // resume the innermost suspended call
        let Some((parent, remaining)) = frames.last_mut() else {
            return;
        };
        let parent = *parent;

        match next_candidate(run, remaining) {
            Some(next) => {
                run.discover(next, parent);
                call = Some(next);
            }
            None => {
                frames.pop();
                path.pop();
            }
        }
    }
}

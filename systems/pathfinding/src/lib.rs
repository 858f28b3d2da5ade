#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Incremental A* search over a privately owned, prunable grid.
//!
//! A [`PathSearch`] shadows the dimensions of a map but never reads it
//! directly. Callers describe each cell through a cost closure, and cells that
//! the closure reports as [`CellCost::Pruned`] are removed from this search
//! grid for good. Separate searches therefore accumulate their own knowledge
//! without touching any shared state.

use std::{cmp::Ordering, collections::BinaryHeap};

use chase_core::{Grid, Heuristic, Position};
use tracing::debug;

/// Cost of entering a cell as judged by the owner of the search.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CellCost {
    /// The cell is known to be impassable and must leave the search grid.
    Pruned,
    /// The cell can be entered for the provided terrain cost.
    Enter(f64),
}

/// A* engine with a persistent pruned-cell memory and the most recent path.
#[derive(Clone, Debug)]
pub struct PathSearch {
    nodes: Grid<Node>,
    heuristic: Heuristic,
    path: Vec<Position>,
}

impl PathSearch {
    /// Creates a search grid covering `width × height` cells.
    #[must_use]
    pub fn new(width: u32, height: u32, heuristic: Heuristic) -> Self {
        Self {
            nodes: Grid::new(width, height, Node::default()),
            heuristic,
            path: Vec::new(),
        }
    }

    /// Path produced by the most recent search, source and destination included.
    #[must_use]
    pub fn last_path(&self) -> &[Position] {
        &self.path
    }

    /// Reports whether `position` has been removed from the search grid.
    #[must_use]
    pub fn is_pruned(&self, position: Position) -> bool {
        self.nodes.contains(position) && !self.nodes.valid(position)
    }

    /// Runs a fresh search from `from` to `to` and caches the result.
    ///
    /// `cell_cost` is consulted whenever a neighbour is relaxed. Stepping into
    /// a cell costs the heuristic distance between the two cells plus the
    /// reported terrain cost. The returned path is empty when `to` cannot be
    /// reached through the remaining cells.
    pub fn search<F>(&mut self, from: Position, to: Position, mut cell_cost: F) -> &[Position]
    where
        F: FnMut(Position) -> CellCost,
    {
        self.reset();
        self.path.clear();
        if !self.nodes.valid(from) || !self.nodes.valid(to) {
            return &self.path;
        }

        let mut open = BinaryHeap::new();
        let mut inserted: u64 = 0;
        if let Some(node) = self.nodes.spot_mut(from) {
            node.g = 0.0;
            node.order = Some(inserted);
        }
        open.push(OpenEntry {
            f: self.heuristic.distance(from, to),
            g: 0.0,
            order: inserted,
            position: from,
        });
        inserted += 1;

        while let Some(entry) = open.pop() {
            let current = entry.position;
            let Some(node) = self.nodes.spot_mut(current) else {
                continue;
            };
            if node.closed || entry.g > node.g {
                continue;
            }
            if current == to {
                self.path = self.retrace(to);
                debug!(?from, ?to, length = self.path.len(), "path found");
                return &self.path;
            }
            node.closed = true;
            let current_g = node.g;

            for neighbor in self.nodes.neighbors(current) {
                let Some(state) = self.nodes.spot(neighbor) else {
                    continue;
                };
                if state.closed {
                    continue;
                }

                let terrain_cost = match cell_cost(neighbor) {
                    CellCost::Pruned => {
                        let _ = self.nodes.delete(neighbor);
                        debug!(cell = ?neighbor, "pruned from search grid");
                        continue;
                    }
                    CellCost::Enter(cost) => cost,
                };
                let tentative =
                    current_g + self.heuristic.distance(current, neighbor) + terrain_cost;

                let Some(node) = self.nodes.spot_mut(neighbor) else {
                    continue;
                };
                let order = match node.order {
                    Some(order) if tentative < node.g => order,
                    Some(_) => continue,
                    None => {
                        inserted += 1;
                        inserted - 1
                    }
                };
                node.g = tentative;
                node.parent = Some(current);
                node.order = Some(order);
                open.push(OpenEntry {
                    f: tentative + self.heuristic.distance(neighbor, to),
                    g: tentative,
                    order,
                    position: neighbor,
                });
            }
        }

        debug!(?from, ?to, "no path found");
        &self.path
    }

    fn reset(&mut self) {
        let positions: Vec<_> = self.nodes.positions().collect();
        for position in positions {
            if let Some(node) = self.nodes.spot_mut(position) {
                *node = Node::default();
            }
        }
    }

    fn retrace(&self, to: Position) -> Vec<Position> {
        let mut path = vec![to];
        let mut cursor = self.nodes.spot(to).and_then(|node| node.parent);
        while let Some(position) = cursor {
            path.push(position);
            cursor = self.nodes.spot(position).and_then(|node| node.parent);
        }
        path.reverse();
        path
    }
}

#[derive(Clone, Copy, Debug)]
struct Node {
    g: f64,
    parent: Option<Position>,
    order: Option<u64>,
    closed: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: f64::INFINITY,
            parent: None,
            order: None,
            closed: false,
        }
    }
}

/// Open-set member ordered so that the heap yields the lowest `f` first and
/// the earliest inserted node among equal `f`.
#[derive(Clone, Copy, Debug)]
struct OpenEntry {
    f: f64,
    g: f64,
    order: u64,
    position: Position,
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenEntry {}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.order.cmp(&self.order))
            .then_with(|| other.g.total_cmp(&self.g))
    }
}

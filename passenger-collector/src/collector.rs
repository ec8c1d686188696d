use itertools::iproduct;
use rayon::prelude::*;
use tracing::{debug, trace};

use crate::grid::Grid;

/// Grid size at which [`Sweep::auto`] switches to filling layers in parallel.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 64;

/// How the states of a single layer are filled.
///
/// Layers themselves are always processed in increasing order; only the
/// rows within one layer may be spread across threads.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Sweep {
    /// Every row on the calling thread.
    #[default]
    Sequential,
    /// Rows spread across the rayon thread pool.
    Parallel,
    /// Parallel once the grid is at least `threshold` cells wide.
    Auto { threshold: usize },
}

impl Sweep {
    /// [`Sweep::Auto`] with [`DEFAULT_PARALLEL_THRESHOLD`].
    pub fn auto() -> Self {
        Sweep::Auto {
            threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }

    fn is_parallel(self, size: usize) -> bool {
        match self {
            Sweep::Sequential => false,
            Sweep::Parallel => true,
            Sweep::Auto { threshold } => size >= threshold,
        }
    }
}

/// Best score for every pair of walker rows `(r1, r2)` after both walkers
/// made the same number of moves. `None` marks an unreachable state.
#[derive(Debug)]
struct Layer {
    size: usize,
    best: Vec<Option<i64>>,
}

impl Layer {
    fn unreachable(size: usize) -> Self {
        Self {
            size,
            best: vec![None; size * size],
        }
    }

    /// Both walkers on the start cell, scored once.
    fn start(grid: &Grid) -> Self {
        let mut layer = Self::unreachable(grid.size());
        layer.best[0] = grid.passable(0, 0).map(i64::from);
        layer
    }

    #[inline(always)]
    fn get(&self, r1: usize, r2: usize) -> Option<i64> {
        self.best[r1 * self.size + r2]
    }

    fn reachable(&self) -> usize {
        self.best.iter().flatten().count()
    }

    /// Each walker arrived either from above (row - 1) or from the left
    /// (same row, column - 1), which gives up to four predecessor states.
    fn best_predecessor(&self, r1: usize, r2: usize) -> Option<i64> {
        iproduct!(
            [r1.checked_sub(1), Some(r1)],
            [r2.checked_sub(1), Some(r2)]
        )
        .filter_map(|(p1, p2)| self.get(p1?, p2?))
        .max()
    }
}

/// Fills row `r1` of layer `k` from the finished layer `k - 1`.
fn fill_row(grid: &Grid, prev: &Layer, k: usize, r1: usize, row: &mut [Option<i64>]) {
    let n = grid.size();
    let Some(c1) = k.checked_sub(r1) else {
        return;
    };
    let Some(v1) = grid.passable(r1, c1) else {
        return;
    };

    let rows = k.saturating_sub(n - 1)..=k.min(n - 1);
    for r2 in rows {
        let Some(v2) = grid.passable(r2, k - r2) else {
            continue;
        };
        let Some(prev_best) = prev.best_predecessor(r1, r2) else {
            continue;
        };

        // Same layer and same row means same cell: count it once.
        let gain = if r1 == r2 {
            i64::from(v1)
        } else {
            i64::from(v1) + i64::from(v2)
        };
        row[r2] = Some(prev_best + gain);
    }
}

/// Maximum number of passengers two walkers can collect going from the
/// top-left to the bottom-right cell, moving only right or down.
///
/// This models a round trip: the return leg (up/left moves) is the time
/// reverse of a second forward walker, so both legs advance in lockstep
/// over the anti-diagonals `k = row + col`.
pub fn max_passengers(grid: &Grid) -> u64 {
    max_passengers_with(grid, Sweep::default())
}

/// Same as [`max_passengers`], filling each layer as `sweep` says.
#[tracing::instrument(skip(grid), fields(size = grid.size()))]
pub fn max_passengers_with(grid: &Grid, sweep: Sweep) -> u64 {
    let n = grid.size();
    if grid.is_obstacle(0, 0) || grid.is_obstacle(n - 1, n - 1) {
        debug!("start or end cell is blocked");
        return 0;
    }

    let parallel = sweep.is_parallel(n);
    let mut layer = Layer::start(grid);
    let mut next = Layer::unreachable(n);

    for k in 1..=2 * (n - 1) {
        next.best.fill(None);
        if parallel {
            next.best
                .par_chunks_mut(n)
                .enumerate()
                .for_each(|(r1, row)| fill_row(grid, &layer, k, r1, row));
        } else {
            next.best
                .chunks_mut(n)
                .enumerate()
                .for_each(|(r1, row)| fill_row(grid, &layer, k, r1, row));
        }
        std::mem::swap(&mut layer, &mut next);

        let reachable = layer.reachable();
        trace!(k, reachable, "layer filled");
        if reachable == 0 {
            debug!(k, "no joint path gets past this layer");
            return 0;
        }
    }

    // Negative totals only come from weights outside the usual {-1, 0, 1}.
    let best = layer.get(n - 1, n - 1).unwrap_or(0);
    u64::try_from(best).unwrap_or(0)
}

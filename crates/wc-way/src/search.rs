//! Backward search producing backtrace steps.
//!
//! The search runs outwards from the tiles serving a destination against
//! the direction of travel, so every reached tile learns the neighbour it
//! should step onto.  It only reads topology and is safe to run for many
//! destinations in parallel; the resulting [`BacktracePlan`]s are replayed
//! through a [`BacktraceWalker`](crate::BacktraceWalker) afterwards.
//!
//! # Step order
//!
//! Steps come out in depth-first preorder of the search tree, so a tile is
//! usually followed directly by a tile that routes through it.  That is the
//! order in which the walker can share one destination set along a road.

use std::collections::VecDeque;

use wc_core::{Direction, Koord, TilePos};

use crate::RoadGrid;

/// "`tile` reaches the destination by stepping onto `next`".  `next` is
/// `TilePos::INVALID` for the tiles serving the destination directly.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BacktraceStep {
    pub tile: TilePos,
    pub next: TilePos,
}

/// All steps of one destination's backward search.
#[derive(Clone, Debug)]
pub struct BacktracePlan {
    pub destination: Koord,
    pub steps:       Vec<BacktraceStep>,
}

impl BacktracePlan {
    /// `true` if no road tile serves the destination.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

const UNREACHED: u32 = u32::MAX;
const ROOT: u32 = u32::MAX - 1;

/// Breadth-first backward search from `destination` over `grid`.
pub fn plan_backtrace(grid: &RoadGrid, destination: Koord) -> BacktracePlan {
    let n = grid.len();
    // parent[t] = tile id that t steps onto; ROOT for access tiles.
    let mut parent = vec![UNREACHED; n];
    let mut order: Vec<u32> = Vec::new();
    let mut queue: VecDeque<u32> = VecDeque::new();

    for pos in grid.access_tiles(destination) {
        if let Some(id) = grid.tile_id(pos) {
            parent[id.index()] = ROOT;
            queue.push_back(id.0);
        }
    }

    while let Some(v) = queue.pop_front() {
        order.push(v);
        let v_pos = grid.by_id(wc_core::TileId(v)).pos();
        for dir in Direction::NESW {
            // `u` is a tile that can drive into `v` by heading `dir.reverse()`.
            let Some(u_pos) = v_pos.step(dir) else { continue };
            let Some(u) = grid.tile_id(u_pos) else { continue };
            if parent[u.index()] != UNREACHED {
                continue;
            }
            if grid.exits(u) & dir.reverse().bit() == 0 {
                continue;
            }
            parent[u.index()] = v;
            queue.push_back(u.0);
        }
    }

    BacktracePlan { destination, steps: preorder(grid, &parent, &order) }
}

/// Re-emit the BFS tree in depth-first preorder.
fn preorder(grid: &RoadGrid, parent: &[u32], bfs_order: &[u32]) -> Vec<BacktraceStep> {
    let mut children: Vec<Vec<u32>> = vec![Vec::new(); parent.len()];
    let mut roots = Vec::new();
    for &t in bfs_order {
        match parent[t as usize] {
            ROOT => roots.push(t),
            p => children[p as usize].push(t),
        }
    }

    let pos_of = |t: u32| grid.by_id(wc_core::TileId(t)).pos();
    let mut steps = Vec::with_capacity(bfs_order.len());
    let mut stack: Vec<u32> = roots.into_iter().rev().collect();
    while let Some(t) = stack.pop() {
        let next = match parent[t as usize] {
            ROOT => TilePos::INVALID,
            p => pos_of(p),
        };
        steps.push(BacktraceStep { tile: pos_of(t), next });
        stack.extend(children[t as usize].iter().rev());
    }
    steps
}

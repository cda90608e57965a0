//! Forward walks that remove cached routes.

use wc_core::{Generation, Koord, TilePos};
use wc_store::GenerationStore;

use crate::{RoadGrid, RouteHint, WayError, WayResult};

/// Follow the cached route to `dest` from `start`, removing `dest` from every
/// tile on the way.  Returns the number of tiles visited.
///
/// The hop out of a tile is read before the tile is cleared.  The walk stops
/// at a tile without a further hop, on a hop back to the tile it came from,
/// and after at most one visit per grid tile.
pub fn delete_route_to(
    grid:       &mut RoadGrid,
    start:      TilePos,
    dest:       Koord,
    generation: Generation,
    store:      &GenerationStore,
) -> WayResult<usize> {
    grid.require(start)?;

    let mut current = start;
    let mut previous: Option<TilePos> = None;
    let mut visited = 0;

    while visited < grid.len() {
        let Some(tile) = grid.tile(current) else { break };
        let hop = tile.next_on_route_to(dest, generation, 0, store, &*grid);

        if let Some(tile) = grid.tile_mut(current) {
            while tile.remove_route(dest, generation, store) {}
        }
        visited += 1;

        match hop {
            RouteHint::Next(next) if next != current && Some(next) != previous => {
                previous = Some(current);
                current = next;
            }
            _ => break,
        }
    }
    Ok(visited)
}

/// Delete every route that passes through `pos`.
///
/// The destinations are collected up front so no walk mutates a set that is
/// still being read.
pub fn delete_all_routes_from_here(
    grid:       &mut RoadGrid,
    pos:        TilePos,
    generation: Generation,
    store:      &GenerationStore,
) -> WayResult<usize> {
    let dests = grid
        .tile(pos)
        .ok_or(WayError::TileNotFound(pos))?
        .destinations(generation, store);

    let mut visited = 0;
    for dest in dests {
        visited += delete_route_to(grid, pos, dest, generation, store)?;
    }
    Ok(visited)
}

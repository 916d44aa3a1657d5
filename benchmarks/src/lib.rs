//! Shared helpers for lodestar benchmark suites.

use std::rc::Rc;

use lodestar_harness::worlds::route_map::RouteMap;
use lodestar_search::node::SearchNode;

/// Name of the city at grid cell `(row, col)`.
#[must_use]
pub fn cell(row: usize, col: usize) -> String {
    format!("{row}:{col}")
}

/// A `size` x `size` grid of two-way roads with unit length, routing from
/// the top-left to the bottom-right corner. Estimates are Manhattan
/// distances to the goal, which are consistent on this grid.
#[must_use]
pub fn grid_map(size: usize) -> RouteMap {
    let last = size.saturating_sub(1);
    let mut map = RouteMap::new(&cell(0, 0), &cell(last, last));
    for row in 0..size {
        for col in 0..size {
            let here = cell(row, col);
            if col + 1 < size {
                map = map.with_two_way_road(&here, &cell(row, col + 1), 1.0);
            }
            if row + 1 < size {
                map = map.with_two_way_road(&here, &cell(row + 1, col), 1.0);
            }
            let manhattan = u32::try_from((last - row) + (last - col)).unwrap_or(u32::MAX);
            map = map.with_estimate(&here, f64::from(manhattan));
        }
    }
    map
}

/// `n` detached nodes whose cost, heuristic and value cycle through a small
/// range, so priority fringes see plenty of ties.
#[must_use]
pub fn scored_nodes(n: u32) -> Vec<Rc<SearchNode<u32, ()>>> {
    (0..n)
        .map(|i| {
            let score = f64::from(i % 17);
            Rc::new(SearchNode {
                state: i,
                parent: None,
                action: None,
                depth: 0,
                cost: score,
                heuristic: Some(score),
                value: Some(score),
            })
        })
        .collect()
}

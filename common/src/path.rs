use crate::board::{Axis, Board, EMPTY};

/// Which way an outward walk moves along the U coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Back,
    Forward,
}

/// Walks from `(u, v)` one empty cell at a time and returns the last U coordinate
/// reached before a non-empty cell (or the grid edge).
fn slide(board: &Board, axis: Axis, u: usize, v: usize, direction: Direction) -> usize {
    let is_open = |u: usize| board.get(axis.index(board, u, v)) == Some(EMPTY);
    let mut u = u;
    match direction {
        Direction::Back => {
            while u > 0 && is_open(u - 1) {
                u -= 1;
            }
        }
        Direction::Forward => {
            while u + 1 < axis.u_len(board) && is_open(u + 1) {
                u += 1;
            }
        }
    }
    u
}

/// Decides whether `a` and `b` can be joined under one framing.
///
/// Each endpoint sees along its own line (fixed V) until something blocks it.
/// The path exists when some U inside the overlap of both sightlines has a
/// corridor of empty cells across every V strictly between the two endpoints.
/// With the endpoints on the same or adjacent lines the corridor is empty and
/// any overlapping U will do.
pub fn can_connect(board: &Board, a: usize, b: usize, axis: Axis) -> bool {
    let (ua, va) = (axis.u(board, a), axis.v(board, a));
    let (ub, vb) = (axis.u(board, b), axis.v(board, b));

    let reach = |u, v, direction| slide(board, axis, u, v, direction);
    let far_left = reach(ua, va, Direction::Back).max(reach(ub, vb, Direction::Back));
    let far_right = reach(ua, va, Direction::Forward).min(reach(ub, vb, Direction::Forward));

    // Open interval of V strictly between the endpoints.
    let corridor = (va.min(vb) + 1)..va.max(vb);

    (far_left..=far_right).any(|u| {
        corridor
            .clone()
            .all(|v| board.get(axis.index(board, u, v)) == Some(EMPTY))
    })
}

/// True when a rectilinear path with at most two bends runs between `a` and `b`
/// through empty cells only.
pub fn are_linkable(board: &Board, a: usize, b: usize) -> bool {
    Axis::BOTH
        .iter()
        .any(|&axis| can_connect(board, a, b, axis))
}

/// The full pairing rule: two distinct positions holding the same tile, linkable.
pub fn are_tiles_matchable(board: &Board, a: usize, b: usize) -> bool {
    if a == b || !board.is_tile(a) {
        return false;
    }
    board.get(a) == board.get(b) && are_linkable(board, a, b)
}

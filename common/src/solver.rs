use crate::board::Board;
use crate::path::are_tiles_matchable;
use crate::session::Session;
use std::collections::HashMap;

/// Two positions holding equal, linkable tiles: (earlier, later) in scan order.
pub type Pair = (usize, usize);

/// Scans the board in index order and returns the first matchable pair it meets.
///
/// Positions are grouped by tile value as they are encountered. Each new tile is
/// tested against the earlier tiles of its value in the order they were seen;
/// the first linkable one wins. Otherwise the tile joins its group and the scan
/// goes on. This is a greedy first hit, not the best pair in any global sense.
pub fn find_matchable_pair(board: &Board) -> Option<Pair> {
    let mut groups: HashMap<i16, Vec<usize>> = HashMap::new();

    for (position, &value) in board.cells.iter().enumerate() {
        if value <= 0 {
            continue;
        }
        let seen = groups.entry(value).or_default();
        if let Some(&other) = seen
            .iter()
            .find(|&&other| are_tiles_matchable(board, other, position))
        {
            return Some((other, position));
        }
        seen.push(position);
    }

    None
}

/// True while at least one pair can still be removed.
pub fn has_any_move(board: &Board) -> bool {
    find_matchable_pair(board).is_some()
}

/// Plays the board out greedily until it is cleared or no pair is left.
///
/// Each step removes the pair [`find_matchable_pair`] reports, through the same
/// tap transition a player uses. Returns the pairs removed, in order, and the
/// session it ended on.
pub fn play_greedy(board: &Board) -> (Vec<Pair>, Session) {
    let mut session = Session::new(board.clone());
    let mut order = Vec::with_capacity(session.pairs_left());

    while let Some((a, b)) = find_matchable_pair(&session.board) {
        session = session.apply_tap(a).apply_tap(b);
        order.push((a, b));
    }

    (order, session)
}

/// The greedy order that clears the board, or `None` if it gets stuck.
///
/// A board can be clearable in some other order and still be rejected here;
/// only this particular greedy order counts.
pub fn clearing_order(board: &Board) -> Option<Vec<Pair>> {
    let (order, session) = play_greedy(board);
    session.is_cleared().then_some(order)
}

/// Certifies that the greedy pairing clears the whole board.
pub fn certify(board: &Board) -> bool {
    clearing_order(board).is_some()
}

use crate::board::Board;
use crate::path::are_tiles_matchable;
use crate::solver::has_any_move;

/// Where a session stands. Derived from the board on demand, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum SessionStatus {
    Playing,
    Cleared,
    Stuck, // Tiles remain but no pair can be removed.
}

/// The interactive state of one game: the board, the currently selected tile
/// and how many tiles are left.
///
/// Every transition returns a new value; a session is never modified in place.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Session {
    pub board: Board,
    pub selected: Option<usize>,
    /// Always even and always equal to the number of tile cells on `board`.
    pub remaining_tiles: usize,
}

impl Session {
    pub fn new(board: Board) -> Self {
        let remaining_tiles = board.tile_count();
        Session {
            board,
            selected: None,
            remaining_tiles,
        }
    }

    /// Deserializes a session from bytes.
    ///
    /// The decoded value is checked before it is returned: the board must fill
    /// its grid, `remaining_tiles` must match the tiles on it and a selection
    /// must point at a tile. Anything else is rejected rather than left to panic
    /// on the next tap.
    pub fn deserialize(bts: &[u8]) -> anyhow::Result<Self> {
        let Session {
            board,
            selected,
            remaining_tiles,
        } = bcs::from_bytes(bts)?;
        let board = Board::from_cells(board.width, board.height, board.cells)?;

        if remaining_tiles != board.tile_count() {
            anyhow::bail!(
                "remaining_tiles_mismatch: stored {}, board holds {}",
                remaining_tiles,
                board.tile_count()
            );
        }
        if let Some(position) = selected.filter(|&p| !board.is_tile(p)) {
            anyhow::bail!("selected_not_a_tile: {}", position);
        }

        Ok(Session {
            board,
            selected,
            remaining_tiles,
        })
    }

    /// Serializes the session to bytes.
    pub fn serialize(&self) -> anyhow::Result<Vec<u8>> {
        Ok(bcs::to_bytes(self)?)
    }

    /// Applies a single tap at `position`.
    ///
    /// 1. Taps on walls, empty space or off the board change nothing.
    /// 2. With nothing selected, the tapped tile becomes the selection.
    /// 3. With a tile selected, a matchable partner removes both tiles; anything
    ///    else (including the selected tile itself) just clears the selection.
    pub fn apply_tap(&self, position: usize) -> Session {
        if !self.board.is_tile(position) {
            return self.clone();
        }

        let Some(selected) = self.selected else {
            return Session {
                selected: Some(position),
                ..self.clone()
            };
        };

        if !are_tiles_matchable(&self.board, selected, position) {
            return Session {
                selected: None,
                ..self.clone()
            };
        }

        Session {
            board: self.board.with_removed(selected, position),
            selected: None,
            remaining_tiles: self.remaining_tiles - 2,
        }
    }

    pub fn is_cleared(&self) -> bool {
        self.remaining_tiles == 0
    }

    pub fn has_any_move(&self) -> bool {
        has_any_move(&self.board)
    }

    pub fn pairs_left(&self) -> usize {
        self.remaining_tiles / 2
    }

    pub fn status(&self) -> SessionStatus {
        if self.is_cleared() {
            SessionStatus::Cleared
        } else if self.has_any_move() {
            SessionStatus::Playing
        } else {
            SessionStatus::Stuck
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_session() -> Session {
        Session::new(Board::from_rows(&[
            "#######",
            "#.....#",
            "#.121.#",
            "#.2...#",
            "#.....#",
            "#######",
        ]))
    }

    #[test]
    fn test_new_counts_tiles() {
        let session = sample_session();
        assert_eq!(session.remaining_tiles, 4);
        assert_eq!(session.selected, None);
        assert_eq!(session.pairs_left(), 2);
        assert_eq!(session.status(), SessionStatus::Playing);
    }

    #[test]
    fn test_tap_on_wall_or_empty_is_noop() {
        // Tapping walls, empty space or an off-board index twice leaves the state identical
        let session = sample_session();
        for position in [0, 8, 999] {
            let once = session.apply_tap(position);
            let twice = once.apply_tap(position);
            assert_eq!(once, session);
            assert_eq!(twice, session);
        }

        // Also a no-op while a tile is selected
        let selected = session.apply_tap(session.board.index(2, 2));
        assert_eq!(selected.apply_tap(8), selected);
    }

    #[test]
    fn test_tap_selected_tile_again_deselects() {
        let session = sample_session();
        let a = session.board.index(2, 2);
        let selected = session.apply_tap(a);
        assert_eq!(selected.selected, Some(a));

        let deselected = selected.apply_tap(a);
        assert_eq!(deselected.selected, None);
        assert_eq!(deselected, session);
    }

    #[test]
    fn test_mismatch_deselects_and_keeps_board() {
        // Tap a 1 then a 2: selection clears, nothing is removed
        let session = sample_session();
        let a = session.board.index(2, 2);
        let b = session.board.index(3, 2);
        let after = session.apply_tap(a).apply_tap(b);
        assert_eq!(after.selected, None);
        assert_eq!(after.board, session.board);
        assert_eq!(after.remaining_tiles, 4);
    }

    #[test]
    fn test_match_removes_both_tiles() {
        // The two 1s connect around the 2 through the top margin
        let session = sample_session();
        let a = session.board.index(2, 2);
        let m = session.board.index(4, 2);
        let after = session.apply_tap(a).apply_tap(m);
        assert_eq!(after.selected, None);
        assert_eq!(after.remaining_tiles, 2);
        assert_eq!(after.board.tile_count(), 2);
        assert_eq!(after.board.get(a), Some(0));
        assert_eq!(after.board.get(m), Some(0));
        // The original session is untouched
        assert_eq!(session.remaining_tiles, 4);
        assert!(session.board.is_tile(a));
    }

    #[test]
    fn test_clearing_the_board() {
        let session = sample_session();
        let cleared = session
            .apply_tap(session.board.index(2, 2))
            .apply_tap(session.board.index(4, 2))
            .apply_tap(session.board.index(3, 2))
            .apply_tap(session.board.index(2, 3));
        assert!(cleared.is_cleared());
        assert_eq!(cleared.status(), SessionStatus::Cleared);
        assert!(!cleared.has_any_move());
    }

    #[test]
    fn test_stuck_status() {
        // Crossed pairs: every route between equal tiles needs three bends
        let session = Session::new(Board::from_rows(&[
            "######",
            "#....#",
            "#.12.#",
            "#.21.#",
            "#....#",
            "######",
        ]));
        assert_eq!(session.remaining_tiles, 4);
        assert!(!session.is_cleared());
        assert!(!session.has_any_move());
        assert_eq!(session.status(), SessionStatus::Stuck);

        // Tapping a pair that cannot link only deselects
        let after = session
            .apply_tap(session.board.index(2, 2))
            .apply_tap(session.board.index(3, 3));
        assert_eq!(after, session);
    }

    #[test]
    fn test_serialization_roundtrip() {
        let session = sample_session().apply_tap(16);
        let bts = session.serialize().unwrap();
        assert_eq!(Session::deserialize(&bts).unwrap(), session);
        assert!(Session::deserialize(&[1, 2, 3]).is_err());
    }

    #[test]
    fn test_deserialize_rejects_inconsistent_state() {
        // Decodable bytes that break the session invariants are refused, not played
        let encode = |session: &Session| bcs::to_bytes(session).unwrap();

        // Zero-width board that would divide by zero on the first tap
        let zero_width = Session {
            board: Board {
                width: 0,
                height: 2,
                cells: vec![1, 1],
            },
            selected: Some(0),
            remaining_tiles: 2,
        };
        assert!(Session::deserialize(&encode(&zero_width)).is_err());

        // Cells that do not fill the grid
        let short = Session {
            board: Board {
                width: 3,
                height: 3,
                cells: vec![0; 8],
            },
            selected: None,
            remaining_tiles: 0,
        };
        assert!(Session::deserialize(&encode(&short)).is_err());

        // Tile count out of step with the board: a match would underflow it
        let board = Board::from_rows(&["#####", "#...#", "#.11#", "#...#", "#####"]);
        let miscounted = Session {
            board: board.clone(),
            selected: None,
            remaining_tiles: 0,
        };
        assert!(Session::deserialize(&encode(&miscounted)).is_err());

        // Selection on empty space or off the board
        for position in [6, 999] {
            let bad_selection = Session {
                selected: Some(position),
                ..Session::new(board.clone())
            };
            assert!(Session::deserialize(&encode(&bad_selection)).is_err());
        }

        // The consistent version of the same board still loads and plays
        let good = Session::new(board);
        let loaded = Session::deserialize(&encode(&good)).unwrap();
        let after = loaded.apply_tap(12).apply_tap(13);
        assert!(after.is_cleared());
    }
}

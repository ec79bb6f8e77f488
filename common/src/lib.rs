//! Board generation and pairing rules for a Shisen-Sho style tile matching game.
//!
//! A board is certified before play: the greedy pairing in [`solver`] must be able
//! to remove every tile. Play then runs through [`Session::apply_tap`], one tap at
//! a time, with two tiles removed whenever they hold the same value and can be
//! linked by a path of at most two bends through empty cells.

pub mod board;
pub mod generator;
pub mod path;
pub mod session;
pub mod solver;

pub use board::{Axis, Board, Cell, EMPTY, WALL};
pub use generator::{BoardConfig, BoardGenerator, create_certified_board, generate};
pub use path::{are_linkable, are_tiles_matchable, can_connect};
pub use session::{Session, SessionStatus};
pub use solver::{Pair, certify, clearing_order, find_matchable_pair, has_any_move, play_greedy};

// --- Host-facing operations ---

/// Applies one tap to a session and returns the resulting session.
pub fn apply_tap(session: &Session, position: usize) -> Session {
    session.apply_tap(position)
}

/// True when every tile has been removed.
pub fn is_cleared(session: &Session) -> bool {
    session.is_cleared()
}

/// Generates a certified board for `config` and starts a session on it.
pub fn new_session<R: rand::Rng>(config: &BoardConfig, rng: &mut R) -> anyhow::Result<Session> {
    Ok(Session::new(create_certified_board(config, rng)?))
}

/// Runs a single generate-and-certify attempt.
///
/// `Ok(None)` means the candidate was rejected; a host that must stay responsive
/// calls this once per frame until it gets a session.
pub fn try_new_session<R: rand::Rng>(
    config: &BoardConfig,
    rng: &mut R,
) -> anyhow::Result<Option<Session>> {
    let mut generator = BoardGenerator::new(*config, rng)?;
    Ok(generator.try_next().map(Session::new))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_session_from_certified_board() {
        let mut rng = StdRng::seed_from_u64(11);
        let session = new_session(&BoardConfig::new(4, 4), &mut rng).unwrap();
        assert_eq!(session.remaining_tiles, 16);
        assert_eq!(session.selected, None);
        assert!(has_any_move(&session.board));
        assert!(!is_cleared(&session));
    }

    #[test]
    fn test_single_attempt_sessions() {
        // Looping on one attempt at a time ends in a fresh certified session
        let config = BoardConfig::new(6, 4);
        let mut rng = StdRng::seed_from_u64(21);
        let mut attempts = 0;
        let session = loop {
            attempts += 1;
            if let Some(session) = try_new_session(&config, &mut rng).unwrap() {
                break session;
            }
            assert!(attempts < 1000);
        };
        assert_eq!(session.remaining_tiles, 24);
        assert_eq!(session.selected, None);
        assert!(certify(&session.board));

        // A one-row interior always certifies on the first attempt
        let row = try_new_session(&BoardConfig::new(8, 1), &mut rng).unwrap();
        assert!(row.is_some());

        assert!(try_new_session(&BoardConfig::new(3, 3), &mut rng).is_err());
    }

    #[test]
    fn test_playing_the_certificate_clears_the_session() {
        // Tapping out the certified order through the public operations wins the game
        let mut rng = StdRng::seed_from_u64(5);
        let session = new_session(&BoardConfig::new(8, 4), &mut rng).unwrap();
        let order = clearing_order(&session.board).unwrap();

        let mut current = session;
        for (a, b) in order {
            let selected = apply_tap(&current, a);
            assert_eq!(selected.selected, Some(a));
            let before = selected.remaining_tiles;
            current = apply_tap(&selected, b);
            assert_eq!(current.remaining_tiles, before - 2);
            assert_eq!(current.selected, None);
            assert_eq!(current.remaining_tiles, current.board.tile_count());
        }
        assert!(is_cleared(&current));
        assert_eq!(current.status(), SessionStatus::Cleared);
    }
}

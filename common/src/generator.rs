use crate::board::{Board, EMPTY, WALL};
use crate::solver::play_greedy;
use rand::Rng;
use tracing::{debug, info, instrument};

/// Every tile type appears exactly this many times on a fresh board.
pub const COPIES_PER_KIND: usize = 4;

/// Width of the wall ring plus the empty margin on each side.
const BORDER: usize = 2;

/// Dimensions of the playable interior and the retry policy for certification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BoardConfig {
    pub interior_width: usize,
    pub interior_height: usize,
    /// Give up after this many rejected candidates. `None` retries until a board
    /// certifies, which terminates with overwhelming probability but not provably.
    pub max_attempts: Option<usize>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            interior_width: 17,
            interior_height: 8,
            max_attempts: None,
        }
    }
}

impl BoardConfig {
    pub fn new(interior_width: usize, interior_height: usize) -> Self {
        BoardConfig {
            interior_width,
            interior_height,
            ..Default::default()
        }
    }

    pub fn with_max_attempts(self, max_attempts: usize) -> Self {
        BoardConfig {
            max_attempts: Some(max_attempts),
            ..self
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.interior_width == 0 || self.interior_height == 0 {
            anyhow::bail!("interior_empty");
        }
        if self.total_tiles() % COPIES_PER_KIND != 0 {
            anyhow::bail!(
                "tile_count_not_multiple_of_{}: {} x {}",
                COPIES_PER_KIND,
                self.interior_width,
                self.interior_height
            );
        }
        if self.tile_kinds() > i16::MAX as usize {
            anyhow::bail!("too_many_tile_kinds");
        }
        if self.max_attempts == Some(0) {
            anyhow::bail!("max_attempts_zero");
        }
        Ok(())
    }

    pub fn width(&self) -> usize {
        self.interior_width + 2 * BORDER
    }

    pub fn height(&self) -> usize {
        self.interior_height + 2 * BORDER
    }

    pub fn total_tiles(&self) -> usize {
        self.interior_width * self.interior_height
    }

    pub fn tile_kinds(&self) -> usize {
        self.total_tiles() / COPIES_PER_KIND
    }
}

/// Builds one random candidate board. Not certified.
///
/// The edge ring is wall, the next ring in is empty, and every interior cell gets
/// a value drawn without replacement from a pool holding four copies of each
/// tile type.
pub fn generate<R: Rng>(config: &BoardConfig, rng: &mut R) -> anyhow::Result<Board> {
    config.validate()?;
    Ok(fill(config, rng))
}

/// Lays out a candidate for an already validated config.
fn fill<R: Rng>(config: &BoardConfig, rng: &mut R) -> Board {
    let (width, height) = (config.width(), config.height());
    let mut pool: Vec<i16> = (1..=config.tile_kinds() as i16)
        .flat_map(|kind| std::iter::repeat_n(kind, COPIES_PER_KIND))
        .collect();

    let mut board = Board {
        width,
        height,
        cells: Vec::new(),
    };
    let cells = (0..width * height)
        .map(|position| match board.edge_distance(position) {
            0 => WALL,
            1 => EMPTY,
            _ => pool.swap_remove(rng.random_range(0..pool.len())),
        })
        .collect();
    board.cells = cells;
    board
}

/// Produces candidate boards one attempt at a time.
///
/// A cooperative host can call [`BoardGenerator::try_next`] once per frame and
/// yield in between instead of blocking on the whole retry loop.
pub struct BoardGenerator<'a, R: Rng> {
    config: BoardConfig,
    rng: &'a mut R,
    attempts: usize,
}

impl<'a, R: Rng> BoardGenerator<'a, R> {
    pub fn new(config: BoardConfig, rng: &'a mut R) -> anyhow::Result<Self> {
        config.validate()?;
        Ok(BoardGenerator {
            config,
            rng,
            attempts: 0,
        })
    }

    /// Candidates generated so far.
    pub fn attempts(&self) -> usize {
        self.attempts
    }

    /// True once a capped generator has used up its attempts.
    pub fn is_exhausted(&self) -> bool {
        self.config
            .max_attempts
            .is_some_and(|max| self.attempts >= max)
    }

    /// Generates and certifies a single candidate. `None` means it was rejected.
    pub fn try_next(&mut self) -> Option<Board> {
        self.attempts += 1;
        let board = fill(&self.config, &mut *self.rng);
        let (order, end) = play_greedy(&board);
        if end.is_cleared() {
            info!(attempts = self.attempts, "board certified");
            Some(board)
        } else {
            debug!(
                attempt = self.attempts,
                pairs_removed = order.len(),
                tiles_left = end.remaining_tiles,
                "candidate rejected"
            );
            None
        }
    }
}

/// Generates boards until one certifies.
///
/// With `max_attempts` unset this loops until it succeeds. With a cap it fails
/// with `generation_failed` once that many candidates have been rejected.
#[instrument(skip(rng))]
pub fn create_certified_board<R: Rng>(
    config: &BoardConfig,
    rng: &mut R,
) -> anyhow::Result<Board> {
    let mut generator = BoardGenerator::new(*config, rng)?;
    loop {
        if let Some(board) = generator.try_next() {
            return Ok(board);
        }
        if generator.is_exhausted() {
            anyhow::bail!("generation_failed after {} attempts", generator.attempts());
        }
    }
}

use itertools::Itertools;
use shisensho::*;
use std::thread;
use std::time::Duration;

fn main() -> anyhow::Result<()> {
    // --- 1. Initialization ---
    let config = BoardConfig::default();
    let mut rng = rand::rng();

    println!("--- Autonomous Shisen-Sho Bot ---");
    println!("Strategy: Always take the first linkable pair in scan order.");
    println!("Generating a certified board...");

    let mut generator = BoardGenerator::new(config, &mut rng)?;
    let board = loop {
        if let Some(board) = generator.try_next() {
            break board;
        }
    };
    println!("Certified after {} attempt(s).", generator.attempts());

    let mut session = Session::new(board);
    print_session(&session);
    thread::sleep(Duration::from_secs(2));

    // --- 2. Game Loop ---
    let mut move_count = 0;
    while session.status() == SessionStatus::Playing {
        move_count += 1;
        println!("\n--- Move #{} ---", move_count);

        let Some((a, b)) = find_matchable_pair(&session.board) else {
            break;
        };
        let (x0, y0) = (session.board.x(a), session.board.y(a));
        let (x1, y1) = (session.board.x(b), session.board.y(b));
        println!("Bot pairs ({}, {}) with ({}, {})...", x0, y0, x1, y1);

        session = apply_tap(&session, a);
        session = apply_tap(&session, b);
        print_session(&session);

        // Add a delay to make the game watchable
        thread::sleep(Duration::from_millis(300));
    }

    // --- 3. Final Result ---
    println!("\n--- Game Over ---");

    match session.status() {
        SessionStatus::Cleared => println!("Result: clear!"),
        SessionStatus::Stuck => println!("Result: game over! {} pairs left.", session.pairs_left()),
        SessionStatus::Playing => println!("Result: The game ended unexpectedly."),
    }
    Ok(())
}

/// Display glyph for a tile type: honours and winds, then numerals, then
/// Roman and circled numbers for anything past the traditional set.
fn tile_glyph(value: i16) -> Option<char> {
    const HONOURS: [char; 7] = ['東', '南', '西', '北', '中', '發', '　'];
    const NUMERALS: [char; 9] = ['一', '二', '三', '四', '五', '六', '七', '八', '九'];
    match value {
        v if v < 1 => None,
        1..=7 => Some(HONOURS[value as usize - 1]),
        8..=16 => Some(NUMERALS[value as usize - 8]),
        17..=25 => char::from_u32(0x2160 + value as u32 - 17),
        _ => char::from_u32(0x2460 + value as u32 - 26),
    }
}

fn print_session(session: &Session) {
    let board = &session.board;
    for (y, row) in board.cells.chunks(board.width).enumerate() {
        let line = row
            .iter()
            .enumerate()
            .map(|(x, &value)| {
                let glyph = match Cell::from(value) {
                    Cell::Wall => '■',
                    Cell::Empty => '　',
                    Cell::Tile(_) => tile_glyph(value).unwrap_or('？'),
                };
                if session.selected == Some(board.index(x, y)) {
                    format!("[{}]", glyph)
                } else {
                    format!(" {} ", glyph)
                }
            })
            .join("");
        println!("{}", line);
    }
    match session.status() {
        SessionStatus::Cleared => println!("clear!"),
        SessionStatus::Stuck => println!("game over!"),
        SessionStatus::Playing => println!("{} pairs left.", session.pairs_left()),
    }
}

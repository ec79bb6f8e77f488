use shisensho as ss;
use wasm_bindgen::prelude::*;

fn load(bts: &[u8]) -> Result<ss::Session, String> {
    ss::Session::deserialize(bts).map_err(|e| e.to_string())
}

fn store(session: &ss::Session) -> Result<Vec<u8>, String> {
    session.serialize().map_err(|e| e.to_string())
}

#[wasm_bindgen]
pub fn create_game(interior_width: u8, interior_height: u8) -> Result<Vec<u8>, String> {
    console_error_panic_hook::set_once();

    let config = ss::BoardConfig::new(interior_width as usize, interior_height as usize);
    let session = ss::new_session(&config, &mut rand::rng()).map_err(|e| e.to_string())?;
    store(&session)
}

/// One generate-and-certify attempt. Returns `None` when the candidate was
/// rejected, so the host can yield a frame and call again.
#[wasm_bindgen]
pub fn try_create_game(
    interior_width: u8,
    interior_height: u8,
) -> Result<Option<Vec<u8>>, String> {
    console_error_panic_hook::set_once();

    let config = ss::BoardConfig::new(interior_width as usize, interior_height as usize);
    let session =
        ss::try_new_session(&config, &mut rand::rng()).map_err(|e| e.to_string())?;
    session.as_ref().map(store).transpose()
}

#[wasm_bindgen]
pub fn tap(bts: Vec<u8>, position: usize) -> Result<Vec<u8>, String> {
    console_error_panic_hook::set_once();

    let session = load(&bts)?;
    store(&ss::apply_tap(&session, position))
}

#[wasm_bindgen]
pub fn has_any_move(bts: Vec<u8>) -> Result<bool, String> {
    console_error_panic_hook::set_once();

    Ok(ss::has_any_move(&load(&bts)?.board))
}

#[wasm_bindgen]
pub fn is_cleared(bts: Vec<u8>) -> Result<bool, String> {
    console_error_panic_hook::set_once();

    Ok(ss::is_cleared(&load(&bts)?))
}

/// Selected position, or -1 when nothing is selected.
#[wasm_bindgen]
pub fn selected(bts: Vec<u8>) -> Result<i32, String> {
    console_error_panic_hook::set_once();

    Ok(load(&bts)?.selected.map_or(-1, |p| p as i32))
}

#[wasm_bindgen]
pub fn board_width(bts: Vec<u8>) -> Result<usize, String> {
    console_error_panic_hook::set_once();

    Ok(load(&bts)?.board.width)
}

#[wasm_bindgen]
pub fn remaining_tiles(bts: Vec<u8>) -> Result<usize, String> {
    console_error_panic_hook::set_once();

    Ok(load(&bts)?.remaining_tiles)
}

/// Raw cell values, row-major: -1 wall, 0 empty, tile ids above zero.
#[wasm_bindgen]
pub fn get_cells(bts: Vec<u8>) -> Result<Vec<i16>, String> {
    console_error_panic_hook::set_once();

    Ok(load(&bts)?.board.cells)
}

//! Browser boundary: thin `wasm-bindgen` wrappers over the rule
//! engine. State crosses as `JsValue`; the shell owns persistence.

use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;

use crate::ai::ScriptedOpponent;
use crate::game::{GameState, PlayerAction, PlayerId, Rejection, RuleEngine};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}

fn to_js_error(rejection: Rejection) -> JsValue {
    to_value(&rejection).unwrap_or_else(|serialize_err| JsValue::from_str(&serialize_err.to_string()))
}

#[wasm_bindgen(js_name = "newGame")]
pub fn new_game(player1_name: String, player2_name: String) -> Result<JsValue, JsValue> {
    let state = GameState::new_game(player1_name, player2_name);
    to_value(&state).map_err(JsValue::from)
}

#[wasm_bindgen(js_name = "newGameSeeded")]
pub fn new_game_seeded(
    player1_name: String,
    player2_name: String,
    seed: u64,
) -> Result<JsValue, JsValue> {
    let state = GameState::new_game_seeded(player1_name, player2_name, seed);
    to_value(&state).map_err(JsValue::from)
}

/// Validates and applies one action; errors carry the structured
/// rejection so the shell can explain it.
#[wasm_bindgen(js_name = "applyAction")]
pub fn apply_action(state: JsValue, player_id: PlayerId, action: JsValue) -> Result<JsValue, JsValue> {
    let state: GameState = from_value(state).map_err(JsValue::from)?;
    let action: PlayerAction = from_value(action).map_err(JsValue::from)?;
    let engine = RuleEngine::new();
    match engine.apply(&state, player_id, action) {
        Ok(resolution) => to_value(&resolution).map_err(JsValue::from),
        Err(rejection) => Err(to_js_error(rejection)),
    }
}

#[wasm_bindgen(js_name = "checkWinner")]
pub fn check_winner(state: JsValue) -> Result<JsValue, JsValue> {
    let state: GameState = from_value(state).map_err(JsValue::from)?;
    to_value(&state.check_winner()).map_err(JsValue::from)
}

#[wasm_bindgen(js_name = "validateState")]
pub fn validate_state(state: JsValue) -> Result<(), JsValue> {
    let state: GameState = from_value(state).map_err(JsValue::from)?;
    state
        .integrity_check()
        .map_err(|error| to_value(&error).unwrap_or_else(|e| JsValue::from_str(&e.to_string())))?;
    Ok(())
}

/// Scripted-opponent decision for the current priority holder. Pure:
/// the caller feeds the decision back through [`apply_action`].
#[wasm_bindgen(js_name = "computeBotMove")]
pub fn compute_bot_move(state: JsValue) -> Result<JsValue, JsValue> {
    let state: GameState = from_value(state).map_err(JsValue::from)?;
    let action = ScriptedOpponent::decide(&state);
    to_value(&action).map_err(JsValue::from)
}

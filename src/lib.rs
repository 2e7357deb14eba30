//! Authoritative rules engine for Feign, a two-player bluffing card
//! game. The crate owns game state, action legality, the phase state
//! machine, combat, feign reveals and the scripted opponent; rendering
//! and transport are the shell's job.

pub mod ai;
pub mod game;
#[cfg(feature = "wasm")]
pub mod wasm;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use ai::ScriptedOpponent;
pub use game::{
    Card, CardDefect, CardId, CardType, Color, Creature, EffectRegistry, EffectRule, FeignCard,
    GameOutcome, GamePhase, GameState, GlobalEffect, IntegrityError, Player, PlayerAction,
    PlayerBoard, PlayerId, Rejection, RuleEngine, RuleResolution,
};

/// Starts a fresh game with shuffled decks and dealt opening hands.
pub fn new_game(player1_name: impl Into<String>, player2_name: impl Into<String>) -> GameState {
    GameState::new_game(player1_name, player2_name)
}

/// Seeded variant of [`new_game`] for reproducible shuffles.
pub fn new_game_seeded(
    player1_name: impl Into<String>,
    player2_name: impl Into<String>,
    seed: u64,
) -> GameState {
    GameState::new_game_seeded(player1_name, player2_name, seed)
}

/// Winner/draw detection; `None` while the game is live.
pub fn check_winner(state: &GameState) -> Option<GameOutcome> {
    state.check_winner()
}

/// Errors a session can surface on top of the rule engine's rejections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum SessionError {
    NoActiveGame,
    Rejected { rejection: Rejection },
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::NoActiveGame => write!(f, "no active game"),
            SessionError::Rejected { rejection } => write!(f, "{rejection}"),
        }
    }
}

impl std::error::Error for SessionError {}

impl From<Rejection> for SessionError {
    fn from(rejection: Rejection) -> Self {
        SessionError::Rejected { rejection }
    }
}

/// Single-writer facade for shells that want the engine to keep the
/// authoritative snapshot between requests: one action is validated and
/// applied at a time, and the stored state is replaced wholesale on
/// success.
#[derive(Default)]
pub struct GameSession {
    state: Option<GameState>,
    rules: RuleEngine,
}

impl GameSession {
    pub fn new() -> Self {
        Self {
            state: None,
            rules: RuleEngine::new(),
        }
    }

    /// Session with a custom effect catalog.
    pub fn with_rules(rules: RuleEngine) -> Self {
        Self { state: None, rules }
    }

    pub fn new_game(
        &mut self,
        player1_name: impl Into<String>,
        player2_name: impl Into<String>,
    ) -> &GameState {
        self.state
            .insert(GameState::new_game(player1_name, player2_name))
    }

    pub fn new_game_seeded(
        &mut self,
        player1_name: impl Into<String>,
        player2_name: impl Into<String>,
        seed: u64,
    ) -> &GameState {
        self.state
            .insert(GameState::new_game_seeded(player1_name, player2_name, seed))
    }

    pub fn state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    /// Validates and applies one action, persisting the replacement
    /// state. Rejections leave the stored snapshot untouched.
    pub fn apply(
        &mut self,
        player_id: PlayerId,
        action: PlayerAction,
    ) -> Result<RuleResolution, SessionError> {
        let state = self.state.as_ref().ok_or(SessionError::NoActiveGame)?;
        let resolution = self.rules.apply(state, player_id, action)?;
        self.state = Some(resolution.state.clone());
        Ok(resolution)
    }

    /// One scripted-opponent step: decide, then apply through the same
    /// rule engine a human goes through. Returns the decision alongside
    /// the resolution so shells can narrate it.
    pub fn apply_scripted_move(&mut self) -> Result<(PlayerAction, RuleResolution), SessionError> {
        let (player_id, action) = {
            let state = self.state.as_ref().ok_or(SessionError::NoActiveGame)?;
            (state.current_player, ScriptedOpponent::decide(state))
        };
        let resolution = self.apply(player_id, action.clone())?;
        Ok((action, resolution))
    }

    pub fn check_winner(&self) -> Option<GameOutcome> {
        self.state.as_ref().and_then(GameState::check_winner)
    }

    /// Discards the current game; a new one must be started before the
    /// next action.
    pub fn reset(&mut self) {
        self.state = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_requires_an_active_game() {
        let mut session = GameSession::new();
        let result = session.apply(1, PlayerAction::EndPhase);
        assert_eq!(result.unwrap_err(), SessionError::NoActiveGame);
    }

    #[test]
    fn session_persists_applied_state() {
        let mut session = GameSession::new();
        session.new_game_seeded("Ada", "Bo", 70);

        session
            .apply(1, PlayerAction::EndPhase)
            .expect("phase pass is always legal");
        let state = session.state().expect("state is live");
        assert_eq!(state.phase, GamePhase::Placement);
    }

    #[test]
    fn session_rejections_keep_the_stored_snapshot() {
        let mut session = GameSession::new();
        session.new_game_seeded("Ada", "Bo", 71);
        let snapshot = session.state().cloned();

        let result = session.apply(2, PlayerAction::EndPhase);
        assert!(matches!(
            result,
            Err(SessionError::Rejected {
                rejection: Rejection::NotYourTurn
            })
        ));
        assert_eq!(session.state().cloned(), snapshot);
    }

    #[test]
    fn reset_discards_the_game() {
        let mut session = GameSession::new();
        session.new_game_seeded("Ada", "Bo", 72);
        session.reset();
        assert!(session.state().is_none());
        assert_eq!(session.check_winner(), None);
    }

    #[test]
    fn scripted_moves_share_the_human_entry_point() {
        let mut session = GameSession::new();
        session.new_game_seeded("Ada", "Bot", 73);

        // Hand the turn to the scripted seat.
        for _ in 0..4 {
            session.apply(1, PlayerAction::EndPhase).expect("pass");
        }
        assert_eq!(session.state().map(|s| s.current_player), Some(2));

        let (action, resolution) = session.apply_scripted_move().expect("bot move applies");
        assert_eq!(action, PlayerAction::EndPhase, "draw phase always passes");
        assert_eq!(resolution.state.phase, GamePhase::Placement);
    }
}

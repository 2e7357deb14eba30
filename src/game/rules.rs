use serde::{Deserialize, Serialize};
use std::fmt;

use super::cards::{CardId, CardType, Creature, FeignCard, GlobalEffect, PlayerId};
use super::combat::resolve_attack;
use super::effects::EffectRegistry;
use super::state::{GamePhase, GameState, MANA_PER_TURN};

/// The closed action vocabulary a seat may submit. Human and scripted
/// players share it, and the engine has exactly one entry point for
/// both.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum PlayerAction {
    PlayCreature { card_id: CardId },
    PlayFeign { card_id: CardId },
    PlayEffect { card_id: CardId },
    Attack { creature_index: usize },
    RevealFeign { feign_index: usize },
    EndPhase,
}

/// Why an action was refused. Every rejection is non-fatal, leaves the
/// submitted state untouched, and renders a shell-facing reason.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum Rejection {
    NotYourTurn,
    WrongPhase { phase: GamePhase },
    InvalidTarget { reason: String },
    InsufficientMana { required: u8, available: u8 },
    AlreadyTapped { creature_index: usize },
    EmptyHandOrBoard { index: usize },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::NotYourTurn => write!(f, "it's not your turn"),
            Rejection::WrongPhase { phase } => {
                write!(f, "that action is not legal during the {phase:?} phase")
            }
            Rejection::InvalidTarget { reason } => write!(f, "{reason}"),
            Rejection::InsufficientMana {
                required,
                available,
            } => write!(f, "not enough mana: need {required}, have {available}"),
            Rejection::AlreadyTapped { creature_index } => write!(
                f,
                "creature {creature_index} has already attacked this turn"
            ),
            Rejection::EmptyHandOrBoard { index } => {
                write!(f, "nothing at board index {index}")
            }
        }
    }
}

impl std::error::Error for Rejection {}

/// Outcome of a successful action: the replacement state plus the log
/// lines this action appended.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleResolution {
    pub state: GameState,
    pub log: Vec<String>,
}

/// Validates and applies actions. Holds the effect-rule configuration;
/// everything else lives in the state it is handed.
#[derive(Default)]
pub struct RuleEngine {
    effects: EffectRegistry,
}

impl RuleEngine {
    pub fn new() -> Self {
        Self {
            effects: EffectRegistry::builtin(),
        }
    }

    /// Swaps in a custom effect catalog.
    pub fn with_effects(effects: EffectRegistry) -> Self {
        Self { effects }
    }

    /// The single entry point of the rules engine.
    ///
    /// Checks run in order: priority, phase legality, action-specific
    /// validation; the first failure rejects. On success the input state
    /// is left untouched and the resolution carries its replacement.
    pub fn apply(
        &self,
        state: &GameState,
        player_id: PlayerId,
        action: PlayerAction,
    ) -> Result<RuleResolution, Rejection> {
        log::debug!("apply: player {player_id} submits {action:?}");

        if player_id != state.current_player {
            return Err(Rejection::NotYourTurn);
        }
        if !legal_in_phase(state.phase, &action) {
            return Err(Rejection::WrongPhase { phase: state.phase });
        }

        let mut next = state.clone();
        let log_mark = next.game_log.len();

        match action {
            PlayerAction::PlayCreature { card_id } => {
                self.play_card(&mut next, player_id, card_id, CardType::Creature)?
            }
            PlayerAction::PlayFeign { card_id } => {
                self.play_card(&mut next, player_id, card_id, CardType::Feign)?
            }
            PlayerAction::PlayEffect { card_id } => {
                self.play_card(&mut next, player_id, card_id, CardType::Effect)?
            }
            PlayerAction::Attack { creature_index } => {
                self.attack(&mut next, player_id, creature_index)?
            }
            PlayerAction::RevealFeign { feign_index } => {
                self.reveal_feign(&mut next, player_id, feign_index)?
            }
            PlayerAction::EndPhase => self.end_phase(&mut next),
        }

        let log = next.game_log[log_mark..].to_vec();
        Ok(RuleResolution { state: next, log })
    }

    /// Shared path for the three Play* actions: find the card, check its
    /// type and cost, then debit mana and put it into play.
    fn play_card(
        &self,
        state: &mut GameState,
        player_id: PlayerId,
        card_id: CardId,
        expected: CardType,
    ) -> Result<(), Rejection> {
        let player = state
            .player(player_id)
            .ok_or(Rejection::NotYourTurn)?;

        let hand_index =
            player
                .find_card_in_hand_index(card_id)
                .ok_or_else(|| Rejection::InvalidTarget {
                    reason: format!("card {card_id} is not in your hand"),
                })?;

        let card = &player.hand[hand_index];
        if card.card_type != expected {
            return Err(Rejection::InvalidTarget {
                reason: format!("{} is not a {expected:?} card", card.name),
            });
        }
        if card.mana_cost > player.mana {
            return Err(Rejection::InsufficientMana {
                required: card.mana_cost,
                available: player.mana,
            });
        }

        // Validation is done; mutations start here.
        let line;
        {
            let player = match state.player_mut(player_id) {
                Some(player) => player,
                None => return Err(Rejection::NotYourTurn),
            };
            let card = player.hand.remove(hand_index);
            player.mana -= card.mana_cost;

            match expected {
                CardType::Creature => {
                    line = format!("{} plays {}", player.name, card.name);
                    player.board.creatures.push(Creature::summon(card));
                }
                CardType::Feign => {
                    // The card name stays out of the log until revealed.
                    line = format!("{} plays a feign card", player.name);
                    player.board.feigns.push(FeignCard::face_down(card));
                }
                CardType::Effect => {
                    line = format!("{} plays global effect: {}", player.name, card.name);
                    // A new global effect replaces any active one.
                    state.global_effect = Some(GlobalEffect::activate(card));
                }
            }
        }
        state.log(line);
        Ok(())
    }

    fn attack(
        &self,
        state: &mut GameState,
        player_id: PlayerId,
        creature_index: usize,
    ) -> Result<(), Rejection> {
        let creature = state
            .player(player_id)
            .and_then(|player| player.board.creatures.get(creature_index))
            .ok_or(Rejection::EmptyHandOrBoard {
                index: creature_index,
            })?;
        if creature.is_tapped {
            return Err(Rejection::AlreadyTapped { creature_index });
        }

        for line in resolve_attack(state, player_id, creature_index) {
            state.log(line);
        }
        Ok(())
    }

    fn reveal_feign(
        &self,
        state: &mut GameState,
        player_id: PlayerId,
        feign_index: usize,
    ) -> Result<(), Rejection> {
        let feign = state
            .player(player_id)
            .and_then(|player| player.board.feigns.get(feign_index))
            .ok_or(Rejection::EmptyHandOrBoard { index: feign_index })?;
        if feign.is_revealed {
            return Err(Rejection::InvalidTarget {
                reason: format!("feign {feign_index} is already revealed"),
            });
        }

        let card = feign.card.clone();
        let owner_name = state
            .player(player_id)
            .map(|player| player.name.clone())
            .unwrap_or_default();
        if let Some(feign) = state
            .player_mut(player_id)
            .and_then(|player| player.board.feigns.get_mut(feign_index))
        {
            feign.is_revealed = true;
        }
        state.log(format!("{owner_name} reveals feign: {}", card.name));

        for line in self.effects.resolve_reveal(state, player_id, &card) {
            state.log(line);
        }
        Ok(())
    }

    /// The phase state machine. `EndPhase` never fails for a legal
    /// caller; transition side effects are bound to specific edges.
    fn end_phase(&self, state: &mut GameState) {
        match state.phase {
            GamePhase::Draw => {
                // Exactly one draw per Draw-phase exit, plus the turn's
                // mana income.
                state.draw_for(state.current_player);
                if let Some(player) = state.player_mut(state.current_player) {
                    player.mana = player.mana.saturating_add(MANA_PER_TURN);
                }
                state.phase = GamePhase::Placement;
                state.log("Entering placement phase");
            }
            GamePhase::Placement => {
                state.phase = GamePhase::Attack;
                state.log("Entering attack phase");
            }
            GamePhase::Attack => {
                state.phase = GamePhase::EndTurn;
                state.log("Entering end turn phase");
            }
            GamePhase::EndTurn => {
                if let Some(expiry) = state.tick_global_effect() {
                    state.log(expiry);
                }

                state.current_player = GameState::opponent_id(state.current_player);
                state.turn_number += 1;
                state.phase = GamePhase::Draw;

                let incoming = state.current_player;
                if let Some(player) = state.player_mut(incoming) {
                    player.untap_board();
                }

                let line = state
                    .player(incoming)
                    .map(|player| {
                        format!(
                            "Turn {}: {}'s turn begins",
                            state.turn_number, player.name
                        )
                    })
                    .unwrap_or_default();
                state.log(line);
            }
        }
    }
}

/// Phase/action legality table, checked exhaustively.
fn legal_in_phase(phase: GamePhase, action: &PlayerAction) -> bool {
    match phase {
        GamePhase::Draw | GamePhase::EndTurn => matches!(action, PlayerAction::EndPhase),
        GamePhase::Placement => matches!(
            action,
            PlayerAction::PlayCreature { .. }
                | PlayerAction::PlayFeign { .. }
                | PlayerAction::PlayEffect { .. }
                | PlayerAction::RevealFeign { .. }
                | PlayerAction::EndPhase
        ),
        GamePhase::Attack => matches!(
            action,
            PlayerAction::Attack { .. }
                | PlayerAction::RevealFeign { .. }
                | PlayerAction::EndPhase
        ),
    }
}

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::cards::{Card, CardDefect, CardId, Creature, FeignCard, GlobalEffect, PlayerId};
use super::catalog::{shuffle_deck, starter_deck, STARTER_DECK_SIZE};

pub const STARTING_LIFE: i16 = 20;
pub const STARTING_MANA: u8 = 5;
pub const OPENING_HAND_SIZE: usize = 5;
/// Mana income granted when the Draw phase ends.
pub const MANA_PER_TURN: u8 = 2;

/// One turn is four phases; `EndPhase` from the priority holder is the
/// only transition trigger.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum GamePhase {
    Draw,
    Placement,
    Attack,
    EndTurn,
}

impl Default for GamePhase {
    fn default() -> Self {
        GamePhase::Draw
    }
}

/// Per-player battlefield: stable, indexable slots for creatures and
/// face-down feigns.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerBoard {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub creatures: Vec<Creature>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub feigns: Vec<FeignCard>,
}

impl PlayerBoard {
    /// Lowest board index holding an untapped creature, if any.
    pub fn first_untapped_creature(&self) -> Option<usize> {
        self.creatures.iter().position(|creature| !creature.is_tapped)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub life: i16,
    pub mana: u8,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hand: Vec<Card>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub deck: Vec<Card>,
    #[serde(default)]
    pub board: PlayerBoard,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            life: STARTING_LIFE,
            mana: STARTING_MANA,
            hand: Vec::new(),
            deck: Vec::new(),
            board: PlayerBoard::default(),
        }
    }

    pub fn find_card_in_hand_index(&self, card_id: CardId) -> Option<usize> {
        self.hand.iter().position(|card| card.id == card_id)
    }

    /// Draw is from the top of the deck (the back of the vector).
    pub fn draw_from_deck(&mut self) -> Option<&Card> {
        let card = self.deck.pop()?;
        self.hand.push(card);
        self.hand.last()
    }

    pub fn untap_board(&mut self) {
        for creature in &mut self.board.creatures {
            creature.is_tapped = false;
        }
    }
}

/// Terminal result of a game, surfaced by `check_winner`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum GameOutcome {
    Winner { player_id: PlayerId },
    Draw,
}

/// Structural problems a state snapshot can carry. Diagnostic aid for
/// shells and tests, not part of the per-action path.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum IntegrityError {
    UnknownCurrentPlayer { player_id: PlayerId },
    DuplicateCardId { card_id: CardId },
    BadTemplate { defect: CardDefect },
}

/// The single source of truth. Replaced wholesale on every successful
/// action; shells never mutate it directly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameState {
    pub player1: Player,
    pub player2: Player,
    pub current_player: PlayerId,
    pub turn_number: u32,
    pub phase: GamePhase,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_effect: Option<GlobalEffect>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub game_log: Vec<String>,
}

impl GameState {
    /// Starts a fresh game: shuffled starter decks, opening hands dealt,
    /// player 1 holding priority in the Draw phase of turn 1.
    pub fn new_game(player1_name: impl Into<String>, player2_name: impl Into<String>) -> Self {
        Self::new_game_with_rng(player1_name, player2_name, &mut SmallRng::from_entropy())
    }

    /// Seeded variant for reproducible games and tests.
    pub fn new_game_seeded(
        player1_name: impl Into<String>,
        player2_name: impl Into<String>,
        seed: u64,
    ) -> Self {
        Self::new_game_with_rng(player1_name, player2_name, &mut SmallRng::seed_from_u64(seed))
    }

    fn new_game_with_rng<R: Rng>(
        player1_name: impl Into<String>,
        player2_name: impl Into<String>,
        rng: &mut R,
    ) -> Self {
        let mut player1 = Player::new(1, player1_name);
        let mut player2 = Player::new(2, player2_name);

        player1.deck = starter_deck(1);
        player2.deck = starter_deck(1 + STARTER_DECK_SIZE as CardId);
        shuffle_deck(&mut player1.deck, rng);
        shuffle_deck(&mut player2.deck, rng);

        let mut state = Self {
            player1,
            player2,
            current_player: 1,
            turn_number: 1,
            phase: GamePhase::Draw,
            global_effect: None,
            game_log: Vec::new(),
        };
        state.log("Game started!");

        for id in [1, 2] {
            if let Some(player) = state.player_mut(id) {
                for _ in 0..OPENING_HAND_SIZE {
                    player.draw_from_deck();
                }
            }
        }
        let line = format!(
            "{} and {} draw opening hands of {} cards",
            state.player1.name, state.player2.name, OPENING_HAND_SIZE
        );
        state.log(line);

        state
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        match id {
            1 => Some(&self.player1),
            2 => Some(&self.player2),
            _ => None,
        }
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        match id {
            1 => Some(&mut self.player1),
            2 => Some(&mut self.player2),
            _ => None,
        }
    }

    pub fn opponent_id(player_id: PlayerId) -> PlayerId {
        if player_id == 1 {
            2
        } else {
            1
        }
    }

    /// Appends one narrative line to the game log.
    pub fn log(&mut self, line: impl Into<String>) {
        let line = line.into();
        log::debug!("game log: {line}");
        self.game_log.push(line);
    }

    /// Moves the top card of `player_id`'s deck into their hand. An empty
    /// deck is a disadvantage, not a fault: it logs a warning and the
    /// game continues.
    pub fn draw_for(&mut self, player_id: PlayerId) -> bool {
        let (drawn, line) = match self.player_mut(player_id) {
            Some(player) => {
                let drew = player.draw_from_deck().is_some();
                if drew {
                    (true, format!("{} draws a card", player.name))
                } else {
                    log::warn!("player {player_id} cannot draw from an empty deck");
                    (false, format!("{} cannot draw - deck is empty!", player.name))
                }
            }
            None => return false,
        };
        self.log(line);
        drawn
    }

    /// Decrements the active global effect, dropping it at zero. Returns
    /// the log line for an expiry.
    pub fn tick_global_effect(&mut self) -> Option<String> {
        let effect = self.global_effect.as_mut()?;
        effect.remaining_duration = effect.remaining_duration.saturating_sub(1);
        if effect.remaining_duration == 0 {
            let name = effect.card.name.clone();
            self.global_effect = None;
            Some(format!("Global effect {name} expires"))
        } else {
            None
        }
    }

    /// Smallest card id above every id in play, for cards the engine
    /// mints mid-game (for example summoned tokens).
    pub fn next_card_id(&self) -> CardId {
        self.all_cards().map(|card| card.id).max().unwrap_or(0) + 1
    }

    fn all_cards(&self) -> impl Iterator<Item = &Card> {
        [&self.player1, &self.player2].into_iter().flat_map(|player| {
            player
                .hand
                .iter()
                .chain(player.deck.iter())
                .chain(player.board.creatures.iter().map(|creature| &creature.card))
                .chain(player.board.feigns.iter().map(|feign| &feign.card))
        })
    }

    /// Winner when exactly one player's life is depleted, a draw when
    /// both are. The engine never force-terminates; callers stop the
    /// game by consulting this after each action.
    pub fn check_winner(&self) -> Option<GameOutcome> {
        let p1_dead = self.player1.life <= 0;
        let p2_dead = self.player2.life <= 0;
        match (p1_dead, p2_dead) {
            (true, true) => Some(GameOutcome::Draw),
            (true, false) => Some(GameOutcome::Winner { player_id: 2 }),
            (false, true) => Some(GameOutcome::Winner { player_id: 1 }),
            (false, false) => None,
        }
    }

    pub fn integrity_check(&self) -> Result<(), IntegrityError> {
        if self.player(self.current_player).is_none() {
            return Err(IntegrityError::UnknownCurrentPlayer {
                player_id: self.current_player,
            });
        }

        let mut seen = HashSet::new();
        for card in self.all_cards() {
            if !seen.insert(card.id) {
                return Err(IntegrityError::DuplicateCardId { card_id: card.id });
            }
            card.validate()
                .map_err(|defect| IntegrityError::BadTemplate { defect })?;
        }
        Ok(())
    }
}

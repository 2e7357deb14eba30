use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::cards::{Card, Creature, PlayerId};
use super::state::GameState;

/// Generic modifiers the engine knows how to apply when a feign is
/// revealed. Which card maps to which rule is configuration, not engine
/// logic; shells may swap in their own `EffectRegistry`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum EffectRule {
    GainMana { amount: u8 },
    DamageOpponent { amount: i16 },
    HealOwner { amount: i16 },
    BuffOwnCreatures { attack: i16, defense: i16 },
    WeakenEnemyCreatures { amount: i16 },
    SummonCreature { name: String, attack: i16, defense: i16 },
}

impl EffectRule {
    /// Applies the modifier for `owner`, returning the narrative lines.
    /// Rules never fail; one with nothing to act on is a no-op.
    pub fn apply(&self, state: &mut GameState, owner: PlayerId, source: &Card) -> Vec<String> {
        let mut lines = Vec::new();
        match self {
            EffectRule::GainMana { amount } => {
                if let Some(player) = state.player_mut(owner) {
                    player.mana = player.mana.saturating_add(*amount);
                    lines.push(format!(
                        "{} gains {} mana from {}",
                        player.name, amount, source.name
                    ));
                }
            }
            EffectRule::DamageOpponent { amount } => {
                if *amount <= 0 {
                    return lines;
                }
                if let Some(opponent) = state.player_mut(GameState::opponent_id(owner)) {
                    opponent.life -= amount;
                    lines.push(format!(
                        "{} strikes {} for {} damage (Life: {})",
                        source.name, opponent.name, amount, opponent.life
                    ));
                }
            }
            EffectRule::HealOwner { amount } => {
                if *amount <= 0 {
                    return lines;
                }
                if let Some(player) = state.player_mut(owner) {
                    player.life = player.life.saturating_add(*amount);
                    lines.push(format!(
                        "{} restores {} life to {} (Life: {})",
                        source.name, amount, player.name, player.life
                    ));
                }
            }
            EffectRule::BuffOwnCreatures { attack, defense } => {
                if let Some(player) = state.player_mut(owner) {
                    if player.board.creatures.is_empty() {
                        return lines;
                    }
                    for creature in &mut player.board.creatures {
                        creature.current_attack += attack;
                        creature.current_defense += defense;
                    }
                    lines.push(format!(
                        "{} grants {}'s creatures +{}/+{}",
                        source.name, player.name, attack, defense
                    ));
                }
            }
            EffectRule::WeakenEnemyCreatures { amount } => {
                if let Some(opponent) = state.player_mut(GameState::opponent_id(owner)) {
                    if opponent.board.creatures.is_empty() {
                        return lines;
                    }
                    for creature in &mut opponent.board.creatures {
                        // Attack never drops below zero.
                        creature.current_attack = (creature.current_attack - amount).max(0);
                    }
                    lines.push(format!(
                        "{} saps {} attack from {}'s creatures",
                        source.name, amount, opponent.name
                    ));
                }
            }
            EffectRule::SummonCreature {
                name,
                attack,
                defense,
            } => {
                let token_id = state.next_card_id();
                if let Some(player) = state.player_mut(owner) {
                    let token = Card::creature(
                        token_id,
                        name.clone(),
                        source.color,
                        0,
                        format!("Conjured by {}", source.name),
                        *attack,
                        *defense,
                    );
                    player.board.creatures.push(Creature::summon(token));
                    lines.push(format!(
                        "{} conjures {} ({}/{}) for {}",
                        source.name, name, attack, defense, player.name
                    ));
                }
            }
        }
        lines
    }
}

static BUILTIN_RULES: Lazy<HashMap<&'static str, EffectRule>> = Lazy::new(|| {
    HashMap::from([
        (
            "Shield Trap",
            EffectRule::BuffOwnCreatures {
                attack: 0,
                defense: 2,
            },
        ),
        ("Counter Strike", EffectRule::DamageOpponent { amount: 2 }),
        ("Mana Boost", EffectRule::GainMana { amount: 2 }),
        (
            "Illusion",
            EffectRule::SummonCreature {
                name: "Illusory Phantom".to_string(),
                attack: 2,
                defense: 2,
            },
        ),
        ("Soul Drain", EffectRule::WeakenEnemyCreatures { amount: 1 }),
        (
            "Arcane Resonance",
            EffectRule::BuffOwnCreatures {
                attack: 1,
                defense: 1,
            },
        ),
    ])
});

/// Card-name-to-rule table consulted at reveal time.
#[derive(Debug, Clone)]
pub struct EffectRegistry {
    rules: HashMap<String, EffectRule>,
}

impl EffectRegistry {
    /// Registry covering the starter-deck feigns.
    pub fn builtin() -> Self {
        Self {
            rules: BUILTIN_RULES
                .iter()
                .map(|(name, rule)| (name.to_string(), rule.clone()))
                .collect(),
        }
    }

    pub fn empty() -> Self {
        Self {
            rules: HashMap::new(),
        }
    }

    pub fn insert(&mut self, card_name: impl Into<String>, rule: EffectRule) {
        self.rules.insert(card_name.into(), rule);
    }

    pub fn rule_for(&self, card_name: &str) -> Option<&EffectRule> {
        self.rules.get(card_name)
    }

    /// Resolves a revealed feign's effect. Cards without a configured
    /// rule still produce a narrative line.
    pub fn resolve_reveal(
        &self,
        state: &mut GameState,
        owner: PlayerId,
        card: &Card,
    ) -> Vec<String> {
        match self.rule_for(&card.name) {
            Some(rule) => rule.apply(state, owner, card),
            None => vec![format!("{} effect activates", card.name)],
        }
    }
}

impl Default for EffectRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::cards::Color;

    fn feign(name: &str) -> Card {
        Card::feign(500, name, Color::Violet, 1, "")
    }

    #[test]
    fn mana_boost_credits_owner_only() {
        let mut state = GameState::new_game_seeded("Ada", "Bo", 10);
        let before_p1 = state.player1.mana;
        let before_p2 = state.player2.mana;

        let lines = EffectRegistry::builtin().resolve_reveal(&mut state, 1, &feign("Mana Boost"));
        assert_eq!(state.player1.mana, before_p1 + 2);
        assert_eq!(state.player2.mana, before_p2);
        assert!(lines[0].contains("gains 2 mana"));
    }

    #[test]
    fn weaken_floors_attack_at_zero() {
        let mut state = GameState::new_game_seeded("Ada", "Bo", 11);
        let sprite = Card::creature(600, "Vine Sprite", Color::Verdant, 1, "", 1, 1);
        state.player2.board.creatures.push(Creature::summon(sprite));

        let rule = EffectRule::WeakenEnemyCreatures { amount: 3 };
        rule.apply(&mut state, 1, &feign("Soul Drain"));
        assert_eq!(state.player2.board.creatures[0].current_attack, 0);
    }

    #[test]
    fn summoned_token_gets_a_fresh_id() {
        let mut state = GameState::new_game_seeded("Ada", "Bo", 12);
        let source = feign("Illusion");

        EffectRegistry::builtin().resolve_reveal(&mut state, 2, &source);
        let token = state
            .player2
            .board
            .creatures
            .last()
            .expect("token should be summoned");
        assert_eq!(token.card.name, "Illusory Phantom");
        assert!(state.integrity_check().is_ok(), "token id must be unique");
    }

    #[test]
    fn unknown_card_still_narrates() {
        let mut state = GameState::new_game_seeded("Ada", "Bo", 13);
        let snapshot = state.clone();

        let lines = EffectRegistry::builtin().resolve_reveal(&mut state, 1, &feign("Mystery Rune"));
        assert_eq!(lines, vec!["Mystery Rune effect activates".to_string()]);
        assert_eq!(state, snapshot, "unknown rules must not mutate state");
    }

    #[test]
    fn registry_overrides_replace_builtin_rules() {
        let mut registry = EffectRegistry::builtin();
        registry.insert("Mana Boost", EffectRule::GainMana { amount: 5 });

        let mut state = GameState::new_game_seeded("Ada", "Bo", 14);
        let before = state.player1.mana;
        registry.resolve_reveal(&mut state, 1, &feign("Mana Boost"));
        assert_eq!(state.player1.mana, before + 5);
    }
}

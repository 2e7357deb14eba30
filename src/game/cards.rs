use serde::{Deserialize, Serialize};

/// Unique card identifier within a single game.
pub type CardId = u32;
/// Player seat identifier (1 or 2).
pub type PlayerId = u8;

/// Duration used when an effect card omits its own.
pub const DEFAULT_EFFECT_DURATION: u8 = 3;

/// The six color identities of Feign.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Color {
    Verdant,
    Cinder,
    Azure,
    Ivory,
    Umbral,
    Violet,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CardType {
    Creature,
    Feign,
    Effect,
}

/// Immutable card template. Board instances wrap a `Card` and carry
/// their own mutable state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Card {
    pub id: CardId,
    pub name: String,
    pub card_type: CardType,
    pub color: Color,
    pub mana_cost: u8,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attack: Option<i16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defense: Option<i16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u8>,
}

/// Ways a card template can violate the type-specific field rules.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum CardDefect {
    MissingCombatStats { card_id: CardId },
    StrayCombatStats { card_id: CardId },
    MissingDuration { card_id: CardId },
    StrayDuration { card_id: CardId },
}

impl Card {
    pub fn creature(
        id: CardId,
        name: impl Into<String>,
        color: Color,
        mana_cost: u8,
        description: impl Into<String>,
        attack: i16,
        defense: i16,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            card_type: CardType::Creature,
            color,
            mana_cost,
            description: description.into(),
            attack: Some(attack),
            defense: Some(defense),
            duration: None,
        }
    }

    pub fn feign(
        id: CardId,
        name: impl Into<String>,
        color: Color,
        mana_cost: u8,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            card_type: CardType::Feign,
            color,
            mana_cost,
            description: description.into(),
            attack: None,
            defense: None,
            duration: None,
        }
    }

    pub fn effect(
        id: CardId,
        name: impl Into<String>,
        color: Color,
        mana_cost: u8,
        description: impl Into<String>,
        duration: u8,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            card_type: CardType::Effect,
            color,
            mana_cost,
            description: description.into(),
            attack: None,
            defense: None,
            duration: Some(duration),
        }
    }

    /// Checks the type-specific field invariants: attack/defense are both
    /// present iff the card is a creature, duration iff it is an effect.
    pub fn validate(&self) -> Result<(), CardDefect> {
        match self.card_type {
            CardType::Creature => {
                if self.attack.is_none() || self.defense.is_none() {
                    return Err(CardDefect::MissingCombatStats { card_id: self.id });
                }
            }
            CardType::Feign | CardType::Effect => {
                if self.attack.is_some() || self.defense.is_some() {
                    return Err(CardDefect::StrayCombatStats { card_id: self.id });
                }
            }
        }
        match self.card_type {
            CardType::Effect => {
                if self.duration.is_none() {
                    return Err(CardDefect::MissingDuration { card_id: self.id });
                }
            }
            CardType::Creature | CardType::Feign => {
                if self.duration.is_some() {
                    return Err(CardDefect::StrayDuration { card_id: self.id });
                }
            }
        }
        Ok(())
    }
}

/// A creature in play. Current stats may diverge from the template
/// through effects; `is_tapped` resets at its controller's next turn.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Creature {
    pub card: Card,
    pub current_attack: i16,
    pub current_defense: i16,
    #[serde(default)]
    pub is_tapped: bool,
}

impl Creature {
    /// Puts a creature card onto the board with its base stats, untapped.
    pub fn summon(card: Card) -> Self {
        let current_attack = card.attack.unwrap_or(0);
        let current_defense = card.defense.unwrap_or(0);
        Self {
            card,
            current_attack,
            current_defense,
            is_tapped: false,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.current_defense <= 0
    }
}

/// A feign in play. Starts face-down and flips face-up exactly once.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeignCard {
    pub card: Card,
    #[serde(default)]
    pub is_revealed: bool,
}

impl FeignCard {
    pub fn face_down(card: Card) -> Self {
        Self {
            card,
            is_revealed: false,
        }
    }
}

/// The single board-wide effect that may be active, ticking down once
/// per full turn cycle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GlobalEffect {
    pub card: Card,
    pub remaining_duration: u8,
}

impl GlobalEffect {
    pub fn activate(card: Card) -> Self {
        let remaining_duration = card.duration.unwrap_or(DEFAULT_EFFECT_DURATION);
        Self {
            card,
            remaining_duration,
        }
    }
}

use rand::seq::SliceRandom;
use rand::Rng;

use super::cards::{Card, CardId, Color};

/// Number of cards in the starter deck each player begins with.
pub const STARTER_DECK_SIZE: usize = 25;

/// Builds the starter deck with card ids numbered sequentially from
/// `base_id`, so two decks in the same game never collide.
///
/// The deck is returned in catalog order; shuffle it before play.
pub fn starter_deck(base_id: CardId) -> Vec<Card> {
    let mut deck = vec![
        // Verdant: growth and board presence.
        Card::creature(0, "Forest Wolf", Color::Verdant, 2, "A swift predator of the deep woods", 3, 2),
        Card::creature(0, "Ancient Treant", Color::Verdant, 5, "Guardian of the ancient forest", 4, 6),
        Card::creature(0, "Vine Sprite", Color::Verdant, 1, "Small but nimble forest spirit", 1, 1),
        // Cinder: aggression.
        Card::creature(0, "Fire Imp", Color::Cinder, 1, "Mischievous creature of flame", 2, 1),
        Card::creature(0, "Flame Dragon", Color::Cinder, 6, "Mighty dragon wreathed in fire", 7, 5),
        Card::creature(0, "Ember Warrior", Color::Cinder, 3, "Warrior forged in the heart of a volcano", 4, 2),
        // Azure: control.
        Card::creature(0, "Frost Elemental", Color::Azure, 3, "Elemental born from winter's breath", 2, 4),
        Card::creature(0, "Storm Caller", Color::Azure, 4, "Mage who commands the tempest", 3, 3),
        // Ivory: protection.
        Card::creature(0, "Guardian Angel", Color::Ivory, 4, "Divine protector of the innocent", 2, 5),
        Card::creature(0, "Holy Knight", Color::Ivory, 3, "Righteous warrior blessed by light", 3, 3),
        // Umbral: sacrifice and decay.
        Card::creature(0, "Shadow Wraith", Color::Umbral, 2, "Vengeful spirit from the void", 3, 1),
        Card::creature(0, "Bone Golem", Color::Umbral, 4, "Construct animated by dark magic", 4, 4),
        // Violet: effect synergy.
        Card::creature(0, "Mystic Scholar", Color::Violet, 2, "Student of arcane mysteries", 1, 3),
        // Feigns, one per color.
        Card::feign(0, "Shield Trap", Color::Ivory, 1, "Reduces incoming damage when revealed"),
        Card::feign(0, "Counter Strike", Color::Cinder, 2, "Deals damage to attacker when revealed"),
        Card::feign(0, "Mana Boost", Color::Verdant, 1, "Grants extra mana when revealed"),
        Card::feign(0, "Illusion", Color::Azure, 2, "Creates a temporary creature when revealed"),
        Card::feign(0, "Soul Drain", Color::Umbral, 2, "Weakens enemy creatures when revealed"),
        Card::feign(0, "Arcane Resonance", Color::Violet, 1, "Gains power from global effects"),
        // Global effects.
        Card::effect(0, "Blessing of Growth", Color::Verdant, 3, "All creatures gain +1/+1", 3),
        Card::effect(0, "Inferno", Color::Cinder, 4, "All creatures take 1 damage each turn", 2),
        Card::effect(0, "Frozen Time", Color::Azure, 5, "Players draw an extra card each turn", 4),
        Card::effect(0, "Divine Protection", Color::Ivory, 3, "All damage is reduced by 1", 3),
        Card::effect(0, "Curse of Weakness", Color::Umbral, 2, "All creatures have -1 attack", 2),
        Card::effect(0, "Arcane Amplification", Color::Violet, 4, "Violet creatures gain +2/+2", 3),
    ];

    for (offset, card) in deck.iter_mut().enumerate() {
        card.id = base_id + offset as CardId;
    }
    deck
}

pub fn shuffle_deck<R: Rng>(deck: &mut [Card], rng: &mut R) {
    deck.shuffle(rng);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn starter_deck_is_well_formed() {
        let deck = starter_deck(1);
        assert_eq!(deck.len(), STARTER_DECK_SIZE);
        for card in &deck {
            assert!(card.validate().is_ok(), "bad template: {}", card.name);
        }
    }

    #[test]
    fn sequential_ids_never_collide_across_decks() {
        let first = starter_deck(1);
        let second = starter_deck(1 + STARTER_DECK_SIZE as CardId);

        let mut seen = HashSet::new();
        for card in first.iter().chain(second.iter()) {
            assert!(seen.insert(card.id), "duplicate id {}", card.id);
        }
    }

    #[test]
    fn seeded_shuffle_is_reproducible() {
        let mut a = starter_deck(1);
        let mut b = starter_deck(1);
        shuffle_deck(&mut a, &mut SmallRng::seed_from_u64(7));
        shuffle_deck(&mut b, &mut SmallRng::seed_from_u64(7));
        assert_eq!(a, b);
    }
}

use super::cards::PlayerId;
use super::state::{GameState, Player};

/// Resolves a declared attack for the creature at `creature_index` on
/// the attacker's board. Phase, ownership, bounds and tap state are
/// validated upstream by the rule engine.
///
/// Blocking is mandatory and not a choice: the defender's lowest-index
/// untapped creature blocks, otherwise the attack hits the player.
/// Blocked combat damage is simultaneous; a creature dealing lethal
/// damage is not saved by also dying. The attacker ends tapped either
/// way.
pub(crate) fn resolve_attack(
    state: &mut GameState,
    attacker_owner: PlayerId,
    creature_index: usize,
) -> Vec<String> {
    let mut lines = Vec::new();
    let (attacker, defender) = split_players(state, attacker_owner);

    let attacking = match attacker.board.creatures.get_mut(creature_index) {
        Some(creature) => creature,
        None => return lines,
    };
    attacking.is_tapped = true;
    let attacker_name = attacking.card.name.clone();
    let attacker_damage = attacking.current_attack;

    lines.push(format!(
        "{} attacks with {} (ATK: {})",
        attacker.name, attacker_name, attacker_damage
    ));

    match defender.board.first_untapped_creature() {
        Some(blocker_index) => {
            let blocker = &mut defender.board.creatures[blocker_index];
            let blocker_name = blocker.card.name.clone();
            let blocker_damage = blocker.current_attack;
            lines.push(format!(
                "{} blocks with {} (ATK: {})",
                defender.name, blocker_name, blocker_damage
            ));

            // Both subtractions land before either corpse is cleared.
            blocker.current_defense -= attacker_damage;
            let attacking = &mut attacker.board.creatures[creature_index];
            attacking.current_defense -= blocker_damage;

            let attacker_died = attacker.board.creatures[creature_index].is_dead();
            let blocker_died = defender.board.creatures[blocker_index].is_dead();

            if blocker_died {
                defender.board.creatures.remove(blocker_index);
                lines.push(format!("{blocker_name} is destroyed!"));
            } else {
                let remaining = defender.board.creatures[blocker_index].current_defense;
                lines.push(format!(
                    "{blocker_name} survives with {remaining} defense remaining"
                ));
            }

            if attacker_died {
                attacker.board.creatures.remove(creature_index);
                lines.push(format!("{attacker_name} is destroyed in combat!"));
            } else {
                let remaining = attacker.board.creatures[creature_index].current_defense;
                lines.push(format!(
                    "{attacker_name} survives with {remaining} defense remaining"
                ));
            }
        }
        None => {
            defender.life -= attacker_damage;
            lines.push(format!(
                "{} deals {} damage directly to {} (Life: {})",
                attacker_name, attacker_damage, defender.name, defender.life
            ));
        }
    }

    lines
}

fn split_players(state: &mut GameState, attacker_owner: PlayerId) -> (&mut Player, &mut Player) {
    if attacker_owner == 1 {
        (&mut state.player1, &mut state.player2)
    } else {
        (&mut state.player2, &mut state.player1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::cards::{Card, Color, Creature};

    fn creature(id: u32, name: &str, attack: i16, defense: i16) -> Creature {
        Creature::summon(Card::creature(id, name, Color::Cinder, 2, "", attack, defense))
    }

    fn arena() -> GameState {
        GameState::new_game_seeded("Ada", "Bo", 20)
    }

    #[test]
    fn unblocked_attack_hits_the_player() {
        let mut state = arena();
        state.player1.board.creatures.push(creature(700, "Fire Imp", 2, 1));

        let lines = resolve_attack(&mut state, 1, 0);
        assert_eq!(state.player2.life, 18);
        assert!(state.player1.board.creatures[0].is_tapped);
        assert!(lines.iter().any(|line| line.contains("directly")));
    }

    #[test]
    fn tapped_defenders_do_not_block() {
        let mut state = arena();
        state.player1.board.creatures.push(creature(701, "Wolf", 3, 2));
        let mut sleeper = creature(702, "Sleeper", 5, 5);
        sleeper.is_tapped = true;
        state.player2.board.creatures.push(sleeper);

        resolve_attack(&mut state, 1, 0);
        assert_eq!(state.player2.life, 17, "attack should bypass tapped creature");
        assert_eq!(state.player2.board.creatures.len(), 1);
    }

    #[test]
    fn lowest_index_untapped_creature_is_the_mandatory_blocker() {
        let mut state = arena();
        state.player1.board.creatures.push(creature(703, "Wolf", 3, 2));
        let mut tapped = creature(704, "Tapped Front", 1, 1);
        tapped.is_tapped = true;
        state.player2.board.creatures.push(tapped);
        state.player2.board.creatures.push(creature(705, "Wall", 0, 9));

        let lines = resolve_attack(&mut state, 1, 0);
        assert!(lines.iter().any(|line| line.contains("blocks with Wall")));
        assert_eq!(state.player2.board.creatures[1].current_defense, 6);
        assert_eq!(state.player2.life, 20, "blocked attacks deal no player damage");
    }

    #[test]
    fn blocked_damage_is_simultaneous() {
        // 3/3 blocks a 5/5: both take damage in the same step, only the
        // 3/3 dies, the 5/5 survives at 5-3 defense.
        let mut state = arena();
        state.player1.board.creatures.push(creature(706, "Brute", 5, 5));
        state.player2.board.creatures.push(creature(707, "Guard", 3, 3));

        resolve_attack(&mut state, 1, 0);
        assert!(state.player2.board.creatures.is_empty(), "the 3/3 dies");
        assert_eq!(state.player1.board.creatures[0].current_defense, 2);
        assert!(state.player1.board.creatures[0].is_tapped);
    }

    #[test]
    fn lethal_trade_destroys_both() {
        let mut state = arena();
        state.player1.board.creatures.push(creature(708, "Wraith", 3, 1));
        state.player2.board.creatures.push(creature(709, "Wraith Twin", 3, 1));

        let lines = resolve_attack(&mut state, 2, 0);
        assert!(state.player1.board.creatures.is_empty());
        assert!(state.player2.board.creatures.is_empty());
        assert_eq!(
            lines.iter().filter(|line| line.contains("destroyed")).count(),
            2
        );
    }
}

use crate::game::{CardType, GamePhase, GameState, PlayerAction};

/// Scripted policy for the non-human seat.
///
/// Deterministic per state and one-shot per call: the shell re-invokes
/// after each applied action until `EndPhase` comes back. Decisions go
/// through the same `RuleEngine::apply` as human input; the policy
/// holds no private rules and sees no hidden information.
pub struct ScriptedOpponent;

impl ScriptedOpponent {
    /// Picks the next action for the current priority holder.
    ///
    /// - Draw / EndTurn: pass the phase.
    /// - Placement: first affordable creature in hand order, else pass.
    ///   Feigns and effects are deliberately never played.
    /// - Attack: lowest-index untapped creature attacks, else pass.
    pub fn decide(state: &GameState) -> PlayerAction {
        let player = match state.player(state.current_player) {
            Some(player) => player,
            None => return PlayerAction::EndPhase,
        };

        match state.phase {
            GamePhase::Draw | GamePhase::EndTurn => PlayerAction::EndPhase,
            GamePhase::Placement => player
                .hand
                .iter()
                .find(|card| {
                    card.card_type == CardType::Creature && card.mana_cost <= player.mana
                })
                .map(|card| PlayerAction::PlayCreature { card_id: card.id })
                .unwrap_or(PlayerAction::EndPhase),
            GamePhase::Attack => player
                .board
                .first_untapped_creature()
                .map(|creature_index| PlayerAction::Attack { creature_index })
                .unwrap_or(PlayerAction::EndPhase),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Card, Color, Creature, RuleEngine};

    fn seat_two_state(phase: GamePhase) -> GameState {
        let mut state = GameState::new_game_seeded("Ada", "Bot", 60);
        state.current_player = 2;
        state.phase = phase;
        state.player2.hand.clear();
        state.player2.board.creatures.clear();
        state
    }

    #[test]
    fn draw_and_end_turn_always_pass() {
        for phase in [GamePhase::Draw, GamePhase::EndTurn] {
            let state = seat_two_state(phase);
            assert_eq!(ScriptedOpponent::decide(&state), PlayerAction::EndPhase);
        }
    }

    #[test]
    fn placement_picks_first_affordable_creature_in_hand_order() {
        let mut state = seat_two_state(GamePhase::Placement);
        state.player2.mana = 3;
        state.player2.hand = vec![
            Card::feign(900, "Shield Trap", Color::Ivory, 1, ""),
            Card::creature(901, "Flame Dragon", Color::Cinder, 6, "", 7, 5),
            Card::creature(902, "Holy Knight", Color::Ivory, 3, "", 3, 3),
            Card::creature(903, "Vine Sprite", Color::Verdant, 1, "", 1, 1),
        ];

        // Hand order wins over cost: the knight precedes the sprite.
        assert_eq!(
            ScriptedOpponent::decide(&state),
            PlayerAction::PlayCreature { card_id: 902 }
        );
    }

    #[test]
    fn placement_passes_when_nothing_is_affordable() {
        let mut state = seat_two_state(GamePhase::Placement);
        state.player2.mana = 0;
        state.player2.hand = vec![Card::creature(904, "Fire Imp", Color::Cinder, 1, "", 2, 1)];
        assert_eq!(ScriptedOpponent::decide(&state), PlayerAction::EndPhase);
    }

    #[test]
    fn attack_uses_the_lowest_index_untapped_creature() {
        let mut state = seat_two_state(GamePhase::Attack);
        let mut tapped = Creature::summon(Card::creature(905, "Spent", Color::Umbral, 2, "", 3, 1));
        tapped.is_tapped = true;
        state.player2.board.creatures.push(tapped);
        state
            .player2
            .board
            .creatures
            .push(Creature::summon(Card::creature(
                906, "Fresh", Color::Umbral, 2, "", 3, 1,
            )));

        assert_eq!(
            ScriptedOpponent::decide(&state),
            PlayerAction::Attack { creature_index: 1 }
        );
    }

    #[test]
    fn policy_decisions_pass_through_the_shared_rule_engine() {
        let engine = RuleEngine::new();
        let mut state = seat_two_state(GamePhase::Draw);

        // Drive a whole scripted turn; every decision must be legal.
        let mut guard = 0;
        loop {
            let action = ScriptedOpponent::decide(&state);
            let ended_phase = action == PlayerAction::EndPhase;
            let resolution = engine
                .apply(&state, state.current_player, action)
                .expect("scripted decisions are always legal");
            state = resolution.state;

            if ended_phase && state.current_player == 1 {
                break;
            }
            guard += 1;
            assert!(guard < 64, "scripted turn must terminate");
        }

        assert_eq!(state.phase, GamePhase::Draw);
        assert_eq!(state.turn_number, 2);
    }
}

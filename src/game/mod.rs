//! Core game logic: data model, board state, rule engine, combat.

pub mod cards;
pub mod catalog;
mod combat;
pub mod effects;
pub mod rules;
pub mod state;

pub use cards::{
    Card,
    CardDefect,
    CardId,
    CardType,
    Color,
    Creature,
    FeignCard,
    GlobalEffect,
    PlayerId,
};
pub use effects::{EffectRegistry, EffectRule};
pub use rules::{PlayerAction, Rejection, RuleEngine, RuleResolution};
pub use state::{
    GameOutcome,
    GamePhase,
    GameState,
    IntegrityError,
    Player,
    PlayerBoard,
};

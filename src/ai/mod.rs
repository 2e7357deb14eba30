//! Opponent policy (scripted, deterministic per state).

pub mod policy;

pub use policy::ScriptedOpponent;

//! Progression and economy engine for a one-button incremental game.
//!
//! The engine owns the numbers (score, prices, production, multipliers) and
//! the save record. Rendering and input belong to the host, which reads the
//! values exposed by [`ClickerGame`] and feeds it [`clicker::actions::Action`]s
//! and wall-clock timestamps.

pub mod click;
pub mod clicker;
pub mod logging;
pub mod number;
pub mod time;

pub use clicker::{ClickerGame, GameEvent};
pub use number::Num;

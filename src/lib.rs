//! BeatRush: a four-lane vertical-scrolling rhythm game.
//!
//! Charts are JSON files pairing note timestamps with a song; notes fall
//! at a constant speed and are judged against asymmetric timing windows
//! when the player presses the lane key.

pub mod audio;
pub mod chart;
pub mod config;
pub mod database;
pub mod game;
pub mod input;
pub mod render;
pub mod scene;
pub mod util;

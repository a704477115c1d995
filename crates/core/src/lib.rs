//! Trick resolution engine for the SK8 card game. Keep this crate free of IO and
//! platform concerns.

pub mod cards;
pub mod catalog;
pub mod combo;
pub mod config;
pub mod deck;
pub mod decision;
pub mod events;
pub mod game;
pub mod input;
pub mod player;
pub mod rng;
pub mod scoring;
pub mod skater;
pub mod state;

pub use cards::*;
pub use catalog::*;
pub use combo::*;
pub use config::*;
pub use deck::*;
pub use decision::*;
pub use events::*;
pub use game::*;
pub use input::*;
pub use player::*;
pub use rng::*;
pub use scoring::*;
pub use skater::*;
pub use state::*;

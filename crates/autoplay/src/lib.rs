//! Automated players for SK8: combo search, choice heuristics and an AI-vs-AI
//! simulator with serializable traces.

mod action;
mod config;
mod error;
mod policy;
mod search;
mod simulator;
mod trace;

pub use action::*;
pub use config::*;
pub use error::*;
pub use policy::*;
pub use search::*;
pub use simulator::*;
pub use trace::*;

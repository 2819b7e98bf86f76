//! # Gravity Four
//!
//! A two-player gravity-drop grid game (Connect-Four-style) with an optional
//! heuristic automated opponent. The crate owns the board state machine and
//! the move evaluator; rendering, input handling, and timers are left to the
//! embedding application.
//!
//! ## Modules
//!
//! - [`game`] — Core game logic: board grid, players, turn state machine
//! - [`ai`] — Heuristic move evaluator for the automated opponent
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod ai;
pub mod config;
pub mod error;
pub mod game;

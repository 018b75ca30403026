//! Retro Snake - a single-player Snake game for the terminal
//!
//! This library provides:
//! - Core game rules and phase machine (game module)
//! - High score persistence (storage module)
//! - Speed-following tick timer (driver module)
//! - Key bindings, TUI rendering and session metrics (input, render, metrics modules)
//! - The interactive terminal mode (modes module)

pub mod driver;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod storage;

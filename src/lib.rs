//! Wordplay Session Library
//!
//! This crate provides the session lifecycle for the Wordplay word game.
//!
//! # Overview
//!
//! The state module provides:
//!
//! - **Screen State Machine** - Splash, playing, paused and dev tools screens
//!   with validated transitions.
//!
//! - **Session Controller** - Start, pause, resume, restart and replay, with
//!   the saved game and level progress kept in step with the screen.
//!
//! - **Confirmation** - "Start over" is guarded by a native dialog or an
//!   in-app modal, depending on the host.
//!
//! - **Intro Sequencer** - The splash branding animation as a declarative
//!   timeline driven by timer ticks.
//!
//! # Design Principles
//!
//! 1. **The controller is the only writer** - Screens and the game engine ask
//!    for transitions; they never flip session flags themselves.
//!
//! 2. **Rejected operations are no-ops** - Every error leaves the session
//!    exactly as it was.
//!
//! 3. **No rendering** - This crate is pure state; hosts draw what it reports.
//!
//! 4. **Storage is opaque** - Records go through a `PersistenceGateway`;
//!    missing or corrupt data reads as "no saved game".
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use wordplay_session::state::{
//!     HostCapabilities, Language, MemoryStore, Platform, Screen, SessionController,
//!     StartupOptions, StoreGateway,
//! };
//!
//! let options = StartupOptions::new(HostCapabilities::for_platform(Platform::Web));
//! let mut session = SessionController::start(StoreGateway::new(MemoryStore::new()), options, None);
//! assert_eq!(session.screen(), Screen::Splash);
//!
//! // Let the intro finish, then start
//! session.tick(Duration::from_secs(5));
//! let transition = session.start_from_splash().unwrap();
//! assert_eq!(transition.to, Screen::Playing);
//! assert_eq!(session.language(), Language::En);
//!
//! session.pause_game().unwrap();
//! assert!(session.has_saved_game());
//! ```

pub mod state;

// Re-export everything from state module at crate root
pub use state::*;

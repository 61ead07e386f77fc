//! Session state module for Wordplay.
//!
//! This module provides the session types and their collaborators:
//!
//! - `screen` - Screen state machine (which screen is active?)
//! - `session` - Session controller (launch parameters, persistence, start over)
//! - `persistence` - Storage contract and JSON-backed gateway
//! - `confirmation` - Native/modal confirmation strategies
//! - `intro` - Splash intro timeline and sequencer
//! - `splash` - Splash screen surface gated on the intro
//! - `host` - Startup options and host capabilities
//! - `config` - Intro timing and geometry
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │                        SessionController                             │
//! │                                                                      │
//! │  ┌──────────────┐  ┌────────────────────┐  ┌──────────────────────┐  │
//! │  │ ScreenState  │  │ PersistenceGateway │  │  ConfirmationFlow    │  │
//! │  │              │  │                    │  │                      │  │
//! │  │ Splash       │  │ current game state │  │ Native ── blocking   │  │
//! │  │ Playing      │  │ game progress      │  │ Modal  ── overlay    │  │
//! │  │ Paused       │  │                    │  │                      │  │
//! │  │ DevTools     │  │                    │  │                      │  │
//! │  └──────────────┘  └────────────────────┘  └──────────────────────┘  │
//! │                                                                      │
//! │  ┌────────────────────────────────────────────────────────────────┐  │
//! │  │ SplashScreen (mounted only while on Splash)                    │  │
//! │  │                                                                │  │
//! │  │  IntroSequencer: Branding ▶ LogoReveal ▶ Hold ▶ Transition ▶   │  │
//! │  │                  Settled (controls unlocked)                   │  │
//! │  └────────────────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod confirmation;
pub mod host;
pub mod intro;
pub mod persistence;
pub mod screen;
pub mod session;
pub mod splash;

// Re-export commonly used types
pub use config::{ConfigError, IntroConfig};
pub use confirmation::{
    ConfirmationError, ConfirmationFlow, ConfirmationOutcome, ConfirmationPrompt,
    ConfirmationStrategy, ModalConfirmation, NativeConfirmation, NativeDialog, Presentation,
    StrategyKind,
};
pub use host::{HostCapabilities, Platform, StartupOptions};
pub use intro::{
    AnimationStage, Easing, IntroFrame, IntroLayout, IntroSequencer, Property, SequencerEvent,
    SequencerStatus, Step, Timeline, Tween,
};
pub use persistence::{
    GameProgressSnapshot, KeyValueStore, Language, MemoryStore, PersistenceGateway,
    SavedGameState, StoreGateway,
};
pub use screen::{InvalidTransition, Screen, ScreenState, SessionEvent};
pub use session::{PlayLaunch, SessionController, SessionError, StartOver, Transition};
pub use splash::SplashScreen;

//! Screen state machine.
//!
//! Tracks which top-level screen is active and validates transitions.
//!
//! # State Diagram
//!
//! ```text
//!                 new_game (from any screen)
//!        ┌─────────────────────────────────────────────┐
//!        ▼                                             │
//! ┌──────────────┐  start_game / resume   ┌───────────┐│
//! │    Splash    │───────────────────────▶│  Playing  │┤
//! └──────────────┘                        └─────┬─────┘│
//!        ▲                                 pause│  ▲   │
//!        │ exit                                 ▼  │   │
//! ┌──────────────┐                        ┌───────────┐│
//! │   DevTools   │◀── enter (any) ──      │  Paused   │┘
//! └──────────────┘                        └───────────┘
//!                          resume / restart_level / play_level_again
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// The active top-level screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    /// Title screen with the intro sequence
    #[default]
    Splash,

    /// A level is being played
    Playing,

    /// Level suspended, progress saved
    Paused,

    /// Debug surface
    DevTools,
}

impl Screen {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Splash => "splash",
            Self::Playing => "playing",
            Self::Paused => "paused",
            Self::DevTools => "devtools",
        }
    }

    pub fn is_playing(&self) -> bool {
        matches!(self, Self::Playing)
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Screen transition events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    StartGame,
    ResumeGame,
    PauseGame,
    NewGame,
    RestartLevel,
    PlayLevelAgain { level: u32 },
    EnterDevTools,
    ExitDevTools,
}

/// Error when a screen transition is invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidTransition {
    pub from: Screen,
    pub event: SessionEvent,
    pub reason: &'static str,
}

impl fmt::Display for InvalidTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid transition from {} via {:?}: {}",
            self.from, self.event, self.reason
        )
    }
}

impl std::error::Error for InvalidTransition {}

/// Screen state machine.
///
/// Only knows the table of legal moves. Session parameters and persistence
/// live in [`SessionController`](super::session::SessionController).
#[derive(Debug, Clone, Default)]
pub struct ScreenState {
    screen: Screen,
}

impl ScreenState {
    /// Start on the splash screen.
    pub fn new() -> Self {
        Self {
            screen: Screen::Splash,
        }
    }

    /// Start on a specific screen (debug entry).
    pub fn at(screen: Screen) -> Self {
        Self { screen }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Apply an event, returning the new state or an error.
    pub fn apply(&self, event: SessionEvent) -> Result<Self, InvalidTransition> {
        Ok(Self {
            screen: self.transition(event)?,
        })
    }

    /// Apply an event in place, returning error if invalid.
    pub fn apply_mut(&mut self, event: SessionEvent) -> Result<(), InvalidTransition> {
        self.screen = self.transition(event)?;
        Ok(())
    }

    /// Calculate the next screen for an event.
    pub fn transition(&self, event: SessionEvent) -> Result<Screen, InvalidTransition> {
        use Screen::*;
        use SessionEvent::*;

        let invalid = |reason: &'static str| InvalidTransition {
            from: self.screen,
            event,
            reason,
        };

        match (self.screen, event) {
            (Splash, StartGame) => Ok(Playing),
            (_, StartGame) => Err(invalid("Games start from the splash screen")),

            (Splash | Paused, ResumeGame) => Ok(Playing),
            (Playing, ResumeGame) => Err(invalid("Already playing")),
            (DevTools, ResumeGame) => Err(invalid("Leave dev tools first")),

            (Playing, PauseGame) => Ok(Paused),
            (_, PauseGame) => Err(invalid("Not playing")),

            // Abandon is always available
            (_, NewGame) => Ok(Splash),

            (Paused, RestartLevel) => Ok(Playing),
            (_, RestartLevel) => Err(invalid("Only a paused level can be restarted")),

            (Paused | Playing, PlayLevelAgain { .. }) => Ok(Playing),
            (_, PlayLevelAgain { .. }) => Err(invalid("Level replay needs an active session")),

            (DevTools, EnterDevTools) => Err(invalid("Already in dev tools")),
            (_, EnterDevTools) => Ok(DevTools),

            (DevTools, ExitDevTools) => Ok(Splash),
            (_, ExitDevTools) => Err(invalid("Not in dev tools")),
        }
    }

    pub fn is_playing(&self) -> bool {
        self.screen.is_playing()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = ScreenState::new();
        assert_eq!(state.screen(), Screen::Splash);
        assert!(!state.is_playing());
    }

    #[test]
    fn test_pause_resume_cycle() {
        let mut state = ScreenState::new();

        state.apply_mut(SessionEvent::StartGame).unwrap();
        assert!(state.is_playing());

        state.apply_mut(SessionEvent::PauseGame).unwrap();
        assert_eq!(state.screen(), Screen::Paused);

        state.apply_mut(SessionEvent::ResumeGame).unwrap();
        assert_eq!(state.screen(), Screen::Playing);
    }

    #[test]
    fn test_paused_exits() {
        let paused = ScreenState::at(Screen::Paused);

        assert_eq!(
            paused.apply(SessionEvent::RestartLevel).unwrap().screen(),
            Screen::Playing
        );
        assert_eq!(
            paused
                .apply(SessionEvent::PlayLevelAgain { level: 5 })
                .unwrap()
                .screen(),
            Screen::Playing
        );
        assert_eq!(
            paused.apply(SessionEvent::NewGame).unwrap().screen(),
            Screen::Splash
        );
    }

    #[test]
    fn test_dev_tools_round_trip() {
        for screen in [Screen::Splash, Screen::Playing, Screen::Paused] {
            let state = ScreenState::at(screen)
                .apply(SessionEvent::EnterDevTools)
                .unwrap();
            assert_eq!(state.screen(), Screen::DevTools);
            assert_eq!(
                state.apply(SessionEvent::ExitDevTools).unwrap().screen(),
                Screen::Splash
            );
        }
    }

    #[test]
    fn test_invalid_transitions() {
        let splash = ScreenState::new();

        assert!(splash.apply(SessionEvent::PauseGame).is_err());
        assert!(splash.apply(SessionEvent::RestartLevel).is_err());
        assert!(splash.apply(SessionEvent::ExitDevTools).is_err());

        let playing = splash.apply(SessionEvent::StartGame).unwrap();
        assert!(playing.apply(SessionEvent::StartGame).is_err());
        assert!(playing.apply(SessionEvent::ResumeGame).is_err());

        let devtools = ScreenState::at(Screen::DevTools);
        assert!(devtools.apply(SessionEvent::EnterDevTools).is_err());
        assert!(devtools.apply(SessionEvent::ResumeGame).is_err());
    }

    #[test]
    fn test_display() {
        let err = ScreenState::new()
            .apply(SessionEvent::PauseGame)
            .unwrap_err();
        assert_eq!(
            format!("{}", err),
            "Invalid transition from splash via PauseGame: Not playing"
        );
    }
}

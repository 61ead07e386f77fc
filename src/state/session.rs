//! Session controller.
//!
//! Single authority for the active [`Screen`] and the parameters a level is
//! launched with. Every operation either applies completely or returns an
//! error and leaves the session untouched.

use std::fmt;
use std::time::Duration;

use super::confirmation::{
    ConfirmationError, ConfirmationFlow, ConfirmationOutcome, ConfirmationPrompt, NativeDialog,
};
use super::config::IntroConfig;
use super::host::StartupOptions;
use super::intro::SequencerEvent;
use super::persistence::{GameProgressSnapshot, Language, PersistenceGateway};
use super::screen::{InvalidTransition, Screen, ScreenState, SessionEvent};
use super::splash::SplashScreen;

/// Parameters the game engine is launched with on entering `Playing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayLaunch {
    pub language: Language,
    /// Continue from the saved game state
    pub resuming: bool,
    /// Level to jump to, until the engine consumes it
    pub start_level: Option<u32>,
    /// Any open congratulations overlay must be reset
    pub reset_congratulations: bool,
}

/// Result of a successful operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub from: Screen,
    pub to: Screen,
    pub event: SessionEvent,
    /// Set iff `to` is `Playing`
    pub launch: Option<PlayLaunch>,
}

/// Where a start-over request stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartOver {
    /// Modal overlay is up; answer through `resolve_start_over`
    Pending,
    Cancelled,
    Confirmed(Transition),
}

/// Rejected operation. The session is left as it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    InvalidTransition(InvalidTransition),
    NoSavedGame,
    ConfirmationPending,
    NoPendingConfirmation,
    DevToolsUnavailable,
    IntroNotSettled,
    HistoryUnavailable(Screen),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTransition(e) => write!(f, "{}", e),
            Self::NoSavedGame => write!(f, "There is no saved game to resume"),
            Self::ConfirmationPending => write!(f, "Waiting for a confirmation"),
            Self::NoPendingConfirmation => write!(f, "No confirmation is pending"),
            Self::DevToolsUnavailable => write!(f, "Dev tools are not available in this build"),
            Self::IntroNotSettled => write!(f, "Splash controls are not available yet"),
            Self::HistoryUnavailable(screen) => {
                write!(f, "Level history is not available from {}", screen)
            }
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidTransition(e) => Some(e),
            _ => None,
        }
    }
}

impl From<InvalidTransition> for SessionError {
    fn from(e: InvalidTransition) -> Self {
        Self::InvalidTransition(e)
    }
}

impl From<ConfirmationError> for SessionError {
    fn from(e: ConfirmationError) -> Self {
        match e {
            ConfirmationError::AlreadyPending => Self::ConfirmationPending,
            ConfirmationError::NotPending => Self::NoPendingConfirmation,
        }
    }
}

/// Top-level session state machine.
#[derive(Debug)]
pub struct SessionController<G> {
    gateway: G,
    screen: ScreenState,
    language: Language,
    has_saved_game: bool,
    start_level: Option<u32>,
    reset_congratulations: bool,
    history: Option<Option<GameProgressSnapshot>>,
    confirmation: ConfirmationFlow,
    splash: Option<SplashScreen>,
    intro_config: IntroConfig,
    viewport_height: f32,
    debug_build: bool,
}

impl<G: PersistenceGateway> SessionController<G> {
    /// Build the session at process start.
    ///
    /// A saved game is detected and its language preloaded, but the session
    /// always opens on the splash screen (or dev tools, when requested).
    pub fn start(
        gateway: G,
        options: StartupOptions,
        native_dialog: Option<Box<dyn NativeDialog>>,
    ) -> Self {
        let (language, has_saved_game) = match gateway.load_current_game_state() {
            Some(saved) => {
                log::info!("Found saved game (language {})", saved.language);
                (saved.language, true)
            }
            None => {
                log::info!("No saved game found");
                (Language::default(), false)
            }
        };

        let confirmation = ConfirmationFlow::for_host(&options.host, native_dialog);

        let mut session = Self {
            gateway,
            screen: ScreenState::new(),
            language,
            has_saved_game,
            start_level: None,
            reset_congratulations: false,
            history: None,
            confirmation,
            splash: None,
            intro_config: options.intro.clone(),
            viewport_height: options.viewport_height,
            debug_build: options.debug_build,
        };

        if options.devtools_requested() {
            log::info!("Starting in dev tools");
            session.screen = ScreenState::at(Screen::DevTools);
        } else {
            session.splash = Some(session.mount_splash());
        }

        session
    }

    // === Operations ===

    /// Fresh start: discards the saved game and all progress.
    pub fn start_game(&mut self, language: Language) -> Result<Transition, SessionError> {
        let to = self.check(SessionEvent::StartGame)?;
        self.ensure_splash_settled()?;

        self.gateway.clear_current_game_state();
        self.gateway.clear_game_progress();
        self.language = language;
        self.start_level = None;
        self.reset_congratulations = false;
        self.has_saved_game = false;

        Ok(self.commit(SessionEvent::StartGame, to))
    }

    pub fn resume_game(&mut self) -> Result<Transition, SessionError> {
        self.ensure_idle()?;
        if !self.has_saved_game {
            log::debug!("Resume ignored: no saved game");
            return Err(SessionError::NoSavedGame);
        }
        let to = self.check(SessionEvent::ResumeGame)?;
        self.ensure_splash_settled()?;

        Ok(self.commit(SessionEvent::ResumeGame, to))
    }

    /// The engine must have saved the current game state before calling this.
    pub fn pause_game(&mut self) -> Result<Transition, SessionError> {
        let to = self.check(SessionEvent::PauseGame)?;

        if self.gateway.load_current_game_state().is_none() {
            log::warn!("Paused without a saved game state; resume will restart the level");
        }
        self.has_saved_game = true;

        Ok(self.commit(SessionEvent::PauseGame, to))
    }

    /// Abandon everything and return to the title screen.
    pub fn new_game(&mut self) -> Result<Transition, SessionError> {
        let to = self.check(SessionEvent::NewGame)?;

        self.gateway.clear_current_game_state();
        self.gateway.clear_game_progress();
        self.start_level = None;
        self.reset_congratulations = false;
        self.has_saved_game = false;
        self.history = None;

        Ok(self.commit(SessionEvent::NewGame, to))
    }

    /// Replay the paused level from scratch, keeping progress.
    pub fn restart_level(&mut self) -> Result<Transition, SessionError> {
        let to = self.check(SessionEvent::RestartLevel)?;

        self.gateway.clear_current_game_state();
        self.has_saved_game = false;

        Ok(self.commit(SessionEvent::RestartLevel, to))
    }

    /// Replay a specific level, keeping progress.
    pub fn play_level_again(&mut self, level: u32) -> Result<Transition, SessionError> {
        let event = SessionEvent::PlayLevelAgain { level };
        let to = self.check(event)?;

        self.gateway.clear_current_game_state();
        self.has_saved_game = false;
        self.start_level = Some(level);
        self.reset_congratulations = true;
        self.history = None;

        Ok(self.commit(event, to))
    }

    /// Called by the engine once it has read the start level.
    ///
    /// Returns the level that was pending.
    pub fn consume_start_level(&mut self, level: Option<u32>) -> Option<u32> {
        let pending = self.start_level.take();
        if level.is_some() && level != pending {
            log::debug!("Engine consumed level {:?}, pending was {:?}", level, pending);
        }
        self.reset_congratulations = false;
        pending
    }

    /// Ask before discarding all progress.
    pub fn request_start_over(&mut self) -> Result<StartOver, SessionError> {
        self.ensure_idle()?;
        self.check(SessionEvent::NewGame)?;

        match self.confirmation.request(&ConfirmationPrompt::start_over())? {
            Some(outcome) => self.finish_start_over(outcome),
            None => {
                log::debug!("Start over awaiting confirmation");
                Ok(StartOver::Pending)
            }
        }
    }

    /// Answer a pending start-over overlay.
    pub fn resolve_start_over(
        &mut self,
        outcome: ConfirmationOutcome,
    ) -> Result<StartOver, SessionError> {
        let outcome = self.confirmation.resolve(outcome)?;
        self.finish_start_over(outcome)
    }

    /// Open the level history view. Only reachable from a game in progress.
    pub fn show_history(&mut self) -> Result<Option<&GameProgressSnapshot>, SessionError> {
        self.ensure_idle()?;
        let screen = self.screen.screen();
        if !matches!(screen, Screen::Playing | Screen::Paused) {
            log::debug!("History ignored on {}", screen);
            return Err(SessionError::HistoryUnavailable(screen));
        }
        let progress = self.gateway.load_game_progress();
        Ok(self.history.insert(progress).as_ref())
    }

    pub fn close_history(&mut self) {
        self.history = None;
    }

    pub fn enter_dev_tools(&mut self) -> Result<Transition, SessionError> {
        if !self.debug_build {
            return Err(SessionError::DevToolsUnavailable);
        }
        let to = self.check(SessionEvent::EnterDevTools)?;
        Ok(self.commit(SessionEvent::EnterDevTools, to))
    }

    pub fn exit_dev_tools(&mut self) -> Result<Transition, SessionError> {
        let to = self.check(SessionEvent::ExitDevTools)?;
        Ok(self.commit(SessionEvent::ExitDevTools, to))
    }

    // === Splash ===

    /// Start button on the splash screen.
    pub fn start_from_splash(&mut self) -> Result<Transition, SessionError> {
        let language = self
            .splash
            .as_ref()
            .and_then(SplashScreen::start_request)
            .ok_or(SessionError::IntroNotSettled)?;
        self.start_game(language)
    }

    /// Resume button on the splash screen.
    pub fn resume_from_splash(&mut self) -> Result<Transition, SessionError> {
        let ready = self
            .splash
            .as_ref()
            .is_some_and(SplashScreen::is_interactive);
        if !ready {
            return Err(SessionError::IntroNotSettled);
        }
        self.resume_game()
    }

    /// Forward a timer tick to the splash intro, if mounted.
    pub fn tick(&mut self, dt: Duration) -> Vec<SequencerEvent> {
        match self.splash.as_mut() {
            Some(splash) => splash.tick(dt),
            None => Vec::new(),
        }
    }

    /// Applies from the next splash mount; a running intro keeps its layout.
    pub fn set_viewport_height(&mut self, height: f32) {
        self.viewport_height = height;
    }

    // === Accessors ===

    pub fn screen(&self) -> Screen {
        self.screen.screen()
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn has_saved_game(&self) -> bool {
        self.has_saved_game
    }

    pub fn start_level(&self) -> Option<u32> {
        self.start_level
    }

    pub fn reset_congratulations(&self) -> bool {
        self.reset_congratulations
    }

    /// Launch parameters while on `Playing`.
    pub fn playing_launch(&self) -> Option<PlayLaunch> {
        self.screen.is_playing().then(|| self.launch())
    }

    pub fn history(&self) -> Option<&GameProgressSnapshot> {
        self.history.as_ref().and_then(Option::as_ref)
    }

    pub fn is_history_open(&self) -> bool {
        self.history.is_some()
    }

    pub fn splash(&self) -> Option<&SplashScreen> {
        self.splash.as_ref()
    }

    pub fn splash_mut(&mut self) -> Option<&mut SplashScreen> {
        self.splash.as_mut()
    }

    pub fn confirmation(&self) -> &ConfirmationFlow {
        &self.confirmation
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn gateway_mut(&mut self) -> &mut G {
        &mut self.gateway
    }

    // === Internals ===

    fn ensure_idle(&self) -> Result<(), SessionError> {
        if self.confirmation.is_pending() {
            return Err(SessionError::ConfirmationPending);
        }
        Ok(())
    }

    /// Splash controls stay locked until the intro has settled.
    fn ensure_splash_settled(&self) -> Result<(), SessionError> {
        let locked = self.screen.screen() == Screen::Splash
            && !self
                .splash
                .as_ref()
                .is_some_and(SplashScreen::is_interactive);
        if locked {
            log::debug!("Splash control ignored: intro still running");
            return Err(SessionError::IntroNotSettled);
        }
        Ok(())
    }

    /// Validate an event without applying it.
    fn check(&self, event: SessionEvent) -> Result<Screen, SessionError> {
        self.ensure_idle()?;
        self.screen.transition(event).map_err(|e| {
            log::debug!("{}", e);
            SessionError::from(e)
        })
    }

    fn commit(&mut self, event: SessionEvent, to: Screen) -> Transition {
        let from = self.screen.screen();
        self.screen = ScreenState::at(to);

        if from == Screen::Splash {
            if let Some(mut splash) = self.splash.take() {
                splash.unmount();
            }
        }
        if to == Screen::Splash {
            self.splash = Some(self.mount_splash());
        }

        log::info!("Screen {} -> {} via {:?}", from, to, event);

        Transition {
            from,
            to,
            event,
            launch: (to == Screen::Playing).then(|| self.launch()),
        }
    }

    fn finish_start_over(&mut self, outcome: ConfirmationOutcome) -> Result<StartOver, SessionError> {
        match outcome {
            ConfirmationOutcome::Confirmed => Ok(StartOver::Confirmed(self.new_game()?)),
            ConfirmationOutcome::Cancelled => {
                log::debug!("Start over cancelled");
                Ok(StartOver::Cancelled)
            }
        }
    }

    fn launch(&self) -> PlayLaunch {
        PlayLaunch {
            language: self.language,
            resuming: self.has_saved_game,
            start_level: self.start_level,
            reset_congratulations: self.reset_congratulations,
        }
    }

    fn mount_splash(&self) -> SplashScreen {
        SplashScreen::mount(
            self.intro_config.clone(),
            self.viewport_height,
            self.language,
            self.has_saved_game,
        )
    }
}

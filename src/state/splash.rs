//! Splash screen surface.
//!
//! Owns the intro run and the draft language toggle. Start and resume are
//! only offered once the intro has settled.

use std::time::Duration;

use super::config::IntroConfig;
use super::intro::{IntroSequencer, SequencerEvent};
use super::persistence::Language;

#[derive(Debug, Clone)]
pub struct SplashScreen {
    intro: IntroSequencer,
    /// Not committed until the game starts
    draft_language: Language,
    has_saved_game: bool,
}

impl SplashScreen {
    /// Mount the splash, starting a fresh intro run.
    pub fn mount(
        config: IntroConfig,
        viewport_height: f32,
        language: Language,
        has_saved_game: bool,
    ) -> Self {
        Self {
            intro: IntroSequencer::new(config, viewport_height),
            draft_language: language,
            has_saved_game,
        }
    }

    /// Tear down. A half-played intro is cancelled and never completes.
    pub fn unmount(&mut self) {
        self.intro.cancel();
    }

    pub fn tick(&mut self, dt: Duration) -> Vec<SequencerEvent> {
        self.intro.tick(dt)
    }

    pub fn intro(&self) -> &IntroSequencer {
        &self.intro
    }

    pub fn is_interactive(&self) -> bool {
        self.intro.is_interactive()
    }

    pub fn draft_language(&self) -> Language {
        self.draft_language
    }

    /// Flip the language toggle. Ignored while the panel is hidden.
    pub fn select_language(&mut self, language: Language) -> bool {
        if !self.is_interactive() {
            return false;
        }
        self.draft_language = language;
        true
    }

    /// Language to start with, if the start button is live.
    pub fn start_request(&self) -> Option<Language> {
        self.is_interactive().then_some(self.draft_language)
    }

    pub fn can_resume(&self) -> bool {
        self.has_saved_game && self.is_interactive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mounted(has_saved_game: bool) -> SplashScreen {
        SplashScreen::mount(IntroConfig::default(), 900.0, Language::En, has_saved_game)
    }

    #[test]
    fn test_controls_locked_until_settled() {
        let mut splash = mounted(true);

        assert_eq!(splash.start_request(), None);
        assert!(!splash.can_resume());
        assert!(!splash.select_language(Language::De));

        splash.tick(Duration::from_secs(5));
        assert_eq!(splash.start_request(), Some(Language::En));
        assert!(splash.can_resume());
    }

    #[test]
    fn test_language_toggle() {
        let mut splash = mounted(false);
        splash.tick(Duration::from_secs(5));

        assert!(splash.select_language(Language::De));
        assert_eq!(splash.start_request(), Some(Language::De));
        assert!(!splash.can_resume());
    }

    #[test]
    fn test_unmount_mid_intro() {
        let mut splash = mounted(false);
        splash.tick(Duration::from_millis(1500));
        splash.unmount();

        assert!(splash.tick(Duration::from_secs(5)).is_empty());
        assert_eq!(splash.start_request(), None);
    }
}

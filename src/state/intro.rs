//! Intro animation sequencer.
//!
//! The splash screen opens with a branding card, cross-fades into the game
//! logo, then docks the logo while the content panel fades in. The whole
//! sequence is a declarative [`Timeline`]: an ordered list of stages, each a
//! delay, a single tween or a parallel group of tweens. [`IntroSequencer`]
//! interprets it as the host's timer ticks arrive.
//!
//! ```text
//!  Branding        LogoReveal   Hold    Transition            Settled
//! ┌───────┬──────┐┌──────────┐┌─────┐┌─────────────────────┐
//! │ delay │ fade ││ fade logo││delay││ offset/height/margin│──▶ Completed
//! │ 1200  │ 600  ││   600    ││ 400 ││ content fade (800)  │
//! └───────┴──────┘└──────────┘└─────┘└─────────────────────┘
//! ```
//!
//! Dropping the timeline is the only cancellation mechanism: once
//! [`IntroSequencer::cancel`] runs, no further events are produced.

use std::time::Duration;

use serde::Serialize;

use super::config::IntroConfig;

/// Position of the intro within its run. Never moves backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationStage {
    #[default]
    Branding,
    LogoReveal,
    Hold,
    Transition,
    Settled,
}

/// Animated visual properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    BrandingOpacity,
    LogoOpacity,
    LogoOffset,
    LogoHeight,
    LogoMargin,
    ContentOpacity,
}

/// Current value of every animated property.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IntroFrame {
    pub branding_opacity: f32,
    pub logo_opacity: f32,
    pub logo_offset: f32,
    pub logo_height: f32,
    pub logo_margin: f32,
    pub content_opacity: f32,
}

impl IntroFrame {
    /// First frame of a run: branding visible, logo hidden and centered.
    pub fn initial(config: &IntroConfig, layout: &IntroLayout) -> Self {
        Self {
            branding_opacity: 1.0,
            logo_opacity: 0.0,
            logo_offset: layout.initial_offset,
            logo_height: config.initial_logo_height,
            logo_margin: config.initial_logo_margin,
            content_opacity: 0.0,
        }
    }

    pub fn get(&self, property: Property) -> f32 {
        match property {
            Property::BrandingOpacity => self.branding_opacity,
            Property::LogoOpacity => self.logo_opacity,
            Property::LogoOffset => self.logo_offset,
            Property::LogoHeight => self.logo_height,
            Property::LogoMargin => self.logo_margin,
            Property::ContentOpacity => self.content_opacity,
        }
    }

    pub fn set(&mut self, property: Property, value: f32) {
        let slot = match property {
            Property::BrandingOpacity => &mut self.branding_opacity,
            Property::LogoOpacity => &mut self.logo_opacity,
            Property::LogoOffset => &mut self.logo_offset,
            Property::LogoHeight => &mut self.logo_height,
            Property::LogoMargin => &mut self.logo_margin,
            Property::ContentOpacity => &mut self.content_opacity,
        };
        *slot = value;
    }
}

/// Viewport-derived geometry, resolved once per run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IntroLayout {
    /// Vertical offset that centers the logo before docking
    pub initial_offset: f32,
    /// Docked logo height
    pub final_height: f32,
}

impl IntroLayout {
    pub fn compute(viewport_height: f32, config: &IntroConfig) -> Self {
        let floor = (viewport_height * config.min_logo_fraction)
            .min(config.max_logo_height)
            .max(0.0);
        let final_height = (viewport_height - config.reserved_height)
            .max(floor)
            .min(config.max_logo_height);

        Self {
            initial_offset: config.content_height / 2.0,
            final_height,
        }
    }
}

/// Interpolation curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    Linear,
    #[default]
    EaseInOut,
}

impl Easing {
    /// Map linear progress `t` in `0..=1` onto the curve.
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
        }
    }
}

/// Timed move of one property towards a target value.
///
/// The start value is whatever the property holds when the step begins.
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    pub property: Property,
    pub to: f32,
    pub duration: Duration,
    pub easing: Easing,
}

impl Tween {
    pub fn new(property: Property, to: f32, duration: Duration) -> Self {
        Self {
            property,
            to,
            duration,
            easing: Easing::default(),
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }
}

/// One entry of a timeline.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Delay(Duration),
    Tween(Tween),
    /// Starts together, finishes with the slowest member
    Parallel(Vec<Tween>),
}

impl Step {
    pub fn duration(&self) -> Duration {
        match self {
            Self::Delay(d) => *d,
            Self::Tween(t) => t.duration,
            Self::Parallel(tweens) => tweens
                .iter()
                .map(|t| t.duration)
                .max()
                .unwrap_or(Duration::ZERO),
        }
    }

    pub fn tweens(&self) -> &[Tween] {
        match self {
            Self::Delay(_) => &[],
            Self::Tween(t) => std::slice::from_ref(t),
            Self::Parallel(tweens) => tweens.as_slice(),
        }
    }
}

/// A step tagged with the stage it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineStep {
    pub stage: AnimationStage,
    pub step: Step,
}

/// Strictly ordered list of steps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Timeline {
    steps: Vec<TimelineStep>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step that starts once the previous one has finished.
    pub fn then(mut self, stage: AnimationStage, step: Step) -> Self {
        self.steps.push(TimelineStep { stage, step });
        self
    }

    /// The splash intro.
    pub fn intro(config: &IntroConfig, layout: &IntroLayout) -> Self {
        let ms = Duration::from_millis;
        let dock = ms(config.dock_ms);

        Self::new()
            .then(AnimationStage::Branding, Step::Delay(ms(config.branding_hold_ms)))
            .then(
                AnimationStage::Branding,
                Step::Tween(Tween::new(
                    Property::BrandingOpacity,
                    0.0,
                    ms(config.branding_fade_ms),
                )),
            )
            .then(
                AnimationStage::LogoReveal,
                Step::Tween(Tween::new(
                    Property::LogoOpacity,
                    1.0,
                    ms(config.logo_fade_ms),
                )),
            )
            .then(AnimationStage::Hold, Step::Delay(ms(config.hold_ms)))
            .then(
                AnimationStage::Transition,
                Step::Parallel(vec![
                    Tween::new(Property::LogoOffset, 0.0, dock),
                    Tween::new(Property::LogoHeight, layout.final_height, dock),
                    Tween::new(Property::LogoMargin, config.final_logo_margin, dock),
                    Tween::new(
                        Property::ContentOpacity,
                        1.0,
                        ms(config.content_fade_ms),
                    ),
                ]),
            )
    }

    pub fn steps(&self) -> &[TimelineStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn total_duration(&self) -> Duration {
        self.steps.iter().map(|s| s.step.duration()).sum()
    }
}

/// Emitted by [`IntroSequencer::tick`], in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerEvent {
    StageEntered(AnimationStage),
    /// Fired once per run, after `StageEntered(Settled)`
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerStatus {
    Running,
    Completed,
    Cancelled,
}

/// Interpreter position within a timeline.
#[derive(Debug, Clone)]
struct Playback {
    timeline: Timeline,
    index: usize,
    elapsed: Duration,
    /// Start values of the current step's tweens
    from: Vec<f32>,
    entered: bool,
}

impl Playback {
    fn new(timeline: Timeline) -> Self {
        Self {
            timeline,
            index: 0,
            elapsed: Duration::ZERO,
            from: Vec::new(),
            entered: false,
        }
    }
}

/// Drives the intro timeline from timer ticks.
#[derive(Debug, Clone)]
pub struct IntroSequencer {
    config: IntroConfig,
    layout: IntroLayout,
    frame: IntroFrame,
    stage: AnimationStage,
    status: SequencerStatus,
    playback: Option<Playback>,
}

impl IntroSequencer {
    /// Begin a run for the given viewport height.
    pub fn new(config: IntroConfig, viewport_height: f32) -> Self {
        let layout = IntroLayout::compute(viewport_height, &config);
        let timeline = Timeline::intro(&config, &layout);
        Self {
            frame: IntroFrame::initial(&config, &layout),
            layout,
            config,
            stage: AnimationStage::Branding,
            status: SequencerStatus::Running,
            playback: Some(Playback::new(timeline)),
        }
    }

    /// Throw away the current run and start again from the branding card.
    pub fn restart(&mut self, viewport_height: f32) {
        *self = Self::new(self.config.clone(), viewport_height);
    }

    /// Stop without completing. Later ticks are ignored.
    pub fn cancel(&mut self) {
        if self.playback.take().is_some() {
            log::debug!("Intro cancelled during {:?}", self.stage);
            self.status = SequencerStatus::Cancelled;
        }
    }

    /// Advance by `dt`. Every stage crossed is reported, even when `dt`
    /// spans several of them.
    pub fn tick(&mut self, dt: Duration) -> Vec<SequencerEvent> {
        let mut events = Vec::new();
        let Some(playback) = self.playback.as_mut() else {
            return events;
        };

        let mut budget = dt;
        while let Some(current) = playback.timeline.steps.get(playback.index) {
            if !playback.entered {
                playback.from = current
                    .step
                    .tweens()
                    .iter()
                    .map(|t| self.frame.get(t.property))
                    .collect();
                playback.entered = true;

                if current.stage != self.stage {
                    debug_assert!(current.stage > self.stage);
                    log::debug!("Intro stage {:?}", current.stage);
                    self.stage = current.stage;
                    events.push(SequencerEvent::StageEntered(current.stage));
                }
            }

            let duration = current.step.duration();
            let left = duration.saturating_sub(playback.elapsed);
            if budget < left {
                playback.elapsed += budget;
                apply_step(&mut self.frame, &current.step, &playback.from, playback.elapsed);
                return events;
            }

            budget -= left;
            apply_step(&mut self.frame, &current.step, &playback.from, duration);
            playback.index += 1;
            playback.elapsed = Duration::ZERO;
            playback.entered = false;
        }

        self.playback = None;
        self.stage = AnimationStage::Settled;
        self.status = SequencerStatus::Completed;
        log::debug!("Intro settled");
        events.push(SequencerEvent::StageEntered(AnimationStage::Settled));
        events.push(SequencerEvent::Completed);
        events
    }

    /// Time until the current step finishes, for scheduling the next timer.
    pub fn time_to_next_step(&self) -> Option<Duration> {
        let playback = self.playback.as_ref()?;
        let current = playback.timeline.steps.get(playback.index)?;
        Some(current.step.duration().saturating_sub(playback.elapsed))
    }

    pub fn frame(&self) -> &IntroFrame {
        &self.frame
    }

    pub fn layout(&self) -> &IntroLayout {
        &self.layout
    }

    pub fn stage(&self) -> AnimationStage {
        self.stage
    }

    pub fn status(&self) -> SequencerStatus {
        self.status
    }

    /// Start/resume controls only accept input after completion.
    pub fn is_interactive(&self) -> bool {
        self.status == SequencerStatus::Completed
    }
}

fn apply_step(frame: &mut IntroFrame, step: &Step, from: &[f32], elapsed: Duration) {
    for (tween, &start) in step.tweens().iter().zip(from) {
        let t = progress(elapsed, tween.duration);
        let value = if t >= 1.0 {
            tween.to
        } else {
            start + (tween.to - start) * tween.easing.apply(t)
        };
        frame.set(tween.property, value);
    }
}

fn progress(elapsed: Duration, duration: Duration) -> f32 {
    if duration.is_zero() {
        return 1.0;
    }
    (elapsed.as_secs_f32() / duration.as_secs_f32()).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const VIEWPORT: f32 = 900.0;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn run_in_steps(seq: &mut IntroSequencer, step: Duration, total: Duration) -> Vec<SequencerEvent> {
        let mut events = Vec::new();
        let mut t = Duration::ZERO;
        while t < total {
            events.extend(seq.tick(step));
            t += step;
        }
        events
    }

    #[test]
    fn test_layout_clamping() {
        let config = IntroConfig::default();

        // Tall viewport caps at the maximum
        assert_eq!(IntroLayout::compute(900.0, &config).final_height, 250.0);
        // Room left after the content panel
        assert_eq!(IntroLayout::compute(700.0, &config).final_height, 200.0);
        // Short viewports fall back to the viewport-derived floor
        assert_eq!(IntroLayout::compute(520.0, &config).final_height, 52.0);
        assert_eq!(IntroLayout::compute(200.0, &config).final_height, 20.0);

        assert_eq!(IntroLayout::compute(700.0, &config).initial_offset, 170.0);
    }

    #[test]
    fn test_easing_endpoints() {
        for easing in [Easing::Linear, Easing::EaseInOut] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert_eq!(easing.apply(1.0), 1.0);
            assert_eq!(easing.apply(0.5), 0.5);
        }
        assert!(Easing::EaseInOut.apply(0.25) < 0.25);
    }

    #[test]
    fn test_parallel_step_takes_slowest_member() {
        let step = Step::Parallel(vec![
            Tween::new(Property::LogoOffset, 0.0, ms(600)),
            Tween::new(Property::ContentOpacity, 1.0, ms(800)),
        ]);
        assert_eq!(step.duration(), ms(800));
        assert_eq!(Step::Parallel(vec![]).duration(), Duration::ZERO);
    }

    #[test]
    fn test_intro_timeline_shape() {
        let config = IntroConfig::default();
        let layout = IntroLayout::compute(VIEWPORT, &config);
        let timeline = Timeline::intro(&config, &layout);

        let stages: Vec<_> = timeline.steps().iter().map(|s| s.stage).collect();
        assert_eq!(
            stages,
            vec![
                AnimationStage::Branding,
                AnimationStage::Branding,
                AnimationStage::LogoReveal,
                AnimationStage::Hold,
                AnimationStage::Transition,
            ]
        );
        assert_eq!(timeline.total_duration(), config.total_duration());
    }

    #[test]
    fn test_stage_order_with_small_ticks() {
        let mut seq = IntroSequencer::new(IntroConfig::default(), VIEWPORT);
        let events = run_in_steps(&mut seq, ms(16), ms(5000));

        assert_eq!(
            events,
            vec![
                SequencerEvent::StageEntered(AnimationStage::LogoReveal),
                SequencerEvent::StageEntered(AnimationStage::Hold),
                SequencerEvent::StageEntered(AnimationStage::Transition),
                SequencerEvent::StageEntered(AnimationStage::Settled),
                SequencerEvent::Completed,
            ]
        );
        assert!(seq.is_interactive());
    }

    #[test]
    fn test_single_large_tick_reports_every_stage() {
        let mut seq = IntroSequencer::new(IntroConfig::default(), VIEWPORT);
        let events = seq.tick(Duration::from_secs(60));

        assert_eq!(events.len(), 5);
        assert_eq!(events.last(), Some(&SequencerEvent::Completed));
        assert!(seq.tick(Duration::from_secs(60)).is_empty());
    }

    #[test]
    fn test_zero_length_hold_is_still_entered() {
        let config = IntroConfig {
            hold_ms: 0,
            ..IntroConfig::default()
        };
        let mut seq = IntroSequencer::new(config, VIEWPORT);
        let events = seq.tick(ms(2400));

        assert_eq!(
            events,
            vec![
                SequencerEvent::StageEntered(AnimationStage::LogoReveal),
                SequencerEvent::StageEntered(AnimationStage::Hold),
                SequencerEvent::StageEntered(AnimationStage::Transition),
            ]
        );
    }

    #[test]
    fn test_frames_follow_stages() {
        let mut seq = IntroSequencer::new(IntroConfig::default(), VIEWPORT);
        assert_eq!(seq.frame().branding_opacity, 1.0);
        assert_eq!(seq.frame().logo_offset, 170.0);

        // End of the branding hold
        seq.tick(ms(1200));
        assert_eq!(seq.frame().branding_opacity, 1.0);
        assert_eq!(seq.stage(), AnimationStage::Branding);

        // Mid fade
        seq.tick(ms(300));
        let mid = seq.frame().branding_opacity;
        assert!(mid > 0.0 && mid < 1.0);
        assert_eq!(seq.frame().logo_opacity, 0.0);

        // Branding gone before the logo starts
        seq.tick(ms(300));
        assert_eq!(seq.frame().branding_opacity, 0.0);
        assert_eq!(seq.frame().logo_opacity, 0.0);

        seq.tick(ms(600));
        assert_eq!(seq.frame().logo_opacity, 1.0);
        assert_eq!(seq.stage(), AnimationStage::Hold);
        assert_eq!(seq.frame().content_opacity, 0.0);

        // Dock tweens finish at 600ms, content keeps fading
        seq.tick(ms(400 + 600));
        assert_eq!(seq.frame().logo_offset, 0.0);
        assert_eq!(seq.frame().logo_height, 250.0);
        assert_eq!(seq.frame().logo_margin, 20.0);
        assert!(seq.frame().content_opacity < 1.0);
        assert!(!seq.is_interactive());

        let events = seq.tick(ms(200));
        assert_eq!(events.last(), Some(&SequencerEvent::Completed));
        assert_eq!(seq.frame().content_opacity, 1.0);
        assert_eq!(seq.time_to_next_step(), None);
    }

    #[test]
    fn test_cancel_suppresses_completion() {
        let mut seq = IntroSequencer::new(IntroConfig::default(), VIEWPORT);
        seq.tick(ms(2000));
        assert_eq!(seq.stage(), AnimationStage::LogoReveal);

        seq.cancel();
        assert_eq!(seq.status(), SequencerStatus::Cancelled);
        assert!(seq.tick(Duration::from_secs(60)).is_empty());
        assert!(!seq.is_interactive());
        assert_eq!(seq.stage(), AnimationStage::LogoReveal);
    }

    #[test]
    fn test_restart_replays_from_branding() {
        let mut seq = IntroSequencer::new(IntroConfig::default(), VIEWPORT);
        seq.tick(Duration::from_secs(10));
        assert!(seq.is_interactive());

        seq.restart(700.0);
        assert_eq!(seq.stage(), AnimationStage::Branding);
        assert_eq!(seq.status(), SequencerStatus::Running);
        assert_eq!(seq.frame().branding_opacity, 1.0);
        assert_eq!(seq.layout().final_height, 200.0);
        assert_eq!(seq.time_to_next_step(), Some(ms(1200)));

        let events = seq.tick(Duration::from_secs(10));
        assert_eq!(
            events
                .iter()
                .filter(|e| **e == SequencerEvent::Completed)
                .count(),
            1
        );
        assert_eq!(seq.frame().logo_height, 200.0);
    }
}

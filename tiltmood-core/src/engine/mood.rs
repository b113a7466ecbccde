//! Per-tick mood engine
//!
//! Tick order:
//! 1. Drain pending input (each event touches the idle timer, then acts)
//! 2. Sample orientation (flip detection, then zone classification)
//! 3. Check the idle timeout
//! 4. Pick exactly one frame: sleep face, reaction frame or mood frame
//! 5. Push power changes and the frame to the board, only when they differ.
//!    The frame is the only paint in a tick, even on a power edge.

use crate::animation::{AnimationPlayer, Catalog, Frame, Mood};
use crate::config::{ConfigError, EngineConfig};
use crate::gesture::FlipGestureDetector;
use crate::idle::{IdleSleepManager, PowerTransition};
use crate::state::{Action, DirectionEvent, EngineState};
#[cfg(test)]
use crate::state::Mode;
use crate::time::Instant;
use crate::traits::{Board, DisplayError, OrientationSample};
use crate::zone::ZoneClassifier;

/// Upper bound on input events consumed in one tick
pub const MAX_EVENTS_PER_TICK: usize = 8;

/// Result of one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PresentationCommand {
    /// The frame that should be visible after this tick
    pub frame: Frame,
    /// Display should be at reduced brightness
    pub power_dim: bool,
}

/// The mood state engine
pub struct MoodEngine<'a, B: Board> {
    config: EngineConfig,
    catalog: Catalog<'a>,
    board: B,
    classifier: ZoneClassifier,
    flip: FlipGestureDetector,
    idle: IdleSleepManager,
    player: AnimationPlayer,
    state: EngineState,
    /// Last frame the board accepted
    presented: Option<Frame>,
    /// Last power mode the board accepted
    dimmed: bool,
}

impl<'a, B: Board> MoodEngine<'a, B> {
    /// Validate the configuration and build an engine
    ///
    /// The idle timer starts at `now`. The display is assumed to be at full
    /// brightness and showing nothing we know of.
    pub fn new(
        config: EngineConfig,
        catalog: Catalog<'a>,
        board: B,
        now: Instant,
    ) -> Result<Self, ConfigError> {
        config.validate(&catalog)?;

        Ok(Self {
            classifier: ZoneClassifier::new(config.zone),
            flip: FlipGestureDetector::new(config.flip),
            idle: IdleSleepManager::new(config.idle_timeout_ms, now),
            player: AnimationPlayer::new(),
            state: EngineState::new(config.home_mood),
            presented: None,
            dimmed: false,
            config,
            catalog,
            board,
        })
    }

    /// Run one tick and report what the display should show
    pub fn tick(&mut self, now: Instant) -> PresentationCommand {
        self.drain_input(now);

        if let Ok(sample) = self.board.poll_orientation(now) {
            self.observe(&sample, now);
        }

        if let Some(PowerTransition::Sleep) = self.idle.poll(now) {
            #[cfg(feature = "defmt")]
            defmt::info!("Idle timeout, sleeping");
        }

        let frame = self.next_frame();
        let power_dim = self.idle.is_sleeping();

        self.sync_power(power_dim);
        self.sync_frame(&frame);

        PresentationCommand { frame, power_dim }
    }

    /// Milliseconds to wait before the next tick
    pub fn frame_interval_ms(&self) -> u32 {
        if self.idle.is_sleeping() {
            self.config.sleep_poll_ms
        } else if self.player.is_reacting() {
            self.config.reaction_frame_ms
        } else {
            self.current_mood()
                .map(AnimationPlayer::frame_interval_ms)
                .unwrap_or(self.config.sleep_poll_ms)
        }
    }

    /// Blank the display before stopping
    pub fn shutdown(&mut self) -> Result<(), DisplayError> {
        self.board.clear()?;
        self.presented = Some(Frame::BLANK);
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> &EngineState {
        &self.state
    }

    #[cfg(test)]
    pub(crate) fn mode(&self) -> Mode {
        self.state.mode(self.idle.is_sleeping())
    }

    #[cfg(test)]
    pub(crate) fn is_reacting(&self) -> bool {
        self.player.is_reacting()
    }

    #[cfg(test)]
    pub(crate) fn board(&self) -> &B {
        &self.board
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut B {
        &mut self.board
    }

    /// Selected mood
    fn current_mood(&self) -> Option<&'a Mood<'a>> {
        self.catalog.mood(self.state.mood_index())
    }

    /// Consume pending input events, bounded per tick
    fn drain_input(&mut self, now: Instant) {
        for _ in 0..MAX_EVENTS_PER_TICK {
            match self.board.next_input_event() {
                Ok(Some(event)) => self.handle_event(event, now),
                Ok(None) => break,
                Err(_e) => {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("Input error: {}", _e);
                    break;
                }
            }
        }
    }

    fn handle_event(&mut self, event: DirectionEvent, now: Instant) {
        self.touch(now);

        let action = self.config.bindings.action_for(event);
        #[cfg(feature = "defmt")]
        defmt::debug!("Input {} -> {}", event, action);

        if action == Action::Ignore {
            return;
        }
        self.state = self
            .state
            .apply(action, self.catalog.len(), self.config.home_mood);
    }

    /// Feed one sample to the flip detector and the zone classifier
    fn observe(&mut self, sample: &OrientationSample, now: Instant) {
        if self.flip.observe(sample) {
            self.touch(now);
            if self.player.start_reaction() {
                #[cfg(feature = "defmt")]
                defmt::info!("Flip gesture");
            }
        }

        // Zones seen while asleep are picked up after waking
        if self.idle.is_sleeping() {
            return;
        }

        let zone = self.classifier.classify(sample.pitch, sample.roll);
        if self.player.is_reacting() {
            self.state = self.state.adopt_zone(zone);
            return;
        }

        if self.state.zone_changed(zone) {
            #[cfg(feature = "defmt")]
            defmt::debug!("Zone {}", zone);
        }
        self.state = self
            .state
            .observe_zone(zone, self.config.mood_for_zone(zone));
    }

    fn touch(&mut self, now: Instant) {
        if let Some(PowerTransition::Wake) = self.idle.touch(now) {
            #[cfg(feature = "defmt")]
            defmt::info!("Waking");
        }
    }

    /// Choose the one frame for this tick and step playback
    fn next_frame(&mut self) -> Frame {
        if self.idle.is_sleeping() {
            return *self.catalog.sleep_frame();
        }

        let reaction = self.catalog.reaction();
        if let Some(frame) = self
            .player
            .advance_reaction(reaction, self.config.reaction_cycles)
        {
            return *frame;
        }

        let Some(mood) = self.current_mood() else {
            return Frame::BLANK;
        };
        let (frame, next) =
            self.player
                .advance(mood, self.state.frame_index(), self.state.is_paused());
        self.state = self.state.with_frame_index(next);
        *frame
    }

    /// Change display power on sleep/wake edges; retried next tick on error
    ///
    /// A power change only takes effect on the next paint, so the frame for
    /// this tick is always written after one.
    fn sync_power(&mut self, dim: bool) {
        if self.dimmed == dim {
            return;
        }
        match self.board.set_power_mode(dim) {
            Ok(()) => {
                self.dimmed = dim;
                self.presented = None;
            }
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("Power mode change failed: {}", _e);
            }
        }
    }

    /// Paint only when the frame differs from what is already shown
    fn sync_frame(&mut self, frame: &Frame) {
        if self.presented.as_ref() == Some(frame) {
            return;
        }
        match self.board.present(frame) {
            Ok(()) => self.presented = Some(*frame),
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("Present failed: {}", _e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::Rgb;
    use crate::engine::scripted::{Call, ScriptedBoard};
    use crate::state::DirectionEvent;
    use crate::traits::SensorError;
    use crate::zone::Zone;

    // Three moods with distinct, recognizable frames
    const A0: Frame = Frame::solid(Rgb::new(10, 0, 0));
    const A1: Frame = Frame::solid(Rgb::new(11, 0, 0));
    const A2: Frame = Frame::solid(Rgb::new(12, 0, 0));
    const B0: Frame = Frame::solid(Rgb::new(0, 20, 0));
    const B1: Frame = Frame::solid(Rgb::new(0, 21, 0));
    const C0: Frame = Frame::solid(Rgb::new(0, 0, 30));
    const C1: Frame = Frame::solid(Rgb::new(0, 0, 31));
    const SLEEP: Frame = Frame::solid(Rgb::new(1, 1, 1));
    const FLASH_ON: Frame = Frame::solid(Rgb::WHITE);

    static MOOD_A: [Frame; 3] = [A0, A1, A2];
    static MOOD_B: [Frame; 2] = [B0, B1];
    static MOOD_C: [Frame; 2] = [C0, C1];
    static MOODS: [Mood<'static>; 3] = [
        Mood::new("a", &MOOD_A, 10),
        Mood::new("b", &MOOD_B, 10),
        Mood::new("c", &MOOD_C, 10),
    ];
    static FLASH: [Frame; 2] = [FLASH_ON, Frame::BLANK];

    fn catalog() -> Catalog<'static> {
        Catalog::new(&MOODS, SLEEP, &FLASH)
    }

    /// Flat -> a, Forward -> b, Back -> c; Left/Right/Other unmapped
    fn config() -> EngineConfig {
        EngineConfig {
            zone_moods: [Some(0), Some(1), Some(2), None, None, None],
            home_mood: 0,
            ..EngineConfig::default()
        }
    }

    fn engine(board: ScriptedBoard) -> MoodEngine<'static, ScriptedBoard> {
        MoodEngine::new(config(), catalog(), board, Instant::ZERO).unwrap()
    }

    fn ms(ms: u64) -> Instant {
        Instant::from_millis(ms)
    }

    #[test]
    fn test_rejects_invalid_config() {
        let bad = EngineConfig {
            home_mood: 3,
            ..config()
        };
        let result = MoodEngine::new(bad, catalog(), ScriptedBoard::new(), Instant::ZERO);
        assert_eq!(result.err(), Some(ConfigError::HomeOutOfRange));
    }

    #[test]
    fn test_initial_tick_shows_home_first_frame() {
        let mut engine = engine(ScriptedBoard::new());
        let cmd = engine.tick(ms(0));
        assert_eq!(cmd.frame, A0);
        assert!(!cmd.power_dim);
        assert_eq!(engine.mode(), Mode::Active { mood: 0 });
        assert_eq!(engine.board().presented(), [A0]);
        assert_eq!(engine.board().power_calls(), 0);
    }

    #[test]
    fn test_no_redraw_advances_without_reset() {
        let mut board = ScriptedBoard::new();
        for t in 0..5 {
            board.push_sample(0.0, 0.0, ms(t * 100));
        }
        let mut engine = engine(board);

        let frames: Vec<Frame> = (0..5).map(|t| engine.tick(ms(t * 100)).frame).collect();
        assert_eq!(frames, [A0, A1, A2, A0, A1]);
        assert_eq!(engine.state().last_zone(), Some(Zone::Flat));
    }

    #[test]
    fn test_paused_holds_frame() {
        let mut board = ScriptedBoard::new();
        board.push_event(DirectionEvent::Middle, 1);
        let mut engine = engine(board);

        engine.tick(ms(0));
        let cmd = engine.tick(ms(100));
        assert_eq!(cmd.frame, A1);
        assert_eq!(engine.mode(), Mode::Paused { mood: 0 });

        for t in 2..6 {
            assert_eq!(engine.tick(ms(t * 100)).frame, A1);
        }
        // Unchanged frame is painted once
        assert_eq!(engine.board().presented(), [A0, A1]);
    }

    #[test]
    fn test_zone_sequence_resets_only_on_change() {
        let mut board = ScriptedBoard::new();
        board.push_sample(0.0, 0.0, ms(0));
        board.push_sample(30.0, 0.0, ms(100));
        board.push_sample(30.0, 0.0, ms(200));
        board.push_sample(-30.0, 0.0, ms(300));
        let mut engine = engine(board);

        let t1 = engine.tick(ms(0));
        assert_eq!(t1.frame, A0);

        // Tick 2: Forward is new, mood b restarts at frame 0
        let t2 = engine.tick(ms(100));
        assert_eq!(t2.frame, B0);
        assert_eq!(engine.state().mood_index(), 1);

        // Tick 3: still Forward, playback continues
        let t3 = engine.tick(ms(200));
        assert_eq!(t3.frame, B1);

        // Tick 4: Back is new, mood c restarts at frame 0
        let t4 = engine.tick(ms(300));
        assert_eq!(t4.frame, C0);
        assert_eq!(engine.state().last_zone(), Some(Zone::Back));
    }

    #[test]
    fn test_unmapped_zone_keeps_mood() {
        let mut board = ScriptedBoard::new();
        board.push_sample(0.0, 0.0, ms(0));
        board.push_sample(0.0, 30.0, ms(100));
        let mut engine = engine(board);

        engine.tick(ms(0));
        let cmd = engine.tick(ms(100));
        assert_eq!(cmd.frame, A1);
        assert_eq!(engine.state().last_zone(), Some(Zone::Right));
    }

    #[test]
    fn test_paused_ignores_zone_changes() {
        let mut board = ScriptedBoard::new();
        board.push_event(DirectionEvent::Middle, 0);
        board.push_sample(30.0, 0.0, ms(0));
        let mut engine = engine(board);

        let cmd = engine.tick(ms(0));
        assert_eq!(cmd.frame, A0);
        assert_eq!(engine.state().mood_index(), 0);
        assert_eq!(engine.state().last_zone(), None);
    }

    #[test]
    fn test_navigation() {
        let mut board = ScriptedBoard::new();
        board.push_event(DirectionEvent::Left, 0);
        board.push_event(DirectionEvent::Right, 1);
        board.push_event(DirectionEvent::Right, 1);
        board.push_event(DirectionEvent::Up, 2);
        let mut engine = engine(board);

        // Previous from a wraps to c
        assert_eq!(engine.tick(ms(0)).frame, C0);
        // Two nexts in one tick: c -> a -> b
        assert_eq!(engine.tick(ms(100)).frame, B0);
        // Home
        assert_eq!(engine.tick(ms(200)).frame, A0);
    }

    #[test]
    fn test_navigation_clears_pause() {
        let mut board = ScriptedBoard::new();
        board.push_event(DirectionEvent::Middle, 0);
        board.push_event(DirectionEvent::Right, 1);
        let mut engine = engine(board);

        engine.tick(ms(0));
        assert!(engine.state().is_paused());
        assert_eq!(engine.tick(ms(100)).frame, B0);
        assert!(!engine.state().is_paused());
        assert_eq!(engine.tick(ms(200)).frame, B1);
    }

    #[test]
    fn test_events_bounded_per_tick() {
        let mut board = ScriptedBoard::new();
        for _ in 0..(MAX_EVENTS_PER_TICK + 2) {
            board.push_event(DirectionEvent::Down, 0);
        }
        let mut engine = engine(board);

        engine.tick(ms(0));
        assert_eq!(engine.board().pending_events(), 2);
        engine.tick(ms(100));
        assert_eq!(engine.board().pending_events(), 0);
    }

    #[test]
    fn test_idle_sleep_and_wake() {
        let mut board = ScriptedBoard::new();
        board.push_event(DirectionEvent::Middle, 1);
        board.push_event(DirectionEvent::Middle, 4);
        let mut engine = engine(board);

        engine.tick(ms(0));
        assert!(!engine.tick(ms(10_000)).power_dim);

        // 25 s without input
        let asleep = engine.tick(ms(35_001));
        assert!(asleep.power_dim);
        assert_eq!(asleep.frame, SLEEP);
        assert_eq!(
            engine.mode(),
            Mode::Sleeping {
                mood: 0,
                paused: true
            }
        );

        // Staying asleep does not repeat the power change
        assert!(engine.tick(ms(36_000)).power_dim);
        assert_eq!(engine.board().power_calls(), 1);

        // Middle wakes and toggles pause in the same tick
        let awake = engine.tick(ms(40_000));
        assert!(!awake.power_dim);
        assert_eq!(engine.mode(), Mode::Active { mood: 0 });
        assert_eq!(engine.board().power_log(), [true, false]);
    }

    #[test]
    fn test_power_edge_paints_once() {
        let mut engine = engine(ScriptedBoard::new());
        engine.tick(ms(0));

        engine.tick(ms(20_001));
        assert_eq!(
            engine.board().calls(),
            [Call::Present(A0), Call::Power(true), Call::Present(SLEEP)]
        );
    }

    #[test]
    fn test_power_edge_repaints_unchanged_frame() {
        let mut board = ScriptedBoard::new();
        board.push_event(DirectionEvent::Middle, 0);
        board.push_event(DirectionEvent::Down, 2);
        let mut engine = engine(board);

        // Paused on A0, sleeps, then an ignored key wakes onto the same frame
        engine.tick(ms(0));
        engine.tick(ms(20_001));
        let cmd = engine.tick(ms(20_100));
        assert_eq!(cmd.frame, A0);
        assert_eq!(
            engine.board().calls(),
            [
                Call::Present(A0),
                Call::Power(true),
                Call::Present(SLEEP),
                Call::Power(false),
                Call::Present(A0)
            ]
        );
    }

    #[test]
    fn test_scenario_middle_after_idle() {
        let mut board = ScriptedBoard::new();
        board.push_event(DirectionEvent::Middle, 1);
        let mut engine = engine(board);

        assert!(engine.tick(ms(25_000)).power_dim);

        let cmd = engine.tick(ms(25_100));
        assert!(!cmd.power_dim);
        assert_eq!(engine.mode(), Mode::Paused { mood: 0 });
        assert_eq!(engine.state().mood_index(), 0);
    }

    #[test]
    fn test_ignored_input_still_wakes() {
        let mut board = ScriptedBoard::new();
        board.push_event(DirectionEvent::Down, 1);
        let mut engine = engine(board);

        assert!(engine.tick(ms(21_000)).power_dim);
        let cmd = engine.tick(ms(21_100));
        assert!(!cmd.power_dim);
        assert_eq!(engine.mode(), Mode::Active { mood: 0 });
    }

    #[test]
    fn test_flip_plays_reaction_then_resumes() {
        let mut board = ScriptedBoard::new();
        board.push_sample(30.0, 0.0, ms(0));
        board.push_sample(30.0, 0.0, ms(100));
        // Swing of 80 degrees inside the window
        board.push_sample(-50.0, 0.0, ms(200));
        let mut engine = engine(board);

        assert_eq!(engine.tick(ms(0)).frame, B0);
        assert_eq!(engine.tick(ms(100)).frame, B1);

        let mut frames = Vec::new();
        for t in 2..8 {
            frames.push(engine.tick(ms(t * 100)).frame);
            assert!(engine.is_reacting() || t == 7);
        }
        assert_eq!(
            frames,
            [
                FLASH_ON,
                Frame::BLANK,
                FLASH_ON,
                Frame::BLANK,
                FLASH_ON,
                Frame::BLANK
            ]
        );

        // Prior mood and frame continue; Back was adopted without a reset
        assert_eq!(engine.tick(ms(800)).frame, B0);
        assert_eq!(engine.state().mood_index(), 1);
        assert_eq!(engine.state().last_zone(), Some(Zone::Back));
    }

    #[test]
    fn test_flip_ignores_pause_and_wakes() {
        let mut board = ScriptedBoard::new();
        board.push_event(DirectionEvent::Middle, 0);
        board.push_sample(0.0, 0.0, ms(30_000));
        board.push_sample(0.0, 0.0, ms(30_100));
        board.push_sample(70.0, 0.0, ms(30_200));
        let mut engine = engine(board);

        engine.tick(ms(0));
        assert!(engine.tick(ms(30_000)).power_dim);
        assert!(engine.tick(ms(30_100)).power_dim);

        let cmd = engine.tick(ms(30_200));
        assert!(!cmd.power_dim);
        assert_eq!(cmd.frame, FLASH_ON);
        assert!(engine.state().is_paused());
    }

    #[test]
    fn test_flip_caught_at_slowest_builtin_rate() {
        use crate::animation::faces::{CALM_INDEX, FLASH};

        let config = EngineConfig {
            zone_moods: [None; 6],
            home_mood: CALM_INDEX,
            ..EngineConfig::default()
        };
        let catalog = Catalog::builtin();

        // The sensor is read once per tick, so the window must span the
        // longest tick spacing for a swing to land in it
        for mood in catalog.moods() {
            assert!(AnimationPlayer::frame_interval_ms(mood) <= config.flip.window_ms);
        }

        let mut board = ScriptedBoard::new();
        board.push_sample(0.0, 0.0, ms(0));
        board.push_sample(70.0, 0.0, ms(500));
        let mut engine = MoodEngine::new(config, catalog, board, Instant::ZERO).unwrap();

        engine.tick(ms(0));
        assert_eq!(engine.frame_interval_ms(), 500);
        assert_eq!(engine.tick(ms(500)).frame, FLASH[0]);
    }

    #[test]
    fn test_reaction_interval() {
        let mut board = ScriptedBoard::new();
        board.push_sample(0.0, 0.0, ms(0));
        board.push_sample(70.0, 0.0, ms(100));
        let mut engine = engine(board);

        engine.tick(ms(0));
        assert_eq!(engine.frame_interval_ms(), 100);
        engine.tick(ms(100));
        assert_eq!(engine.frame_interval_ms(), config().reaction_frame_ms);
    }

    #[test]
    fn test_sleep_interval() {
        let mut engine = engine(ScriptedBoard::new());
        engine.tick(ms(20_001));
        assert_eq!(engine.frame_interval_ms(), config().sleep_poll_ms);
    }

    #[test]
    fn test_sensor_errors_freeze_mood() {
        let mut board = ScriptedBoard::new();
        board.push_sample(30.0, 0.0, ms(0));
        let mut engine = engine(board);

        engine.tick(ms(0));
        for t in 1..4 {
            engine
                .board_mut()
                .push_sensor_error(SensorError::Bus, ms(t * 100));
            engine.tick(ms(t * 100));
            assert_eq!(engine.state().mood_index(), 1);
            assert_eq!(engine.state().last_zone(), Some(Zone::Forward));
        }
    }

    #[test]
    fn test_present_retried_after_error() {
        let mut board = ScriptedBoard::new();
        board.fail_next_present();
        let mut engine = engine(board);

        engine.tick(ms(0));
        assert!(engine.board().presented().is_empty());

        // Next tick paints again
        engine.tick(ms(100));
        assert_eq!(engine.board().presented(), [A1]);
    }

    #[test]
    fn test_shutdown_clears_display() {
        let mut engine = engine(ScriptedBoard::new());
        engine.tick(ms(0));
        assert_eq!(engine.shutdown(), Ok(()));
        assert_eq!(engine.board().calls().last(), Some(&Call::Present(Frame::BLANK)));
    }
}

//! Wave sequencing: warning → spawn → active → cleared → break, then the ending.
//!
//! ```text
//!   Standby ─▶ Warning ─▶ Spawning ─▶ Active ─▶ Cleared ─┬─▶ Break ─▶ Warning (next wave)
//!                                        │                │
//!                                        └─ timeout ──────┘  final wave
//!                                           (force-clear)     └─▶ Ending ─▶ Finished
//! ```
//!
//! The director owns the remaining-hostile counter. It only goes down through
//! `notify_hostile_defeated`, a spawn the spawner refused, or the timeout force-clear.

use std::collections::VecDeque;

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::channel::{BreakExit, EncounterEvent};
use super::collaborators::{EncounterContext, MissingLog};
use super::config::EncounterConfig;
use super::ending::EndingSequence;
use super::error::EncounterError;
use crate::combat::Faction;
use crate::core::{Countdown, Fault};

/// Radius of the live-hostile census taken when a wave times out.
const CENSUS_RADIUS: f32 = 1000.0;

/// Phase of the encounter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncounterPhase {
    Standby,
    Warning,
    Spawning,
    Active,
    Cleared,
    Break,
    Ending,
    Finished,
}

impl EncounterPhase {
    pub fn name(&self) -> &'static str {
        match self {
            EncounterPhase::Standby => "Standby",
            EncounterPhase::Warning => "Warning",
            EncounterPhase::Spawning => "Spawning",
            EncounterPhase::Active => "Active",
            EncounterPhase::Cleared => "Cleared",
            EncounterPhase::Break => "Break",
            EncounterPhase::Ending => "Ending",
            EncounterPhase::Finished => "Finished",
        }
    }
}

/// Sequences every wave of one encounter.
#[derive(Resource)]
pub struct EncounterDirector {
    config: EncounterConfig,
    spawn_points: Vec<Vec3>,
    phase: EncounterPhase,
    /// Zero-based index into `config.waves`
    wave_index: usize,
    remaining: u32,
    /// Duration of the current timed phase (warning, cleared hold, break)
    phase_timer: Countdown,
    spawn_queue: VecDeque<String>,
    spawn_timer: Countdown,
    timeout: Countdown,
    forced: bool,
    /// First break exit signalled during the current break
    pending_exit: Option<BreakExit>,
    last_break_exit: Option<BreakExit>,
    ending: EndingSequence,
    rng: StdRng,
    missing: MissingLog,
}

impl EncounterDirector {
    /// Validates `config` and prepares the director in `Standby`.
    pub fn new(config: EncounterConfig) -> Result<Self, EncounterError> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let ending_music = config
            .music
            .ending
            .clone()
            .map(|track| (track, config.music.crossfade));
        let ending = EndingSequence::new(config.ending.clone(), ending_music);

        Ok(Self {
            spawn_points: config.spawn_positions(),
            config,
            phase: EncounterPhase::Standby,
            wave_index: 0,
            remaining: 0,
            phase_timer: Countdown::elapsed(),
            spawn_queue: VecDeque::new(),
            spawn_timer: Countdown::elapsed(),
            timeout: Countdown::elapsed(),
            forced: false,
            pending_exit: None,
            last_break_exit: None,
            ending,
            rng,
            missing: MissingLog::default(),
        })
    }

    pub fn phase(&self) -> EncounterPhase {
        self.phase
    }

    /// Current wave number, starting at 1. Zero before the first tick.
    pub fn wave(&self) -> u32 {
        match self.phase {
            EncounterPhase::Standby => 0,
            _ => self.wave_index as u32 + 1,
        }
    }

    pub fn total_waves(&self) -> u32 {
        self.config.waves.len() as u32
    }

    /// Hostiles of the current wave still standing.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Hostiles still waiting to be spawned this wave.
    pub fn pending_spawns(&self) -> usize {
        self.spawn_queue.len()
    }

    /// Seconds left in the break, while in one.
    pub fn break_remaining(&self) -> Option<f32> {
        (self.phase == EncounterPhase::Break).then(|| self.phase_timer.remaining())
    }

    pub fn last_break_exit(&self) -> Option<BreakExit> {
        self.last_break_exit
    }

    /// Whether the last cleared wave was force-cleared by the timeout.
    pub fn was_forced(&self) -> bool {
        self.forced
    }

    pub fn is_final_wave(&self) -> bool {
        self.wave_index + 1 >= self.config.waves.len()
    }

    pub fn ending(&self) -> &EndingSequence {
        &self.ending
    }

    pub fn config(&self) -> &EncounterConfig {
        &self.config
    }

    pub fn missing(&self) -> &MissingLog {
        &self.missing
    }

    /// A hostile of the current wave died.
    pub fn notify_hostile_defeated(&mut self) {
        match self.phase {
            EncounterPhase::Spawning | EncounterPhase::Active if self.remaining > 0 => {
                self.remaining -= 1;
                debug!("Wave {}: {} hostiles remaining", self.wave(), self.remaining);
            }
            _ => debug!(
                "{}",
                Fault::InvalidTransition {
                    request: "hostile defeated",
                    state: self.phase.name(),
                }
            ),
        }
    }

    /// The player asked to skip the rest of the break.
    pub fn request_skip(&mut self) {
        self.signal_break_exit(BreakExit::Skipped, "skip");
    }

    /// A reward pickup was claimed.
    pub fn on_reward_claimed(&mut self) {
        self.signal_break_exit(BreakExit::RewardClaimed, "reward claimed");
    }

    /// The player pressed advance; forwarded to the ending dialogue.
    pub fn advance_dialogue(&mut self) {
        if self.phase == EncounterPhase::Ending {
            self.ending.advance_dialogue();
        }
    }

    /// Advances the encounter by `dt` seconds.
    pub fn tick(&mut self, dt: f32, ctx: &mut EncounterContext) {
        match self.phase {
            EncounterPhase::Standby => self.begin_warning(ctx),
            EncounterPhase::Warning => {
                if self.phase_timer.tick(dt) {
                    self.begin_spawning(ctx);
                }
            }
            EncounterPhase::Spawning => self.tick_spawning(dt, ctx),
            EncounterPhase::Active => self.tick_active(dt, ctx),
            EncounterPhase::Cleared => {
                if self.phase_timer.tick(dt) {
                    if self.is_final_wave() {
                        self.begin_ending(ctx);
                    } else {
                        self.begin_break();
                    }
                }
            }
            EncounterPhase::Break => self.tick_break(dt, ctx),
            EncounterPhase::Ending => {
                if self.ending.tick(dt, ctx, &mut self.missing) {
                    self.finish(ctx);
                }
            }
            EncounterPhase::Finished => {}
        }
    }

    fn signal_break_exit(&mut self, exit: BreakExit, request: &'static str) {
        if self.phase != EncounterPhase::Break {
            debug!(
                "{}",
                Fault::InvalidTransition {
                    request,
                    state: self.phase.name(),
                }
            );
            return;
        }
        // First signal wins
        if self.pending_exit.is_none() {
            self.pending_exit = Some(exit);
        }
    }

    fn begin_warning(&mut self, ctx: &mut EncounterContext) {
        self.phase = EncounterPhase::Warning;
        let wave = self.wave();
        let duration = self.config.timings.warning;
        self.phase_timer = Countdown::new(duration);

        info!("Wave {} of {} incoming", wave, self.total_waves());
        ctx.present(&mut self.missing, |p| p.show_warning(wave, duration));
    }

    fn begin_spawning(&mut self, ctx: &mut EncounterContext) {
        self.phase = EncounterPhase::Spawning;
        let wave = self.wave();
        let definition = &self.config.waves[self.wave_index];

        // Counter is set before anything spawns, so early deaths can never underflow it
        self.remaining = definition.total();
        self.spawn_queue = definition.spawn_order().map(str::to_string).collect();
        self.spawn_timer = Countdown::elapsed();
        self.forced = false;

        info!("Wave {} started with {} hostiles", wave, self.remaining);
        ctx.events.publish(EncounterEvent::WaveStarted { wave });
        let payload = format!("wave={} hostiles={}", wave, self.remaining);
        ctx.report(&mut self.missing, "wave_started", &payload);
        if let Some(track) = self.config.music.combat.clone() {
            let fade = self.config.music.crossfade;
            ctx.present(&mut self.missing, |p| p.crossfade_music(&track, fade));
        }

        // First spawn is immediate
        self.tick_spawning(0.0, ctx);
    }

    fn tick_spawning(&mut self, dt: f32, ctx: &mut EncounterContext) {
        let mut budget = dt;
        while !self.spawn_queue.is_empty() {
            let waited = self.spawn_timer.remaining();
            if !self.spawn_timer.tick(budget) {
                break;
            }
            budget = (budget - waited).max(0.0);
            self.spawn_next(ctx);
            self.spawn_timer = Countdown::new(self.config.timings.spawn_interval);
        }

        if self.spawn_queue.is_empty() {
            self.phase = EncounterPhase::Active;
            self.timeout = Countdown::new(self.config.timings.wave_timeout);
            debug!("Wave {} fully spawned", self.wave());
        }
    }

    fn spawn_next(&mut self, ctx: &mut EncounterContext) {
        let Some(prototype) = self.spawn_queue.pop_front() else {
            return;
        };
        let wave = self.wave();
        let point = self.spawn_points[self.rng.gen_range(0..self.spawn_points.len())];

        let spawned = match ctx.spawner.as_deref_mut() {
            Some(spawner) => spawner.spawn(&prototype, point, wave),
            None => {
                self.missing.note("hostile spawner");
                None
            }
        };

        if spawned.is_none() {
            // Nothing will ever report this one's death
            warn!("Could not spawn '{}' for wave {}, not counting it", prototype, wave);
            self.remaining = self.remaining.saturating_sub(1);
        }
    }

    fn tick_active(&mut self, dt: f32, ctx: &mut EncounterContext) {
        if self.remaining == 0 {
            self.enter_cleared(ctx);
            return;
        }
        if !self.timeout.tick(dt) {
            return;
        }

        let fault = Fault::StuckEncounter {
            wave: self.wave(),
            remaining: self.remaining,
            timeout: self.config.timings.wave_timeout,
        };
        match ctx.census {
            Some(census) => {
                let alive = census
                    .query_in_radius(Vec3::ZERO, CENSUS_RADIUS, Faction::Hostile)
                    .len();
                warn!("{} ({} hostiles alive in the arena)", fault, alive);
            }
            None => warn!("{}", fault),
        }

        self.remaining = 0;
        self.forced = true;
        self.enter_cleared(ctx);
    }

    fn enter_cleared(&mut self, ctx: &mut EncounterContext) {
        self.phase = EncounterPhase::Cleared;
        self.phase_timer = Countdown::new(self.config.timings.cleared_hold);
        let wave = self.wave();
        let forced = self.forced;
        let final_wave = self.is_final_wave();

        info!("Wave {} cleared{}", wave, if forced { " (timed out)" } else { "" });
        ctx.events.publish(EncounterEvent::WaveCleared { wave, forced });
        let payload = format!("wave={} forced={}", wave, forced);
        ctx.report(&mut self.missing, "wave_cleared", &payload);

        let calm = self.config.music.calm.clone();
        let fade = self.config.music.crossfade;
        ctx.present(&mut self.missing, |p| {
            p.show_cleared(wave);
            if let Some(track) = &calm {
                if !final_wave {
                    p.crossfade_music(track, fade);
                }
            }
        });

        if !final_wave {
            ctx.reward(&mut self.missing, |r| r.spawn_rewards(wave));
        }
    }

    fn begin_break(&mut self) {
        self.phase = EncounterPhase::Break;
        self.phase_timer = Countdown::new(self.config.timings.break_duration);
        self.pending_exit = None;
        info!(
            "Break after wave {} ({}s)",
            self.wave(),
            self.config.timings.break_duration
        );
    }

    fn tick_break(&mut self, dt: f32, ctx: &mut EncounterContext) {
        let exit = match self.pending_exit.take() {
            Some(exit) => exit,
            None if self.phase_timer.tick(dt) => BreakExit::Expired,
            None => return,
        };

        let wave = self.wave();
        info!("Break after wave {} ended: {:?}", wave, exit);
        self.last_break_exit = Some(exit);
        ctx.reward(&mut self.missing, |r| r.clear_unclaimed());
        ctx.events.publish(EncounterEvent::BreakEnded { wave, reason: exit });
        let payload = format!("wave={} reason={:?}", wave, exit);
        ctx.report(&mut self.missing, "break_ended", &payload);

        self.wave_index += 1;
        self.begin_warning(ctx);
    }

    fn begin_ending(&mut self, ctx: &mut EncounterContext) {
        self.phase = EncounterPhase::Ending;
        info!("All {} waves cleared, starting the ending", self.total_waves());
        ctx.events.publish(EncounterEvent::EndingStarted);
        ctx.report(&mut self.missing, "ending_started", "");
        // Lock controls on this very tick
        self.ending.tick(0.0, ctx, &mut self.missing);
    }

    fn finish(&mut self, ctx: &mut EncounterContext) {
        self.phase = EncounterPhase::Finished;
        info!("Encounter finished");
        ctx.events.publish(EncounterEvent::EncounterFinished);
        ctx.report(&mut self.missing, "encounter_finished", "");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::ArenaSnapshot;
    use crate::encounter::channel::EventChannel;
    use crate::encounter::collaborators::PanTarget;
    use crate::encounter::config::{
        EndingConfig, MusicTracks, PhaseTimings, RewardConfig, SpawnGroup, WaveDefinition,
    };
    use crate::encounter::cues::{CueBuffer, StageCue};
    use crate::testing::{entity, RecordingSpawner, RewardLedger, TelemetryLog};

    const DT: f32 = 0.1;

    fn wave(groups: &[(&str, u32)]) -> WaveDefinition {
        WaveDefinition {
            groups: groups
                .iter()
                .map(|&(prototype, count)| SpawnGroup {
                    prototype: prototype.to_string(),
                    count,
                })
                .collect(),
        }
    }

    fn config(waves: Vec<WaveDefinition>) -> EncounterConfig {
        EncounterConfig {
            waves,
            spawn_points: vec![(10.0, 0.0, 0.0), (-10.0, 0.0, 0.0), (0.0, 0.0, 10.0)],
            timings: PhaseTimings {
                warning: 1.0,
                spawn_interval: 1.0,
                wave_timeout: 30.0,
                cleared_hold: 0.5,
                break_duration: 10.0,
            },
            music: MusicTracks {
                combat: Some("music/combat.ogg".to_string()),
                calm: Some("music/calm.ogg".to_string()),
                ending: Some("music/ending.ogg".to_string()),
                crossfade: 1.0,
            },
            ending: EndingConfig {
                speaker: "Warden".to_string(),
                lines: vec!["It is over.".to_string(), "Rest now.".to_string()],
                typing_speed: 20.0,
                pan_duration: 1.0,
                cue_duration: 0.5,
                fade_duration: 1.0,
                terminal_cue: None,
                ..EndingConfig::default()
            },
            rewards: RewardConfig::default(),
            seed: Some(7),
        }
    }

    /// In-memory stand-ins for every collaborator, plus a log of published events.
    #[derive(Default)]
    struct Stage {
        spawner: RecordingSpawner,
        rewards: RewardLedger,
        cues: CueBuffer,
        telemetry: TelemetryLog,
        census: ArenaSnapshot,
        channel: EventChannel,
        published: Vec<EncounterEvent>,
        spawn_times: Vec<f32>,
        now: f32,
    }

    impl Stage {
        fn tick(&mut self, director: &mut EncounterDirector) {
            let spawned_before = self.spawner.spawned.len();
            let mut ctx = EncounterContext {
                spawner: Some(&mut self.spawner),
                rewards: Some(&mut self.rewards),
                presentation: Some(&mut self.cues),
                telemetry: Some(&mut self.telemetry),
                census: Some(&self.census),
                events: &mut self.channel,
            };
            director.tick(DT, &mut ctx);

            for _ in spawned_before..self.spawner.spawned.len() {
                self.spawn_times.push(self.now);
            }
            self.published.extend(self.channel.drain());
            self.now += DT;
        }

        fn tick_until(
            &mut self,
            director: &mut EncounterDirector,
            phase: EncounterPhase,
        ) -> u32 {
            for ticks in 1..=2000 {
                self.tick(director);
                if director.phase() == phase {
                    return ticks;
                }
            }
            panic!("never reached {:?}, stuck in {:?}", phase, director.phase());
        }

        fn count(&self, matches: impl Fn(&EncounterEvent) -> bool) -> usize {
            self.published.iter().filter(|e| matches(e)).count()
        }
    }

    fn director(waves: Vec<WaveDefinition>) -> EncounterDirector {
        EncounterDirector::new(config(waves)).unwrap()
    }

    /// Reports `n` deaths, ticking between each.
    fn defeat(stage: &mut Stage, director: &mut EncounterDirector, n: u32) {
        for _ in 0..n {
            director.notify_hostile_defeated();
            stage.tick(director);
        }
    }

    #[test]
    fn test_empty_configuration_is_fatal() {
        let result = EncounterDirector::new(config(Vec::new()));
        assert!(matches!(result, Err(EncounterError::EmptyConfiguration(_))));
    }

    #[test]
    fn test_first_tick_enters_warning_for_wave_one() {
        let mut stage = Stage::default();
        let mut director = director(vec![wave(&[("charger", 1)])]);
        assert_eq!(director.phase(), EncounterPhase::Standby);
        assert_eq!(director.wave(), 0);

        stage.tick(&mut director);
        assert_eq!(director.phase(), EncounterPhase::Warning);
        assert_eq!(director.wave(), 1);
        assert_eq!(
            stage.cues.cues,
            vec![StageCue::Warning {
                wave: 1,
                duration: 1.0
            }]
        );
        assert!(stage.published.is_empty());
    }

    #[test]
    fn test_group_of_five_spawns_within_five_seconds() {
        let mut stage = Stage::default();
        let mut director = director(vec![wave(&[("charger", 5)])]);

        stage.tick_until(&mut director, EncounterPhase::Spawning);
        assert_eq!(director.remaining(), 5);
        assert_eq!(stage.spawner.spawned.len(), 1, "first spawn is immediate");
        assert_eq!(
            stage.published,
            vec![EncounterEvent::WaveStarted { wave: 1 }]
        );

        stage.tick_until(&mut director, EncounterPhase::Active);
        assert_eq!(stage.spawner.spawned.len(), 5);
        let span = stage.spawn_times[4] - stage.spawn_times[0];
        assert!(span <= 4.0 + DT + 1e-3, "spawned over {}s", span);

        let points = config(Vec::new()).spawn_positions();
        for (prototype, position, wave) in &stage.spawner.spawned {
            assert_eq!(prototype, "charger");
            assert_eq!(*wave, 1);
            assert!(points.contains(position));
        }
    }

    #[test]
    fn test_defeating_every_hostile_clears_exactly_once() {
        let mut stage = Stage::default();
        let mut director = director(vec![wave(&[("charger", 5)]), wave(&[("jumper", 1)])]);
        stage.tick_until(&mut director, EncounterPhase::Active);

        let mut last = director.remaining();
        for _ in 0..5 {
            director.notify_hostile_defeated();
            assert!(director.remaining() <= last);
            last = director.remaining();
            stage.tick(&mut director);
        }
        assert_eq!(director.phase(), EncounterPhase::Cleared);
        assert_eq!(director.remaining(), 0);

        // Late notifications are ignored
        director.notify_hostile_defeated();
        for _ in 0..20 {
            stage.tick(&mut director);
        }

        let cleared = stage.count(|e| matches!(e, EncounterEvent::WaveCleared { wave: 1, .. }));
        assert_eq!(cleared, 1);
        assert!(stage
            .published
            .contains(&EncounterEvent::WaveCleared { wave: 1, forced: false }));
        assert_eq!(stage.rewards.dropped_after, vec![1]);
        assert!(stage.cues.cues.contains(&StageCue::Cleared { wave: 1 }));
    }

    #[test]
    fn test_deaths_during_spawning_are_counted() {
        let mut stage = Stage::default();
        let mut director = director(vec![wave(&[("charger", 3)])]);
        stage.tick_until(&mut director, EncounterPhase::Spawning);

        director.notify_hostile_defeated();
        assert_eq!(director.remaining(), 2);
        stage.tick_until(&mut director, EncounterPhase::Active);
        assert_eq!(director.remaining(), 2);
    }

    #[test]
    fn test_timeout_force_clears_a_stuck_wave() {
        let mut stage = Stage::default();
        stage
            .census
            .insert(entity(1), Vec3::new(5.0, 0.0, 5.0), Faction::Hostile, 10.0);
        let mut config = config(vec![wave(&[("charger", 2)]), wave(&[("charger", 1)])]);
        config.timings.wave_timeout = 5.0;
        let mut director = EncounterDirector::new(config).unwrap();

        stage.tick_until(&mut director, EncounterPhase::Active);
        defeat(&mut stage, &mut director, 1);
        assert_eq!(director.remaining(), 1);

        let ticks = stage.tick_until(&mut director, EncounterPhase::Cleared);
        assert!(ticks <= 50, "timed out after {} ticks", ticks);
        assert_eq!(director.remaining(), 0);
        assert!(director.was_forced());
        assert!(stage
            .published
            .contains(&EncounterEvent::WaveCleared { wave: 1, forced: true }));
    }

    #[test]
    fn test_refused_spawns_cannot_deadlock_the_wave() {
        let mut stage = Stage {
            spawner: RecordingSpawner::refusing("ghost"),
            ..Default::default()
        };
        let mut director = director(vec![wave(&[("charger", 1), ("ghost", 2)])]);

        stage.tick_until(&mut director, EncounterPhase::Active);
        assert_eq!(director.remaining(), 1);

        defeat(&mut stage, &mut director, 1);
        assert_eq!(director.phase(), EncounterPhase::Cleared);
        assert!(!director.was_forced());
    }

    fn into_break(stage: &mut Stage) -> EncounterDirector {
        let mut director = director(vec![wave(&[("charger", 1)]), wave(&[("charger", 1)])]);
        stage.tick_until(&mut director, EncounterPhase::Active);
        defeat(stage, &mut director, 1);
        stage.tick_until(&mut director, EncounterPhase::Break);
        director
    }

    #[test]
    fn test_skip_ends_break_and_beats_later_claim() {
        let mut stage = Stage::default();
        let mut director = into_break(&mut stage);

        director.request_skip();
        director.on_reward_claimed();
        stage.tick(&mut director);

        assert_eq!(director.last_break_exit(), Some(BreakExit::Skipped));
        assert_eq!(director.phase(), EncounterPhase::Warning);
        assert_eq!(director.wave(), 2);
        assert_eq!(stage.rewards.clears, 1);
        assert!(stage.published.contains(&EncounterEvent::BreakEnded {
            wave: 1,
            reason: BreakExit::Skipped
        }));
    }

    #[test]
    fn test_reward_claim_ends_break() {
        let mut stage = Stage::default();
        let mut director = into_break(&mut stage);
        stage.tick(&mut director);

        director.on_reward_claimed();
        director.request_skip();
        stage.tick(&mut director);

        assert_eq!(director.last_break_exit(), Some(BreakExit::RewardClaimed));
        assert_eq!(director.phase(), EncounterPhase::Warning);
        assert_eq!(stage.rewards.clears, 1);
    }

    #[test]
    fn test_break_never_outlasts_its_duration() {
        let mut stage = Stage::default();
        let mut director = into_break(&mut stage);
        assert_eq!(director.break_remaining(), Some(10.0));

        let ticks = stage.tick_until(&mut director, EncounterPhase::Warning);
        assert!(ticks as f32 * DT <= 10.0 + 1e-3, "break lasted {} ticks", ticks);
        assert_eq!(director.last_break_exit(), Some(BreakExit::Expired));
        assert_eq!(director.break_remaining(), None);
    }

    #[test]
    fn test_signals_outside_break_are_ignored() {
        let mut stage = Stage::default();
        let mut director = director(vec![wave(&[("charger", 1)]), wave(&[("charger", 1)])]);
        stage.tick_until(&mut director, EncounterPhase::Active);

        director.request_skip();
        director.on_reward_claimed();
        defeat(&mut stage, &mut director, 1);
        director.request_skip();
        stage.tick_until(&mut director, EncounterPhase::Break);

        // Neither the Active nor the Cleared signals carried over
        for _ in 0..5 {
            stage.tick(&mut director);
        }
        assert_eq!(director.phase(), EncounterPhase::Break);
        assert_eq!(director.last_break_exit(), None);
    }

    #[test]
    fn test_final_wave_runs_the_ending_once() {
        let mut stage = Stage::default();
        let mut director = director(vec![wave(&[("charger", 2)])]);
        stage.tick_until(&mut director, EncounterPhase::Active);
        defeat(&mut stage, &mut director, 2);
        stage.tick_until(&mut director, EncounterPhase::Ending);

        // Click through the dialogue as fast as it allows
        for _ in 0..200 {
            director.advance_dialogue();
            stage.tick(&mut director);
            if director.phase() == EncounterPhase::Finished {
                break;
            }
        }
        assert_eq!(director.phase(), EncounterPhase::Finished);
        for _ in 0..20 {
            director.advance_dialogue();
            stage.tick(&mut director);
        }

        assert!(stage.rewards.dropped_after.is_empty());
        assert_eq!(stage.count(|e| *e == EncounterEvent::EndingStarted), 1);
        assert_eq!(stage.count(|e| *e == EncounterEvent::EncounterFinished), 1);
        assert_eq!(stage.published.last(), Some(&EncounterEvent::EncounterFinished));

        let cues = &stage.cues;
        assert_eq!(cues.count(|c| *c == StageCue::PlayerControl(false)), 1);
        assert_eq!(cues.count(|c| *c == StageCue::PlayerControl(true)), 0);
        assert_eq!(
            cues.count(|c| matches!(c, StageCue::Pan { target: PanTarget::Focus, .. })),
            1
        );
        assert_eq!(
            cues.count(|c| matches!(c, StageCue::Pan { target: PanTarget::Player, .. })),
            1
        );
        assert_eq!(cues.count(|c| *c == StageCue::TerminalCue), 1);
        assert_eq!(cues.count(|c| matches!(c, StageCue::FadeOut { .. })), 1);
        assert!(cues.cues.contains(&StageCue::Dialogue {
            speaker: "Warden".to_string(),
            text: "Rest now.".to_string()
        }));
        assert!(cues.cues.contains(&StageCue::Music {
            track: "music/ending.ogg".to_string(),
            fade: 1.0
        }));
    }

    #[test]
    fn test_missing_collaborators_degrade_gracefully() {
        let mut channel = EventChannel::default();
        let mut published = Vec::new();
        let mut director = director(vec![wave(&[("charger", 2)]), wave(&[("charger", 1)])]);

        for _ in 0..2000 {
            director.advance_dialogue();
            director.tick(DT, &mut EncounterContext::bare(&mut channel));
            published.extend(channel.drain());
            if director.phase() == EncounterPhase::Finished {
                break;
            }
        }

        // Nothing could spawn, so every wave cleared on its own
        assert_eq!(director.phase(), EncounterPhase::Finished);
        let started = published
            .iter()
            .filter(|e| matches!(e, EncounterEvent::WaveStarted { .. }))
            .count();
        assert_eq!(started, 2);
        assert!(published.contains(&EncounterEvent::WaveCleared { wave: 2, forced: false }));
        assert_eq!(director.missing().reported(), 4);
        assert!(director.missing().contains("hostile spawner"));
    }

    #[test]
    fn test_telemetry_sees_wave_milestones() {
        let mut stage = Stage::default();
        let mut director = director(vec![wave(&[("charger", 1)])]);
        stage.tick_until(&mut director, EncounterPhase::Active);
        defeat(&mut stage, &mut director, 1);

        let names: Vec<&str> = stage
            .telemetry
            .events
            .iter()
            .map(|(name, _)| name.as_str())
            .collect();
        assert_eq!(names, ["wave_started", "wave_cleared"]);
        assert_eq!(stage.telemetry.events[0].1, "wave=1 hostiles=1");
    }
}

//! Generic telegraph → commit → recovery sequencer shared by every hostile archetype.
//!
//! ```text
//!            start()              countdown            motion done          lockout
//!   Idle ───────────────▶ Telegraph ─────────▶ Commit ──────────▶ Recovery ────────▶ Idle
//!                             │                   │
//!                             │ actor dead        │ actor dead
//!                             ▼                   ▼
//!                          Cleanup ─────────── next tick ──────────────────────────▶ Idle
//!
//!   interrupt(): any state ──▶ Idle (immediately, releasing everything it owns)
//! ```

use std::collections::HashSet;

use bevy::prelude::*;

use super::archetype::{CommitMotion, ProjectileSpawn, Strike};
use super::profile::{horizontal, BehaviorProfile, LimbId, TelegraphContext};
use crate::combat::CombatWorld;
use crate::core::{CooldownGate, Countdown, Fault};

/// Attack phase of one actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BehaviorState {
    #[default]
    Idle,
    Telegraph,
    Commit,
    Recovery,
    Cleanup,
}

impl BehaviorState {
    pub fn name(&self) -> &'static str {
        match self {
            BehaviorState::Idle => "Idle",
            BehaviorState::Telegraph => "Telegraph",
            BehaviorState::Commit => "Commit",
            BehaviorState::Recovery => "Recovery",
            BehaviorState::Cleanup => "Cleanup",
        }
    }
}

/// Places and removes the ground markers shown while an attack is telegraphed.
pub trait IndicatorService {
    fn place(&mut self, at: Vec3, radius: f32) -> Entity;
    fn release(&mut self, indicator: Entity);
}

/// Services a sequencer may use during one tick.
pub struct SequencerContext<'a> {
    /// Scheduler time in seconds
    pub now: f32,
    pub world: &'a mut dyn CombatWorld,
    pub indicators: &'a mut dyn IndicatorService,
    /// Projectiles requested this tick
    pub projectiles: &'a mut Vec<ProjectileSpawn>,
}

/// One actor's attack state machine.
#[derive(Debug, Clone)]
pub struct BehaviorSequencer {
    actor: Entity,
    profile: BehaviorProfile,
    state: BehaviorState,
    phase_timer: Countdown,
    snapshot: Option<TelegraphContext>,
    motion: Option<CommitMotion>,
    already_hit: HashSet<Entity>,
    indicator: Option<Entity>,
    gate: CooldownGate<LimbId>,
    /// Visual "about to strike" flag, set for the telegraph and commit
    flashing: bool,
    /// Set by a successful interrupt, cleared by the next start
    interrupted: bool,
    completed: u32,
}

impl BehaviorSequencer {
    pub fn new(actor: Entity, profile: BehaviorProfile) -> Self {
        let gate = profile.build_gate();
        Self {
            actor,
            profile,
            state: BehaviorState::Idle,
            phase_timer: Countdown::elapsed(),
            snapshot: None,
            motion: None,
            already_hit: HashSet::new(),
            indicator: None,
            gate,
            flashing: false,
            interrupted: false,
            completed: 0,
        }
    }

    pub fn actor(&self) -> Entity {
        self.actor
    }

    pub fn profile(&self) -> &BehaviorProfile {
        &self.profile
    }

    pub fn state(&self) -> BehaviorState {
        self.state
    }

    /// True in every state but `Idle`.
    pub fn is_busy(&self) -> bool {
        self.state != BehaviorState::Idle
    }

    pub fn snapshot(&self) -> Option<&TelegraphContext> {
        self.snapshot.as_ref()
    }

    pub fn indicator(&self) -> Option<Entity> {
        self.indicator
    }

    pub fn is_flashing(&self) -> bool {
        self.flashing
    }

    /// Sequences that ran all the way through recovery.
    pub fn completed(&self) -> u32 {
        self.completed
    }

    /// Whether an attack on a target at `target_position` could begin right now.
    pub fn can_engage(&self, body: Vec3, target_position: Vec3, now: f32) -> bool {
        !self.is_busy()
            && self.profile.in_band(horizontal(target_position - body).length())
            && self.gate.first_ready(self.profile.limb_ids(), now).is_some()
    }

    /// Begins a telegraph against `target`.
    ///
    /// Returns false, leaving the sequencer untouched, when it is busy, the target is not
    /// a live actor, the target is outside the engage band, or no limb is off cooldown.
    pub fn start(&mut self, target: Entity, body: Vec3, ctx: &mut SequencerContext) -> bool {
        if self.is_busy() {
            debug!(
                "{:?}: {}",
                self.actor,
                Fault::InvalidTransition {
                    request: "start",
                    state: self.state.name(),
                }
            );
            return false;
        }

        if ctx.world.is_dead(self.actor) || ctx.world.is_dead(target) {
            return false;
        }
        let Some(target_position) = ctx.world.position_of(target) else {
            return false;
        };
        if !self.can_engage(body, target_position, ctx.now) {
            return false;
        }
        let Some(limb) = self.gate.first_ready(self.profile.limb_ids(), ctx.now) else {
            return false;
        };
        self.gate.try_trigger(limb, ctx.now);

        let radius = self.profile.archetype.indicator_radius();
        self.indicator = Some(ctx.indicators.place(target_position, radius));
        self.snapshot = Some(TelegraphContext {
            target,
            target_position,
            origin: body,
            started_at: ctx.now,
            limb,
        });
        self.already_hit.clear();
        self.flashing = true;
        self.interrupted = false;
        self.phase_timer = Countdown::new(self.profile.telegraph_duration);
        self.state = BehaviorState::Telegraph;

        debug!(
            "{:?} ({}) telegraphs at {:?} with limb {}",
            self.actor,
            self.profile.archetype.name(),
            target_position,
            limb.0
        );
        true
    }

    /// Advances the sequence by `dt` seconds, moving `body` during the commit.
    pub fn tick(&mut self, dt: f32, body: &mut Vec3, ctx: &mut SequencerContext) {
        match self.state {
            BehaviorState::Idle => {}
            BehaviorState::Telegraph => {
                if ctx.world.is_dead(self.actor) {
                    self.enter_cleanup(ctx.indicators);
                    return;
                }
                if !self.phase_timer.tick(dt) {
                    return;
                }
                let Some(snapshot) = self.snapshot else {
                    self.enter_cleanup(ctx.indicators);
                    return;
                };
                self.motion = Some(self.profile.archetype.begin_commit(&snapshot, *body));
                self.state = BehaviorState::Commit;
            }
            BehaviorState::Commit => {
                if ctx.world.is_dead(self.actor) {
                    self.enter_cleanup(ctx.indicators);
                    return;
                }
                let (Some(snapshot), Some(motion)) = (self.snapshot.as_ref(), self.motion.as_mut())
                else {
                    self.enter_cleanup(ctx.indicators);
                    return;
                };

                let archetype = self.profile.archetype;
                let finished = archetype.step_motion(motion, dt, body);
                let mut strike = Strike {
                    attacker: self.actor,
                    body: *body,
                    snapshot,
                    damage: self.profile.damage,
                    faction: self.profile.target_faction,
                    world: &mut *ctx.world,
                    already_hit: &mut self.already_hit,
                    projectiles: &mut *ctx.projectiles,
                };
                archetype.apply_effect(motion, finished, &mut strike);

                if finished {
                    self.release_indicator(ctx.indicators);
                    self.motion = None;
                    self.flashing = false;
                    self.phase_timer = Countdown::new(self.profile.recovery_duration);
                    self.state = BehaviorState::Recovery;
                }
            }
            BehaviorState::Recovery => {
                if self.phase_timer.tick(dt) {
                    self.completed += 1;
                    self.return_to_idle();
                }
            }
            BehaviorState::Cleanup => self.return_to_idle(),
        }
    }

    /// Cancels the sequence from any state and returns to `Idle` immediately.
    ///
    /// The limb that fired gets its cooldown back. Returns false (a no-op) if there was
    /// nothing to cancel.
    pub fn interrupt(&mut self, indicators: &mut dyn IndicatorService) -> bool {
        if self.state == BehaviorState::Idle && self.indicator.is_none() {
            debug!("{:?}: {}", self.actor, self.idle_interrupt_fault());
            return false;
        }

        debug!("{:?} interrupted during {}", self.actor, self.state.name());
        if let Some(snapshot) = self.snapshot {
            self.gate.clear(snapshot.limb);
        }
        self.release_indicator(indicators);
        self.return_to_idle();
        self.interrupted = true;
        true
    }

    fn idle_interrupt_fault(&self) -> Fault {
        if self.interrupted {
            Fault::DoubleInterrupt
        } else {
            Fault::InvalidTransition {
                request: "interrupt",
                state: BehaviorState::Idle.name(),
            }
        }
    }

    fn enter_cleanup(&mut self, indicators: &mut dyn IndicatorService) {
        self.release_indicator(indicators);
        self.motion = None;
        self.flashing = false;
        self.phase_timer = Countdown::elapsed();
        self.state = BehaviorState::Cleanup;
    }

    fn return_to_idle(&mut self) {
        self.motion = None;
        self.snapshot = None;
        self.already_hit.clear();
        self.flashing = false;
        self.phase_timer = Countdown::elapsed();
        self.state = BehaviorState::Idle;
    }

    /// `take()` makes a second release impossible.
    fn release_indicator(&mut self, indicators: &mut dyn IndicatorService) {
        if let Some(indicator) = self.indicator.take() {
            indicators.release(indicator);
        }
    }
}

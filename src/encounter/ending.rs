//! The one-shot ending sequence played after the final wave.
//!
//! Lock controls → pan to the focal actor → dialogue → terminal cue → pan back → fade.
//! Each step is entered exactly once and there is no way back.

use bevy::prelude::*;

use super::collaborators::{EncounterContext, MissingLog, PanTarget};
use super::config::EndingConfig;
use super::dialogue::DialogueRunner;
use crate::core::Countdown;

/// Current step of the ending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndingStep {
    LockControls,
    PanToFocus,
    Dialogue,
    TerminalCue,
    PanBack,
    FadeOut,
    Done,
}

/// Runs the ending steps against the presentation collaborator.
#[derive(Debug, Clone)]
pub struct EndingSequence {
    config: EndingConfig,
    music: Option<(String, f32)>,
    step: EndingStep,
    timer: Countdown,
    dialogue: DialogueRunner,
    /// (line index, visible characters) last sent to the dialogue box
    shown: Option<(usize, usize)>,
}

impl EndingSequence {
    /// `music` is the ending track and its cross-fade duration, if any.
    pub fn new(config: EndingConfig, music: Option<(String, f32)>) -> Self {
        let dialogue = DialogueRunner::new(config.lines.clone(), config.typing_speed);
        Self {
            config,
            music,
            step: EndingStep::LockControls,
            timer: Countdown::elapsed(),
            dialogue,
            shown: None,
        }
    }

    pub fn step(&self) -> EndingStep {
        self.step
    }

    pub fn dialogue(&self) -> &DialogueRunner {
        &self.dialogue
    }

    pub fn is_done(&self) -> bool {
        self.step == EndingStep::Done
    }

    /// Player pressed advance. Only meaningful while the dialogue is up.
    pub fn advance_dialogue(&mut self) {
        if self.step == EndingStep::Dialogue {
            self.dialogue.advance();
        }
    }

    /// Advances the ending. Returns true on the tick it completes.
    pub fn tick(&mut self, dt: f32, ctx: &mut EncounterContext, missing: &mut MissingLog) -> bool {
        match self.step {
            EndingStep::LockControls => {
                let music = self.music.clone();
                let pan = self.config.pan_duration;
                ctx.present(missing, |p| {
                    p.set_player_control(false);
                    if let Some((track, fade)) = &music {
                        p.crossfade_music(track, *fade);
                    }
                    p.pan_camera(PanTarget::Focus, pan);
                });
                self.enter(EndingStep::PanToFocus, pan);
            }
            EndingStep::PanToFocus => {
                if self.timer.tick(dt) {
                    self.enter(EndingStep::Dialogue, 0.0);
                    self.show_dialogue(ctx, missing);
                }
            }
            EndingStep::Dialogue => {
                self.dialogue.tick(dt);
                if self.dialogue.is_finished() {
                    ctx.present(missing, |p| {
                        p.hide_dialogue();
                        p.play_terminal_cue();
                    });
                    self.enter(EndingStep::TerminalCue, self.config.cue_duration);
                } else {
                    self.show_dialogue(ctx, missing);
                }
            }
            EndingStep::TerminalCue => {
                if self.timer.tick(dt) {
                    let pan = self.config.pan_duration;
                    ctx.present(missing, |p| p.pan_camera(PanTarget::Player, pan));
                    self.enter(EndingStep::PanBack, pan);
                }
            }
            EndingStep::PanBack => {
                if self.timer.tick(dt) {
                    let fade = self.config.fade_duration;
                    ctx.present(missing, |p| p.fade_out(fade));
                    self.enter(EndingStep::FadeOut, fade);
                }
            }
            EndingStep::FadeOut => {
                if self.timer.tick(dt) {
                    self.enter(EndingStep::Done, 0.0);
                    return true;
                }
            }
            EndingStep::Done => {}
        }
        false
    }

    fn enter(&mut self, step: EndingStep, duration: f32) {
        debug!("Ending step {:?}", step);
        self.step = step;
        self.timer = Countdown::new(duration);
    }

    /// Pushes the dialogue box text when it changed since the last push.
    fn show_dialogue(&mut self, ctx: &mut EncounterContext, missing: &mut MissingLog) {
        if self.dialogue.is_finished() {
            return;
        }
        let current = (self.dialogue.line_index(), self.dialogue.visible_chars());
        if self.shown == Some(current) {
            return;
        }
        self.shown = Some(current);

        let text = self.dialogue.visible_text();
        let speaker = &self.config.speaker;
        ctx.present(missing, |p| p.show_dialogue(speaker, &text));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encounter::channel::EventChannel;
    use crate::encounter::cues::{CueBuffer, StageCue};

    fn silent_ending() -> EndingSequence {
        EndingSequence::new(
            EndingConfig {
                speaker: "Warden".to_string(),
                lines: Vec::new(),
                typing_speed: 30.0,
                pan_duration: 0.2,
                cue_duration: 0.2,
                fade_duration: 0.2,
                terminal_cue: None,
                ..EndingConfig::default()
            },
            None,
        )
    }

    #[test]
    fn test_steps_run_in_order_and_complete_once() {
        let mut ending = silent_ending();
        let mut cues = CueBuffer::default();
        let mut channel = EventChannel::default();
        let mut missing = MissingLog::default();

        let mut steps = vec![ending.step()];
        let mut completions = 0;
        for _ in 0..40 {
            let mut ctx = EncounterContext::bare(&mut channel);
            ctx.presentation = Some(&mut cues);
            if ending.tick(0.1, &mut ctx, &mut missing) {
                completions += 1;
            }
            if steps.last() != Some(&ending.step()) {
                steps.push(ending.step());
            }
        }

        assert_eq!(completions, 1);
        assert_eq!(
            steps,
            vec![
                EndingStep::LockControls,
                EndingStep::PanToFocus,
                EndingStep::Dialogue,
                EndingStep::TerminalCue,
                EndingStep::PanBack,
                EndingStep::FadeOut,
                EndingStep::Done,
            ]
        );
        assert_eq!(
            cues.cues,
            vec![
                StageCue::PlayerControl(false),
                StageCue::Pan {
                    target: PanTarget::Focus,
                    duration: 0.2
                },
                StageCue::HideDialogue,
                StageCue::TerminalCue,
                StageCue::Pan {
                    target: PanTarget::Player,
                    duration: 0.2
                },
                StageCue::FadeOut { duration: 0.2 },
            ]
        );
        assert_eq!(missing.reported(), 0);
    }

    #[test]
    fn test_advance_outside_dialogue_is_ignored() {
        let mut ending = EndingSequence::new(
            EndingConfig {
                lines: vec!["One".to_string()],
                ..silent_ending().config
            },
            None,
        );
        ending.advance_dialogue();
        assert_eq!(ending.dialogue().state(), crate::encounter::DialogueState::Typing);
    }
}

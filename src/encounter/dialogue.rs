//! Click-advanced typed dialogue.

/// Where the dialogue stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogueState {
    /// Revealing the current line at the typing speed
    Typing,
    /// Advance pressed mid-line; the rest of the line is revealed on the next tick
    CompletingLine,
    /// Whole line visible, waiting for the player
    AwaitingAdvance,
    Finished,
}

/// Types lines out one by one; the player advances with a click.
#[derive(Debug, Clone)]
pub struct DialogueRunner {
    lines: Vec<String>,
    index: usize,
    revealed: f32,
    chars_per_second: f32,
    state: DialogueState,
}

impl DialogueRunner {
    pub fn new(lines: Vec<String>, chars_per_second: f32) -> Self {
        let state = if lines.is_empty() {
            DialogueState::Finished
        } else {
            DialogueState::Typing
        };
        Self {
            lines,
            index: 0,
            revealed: 0.0,
            chars_per_second: chars_per_second.max(1.0),
            state,
        }
    }

    pub fn state(&self) -> DialogueState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state == DialogueState::Finished
    }

    /// Zero-based index of the line on screen.
    pub fn line_index(&self) -> usize {
        self.index
    }

    /// The part of the current line revealed so far.
    pub fn visible_text(&self) -> String {
        self.lines
            .get(self.index)
            .map(|line| line.chars().take(self.visible_chars()).collect())
            .unwrap_or_default()
    }

    pub fn visible_chars(&self) -> usize {
        self.revealed.floor() as usize
    }

    fn line_len(&self) -> usize {
        self.lines
            .get(self.index)
            .map_or(0, |line| line.chars().count())
    }

    /// Reveals more of the line. Returns true if the visible text changed.
    pub fn tick(&mut self, dt: f32) -> bool {
        let before = self.visible_chars();
        let len = self.line_len() as f32;

        match self.state {
            DialogueState::Typing => {
                self.revealed = (self.revealed + self.chars_per_second * dt).min(len);
                if self.revealed >= len {
                    self.state = DialogueState::AwaitingAdvance;
                }
            }
            DialogueState::CompletingLine => {
                self.revealed = len;
                self.state = DialogueState::AwaitingAdvance;
            }
            DialogueState::AwaitingAdvance | DialogueState::Finished => {}
        }

        self.visible_chars() != before
    }

    /// Player pressed advance.
    pub fn advance(&mut self) {
        match self.state {
            DialogueState::Typing => self.state = DialogueState::CompletingLine,
            DialogueState::AwaitingAdvance => {
                self.index += 1;
                self.revealed = 0.0;
                self.state = if self.index < self.lines.len() {
                    DialogueState::Typing
                } else {
                    DialogueState::Finished
                };
            }
            DialogueState::CompletingLine | DialogueState::Finished => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runner() -> DialogueRunner {
        DialogueRunner::new(vec!["Hello".to_string(), "Bye".to_string()], 10.0)
    }

    #[test]
    fn test_line_types_out_then_waits() {
        let mut dialogue = runner();
        assert!(dialogue.tick(0.2));
        assert_eq!(dialogue.visible_text(), "He");
        assert_eq!(dialogue.state(), DialogueState::Typing);

        dialogue.tick(0.35);
        assert_eq!(dialogue.visible_text(), "Hello");
        assert_eq!(dialogue.state(), DialogueState::AwaitingAdvance);
        assert!(!dialogue.tick(1.0));
    }

    #[test]
    fn test_advance_mid_line_completes_it_first() {
        let mut dialogue = runner();
        dialogue.tick(0.1);
        dialogue.advance();
        assert_eq!(dialogue.state(), DialogueState::CompletingLine);

        // A second click while completing is swallowed
        dialogue.advance();
        assert_eq!(dialogue.line_index(), 0);

        assert!(dialogue.tick(0.0));
        assert_eq!(dialogue.visible_text(), "Hello");
        assert_eq!(dialogue.state(), DialogueState::AwaitingAdvance);
    }

    #[test]
    fn test_advance_walks_through_every_line() {
        let mut dialogue = runner();
        dialogue.tick(1.0);
        dialogue.advance();
        assert_eq!(dialogue.line_index(), 1);
        assert_eq!(dialogue.visible_text(), "");

        dialogue.tick(1.0);
        assert_eq!(dialogue.visible_text(), "Bye");
        dialogue.advance();
        assert!(dialogue.is_finished());
        assert_eq!(dialogue.visible_text(), "");
    }

    #[test]
    fn test_no_lines_is_already_finished() {
        let dialogue = DialogueRunner::new(Vec::new(), 30.0);
        assert!(dialogue.is_finished());
    }
}

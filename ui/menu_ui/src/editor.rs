//! Keyboard editing of the custom game mode.

use {
    bevy::prelude::*,
    game_mode_assets::{CustomModeField, GameMode, InvalidInput},
    loop_catalog::LoopBehaviour,
};

/// Row of the custom mode editor that has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorRow {
    LoopBehaviour,
    Field(CustomModeField),
    ShowScore,
}

impl EditorRow {
    pub const ALL: [EditorRow; 6] = [
        EditorRow::LoopBehaviour,
        EditorRow::Field(CustomModeField::GameTime),
        EditorRow::Field(CustomModeField::MaxRoundTime),
        EditorRow::Field(CustomModeField::MinRoundTime),
        EditorRow::Field(CustomModeField::ZoomDelay),
        EditorRow::ShowScore,
    ];

    pub fn label(self) -> &'static str {
        match self {
            EditorRow::LoopBehaviour => "Loop",
            EditorRow::Field(field) => field.label(),
            EditorRow::ShowScore => "Show score",
        }
    }
}

#[derive(Resource, Debug, Default, Clone)]
pub struct CustomEditor {
    pub row: usize,
    /// Text typed into the focused numeric field, not yet applied.
    pub buffer: String,
    pub error: Option<String>,
}

impl CustomEditor {
    pub fn focused(&self) -> EditorRow {
        EditorRow::ALL[self.row % EditorRow::ALL.len()]
    }

    pub fn focus_next(&mut self) {
        self.row = (self.row + 1) % EditorRow::ALL.len();
        self.buffer.clear();
    }

    pub fn focus_previous(&mut self) {
        self.row = (self.row + EditorRow::ALL.len() - 1) % EditorRow::ALL.len();
        self.buffer.clear();
    }

    /// Appends characters that can be part of a number.
    pub fn type_text(&mut self, text: &str) {
        if !matches!(self.focused(), EditorRow::Field(_)) {
            return;
        }
        self.buffer.extend(
            text.chars()
                .filter(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | '-' | ' ')),
        );
    }

    pub fn backspace(&mut self) {
        self.buffer.pop();
    }

    pub fn is_typing(&self) -> bool {
        !self.buffer.is_empty()
    }

    /// Applies the typed text to the focused field. The buffer is cleared
    /// either way; on error the previous value stays.
    pub fn commit(&mut self, mode: &mut GameMode) -> Result<f32, InvalidInput> {
        let EditorRow::Field(field) = self.focused() else {
            self.buffer.clear();
            return Err(InvalidInput::Empty);
        };
        let input = std::mem::take(&mut self.buffer);
        let result = field.apply(mode, &input);
        self.error = result.as_ref().err().map(ToString::to_string);
        result
    }

    /// Steps the focused choice row: loop behaviour through the selectable
    /// ones, show score on and off.
    pub fn cycle(&mut self, mode: &mut GameMode, forward: bool) {
        match self.focused() {
            EditorRow::LoopBehaviour => {
                let options: Vec<LoopBehaviour> = LoopBehaviour::selectable().collect();
                let current = options
                    .iter()
                    .position(|behaviour| *behaviour == mode.loop_behaviour)
                    .unwrap_or(0);
                let next = if forward {
                    (current + 1) % options.len()
                } else {
                    (current + options.len() - 1) % options.len()
                };
                mode.loop_behaviour = options[next];
            }
            EditorRow::ShowScore => mode.show_score = !mode.show_score,
            EditorRow::Field(_) => {}
        }
    }

    pub fn row_value(&self, row: EditorRow, mode: &GameMode) -> String {
        match row {
            EditorRow::LoopBehaviour => mode.loop_behaviour.label().to_string(),
            EditorRow::ShowScore => String::from(if mode.show_score { "Yes" } else { "No" }),
            EditorRow::Field(_) if row == self.focused() && self.is_typing() => {
                format!("{}_", self.buffer)
            }
            EditorRow::Field(field) => field.format(mode),
        }
    }
}

//! Validation for values typed into the custom mode editor.

use {crate::GameMode, thiserror::Error};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidInput {
    #[error("input is empty")]
    Empty,
    #[error("`{0}` is not a number")]
    NotANumber(String),
}

/// Trims the input and drops every space inside it.
pub fn clean_input(input: &str) -> String {
    input.trim().chars().filter(|c| !c.is_whitespace()).collect()
}

/// Parses a decimal number, accepting `,` as the decimal separator.
pub fn parse_float_value(input: &str) -> Result<f32, InvalidInput> {
    let cleaned = clean_input(input).replace(',', ".");
    if cleaned.is_empty() {
        return Err(InvalidInput::Empty);
    }
    match cleaned.parse::<f32>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(InvalidInput::NotANumber(input.to_string())),
    }
}

/// Whole part of the parsed number, rounded towards negative infinity.
pub fn parse_int_value(input: &str) -> Result<i32, InvalidInput> {
    parse_float_value(input).map(|value| value.floor() as i32)
}

/// Editable numeric field of the custom game mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CustomModeField {
    GameTime,
    MaxRoundTime,
    MinRoundTime,
    ZoomDelay,
}

impl CustomModeField {
    pub const ALL: [CustomModeField; 4] = [
        CustomModeField::GameTime,
        CustomModeField::MaxRoundTime,
        CustomModeField::MinRoundTime,
        CustomModeField::ZoomDelay,
    ];

    pub fn label(self) -> &'static str {
        match self {
            CustomModeField::GameTime => "Game time",
            CustomModeField::MaxRoundTime => "Max round time",
            CustomModeField::MinRoundTime => "Min round time",
            CustomModeField::ZoomDelay => "Zoom delay",
        }
    }

    pub fn value(self, mode: &GameMode) -> f32 {
        match self {
            CustomModeField::GameTime => mode.game_time,
            CustomModeField::MaxRoundTime => mode.max_round_time,
            CustomModeField::MinRoundTime => mode.min_round_time,
            CustomModeField::ZoomDelay => mode.zoom_delay,
        }
    }

    /// Writes the parsed and clamped input into `mode` and returns the stored
    /// value. On error `mode` is left untouched.
    pub fn apply(self, mode: &mut GameMode, input: &str) -> Result<f32, InvalidInput> {
        let value = match self {
            CustomModeField::GameTime => parse_int_value(input)?.clamp(0, 300) as f32,
            CustomModeField::MaxRoundTime | CustomModeField::MinRoundTime => {
                parse_int_value(input)?.clamp(0, 10) as f32
            }
            CustomModeField::ZoomDelay => parse_float_value(input)?.clamp(0.1, 10.0),
        };

        match self {
            CustomModeField::GameTime => mode.game_time = value,
            CustomModeField::MaxRoundTime => mode.max_round_time = value,
            CustomModeField::MinRoundTime => mode.min_round_time = value,
            CustomModeField::ZoomDelay => mode.zoom_delay = value,
        }
        Ok(value)
    }

    /// Text shown in the editor for the current value.
    pub fn format(self, mode: &GameMode) -> String {
        match self {
            CustomModeField::ZoomDelay => format!("{:.1}", mode.zoom_delay),
            other => format!("{}", other.value(mode) as i32),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_input_strips_all_spaces() {
        assert_eq!(clean_input("  1 2 0 "), "120");
        assert_eq!(clean_input("\t0,5\n"), "0,5");
    }

    #[test]
    fn comma_is_a_decimal_separator() {
        assert_eq!(parse_float_value("0,75"), Ok(0.75));
        assert_eq!(parse_float_value("2.5"), Ok(2.5));
        assert_eq!(parse_int_value("7,9"), Ok(7));
        assert_eq!(parse_int_value("-0.5"), Ok(-1));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_float_value("   "), Err(InvalidInput::Empty));
        assert!(matches!(
            parse_float_value("abc"),
            Err(InvalidInput::NotANumber(_))
        ));
        assert!(parse_float_value("inf").is_err());
    }

    #[test]
    fn apply_clamps_each_field() {
        let mut mode = GameMode::default();

        assert_eq!(CustomModeField::GameTime.apply(&mut mode, "999"), Ok(300.0));
        assert_eq!(mode.game_time, 300.0);

        assert_eq!(CustomModeField::MaxRoundTime.apply(&mut mode, "12,4"), Ok(10.0));
        assert_eq!(CustomModeField::MinRoundTime.apply(&mut mode, "-3"), Ok(0.0));
        assert_eq!(CustomModeField::ZoomDelay.apply(&mut mode, "0,01"), Ok(0.1));
        assert_eq!(CustomModeField::ZoomDelay.apply(&mut mode, "2,25"), Ok(2.25));
    }

    #[test]
    fn invalid_input_keeps_previous_value() {
        let mut mode = GameMode::default();
        assert!(CustomModeField::GameTime.apply(&mut mode, "soon").is_err());
        assert_eq!(mode.game_time, 60.0);
        assert_eq!(CustomModeField::GameTime.format(&mode), "60");
        assert_eq!(CustomModeField::ZoomDelay.format(&mode), "0.5");
    }
}

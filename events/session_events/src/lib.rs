use {bevy::prelude::*, game_mode_assets::GameMode};

/// Start a new game with the given mode.
#[derive(Event, Debug, Clone)]
pub struct StartGame {
    pub mode: GameMode,
}

/// The game clock ran out.
#[derive(Event, Debug, Clone, Copy)]
pub struct GameOver {
    pub wins: u32,
    pub losses: u32,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct TogglePause;

#[derive(Event, Debug, Clone, Copy)]
pub struct PauseChanged {
    pub paused: bool,
}

/// Tear down the current scene and go back to an idle session.
#[derive(Event, Debug, Clone, Copy)]
pub struct RestartGame;

// --- UI signals ---

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ScoreChanged {
    pub wins: u32,
    pub losses: u32,
}

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct TimerChanged {
    pub seconds_left: f32,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShowTimer(pub bool);

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShowScore(pub bool);

// --- Audio ---

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum MusicCommand {
    /// Start the track late enough that it ends together with the game.
    PlayShortened { game_time: f32 },
    Stop,
    TogglePause,
}

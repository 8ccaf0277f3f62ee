use bevy::prelude::*;

#[derive(States, Default, Debug, Clone, PartialEq, Eq, Hash)]
pub enum GameState {
    #[default]
    Loading,
    MainMenu,
    Running,
}

/// Which overlay the in-game menu shows while `Running`.
#[derive(States, Default, Debug, Clone, PartialEq, Eq, Hash)]
pub enum MenuOverlay {
    #[default]
    Hidden,
    Paused,
    GameOver,
}

use {
    bevy::prelude::*,
    bevy_common_assets::ron::RonAssetPlugin,
    loop_catalog::LoopBehaviour,
    serde::{Deserialize, Serialize},
};

pub mod custom;

pub use custom::{CustomModeField, InvalidInput};

/// Name of the mode whose values the player may edit from the menu.
pub const CUSTOM_MODE_NAME: &str = "Custom";

pub struct GameModeAssetsPlugin;

impl Plugin for GameModeAssetsPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(RonAssetPlugin::<GameModeCatalog>::new(&["modes.ron"]))
            .init_resource::<GameModes>()
            .register_type::<GameMode>()
            .register_type::<GameModes>();
    }
}

// --- Asset Definition ---

/// Tuning for one way of playing the loop.
#[derive(Reflect, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[reflect(Default)]
#[serde(default)]
pub struct GameMode {
    pub name: String,
    pub loop_behaviour: LoopBehaviour,
    /// Session length in seconds. `0` plays untimed.
    pub game_time: f32,
    pub max_round_time: f32,
    pub min_round_time: f32,
    pub show_score: bool,
    /// Duration of the zoom transition between nested scenes.
    pub zoom_delay: f32,
}

impl Default for GameMode {
    fn default() -> Self {
        Self {
            name: CUSTOM_MODE_NAME.to_string(),
            loop_behaviour: LoopBehaviour::None,
            game_time: 60.0,
            max_round_time: 5.0,
            min_round_time: 1.0,
            show_score: true,
            zoom_delay: 0.5,
        }
    }
}

impl GameMode {
    pub fn is_custom(&self) -> bool {
        self.name == CUSTOM_MODE_NAME
    }

    /// Copy of this mode with values a session can run with: round times are
    /// non-negative with `min <= max`, and the zoom always takes some time.
    pub fn sanitized(&self) -> Self {
        let max_round_time = self.max_round_time.max(0.0);
        Self {
            game_time: self.game_time.max(0.0),
            max_round_time,
            min_round_time: self.min_round_time.clamp(0.0, max_round_time),
            zoom_delay: if self.zoom_delay <= 0.0 {
                1.0
            } else {
                self.zoom_delay
            },
            ..self.clone()
        }
    }
}

#[derive(Asset, TypePath, Debug, Clone, Deserialize)]
pub struct GameModeCatalog {
    pub modes: Vec<GameMode>,
}

// --- Resources ---

/// Loaded game modes and the one currently picked in the menu.
#[derive(Resource, Reflect, Debug, Clone)]
#[reflect(Resource)]
pub struct GameModes {
    pub modes: Vec<GameMode>,
    pub selected: usize,
}

impl Default for GameModes {
    fn default() -> Self {
        Self {
            modes: vec![GameMode::default()],
            selected: 0,
        }
    }
}

impl GameModes {
    pub fn from_catalog(catalog: &GameModeCatalog) -> Self {
        if catalog.modes.is_empty() {
            warn!("game mode catalog is empty, falling back to the default custom mode");
            return Self::default();
        }
        Self {
            modes: catalog.modes.clone(),
            selected: 0,
        }
    }

    pub fn current(&self) -> &GameMode {
        &self.modes[self.selected]
    }

    pub fn current_mut(&mut self) -> &mut GameMode {
        &mut self.modes[self.selected]
    }

    pub fn has_previous(&self) -> bool {
        self.selected > 0
    }

    pub fn has_next(&self) -> bool {
        self.selected + 1 < self.modes.len()
    }

    /// Moves the selection one step left. Stops at the first mode.
    pub fn select_previous(&mut self) -> bool {
        if !self.has_previous() {
            return false;
        }
        self.selected -= 1;
        true
    }

    /// Moves the selection one step right. Stops at the last mode.
    pub fn select_next(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.selected += 1;
        true
    }
}

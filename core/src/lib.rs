use {
    audio::MusicPlugin,
    bevy::prelude::*,
    game_mode_assets::GameModeAssetsPlugin,
    house_set::HouseSetPlugin,
    hud::HudPlugin,
    interaction::{InteractionPlugin, PickingBridgePlugin},
    loading::LoadingManagerPlugin,
    loop_catalog::LoopCatalogPlugin,
    menu_ui::MenuUiPlugin,
    session::SessionPlugin,
    states::{GameState, MenuOverlay},
    system_schedule::{LoopSchedule, LoopSchedulePlugin},
};

mod systems;

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .init_state::<MenuOverlay>()
            .add_plugins((
                LoopSchedulePlugin,
                LoopCatalogPlugin,
                GameModeAssetsPlugin,
                LoadingManagerPlugin,
            ))
            .add_plugins((InteractionPlugin, PickingBridgePlugin, HouseSetPlugin, SessionPlugin))
            .add_plugins((MusicPlugin, HudPlugin, MenuUiPlugin))
            .add_observer(systems::dress_house_set)
            .add_observer(systems::dress_switch)
            .add_observer(systems::dress_key)
            .add_systems(Startup, setup_camera)
            .add_systems(
                Update,
                systems::tint_highlights.in_set(LoopSchedule::Presentation),
            );
    }
}

fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

use {
    bevy::{asset::LoadState, prelude::*},
    game_mode_assets::{GameModeCatalog, GameModes},
    states::GameState,
};

pub const GAME_MODES_PATH: &str = "modes/default.modes.ron";

pub struct LoadingManagerPlugin;

impl Plugin for LoadingManagerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LoadingManager>()
            .add_systems(Startup, start_loading)
            .add_systems(
                Update,
                check_assets_loaded.run_if(in_state(GameState::Loading)),
            )
            .add_systems(OnEnter(GameState::Loading), setup_loading_ui)
            .add_systems(OnExit(GameState::Loading), cleanup_loading_ui);
    }
}

// --- Resources ---

#[derive(Resource, Default)]
pub struct LoadingManager {
    pub game_modes: Handle<GameModeCatalog>,
}

#[derive(Component)]
struct LoadingUi;

fn start_loading(mut assets: ResMut<LoadingManager>, asset_server: Res<AssetServer>) {
    info!(path = GAME_MODES_PATH, "started loading game modes");
    assets.game_modes = asset_server.load(GAME_MODES_PATH);
}

fn check_assets_loaded(
    mut next_state: ResMut<NextState<GameState>>,
    loading_manager: Res<LoadingManager>,
    asset_server: Res<AssetServer>,
    catalogs: Res<Assets<GameModeCatalog>>,
    mut commands: Commands,
) {
    let modes = match asset_server.load_state(&loading_manager.game_modes) {
        LoadState::Loaded => {
            let Some(catalog) = catalogs.get(&loading_manager.game_modes) else {
                return;
            };
            info!(modes = catalog.modes.len(), "game modes loaded");
            GameModes::from_catalog(catalog)
        }
        LoadState::Failed(error) => {
            warn!(%error, "could not load game modes, only the custom mode is available");
            GameModes::default()
        }
        LoadState::NotLoaded | LoadState::Loading => return,
    };

    commands.insert_resource(modes);
    next_state.set(GameState::MainMenu);
}

fn setup_loading_ui(mut commands: Commands) {
    commands.spawn((
        Text::new("Loading..."),
        TextFont {
            font_size: 40.0,
            ..default()
        },
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(20.0),
            right: Val::Px(20.0),
            ..default()
        },
        LoadingUi,
    ));
}

fn cleanup_loading_ui(mut commands: Commands, query: Query<Entity, With<LoadingUi>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn();
    }
}

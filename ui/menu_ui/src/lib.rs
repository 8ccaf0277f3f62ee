//! Main menu, pause and game over overlays.
//!
//! Keyboard driven: arrows pick a mode, Enter plays, Esc pauses, M goes back
//! to the main menu, R replays and Q quits.

use {
    bevy::{
        input::{
            ButtonState,
            keyboard::{Key, KeyboardInput},
        },
        prelude::*,
    },
    editor::{CustomEditor, EditorRow},
    game_mode_assets::GameModes,
    session_events::{GameOver, PauseChanged, RestartGame, StartGame, TogglePause},
    states::{GameState, MenuOverlay},
};

pub mod editor;

pub struct MenuUiPlugin;

impl Plugin for MenuUiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CustomEditor>()
            .add_observer(on_pause_changed)
            .add_observer(on_game_over)
            .add_systems(OnEnter(GameState::MainMenu), spawn_main_menu)
            .add_systems(OnExit(GameState::MainMenu), despawn_ui::<MainMenuUi>)
            .add_systems(
                Update,
                (
                    (
                        handle_mode_selection,
                        handle_custom_editor,
                        refresh_main_menu,
                        start_from_main_menu,
                    )
                        .chain(),
                    quit_on_q,
                )
                    .run_if(in_state(GameState::MainMenu)),
            )
            .add_systems(
                Update,
                (pause_on_escape, handle_overlay_keys).run_if(in_state(GameState::Running)),
            )
            .add_systems(OnEnter(MenuOverlay::Paused), spawn_pause_overlay)
            .add_systems(OnExit(MenuOverlay::Paused), despawn_ui::<OverlayUi>)
            .add_systems(OnExit(MenuOverlay::GameOver), despawn_ui::<OverlayUi>);
    }
}

#[derive(Component)]
struct MainMenuUi;

#[derive(Component)]
struct MainMenuText;

#[derive(Component)]
struct OverlayUi;

const TITLE: &str = "HOUSE LOOP";
const OVERLAY_COLOR: Color = Color::srgba(0.0, 0.0, 0.0, 0.75);

fn menu_root() -> Node {
    Node {
        width: Val::Percent(100.0),
        height: Val::Percent(100.0),
        flex_direction: FlexDirection::Column,
        justify_content: JustifyContent::Center,
        align_items: AlignItems::Center,
        row_gap: Val::Px(16.0),
        ..default()
    }
}

fn menu_text(text: impl Into<String>, font_size: f32) -> (Text, TextFont, TextColor) {
    (
        Text::new(text),
        TextFont {
            font_size,
            ..default()
        },
        TextColor(Color::WHITE),
    )
}

fn spawn_main_menu(mut commands: Commands, modes: Res<GameModes>, editor: Res<CustomEditor>) {
    info!("spawning main menu");
    commands
        .spawn((MainMenuUi, Name::new("MainMenu"), menu_root()))
        .with_children(|root| {
            root.spawn(menu_text(TITLE, 56.0));
            root.spawn((MainMenuText, menu_text(describe_modes(&modes, &editor), 22.0)));
            root.spawn(menu_text("Enter: play    Q: quit", 18.0));
        });
}

fn describe_modes(modes: &GameModes, editor: &CustomEditor) -> String {
    let mode = modes.current();
    let left = if modes.has_previous() { "<" } else { " " };
    let right = if modes.has_next() { ">" } else { " " };
    let mut lines = vec![format!("{left}  {}  {right}", mode.name), String::new()];

    if mode.is_custom() {
        for row in EditorRow::ALL {
            let cursor = if row == editor.focused() { ">" } else { " " };
            lines.push(format!(
                "{cursor} {}: {}",
                row.label(),
                editor.row_value(row, mode)
            ));
        }
        if let Some(error) = &editor.error {
            lines.push(format!("invalid value: {error}"));
        }
        lines.push("Up/Down: field    Tab: change    type + Enter: set".into());
    } else {
        lines.push(format!("Loop: {}", mode.loop_behaviour.label()));
        if mode.game_time > 0.0 {
            lines.push(format!("Game time: {}s", mode.game_time));
        } else {
            lines.push("Game time: untimed".into());
        }
        lines.push(format!(
            "Round time: {}s to {}s",
            mode.max_round_time, mode.min_round_time
        ));
    }
    lines.join("\n")
}

fn handle_mode_selection(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut modes: ResMut<GameModes>,
    mut editor: ResMut<CustomEditor>,
) {
    let moved = if keyboard.just_pressed(KeyCode::ArrowLeft) {
        modes.select_previous()
    } else if keyboard.just_pressed(KeyCode::ArrowRight) {
        modes.select_next()
    } else {
        false
    };

    if moved {
        *editor = CustomEditor::default();
        debug!(mode = %modes.current().name, "mode selected");
    }
}

fn handle_custom_editor(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut typed: MessageReader<KeyboardInput>,
    mut modes: ResMut<GameModes>,
    mut editor: ResMut<CustomEditor>,
) {
    if !modes.current().is_custom() {
        typed.clear();
        return;
    }

    if keyboard.just_pressed(KeyCode::ArrowDown) {
        editor.focus_next();
    } else if keyboard.just_pressed(KeyCode::ArrowUp) {
        editor.focus_previous();
    } else if keyboard.just_pressed(KeyCode::Tab) {
        let forward = !keyboard.pressed(KeyCode::ShiftLeft);
        editor.cycle(modes.current_mut(), forward);
    } else if keyboard.just_pressed(KeyCode::Backspace) {
        editor.backspace();
    } else if keyboard.just_pressed(KeyCode::Enter) && editor.is_typing() {
        match editor.commit(modes.current_mut()) {
            Ok(value) => debug!(field = editor.focused().label(), value, "custom mode updated"),
            Err(error) => debug!(%error, "custom mode input rejected"),
        }
    }

    for input in typed.read() {
        if input.state != ButtonState::Pressed {
            continue;
        }
        if let Key::Character(text) = &input.logical_key {
            editor.type_text(text.as_str());
        }
    }
}

fn refresh_main_menu(
    modes: Res<GameModes>,
    editor: Res<CustomEditor>,
    mut texts: Query<&mut Text, With<MainMenuText>>,
) {
    if !modes.is_changed() && !editor.is_changed() {
        return;
    }
    if let Ok(mut text) = texts.single_mut() {
        text.0 = describe_modes(&modes, &editor);
    }
}

fn start_from_main_menu(
    keyboard: Res<ButtonInput<KeyCode>>,
    modes: Res<GameModes>,
    editor: Res<CustomEditor>,
    mut next_state: ResMut<NextState<GameState>>,
    mut commands: Commands,
) {
    // Enter commits a typed value first
    if !keyboard.just_pressed(KeyCode::Enter) || editor.is_typing() || editor.is_changed() {
        return;
    }
    let mode = modes.current().clone();
    info!(mode = %mode.name, "starting game from main menu");
    next_state.set(GameState::Running);
    commands.trigger(StartGame { mode });
}

fn quit_on_q(keyboard: Res<ButtonInput<KeyCode>>, mut exit: MessageWriter<AppExit>) {
    if keyboard.just_pressed(KeyCode::KeyQ) {
        info!("quit requested");
        exit.write(AppExit::Success);
    }
}

fn pause_on_escape(
    keyboard: Res<ButtonInput<KeyCode>>,
    overlay: Res<State<MenuOverlay>>,
    mut commands: Commands,
) {
    if keyboard.just_pressed(KeyCode::Escape) && *overlay.get() != MenuOverlay::GameOver {
        commands.trigger(TogglePause);
    }
}

fn handle_overlay_keys(
    keyboard: Res<ButtonInput<KeyCode>>,
    overlay: Res<State<MenuOverlay>>,
    modes: Res<GameModes>,
    mut next_state: ResMut<NextState<GameState>>,
    mut next_overlay: ResMut<NextState<MenuOverlay>>,
    mut exit: MessageWriter<AppExit>,
    mut commands: Commands,
) {
    if *overlay.get() == MenuOverlay::Hidden {
        return;
    }

    if keyboard.just_pressed(KeyCode::KeyM) {
        info!("back to main menu");
        commands.trigger(RestartGame);
        next_overlay.set(MenuOverlay::Hidden);
        next_state.set(GameState::MainMenu);
    } else if keyboard.just_pressed(KeyCode::KeyR) && *overlay.get() == MenuOverlay::GameOver {
        info!("replaying current mode");
        commands.trigger(RestartGame);
        commands.trigger(StartGame {
            mode: modes.current().clone(),
        });
        next_overlay.set(MenuOverlay::Hidden);
    } else if keyboard.just_pressed(KeyCode::KeyQ) {
        exit.write(AppExit::Success);
    }
}

fn on_pause_changed(trigger: On<PauseChanged>, mut next_overlay: ResMut<NextState<MenuOverlay>>) {
    next_overlay.set(if trigger.event().paused {
        MenuOverlay::Paused
    } else {
        MenuOverlay::Hidden
    });
}

fn spawn_pause_overlay(mut commands: Commands) {
    commands
        .spawn((
            OverlayUi,
            Name::new("PauseOverlay"),
            menu_root(),
            BackgroundColor(OVERLAY_COLOR),
        ))
        .with_children(|root| {
            root.spawn(menu_text("PAUSED", 48.0));
            root.spawn(menu_text("Esc: resume    M: main menu    Q: quit", 20.0));
        });
}

fn on_game_over(
    trigger: On<GameOver>,
    mut next_overlay: ResMut<NextState<MenuOverlay>>,
    mut commands: Commands,
) {
    let GameOver { wins, losses } = *trigger.event();
    next_overlay.set(MenuOverlay::GameOver);
    commands
        .spawn((
            OverlayUi,
            Name::new("GameOverOverlay"),
            menu_root(),
            BackgroundColor(OVERLAY_COLOR),
        ))
        .with_children(|root| {
            root.spawn(menu_text("GAME OVER", 48.0));
            root.spawn(menu_text(format!("Wins: {wins}    Losses: {losses}"), 26.0));
            root.spawn(menu_text("R: play again    M: main menu    Q: quit", 20.0));
        });
}

fn despawn_ui<T: Component>(mut commands: Commands, query: Query<Entity, With<T>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn();
    }
}

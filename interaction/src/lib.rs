use {
    bevy::{picking::pointer::PointerButton, prelude::*},
    interaction_components::{Interactable, InteractionComponentsPlugin},
    interaction_events::{LeftClickDown, LeftClickUp, PointerAction, PointerSignal},
    session_resources::GameSession,
    system_schedule::LoopSchedule,
};

pub struct InteractionPlugin;

impl Plugin for InteractionPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(InteractionComponentsPlugin)
            .add_observer(handle_pointer_signal)
            .add_systems(Update, update_highlights.in_set(LoopSchedule::Input));
    }
}

/// Forwards picking events on interactables as [`PointerSignal`]s.
///
/// Kept apart from [`InteractionPlugin`] so headless apps can drive the
/// signals directly.
pub struct PickingBridgePlugin;

impl Plugin for PickingBridgePlugin {
    fn build(&self, app: &mut App) {
        app.add_observer(bridge_pointer_over)
            .add_observer(bridge_pointer_out)
            .add_observer(bridge_pointer_press)
            .add_observer(bridge_pointer_release);
    }
}

fn handle_pointer_signal(
    trigger: On<PointerSignal>,
    mut interactables: Query<&mut Interactable>,
    session: Res<GameSession>,
    mut commands: Commands,
) {
    let signal = trigger.event();
    let Ok(mut interactable) = interactables.get_mut(signal.entity) else {
        trace!(entity = ?signal.entity, "pointer signal on a non-interactable entity");
        return;
    };

    match signal.action {
        PointerAction::Enter => interactable.pointer_over = true,
        PointerAction::Exit => interactable.pointer_over = false,
        PointerAction::Down(PointerButton::Primary) => {
            if interactable.key_pressed {
                return;
            }
            interactable.key_pressed = true;
            if interactable.is_interaction_possible(&session) {
                commands.trigger(LeftClickDown {
                    entity: signal.entity,
                });
            }
        }
        PointerAction::Up(PointerButton::Primary) => {
            interactable.key_pressed = false;
            if interactable.is_interaction_possible(&session) {
                debug!(entity = ?signal.entity, "left click");
                commands.trigger(LeftClickUp {
                    entity: signal.entity,
                });
            } else {
                trace!(entity = ?signal.entity, "left click ignored, interaction prevented");
            }
        }
        PointerAction::Down(_) | PointerAction::Up(_) => {}
    }
}

/// Recomputes every highlight from the pointer and prevention flags.
pub fn update_highlights(mut interactables: Query<&mut Interactable>, session: Res<GameSession>) {
    for mut interactable in interactables.iter_mut() {
        let highlighted = interactable.wants_highlight(&session);
        // skip unchanged values so change detection stays quiet
        if interactable.highlighted != highlighted {
            interactable.highlighted = highlighted;
        }
    }
}

fn bridge_pointer_over(
    mut trigger: On<Pointer<Over>>,
    interactables: Query<(), With<Interactable>>,
    mut commands: Commands,
) {
    if signal_if_interactable(trigger.entity, PointerAction::Enter, &interactables, &mut commands) {
        trigger.propagate(false);
    }
}

fn bridge_pointer_out(
    mut trigger: On<Pointer<Out>>,
    interactables: Query<(), With<Interactable>>,
    mut commands: Commands,
) {
    if signal_if_interactable(trigger.entity, PointerAction::Exit, &interactables, &mut commands) {
        trigger.propagate(false);
    }
}

fn bridge_pointer_press(
    mut trigger: On<Pointer<Press>>,
    interactables: Query<(), With<Interactable>>,
    mut commands: Commands,
) {
    let action = PointerAction::Down(trigger.event().button);
    if signal_if_interactable(trigger.entity, action, &interactables, &mut commands) {
        trigger.propagate(false);
    }
}

fn bridge_pointer_release(
    mut trigger: On<Pointer<Release>>,
    interactables: Query<(), With<Interactable>>,
    mut commands: Commands,
) {
    let action = PointerAction::Up(trigger.event().button);
    if signal_if_interactable(trigger.entity, action, &interactables, &mut commands) {
        trigger.propagate(false);
    }
}

// True when `entity` took the event. It then stops bubbling to its ancestors.
fn signal_if_interactable(
    entity: Entity,
    action: PointerAction,
    interactables: &Query<(), With<Interactable>>,
    commands: &mut Commands,
) -> bool {
    if !interactables.contains(entity) {
        return false;
    }
    commands.trigger(PointerSignal { entity, action });
    true
}

#[cfg(test)]
mod tests {
    use {super::*, interaction_components::InteractionScope};

    #[derive(Resource, Default)]
    struct Clicks {
        down: u32,
        up: u32,
    }

    fn setup() -> (App, Entity) {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_plugins(InteractionPlugin)
            .init_resource::<Clicks>()
            .insert_resource(GameSession {
                interactions_globally_prevented: false,
                is_game_started: true,
                ..default()
            })
            .add_observer(|_: On<LeftClickDown>, mut clicks: ResMut<Clicks>| clicks.down += 1)
            .add_observer(|_: On<LeftClickUp>, mut clicks: ResMut<Clicks>| clicks.up += 1);

        let entity = app
            .world_mut()
            .spawn(Interactable {
                locally_prevented: false,
                ..default()
            })
            .id();
        (app, entity)
    }

    fn signal(app: &mut App, entity: Entity, action: PointerAction) {
        app.world_mut().trigger(PointerSignal { entity, action });
        app.world_mut().flush();
    }

    #[test]
    fn click_fires_down_and_up_once() {
        let (mut app, entity) = setup();

        signal(&mut app, entity, PointerAction::Down(PointerButton::Primary));
        // held button does not repeat
        signal(&mut app, entity, PointerAction::Down(PointerButton::Primary));
        signal(&mut app, entity, PointerAction::Up(PointerButton::Primary));

        let clicks = app.world().resource::<Clicks>();
        assert_eq!((clicks.down, clicks.up), (1, 1));
        assert!(!app.world().get::<Interactable>(entity).unwrap().key_pressed);
    }

    #[test]
    fn secondary_and_middle_buttons_are_ignored() {
        let (mut app, entity) = setup();

        signal(&mut app, entity, PointerAction::Down(PointerButton::Secondary));
        signal(&mut app, entity, PointerAction::Up(PointerButton::Middle));

        let clicks = app.world().resource::<Clicks>();
        assert_eq!((clicks.down, clicks.up), (0, 0));
    }

    #[test]
    fn prevented_entity_releases_key_without_click() {
        let (mut app, entity) = setup();

        signal(&mut app, entity, PointerAction::Down(PointerButton::Primary));
        app.world_mut()
            .resource_mut::<GameSession>()
            .interactions_globally_prevented = true;
        signal(&mut app, entity, PointerAction::Up(PointerButton::Primary));

        let clicks = app.world().resource::<Clicks>();
        assert_eq!((clicks.down, clicks.up), (1, 0));
        assert!(!app.world().get::<Interactable>(entity).unwrap().key_pressed);
    }

    #[test]
    fn highlight_follows_pointer_and_prevention() {
        let (mut app, entity) = setup();

        signal(&mut app, entity, PointerAction::Enter);
        app.update();
        assert!(app.world().get::<Interactable>(entity).unwrap().highlighted);

        app.world_mut()
            .resource_scope(|world, mut session: Mut<GameSession>| {
                let mut interactable = world.get_mut::<Interactable>(entity).unwrap();
                interaction_components::prevent_interaction(
                    &mut interactable,
                    true,
                    InteractionScope::Local,
                    &mut session,
                );
            });
        assert!(!app.world().get::<Interactable>(entity).unwrap().highlighted);

        signal(&mut app, entity, PointerAction::Exit);
        app.update();
        assert!(!app.world().get::<Interactable>(entity).unwrap().highlighted);
    }
}

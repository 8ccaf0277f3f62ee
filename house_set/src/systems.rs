use {
    bevy::prelude::*,
    house_set_components::{HouseSet, Zooming},
    interaction_components::Interactable,
    loop_catalog::LoopBehaviour,
    loop_events::{ResolveBehaviour, RoundEnd, ZoomFinished},
    session_resources::GameSession,
};

/// Only houses the player is meant to click show a highlight.
pub(crate) fn gate_house_set_highlights(mut house_sets: Query<(&HouseSet, &mut Interactable)>) {
    for (house_set, mut interactable) in house_sets.iter_mut() {
        if house_set.loop_behaviour != LoopBehaviour::Click && interactable.highlighted {
            interactable.highlighted = false;
        }
    }
}

pub(crate) fn tick_round_timers(
    time: Res<Time>,
    session: Res<GameSession>,
    mut house_sets: Query<(Entity, &mut HouseSet)>,
    mut commands: Commands,
) {
    if !session.is_running() {
        return;
    }

    let max_round_time = session.max_round_time();
    for (entity, mut house_set) in house_sets.iter_mut() {
        if !house_set.is_round_started {
            continue;
        }

        house_set.round_time = (house_set.round_time - time.delta_secs())
            .min(max_round_time)
            .max(0.0);

        if house_set.round_time <= 0.0 {
            debug!(?entity, round = session.round, "round timed out");
            commands.trigger(RoundEnd {
                entity,
                success: false,
            });
        }
    }
}

/// Grows the parent until the zooming node fills its place, then swaps the
/// node in as the scene root.
pub(crate) fn advance_zoom(
    time: Res<Time>,
    session: Res<GameSession>,
    mut zooming: Query<(Entity, &mut Zooming, &mut HouseSet, &mut Transform)>,
    mut parents: Query<&mut Transform, Without<Zooming>>,
    mut commands: Commands,
) {
    if session.is_paused {
        return;
    }

    for (node, mut zoom, mut house_set, mut transform) in zooming.iter_mut() {
        let Ok(mut parent_transform) = parents.get_mut(zoom.parent) else {
            warn!(?node, parent = ?zoom.parent, "zoom parent is gone, dropping the zoom");
            commands.entity(node).remove::<Zooming>();
            continue;
        };

        if !zoom.is_finished() {
            parent_transform.scale = zoom.current_scale();
            zoom.elapsed += time.delta_secs();
            continue;
        }

        parent_transform.scale = zoom.target_scale;

        commands.entity(node).remove::<(Zooming, ChildOf)>();
        commands.entity(zoom.parent).despawn();
        house_set.parent = None;
        *transform = Transform::default();

        info!(?node, depth = house_set.depth, "zoom finished");
        commands.trigger(ZoomFinished { entity: node });
        commands.trigger(ResolveBehaviour { entity: node });
    }
}

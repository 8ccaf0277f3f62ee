use {
    crate::{AUTO_ROUND_TIME, HouseSetError, pick_slot, spawn_child_house_set},
    bevy::prelude::*,
    house_set_components::{HouseSet, HouseSetLayout, HouseSetState, Key, Switch, Zooming},
    interaction_components::{Interactable, InteractionScope, prevent_interaction},
    interaction_events::LeftClickUp,
    loop_catalog::{LoopBehaviour, LoopRng},
    loop_events::{CreateKey, GameStarted, ResolveBehaviour, RoundEnd, RoundStarted, ZoomIn},
    session_events::ScoreChanged,
    session_resources::GameSession,
};

/// A scene root creates its first child as soon as it exists.
pub(crate) fn attach_house_set(
    trigger: On<Add, HouseSet>,
    mut house_sets: Query<&mut HouseSet>,
    session: Res<GameSession>,
    layout: Res<HouseSetLayout>,
    mut rng: ResMut<LoopRng>,
    mut commands: Commands,
) {
    let node = trigger.entity;
    let Ok(mut house_set) = house_sets.get_mut(node) else {
        return;
    };
    if house_set.loop_behaviour != LoopBehaviour::Start || house_set.child.is_some() {
        return;
    }

    let behaviour = house_set.child_loop_behaviour;
    spawn_child_house_set(
        &mut commands,
        node,
        &mut house_set,
        behaviour,
        session.round,
        &layout,
        &mut rng,
    );
    debug!(?node, "scene root attached");
}

pub(crate) fn start_waiting_rounds(
    _trigger: On<GameStarted>,
    house_sets: Query<(Entity, &HouseSet)>,
    mut commands: Commands,
) {
    for (entity, _) in house_sets
        .iter()
        .filter(|(_, house_set)| house_set.state(false) == HouseSetState::AwaitingStart)
    {
        commands.trigger(ResolveBehaviour { entity });
    }
}

/// Settles which behaviour the child plays and starts the round owned by the
/// target node.
pub(crate) fn resolve_behaviour(
    trigger: On<ResolveBehaviour>,
    mut house_sets: Query<&mut HouseSet>,
    mut interactables: Query<&mut Interactable>,
    mut session: ResMut<GameSession>,
    mut rng: ResMut<LoopRng>,
    layout: Res<HouseSetLayout>,
    mut commands: Commands,
) -> Result {
    let node = trigger.event().entity;
    if !session.is_game_started {
        debug!(?node, "no game running, round not started");
        return Ok(());
    }

    let Ok(house_set) = house_sets.get(node) else {
        debug!(?node, "behaviour resolution for a despawned house set");
        return Ok(());
    };
    if house_set.is_round_started {
        debug!(?node, "round already running");
        return Ok(());
    }
    let Some(child) = house_set.child else {
        info!(?node, "house set is terminal");
        return Ok(());
    };

    let [mut owner, mut nested] = house_sets
        .get_many_mut([node, child])
        .map_err(|_| HouseSetError::DanglingChild { node, child })?;

    let configured = session.loop_behaviour();
    if owner.child_loop_behaviour != configured {
        debug!(?node, from = ?owner.child_loop_behaviour, to = ?configured, "child behaviour follows the session");
        owner.child_loop_behaviour = configured;
    }

    let resolved = match configured {
        LoopBehaviour::Random if nested.loop_behaviour.is_concrete() => nested.loop_behaviour,
        other => rng.resolve(other),
    };
    nested.loop_behaviour = resolved;
    nested.child_loop_behaviour = configured;

    if !resolved.is_concrete() {
        info!(?node, ?resolved, "nothing left to nest, house set is terminal");
        return Ok(());
    }

    owner.forced_round_time = if resolved == LoopBehaviour::Auto {
        AUTO_ROUND_TIME
    } else if configured == LoopBehaviour::Random {
        rng.range(session.min_round_time(), session.max_round_time())
    } else {
        0.0
    };
    owner.round_time = session.round_time(owner.forced_round_time);

    if resolved == LoopBehaviour::SwitchKey && owner.switch.is_none() {
        let slot = pick_slot(&layout.switch_slots, &mut rng);
        let switch = commands
            .spawn((
                Name::new("Switch"),
                Switch { house_set: node },
                Interactable {
                    locally_prevented: false,
                    ..default()
                },
                Transform::from_translation(slot.extend(2.0)),
                ChildOf(node),
            ))
            .id();
        owner.switch = Some(switch);
    }

    session.round += 1;
    owner.is_round_started = true;
    let round_time = owner.round_time;

    if let Ok(mut interactable) = interactables.get_mut(node) {
        prevent_interaction(&mut interactable, false, InteractionScope::Both, &mut session);
    }
    if let Ok(mut interactable) = interactables.get_mut(child) {
        prevent_interaction(&mut interactable, false, InteractionScope::Local, &mut session);
    }

    info!(round = session.round, ?node, child_behaviour = ?resolved, round_time, "round started");
    commands.trigger(RoundStarted {
        entity: node,
        round: session.round,
        round_time,
        child_behaviour: resolved,
    });
    Ok(())
}

pub(crate) fn end_round(
    trigger: On<RoundEnd>,
    mut house_sets: Query<&mut HouseSet>,
    mut interactables: Query<&mut Interactable>,
    mut session: ResMut<GameSession>,
    mut commands: Commands,
) -> Result {
    let RoundEnd { entity, success } = *trigger.event();
    let Ok(mut owner) = house_sets.get_mut(entity) else {
        debug!(?entity, "round end for a despawned house set");
        return Ok(());
    };
    if !owner.is_round_started {
        // rapid clicks or a timeout racing a click
        debug!(?entity, success, "round already ended");
        return Ok(());
    }
    owner.is_round_started = false;
    let child = owner.child.ok_or(HouseSetError::MissingChild(entity))?;

    if let Ok(mut interactable) = interactables.get_mut(entity) {
        prevent_interaction(&mut interactable, true, InteractionScope::Both, &mut session);
    }

    let child_behaviour = house_sets
        .get(child)
        .map_err(|_| HouseSetError::DanglingChild {
            node: entity,
            child,
        })?
        .loop_behaviour;

    if child_behaviour.is_scored() {
        session.record_round(success);
        commands.trigger(ScoreChanged {
            wins: session.wins,
            losses: session.losses,
        });
    }

    info!(round = session.round, success, ?child_behaviour, wins = session.wins, losses = session.losses, "round ended");
    commands.trigger(ZoomIn { entity: child });
    Ok(())
}

pub(crate) fn zoom_in(
    trigger: On<ZoomIn>,
    mut house_sets: Query<(&mut HouseSet, &mut Interactable, Has<Zooming>)>,
    transforms: Query<&Transform>,
    session: Res<GameSession>,
    layout: Res<HouseSetLayout>,
    mut rng: ResMut<LoopRng>,
    mut commands: Commands,
) {
    let node = trigger.event().entity;
    let Ok((mut house_set, mut interactable, zooming)) = house_sets.get_mut(node) else {
        debug!(?node, "zoom into a despawned house set");
        return;
    };
    let Some(parent) = house_set.parent else {
        debug!(?node, "scene root cannot zoom any further");
        return;
    };
    if zooming || house_set.child.is_some() {
        debug!(?node, "already zooming");
        return;
    }

    if house_set.loop_behaviour == LoopBehaviour::Click {
        interactable.highlighted = false;
    }
    // the node becomes the next scene root and stops reacting to its own clicks
    house_set.loop_behaviour = LoopBehaviour::None;

    let behaviour = house_set.child_loop_behaviour;
    spawn_child_house_set(
        &mut commands,
        node,
        &mut house_set,
        behaviour,
        session.round,
        &layout,
        &mut rng,
    );

    let initial_scale = transforms
        .get(parent)
        .map(|transform| transform.scale)
        .unwrap_or(Vec3::ONE);
    commands.entity(node).insert(Zooming::new(
        parent,
        initial_scale,
        layout.zoom_target(),
        session.zoom_delay(),
    ));
    debug!(?node, ?parent, duration = session.zoom_delay(), "zoom started");
}

pub(crate) fn create_key(
    trigger: On<CreateKey>,
    mut house_sets: Query<&mut HouseSet>,
    layout: Res<HouseSetLayout>,
    mut rng: ResMut<LoopRng>,
    mut commands: Commands,
) {
    let node = trigger.event().entity;
    let Ok(mut house_set) = house_sets.get_mut(node) else {
        debug!(?node, "key requested for a despawned house set");
        return;
    };
    if house_set.key.is_some() {
        return;
    }

    let slot = pick_slot(&layout.key_slots, &mut rng);
    let key = commands
        .spawn((
            Name::new("Key"),
            Key { house_set: node },
            Interactable {
                locally_prevented: false,
                ..default()
            },
            Transform::from_translation(slot.extend(2.0)),
            ChildOf(node),
        ))
        .id();
    house_set.key = Some(key);
    debug!(?node, ?key, "key revealed");
}

/// A click on a `Click` house ends the round of the house it is nested in.
pub(crate) fn click_house_set(
    trigger: On<LeftClickUp>,
    house_sets: Query<&HouseSet>,
    mut interactables: Query<&mut Interactable>,
    mut session: ResMut<GameSession>,
    mut commands: Commands,
) -> Result {
    let entity = trigger.event().entity;
    let Ok(house_set) = house_sets.get(entity) else {
        return Ok(());
    };
    if house_set.loop_behaviour != LoopBehaviour::Click {
        return Ok(());
    }
    let parent = house_set
        .parent
        .ok_or(HouseSetError::OrphanedClickNode(entity))?;

    if let Ok(mut interactable) = interactables.get_mut(entity) {
        prevent_interaction(&mut interactable, true, InteractionScope::Local, &mut session);
    }
    commands.trigger(RoundEnd {
        entity: parent,
        success: true,
    });
    Ok(())
}

pub(crate) fn click_switch(
    trigger: On<LeftClickUp>,
    switches: Query<&Switch>,
    mut interactables: Query<&mut Interactable>,
    mut session: ResMut<GameSession>,
    mut commands: Commands,
) {
    let entity = trigger.event().entity;
    let Ok(switch) = switches.get(entity) else {
        return;
    };
    if let Ok(mut interactable) = interactables.get_mut(entity) {
        prevent_interaction(&mut interactable, true, InteractionScope::Local, &mut session);
    }
    commands.trigger(CreateKey {
        entity: switch.house_set,
    });
}

pub(crate) fn click_key(
    trigger: On<LeftClickUp>,
    keys: Query<&Key>,
    mut interactables: Query<&mut Interactable>,
    mut session: ResMut<GameSession>,
    mut commands: Commands,
) {
    let entity = trigger.event().entity;
    let Ok(key) = keys.get(entity) else {
        return;
    };
    if let Ok(mut interactable) = interactables.get_mut(entity) {
        prevent_interaction(&mut interactable, true, InteractionScope::Local, &mut session);
    }
    commands.trigger(RoundEnd {
        entity: key.house_set,
        success: true,
    });
}

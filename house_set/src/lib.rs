//! The recursive house loop.
//!
//! A running round is owned by the current scene root. Its child is the house
//! the player acts on; once the round ends the child zooms into the root's
//! place, a grandchild appears inside it and the next round starts there.

use {
    bevy::prelude::*,
    house_set_components::{HouseSet, HouseSetComponentsPlugin, HouseSetLayout},
    interaction::update_highlights,
    loop_catalog::{LoopBehaviour, LoopRng},
    session_resources::GameSession,
    system_schedule::LoopSchedule,
};

mod error;
mod observers;
mod systems;


pub use error::HouseSetError;

/// Length of a round whose child plays itself.
pub const AUTO_ROUND_TIME: f32 = 0.5;

pub struct HouseSetPlugin;

impl Plugin for HouseSetPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(HouseSetComponentsPlugin)
            .init_resource::<LoopRng>()
            .init_resource::<GameSession>()
            .add_observer(observers::attach_house_set)
            .add_observer(observers::start_waiting_rounds)
            .add_observer(observers::resolve_behaviour)
            .add_observer(observers::end_round)
            .add_observer(observers::zoom_in)
            .add_observer(observers::create_key)
            .add_observer(observers::click_house_set)
            .add_observer(observers::click_switch)
            .add_observer(observers::click_key)
            .add_systems(
                Update,
                (
                    systems::gate_house_set_highlights
                        .in_set(LoopSchedule::Input)
                        .after(update_highlights),
                    systems::tick_round_timers.in_set(LoopSchedule::Rounds),
                    systems::advance_zoom.in_set(LoopSchedule::Zoom),
                ),
            );
    }
}

/// Spawns a fresh scene root. Its first child appears as soon as it is
/// attached, the first round waits for the game to start.
pub fn spawn_root_house_set(commands: &mut Commands, child_loop_behaviour: LoopBehaviour) -> Entity {
    commands
        .spawn((
            Name::new("HouseSet-root"),
            HouseSet::root(child_loop_behaviour),
            Transform::default(),
        ))
        .id()
}

/// Spawns the house nested inside `parent` and wires both ends.
///
/// `Random` is drawn right away, the child never keeps it as its own
/// behaviour.
pub(crate) fn spawn_child_house_set(
    commands: &mut Commands,
    parent: Entity,
    house_set: &mut HouseSet,
    behaviour: LoopBehaviour,
    round: u32,
    layout: &HouseSetLayout,
    rng: &mut LoopRng,
) -> Entity {
    let depth = house_set.depth + 1;
    let loop_behaviour = rng.resolve(behaviour);
    let child = commands
        .spawn((
            Name::new(format!("HouseSet-r{round}-{depth}")),
            HouseSet {
                loop_behaviour,
                child_loop_behaviour: house_set.child_loop_behaviour,
                parent: Some(parent),
                depth,
                ..default()
            },
            layout.child_transform(),
            ChildOf(parent),
        ))
        .id();

    trace!(?parent, ?child, ?loop_behaviour, depth, "spawned child house set");
    house_set.child = Some(child);
    child
}

/// Uniformly picked slot, or the node origin when none are configured.
pub(crate) fn pick_slot(slots: &[Vec2], rng: &mut LoopRng) -> Vec2 {
    rng.index(slots.len())
        .map(|index| slots[index])
        .unwrap_or_default()
}

use bevy::{picking::pointer::PointerButton, prelude::*};

/// What the pointer did over an interactable entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerAction {
    Enter,
    Exit,
    Down(PointerButton),
    Up(PointerButton),
}

/// Raw pointer input targeted at an interactable entity.
///
/// Picking events are bridged into this so the gating logic does not care
/// where the input came from.
#[derive(EntityEvent, Debug, Clone, Copy)]
pub struct PointerSignal {
    pub entity: Entity,
    pub action: PointerAction,
}

/// Primary button went down on an entity that currently accepts interaction.
#[derive(EntityEvent, Debug, Clone, Copy)]
pub struct LeftClickDown {
    pub entity: Entity,
}

/// Primary button released on an entity that currently accepts interaction.
#[derive(EntityEvent, Debug, Clone, Copy)]
pub struct LeftClickUp {
    pub entity: Entity,
}

use {bevy::prelude::*, loop_catalog::LoopBehaviour};

/// The session started a game. Every house set waiting for it resolves its
/// behaviour.
#[derive(Event, Debug, Clone, Copy)]
pub struct GameStarted;

/// Resolve the child behaviour of a house set and start its round.
#[derive(EntityEvent, Debug, Clone, Copy)]
pub struct ResolveBehaviour {
    pub entity: Entity,
}

#[derive(EntityEvent, Debug, Clone, Copy)]
pub struct RoundStarted {
    pub entity: Entity,
    pub round: u32,
    pub round_time: f32,
    pub child_behaviour: LoopBehaviour,
}

/// Ends the round owned by `entity`.
#[derive(EntityEvent, Debug, Clone, Copy)]
pub struct RoundEnd {
    pub entity: Entity,
    pub success: bool,
}

/// Zoom into `entity`, making it the next scene root.
#[derive(EntityEvent, Debug, Clone, Copy)]
pub struct ZoomIn {
    pub entity: Entity,
}

/// `entity` finished zooming in and replaced its parent.
#[derive(EntityEvent, Debug, Clone, Copy)]
pub struct ZoomFinished {
    pub entity: Entity,
}

/// Reveal the key of the house set `entity`.
#[derive(EntityEvent, Debug, Clone, Copy)]
pub struct CreateKey {
    pub entity: Entity,
}

use {bevy::prelude::*, interaction_components::Interactable, loop_catalog::LoopBehaviour};

pub struct HouseSetComponentsPlugin;

impl Plugin for HouseSetComponentsPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<HouseSet>()
            .register_type::<Zooming>()
            .register_type::<Switch>()
            .register_type::<Key>()
            .register_type::<HouseSetLayout>()
            .init_resource::<HouseSetLayout>();
    }
}

/// Where a house set is in its life, derived from its fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HouseSetState {
    /// Nothing nested below, nothing left to play.
    Terminal,
    /// Scene root waiting for the game to start.
    AwaitingStart,
    RoundActive,
    ZoomingIn,
    Idle,
}

/// One node of the nested house tree.
///
/// Each node displays its child inside itself. The node whose round is running
/// owns that round; the child is the thing the player acts on. `parent` is a
/// plain handle, the node does not own it. The child is spawned as a
/// hierarchy child, so despawning a node takes its whole subtree with it.
#[derive(Component, Reflect, Debug, Clone, PartialEq)]
#[reflect(Component)]
#[require(Interactable, Transform, Visibility)]
pub struct HouseSet {
    pub loop_behaviour: LoopBehaviour,
    pub child_loop_behaviour: LoopBehaviour,
    pub parent: Option<Entity>,
    pub child: Option<Entity>,
    pub switch: Option<Entity>,
    pub key: Option<Entity>,
    pub round_time: f32,
    pub forced_round_time: f32,
    pub is_round_started: bool,
    /// Nesting level, the scene root is 0.
    pub depth: u32,
}

impl Default for HouseSet {
    fn default() -> Self {
        Self {
            loop_behaviour: LoopBehaviour::None,
            child_loop_behaviour: LoopBehaviour::None,
            parent: None,
            child: None,
            switch: None,
            key: None,
            round_time: 0.0,
            forced_round_time: 0.0,
            is_round_started: false,
            depth: 0,
        }
    }
}

impl HouseSet {
    /// Scene root that spawns its first child as soon as it is attached.
    pub fn root(child_loop_behaviour: LoopBehaviour) -> Self {
        Self {
            loop_behaviour: LoopBehaviour::Start,
            child_loop_behaviour,
            ..default()
        }
    }

    pub fn state(&self, zooming: bool) -> HouseSetState {
        if zooming {
            HouseSetState::ZoomingIn
        } else if self.is_round_started {
            HouseSetState::RoundActive
        } else if self.loop_behaviour == LoopBehaviour::Start {
            HouseSetState::AwaitingStart
        } else if self.loop_behaviour == LoopBehaviour::None && self.child.is_none() {
            HouseSetState::Terminal
        } else {
            HouseSetState::Idle
        }
    }
}

/// Zoom animation of a house set into its parent's place.
///
/// Lives on the node that zooms in; the scale being animated is the parent's.
#[derive(Component, Reflect, Debug, Clone, PartialEq)]
#[reflect(Component)]
pub struct Zooming {
    pub elapsed: f32,
    pub duration: f32,
    pub initial_scale: Vec3,
    pub target_scale: Vec3,
    pub parent: Entity,
}

impl Zooming {
    pub fn new(parent: Entity, initial_scale: Vec3, target_scale: Vec3, duration: f32) -> Self {
        Self {
            elapsed: 0.0,
            duration,
            initial_scale,
            target_scale,
            parent,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    pub fn current_scale(&self) -> Vec3 {
        if self.duration <= 0.0 {
            return self.target_scale;
        }
        self.initial_scale
            .lerp(self.target_scale, (self.elapsed / self.duration).clamp(0.0, 1.0))
    }
}

/// Reveals the key of `house_set` when clicked.
#[derive(Component, Reflect, Debug, Clone, Copy, PartialEq, Eq)]
#[reflect(Component)]
#[require(Interactable, Transform, Visibility)]
pub struct Switch {
    pub house_set: Entity,
}

/// Ends the round of `house_set` successfully when clicked.
#[derive(Component, Reflect, Debug, Clone, Copy, PartialEq, Eq)]
#[reflect(Component)]
#[require(Interactable, Transform, Visibility)]
pub struct Key {
    pub house_set: Entity,
}

/// Geometry shared by every house set node, in the node's local space.
#[derive(Resource, Reflect, Debug, Clone)]
#[reflect(Resource)]
pub struct HouseSetLayout {
    /// Where the nested child sits inside its parent.
    pub child_offset: Vec2,
    pub child_scale: f32,
    pub switch_slots: Vec<Vec2>,
    pub key_slots: Vec<Vec2>,
    /// Scale the parent grows to while its child zooms in.
    pub zoom_target_scale: f32,
    pub root_size: Vec2,
    pub switch_size: Vec2,
    pub key_size: Vec2,
}

impl Default for HouseSetLayout {
    fn default() -> Self {
        Self {
            child_offset: Vec2::ZERO,
            child_scale: 1.0 / 50.0,
            switch_slots: vec![
                Vec2::new(-300.0, -180.0),
                Vec2::new(300.0, -180.0),
                Vec2::new(-300.0, 180.0),
                Vec2::new(300.0, 180.0),
            ],
            key_slots: vec![
                Vec2::new(0.0, -260.0),
                Vec2::new(-420.0, 0.0),
                Vec2::new(420.0, 0.0),
                Vec2::new(0.0, 260.0),
            ],
            zoom_target_scale: 50.0,
            root_size: Vec2::new(1280.0, 720.0),
            switch_size: Vec2::new(40.0, 40.0),
            key_size: Vec2::new(30.0, 50.0),
        }
    }
}

impl HouseSetLayout {
    pub fn child_transform(&self) -> Transform {
        Transform::from_translation(self.child_offset.extend(1.0))
            .with_scale(Vec3::splat(self.child_scale))
    }

    pub fn zoom_target(&self) -> Vec3 {
        Vec3::splat(self.zoom_target_scale)
    }
}

use {bevy::prelude::Entity, thiserror::Error};

/// Broken wiring of the house set tree. These never happen when nodes are
/// spawned through the house set observers, so they are reported as fatal.
#[derive(Debug, Error)]
pub enum HouseSetError {
    #[error("click node {0} has no parent whose round it could end")]
    OrphanedClickNode(Entity),
    #[error("house set {0} ran a round without a child")]
    MissingChild(Entity),
    #[error("house set {node} points at child {child} which does not exist")]
    DanglingChild { node: Entity, child: Entity },
}

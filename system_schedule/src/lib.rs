use bevy::prelude::*;

/// Per-frame ordering of the house loop. Input is resolved before the clocks
/// tick so a click landing on the same frame as a timeout wins the round.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum LoopSchedule {
    Input,
    Clock,
    Rounds,
    Zoom,
    Presentation,
}

pub struct LoopSchedulePlugin;

impl Plugin for LoopSchedulePlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (
                LoopSchedule::Input,
                LoopSchedule::Clock,
                LoopSchedule::Rounds,
                LoopSchedule::Zoom,
                LoopSchedule::Presentation,
            )
                .chain(),
        );
    }
}

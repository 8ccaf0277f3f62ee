use bevy::prelude::*;

#[derive(Component)]
pub struct GameStatsRoot;

#[derive(Component)]
pub struct TimerContainer;

#[derive(Component)]
pub struct TimerText;

#[derive(Component)]
pub struct ScoreContainer;

#[derive(Component)]
pub struct WinsText;

#[derive(Component)]
pub struct LossesText;

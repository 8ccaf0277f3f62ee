use {
    bevy::prelude::*,
    components::{GameStatsRoot, LossesText, ScoreContainer, TimerContainer, TimerText, WinsText},
    session_events::{ScoreChanged, ShowScore, ShowTimer, TimerChanged},
};

pub mod components;

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_game_stats)
            .add_observer(update_timer_text)
            .add_observer(update_score_text)
            .add_observer(show_timer)
            .add_observer(show_score);
    }
}

const STATS_FONT_SIZE: f32 = 28.0;
const WINS_COLOR: Color = Color::srgb(0.4, 0.9, 0.4);
const LOSSES_COLOR: Color = Color::srgb(0.95, 0.35, 0.35);
const PANEL_COLOR: Color = Color::srgba(0.0, 0.0, 0.0, 0.6);

/// `MM:SS`, both parts rounded down.
pub fn format_time(seconds_left: f32) -> String {
    let seconds_left = seconds_left.max(0.0);
    let minutes = (seconds_left / 60.0).floor() as u32;
    let seconds = (seconds_left % 60.0).floor() as u32;
    format!("{minutes:02}:{seconds:02}")
}

fn stat_text(text: impl Into<String>, color: Color) -> (Text, TextFont, TextColor) {
    (
        Text::new(text),
        TextFont {
            font_size: STATS_FONT_SIZE,
            ..default()
        },
        TextColor(color),
    )
}

fn spawn_game_stats(mut commands: Commands) {
    commands
        .spawn((
            GameStatsRoot,
            Name::new("GameStats"),
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(16.0),
                left: Val::Px(16.0),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(8.0),
                padding: UiRect::all(Val::Px(12.0)),
                ..default()
            },
            BackgroundColor(PANEL_COLOR),
        ))
        .with_children(|root| {
            root.spawn((TimerContainer, Node::default(), Visibility::Hidden))
                .with_children(|timer| {
                    timer.spawn((TimerText, stat_text(format_time(0.0), Color::WHITE)));
                });

            root.spawn((
                ScoreContainer,
                Node {
                    column_gap: Val::Px(16.0),
                    ..default()
                },
                Visibility::Hidden,
            ))
            .with_children(|score| {
                score.spawn((WinsText, stat_text("0", WINS_COLOR)));
                score.spawn((LossesText, stat_text("0", LOSSES_COLOR)));
            });
        });
}

fn update_timer_text(trigger: On<TimerChanged>, mut texts: Query<&mut Text, With<TimerText>>) {
    let Ok(mut text) = texts.single_mut() else {
        return;
    };
    let formatted = format_time(trigger.event().seconds_left);
    if text.0 != formatted {
        text.0 = formatted;
    }
}

fn update_score_text(
    trigger: On<ScoreChanged>,
    mut wins: Query<&mut Text, (With<WinsText>, Without<LossesText>)>,
    mut losses: Query<&mut Text, (With<LossesText>, Without<WinsText>)>,
) {
    let score = trigger.event();
    if let Ok(mut text) = wins.single_mut() {
        text.0 = score.wins.to_string();
    }
    if let Ok(mut text) = losses.single_mut() {
        text.0 = score.losses.to_string();
    }
}

fn visibility(show: bool) -> Visibility {
    if show {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    }
}

fn show_timer(trigger: On<ShowTimer>, mut containers: Query<&mut Visibility, With<TimerContainer>>) {
    for mut container in containers.iter_mut() {
        *container = visibility(trigger.event().0);
    }
}

fn show_score(trigger: On<ShowScore>, mut containers: Query<&mut Visibility, With<ScoreContainer>>) {
    for mut container in containers.iter_mut() {
        *container = visibility(trigger.event().0);
    }
}

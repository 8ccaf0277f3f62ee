use {
    bevy::prelude::*,
    house_set::spawn_root_house_set,
    house_set_components::HouseSet,
    loop_events::GameStarted,
    session_events::{
        GameOver, MusicCommand, PauseChanged, RestartGame, ScoreChanged, ShowScore, ShowTimer,
        StartGame, TimerChanged, TogglePause,
    },
    session_resources::{GameSession, SessionResourcesPlugin},
    system_schedule::LoopSchedule,
};


pub struct SessionPlugin;

impl Plugin for SessionPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(SessionResourcesPlugin)
            .add_observer(start_game)
            .add_observer(toggle_pause)
            .add_observer(restart_game)
            .add_systems(Startup, spawn_scene_root)
            .add_systems(Update, tick_game_clock.in_set(LoopSchedule::Clock));
    }
}

fn spawn_scene_root(mut commands: Commands, session: Res<GameSession>) {
    let root = spawn_root_house_set(&mut commands, session.loop_behaviour());
    debug!(?root, "scene root spawned");
}

fn start_game(trigger: On<StartGame>, mut session: ResMut<GameSession>, mut commands: Commands) {
    if session.is_game_started {
        warn!("start requested while a game is running");
        return;
    }

    session.configure(&trigger.event().mode);
    info!(
        mode = %session.mode.name,
        loop_behaviour = ?session.loop_behaviour(),
        game_time = session.game_time_total,
        "game started"
    );

    commands.trigger(TimerChanged {
        seconds_left: session.game_time_left,
    });
    commands.trigger(ShowTimer(session.is_timed()));
    commands.trigger(ScoreChanged {
        wins: session.wins,
        losses: session.losses,
    });
    commands.trigger(ShowScore(session.mode.show_score));
    commands.trigger(MusicCommand::PlayShortened {
        game_time: session.game_time_total,
    });

    session.is_game_started = true;
    commands.trigger(GameStarted);
}

fn tick_game_clock(time: Res<Time>, mut session: ResMut<GameSession>, mut commands: Commands) {
    if !session.is_running() || !session.is_timed() {
        return;
    }

    let ran_out = session.tick_clock(time.delta_secs());
    commands.trigger(TimerChanged {
        seconds_left: session.game_time_left,
    });

    if ran_out {
        end_game(&mut session, &mut commands);
    }
}

fn end_game(session: &mut GameSession, commands: &mut Commands) {
    session.interactions_globally_prevented = true;
    session.is_game_started = false;
    info!(
        wins = session.wins,
        losses = session.losses,
        rounds = session.round,
        "game over"
    );
    commands.trigger(MusicCommand::Stop);
    commands.trigger(GameOver {
        wins: session.wins,
        losses: session.losses,
    });
}

fn toggle_pause(_trigger: On<TogglePause>, mut session: ResMut<GameSession>, mut commands: Commands) {
    if !session.is_game_started {
        debug!("pause ignored, no game running");
        return;
    }

    session.is_paused = !session.is_paused;
    info!(paused = session.is_paused, "pause toggled");
    commands.trigger(MusicCommand::TogglePause);
    commands.trigger(PauseChanged {
        paused: session.is_paused,
    });
}

/// Drops the whole house tree and puts a fresh root in place.
fn restart_game(
    _trigger: On<RestartGame>,
    roots: Query<Entity, (With<HouseSet>, Without<ChildOf>)>,
    mut session: ResMut<GameSession>,
    mut commands: Commands,
) {
    for root in roots.iter() {
        commands.entity(root).despawn();
    }

    if session.is_game_started {
        commands.trigger(MusicCommand::Stop);
    }
    session.reset();
    commands.trigger(ShowTimer(false));
    commands.trigger(ShowScore(false));

    let root = spawn_root_house_set(&mut commands, session.loop_behaviour());
    info!(?root, "scene restarted");
}

use {bevy::prelude::*, game_mode_assets::GameMode, loop_catalog::LoopBehaviour};

pub struct SessionResourcesPlugin;

impl Plugin for SessionResourcesPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GameSession>()
            .register_type::<GameSession>();
    }
}

/// Share of the game time after which rounds are as short as they get.
const RAMP_SHARE: f32 = 0.75;

/// Live state of one play session: its configured mode, the clock and the
/// score.
///
/// Interactions start globally prevented and stay that way until the session
/// is started and the first round lifts them.
#[derive(Resource, Reflect, Debug, Clone)]
#[reflect(Resource)]
pub struct GameSession {
    pub mode: GameMode,
    pub round: u32,
    pub game_time_total: f32,
    pub game_time_left: f32,
    pub wins: u32,
    pub losses: u32,
    pub interactions_globally_prevented: bool,
    pub is_game_started: bool,
    pub is_paused: bool,
}

impl Default for GameSession {
    fn default() -> Self {
        Self {
            mode: GameMode::default(),
            round: 0,
            game_time_total: 0.0,
            game_time_left: 0.0,
            wins: 0,
            losses: 0,
            interactions_globally_prevented: true,
            is_game_started: false,
            is_paused: false,
        }
    }
}

impl GameSession {
    /// Takes over `mode` and rewinds the clock and score for a fresh game.
    pub fn configure(&mut self, mode: &GameMode) {
        self.mode = mode.sanitized();
        self.game_time_total = self.mode.game_time;
        self.game_time_left = self.game_time_total;
        self.round = 0;
        self.wins = 0;
        self.losses = 0;
        self.is_paused = false;
    }

    /// Back to the state before any game was started.
    pub fn reset(&mut self) {
        *self = Self {
            mode: self.mode.clone(),
            ..default()
        };
    }

    pub fn loop_behaviour(&self) -> LoopBehaviour {
        self.mode.loop_behaviour
    }

    pub fn max_round_time(&self) -> f32 {
        self.mode.max_round_time
    }

    pub fn min_round_time(&self) -> f32 {
        self.mode.min_round_time
    }

    pub fn zoom_delay(&self) -> f32 {
        if self.mode.zoom_delay <= 0.0 {
            1.0
        } else {
            self.mode.zoom_delay
        }
    }

    pub fn is_timed(&self) -> bool {
        self.game_time_total > 0.0
    }

    /// Started and not paused: clocks and animations advance.
    pub fn is_running(&self) -> bool {
        self.is_game_started && !self.is_paused
    }

    pub fn elapsed(&self) -> f32 {
        (self.game_time_total - self.game_time_left).max(0.0)
    }

    /// Length of the next round. A positive `forced` time wins; untimed games
    /// use the midpoint; timed games shrink from max towards min over the first
    /// three quarters of the game.
    pub fn round_time(&self, forced: f32) -> f32 {
        if forced > 0.0 {
            return forced;
        }

        let max = self.max_round_time();
        let min = self.min_round_time();
        if !self.is_timed() {
            return (max + min) / 2.0;
        }

        let t = (self.elapsed() / (self.game_time_total * RAMP_SHARE)).clamp(0.0, 1.0);
        max + (min - max) * t
    }

    /// Advances the game clock. Returns `true` on the tick that runs it out.
    pub fn tick_clock(&mut self, delta: f32) -> bool {
        if !self.is_running() || !self.is_timed() || self.game_time_left <= 0.0 {
            return false;
        }
        self.game_time_left = (self.game_time_left - delta).clamp(0.0, self.game_time_total);
        self.game_time_left <= 0.0
    }

    pub fn record_round(&mut self, success: bool) {
        if success {
            self.wins += 1;
        } else {
            self.losses += 1;
        }
    }

    /// Pausing blocks clicks as well as clocks.
    pub fn interaction_allowed(&self) -> bool {
        !self.interactions_globally_prevented && self.is_running()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timed_session() -> GameSession {
        let mut session = GameSession::default();
        session.configure(&GameMode {
            game_time: 60.0,
            max_round_time: 5.0,
            min_round_time: 1.0,
            ..default()
        });
        session.is_game_started = true;
        session
    }

    #[test]
    fn round_time_ramps_down_over_three_quarters() {
        let mut session = timed_session();
        assert_eq!(session.round_time(0.0), 5.0);

        session.game_time_left = 60.0 - 22.5;
        assert!((session.round_time(0.0) - 3.0).abs() < 1e-5);

        session.game_time_left = 60.0 - 45.0;
        assert!((session.round_time(0.0) - 1.0).abs() < 1e-5);

        session.game_time_left = 0.0;
        assert!((session.round_time(0.0) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn forced_round_time_wins() {
        let session = timed_session();
        assert_eq!(session.round_time(0.5), 0.5);
    }

    #[test]
    fn untimed_round_time_is_midpoint() {
        let mut session = GameSession::default();
        session.configure(&GameMode {
            game_time: 0.0,
            max_round_time: 5.0,
            min_round_time: 1.0,
            ..default()
        });
        assert_eq!(session.round_time(0.0), 3.0);
    }

    #[test]
    fn clock_stops_at_zero_and_reports_once() {
        let mut session = timed_session();
        session.game_time_left = 0.3;
        assert!(!session.tick_clock(0.2));
        assert!(session.tick_clock(0.2));
        assert_eq!(session.game_time_left, 0.0);
        assert!(!session.tick_clock(0.2));
    }

    #[test]
    fn paused_clock_does_not_advance() {
        let mut session = timed_session();
        session.is_paused = true;
        assert!(!session.tick_clock(10.0));
        assert_eq!(session.game_time_left, 60.0);
    }

    #[test]
    fn configure_sanitizes_mode_and_resets_score() {
        let mut session = timed_session();
        session.wins = 4;
        session.losses = 2;
        session.round = 9;
        session.configure(&GameMode {
            min_round_time: 9.0,
            max_round_time: 2.0,
            zoom_delay: -1.0,
            ..default()
        });
        assert_eq!(session.min_round_time(), 2.0);
        assert_eq!(session.zoom_delay(), 1.0);
        assert_eq!((session.wins, session.losses, session.round), (0, 0, 0));
    }

    #[test]
    fn reset_keeps_mode_but_blocks_interaction() {
        let mut session = timed_session();
        session.interactions_globally_prevented = false;
        session.reset();
        assert!(session.interactions_globally_prevented);
        assert!(!session.is_game_started);
        assert_eq!(session.max_round_time(), 5.0);
    }
}

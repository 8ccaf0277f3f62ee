//! Background music controller.
//!
//! Keeps the playback model (position, volume, fades) the session drives
//! through [`MusicCommand`]s. Nothing here plays sound: no `AudioPlayer` is
//! spawned, the model only tracks where playback would be.

use {bevy::prelude::*, session_events::MusicCommand, system_schedule::LoopSchedule};

pub struct MusicPlugin;

impl Plugin for MusicPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MusicSettings>()
            .init_resource::<BackgroundMusic>()
            .register_type::<MusicSettings>()
            .register_type::<BackgroundMusic>()
            .add_observer(handle_music_command)
            .add_systems(Update, advance_music.in_set(LoopSchedule::Presentation));
    }
}

#[derive(Resource, Reflect, Debug, Clone)]
#[reflect(Resource)]
pub struct MusicSettings {
    pub enabled: bool,
    /// Length of the background track in seconds.
    pub clip_length: f32,
    /// Extra seconds left on the track after a timed game ends.
    pub buffer: f32,
    pub fade_duration: f32,
}

impl Default for MusicSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            clip_length: 192.0,
            buffer: 4.0,
            fade_duration: 2.0,
        }
    }
}

#[derive(Reflect, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Fade {
    #[default]
    None,
    In,
    Out,
}

#[derive(Resource, Reflect, Debug, Clone, Default, PartialEq)]
#[reflect(Resource)]
pub struct BackgroundMusic {
    pub position: f32,
    pub volume: f32,
    pub playing: bool,
    pub fade: Fade,
}

/// Start offset that lets the track end `buffer` seconds after a game of
/// `game_time` seconds. Untimed games start from the beginning.
pub fn shortened_start(clip_length: f32, game_time: f32, buffer: f32) -> f32 {
    if game_time <= 0.0 {
        return 0.0;
    }
    (clip_length - game_time - buffer).clamp(0.0, clip_length.max(0.0))
}

impl BackgroundMusic {
    pub fn play_shortened(&mut self, settings: &MusicSettings, game_time: f32) {
        self.position = shortened_start(settings.clip_length, game_time, settings.buffer);
        self.playing = true;
        if self.position < settings.clip_length {
            self.volume = 0.0;
            self.fade = Fade::In;
        } else {
            self.volume = 1.0;
            self.fade = Fade::None;
        }
    }

    pub fn stop(&mut self) {
        if self.playing {
            self.fade = Fade::Out;
        }
    }

    pub fn toggle_pause(&mut self) {
        self.playing = !self.playing;
    }

    /// Moves the playhead and the running fade forward by `delta` seconds.
    pub fn advance(&mut self, settings: &MusicSettings, delta: f32) {
        if !self.playing {
            return;
        }

        self.position += delta;
        if self.position >= settings.clip_length {
            self.position = settings.clip_length;
            self.playing = false;
            self.fade = Fade::None;
            return;
        }

        let step = if settings.fade_duration > 0.0 {
            delta / settings.fade_duration
        } else {
            1.0
        };
        match self.fade {
            Fade::None => {}
            Fade::In => {
                self.volume = (self.volume + step).min(1.0);
                if self.volume >= 1.0 {
                    self.fade = Fade::None;
                }
            }
            Fade::Out => {
                self.volume = (self.volume - step).max(0.0);
                if self.volume <= 0.0 {
                    self.fade = Fade::None;
                    self.playing = false;
                }
            }
        }
    }
}

fn handle_music_command(
    trigger: On<MusicCommand>,
    settings: Res<MusicSettings>,
    mut music: ResMut<BackgroundMusic>,
) {
    if !settings.enabled {
        return;
    }

    match *trigger.event() {
        MusicCommand::PlayShortened { game_time } => {
            music.play_shortened(&settings, game_time);
            debug!(start = music.position, game_time, "background music started");
        }
        MusicCommand::Stop => {
            music.stop();
            debug!("background music fading out");
        }
        MusicCommand::TogglePause => {
            music.toggle_pause();
            debug!(playing = music.playing, "background music toggled");
        }
    }
}

fn advance_music(time: Res<Time>, settings: Res<MusicSettings>, mut music: ResMut<BackgroundMusic>) {
    if !music.playing {
        return;
    }
    music.advance(&settings, time.delta_secs());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shortened_start_leaves_buffer_after_game() {
        assert_eq!(shortened_start(192.0, 60.0, 4.0), 128.0);
        assert_eq!(shortened_start(192.0, 0.0, 4.0), 0.0);
        // a game longer than the track plays it from the start
        assert_eq!(shortened_start(100.0, 300.0, 4.0), 0.0);
    }

    #[test]
    fn fade_in_reaches_full_volume() {
        let settings = MusicSettings::default();
        let mut music = BackgroundMusic::default();
        music.play_shortened(&settings, 60.0);
        assert_eq!(music.volume, 0.0);
        assert_eq!(music.fade, Fade::In);

        music.advance(&settings, 1.0);
        assert!((music.volume - 0.5).abs() < 1e-6);
        music.advance(&settings, 1.5);
        assert_eq!(music.volume, 1.0);
        assert_eq!(music.fade, Fade::None);
        assert_eq!(music.position, 130.5);
    }

    #[test]
    fn stop_fades_out_then_stops() {
        let settings = MusicSettings::default();
        let mut music = BackgroundMusic {
            volume: 1.0,
            playing: true,
            ..default()
        };
        music.stop();
        music.advance(&settings, 1.0);
        assert!(music.playing);
        music.advance(&settings, 1.0);
        assert!(!music.playing);
        assert_eq!(music.volume, 0.0);
    }

    #[test]
    fn paused_music_holds_position() {
        let settings = MusicSettings::default();
        let mut music = BackgroundMusic::default();
        music.play_shortened(&settings, 0.0);
        music.toggle_pause();
        music.advance(&settings, 5.0);
        assert_eq!(music.position, 0.0);
        music.toggle_pause();
        music.advance(&settings, 5.0);
        assert_eq!(music.position, 5.0);
    }

    #[test]
    fn disabled_music_ignores_commands() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_plugins(MusicPlugin)
            .insert_resource(MusicSettings {
                enabled: false,
                ..default()
            });

        app.world_mut()
            .trigger(MusicCommand::PlayShortened { game_time: 60.0 });
        app.world_mut().flush();

        assert_eq!(
            *app.world().resource::<BackgroundMusic>(),
            BackgroundMusic::default()
        );
    }
}

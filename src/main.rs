use {
    bevy::{log::LogPlugin, prelude::*},
    core::CorePlugin,
};

fn main() {
    App::new()
        .add_plugins(
            DefaultPlugins
                .set(LogPlugin {
                    filter: "error,loading=trace,\
                        house_set=debug,\
                        session=debug,\
                        interaction=info,\
                        audio=debug,\
                        menu_ui=debug"
                        .into(),
                    level: bevy::log::Level::TRACE,
                    ..Default::default()
                })
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "House Loop".into(),
                        ..default()
                    }),
                    ..default()
                }),
        )
        .add_plugins(CorePlugin)
        .run();
}

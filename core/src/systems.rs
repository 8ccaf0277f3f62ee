use {
    bevy::{picking::prelude::Pickable, prelude::*},
    house_set_components::{HouseSet, HouseSetLayout, Key, Switch},
    interaction_components::Interactable,
};

/// Colour a sprite shows when not highlighted.
#[derive(Component, Debug, Clone, Copy)]
pub struct BaseColor(pub Color);

const HOUSE_COLORS: [Color; 4] = [
    Color::srgb(0.55, 0.35, 0.25),
    Color::srgb(0.3, 0.45, 0.6),
    Color::srgb(0.45, 0.55, 0.3),
    Color::srgb(0.6, 0.5, 0.35),
];
const SWITCH_COLOR: Color = Color::srgb(0.85, 0.2, 0.2);
const KEY_COLOR: Color = Color::srgb(0.95, 0.8, 0.2);
const HIGHLIGHT_MIX: f32 = 0.35;

fn dress(commands: &mut Commands, entity: Entity, color: Color, size: Vec2) {
    commands.entity(entity).insert((
        Sprite::from_color(color, size),
        BaseColor(color),
        Pickable::default(),
    ));
}

pub fn dress_house_set(
    trigger: On<Add, HouseSet>,
    house_sets: Query<&HouseSet>,
    layout: Res<HouseSetLayout>,
    mut commands: Commands,
) {
    let Ok(house_set) = house_sets.get(trigger.entity) else {
        return;
    };
    let color = HOUSE_COLORS[house_set.depth as usize % HOUSE_COLORS.len()];
    dress(&mut commands, trigger.entity, color, layout.root_size);
}

pub fn dress_switch(trigger: On<Add, Switch>, layout: Res<HouseSetLayout>, mut commands: Commands) {
    dress(&mut commands, trigger.entity, SWITCH_COLOR, layout.switch_size);
}

pub fn dress_key(trigger: On<Add, Key>, layout: Res<HouseSetLayout>, mut commands: Commands) {
    dress(&mut commands, trigger.entity, KEY_COLOR, layout.key_size);
}

pub fn tint_highlights(
    mut sprites: Query<(&Interactable, &BaseColor, &mut Sprite), Changed<Interactable>>,
) {
    for (interactable, base, mut sprite) in sprites.iter_mut() {
        sprite.color = if interactable.highlighted {
            base.0.mix(&Color::WHITE, HIGHLIGHT_MIX)
        } else {
            base.0
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn highlight_lightens_and_restores_colour() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_systems(Update, tint_highlights);

        let base = Color::srgb(0.2, 0.2, 0.2);
        let entity = app
            .world_mut()
            .spawn((
                Interactable::default(),
                BaseColor(base),
                Sprite::from_color(base, Vec2::ONE),
            ))
            .id();
        app.update();

        app.world_mut()
            .get_mut::<Interactable>(entity)
            .unwrap()
            .highlighted = true;
        app.update();
        let lit = app.world().get::<Sprite>(entity).unwrap().color;
        assert_ne!(lit, base);

        app.world_mut()
            .get_mut::<Interactable>(entity)
            .unwrap()
            .highlighted = false;
        app.update();
        assert_eq!(app.world().get::<Sprite>(entity).unwrap().color, base);
    }
}

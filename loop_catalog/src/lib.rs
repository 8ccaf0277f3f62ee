//! Loop behaviours a house set node can take, and the weighted catalog used to
//! resolve `Random` into a concrete behaviour.

use {
    bevy::prelude::*,
    rand::{Rng, SeedableRng, rngs::StdRng},
    serde::{Deserialize, Serialize},
};

pub struct LoopCatalogPlugin;

impl Plugin for LoopCatalogPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<LoopBehaviour>().init_resource::<LoopRng>();
    }
}

/// How a house set node advances to the next nested scene.
///
/// `Random` is only ever a configuration value: it is resolved through the
/// [`LoopCatalog`] whenever a node is assigned a behaviour, so no live node
/// keeps it as its own behaviour.
#[derive(Reflect, Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[reflect(Default)]
pub enum LoopBehaviour {
    /// Terminal node, nothing nested below it.
    #[default]
    None,
    /// Scene root: spawns its child on attach and waits for the game to start.
    Start,
    /// The round times out on its own after a short forced duration.
    Auto,
    /// The player clicks the nested house set.
    Click,
    /// The player clicks a switch, which reveals a key to click.
    SwitchKey,
    /// Drawn from the catalog on assignment.
    Random,
}

impl LoopBehaviour {
    pub const ALL: [LoopBehaviour; 6] = [
        LoopBehaviour::None,
        LoopBehaviour::Start,
        LoopBehaviour::Auto,
        LoopBehaviour::Click,
        LoopBehaviour::SwitchKey,
        LoopBehaviour::Random,
    ];

    /// Catalog weight used when drawing a `Random` behaviour.
    pub const fn weight(self) -> f32 {
        match self {
            LoopBehaviour::Auto => 0.1,
            LoopBehaviour::Click | LoopBehaviour::SwitchKey => 0.2,
            LoopBehaviour::None | LoopBehaviour::Start | LoopBehaviour::Random => 0.0,
        }
    }

    /// Behaviours a node can actually play a round with.
    pub fn is_concrete(self) -> bool {
        matches!(
            self,
            LoopBehaviour::Auto | LoopBehaviour::Click | LoopBehaviour::SwitchKey
        )
    }

    /// Rounds driven by player input count towards wins and losses.
    pub fn is_scored(self) -> bool {
        matches!(self, LoopBehaviour::Click | LoopBehaviour::SwitchKey)
    }

    /// Behaviours a game mode may be configured with.
    pub fn selectable() -> impl Iterator<Item = LoopBehaviour> {
        Self::ALL
            .into_iter()
            .filter(|behaviour| !matches!(behaviour, LoopBehaviour::None | LoopBehaviour::Start))
    }

    pub fn label(self) -> &'static str {
        match self {
            LoopBehaviour::None => "None",
            LoopBehaviour::Start => "Start",
            LoopBehaviour::Auto => "Auto",
            LoopBehaviour::Click => "Click",
            LoopBehaviour::SwitchKey => "SwitchKey",
            LoopBehaviour::Random => "Random",
        }
    }
}

const STANDARD_WEIGHTS: [(LoopBehaviour, f32); 3] = [
    (LoopBehaviour::Auto, LoopBehaviour::Auto.weight()),
    (LoopBehaviour::Click, LoopBehaviour::Click.weight()),
    (LoopBehaviour::SwitchKey, LoopBehaviour::SwitchKey.weight()),
];

/// Cumulative weight table over the concrete behaviours.
#[derive(Debug, Clone, Copy)]
pub struct LoopCatalog<'a> {
    entries: &'a [(LoopBehaviour, f32)],
}

impl LoopCatalog<'static> {
    pub const STANDARD: LoopCatalog<'static> = LoopCatalog {
        entries: &STANDARD_WEIGHTS,
    };
}

impl<'a> LoopCatalog<'a> {
    pub fn new(entries: &'a [(LoopBehaviour, f32)]) -> Self {
        Self { entries }
    }

    pub fn total_weight(&self) -> f32 {
        self.entries
            .iter()
            .filter(|(behaviour, weight)| behaviour.is_concrete() && *weight > 0.0)
            .map(|(_, weight)| weight)
            .sum()
    }

    /// Draws from `[0, total)` and returns the first behaviour whose cumulative
    /// weight reaches the draw.
    pub fn draw<R: Rng>(&self, rng: &mut R) -> LoopBehaviour {
        let total = self.total_weight();
        if total <= 0.0 {
            return LoopBehaviour::Auto;
        }

        let roll = rng.random_range(0.0..total);
        let mut cumulative = 0.0;
        for &(behaviour, weight) in self.entries {
            // zero weights would match a zero roll
            if !behaviour.is_concrete() || weight <= 0.0 {
                continue;
            }
            cumulative += weight;
            if cumulative >= roll {
                return behaviour;
            }
        }

        LoopBehaviour::Auto
    }
}

/// Random source shared by everything that draws behaviours, slots or round
/// times. Seed it for reproducible runs.
#[derive(Resource, Debug, Clone)]
pub struct LoopRng(StdRng);

impl Default for LoopRng {
    fn default() -> Self {
        Self(StdRng::from_os_rng())
    }
}

impl LoopRng {
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }

    pub fn random_behaviour(&mut self) -> LoopBehaviour {
        LoopCatalog::STANDARD.draw(&mut self.0)
    }

    /// `Random` is drawn from the catalog, everything else passes through.
    pub fn resolve(&mut self, behaviour: LoopBehaviour) -> LoopBehaviour {
        match behaviour {
            LoopBehaviour::Random => self.random_behaviour(),
            other => other,
        }
    }

    /// Uniform value in `[min, max]`. Returns `min` when the range is empty.
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        if max <= min {
            return min;
        }
        self.0.random_range(min..=max)
    }

    /// Uniform index into a collection of `len` items.
    pub fn index(&mut self, len: usize) -> Option<usize> {
        (len > 0).then(|| self.0.random_range(0..len))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_weights_sum_to_one_half() {
        assert!((LoopCatalog::STANDARD.total_weight() - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn only_concrete_behaviours_carry_weight() {
        for behaviour in LoopBehaviour::ALL {
            assert_eq!(behaviour.weight() > 0.0, behaviour.is_concrete(), "{behaviour:?}");
        }
        assert_eq!(STANDARD_WEIGHTS[0], (LoopBehaviour::Auto, 0.1));
    }

    #[test]
    fn random_resolves_to_concrete_behaviour() {
        let mut rng = LoopRng::seeded(7);
        for _ in 0..10_000 {
            let behaviour = rng.resolve(LoopBehaviour::Random);
            assert!(
                behaviour.is_concrete(),
                "resolved to non-concrete behaviour {behaviour:?}"
            );
        }
    }

    #[test]
    fn concrete_behaviours_pass_through_resolve() {
        let mut rng = LoopRng::seeded(1);
        for behaviour in [
            LoopBehaviour::None,
            LoopBehaviour::Start,
            LoopBehaviour::Auto,
            LoopBehaviour::Click,
            LoopBehaviour::SwitchKey,
        ] {
            assert_eq!(rng.resolve(behaviour), behaviour);
        }
    }

    #[test]
    fn weighted_frequencies_match_catalog() {
        let mut rng = StdRng::seed_from_u64(2024);
        let draws = 100_000;
        let (mut auto, mut click, mut switch_key) = (0u32, 0u32, 0u32);

        for _ in 0..draws {
            match LoopCatalog::STANDARD.draw(&mut rng) {
                LoopBehaviour::Auto => auto += 1,
                LoopBehaviour::Click => click += 1,
                LoopBehaviour::SwitchKey => switch_key += 1,
                other => panic!("catalog produced {other:?}"),
            }
        }

        let share = |count: u32| count as f64 / draws as f64;
        assert!((share(auto) - 0.2).abs() < 0.02, "auto {}", share(auto));
        assert!((share(click) - 0.4).abs() < 0.02, "click {}", share(click));
        assert!(
            (share(switch_key) - 0.4).abs() < 0.02,
            "switch key {}",
            share(switch_key)
        );
    }

    #[test]
    fn empty_catalog_falls_back_to_auto() {
        let catalog = LoopCatalog::new(&[(LoopBehaviour::Random, 1.0), (LoopBehaviour::Click, 0.0)]);
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(catalog.draw(&mut rng), LoopBehaviour::Auto);
    }

    #[test]
    fn seeded_draws_are_reproducible() {
        let mut first = LoopRng::seeded(99);
        let mut second = LoopRng::seeded(99);
        let a: Vec<_> = (0..32).map(|_| first.random_behaviour()).collect();
        let b: Vec<_> = (0..32).map(|_| second.random_behaviour()).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn range_stays_within_bounds() {
        let mut rng = LoopRng::seeded(5);
        for _ in 0..1_000 {
            let value = rng.range(1.0, 5.0);
            assert!((1.0..=5.0).contains(&value));
        }
        assert_eq!(rng.range(3.0, 3.0), 3.0);
        assert_eq!(rng.index(0), None);
    }

    #[test]
    fn selectable_excludes_none_and_start() {
        let selectable: Vec<_> = LoopBehaviour::selectable().collect();
        assert_eq!(
            selectable,
            vec![
                LoopBehaviour::Auto,
                LoopBehaviour::Click,
                LoopBehaviour::SwitchKey,
                LoopBehaviour::Random
            ]
        );
    }

    #[test]
    fn behaviour_ron_names() {
        let serialized = ron::to_string(&LoopBehaviour::SwitchKey).unwrap();
        assert_eq!(serialized, "SwitchKey");
        let parsed: LoopBehaviour = ron::from_str("Random").unwrap();
        assert_eq!(parsed, LoopBehaviour::Random);
    }
}

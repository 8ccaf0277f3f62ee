use {bevy::prelude::*, session_resources::GameSession};

pub struct InteractionComponentsPlugin;

impl Plugin for InteractionComponentsPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<Interactable>()
            .register_type::<InteractionScope>();
    }
}

/// Which prevention flag a call to [`prevent_interaction`] touches.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InteractionScope {
    /// Only this entity.
    Local,
    /// Every interactable in the session.
    Global,
    Both,
}

/// Pointer-driven interaction capability shared by house sets, switches and keys.
///
/// An entity reacts to the primary button only when neither its own flag nor
/// the session-wide flag blocks it, and only while a game is running.
#[derive(Component, Reflect, Debug, Clone, Copy, PartialEq, Eq)]
#[reflect(Component)]
pub struct Interactable {
    pub pointer_over: bool,
    pub key_pressed: bool,
    pub locally_prevented: bool,
    pub highlighted: bool,
}

impl Default for Interactable {
    fn default() -> Self {
        Self {
            pointer_over: false,
            key_pressed: false,
            locally_prevented: true,
            highlighted: false,
        }
    }
}

impl Interactable {
    pub fn is_interaction_possible(&self, session: &GameSession) -> bool {
        !self.locally_prevented && session.interaction_allowed()
    }

    /// Highlight an entity would show this frame.
    pub fn wants_highlight(&self, session: &GameSession) -> bool {
        self.pointer_over && !self.key_pressed && self.is_interaction_possible(session)
    }
}

/// Sets or clears the prevention flags picked by `scope`.
///
/// Preventing hides the highlight right away. Lifting it leaves the highlight
/// to the next per-frame recompute.
pub fn prevent_interaction(
    interactable: &mut Interactable,
    prevent: bool,
    scope: InteractionScope,
    session: &mut GameSession,
) {
    if matches!(scope, InteractionScope::Local | InteractionScope::Both) {
        interactable.locally_prevented = prevent;
    }
    if matches!(scope, InteractionScope::Global | InteractionScope::Both) {
        session.interactions_globally_prevented = prevent;
    }
    if prevent {
        interactable.highlighted = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running_session() -> GameSession {
        GameSession {
            interactions_globally_prevented: false,
            is_game_started: true,
            ..default()
        }
    }

    #[test]
    fn new_interactables_start_prevented() {
        let interactable = Interactable::default();
        assert!(!interactable.is_interaction_possible(&running_session()));
    }

    #[test]
    fn every_gate_must_be_open() {
        let mut session = running_session();
        let mut interactable = Interactable {
            locally_prevented: false,
            ..default()
        };
        assert!(interactable.is_interaction_possible(&session));

        session.is_game_started = false;
        assert!(!interactable.is_interaction_possible(&session));

        session.is_game_started = true;
        session.interactions_globally_prevented = true;
        assert!(!interactable.is_interaction_possible(&session));

        session.interactions_globally_prevented = false;
        session.is_paused = true;
        assert!(!interactable.is_interaction_possible(&session));

        session.is_paused = false;
        interactable.locally_prevented = true;
        assert!(!interactable.is_interaction_possible(&session));
    }

    #[test]
    fn pressed_key_suppresses_highlight() {
        let session = running_session();
        let mut interactable = Interactable {
            pointer_over: true,
            locally_prevented: false,
            ..default()
        };
        assert!(interactable.wants_highlight(&session));
        interactable.key_pressed = true;
        assert!(!interactable.wants_highlight(&session));
    }

    #[test]
    fn scopes_touch_their_flags() {
        let mut session = running_session();
        let mut interactable = Interactable {
            locally_prevented: false,
            highlighted: true,
            ..default()
        };

        prevent_interaction(&mut interactable, true, InteractionScope::Global, &mut session);
        assert!(session.interactions_globally_prevented);
        assert!(!interactable.locally_prevented);
        assert!(!interactable.highlighted);

        prevent_interaction(&mut interactable, false, InteractionScope::Both, &mut session);
        assert!(!session.interactions_globally_prevented);
        assert!(!interactable.locally_prevented);

        prevent_interaction(&mut interactable, true, InteractionScope::Local, &mut session);
        assert!(interactable.locally_prevented);
        assert!(!session.interactions_globally_prevented);
    }
}

//! Proximity-triggered interaction with a single collectable object.

use stage2d::Vec2;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ProximityState {
    #[default]
    OutOfRange,
    InRange,
    /// Terminal. The object is gone for the rest of the session.
    Collected,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InteractionEvent {
    Entered,
    Left,
    /// Emitted at most once per trigger.
    Collected,
}

/// Tracks whether an actor is close enough to interact with an object.
///
/// In range means strictly closer than `radius`.
#[derive(Clone, Copy, Debug)]
pub struct ProximityTrigger {
    radius: f32,
    state: ProximityState,
}

impl ProximityTrigger {
    pub fn new(radius: f32) -> Self {
        Self {
            radius,
            state: ProximityState::OutOfRange,
        }
    }

    /// Advance one frame.
    ///
    /// `object` is `None` once the object no longer exists, which counts as
    /// collected. `interact_pressed` must be the edge-triggered key state.
    pub fn update(
        &mut self,
        actor: Vec2,
        object: Option<Vec2>,
        interact_pressed: bool,
    ) -> Option<InteractionEvent> {
        if self.state == ProximityState::Collected {
            return None;
        }
        let Some(object) = object else {
            self.state = ProximityState::Collected;
            return None;
        };

        let in_range = actor.distance(object) < self.radius;
        let (next, event) = match (self.state, in_range) {
            (_, true) if interact_pressed => {
                (ProximityState::Collected, Some(InteractionEvent::Collected))
            }
            (ProximityState::OutOfRange, true) => {
                (ProximityState::InRange, Some(InteractionEvent::Entered))
            }
            (ProximityState::InRange, false) => {
                (ProximityState::OutOfRange, Some(InteractionEvent::Left))
            }
            (state, _) => (state, None),
        };

        if let Some(event) = event {
            log::debug!("Proximity {:?} -> {:?} ({:?})", self.state, next, event);
        }
        self.state = next;
        event
    }

    pub fn state(&self) -> ProximityState {
        self.state
    }

    pub fn prompt_visible(&self) -> bool {
        self.state == ProximityState::InRange
    }

    pub fn is_collected(&self) -> bool {
        self.state == ProximityState::Collected
    }
}

/// On-screen hint shown next to an object while it can be collected.
#[derive(Clone, Debug, PartialEq)]
pub struct Prompt {
    pub text: String,
    /// Offset from the object's position.
    pub offset: Vec2,
    pub visible: bool,
    pub position: Vec2,
}

impl Prompt {
    pub fn new(text: impl Into<String>, offset: Vec2) -> Self {
        Self {
            text: text.into(),
            offset,
            visible: false,
            position: Vec2::ZERO,
        }
    }

    /// Derive visibility and position for this frame.
    pub fn follow(&mut self, trigger: &ProximityTrigger, anchor: Option<Vec2>) {
        match anchor {
            Some(anchor) => {
                self.position = anchor + self.offset;
                self.visible = trigger.prompt_visible();
            }
            None => self.visible = false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OBJECT: Vec2 = Vec2::new(1600.0, 1000.0);

    #[test]
    fn boundary_distance_is_out_of_range() {
        let mut trigger = ProximityTrigger::new(150.0);
        assert_eq!(trigger.update(Vec2::new(1600.0, 850.0), Some(OBJECT), false), None);
        assert!(!trigger.prompt_visible());

        assert_eq!(
            trigger.update(Vec2::new(1600.0, 850.5), Some(OBJECT), false),
            Some(InteractionEvent::Entered)
        );
        assert!(trigger.prompt_visible());
    }

    #[test]
    fn walking_away_hides_prompt() {
        let mut trigger = ProximityTrigger::new(150.0);
        trigger.update(OBJECT, Some(OBJECT), false);
        assert_eq!(
            trigger.update(Vec2::new(0.0, 0.0), Some(OBJECT), false),
            Some(InteractionEvent::Left)
        );
        assert_eq!(trigger.state(), ProximityState::OutOfRange);
    }

    #[test]
    fn press_out_of_range_does_nothing() {
        let mut trigger = ProximityTrigger::new(150.0);
        assert_eq!(trigger.update(Vec2::ZERO, Some(OBJECT), true), None);
        assert!(!trigger.is_collected());
    }

    #[test]
    fn collects_once() {
        let mut trigger = ProximityTrigger::new(150.0);
        let near = OBJECT + Vec2::new(10.0, 0.0);
        assert_eq!(
            trigger.update(near, Some(OBJECT), true),
            Some(InteractionEvent::Collected)
        );
        assert!(trigger.is_collected());
        assert_eq!(trigger.update(near, Some(OBJECT), true), None);
        assert_eq!(trigger.update(near, None, true), None);
    }

    #[test]
    fn missing_object_counts_as_collected() {
        let mut trigger = ProximityTrigger::new(150.0);
        assert_eq!(trigger.update(OBJECT, None, true), None);
        assert!(trigger.is_collected());
        assert!(!trigger.prompt_visible());
    }

    #[test]
    fn prompt_tracks_anchor() {
        let mut trigger = ProximityTrigger::new(150.0);
        let mut prompt = Prompt::new("Press E", Vec2::new(0.0, -48.0));

        trigger.update(OBJECT, Some(OBJECT), false);
        prompt.follow(&trigger, Some(OBJECT));
        assert!(prompt.visible);
        assert_eq!(prompt.position, Vec2::new(1600.0, 952.0));

        trigger.update(OBJECT, Some(OBJECT), true);
        prompt.follow(&trigger, None);
        assert!(!prompt.visible);
    }
}

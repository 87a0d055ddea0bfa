//! Turns the four movement keys into a velocity and a facing.
//!
//! Screen coordinates: x grows to the right, y grows downward.

use serde::{Deserialize, Serialize};
use stage2d::Vec2;

/// Direction the hero faces. Held across idle frames.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facing {
    Left,
    Right,
    Up,
    #[default]
    Down,
}

impl Facing {
    pub const ALL: [Facing; 4] = [Facing::Left, Facing::Right, Facing::Up, Facing::Down];

    /// Walk animation key.
    pub fn label(self) -> &'static str {
        match self {
            Facing::Left => "left",
            Facing::Right => "right",
            Facing::Up => "up",
            Facing::Down => "down",
        }
    }

    /// Idle animation key, `turn_` plus the first letter of the label.
    pub fn idle_key(self) -> &'static str {
        match self {
            Facing::Left => "turn_l",
            Facing::Right => "turn_r",
            Facing::Up => "turn_u",
            Facing::Down => "turn_d",
        }
    }
}

/// Held state of the four movement keys for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MoveInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl MoveInput {
    pub fn new(left: bool, right: bool, up: bool, down: bool) -> Self {
        Self {
            left,
            right,
            up,
            down,
        }
    }

    /// Unnormalized sum of the pressed keys.
    pub fn axis(&self) -> Vec2 {
        let mut axis = Vec2::ZERO;
        if self.left {
            axis.x -= 1.0;
        }
        if self.right {
            axis.x += 1.0;
        }
        if self.up {
            axis.y -= 1.0;
        }
        if self.down {
            axis.y += 1.0;
        }
        axis
    }
}

/// How the facing is picked when more than one key is held.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TieBreak {
    /// Decided on the resolved vector, horizontal axis first. Opposite keys
    /// cancel before the decision.
    #[default]
    HorizontalFirst,
    /// First held key in the order left, right, up, down.
    FirstPressed,
}

/// Outcome of one frame of movement input.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Resolution {
    pub velocity: Vec2,
    pub facing: Facing,
    pub moving: bool,
}

impl Resolution {
    pub fn idle(facing: Facing) -> Self {
        Self {
            velocity: Vec2::ZERO,
            facing,
            moving: false,
        }
    }

    pub fn animation_key(&self) -> &'static str {
        if self.moving {
            self.facing.label()
        } else {
            self.facing.idle_key()
        }
    }
}

/// Resolve one frame of input into a velocity of magnitude `speed` and a facing.
///
/// A zero input vector (nothing held, or only opposite keys) is idle: zero
/// velocity, `last_facing` kept.
pub fn resolve(input: MoveInput, speed: f32, policy: TieBreak, last_facing: Facing) -> Resolution {
    let axis = input.axis();
    if axis.length_squared() == 0.0 {
        return Resolution::idle(last_facing);
    }

    let velocity = axis.normalized() * speed;
    let facing = match policy {
        TieBreak::HorizontalFirst => facing_from_vector(velocity),
        TieBreak::FirstPressed => first_pressed(input).unwrap_or(last_facing),
    };

    Resolution {
        velocity,
        facing,
        moving: true,
    }
}

fn facing_from_vector(v: Vec2) -> Facing {
    if v.x < 0.0 {
        Facing::Left
    } else if v.x > 0.0 {
        Facing::Right
    } else if v.y < 0.0 {
        Facing::Up
    } else {
        Facing::Down
    }
}

fn first_pressed(input: MoveInput) -> Option<Facing> {
    let held = [input.left, input.right, input.up, input.down];
    Facing::ALL
        .into_iter()
        .zip(held)
        .find_map(|(facing, down)| down.then_some(facing))
}

/// Keeps the facing between frames.
#[derive(Clone, Copy, Debug)]
pub struct DirectionResolver {
    facing: Facing,
    speed: f32,
    policy: TieBreak,
}

impl DirectionResolver {
    pub fn new(speed: f32, policy: TieBreak) -> Self {
        Self {
            facing: Facing::default(),
            speed,
            policy,
        }
    }

    pub fn update(&mut self, input: MoveInput) -> Resolution {
        let resolution = resolve(input, self.speed, self.policy, self.facing);
        self.facing = resolution.facing;
        resolution
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPEED: f32 = 600.0;

    fn keys(s: &str) -> MoveInput {
        MoveInput::new(s.contains('l'), s.contains('r'), s.contains('u'), s.contains('d'))
    }

    #[test]
    fn single_keys_map_to_their_label() {
        for (input, facing, velocity) in [
            ("l", Facing::Left, Vec2::new(-SPEED, 0.0)),
            ("r", Facing::Right, Vec2::new(SPEED, 0.0)),
            ("u", Facing::Up, Vec2::new(0.0, -SPEED)),
            ("d", Facing::Down, Vec2::new(0.0, SPEED)),
        ] {
            for policy in [TieBreak::HorizontalFirst, TieBreak::FirstPressed] {
                let r = resolve(keys(input), SPEED, policy, Facing::Up);
                assert_eq!(r.facing, facing);
                assert_eq!(r.velocity, velocity);
                assert_eq!(r.animation_key(), facing.label());
            }
        }
    }

    #[test]
    fn diagonal_keeps_speed() {
        let r = resolve(keys("ru"), SPEED, TieBreak::HorizontalFirst, Facing::Down);
        assert!((r.velocity.length() - SPEED).abs() < 1e-3);
        assert_eq!(r.facing, Facing::Right);
    }

    #[test]
    fn opposite_keys_cancel() {
        let r = resolve(keys("lru"), SPEED, TieBreak::HorizontalFirst, Facing::Down);
        assert_eq!(r.velocity, Vec2::new(0.0, -SPEED));
        assert_eq!(r.facing, Facing::Up);

        let idle = resolve(keys("lr"), SPEED, TieBreak::HorizontalFirst, Facing::Right);
        assert!(!idle.moving);
        assert_eq!(idle.animation_key(), "turn_r");
    }

    #[test]
    fn first_pressed_reads_raw_keys() {
        // Left and right cancel, but left is still the first held key.
        let r = resolve(keys("lru"), SPEED, TieBreak::FirstPressed, Facing::Down);
        assert_eq!(r.velocity, Vec2::new(0.0, -SPEED));
        assert_eq!(r.facing, Facing::Left);

        let r = resolve(keys("ud"), SPEED, TieBreak::FirstPressed, Facing::Left);
        assert!(!r.moving);
        assert_eq!(r.facing, Facing::Left);
    }

    #[test]
    fn idle_turns_towards_last_facing() {
        let mut resolver = DirectionResolver::new(SPEED, TieBreak::HorizontalFirst);
        assert_eq!(resolver.facing(), Facing::Down);
        assert_eq!(resolver.update(MoveInput::default()).animation_key(), "turn_d");

        resolver.update(keys("l"));
        let idle = resolver.update(MoveInput::default());
        assert_eq!(idle.velocity, Vec2::ZERO);
        assert_eq!(idle.animation_key(), "turn_l");
        assert_eq!(resolver.facing(), Facing::Left);
    }
}

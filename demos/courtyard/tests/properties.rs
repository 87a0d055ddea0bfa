//! Property tests for the movement resolver and the proximity trigger.

use courtyard::{
    resolve, Facing, InteractionEvent, MoveInput, ProximityState, ProximityTrigger, TieBreak,
};
use proptest::prelude::*;
use stage2d::Vec2;

fn facing() -> impl Strategy<Value = Facing> {
    prop::sample::select(Facing::ALL.to_vec())
}

fn policy() -> impl Strategy<Value = TieBreak> {
    prop_oneof![Just(TieBreak::HorizontalFirst), Just(TieBreak::FirstPressed)]
}

fn keys() -> impl Strategy<Value = MoveInput> {
    (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>())
        .prop_map(|(l, r, u, d)| MoveInput::new(l, r, u, d))
}

fn point() -> impl Strategy<Value = Vec2> {
    (-4000.0f32..4000.0, -4000.0f32..4000.0).prop_map(|(x, y)| Vec2::new(x, y))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_single_key_moves_at_full_speed(
        index in 0usize..4,
        speed in 1.0f32..2000.0,
        policy in policy(),
        last in facing(),
    ) {
        let mut held = [false; 4];
        held[index] = true;
        let input = MoveInput::new(held[0], held[1], held[2], held[3]);

        let r = resolve(input, speed, policy, last);
        prop_assert_eq!(r.facing, Facing::ALL[index]);
        prop_assert!((r.velocity.length() - speed).abs() <= speed * 1e-5);
        prop_assert_eq!(r.animation_key(), Facing::ALL[index].label());
    }

    #[test]
    fn prop_speed_is_all_or_nothing(
        input in keys(),
        speed in 1.0f32..2000.0,
        policy in policy(),
        last in facing(),
    ) {
        let r = resolve(input, speed, policy, last);
        if r.moving {
            prop_assert!((r.velocity.length() - speed).abs() <= speed * 1e-5);
        } else {
            prop_assert_eq!(r.velocity, Vec2::ZERO);
            prop_assert_eq!(r.facing, last);
            prop_assert_eq!(r.animation_key(), last.idle_key());
        }
        if input.left && input.right {
            prop_assert_eq!(r.velocity.x, 0.0);
        }
        if input.up && input.down {
            prop_assert_eq!(r.velocity.y, 0.0);
        }
    }

    #[test]
    fn prop_horizontal_first_follows_velocity(input in keys(), last in facing()) {
        let r = resolve(input, 600.0, TieBreak::HorizontalFirst, last);
        let expected = if r.velocity.x < 0.0 {
            Facing::Left
        } else if r.velocity.x > 0.0 {
            Facing::Right
        } else if r.velocity.y < 0.0 {
            Facing::Up
        } else if r.velocity.y > 0.0 {
            Facing::Down
        } else {
            last
        };
        prop_assert_eq!(r.facing, expected);
    }

    #[test]
    fn prop_prompt_iff_strictly_inside_radius(
        actor in point(),
        object in point(),
        radius in 1.0f32..500.0,
    ) {
        let mut trigger = ProximityTrigger::new(radius);
        trigger.update(actor, Some(object), false);
        prop_assert_eq!(trigger.prompt_visible(), actor.distance(object) < radius);
    }

    #[test]
    fn prop_collects_at_most_once(
        steps in prop::collection::vec((point(), any::<bool>()), 1..60),
        object in point(),
    ) {
        let mut trigger = ProximityTrigger::new(150.0);
        let mut collected = 0;
        for (actor, pressed) in steps {
            let was_collected = trigger.is_collected();
            let event = trigger.update(actor, Some(object), pressed);
            if was_collected {
                prop_assert_eq!(event, None);
                prop_assert_eq!(trigger.state(), ProximityState::Collected);
            }
            if event == Some(InteractionEvent::Collected) {
                collected += 1;
                prop_assert!(pressed);
            }
        }
        prop_assert!(collected <= 1);
    }
}

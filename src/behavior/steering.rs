//! Idle hostiles walk into their engage band.

use bevy::prelude::*;

use super::profile::{horizontal, BehaviorProfile};

/// Fraction of the band edge to aim for, so the actor ends up inside it rather than on it.
const BAND_MARGIN: f32 = 0.9;

/// Ground-plane displacement for one tick of steering toward (or away from) `target`.
///
/// Zero when the target is already inside the engage band.
pub fn steer_step(body: Vec3, target: Vec3, profile: &BehaviorProfile, speed: f32, dt: f32) -> Vec3 {
    let offset = horizontal(target - body);
    let distance = offset.length();
    let max_step = speed.max(0.0) * dt;

    if distance > profile.engage_max {
        let wanted = distance - profile.engage_max * BAND_MARGIN;
        offset.normalize_or_zero() * wanted.min(max_step)
    } else if distance < profile.engage_min && distance > f32::EPSILON {
        let wanted = profile.engage_min / BAND_MARGIN - distance;
        -offset.normalize_or_zero() * wanted.min(max_step)
    } else {
        Vec3::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::Archetype;
    use crate::combat::Faction;

    fn band(engage_min: f32, engage_max: f32) -> BehaviorProfile {
        BehaviorProfile {
            archetype: Archetype::Shooter {
                projectile_speed: 10.0,
                projectile_lifetime: 2.0,
                projectile_radius: 0.2,
            },
            engage_min,
            engage_max,
            telegraph_duration: 0.5,
            recovery_duration: 0.5,
            attack_cooldown: 1.0,
            limbs: 1,
            shared_cooldown: 0.0,
            damage: 5.0,
            target_faction: Faction::Player,
        }
    }

    #[test]
    fn test_far_target_is_approached_at_speed() {
        let step = steer_step(Vec3::ZERO, Vec3::new(20.0, 3.0, 0.0), &band(0.0, 5.0), 4.0, 0.5);
        assert_eq!(step, Vec3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn test_approach_stops_inside_band() {
        let step = steer_step(Vec3::ZERO, Vec3::new(5.2, 0.0, 0.0), &band(0.0, 5.0), 4.0, 0.5);
        assert!((step.x - 0.7).abs() < 1e-5);
    }

    #[test]
    fn test_too_close_backs_off() {
        let step = steer_step(Vec3::ZERO, Vec3::new(0.0, 0.0, 1.0), &band(3.0, 10.0), 2.0, 0.25);
        assert_eq!(step, Vec3::new(0.0, 0.0, -0.5));
    }

    #[test]
    fn test_inside_band_holds_position() {
        let step = steer_step(Vec3::ZERO, Vec3::new(4.0, 0.0, 0.0), &band(3.0, 10.0), 2.0, 0.25);
        assert_eq!(step, Vec3::ZERO);
    }
}

//! Smooth transform interpolation used by the camera rig.

use bevy::prelude::*;

/// Distance under which a translation target counts as reached.
const ARRIVAL_DISTANCE: f32 = 0.01;

/// Component for smooth transform interpolation.
#[derive(Component)]
pub struct SmoothTransform {
    /// Target translation (None = don't animate)
    pub target_translation: Option<Vec3>,
    /// Point to keep facing while moving (None = keep rotation)
    pub look_at: Option<Vec3>,
    /// Interpolation speed multiplier (higher = faster)
    pub translation_speed: f32,
    pub rotation_speed: f32,
}

impl Default for SmoothTransform {
    fn default() -> Self {
        Self {
            target_translation: None,
            look_at: None,
            translation_speed: 6.0,
            rotation_speed: 6.0,
        }
    }
}

impl SmoothTransform {
    pub fn new(translation_speed: f32, rotation_speed: f32) -> Self {
        Self {
            translation_speed,
            rotation_speed,
            ..default()
        }
    }

    /// Retargets so the move settles in roughly `duration` seconds.
    ///
    /// Exponential smoothing covers ~98% of the distance after four time constants.
    pub fn pan_to(&mut self, translation: Vec3, look_at: Vec3, duration: f32) {
        let speed = 4.0 / duration.max(0.05);
        self.target_translation = Some(translation);
        self.look_at = Some(look_at);
        self.translation_speed = speed;
        self.rotation_speed = speed;
    }

    pub fn has_arrived(&self, transform: &Transform) -> bool {
        self.target_translation
            .map_or(true, |target| transform.translation.distance(target) <= ARRIVAL_DISTANCE)
    }
}

/// System that interpolates transforms toward their targets.
pub fn update_smooth_transforms(
    time: Res<Time>,
    mut query: Query<(&mut Transform, &SmoothTransform)>,
) {
    let dt = time.delta_secs();

    for (mut transform, smooth) in query.iter_mut() {
        if let Some(target) = smooth.target_translation {
            let t = (smooth.translation_speed * dt).min(1.0);
            transform.translation = transform.translation.lerp(target, t);
        }

        if let Some(focus) = smooth.look_at {
            if focus.distance(transform.translation) > ARRIVAL_DISTANCE {
                let target = transform.looking_at(focus, Vec3::Y).rotation;
                let t = (smooth.rotation_speed * dt).min(1.0);
                transform.rotation = transform.rotation.slerp(target, t);
            }
        }
    }
}

//! Camera rig: follows the player from above and pans on request.

use bevy::prelude::*;

use super::components::Player;
use crate::core::SmoothTransform;
use crate::encounter::{PanTarget, StageCue};
use crate::world::FocalActor;

/// Third-person camera that trails the player.
#[derive(Component)]
pub struct CameraRig {
    /// Camera position relative to what it looks at
    pub offset: Vec3,
    /// False while panned away from the player
    pub following: bool,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            offset: Vec3::new(0.0, 14.0, 11.0),
            following: true,
        }
    }
}

/// Spawn the rig above the player's start point.
pub fn spawn_camera(mut commands: Commands) {
    let rig = CameraRig::default();
    commands.spawn((
        Camera3d::default(),
        Transform::from_translation(rig.offset).looking_at(Vec3::ZERO, Vec3::Y),
        SmoothTransform::new(5.0, 5.0),
        rig,
    ));
}

/// Keep the rig's smoothing target on the player.
pub fn follow_player(
    player_query: Query<&Transform, (With<Player>, Without<CameraRig>)>,
    mut rig_query: Query<(&CameraRig, &mut SmoothTransform)>,
) {
    let Ok(player) = player_query.get_single() else {
        return;
    };
    for (rig, mut smooth) in rig_query.iter_mut() {
        if rig.following {
            smooth.target_translation = Some(player.translation + rig.offset);
            smooth.look_at = Some(player.translation);
        }
    }
}

/// Pan to the focal actor or back to the player.
pub fn apply_pan_cues(
    mut cues: EventReader<StageCue>,
    player_query: Query<&Transform, (With<Player>, Without<CameraRig>)>,
    focus_query: Query<&Transform, (With<FocalActor>, Without<CameraRig>)>,
    mut rig_query: Query<(&mut CameraRig, &mut SmoothTransform)>,
) {
    for cue in cues.read() {
        let StageCue::Pan { target, duration } = cue else {
            continue;
        };
        let subject = match target {
            PanTarget::Focus => focus_query.get_single(),
            PanTarget::Player => player_query.get_single(),
        };
        let Ok(subject) = subject else {
            warn!("Nothing to pan to for {:?}", target);
            continue;
        };

        for (mut rig, mut smooth) in rig_query.iter_mut() {
            rig.following = *target == PanTarget::Player;
            // Closer framing on the focal actor
            let offset = match target {
                PanTarget::Focus => rig.offset * 0.45,
                PanTarget::Player => rig.offset,
            };
            smooth.pan_to(subject.translation + offset, subject.translation, *duration);
        }
    }
}

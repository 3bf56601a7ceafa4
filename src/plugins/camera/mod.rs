//! Camera plugin.
//!
//! The camera lives for the whole session: the menu UI renders through it before any
//! level exists.
//!
//! The key subtlety: **B0001**.
//! A system cannot have `Query<&Transform>` and `Query<&mut Transform>` at the same time
//! unless Bevy can prove those queries are disjoint.
//!
//! We encode disjointness using `Without<...>` filters.
//!
//! ```text
//! Startup:       spawn MainCamera
//! PostUpdate:    follow_player (InGame only) with disjoint queries
//! OnExit(InGame): snap back to the origin for the menu
//! ```

use bevy::prelude::*;

use crate::common::state::GameState;
use crate::plugins::player::Player;

#[derive(Component)]
pub struct MainCamera {
    pub responsiveness: f32,
}

pub fn plugin(app: &mut App) {
    app.add_systems(Startup, spawn_camera)
        .add_systems(OnExit(GameState::InGame), recenter)
        .add_systems(
            PostUpdate,
            follow_player
                .before(TransformSystems::Propagate)
                .run_if(in_state(GameState::InGame)),
        );
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Name::new("MainCamera"),
        Camera2d,
        MainCamera { responsiveness: 5.0 },
        Transform::from_xyz(0.0, 0.0, 999.0),
    ));
}

fn recenter(mut q_cam: Query<&mut Transform, With<MainCamera>>) {
    for mut tf in &mut q_cam {
        tf.translation.x = 0.0;
        tf.translation.y = 0.0;
    }
}

fn follow_player(
    time: Res<Time>,
    // Disjointness proof: Player entities are not MainCamera entities.
    q_player: Query<&Transform, (With<Player>, Without<MainCamera>)>,
    // Disjointness proof: MainCamera entities are not Player entities.
    mut q_cam: Query<(&mut Transform, &MainCamera), Without<Player>>,
) {
    let Ok(tf_player) = q_player.single() else {
        return;
    };
    let Ok((mut tf_cam, main_cam)) = q_cam.single_mut() else {
        return;
    };

    let dt = time.delta_secs();
    let alpha = 1.0 - (-main_cam.responsiveness * dt).exp();

    let target = tf_player.translation.truncate();
    let current = tf_cam.translation.truncate();
    let next = current + (target - current) * alpha;
    tf_cam.translation.x = next.x;
    tf_cam.translation.y = next.y;
}

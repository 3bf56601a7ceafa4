use bevy::prelude::*;

use crate::common::tunables::Tunables;
use crate::plugins::core;

#[test]
fn inserts_resources() {
    let mut app = App::new();
    core::plugin(&mut app);

    let tunables = app.world().get_resource::<Tunables>().expect("Tunables");
    assert_eq!(tunables.bullet_pool_capacity, 512);
    assert_eq!(tunables.auto_fire_delay.as_millis(), 1000);
    assert!(app.world().get_resource::<ClearColor>().is_some());
}

#[test]
fn keeps_preinserted_tunables() {
    let mut app = App::new();
    app.insert_resource(Tunables { bullet_pool_capacity: 8, ..default() });
    core::plugin(&mut app);

    assert_eq!(app.world().resource::<Tunables>().bullet_pool_capacity, 8);
    assert_eq!(
        app.world().resource::<Time<Fixed>>().timestep().as_secs_f64(),
        1.0 / core::FIXED_HZ
    );
}

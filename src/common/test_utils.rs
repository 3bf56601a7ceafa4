//! Test helpers.
//!
//! Most unit tests build a bare `World`, insert exactly the resources a system needs and
//! run that one system. `Commands` queued by the system are flushed before returning, so
//! assertions see spawned / despawned entities straight away.

use bevy::ecs::system::{IntoSystem, RunSystemOnce};
use bevy::prelude::*;

/// Run a system once on the given world, then flush deferred commands.
/// Returns the system output.
pub fn run_system_once<T, Out, Marker>(world: &mut World, system: T) -> Out
where
    T: IntoSystem<(), Out, Marker>,
{
    let out = world.run_system_once(system).expect("system run failed");
    world.flush();
    out
}

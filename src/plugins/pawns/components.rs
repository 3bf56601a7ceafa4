use bevy::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    /// +1 for right, -1 for left.
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Self::Right => 1.0,
            Self::Left => -1.0,
        }
    }

    #[inline]
    pub fn is_left(self) -> bool {
        self == Self::Left
    }
}

/// Base actor for anything that can hold a weapon, player or AI.
#[derive(Component, Debug, Clone, Default)]
pub struct Pawn {
    pub facing: Facing,
    /// Driven pawns advance in their facing every fixed step.
    pub walking: bool,
}

impl Pawn {
    pub fn look_on_right(&mut self) {
        self.facing = Facing::Right;
    }

    pub fn look_on_left(&mut self) {
        self.facing = Facing::Left;
    }

    pub fn walk(&mut self) {
        self.walking = true;
    }

    pub fn stop(&mut self) {
        self.walking = false;
    }
}

#[derive(Component, Debug, Clone)]
pub struct Health {
    pub hp: i32,
}

/// Weapon entity held by this pawn.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Equipped(pub Entity);

/// Hand position relative to the pawn origin, for a right-facing pawn.
#[derive(Component, Debug, Clone, Copy)]
pub struct HandOffset(pub Vec2);

impl HandOffset {
    pub fn for_facing(self, facing: Facing) -> Vec2 {
        Vec2::new(self.0.x * facing.sign(), self.0.y)
    }
}

/// Last ammunition state reported by the held weapon.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AmmoReadout {
    pub shots: u32,
    pub fire_limit: u32,
}

/// Pawn lifecycle state machine.
///
/// - Alive: normal gameplay.
/// - Dying: short transition animation, no collisions.
/// - Dead: terminal marker to stop further state transitions.
#[derive(Component, Debug, Clone)]
pub enum PawnLifeState {
    Alive,
    Dying { timer: Timer },
    Dead,
}

impl PawnLifeState {
    #[inline]
    pub fn is_alive(&self) -> bool {
        matches!(self, Self::Alive)
    }
}

/// Marker: pawn (and its weapon) should be removed from the world.
///
/// We don't despawn in the fixed step; we mark and despawn later in PostUpdate.
#[derive(Component, Debug, Clone, Copy)]
pub struct PendingDespawn;

/// Last bullet the held weapon put into play.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LastShot {
    pub bullet: Option<Entity>,
    pub total: u32,
}

use bevy::ecs::query::QueryData;
use bevy::prelude::*;
use health_boost_core::{
    Location, MaxHealthAttribute, PlayerHandle, Position, DEFAULT_MAX_HEALTH,
};

#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct PlayerName(pub String);

#[derive(Component, Debug, Clone, PartialEq, Deref, DerefMut)]
pub struct WorldLocation(pub Location);

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Health(pub f64);

/// Max-health attribute. Entities without it never receive a bonus.
#[derive(Component, Debug, Clone, Default, PartialEq, Deref, DerefMut)]
pub struct MaxHealth(pub MaxHealthAttribute);

/// Marks a player that is dead and awaiting respawn.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Dead;

#[derive(Bundle, Debug, Clone)]
pub struct PlayerBundle {
    pub name: PlayerName,
    pub location: WorldLocation,
    pub health: Health,
    pub max_health: MaxHealth,
}

impl PlayerBundle {
    pub fn new(name: impl Into<String>, location: Location) -> Self {
        Self {
            name: PlayerName(name.into()),
            location: WorldLocation(location),
            health: Health(DEFAULT_MAX_HEALTH),
            max_health: MaxHealth::default(),
        }
    }
}

#[derive(QueryData)]
#[query_data(mutable)]
pub struct PlayerQuery {
    pub name: &'static PlayerName,
    pub location: &'static WorldLocation,
    pub health: &'static mut Health,
    pub max_health: Option<&'static mut MaxHealth>,
    pub dead: Has<Dead>,
}

impl PlayerHandle for PlayerQueryItem<'_> {
    type Capacity = MaxHealthAttribute;

    fn name(&self) -> &str {
        &self.name.0
    }

    fn position(&self) -> Position {
        self.location.position()
    }

    fn health(&self) -> f64 {
        self.health.0
    }

    fn set_health(&mut self, health: f64) {
        self.health.0 = health;
    }

    fn is_dead(&self) -> bool {
        self.dead
    }

    fn max_health(&self) -> Option<&MaxHealthAttribute> {
        self.max_health.as_deref().map(|m| &m.0)
    }

    fn max_health_mut(&mut self) -> Option<&mut MaxHealthAttribute> {
        self.max_health.as_deref_mut().map(|m| &mut m.0)
    }
}

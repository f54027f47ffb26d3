//! Bevy adapter for the health boost.
//!
//! The host owns the player entities and reports lifecycle changes through
//! the events below. Hosts must update [`WorldLocation`] before sending
//! [`PlayerMoved`] or [`PlayerChangedWorld`], and send [`PlayerQuit`] before
//! despawning the entity.

mod components;

use bevy::prelude::*;
use health_boost_core::{BoostConfig, ConfigError, HealthBoost, Location};
use tracing::warn;

pub use components::{
    Dead, Health, MaxHealth, PlayerBundle, PlayerName, PlayerQuery, PlayerQueryItem, WorldLocation,
};

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerJoined(pub Entity);

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerQuit(pub Entity);

#[derive(Event, Debug, Clone, PartialEq)]
pub struct PlayerMoved {
    pub player: Entity,
    pub from: Location,
    pub to: Location,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerChangedWorld(pub Entity);

/// Runtime activation, e.g. around a reload.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthBoostToggled {
    Enabled,
    Disabled,
}

#[derive(Resource, Debug, Deref, DerefMut)]
pub struct HealthBoostState(pub HealthBoost);

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct HealthBoostSet;

/// Registers the events and systems. The boost is enabled for every player
/// present at startup.
#[derive(Default)]
pub struct HealthBoostPlugin {
    boost: HealthBoost,
}

impl HealthBoostPlugin {
    pub fn new(config: &BoostConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            boost: HealthBoost::new(config)?,
        })
    }
}

impl Plugin for HealthBoostPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(HealthBoostState(self.boost.clone()))
            .add_event::<PlayerJoined>()
            .add_event::<PlayerQuit>()
            .add_event::<PlayerMoved>()
            .add_event::<PlayerChangedWorld>()
            .add_event::<HealthBoostToggled>()
            .add_systems(Startup, enable_on_startup)
            .add_systems(
                Update,
                (
                    handle_toggles,
                    handle_joins,
                    handle_world_changes,
                    handle_moves,
                    handle_quits,
                )
                    .chain()
                    .in_set(HealthBoostSet),
            );
    }
}

fn enable_on_startup(mut boost: ResMut<HealthBoostState>, mut players: Query<PlayerQuery>) {
    boost.enable(players.iter_mut());
}

fn handle_toggles(
    mut boost: ResMut<HealthBoostState>,
    mut events: EventReader<HealthBoostToggled>,
    mut players: Query<PlayerQuery>,
) {
    for toggle in events.read() {
        match toggle {
            HealthBoostToggled::Enabled => {
                boost.enable(players.iter_mut());
            }
            HealthBoostToggled::Disabled => {
                boost.disable(players.iter_mut());
            }
        }
    }
}

fn handle_joins(
    boost: Res<HealthBoostState>,
    mut events: EventReader<PlayerJoined>,
    mut players: Query<PlayerQuery>,
) {
    for PlayerJoined(entity) in events.read() {
        match players.get_mut(*entity) {
            Ok(mut player) => {
                boost.on_join(&mut player);
            }
            Err(_) => unknown_player("join", *entity),
        }
    }
}

fn handle_world_changes(
    boost: Res<HealthBoostState>,
    mut events: EventReader<PlayerChangedWorld>,
    mut players: Query<PlayerQuery>,
) {
    for PlayerChangedWorld(entity) in events.read() {
        match players.get_mut(*entity) {
            Ok(mut player) => {
                boost.on_world_change(&mut player);
            }
            Err(_) => unknown_player("world change", *entity),
        }
    }
}

fn handle_moves(
    boost: Res<HealthBoostState>,
    mut events: EventReader<PlayerMoved>,
    mut players: Query<PlayerQuery>,
) {
    for event in events.read() {
        match players.get_mut(event.player) {
            Ok(mut player) => {
                boost.on_move(&mut player, &event.from, &event.to);
            }
            Err(_) => unknown_player("move", event.player),
        }
    }
}

fn handle_quits(
    boost: Res<HealthBoostState>,
    mut events: EventReader<PlayerQuit>,
    mut players: Query<PlayerQuery>,
) {
    for PlayerQuit(entity) in events.read() {
        match players.get_mut(*entity) {
            Ok(mut player) => {
                boost.on_quit(&mut player);
            }
            Err(_) => unknown_player("quit", *entity),
        }
    }
}

fn unknown_player(event: &str, entity: Entity) {
    warn!(
        target: "health_boost.bevy",
        ?entity,
        event,
        "event for an entity without player components"
    );
}

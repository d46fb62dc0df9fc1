//! Core types for Hollowvale: items, locations, the player, and the world graph.
//!
//! This crate owns the data model every engine operates on and the
//! containment rules that keep it consistent. It is independent of intents
//! and narration; you can construct a [`World`] programmatically or
//! deserialize one from JSON.

/// Directions of travel.
pub mod direction;
/// Error types used throughout the crate.
pub mod error;
/// Item and location identifiers.
pub mod id;
/// Items, capability records, and holders.
pub mod item;
/// Locations, exits, and passage rules.
pub mod location;
/// Player context.
pub mod player;
/// Scope resolution: what the player can currently refer to.
pub mod scope;
/// The central world model that owns items, locations, and the player.
pub mod world;

/// Re-export direction.
pub use direction::Direction;
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export identifiers.
pub use id::{ItemId, LocationId};
/// Re-export item types.
pub use item::{Capabilities, Container, Holder, Item, LightSource, MetadataValue, Person, Takeable, Vessel};
/// Re-export location types.
pub use location::{Exit, Location, Passage};
/// Re-export the player.
pub use player::Player;
/// Re-export the scope resolver.
pub use scope::Scope;
/// Re-export the world model.
pub use world::World;

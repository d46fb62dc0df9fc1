//! Content hooks: per-location and per-item behavior, plus the registry that
//! owns them.
//!
//! World data lives in [`hv_core::World`]; behavior lives here, keyed by the
//! same identifiers. A location without a registered behavior acts as a
//! [`PlainLocation`].

use std::any::Any;
use std::collections::HashMap;
use std::fmt;

use async_trait::async_trait;
use hv_core::{Direction, ItemId, Location, LocationId};

use crate::context::Stage;
use crate::error::EngineResult;
use crate::intent::{Intent, MultiNounIntent, SimpleIntent};
use crate::movement::MovementParameters;
use crate::narration::{NarrationClient, NarrationRequest, narrate};
use crate::result::InteractionResult;
use crate::scheduler::TurnActor;

/// Said on arrival in a dark location.
pub const PITCH_BLACK: &str = "It is pitch black. You are likely to be eaten by a grue. ";

/// Behavior attached to a location.
///
/// Every method has a default, so a location only overrides what it
/// special-cases.
#[async_trait]
pub trait LocationBehavior: fmt::Debug + Send {
    /// Answer a simple intent before any item gets a chance. Returning
    /// `None` lets the item walk proceed.
    fn respond_to_simple(
        &mut self,
        _intent: &SimpleIntent,
        _stage: &mut Stage<'_>,
    ) -> EngineResult<Option<InteractionResult>> {
        Ok(None)
    }

    /// Answer a multi-noun intent before any item gets a chance.
    fn respond_to_multi(
        &mut self,
        _intent: &MultiNounIntent,
        _stage: &mut Stage<'_>,
    ) -> EngineResult<Option<InteractionResult>> {
        Ok(None)
    }

    /// Movement parameters for a direction. `None` means there is no way
    /// out that way at all.
    fn navigate(&self, direction: Direction, location: &Location) -> Option<MovementParameters> {
        location.exit(direction).map(MovementParameters::from)
    }

    /// Called on the origin just before the player leaves it.
    fn on_leave(&mut self, _stage: &mut Stage<'_>, _destination: LocationId) -> EngineResult<()> {
        Ok(())
    }

    /// Called on the destination once the player is in it. The text comes
    /// first in the arrival narration.
    fn before_enter(&mut self, stage: &mut Stage<'_>) -> EngineResult<String> {
        describe_location(stage)
    }

    /// Called after [`before_enter`](Self::before_enter); may ask the
    /// narrator for flavor. The default does so on the first visit only.
    async fn after_enter(
        &mut self,
        stage: &mut Stage<'_>,
        narrator: &dyn NarrationClient,
    ) -> EngineResult<String> {
        let location = stage.world.current_location()?;
        if location.visit_count > 1 {
            return Ok(String::new());
        }
        let request = NarrationRequest::AfterEnterLocation {
            location: location.name.clone(),
            description: location.description.clone(),
        };
        narrate(narrator, request, "").await
    }
}

/// Render the player's current location: its name and description, or
/// darkness.
pub fn describe_location(stage: &Stage<'_>) -> EngineResult<String> {
    if stage.scope().is_dark() {
        return Ok(PITCH_BLACK.to_string());
    }
    let location = stage.world.current_location()?;
    if location.description.is_empty() {
        Ok(format!("{}\n", location.name))
    } else {
        Ok(format!("{}\n{}", location.name, location.description))
    }
}

/// A location with nothing special about it.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainLocation;

impl LocationBehavior for PlainLocation {}

/// Behavior attached to an item: NPCs, gadgets, anything that reacts.
///
/// Item behaviors run before the item's processor chain. Item-bound turn
/// actors are item behaviors whose [`act`](Self::act) does something.
pub trait ItemBehavior: fmt::Debug + Send {
    /// React to a simple intent whose noun names this item.
    fn respond_to_simple(
        &mut self,
        _intent: &Intent,
        _stage: &mut Stage<'_>,
    ) -> EngineResult<Option<InteractionResult>> {
        Ok(None)
    }

    /// React to a multi-noun intent while this item is in scope.
    fn respond_to_multi(
        &mut self,
        _intent: &Intent,
        _stage: &mut Stage<'_>,
    ) -> EngineResult<Option<InteractionResult>> {
        Ok(None)
    }

    /// One turn of activity while registered with the scheduler.
    fn act(&mut self, _stage: &mut Stage<'_>) -> EngineResult<String> {
        Ok(String::new())
    }

    /// Support downcasting to the concrete behavior.
    fn as_any(&self) -> &dyn Any;

    /// Support downcasting to the concrete behavior.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Every behavior in a story, keyed by the entity it belongs to.
#[derive(Debug, Default)]
pub struct Cast {
    locations: HashMap<LocationId, Box<dyn LocationBehavior>>,
    items: HashMap<ItemId, Box<dyn ItemBehavior>>,
    timers: HashMap<String, Box<dyn TurnActor>>,
}

impl Cast {
    /// An empty cast.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a behavior to a location, replacing any previous one.
    pub fn add_location_behavior(
        &mut self,
        location: LocationId,
        behavior: impl LocationBehavior + 'static,
    ) {
        self.locations.insert(location, Box::new(behavior));
    }

    /// Attach a behavior to an item, replacing any previous one.
    pub fn add_item_behavior(&mut self, item: ItemId, behavior: impl ItemBehavior + 'static) {
        self.items.insert(item, Box::new(behavior));
    }

    /// Add a named timer. Register it with the scheduler to make it act.
    pub fn add_timer(&mut self, name: impl Into<String>, timer: impl TurnActor + 'static) {
        self.timers.insert(name.into(), Box::new(timer));
    }

    /// The behavior of a location, plain if none was attached.
    pub fn location_mut(&mut self, location: LocationId) -> &mut Box<dyn LocationBehavior> {
        self.locations
            .entry(location)
            .or_insert_with(|| Box::new(PlainLocation))
    }

    /// The behavior of an item, if it has one.
    pub fn item_mut(&mut self, item: ItemId) -> Option<&mut Box<dyn ItemBehavior>> {
        self.items.get_mut(&item)
    }

    /// The item has a behavior.
    pub fn has_item_behavior(&self, item: ItemId) -> bool {
        self.items.contains_key(&item)
    }

    /// A named timer.
    pub fn timer_mut(&mut self, name: &str) -> Option<&mut Box<dyn TurnActor>> {
        self.timers.get_mut(name)
    }

    /// Downcast an item behavior to its concrete type.
    pub fn item_behavior<T: ItemBehavior + 'static>(&self, item: ItemId) -> Option<&T> {
        self.items.get(&item)?.as_any().downcast_ref::<T>()
    }

    /// Downcast an item behavior to its concrete type, mutably.
    pub fn item_behavior_mut<T: ItemBehavior + 'static>(&mut self, item: ItemId) -> Option<&mut T> {
        self.items.get_mut(&item)?.as_any_mut().downcast_mut::<T>()
    }
}

use hv_core::{Scope, World};

use crate::behavior::Cast;
use crate::config::EngineConfig;
use crate::dice::Dice;
use crate::narration::NarrationClient;
use crate::processor::ItemProcessorFactory;
use crate::scheduler::TurnScheduler;

/// Mutable surroundings handed to content hooks (location, item, and actor
/// behaviors) while they run.
#[derive(Debug)]
pub struct Stage<'a> {
    /// The world graph.
    pub world: &'a mut World,
    /// Actor registrations; changes apply from the next scheduling pass.
    pub scheduler: &'a mut TurnScheduler,
    /// Seeded dice.
    pub dice: &'a mut Dice,
}

impl<'a> Stage<'a> {
    /// Bundle the pieces.
    pub fn new(world: &'a mut World, scheduler: &'a mut TurnScheduler, dice: &'a mut Dice) -> Self {
        Self {
            world,
            scheduler,
            dice,
        }
    }

    /// What the player can currently refer to.
    pub fn scope(&self) -> Scope<'_> {
        Scope::new(&*self.world)
    }

    /// Borrow again for a nested call.
    pub fn reborrow(&mut self) -> Stage<'_> {
        Stage {
            world: &mut *self.world,
            scheduler: &mut *self.scheduler,
            dice: &mut *self.dice,
        }
    }
}

/// Everything an engine needs for one call.
pub struct EngineContext<'a> {
    /// The world graph.
    pub world: &'a mut World,
    /// Content behaviors.
    pub cast: &'a mut Cast,
    /// Actor registrations.
    pub scheduler: &'a mut TurnScheduler,
    /// Seeded dice.
    pub dice: &'a mut Dice,
    /// Narration client.
    pub narrator: &'a dyn NarrationClient,
    /// Verb handler chains for items.
    pub processors: &'a dyn ItemProcessorFactory,
    /// Session configuration.
    pub config: &'a EngineConfig,
}

impl std::fmt::Debug for EngineContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineContext")
            .field("world", &self.world.name)
            .field("actors", &self.scheduler.len())
            .field("narration_disabled", &self.narrator.is_disabled())
            .finish()
    }
}

impl EngineContext<'_> {
    /// The stage without the cast, for calls that do not need a behavior.
    pub fn stage(&mut self) -> Stage<'_> {
        Stage::new(&mut *self.world, &mut *self.scheduler, &mut *self.dice)
    }

    /// What the player can currently refer to.
    pub fn scope(&self) -> Scope<'_> {
        Scope::new(&*self.world)
    }

    /// Name of the player's location, for narration requests.
    pub fn location_name(&self) -> String {
        self.world
            .current_location()
            .map(|l| l.name.clone())
            .unwrap_or_default()
    }
}

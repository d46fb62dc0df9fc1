//! What the robot holds: one item at a time, kept in its compartments.

use hv_core::ItemId;
use hv_engine::{EngineResult, InteractionResult, Recipient, Stage};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Holds at most one offered item and drops anything else.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryManager {
    robot: ItemId,
    held: Option<ItemId>,
}

impl InventoryManager {
    /// Inventory for the robot item `robot`.
    pub fn new(robot: ItemId) -> Self {
        Self { robot, held: None }
    }

    /// The item the robot is holding, if it still is. The player may have
    /// taken it back since it was handed over.
    pub fn holding(&self, stage: &Stage<'_>) -> Option<ItemId> {
        self.held
            .filter(|item| stage.world.is_inside(*item, self.robot))
    }
}

impl Recipient for InventoryManager {
    fn recipient_id(&self) -> ItemId {
        self.robot
    }

    fn offer_this_thing(
        &mut self,
        item: ItemId,
        stage: &mut Stage<'_>,
    ) -> EngineResult<InteractionResult> {
        if self.holding(stage).is_some() {
            let name = stage.world.require_item(item)?.name.clone();
            stage.world.drop_here(item)?;
            return Ok(InteractionResult::positive(format!(
                "Bolt examines the {name}, shrugs, and drops it. "
            )));
        }

        stage.world.place_in_item(item, self.robot)?;
        self.held = Some(item);
        debug!(robot = %self.robot, item = %item, "robot holding item");
        Ok(InteractionResult::positive(
            "\"Neat!\" exclaims Bolt. He thanks you profusely. ",
        ))
    }
}

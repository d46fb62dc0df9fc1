//! Item processors: the verb handlers that give plain items their standard
//! responses (take, drop, open, switch on, put in).
//!
//! The dispatch engine only knows the [`ItemProcessorFactory`] seam. It asks
//! for the chain that applies to an item and tries each processor in order.

use std::fmt;

use hv_core::{Holder, Item, ItemId, Scope, World};
use tracing::debug;

use crate::error::EngineResult;
use crate::intent::{
    CLOSE_VERBS, DROP_VERBS, EXAMINE_VERBS, MultiNounIntent, OPEN_VERBS, PUT_PREPOSITIONS,
    PUT_VERBS, SimpleIntent, TAKE_VERBS, verb_in,
};
use crate::result::InteractionResult;

/// A single verb handler for items.
pub trait VerbProcessor: fmt::Debug + Send + Sync {
    /// Handle the intent for `item`, or return `None` if the verb is not
    /// this processor's.
    fn process(
        &self,
        intent: &SimpleIntent,
        item: ItemId,
        world: &mut World,
    ) -> EngineResult<Option<InteractionResult>>;
}

/// Maps an item to the ordered chain of processors that apply to it.
pub trait ItemProcessorFactory: Send + Sync {
    /// Processors for the item, most specific first.
    fn processors_for(&self, item: &Item) -> Vec<Box<dyn VerbProcessor>>;

    /// Handle a multi-noun intent no behavior claimed. The default knows
    /// how to put things in containers.
    fn process_multi(
        &self,
        intent: &MultiNounIntent,
        world: &mut World,
    ) -> EngineResult<Option<InteractionResult>> {
        put(intent, world)
    }
}

/// The standard chain, built from an item's capabilities.
#[derive(Debug, Clone)]
pub struct StandardProcessors {
    carry_limit: u32,
}

impl StandardProcessors {
    /// Standard processors enforcing the given carry limit.
    pub fn new(carry_limit: u32) -> Self {
        Self { carry_limit }
    }
}

impl Default for StandardProcessors {
    fn default() -> Self {
        Self::new(100)
    }
}

impl ItemProcessorFactory for StandardProcessors {
    fn processors_for(&self, item: &Item) -> Vec<Box<dyn VerbProcessor>> {
        let mut chain: Vec<Box<dyn VerbProcessor>> = Vec::new();
        if item.is_switchable_light() {
            chain.push(Box::new(SwitchProcessor));
        }
        if item
            .capabilities
            .container
            .as_ref()
            .is_some_and(|c| c.openable)
        {
            chain.push(Box::new(OpenCloseProcessor));
        }
        if item.is_takeable() || item.capabilities.cannot_take_message.is_some() {
            chain.push(Box::new(TakeDropProcessor {
                carry_limit: self.carry_limit,
            }));
        }
        chain.push(Box::new(ExamineProcessor));
        chain
    }
}

/// "examine", "look at": the examine text, else the description.
#[derive(Debug, Clone, Copy)]
pub struct ExamineProcessor;

impl VerbProcessor for ExamineProcessor {
    fn process(
        &self,
        intent: &SimpleIntent,
        item: ItemId,
        world: &mut World,
    ) -> EngineResult<Option<InteractionResult>> {
        if !intent.verb_is(EXAMINE_VERBS) {
            return Ok(None);
        }
        let item = world.require_item(item)?;
        let text = match (&item.capabilities.examine_text, item.description.is_empty()) {
            (Some(text), _) => text.clone(),
            (None, false) => item.description.clone(),
            (None, true) => format!("There's nothing special about the {}. ", item.name),
        };
        Ok(Some(InteractionResult::positive(text)))
    }
}

/// "take" and "drop".
#[derive(Debug, Clone, Copy)]
pub struct TakeDropProcessor {
    carry_limit: u32,
}

impl TakeDropProcessor {
    fn take(&self, id: ItemId, world: &mut World) -> EngineResult<InteractionResult> {
        let item = world.require_item(id)?;
        if world.is_held_by_player(id) {
            return Ok(InteractionResult::positive("You already have that! "));
        }
        if !item.is_takeable() {
            let message = item
                .capabilities
                .cannot_take_message
                .clone()
                .unwrap_or_else(|| "You can't take that. ".to_string());
            return Ok(InteractionResult::positive(message));
        }
        if let Holder::Item(parent) = item.holder() {
            if world.item(parent).is_some_and(|p| !p.is_open()) {
                return Ok(InteractionResult::positive(
                    "You can't reach something that's inside a closed container. ",
                ));
            }
        }

        // Taking something out of a bag the player holds does not add weight.
        let added = if world.is_carried(id) {
            0
        } else {
            world.total_weight(id)
        };
        if world.carrying_weight() + added > self.carry_limit {
            return Ok(InteractionResult::positive("Your load is too heavy. "));
        }

        world.give_to_player(id)?;
        debug!(item = %id, "taken");
        Ok(InteractionResult::positive("Taken. "))
    }

    fn drop(&self, id: ItemId, world: &mut World) -> EngineResult<InteractionResult> {
        if !world.is_carried(id) {
            return Ok(InteractionResult::positive("You don't have that! "));
        }
        world.drop_here(id)?;
        debug!(item = %id, "dropped");
        Ok(InteractionResult::positive("Dropped. "))
    }
}

impl VerbProcessor for TakeDropProcessor {
    fn process(
        &self,
        intent: &SimpleIntent,
        item: ItemId,
        world: &mut World,
    ) -> EngineResult<Option<InteractionResult>> {
        if intent.verb_is(TAKE_VERBS) {
            return self.take(item, world).map(Some);
        }
        if intent.verb_is(DROP_VERBS) {
            return self.drop(item, world).map(Some);
        }
        Ok(None)
    }
}

/// "open" and "close" for openable containers.
#[derive(Debug, Clone, Copy)]
pub struct OpenCloseProcessor;

impl VerbProcessor for OpenCloseProcessor {
    fn process(
        &self,
        intent: &SimpleIntent,
        item: ItemId,
        world: &mut World,
    ) -> EngineResult<Option<InteractionResult>> {
        let opening = intent.verb_is(OPEN_VERBS);
        if !opening && !intent.verb_is(CLOSE_VERBS) {
            return Ok(None);
        }
        let Some(container) = world.require_item_mut(item)?.capabilities.container.as_mut() else {
            return Ok(None);
        };
        let message = match (opening, container.open) {
            (true, true) => "It's already open. ",
            (false, false) => "It's already closed. ",
            (true, false) => {
                container.open = true;
                "Opened. "
            }
            (false, true) => {
                container.open = false;
                "Closed. "
            }
        };
        Ok(Some(InteractionResult::positive(message)))
    }
}

/// "turn on", "turn off" and "turn X on" for switchable light sources.
#[derive(Debug, Clone, Copy)]
pub struct SwitchProcessor;

impl VerbProcessor for SwitchProcessor {
    fn process(
        &self,
        intent: &SimpleIntent,
        item: ItemId,
        world: &mut World,
    ) -> EngineResult<Option<InteractionResult>> {
        let Some(on) = intent.switch_state() else {
            return Ok(None);
        };
        let Some(light) = world.require_item_mut(item)?.capabilities.light.as_mut() else {
            return Ok(None);
        };
        let message = match (on, light.lit) {
            (true, true) => "It's already on. ",
            (false, false) => "It's already off. ",
            (true, false) => "It is now on. ",
            (false, true) => "It is now off. ",
        };
        light.lit = on;
        Ok(Some(InteractionResult::positive(message)))
    }
}

/// "put X in Y".
pub fn put(intent: &MultiNounIntent, world: &mut World) -> EngineResult<Option<InteractionResult>> {
    if !intent.verb_is(PUT_VERBS) || !intent.preposition_is(PUT_PREPOSITIONS) {
        return Ok(None);
    }
    let scope = Scope::new(world);
    let (Some(thing), Some(target)) = (
        scope.item_in_scope(&intent.noun_one),
        scope.item_in_scope(&intent.noun_two),
    ) else {
        return Ok(None);
    };
    let thing_item = world.require_item(thing)?;
    let target_item = world.require_item(target)?;
    let Some(container) = target_item.capabilities.container.as_ref() else {
        return Ok(None);
    };

    if !world.is_carried(thing) {
        return Ok(Some(InteractionResult::positive(format!(
            "You don't have the {}. ",
            thing_item.name
        ))));
    }
    if thing == target || world.is_inside(target, thing) {
        return Ok(Some(InteractionResult::positive(format!(
            "You can't put the {} inside itself. ",
            thing_item.name
        ))));
    }
    if !container.open {
        return Ok(Some(InteractionResult::positive("It's closed. ")));
    }
    if let Some(capacity) = container.capacity {
        if world.contents_weight(target) + world.total_weight(thing) > capacity {
            return Ok(Some(InteractionResult::positive(format!(
                "There's no room in the {}. ",
                target_item.name
            ))));
        }
    }

    world.place_in_item(thing, target)?;
    debug!(item = %thing, container = %target, "put");
    Ok(Some(InteractionResult::positive("Done. ")))
}

//! The give/offer decision engine, generic over the kind of recipient.

use std::marker::PhantomData;

use hv_core::ItemId;
use tracing::debug;

use crate::context::Stage;
use crate::error::EngineResult;
use crate::intent::{GIVE_VERBS, Intent};
use crate::result::InteractionResult;

/// Something that can be offered items: a guard, a hungry creature, a robot.
pub trait Recipient {
    /// The recipient's item in the world.
    fn recipient_id(&self) -> ItemId;

    /// React to being offered an item the player holds. Accepting usually
    /// moves the item into the recipient; rejecting may throw it back.
    fn offer_this_thing(
        &mut self,
        item: ItemId,
        stage: &mut Stage<'_>,
    ) -> EngineResult<InteractionResult>;
}

/// Implements "give X to Y" and "offer Y the X" for recipients of type `T`.
///
/// Returns `Ok(None)` whenever the intent is not for this recipient, so the
/// next responder can try.
#[derive(Debug)]
pub struct GiveSomethingEngine<T> {
    _recipient: PhantomData<fn(&mut T)>,
}

impl<T> Default for GiveSomethingEngine<T> {
    fn default() -> Self {
        Self {
            _recipient: PhantomData,
        }
    }
}

impl<T: Recipient> GiveSomethingEngine<T> {
    /// Create the engine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a multi-noun intent against `recipient`.
    pub fn resolve(
        &self,
        intent: &Intent,
        recipient: &mut T,
        stage: &mut Stage<'_>,
    ) -> EngineResult<Option<InteractionResult>> {
        let multi = intent.as_multi_noun()?;
        if !multi.verb_is(GIVE_VERBS) {
            return Ok(None);
        }

        let who = stage.world.require_item(recipient.recipient_id())?;
        let thing_noun = if multi.preposition_is(&["to"]) {
            if !who.answers_to(&multi.noun_two) {
                return Ok(None);
            }
            &multi.noun_one
        } else if who.answers_to(&multi.noun_one) {
            &multi.noun_two
        } else if who.answers_to(&multi.noun_two) {
            &multi.noun_one
        } else {
            return Ok(None);
        };

        let thing = stage
            .scope()
            .item_in_scope(thing_noun)
            .or_else(|| stage.world.find_item_by_noun(thing_noun));
        let Some(thing) = thing else {
            return Ok(None);
        };

        if !stage.world.is_carried(thing) {
            let name = &stage.world.require_item(thing)?.name;
            return Ok(Some(InteractionResult::positive(format!(
                "You don't have the {name}. "
            ))));
        }

        debug!(item = %thing, recipient = %recipient.recipient_id(), "offering item");
        recipient.offer_this_thing(thing, stage).map(Some)
    }
}

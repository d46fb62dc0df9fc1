//! Sub-location engine: boarding and leaving vessels.
//!
//! A vessel is an item with a [`Vessel`](hv_core::Vessel) record. While the
//! player occupies one, the current location's sub-location pointer names
//! it and its contents join the scope.

use tracing::{debug, info};

use crate::context::EngineContext;
use crate::error::{EngineError, EngineResult};
use crate::intent::Intent;
use crate::narration::{NarrationRequest, narrate};
use crate::result::InteractionResult;

/// Said when something sharp ruins an inflatable on the way in.
pub const PUNCTURED: &str = "Oops! Something sharp seems to have slipped and punctured the boat. \
                             The boat deflates to the sounds of hissing, sputtering, and cursing. ";

/// Said after leaving a vessel.
pub const DISEMBARKED: &str = "You are on your own feet again. ";

/// Resolve "get in X".
///
/// Checks run in order and all precede the first mutation: resolvable
/// vessel, already aboard, punctured, deflated, on the floor, sharp objects.
pub async fn resolve_enter(
    intent: &Intent,
    ctx: &mut EngineContext<'_>,
) -> EngineResult<InteractionResult> {
    let noun = intent.as_enter()?.noun.trim();
    if noun.is_empty() {
        return Err(EngineError::EmptyNoun);
    }

    let found = ctx
        .scope()
        .item_in_scope(noun)
        .and_then(|id| ctx.world.item(id))
        .and_then(|item| {
            let vessel = item.capabilities.vessel.clone()?;
            Some((item.id, item.name.clone(), vessel))
        });
    let Some((id, name, vessel)) = found else {
        let request = NarrationRequest::CannotBoard {
            location: ctx.location_name(),
            noun: noun.to_string(),
        };
        let message = narrate(ctx.narrator, request, "").await?;
        return Ok(InteractionResult::positive(message));
    };

    if ctx.world.sub_location() == Some(id) {
        return Ok(InteractionResult::positive(format!(
            "You are already in the {}. ",
            vessel.vessel_name
        )));
    }
    if vessel.punctured {
        return Ok(InteractionResult::positive(format!(
            "You have a theory on how to board a {}, perhaps? ",
            vessel.punctured_name
        )));
    }
    if vessel.inflatable && !vessel.inflated {
        return Ok(InteractionResult::positive(format!(
            "You have a theory on how to board a {}, perhaps? ",
            vessel.ground_name
        )));
    }
    if !ctx.world.items_in_location(ctx.world.player().location()).contains(&id) {
        return Ok(InteractionResult::positive(format!(
            "You'll have to put the {name} down first. "
        )));
    }

    let sharp = ctx
        .world
        .inventory()
        .iter()
        .any(|i| ctx.world.item(*i).is_some_and(|item| item.is_pointy()));
    if sharp && vessel.inflatable {
        if let Some(record) = ctx.world.require_item_mut(id)?.capabilities.vessel.as_mut() {
            record.punctured = true;
            record.inflated = false;
        }
        info!(vessel = %id, "vessel punctured on boarding");
        return Ok(InteractionResult::positive(PUNCTURED));
    }

    ctx.world.board(id)?;
    debug!(vessel = %id, "boarded");
    Ok(InteractionResult::positive(format!(
        "You are now in the {}. ",
        vessel.vessel_name
    )))
}

/// Resolve "get out of X" or "disembark X".
///
/// "out" commonly lands in the first noun, so the second is tried when the
/// first does not resolve.
pub async fn resolve_exit(
    intent: &Intent,
    ctx: &mut EngineContext<'_>,
) -> EngineResult<InteractionResult> {
    let exit = intent.as_exit()?;
    if exit.noun_one.trim().is_empty() && exit.noun_two.trim().is_empty() {
        return Err(EngineError::EmptyNoun);
    }
    let scope = ctx.scope();
    let resolved = scope
        .item_in_scope(&exit.noun_one)
        .or_else(|| scope.item_in_scope(&exit.noun_two))
        .filter(|id| ctx.world.item(*id).is_some_and(|i| i.is_vessel()));

    let Some(vessel) = resolved else {
        let noun = if exit.noun_two.trim().is_empty() {
            exit.noun_one.clone()
        } else {
            exit.noun_two.clone()
        };
        let request = NarrationRequest::CannotDisembark {
            location: ctx.location_name(),
            noun,
        };
        let message = narrate(ctx.narrator, request, "").await?;
        return Ok(InteractionResult::positive(message));
    };

    if ctx.world.sub_location() != Some(vessel) {
        let name = ctx
            .world
            .require_item(vessel)?
            .capabilities
            .vessel
            .as_ref()
            .map(|v| v.vessel_name.clone())
            .unwrap_or_default();
        return Ok(InteractionResult::positive(format!("You're not in the {name}. ")));
    }
    if let Some(hazard) = ctx.world.current_location()?.exit_hazard.clone() {
        debug!(vessel = %vessel, "exit blocked by hazard");
        return Ok(InteractionResult::positive(hazard));
    }

    ctx.world.disembark();
    debug!(vessel = %vessel, "disembarked");
    Ok(InteractionResult::positive(DISEMBARKED))
}

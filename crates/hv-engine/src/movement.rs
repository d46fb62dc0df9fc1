//! Movement engine: directional travel between locations.

use hv_core::{CoreError, Exit, LocationId, Passage};
use tracing::{debug, info};

use crate::context::{EngineContext, Stage};
use crate::error::EngineResult;
use crate::intent::Intent;
use crate::narration::{CANNOT_GO, NarrationRequest, narrate};
use crate::result::InteractionResult;

/// What a location says about leaving in one direction.
#[derive(Debug, Clone, PartialEq)]
pub struct MovementParameters {
    /// Where the player ends up. `None` is a dead end.
    pub destination: Option<LocationId>,
    /// Carrying more than this blocks the move.
    pub weight_limit: Option<u32>,
    /// Said, verbatim, when the weight limit blocks the move.
    pub weight_message: String,
    /// The passability predicate. `None` is always passable.
    pub can_go: Option<Passage>,
    /// Said when the predicate fails. `None` falls back to the canonical line.
    pub failure_message: Option<String>,
}

impl MovementParameters {
    /// An unconditional move.
    pub fn to(destination: LocationId) -> Self {
        Self {
            destination: Some(destination),
            weight_limit: None,
            weight_message: String::new(),
            can_go: None,
            failure_message: None,
        }
    }
}

impl From<&Exit> for MovementParameters {
    fn from(exit: &Exit) -> Self {
        Self {
            destination: exit.destination,
            weight_limit: exit.weight_limit,
            weight_message: exit.weight_message.clone(),
            can_go: exit.passage.clone(),
            failure_message: exit.failure_message.clone(),
        }
    }
}

/// Resolve a move intent.
///
/// Checks run in order: no exit, weight, passability. Any failure leaves the
/// world untouched. Only a successful move mutates, and then runs the full
/// transition: leave hook, relocation, arrival hooks.
pub async fn resolve_move(
    intent: &Intent,
    ctx: &mut EngineContext<'_>,
) -> EngineResult<InteractionResult> {
    let direction = intent.as_move()?.direction;
    let origin = ctx.world.player().location();
    let location = ctx.world.current_location()?;
    let parameters = ctx.cast.location_mut(origin).navigate(direction, location);

    let Some(parameters) = parameters else {
        return cannot_go(ctx, direction.name()).await;
    };

    if let Some(limit) = parameters.weight_limit {
        let carrying = ctx.world.carrying_weight();
        if limit < carrying {
            debug!(%direction, limit, carrying, "move blocked by weight");
            return Ok(InteractionResult::positive(parameters.weight_message));
        }
    }

    let passable = parameters
        .can_go
        .as_ref()
        .is_none_or(|p| p.allows(&*ctx.world));
    let destination = match parameters.destination {
        Some(destination) if passable => destination,
        _ => {
            return match parameters.failure_message {
                Some(message) => Ok(InteractionResult::positive(message).terminated()),
                None => cannot_go(ctx, direction.name()).await,
            };
        }
    };
    if ctx.world.location(destination).is_none() {
        return Err(CoreError::LocationNotFound(destination).into());
    }

    let player = ctx.world.player_mut();
    player.last_direction = Some(direction);
    player.last_noun = None;

    {
        let mut stage = Stage::new(&mut *ctx.world, &mut *ctx.scheduler, &mut *ctx.dice);
        ctx.cast
            .location_mut(origin)
            .on_leave(&mut stage, destination)?;
    }

    ctx.world.move_player(destination)?;
    if let Some(arrived) = ctx.world.location_mut(destination) {
        arrived.visit_count += 1;
    }
    info!(%direction, to = %destination, "player moved");

    let mut stage = Stage::new(&mut *ctx.world, &mut *ctx.scheduler, &mut *ctx.dice);
    let behavior = ctx.cast.location_mut(destination);
    let before = behavior.before_enter(&mut stage)?;
    let after = behavior.after_enter(&mut stage, ctx.narrator).await?;

    Ok(InteractionResult::positive(before + &after).terminated())
}

/// The "you cannot go that way" line: sometimes generated, usually canonical.
async fn cannot_go(
    ctx: &mut EngineContext<'_>,
    direction: &str,
) -> EngineResult<InteractionResult> {
    let flavor = ctx.dice.roll_success(ctx.config.cannot_go_flavor_odds);
    let message = if flavor {
        let request = NarrationRequest::CannotGoThatWay {
            location: ctx.location_name(),
            direction: direction.to_string(),
        };
        narrate(ctx.narrator, request, "").await?
    } else {
        CANNOT_GO.to_string()
    };
    Ok(InteractionResult::positive(message).terminated())
}

use hv_core::World;
use tracing::{debug, info};

use crate::behavior::Cast;
use crate::config::EngineConfig;
use crate::context::{EngineContext, Stage};
use crate::dice::Dice;
use crate::dispatch::{resolve_multi, resolve_null, resolve_simple};
use crate::error::EngineResult;
use crate::intent::Intent;
use crate::movement::resolve_move;
use crate::narration::{DisabledNarrator, NarrationClient};
use crate::processor::{ItemProcessorFactory, StandardProcessors};
use crate::result::{Disambiguation, InteractionResult};
use crate::scheduler::{ActorId, TurnScheduler, run_pass};
use crate::sub_location::{resolve_enter, resolve_exit};

/// Everything one player command produced.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnOutcome {
    /// The intent's narration followed by every actor's output.
    pub narration: String,
    /// The intent's own result.
    pub result: InteractionResult,
    /// Whether the turn counter advanced and the actors ran.
    pub turn_consumed: bool,
}

/// The top-level game orchestrator.
///
/// Owns the world, the cast, the scheduler, the dice and the collaborators.
/// A turn resolves one intent completely, then advances every registered
/// actor once. Nothing else mutates the world between turns.
pub struct Game {
    world: World,
    cast: Cast,
    scheduler: TurnScheduler,
    dice: Dice,
    narrator: Box<dyn NarrationClient>,
    processors: Box<dyn ItemProcessorFactory>,
    config: EngineConfig,
    pending: Option<Disambiguation>,
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("world", &self.world.name)
            .field("moves", &self.world.player().moves)
            .field("actors", &self.scheduler.len())
            .field("pending", &self.pending.is_some())
            .finish()
    }
}

impl Game {
    /// Create a game with narration disabled and the standard processors.
    pub fn new(world: World, config: EngineConfig) -> Self {
        Self {
            world,
            cast: Cast::new(),
            scheduler: TurnScheduler::new(),
            dice: Dice::seeded(config.seed),
            narrator: Box::new(DisabledNarrator),
            processors: Box::new(StandardProcessors::new(config.carry_limit)),
            config,
            pending: None,
        }
    }

    /// Use a different narration client.
    pub fn with_narrator(mut self, narrator: impl NarrationClient + 'static) -> Self {
        self.narrator = Box::new(narrator);
        self
    }

    /// Use a different processor factory.
    pub fn with_processors(mut self, processors: impl ItemProcessorFactory + 'static) -> Self {
        self.processors = Box::new(processors);
        self
    }

    /// Use a different cast.
    pub fn with_cast(mut self, cast: Cast) -> Self {
        self.cast = cast;
        self
    }

    /// Read access to the world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Write access to the world.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Consume the game, returning the final world.
    pub fn into_world(self) -> World {
        self.world
    }

    /// The registered behaviors.
    pub fn cast(&self) -> &Cast {
        &self.cast
    }

    /// The registered behaviors, mutably.
    pub fn cast_mut(&mut self) -> &mut Cast {
        &mut self.cast
    }

    /// The turn scheduler.
    pub fn scheduler(&self) -> &TurnScheduler {
        &self.scheduler
    }

    /// The dice, for forcing outcomes.
    pub fn dice_mut(&mut self) -> &mut Dice {
        &mut self.dice
    }

    /// The session configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The question asked by the last turn, if it was a disambiguation.
    pub fn pending_disambiguation(&self) -> Option<&Disambiguation> {
        self.pending.as_ref()
    }

    /// Register a turn actor.
    pub fn register_actor(&mut self, actor: ActorId) -> bool {
        self.scheduler.register(actor)
    }

    /// Remove a turn actor.
    pub fn remove_actor(&mut self, actor: &ActorId) -> bool {
        self.scheduler.remove(actor)
    }

    fn context(&mut self) -> EngineContext<'_> {
        EngineContext {
            world: &mut self.world,
            cast: &mut self.cast,
            scheduler: &mut self.scheduler,
            dice: &mut self.dice,
            narrator: self.narrator.as_ref(),
            processors: self.processors.as_ref(),
            config: &self.config,
        }
    }

    /// Resolve one intent without advancing the actors.
    pub async fn interact(&mut self, intent: &Intent) -> EngineResult<InteractionResult> {
        let mut ctx = self.context();
        match intent {
            Intent::Simple(_) => resolve_simple(intent, &mut ctx).await,
            Intent::MultiNoun(_) => resolve_multi(intent, &mut ctx).await,
            Intent::Move(_) => resolve_move(intent, &mut ctx).await,
            Intent::EnterSubLocation(_) => resolve_enter(intent, &mut ctx).await,
            Intent::ExitSubLocation(_) => resolve_exit(intent, &mut ctx).await,
            Intent::Null => resolve_null(&mut ctx).await,
        }
    }

    /// Run one scheduling pass.
    pub fn run_actors(&mut self) -> EngineResult<Vec<String>> {
        let mut stage = Stage::new(&mut self.world, &mut self.scheduler, &mut self.dice);
        run_pass(&mut self.cast, &mut stage)
    }

    /// Play one full turn: resolve the intent, then, if it cost a turn,
    /// advance the move counter and every registered actor.
    pub async fn turn(&mut self, intent: &Intent) -> EngineResult<TurnOutcome> {
        debug!(kind = %intent.kind(), "turn started");
        let result = self.interact(intent).await?;
        self.pending = result.disambiguation_payload().cloned();

        let mut pieces = Vec::new();
        if !result.message.is_empty() {
            pieces.push(result.message.clone());
        }
        let turn_consumed = result.consumes_turn;
        if turn_consumed {
            self.world.player_mut().moves += 1;
            pieces.extend(self.run_actors()?);
        }

        info!(
            moves = self.world.player().moves,
            consumed = turn_consumed,
            "turn complete"
        );
        Ok(TurnOutcome {
            narration: pieces.join(&self.config.turn_separator),
            result,
            turn_consumed,
        })
    }

    /// Turn the player's answer to the last disambiguation question into the
    /// command they meant. The question stays open if the answer does not fit.
    pub fn resolve_disambiguation(&mut self, answer: &str) -> Option<Intent> {
        let pending = self.pending.as_ref()?;
        let noun = pending.resolve_noun(answer)?.to_string();
        let verb = pending.verb().to_string();
        self.pending = None;
        Some(Intent::simple(verb, noun))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::narration::FixedNarrator;
    use crate::scheduler::TurnActor;
    use hv_core::{Direction, Exit, Item, Location};

    #[derive(Debug)]
    struct Drip {
        drops: u32,
    }

    impl TurnActor for Drip {
        fn act(&mut self, _stage: &mut Stage<'_>) -> EngineResult<String> {
            self.drops += 1;
            Ok(format!("Drip ({}).", self.drops))
        }
    }

    fn cave() -> Game {
        let mut world = World::new("test", Location::new("Grotto"));
        let here = world.player().location();
        world
            .add_item_to_location(
                Item::new("red candle", &["candle", "red candle", "red"])
                    .with_precise_nouns(&["red candle", "red"])
                    .takeable(1),
                here,
            )
            .unwrap();
        world
            .add_item_to_location(
                Item::new("blue candle", &["candle", "blue candle", "blue"])
                    .with_precise_nouns(&["blue candle", "blue"])
                    .takeable(1),
                here,
            )
            .unwrap();
        let mut game = Game::new(world, EngineConfig::default());
        game.cast_mut().add_timer("drip", Drip { drops: 0 });
        game.register_actor(ActorId::named("drip"));
        game
    }

    #[tokio::test]
    async fn turn_appends_actor_output() {
        let mut game = cave();
        let outcome = game.turn(&Intent::simple("take", "red")).await.unwrap();
        assert_eq!(outcome.narration, "Taken. \n\nDrip (1).");
        assert!(outcome.turn_consumed);
        assert_eq!(game.world().player().moves, 1);
    }

    #[tokio::test]
    async fn disambiguation_costs_no_turn_and_resolves() {
        let mut game = cave();

        let outcome = game.turn(&Intent::simple("take", "candle")).await.unwrap();
        assert!(!outcome.turn_consumed);
        assert_eq!(game.world().player().moves, 0);
        assert!(
            outcome
                .narration
                .starts_with("Do you mean the red candle or the blue candle?")
        );

        assert_eq!(game.resolve_disambiguation("green"), None);
        assert!(game.pending_disambiguation().is_some());

        let intent = game.resolve_disambiguation("Blue").unwrap();
        assert_eq!(intent, Intent::simple("take", "blue candle"));
        assert!(game.pending_disambiguation().is_none());

        let outcome = game.turn(&intent).await.unwrap();
        assert_eq!(outcome.result.message, "Taken. \n");
        assert_eq!(outcome.narration, "Taken. \n\nDrip (1).");
    }

    #[tokio::test]
    async fn routes_every_intent_kind() {
        let mut world = World::new("test", Location::new("Porch"));
        let yard = world.add_location(Location::new("Yard"));
        let porch = world.player().location();
        if let Some(l) = world.location_mut(porch) {
            l.exits.insert(Direction::South, Exit::to(yard));
        }
        let mut game = Game::new(world, EngineConfig::default())
            .with_narrator(FixedNarrator::new("The wind howls."));

        let outcome = game.turn(&Intent::go(Direction::South)).await.unwrap();
        assert_eq!(outcome.narration, "Yard\nThe wind howls.\n");

        let outcome = game.turn(&Intent::Null).await.unwrap();
        assert_eq!(outcome.narration, "The wind howls.");

        let outcome = game.turn(&Intent::enter("hammock")).await.unwrap();
        assert_eq!(outcome.narration, "The wind howls.");

        let outcome = game.turn(&Intent::exit("out", "hammock")).await.unwrap();
        assert_eq!(outcome.narration, "The wind howls.");

        assert_eq!(game.world().player().moves, 4);
    }

    #[tokio::test]
    async fn contract_errors_stop_the_turn() {
        let mut game = cave();
        let err = game.turn(&Intent::enter("")).await.unwrap_err();
        assert!(matches!(err, crate::error::EngineError::EmptyNoun));
        assert_eq!(game.world().player().moves, 0);
    }
}

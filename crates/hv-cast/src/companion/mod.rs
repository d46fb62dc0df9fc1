//! The companion robot.
//!
//! Split into a power manager (switch and first boot), an inventory
//! manager (what it holds), and a social manager (idle chatter). The
//! behavior here only routes intents and turns to the right manager.

pub mod inventory;
pub mod power;
pub mod social;

pub use inventory::InventoryManager;
pub use power::PowerManager;
pub use social::SocialManager;

use std::any::Any;

use hv_core::ItemId;
use hv_engine::{EngineResult, GiveSomethingEngine, Intent, InteractionResult, ItemBehavior, Stage};

/// Nouns the robot answers to.
pub const ROBOT_NOUNS: &[&str] = &["bolt", "robot", "b-19-7", "multi-purpose robot"];

const ON_VERBS: &[&str] = &["turn on", "activate", "start"];
const OFF_VERBS: &[&str] = &["turn off", "deactivate", "stop"];

/// Item behavior for the robot. Register it with the scheduler as
/// `ActorId::Item(robot)`; it acts every turn.
#[derive(Debug)]
pub struct RobotBehavior {
    robot: ItemId,
    power: PowerManager,
    inventory: InventoryManager,
    social: SocialManager,
    giver: GiveSomethingEngine<InventoryManager>,
}

impl RobotBehavior {
    /// Behavior for the robot item `robot`, switched off.
    pub fn new(robot: ItemId) -> Self {
        Self {
            robot,
            power: PowerManager::new(),
            inventory: InventoryManager::new(robot),
            social: SocialManager::new(),
            giver: GiveSomethingEngine::new(),
        }
    }

    /// Replace the social manager.
    pub fn with_social(mut self, social: SocialManager) -> Self {
        self.social = social;
        self
    }

    /// The power manager.
    pub fn power(&self) -> &PowerManager {
        &self.power
    }

    /// The inventory manager.
    pub fn inventory(&self) -> &InventoryManager {
        &self.inventory
    }

    fn is_here(&self, stage: &Stage<'_>) -> bool {
        stage.world.location_of(self.robot) == Some(stage.world.player().location())
    }
}

impl ItemBehavior for RobotBehavior {
    fn respond_to_simple(
        &mut self,
        intent: &Intent,
        _stage: &mut Stage<'_>,
    ) -> EngineResult<Option<InteractionResult>> {
        let simple = intent.as_simple()?;
        let wanted = if simple.verb_is(ON_VERBS) {
            Some(true)
        } else if simple.verb_is(OFF_VERBS) {
            Some(false)
        } else {
            simple.switch_state()
        };
        let message = match wanted {
            Some(true) => self.power.activate(),
            Some(false) => self.power.deactivate(),
            None => return Ok(None),
        };
        Ok(Some(InteractionResult::positive(message)))
    }

    fn respond_to_multi(
        &mut self,
        intent: &Intent,
        stage: &mut Stage<'_>,
    ) -> EngineResult<Option<InteractionResult>> {
        if !self.power.is_on() {
            return Ok(None);
        }
        self.giver.resolve(intent, &mut self.inventory, stage)
    }

    fn act(&mut self, stage: &mut Stage<'_>) -> EngineResult<String> {
        if let Some(greeting) = self.power.tick() {
            return Ok(greeting.to_string());
        }
        if !self.power.is_on() || !self.is_here(stage) {
            return Ok(String::new());
        }
        Ok(self
            .social
            .chatter(stage.dice)
            .map(str::to_string)
            .unwrap_or_default())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hv_core::{Holder, Item, Location, World};
    use hv_engine::{ActorId, Cast, Dice, SimpleIntent, TurnScheduler};

    struct Workshop {
        world: World,
        scheduler: TurnScheduler,
        dice: Dice,
        cast: Cast,
        robot: ItemId,
    }

    impl Workshop {
        fn new() -> Self {
            let mut world = World::new("test", Location::new("Robot Shop"));
            let here = world.player().location();
            let robot = world
                .add_item_to_location(Item::new("robot", ROBOT_NOUNS).person(&[]), here)
                .unwrap();
            let mut cast = Cast::new();
            cast.add_item_behavior(
                robot,
                RobotBehavior::new(robot).with_social(SocialManager::new().with_odds(1)),
            );
            let mut scheduler = TurnScheduler::new();
            scheduler.register(ActorId::Item(robot));
            Self {
                world,
                scheduler,
                dice: Dice::seeded(5),
                cast,
                robot,
            }
        }

        fn simple(&mut self, intent: Intent) -> Option<InteractionResult> {
            let mut stage = Stage::new(&mut self.world, &mut self.scheduler, &mut self.dice);
            let behavior = self.cast.item_mut(self.robot).unwrap();
            behavior.respond_to_simple(&intent, &mut stage).unwrap()
        }

        fn multi(&mut self, intent: Intent) -> Option<InteractionResult> {
            let mut stage = Stage::new(&mut self.world, &mut self.scheduler, &mut self.dice);
            let behavior = self.cast.item_mut(self.robot).unwrap();
            behavior.respond_to_multi(&intent, &mut stage).unwrap()
        }

        fn tick(&mut self) -> Vec<String> {
            let mut stage = Stage::new(&mut self.world, &mut self.scheduler, &mut self.dice);
            hv_engine::scheduler::run_pass(&mut self.cast, &mut stage).unwrap()
        }

        fn boot(&mut self) {
            self.simple(Intent::simple("turn on", "robot"));
            for _ in 0..power::FIRST_BOOT_TURNS {
                self.tick();
            }
        }
    }

    #[test]
    fn switched_off_robot_is_quiet_and_ignores_gifts() {
        let mut shop = Workshop::new();
        let gear = shop
            .world
            .add_item_to_player(Item::new("gear", &["gear"]).takeable(1))
            .unwrap();

        assert!(shop.tick().is_empty());
        assert!(shop.multi(Intent::multi("give", "gear", "to", "robot")).is_none());
        assert!(shop.world.is_carried(gear));
    }

    #[test]
    fn boots_after_three_turns() {
        let mut shop = Workshop::new();
        let r = shop.simple(Intent::simple("activate", "bolt")).unwrap();
        assert!(r.message.contains("Nothing seems to happen"));

        assert!(shop.tick().is_empty());
        assert!(shop.tick().is_empty());
        assert_eq!(shop.tick(), vec![power::COMES_ALIVE.to_string()]);

        let said = shop.tick();
        assert_eq!(said.len(), 1);
        assert!(social::IDLE_ACTIONS.contains(&said[0].as_str()));
    }

    #[test]
    fn holds_one_item_and_drops_the_rest() {
        let mut shop = Workshop::new();
        let here = shop.world.player().location();
        shop.boot();
        let gear = shop
            .world
            .add_item_to_player(Item::new("gear", &["gear"]).takeable(1))
            .unwrap();
        let spring = shop
            .world
            .add_item_to_player(Item::new("spring", &["spring"]).takeable(1))
            .unwrap();

        let r = shop.multi(Intent::multi("give", "gear", "to", "robot")).unwrap();
        assert!(r.message.contains("Neat!"));
        assert_eq!(shop.world.holder_of(gear), Some(Holder::Item(shop.robot)));

        let r = shop.multi(Intent::multi("give", "spring", "to", "robot")).unwrap();
        assert_eq!(r.message, "Bolt examines the spring, shrugs, and drops it. ");
        assert_eq!(shop.world.holder_of(spring), Some(Holder::Location(here)));
        shop.world.check_containment().unwrap();
    }

    #[test]
    fn taking_back_the_held_item_frees_the_hand() {
        let mut shop = Workshop::new();
        shop.boot();
        let gear = shop
            .world
            .add_item_to_player(Item::new("gear", &["gear"]).takeable(1))
            .unwrap();
        shop.multi(Intent::multi("give", "gear", "to", "robot"));
        shop.world.give_to_player(gear).unwrap();

        let r = shop.multi(Intent::multi("give", "gear", "to", "robot")).unwrap();
        assert!(r.message.contains("Neat!"));
        let behavior = shop.cast.item_behavior::<RobotBehavior>(shop.robot).unwrap();
        let mut scheduler = TurnScheduler::new();
        let mut dice = Dice::seeded(1);
        let stage = Stage::new(&mut shop.world, &mut scheduler, &mut dice);
        assert_eq!(behavior.inventory().holding(&stage), Some(gear));
    }

    #[test]
    fn switch_off_and_on_again() {
        let mut shop = Workshop::new();
        shop.boot();

        let turn_off = SimpleIntent::new("turn", "robot").with_adverb("off");
        let r = shop.simple(Intent::Simple(turn_off)).unwrap();
        assert!(r.message.contains("betrayal"));
        assert!(shop.tick().is_empty());

        let r = shop.simple(Intent::simple("turn on", "robot")).unwrap();
        assert!(r.message.contains("hopping mad"));
        assert!(shop.simple(Intent::simple("kick", "robot")).is_none());
    }
}

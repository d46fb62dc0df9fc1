//! Whole-turn scenarios: the reference cast played through [`Game`].

use hv_cast::boat::ON_THE_GROUND;
use hv_cast::companion::power::COMES_ALIVE;
use hv_cast::creature::{ASLEEP, CYCLOPS_NOUNS};
use hv_cast::guard::DEAD;
use hv_cast::lamp::{EXHAUSTED, LIFETIME, WONT_LIGHT};
use hv_cast::{
    BoatBehavior, Cyclops, CyclopsBehavior, LampBattery, LampBehavior, RobotBehavior, Troll,
    TrollBehavior, TrollRoom,
};
use hv_core::{Direction, Exit, Holder, Item, ItemId, Location, LocationId, Vessel, World};
use hv_engine::sub_location::PUNCTURED;
use hv_engine::{ActorId, Cast, EngineConfig, Game, Intent};

struct TrollScene {
    game: Game,
    troll: ItemId,
    axe: ItemId,
    passage: LocationId,
}

fn troll_scene(carry: &[Item]) -> TrollScene {
    let passage = Location::new("East-West Passage");
    let cellar = Location::new("Cellar");
    let passage_id = passage.id;
    let room = Location::new("Troll Room")
        .with_exit(Direction::North, Exit::to(passage.id))
        .with_exit(Direction::West, Exit::to(cellar.id));
    let room_id = room.id;

    let mut world = World::new("hollowvale", room);
    world.add_location(passage);
    world.add_location(cellar);
    let troll = world
        .add_item_to_location(Item::new("troll", &["troll"]).person(&[]), room_id)
        .unwrap();
    let axe = world
        .add_item_to_item(
            Item::new("bloody axe", &["axe", "bloody axe"]).takeable(25).weapon(),
            troll,
        )
        .unwrap();
    for item in carry {
        world.add_item_to_player(item.clone()).unwrap();
    }

    let mut cast = Cast::new();
    cast.add_item_behavior(troll, TrollBehavior::new(Troll::new(troll, axe)));
    cast.add_location_behavior(room_id, TrollRoom::new(troll, Direction::West));

    TrollScene {
        game: Game::new(world, EngineConfig::default()).with_cast(cast),
        troll,
        axe,
        passage: passage_id,
    }
}

fn sword() -> Item {
    Item::new("elvish sword", &["sword", "elvish sword"])
        .takeable(10)
        .weapon()
        .pointy()
}

#[tokio::test]
async fn troll_bars_the_way_until_it_dies() {
    let mut scene = troll_scene(&[sword()]);

    let out = scene.game.turn(&Intent::go(Direction::North)).await.unwrap();
    assert!(out.narration.contains("fends you off"));
    assert!(out.turn_consumed);

    // Roll 2 on the blow table is fatal.
    scene.game.dice_mut().force(&[2]);
    let out = scene
        .game
        .turn(&Intent::multi("kill", "troll", "with", "sword"))
        .await
        .unwrap();
    assert!(out.narration.contains("fatal blow"));
    assert!(scene.game.world().item(scene.troll).unwrap().flag(DEAD));
    let here = scene.game.world().player().location();
    assert_eq!(scene.game.world().holder_of(scene.axe), Some(Holder::Location(here)));

    scene.game.turn(&Intent::go(Direction::North)).await.unwrap();
    assert_eq!(scene.game.world().player().location(), scene.passage);
    scene.game.world().check_containment().unwrap();
}

#[tokio::test]
async fn giving_an_item_on_the_floor_is_refused() {
    let mut scene = troll_scene(&[]);
    let here = scene.game.world().player().location();
    scene.game.world_mut().place_in_location(scene.axe, here).unwrap();

    let out = scene
        .game
        .turn(&Intent::multi("give", "axe", "to", "troll"))
        .await
        .unwrap();
    insta::assert_snapshot!(out.narration.trim_end(), @"You don't have the bloody axe.");
    assert!(scene.game.world().contents_of(scene.troll).is_empty());
}

#[tokio::test]
async fn axe_goes_back_to_the_troll_and_can_be_recovered() {
    let mut scene = troll_scene(&[sword()]);
    scene.game.world_mut().give_to_player(scene.axe).unwrap();

    let out = scene
        .game
        .turn(&Intent::multi("give", "axe", "to", "troll"))
        .await
        .unwrap();
    assert!(out.narration.contains("takes the axe"));
    assert_eq!(
        scene.game.world().holder_of(scene.axe),
        Some(Holder::Item(scene.troll))
    );

    scene.game.dice_mut().force(&[9]);
    scene
        .game
        .turn(&Intent::multi("attack", "troll", "with", "sword"))
        .await
        .unwrap();
    let out = scene.game.turn(&Intent::simple("take", "axe")).await.unwrap();
    assert!(out.narration.starts_with("Taken."));
    assert!(scene.game.world().is_held_by_player(scene.axe));
    scene.game.world().check_containment().unwrap();
}

#[tokio::test]
async fn non_weapon_attack_falls_through() {
    let lunch = Item::new("lunch", &["lunch"]).takeable(2);
    let mut scene = troll_scene(&[sword(), lunch]);

    let out = scene
        .game
        .turn(&Intent::multi("kill", "troll", "with", "lunch"))
        .await
        .unwrap();
    assert!(out.result.is_no_verb_match());
    assert!(!scene.game.world().item(scene.troll).unwrap().flag(DEAD));
}

struct Shore {
    game: Game,
    boat: ItemId,
    pump: ItemId,
    sword: ItemId,
}

fn shore() -> Shore {
    let mut world = World::new("hollowvale", Location::new("Dam Base"));
    let here = world.player().location();
    let boat = world
        .add_item_to_location(
            Item::new("magic boat", &["boat", "plastic", "pile"]).vessel(Vessel::inflatable(
                "magic boat",
                "pile of plastic",
                "punctured boat",
            )),
            here,
        )
        .unwrap();
    let pump = world
        .add_item_to_location(Item::new("air pump", &["pump", "air pump"]).takeable(5), here)
        .unwrap();
    let glue = world
        .add_item_to_player(Item::new("viscous material", &["glue", "material"]).takeable(1))
        .unwrap();
    let sword = world.add_item_to_player(sword()).unwrap();

    let mut cast = Cast::new();
    cast.add_item_behavior(boat, BoatBehavior::new(boat, pump, glue));
    Shore {
        game: Game::new(world, EngineConfig::default()).with_cast(cast),
        boat,
        pump,
        sword,
    }
}

#[tokio::test]
async fn deflated_boat_cannot_be_boarded() {
    let mut shore = shore();
    let out = shore.game.turn(&Intent::enter("boat")).await.unwrap();
    assert!(out.narration.contains("pile of plastic"));
    assert_eq!(shore.game.world().sub_location(), None);
}

#[tokio::test]
async fn sharp_objects_puncture_and_glue_repairs() {
    let mut shore = shore();

    let out = shore
        .game
        .turn(&Intent::multi("inflate", "boat", "with", "pump"))
        .await
        .unwrap();
    assert!(out.narration.contains("air pump"));
    shore.game.turn(&Intent::simple("take", "pump")).await.unwrap();
    let out = shore
        .game
        .turn(&Intent::multi("inflate", "boat", "with", "pump"))
        .await
        .unwrap();
    assert!(out.narration.contains("seaworthy"));

    let out = shore.game.turn(&Intent::enter("boat")).await.unwrap();
    assert!(out.narration.starts_with(PUNCTURED));
    let vessel = shore.game.world().item(shore.boat).unwrap().capabilities.vessel.clone();
    assert!(vessel.is_some_and(|v| v.punctured && !v.inflated));

    let out = shore
        .game
        .turn(&Intent::multi("apply", "glue", "to", "puncture"))
        .await
        .unwrap();
    assert!(out.narration.contains("repaired"));
    shore.game.turn(&Intent::simple("drop", "sword")).await.unwrap();
    assert!(!shore.game.world().is_carried(shore.sword));
    shore
        .game
        .turn(&Intent::multi("inflate", "boat", "with", "pump"))
        .await
        .unwrap();

    let out = shore.game.turn(&Intent::enter("boat")).await.unwrap();
    assert!(out.narration.contains("You are now in the magic boat."));
    assert_eq!(shore.game.world().sub_location(), Some(shore.boat));
}

#[tokio::test]
async fn carried_boat_must_go_down_first() {
    let mut shore = shore();
    shore.game.world_mut().give_to_player(shore.pump).unwrap();
    shore.game.world_mut().give_to_player(shore.boat).unwrap();

    let out = shore
        .game
        .turn(&Intent::multi("inflate", "boat", "with", "pump"))
        .await
        .unwrap();
    assert!(out.narration.starts_with(ON_THE_GROUND));
}

#[tokio::test]
async fn heavy_loads_are_refused() {
    let mut world = World::new("hollowvale", Location::new("Attic"));
    let here = world.player().location();
    world
        .add_item_to_player(Item::new("brick", &["brick"]).takeable(8))
        .unwrap();
    let anvil = world
        .add_item_to_location(Item::new("anvil", &["anvil"]).takeable(5), here)
        .unwrap();
    let mut game = Game::new(world, EngineConfig::default().with_carry_limit(10));

    let out = game.turn(&Intent::simple("take", "anvil")).await.unwrap();
    assert!(out.narration.starts_with("Your load is too heavy."));
    assert!(!game.world().is_carried(anvil));

    game.turn(&Intent::simple("drop", "brick")).await.unwrap();
    let out = game.turn(&Intent::simple("take", "anvil")).await.unwrap();
    assert!(out.narration.starts_with("Taken."));
}

#[tokio::test]
async fn cyclops_eats_drinks_and_sleeps() {
    let mut world = World::new("hollowvale", Location::new("Cyclops Room"));
    let here = world.player().location();
    let cyclops = world
        .add_item_to_location(Item::new("cyclops", CYCLOPS_NOUNS).person(&[]), here)
        .unwrap();
    let lunch = world
        .add_item_to_player(Item::new("lunch", &["lunch", "peppers"]).takeable(2))
        .unwrap();
    let garlic = world
        .add_item_to_player(Item::new("clove of garlic", &["garlic"]).takeable(1))
        .unwrap();
    let bottle = world
        .add_item_to_player(Item::new("glass bottle", &["bottle"]).takeable(2))
        .unwrap();
    world
        .add_item_to_item(Item::new("quantity of water", &["water"]), bottle)
        .unwrap();
    let mut cast = Cast::new();
    cast.add_item_behavior(
        cyclops,
        CyclopsBehavior::new(Cyclops::new(cyclops, lunch, garlic, bottle)),
    );
    let mut game = Game::new(world, EngineConfig::default()).with_cast(cast);

    let out = game
        .turn(&Intent::multi("give", "lunch", "to", "cyclops"))
        .await
        .unwrap();
    assert!(out.narration.contains("hot peppers"));
    assert!(out.narration.contains("somewhat agitated"));
    assert!(game.scheduler().is_registered(&ActorId::Item(cyclops)));

    let out = game
        .turn(&Intent::multi("give", "bottle", "to", "giant"))
        .await
        .unwrap();
    assert!(out.narration.contains("fast asleep"));
    assert!(game.world().item(cyclops).unwrap().flag(ASLEEP));
    assert!(!game.scheduler().is_registered(&ActorId::Item(cyclops)));
    assert_eq!(game.world().holder_of(bottle), Some(Holder::Location(here)));
    assert!(game.world().contents_of(bottle).is_empty());
    game.world().check_containment().unwrap();
}

#[tokio::test]
async fn robot_boots_over_three_turns() {
    let mut world = World::new("hollowvale", Location::new("Robot Shop"));
    let here = world.player().location();
    let robot = world
        .add_item_to_location(
            Item::new("robot", hv_cast::companion::ROBOT_NOUNS).person(&[]),
            here,
        )
        .unwrap();
    let mut cast = Cast::new();
    cast.add_item_behavior(robot, RobotBehavior::new(robot));
    let mut game = Game::new(world, EngineConfig::default()).with_cast(cast);
    game.register_actor(ActorId::Item(robot));

    let out = game.turn(&Intent::simple("turn on", "robot")).await.unwrap();
    assert!(out.narration.contains("Nothing seems to happen"));
    let out = game.turn(&Intent::Null).await.unwrap();
    assert!(!out.narration.contains(COMES_ALIVE));
    let out = game.turn(&Intent::Null).await.unwrap();
    assert!(out.narration.contains(COMES_ALIVE));

    let behavior = game.cast().item_behavior::<RobotBehavior>(robot).unwrap();
    assert!(behavior.power().is_on());
}

#[tokio::test]
async fn lamp_burns_out_in_the_dark() {
    let mut world = World::new("hollowvale", Location::new("Cellar").dark());
    let lamp = world
        .add_item_to_player(
            Item::new("brass lantern", &["lamp", "lantern"])
                .takeable(15)
                .light(true, true),
        )
        .unwrap();
    let battery = LampBattery::new("lamp battery", lamp).with_turns_lit(LIFETIME - 2);
    let actor = battery.actor_id();
    let mut cast = Cast::new();
    cast.add_timer("lamp battery", battery);
    cast.add_item_behavior(lamp, LampBehavior::new(lamp));
    let mut game = Game::new(world, EngineConfig::default()).with_cast(cast);
    game.register_actor(actor.clone());

    let out = game.turn(&Intent::Null).await.unwrap();
    assert!(!out.narration.contains(EXHAUSTED));
    let out = game.turn(&Intent::Null).await.unwrap();
    assert!(out.narration.contains(EXHAUSTED));
    assert!(!game.world().item(lamp).unwrap().is_lit());
    assert!(!game.scheduler().is_registered(&actor));

    let out = game.turn(&Intent::simple("turn on", "lamp")).await.unwrap();
    assert!(out.narration.starts_with(WONT_LIGHT));
    assert!(!game.world().item(lamp).unwrap().is_lit());
}

#[tokio::test]
async fn world_survives_a_save_mid_game() {
    let mut scene = troll_scene(&[sword()]);
    scene.game.dice_mut().force(&[3]);
    scene
        .game
        .turn(&Intent::multi("kill", "troll", "with", "sword"))
        .await
        .unwrap();

    let json = serde_json::to_string(scene.game.world()).unwrap();
    let restored: World = serde_json::from_str(&json).unwrap();
    restored.check_containment().unwrap();
    assert!(restored.item(scene.troll).unwrap().flag("unconscious"));
    assert_eq!(restored.player().moves, 1);
    assert_eq!(
        restored.holder_of(scene.axe),
        Some(Holder::Item(scene.troll))
    );
}

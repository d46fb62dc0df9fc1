use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::id::{ItemId, LocationId};
use crate::item::{Holder, Item};
use crate::location::Location;
use crate::player::Player;

/// The central world model. Owns every item, every location and the player.
///
/// Containment is two-sided: an item records its [`Holder`], and the holder
/// (player inventory, item contents, location floor) lists the item. All
/// placement goes through this type, which always detaches an item from its
/// old holder before attaching it to the new one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "WorldData", into = "WorldData")]
pub struct World {
    /// Name of the story.
    pub name: String,
    items: HashMap<ItemId, Item>,
    locations: HashMap<LocationId, Location>,
    player: Player,

    // Load order, for deterministic iteration
    item_order: Vec<ItemId>,
    location_order: Vec<LocationId>,
}

impl World {
    /// Create a world with the player standing in the starting location.
    pub fn new(name: impl Into<String>, start: Location) -> Self {
        let player = Player::new(start.id);
        let mut world = Self {
            name: name.into(),
            items: HashMap::new(),
            locations: HashMap::new(),
            player,
            item_order: Vec::new(),
            location_order: Vec::new(),
        };
        world.add_location(start);
        world
    }

    // -----------------------------------------------------------------------
    // Arena
    // -----------------------------------------------------------------------

    /// Add a location. Returns its ID.
    pub fn add_location(&mut self, mut location: Location) -> LocationId {
        let id = location.id;
        location.items.clear();
        location.sub_location = None;
        if self.locations.insert(id, location).is_none() {
            self.location_order.push(id);
        }
        id
    }

    /// Add an item, out of play. Returns its ID.
    pub fn add_item(&mut self, mut item: Item) -> ItemId {
        let id = item.id;
        item.holder = Holder::Nowhere;
        item.contents.clear();
        if self.items.insert(id, item).is_none() {
            self.item_order.push(id);
        }
        id
    }

    /// Add an item and place it in a location.
    pub fn add_item_to_location(&mut self, item: Item, location: LocationId) -> CoreResult<ItemId> {
        let id = self.add_item(item);
        self.place_in_location(id, location)?;
        Ok(id)
    }

    /// Add an item straight into the player's inventory.
    pub fn add_item_to_player(&mut self, item: Item) -> CoreResult<ItemId> {
        let id = self.add_item(item);
        self.give_to_player(id)?;
        Ok(id)
    }

    /// Add an item inside another item.
    pub fn add_item_to_item(&mut self, item: Item, parent: ItemId) -> CoreResult<ItemId> {
        let id = self.add_item(item);
        self.place_in_item(id, parent)?;
        Ok(id)
    }

    /// Get an item by ID.
    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.get(&id)
    }

    /// Get a mutable item by ID.
    pub fn item_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.items.get_mut(&id)
    }

    /// Get an item by ID or fail with [`CoreError::ItemNotFound`].
    pub fn require_item(&self, id: ItemId) -> CoreResult<&Item> {
        self.items.get(&id).ok_or(CoreError::ItemNotFound(id))
    }

    /// Get a mutable item by ID or fail with [`CoreError::ItemNotFound`].
    pub fn require_item_mut(&mut self, id: ItemId) -> CoreResult<&mut Item> {
        self.items.get_mut(&id).ok_or(CoreError::ItemNotFound(id))
    }

    /// Get a location by ID.
    pub fn location(&self, id: LocationId) -> Option<&Location> {
        self.locations.get(&id)
    }

    /// Get a mutable location by ID.
    pub fn location_mut(&mut self, id: LocationId) -> Option<&mut Location> {
        self.locations.get_mut(&id)
    }

    /// The location the player stands in.
    pub fn current_location(&self) -> CoreResult<&Location> {
        let id = self.player.location;
        self.locations.get(&id).ok_or(CoreError::LocationNotFound(id))
    }

    /// The location the player stands in, mutably.
    pub fn current_location_mut(&mut self) -> CoreResult<&mut Location> {
        let id = self.player.location;
        self.locations
            .get_mut(&id)
            .ok_or(CoreError::LocationNotFound(id))
    }

    /// The player.
    pub fn player(&self) -> &Player {
        &self.player
    }

    /// The player, mutably. Location and inventory stay read-only.
    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    /// All items in load order.
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.item_order.iter().filter_map(|id| self.items.get(id))
    }

    /// All locations in load order.
    pub fn locations(&self) -> impl Iterator<Item = &Location> {
        self.location_order
            .iter()
            .filter_map(|id| self.locations.get(id))
    }

    /// Find any item in the story by noun, wherever it is.
    pub fn find_item_by_noun(&self, noun: &str) -> Option<ItemId> {
        self.items().find(|i| i.matches_noun(noun)).map(|i| i.id)
    }

    // -----------------------------------------------------------------------
    // Containment
    // -----------------------------------------------------------------------

    /// Current holder of an item.
    pub fn holder_of(&self, id: ItemId) -> Option<Holder> {
        self.items.get(&id).map(|i| i.holder)
    }

    /// Direct contents of an item.
    pub fn contents_of(&self, id: ItemId) -> &[ItemId] {
        self.items
            .get(&id)
            .map(|i| i.contents.as_slice())
            .unwrap_or(&[])
    }

    /// Items the player carries directly.
    pub fn inventory(&self) -> &[ItemId] {
        &self.player.inventory
    }

    /// Items placed directly in a location.
    pub fn items_in_location(&self, id: LocationId) -> &[ItemId] {
        self.locations
            .get(&id)
            .map(|l| l.items.as_slice())
            .unwrap_or(&[])
    }

    /// The player carries the item directly.
    pub fn is_held_by_player(&self, id: ItemId) -> bool {
        self.holder_of(id) == Some(Holder::Player)
    }

    /// The player carries the item, directly or inside something they carry.
    pub fn is_carried(&self, id: ItemId) -> bool {
        let mut current = id;
        let mut guard = self.items.len();
        loop {
            match self.holder_of(current) {
                Some(Holder::Player) => return true,
                Some(Holder::Item(parent)) => current = parent,
                _ => return false,
            }
            guard = match guard.checked_sub(1) {
                Some(g) => g,
                None => return false,
            };
        }
    }

    /// True if `item` sits inside `container`, at any depth.
    pub fn is_inside(&self, item: ItemId, container: ItemId) -> bool {
        self.is_ancestor(container, item)
    }

    /// The location an item ultimately sits in, following its holders up.
    /// Items carried by the player are in the player's location.
    pub fn location_of(&self, id: ItemId) -> Option<LocationId> {
        let mut current = id;
        let mut guard = self.items.len();
        loop {
            match self.holder_of(current)? {
                Holder::Nowhere => return None,
                Holder::Player => return Some(self.player.location),
                Holder::Location(loc) => return Some(loc),
                Holder::Item(parent) => current = parent,
            }
            guard = guard.checked_sub(1)?;
        }
    }

    /// Move an item into the player's inventory.
    pub fn give_to_player(&mut self, id: ItemId) -> CoreResult<()> {
        self.place(id, Holder::Player)
    }

    /// Move an item onto the floor of a location.
    pub fn place_in_location(&mut self, id: ItemId, location: LocationId) -> CoreResult<()> {
        self.place(id, Holder::Location(location))
    }

    /// Move an item inside another item.
    pub fn place_in_item(&mut self, id: ItemId, parent: ItemId) -> CoreResult<()> {
        self.place(id, Holder::Item(parent))
    }

    /// Drop an item where the player stands.
    pub fn drop_here(&mut self, id: ItemId) -> CoreResult<()> {
        let here = self.player.location;
        self.place_in_location(id, here)
    }

    /// Take an item out of play. It keeps its contents and identity.
    pub fn remove_from_play(&mut self, id: ItemId) -> CoreResult<()> {
        self.place(id, Holder::Nowhere)
    }

    /// Reassign an item's holder, detaching it from the old one first.
    pub fn place(&mut self, id: ItemId, holder: Holder) -> CoreResult<()> {
        if !self.items.contains_key(&id) {
            return Err(CoreError::ItemNotFound(id));
        }
        match holder {
            Holder::Nowhere | Holder::Player => {}
            Holder::Location(loc) => {
                if !self.locations.contains_key(&loc) {
                    return Err(CoreError::LocationNotFound(loc));
                }
            }
            Holder::Item(parent) => {
                if !self.items.contains_key(&parent) {
                    return Err(CoreError::ItemNotFound(parent));
                }
                if parent == id || self.is_ancestor(id, parent) {
                    return Err(CoreError::ContainmentCycle {
                        item: id,
                        target: parent,
                    });
                }
            }
        }

        self.detach(id);
        match holder {
            Holder::Nowhere => {}
            Holder::Player => self.player.add_item(id),
            Holder::Location(loc) => {
                if let Some(location) = self.locations.get_mut(&loc) {
                    location.items.push(id);
                }
            }
            Holder::Item(parent) => {
                if let Some(parent) = self.items.get_mut(&parent) {
                    parent.contents.push(id);
                }
            }
        }
        if let Some(item) = self.items.get_mut(&id) {
            item.holder = holder;
        }
        Ok(())
    }

    fn detach(&mut self, id: ItemId) {
        let Some(old) = self.items.get(&id).map(|i| i.holder) else {
            return;
        };
        match old {
            Holder::Nowhere => {}
            Holder::Player => {
                self.player.remove_item(id);
            }
            Holder::Location(loc) => {
                if let Some(location) = self.locations.get_mut(&loc) {
                    location.items.retain(|i| *i != id);
                    if location.sub_location == Some(id) {
                        location.sub_location = None;
                    }
                }
            }
            Holder::Item(parent) => {
                if let Some(parent) = self.items.get_mut(&parent) {
                    parent.contents.retain(|i| *i != id);
                }
            }
        }
        if let Some(item) = self.items.get_mut(&id) {
            item.holder = Holder::Nowhere;
        }
    }

    /// True if `ancestor` holds `id`, directly or through other items.
    fn is_ancestor(&self, ancestor: ItemId, id: ItemId) -> bool {
        let mut current = id;
        let mut guard = self.items.len();
        while let Some(Holder::Item(parent)) = self.holder_of(current) {
            if parent == ancestor {
                return true;
            }
            current = parent;
            guard = match guard.checked_sub(1) {
                Some(g) => g,
                None => return false,
            };
        }
        false
    }

    /// All items inside an item, depth first.
    pub fn descendants(&self, id: ItemId) -> Vec<ItemId> {
        let mut out = Vec::new();
        let mut stack: Vec<ItemId> = self.contents_of(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.contents_of(next).iter().rev().copied());
        }
        out
    }

    // -----------------------------------------------------------------------
    // Weight
    // -----------------------------------------------------------------------

    /// Weight of an item plus everything inside it.
    pub fn total_weight(&self, id: ItemId) -> u32 {
        let own = self.items.get(&id).map(|i| i.weight()).unwrap_or(0);
        own + self
            .descendants(id)
            .iter()
            .filter_map(|d| self.items.get(d))
            .map(|i| i.weight())
            .sum::<u32>()
    }

    /// Combined weight of an item's contents.
    pub fn contents_weight(&self, id: ItemId) -> u32 {
        self.contents_of(id)
            .iter()
            .map(|c| self.total_weight(*c))
            .sum()
    }

    /// Everything the player carries, containers and their contents included.
    pub fn carrying_weight(&self) -> u32 {
        self.player
            .inventory
            .iter()
            .map(|id| self.total_weight(*id))
            .sum()
    }

    // -----------------------------------------------------------------------
    // Player movement and sub-locations
    // -----------------------------------------------------------------------

    /// Move the player to another location.
    ///
    /// A vessel the player occupies travels along and stays occupied.
    pub fn move_player(&mut self, destination: LocationId) -> CoreResult<()> {
        if !self.locations.contains_key(&destination) {
            return Err(CoreError::LocationNotFound(destination));
        }
        let aboard = self.sub_location();
        if let Some(vessel) = aboard {
            self.place_in_location(vessel, destination)?;
        }
        self.player.location = destination;
        if let Some(vessel) = aboard {
            self.current_location_mut()?.sub_location = Some(vessel);
        }
        Ok(())
    }

    /// The vessel the player occupies in the current location.
    pub fn sub_location(&self) -> Option<ItemId> {
        self.current_location().ok().and_then(|l| l.sub_location)
    }

    /// Put the player inside a vessel in the current location.
    ///
    /// The vessel must be on the floor of the current location.
    pub fn board(&mut self, vessel: ItemId) -> CoreResult<()> {
        let item = self.require_item(vessel)?;
        if !item.is_vessel() {
            return Err(CoreError::NotAVessel(vessel));
        }
        if item.holder != Holder::Location(self.player.location) {
            return Err(CoreError::Validation(format!(
                "vessel {vessel} is not on the floor of the current location"
            )));
        }
        self.current_location_mut()?.sub_location = Some(vessel);
        Ok(())
    }

    /// Take the player out of whatever vessel they occupy. Returns the vessel.
    pub fn disembark(&mut self) -> Option<ItemId> {
        self.current_location_mut()
            .ok()
            .and_then(|l| l.sub_location.take())
    }

    // -----------------------------------------------------------------------
    // Invariants
    // -----------------------------------------------------------------------

    /// Verify that every item is referenced by exactly one holder and that
    /// every holder list agrees with its items.
    pub fn check_containment(&self) -> CoreResult<()> {
        let mut seen: HashSet<ItemId> = HashSet::new();
        let mut claim = |id: ItemId, expected: Holder| -> CoreResult<()> {
            if !seen.insert(id) {
                return Err(CoreError::Validation(format!(
                    "item {id} is listed by more than one holder"
                )));
            }
            let item = self.items.get(&id).ok_or(CoreError::ItemNotFound(id))?;
            if item.holder != expected {
                return Err(CoreError::Validation(format!(
                    "item {id} records holder {:?} but is listed by {expected:?}",
                    item.holder
                )));
            }
            Ok(())
        };

        for id in &self.player.inventory {
            claim(*id, Holder::Player)?;
        }
        for location in self.locations.values() {
            for id in &location.items {
                claim(*id, Holder::Location(location.id))?;
            }
            if let Some(vessel) = location.sub_location {
                if !location.items.contains(&vessel) {
                    return Err(CoreError::Validation(format!(
                        "occupied vessel {vessel} is not in {}",
                        location.name
                    )));
                }
            }
        }
        for item in self.items.values() {
            for id in &item.contents {
                claim(*id, Holder::Item(item.id))?;
            }
        }
        for item in self.items.values() {
            if item.holder != Holder::Nowhere && !seen.contains(&item.id) {
                return Err(CoreError::Validation(format!(
                    "item {} claims holder {:?} that does not list it",
                    item.id, item.holder
                )));
            }
        }
        let occupied = self
            .locations
            .values()
            .filter(|l| l.sub_location.is_some())
            .count();
        if occupied > 1 {
            return Err(CoreError::Validation(
                "the player occupies vessels in more than one location".into(),
            ));
        }
        Ok(())
    }
}

/// Serialized shape of a [`World`]: arenas as ordered lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct WorldData {
    name: String,
    locations: Vec<Location>,
    items: Vec<Item>,
    player: Player,
}

impl From<World> for WorldData {
    fn from(mut world: World) -> Self {
        let locations = world
            .location_order
            .iter()
            .filter_map(|id| world.locations.remove(id))
            .collect();
        let items = world
            .item_order
            .iter()
            .filter_map(|id| world.items.remove(id))
            .collect();
        Self {
            name: world.name,
            locations,
            items,
            player: world.player,
        }
    }
}

impl From<WorldData> for World {
    fn from(data: WorldData) -> Self {
        Self {
            name: data.name,
            location_order: data.locations.iter().map(|l| l.id).collect(),
            item_order: data.items.iter().map(|i| i.id).collect(),
            locations: data.locations.into_iter().map(|l| (l.id, l)).collect(),
            items: data.items.into_iter().map(|i| (i.id, i)).collect(),
            player: data.player,
        }
    }
}

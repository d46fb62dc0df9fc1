//! What the player can see and touch from where they stand.

use crate::id::ItemId;
use crate::world::World;

/// A read-only view of the items currently resolvable by noun.
///
/// Scope is the player's inventory and the current location's floor, plus
/// anything inside open or transparent containers at any depth, plus the
/// contents of the vessel the player occupies. Closed opaque containers
/// hide their contents. Hidden items are never in scope.
///
/// In the dark only items marked `always_in_scope` and light sources the
/// player carries remain resolvable.
#[derive(Debug, Clone, Copy)]
pub struct Scope<'w> {
    world: &'w World,
}

impl<'w> Scope<'w> {
    /// Create a scope view over the world.
    pub fn new(world: &'w World) -> Self {
        Self { world }
    }

    /// The location is dark and nothing reachable is giving off light.
    pub fn is_dark(&self) -> bool {
        let Ok(location) = self.world.current_location() else {
            return true;
        };
        if !location.dark {
            return false;
        }
        !self
            .reachable_location_items()
            .into_iter()
            .chain(self.reachable_inventory_items())
            .filter_map(|id| self.world.item(id))
            .any(|item| item.is_lit())
    }

    /// Every in-scope item: location first, then inventory.
    pub fn items(&self) -> Vec<ItemId> {
        let mut items = self.location_items();
        items.extend(self.inventory_items());
        items
    }

    /// In-scope items in the current location, vessel contents included.
    pub fn location_items(&self) -> Vec<ItemId> {
        self.filter_dark(self.reachable_location_items())
    }

    /// In-scope items the player carries, including those in open containers.
    pub fn inventory_items(&self) -> Vec<ItemId> {
        self.filter_dark(self.reachable_inventory_items())
    }

    /// First in-scope item matching the noun (case-insensitive).
    pub fn item_in_scope(&self, noun: &str) -> Option<ItemId> {
        self.items()
            .into_iter()
            .find(|id| self.world.item(*id).is_some_and(|i| i.matches_noun(noun)))
    }

    /// Look for an in-scope item by noun, optionally against precise nouns only.
    pub fn has_matching_noun(&self, noun: &str, precise_only: bool) -> Option<ItemId> {
        self.items().into_iter().find(|id| {
            self.world.item(*id).is_some_and(|i| {
                if precise_only {
                    i.matches_precise_noun(noun)
                } else {
                    i.matches_noun(noun)
                }
            })
        })
    }

    /// Every in-scope item matching the noun, in scope order.
    pub fn matching_items(&self, noun: &str) -> Vec<ItemId> {
        self.items()
            .into_iter()
            .filter(|id| self.world.item(*id).is_some_and(|i| i.matches_noun(noun)))
            .collect()
    }

    /// First item in the location part of scope matching the noun.
    pub fn in_location(&self, noun: &str) -> Option<ItemId> {
        self.location_items()
            .into_iter()
            .find(|id| self.world.item(*id).is_some_and(|i| i.matches_noun(noun)))
    }

    /// First item in the inventory part of scope matching the noun.
    pub fn in_inventory(&self, noun: &str) -> Option<ItemId> {
        self.inventory_items()
            .into_iter()
            .find(|id| self.world.item(*id).is_some_and(|i| i.matches_noun(noun)))
    }

    /// The item is currently resolvable.
    pub fn contains(&self, id: ItemId) -> bool {
        self.items().contains(&id)
    }

    fn reachable_location_items(&self) -> Vec<ItemId> {
        let Ok(location) = self.world.current_location() else {
            return Vec::new();
        };
        let mut out = Vec::new();
        self.collect(location.items(), location.sub_location(), &mut out);
        out
    }

    fn reachable_inventory_items(&self) -> Vec<ItemId> {
        let mut out = Vec::new();
        self.collect(self.world.inventory(), None, &mut out);
        out
    }

    fn collect(&self, ids: &[ItemId], aboard: Option<ItemId>, out: &mut Vec<ItemId>) {
        for id in ids {
            let Some(item) = self.world.item(*id) else {
                continue;
            };
            if item.hidden || out.contains(id) {
                continue;
            }
            out.push(*id);
            if item.exposes_contents() || aboard == Some(*id) {
                self.collect(item.contents(), aboard, out);
            }
        }
    }

    fn filter_dark(&self, ids: Vec<ItemId>) -> Vec<ItemId> {
        if !self.is_dark() {
            return ids;
        }
        ids.into_iter()
            .filter(|id| {
                self.world.item(*id).is_some_and(|item| {
                    item.always_in_scope || (item.is_light_source() && self.is_carried(*id))
                })
            })
            .collect()
    }

    fn is_carried(&self, id: ItemId) -> bool {
        self.reachable_inventory_items().contains(&id)
    }
}

//! Player context.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::direction::Direction;
use crate::id::{ItemId, LocationId};
use crate::item::MetadataValue;

/// The player's state for one game session.
///
/// Location and inventory change only through
/// [`World`](crate::world::World), so that an item's holder and the
/// inventory list can never disagree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Last noun the player used, for elliptical follow-ups ("take it").
    pub last_noun: Option<String>,
    /// Last direction the player moved.
    pub last_direction: Option<Direction>,
    /// Points earned so far.
    pub score: i32,
    /// Turns taken so far.
    pub moves: u32,
    /// Arbitrary state flags.
    pub flags: HashMap<String, MetadataValue>,
    pub(crate) location: LocationId,
    pub(crate) inventory: Vec<ItemId>,
}

impl Player {
    /// Create a player standing at the given location.
    pub fn new(location: LocationId) -> Self {
        Self {
            last_noun: None,
            last_direction: None,
            score: 0,
            moves: 0,
            flags: HashMap::new(),
            location,
            inventory: Vec::new(),
        }
    }

    /// Current location.
    pub fn location(&self) -> LocationId {
        self.location
    }

    /// Items carried directly, in pickup order.
    pub fn inventory(&self) -> &[ItemId] {
        &self.inventory
    }

    /// Check if the player carries an item directly.
    pub fn has_item(&self, item_id: ItemId) -> bool {
        self.inventory.contains(&item_id)
    }

    /// Check if the player has a specific flag value.
    pub fn has_flag(&self, key: &str) -> bool {
        self.flags.contains_key(key)
    }

    /// Get a flag value.
    pub fn get_flag(&self, key: &str) -> Option<&MetadataValue> {
        self.flags.get(key)
    }

    /// Set a flag value.
    pub fn set_flag(&mut self, key: impl Into<String>, value: MetadataValue) {
        self.flags.insert(key.into(), value);
    }

    /// Add points to the score.
    pub fn add_score(&mut self, points: i32) {
        self.score += points;
    }

    pub(crate) fn add_item(&mut self, item_id: ItemId) {
        if !self.inventory.contains(&item_id) {
            self.inventory.push(item_id);
        }
    }

    pub(crate) fn remove_item(&mut self, item_id: ItemId) -> bool {
        if let Some(pos) = self.inventory.iter().position(|&id| id == item_id) {
            self.inventory.remove(pos);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_new() {
        let location = LocationId::new();
        let player = Player::new(location);

        assert_eq!(player.location(), location);
        assert!(player.inventory().is_empty());
        assert!(player.last_noun.is_none());
        assert_eq!(player.moves, 0);
    }

    #[test]
    fn inventory_management() {
        let mut player = Player::new(LocationId::new());
        let item = ItemId::new();

        assert!(!player.has_item(item));
        player.add_item(item);
        assert!(player.has_item(item));

        // Adding again should not duplicate
        player.add_item(item);
        assert_eq!(player.inventory().len(), 1);

        assert!(player.remove_item(item));
        assert!(!player.has_item(item));
        assert!(!player.remove_item(item));
    }

    #[test]
    fn flags_and_score() {
        let mut player = Player::new(LocationId::new());

        assert!(!player.has_flag("dead"));
        player.set_flag("dead", MetadataValue::Boolean(true));
        assert_eq!(player.get_flag("dead"), Some(&MetadataValue::Boolean(true)));

        player.add_score(10);
        player.add_score(-3);
        assert_eq!(player.score, 7);
    }
}

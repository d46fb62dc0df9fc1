use crate::id::{ItemId, LocationId};

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised when the world graph is manipulated incorrectly.
///
/// These are caller defects, never player mistakes: a well-formed engine
/// validates before it mutates and only reaches these on a broken contract.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The requested item ID does not exist in the world.
    #[error("item not found: {0}")]
    ItemNotFound(ItemId),

    /// The requested location ID does not exist in the world.
    #[error("location not found: {0}")]
    LocationNotFound(LocationId),

    /// Placing the item would make it contain itself.
    #[error("item {item} cannot be placed inside {target}: containment cycle")]
    ContainmentCycle {
        /// The item being placed.
        item: ItemId,
        /// The would-be parent.
        target: ItemId,
    },

    /// The item cannot be boarded or left as a sub-location.
    #[error("item {0} is not a vessel")]
    NotAVessel(ItemId),

    /// A generic validation error with a descriptive message.
    #[error("validation error: {0}")]
    Validation(String),
}

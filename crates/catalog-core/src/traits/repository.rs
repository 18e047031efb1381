//! Generic repository trait for entity storage.

use crate::result::AppResult;

/// Generic CRUD repository trait.
///
/// Defined with generic type parameters so that each entity can have a
/// strongly typed repository. Entity-specific queries live on
/// entity-specific traits that extend this one.
///
/// All methods are synchronous; implementations must serialize writes
/// and hand out point-in-time snapshots from `find_all`.
pub trait Repository<Entity, Id>: Send + Sync + 'static
where
    Entity: Send + Sync + 'static + serde::Serialize,
    Id: Send + Sync + 'static,
{
    /// Find an entity by its primary key.
    fn find_by_id(&self, id: &Id) -> AppResult<Option<Entity>>;

    /// Snapshot of every entity in storage order.
    fn find_all(&self) -> AppResult<Vec<Entity>>;

    /// Append a new entity and return it.
    fn create(&self, entity: &Entity) -> AppResult<Entity>;

    /// Replace an existing entity in place and return the stored version.
    fn update(&self, entity: &Entity) -> AppResult<Entity>;

    /// Delete an entity by its primary key. Returns `true` if deleted.
    fn delete(&self, id: &Id) -> AppResult<bool>;

    /// Count total entities.
    fn count(&self) -> AppResult<u64>;
}

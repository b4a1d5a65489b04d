use crate::book::Collection;

use super::StoreError;

/// Durable owner of the book collection.
///
/// The collection is always loaded and saved whole. Implementations must
/// make `save` atomic: a concurrent or later `load` sees either the previous
/// collection or the new one, never a mix.
pub trait RecordStore: Send + Sync {
    /// Return an independent, fully parsed copy of the current collection.
    fn load(&self) -> Result<Collection, StoreError>;

    /// Replace the durable collection with `collection`.
    fn save(&self, collection: &Collection) -> Result<(), StoreError>;
}

impl<S: RecordStore + ?Sized> RecordStore for std::sync::Arc<S> {
    fn load(&self) -> Result<Collection, StoreError> {
        (**self).load()
    }

    fn save(&self, collection: &Collection) -> Result<(), StoreError> {
        (**self).save(collection)
    }
}

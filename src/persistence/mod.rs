mod store;
mod tracker;
mod types;

pub use store::{JsonFilePositionStore, MemoryPositionStore, PositionStore};
pub use tracker::PositionTracker;
pub use types::SavedPosition;

#[cfg(test)]
pub use store::MockPositionStore;

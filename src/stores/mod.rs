// Stores layer - Data access and repository pattern
pub mod item_repository;
pub mod item_store;
pub mod memory_item_store;

pub use item_repository::ItemRepository;
pub use item_store::ItemStore;
pub use memory_item_store::MemoryItemStore;

// Domain types shared by services and stores
pub mod category;
pub mod context;
pub mod item;
pub mod patch;
pub mod summary;

pub use category::Category;
pub use item::{CreateItemInput, Item, UpdateFields};
pub use patch::Patch;
pub use summary::CategorySummary;

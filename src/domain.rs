// Domain layer modules
pub mod group_item;
pub mod object_key;

// Re-exports
pub use group_item::{GroupItem, GROUP_ID_FIELD};
pub use object_key::ObjectKey;

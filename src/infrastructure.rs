// Infrastructure layer modules
pub mod config;
pub mod group_repository;
pub mod logging;

// Re-exports
pub use config::{GroupsConfig, GroupsConfigError};
pub use group_repository::{DynamoGroupRepository, GroupRepository, RepositoryError};
pub use logging::init_logging;

//! Core board engine for the multiop project tracker.
//! This crate is the single source of truth for project lifecycle invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod view;

pub use config::{BoardConfig, ConfigError};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::project::{
    parse_tags_input, Priority, Project, ProjectDraft, ProjectId, ProjectStatus,
    ProjectValidationError,
};
pub use repo::project_repo::{
    MemorySlotRepository, ProjectPersistence, RepoError, RepoResult, SqliteProjectRepository,
    DEFAULT_SLOT_KEY,
};
pub use service::board_controller::{
    BoardController, BoardError, DeleteConfirmation, EditorForm, EditorSession,
};
pub use service::id_generator::{IdGenerator, SequentialIdGenerator, TimestampIdGenerator};
pub use service::project_store::{
    BoardOrigin, Committed, PersistenceWarning, ProjectStore, StoreError, StoreOptions,
    StoreResult,
};
pub use view::board_view::{
    BoardColumn, BoardView, CategoryFilter, PriorityFilter, StatusCounts, ViewFilter,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

//! Application layer logic for taskmaster.
//!
//! This crate owns the in-memory task store and the helpers a presentation
//! layer needs around it: input validation, token parsing, snapshot
//! observers, the clock used for overdue checks, and configuration.

pub mod clock;
pub mod config;
pub mod filter_util;
pub mod observer;
pub mod seed;
pub mod task_draft;
pub mod task_store;

// Re-exports for convenience
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{InputConfig, ProjectConfig, StoreConfig, ViewConfig};
pub use filter_util::{
    InputError, TaskFilterBuilder, parse_optional_priority, parse_priority, parse_sort_option,
    parse_task_id,
};
pub use observer::{SubscriptionId, TaskObserver, TaskSnapshot};
pub use seed::{EXAMPLE_TASKS, seed_examples};
pub use task_draft::{DraftError, DraftPolicy, TaskDraft, TaskEdit, changed_fields};
pub use task_store::TaskStore;

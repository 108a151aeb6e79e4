//! Task and feedback tracking for pre-medical students.
//!
//! Tasks and feedback entries live in memory in an [`AppState`], are changed
//! through a [`TaskStore`] or [`FeedbackStore`], written back to durable
//! storage after every change, and turned into display-ready views by the
//! functions in [`projection`].
pub mod clock;
pub mod config;
pub mod error;
pub mod feedback;
pub mod feedback_store;
pub mod filter;
pub mod projection;
pub mod state;
pub mod storage;
pub mod task;
pub mod task_store;

pub use clock::{Clock, FixedClock, IdGenerator, RecordId, SystemClock};
pub use config::PlannerConfig;
pub use error::{ParseError, ValidationError};
pub use feedback::{Feedback, FeedbackInput, FeedbackKind, FeedbackRole, Mood, Rating};
pub use feedback_store::FeedbackStore;
pub use filter::{Filter, StatusFilter, TaskFilter};
pub use projection::{EmptyState, FeedbackSummary, FeedbackView, TaskStats, TaskView};
pub use state::{AppState, Planner};
pub use storage::{FileStorage, MemoryStorage, Storage, StorageAdapter, StorageError};
pub use task::{Category, Priority, Task, TaskInput};
pub use task_store::{TaskEdit, TaskStore};

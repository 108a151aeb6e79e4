use crate::clock::{Clock, IdGenerator, SystemClock};
use crate::config::PlannerConfig;
use crate::feedback::{Feedback, FeedbackKind};
use crate::feedback_store::FeedbackStore;
use crate::filter::{Filter, TaskFilter};
use crate::projection::{self, EmptyState, FeedbackView, TaskStats, TaskView};
use crate::storage::{FEEDBACKS_KEY, FileStorage, Storage, StorageAdapter, TASKS_KEY};
use crate::task::Task;
use crate::task_store::TaskStore;
use tracing::info;

/// Both collections plus the id generator and clock they share.
///
/// The state is owned by whoever drives the planner and lent to a
/// [`TaskStore`] or [`FeedbackStore`] for each mutation.
pub struct AppState {
    tasks: Vec<Task>,
    feedbacks: Vec<Feedback>,
    ids: IdGenerator,
    clock: Box<dyn Clock>,
}

impl AppState {
    pub fn load<S: Storage>(storage: &StorageAdapter<S>) -> Self {
        Self::load_with_clock(storage, Box::new(SystemClock))
    }

    pub fn load_with_clock<S: Storage>(storage: &StorageAdapter<S>, clock: Box<dyn Clock>) -> Self {
        let tasks: Vec<Task> = storage.load(TASKS_KEY);
        let feedbacks: Vec<Feedback> = storage.load(FEEDBACKS_KEY);
        let last_id = tasks
            .iter()
            .map(|task| task.id)
            .chain(feedbacks.iter().map(|feedback| feedback.id))
            .max()
            .unwrap_or(0);
        info!(
            tasks = tasks.len(),
            feedbacks = feedbacks.len(),
            "planner state loaded"
        );
        Self {
            tasks,
            feedbacks,
            ids: IdGenerator::starting_after(last_id),
            clock,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn feedbacks(&self) -> &[Feedback] {
        &self.feedbacks
    }

    pub fn clock(&self) -> &dyn Clock {
        &*self.clock
    }

    pub fn task_store<'a, S: Storage>(
        &'a mut self,
        storage: &'a StorageAdapter<S>,
    ) -> TaskStore<'a, S> {
        TaskStore::new(&mut self.tasks, &mut self.ids, &*self.clock, storage)
    }

    pub fn feedback_store<'a, S: Storage>(
        &'a mut self,
        storage: &'a StorageAdapter<S>,
    ) -> FeedbackStore<'a, S> {
        FeedbackStore::new(&mut self.feedbacks, &mut self.ids, &*self.clock, storage)
    }

    /// The task list as currently filtered, judged against the clock's today.
    pub fn project_tasks(&self, filter: &TaskFilter) -> Vec<TaskView<'_>> {
        projection::project_tasks(&self.tasks, filter, self.clock.today())
    }

    pub fn task_stats(&self) -> TaskStats {
        projection::task_stats(&self.tasks)
    }

    pub fn project_feedbacks(&self, filter: Filter<FeedbackKind>) -> Vec<FeedbackView<'_>> {
        projection::project_feedbacks(&self.feedbacks, filter)
    }

    pub fn task_empty_state(&self, filter: &TaskFilter) -> Option<EmptyState> {
        let shown = self.tasks.iter().filter(|task| filter.matches(task)).count();
        EmptyState::of(shown, self.tasks.len())
    }

    pub fn feedback_empty_state(&self, filter: Filter<FeedbackKind>) -> Option<EmptyState> {
        let shown = self
            .feedbacks
            .iter()
            .filter(|feedback| filter.matches(&feedback.kind()))
            .count();
        EmptyState::of(shown, self.feedbacks.len())
    }
}

/// Storage and state owned together by the process driving the planner.
pub struct Planner<S> {
    storage: StorageAdapter<S>,
    state: AppState,
}

impl Planner<FileStorage> {
    /// Opens the file-backed planner described by `config`.
    pub fn open(config: &PlannerConfig) -> Self {
        Self::new(FileStorage::new(config.storage.directory.clone()))
    }
}

impl<S: Storage> Planner<S> {
    pub fn new(backend: S) -> Self {
        let storage = StorageAdapter::new(backend);
        let state = AppState::load(&storage);
        Self { storage, state }
    }

    pub fn with_clock(backend: S, clock: Box<dyn Clock>) -> Self {
        let storage = StorageAdapter::new(backend);
        let state = AppState::load_with_clock(&storage, clock);
        Self { storage, state }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn storage(&self) -> &StorageAdapter<S> {
        &self.storage
    }

    pub fn tasks(&mut self) -> TaskStore<'_, S> {
        self.state.task_store(&self.storage)
    }

    pub fn feedbacks(&mut self) -> FeedbackStore<'_, S> {
        self.state.feedback_store(&self.storage)
    }
}

use crate::clock::{Clock, IdGenerator, RecordId};
use crate::storage::{Storage, StorageAdapter, TASKS_KEY};
use crate::task::{Task, TaskInput};
use tracing::{error, info};

/// A task staged for editing.
///
/// The original task stays in the collection until the edit is committed
/// with [`TaskStore::commit_edit`]; dropping the edit leaves it untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskEdit {
    original_id: RecordId,
    draft: TaskInput,
}

impl TaskEdit {
    pub fn original_id(&self) -> RecordId {
        self.original_id
    }

    /// The original task's values, for prefilling the form.
    pub fn draft(&self) -> &TaskInput {
        &self.draft
    }
}

/// Mutations over the task collection.
///
/// Every successful mutation writes the whole collection back to storage.
/// A failed write is logged and the in-memory change stands.
pub struct TaskStore<'a, S> {
    tasks: &'a mut Vec<Task>,
    ids: &'a mut IdGenerator,
    clock: &'a dyn Clock,
    storage: &'a StorageAdapter<S>,
}

impl<'a, S: Storage> TaskStore<'a, S> {
    pub fn new(
        tasks: &'a mut Vec<Task>,
        ids: &'a mut IdGenerator,
        clock: &'a dyn Clock,
        storage: &'a StorageAdapter<S>,
    ) -> Self {
        Self {
            tasks,
            ids,
            clock,
            storage,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        self.tasks.as_slice()
    }

    pub fn get(&self, id: RecordId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|task| task.completed).count()
    }

    /// Stores a new task at the front of the collection.
    ///
    /// The input is stored as given; run [`TaskInput::validate`] first.
    #[tracing::instrument(skip(self, input), fields(title = %input.title))]
    pub fn add(&mut self, input: TaskInput) -> Task {
        let now = self.clock.now();
        let task = input.into_task(self.ids.next_id(now), now);
        self.tasks.insert(0, task.clone());
        self.persist();
        info!(id = task.id, "task added");
        task
    }

    /// Removes the task with `id`, returning whether one was removed.
    #[tracing::instrument(skip(self))]
    pub fn remove(&mut self, id: RecordId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        let removed = self.tasks.len() != before;
        if removed {
            self.persist();
            info!("task removed");
        }
        removed
    }

    /// Flips the completion flag of the task with `id`.
    #[tracing::instrument(skip(self))]
    pub fn toggle_completion(&mut self, id: RecordId) -> Option<Task> {
        let task = self.tasks.iter_mut().find(|task| task.id == id)?;
        task.completed = !task.completed;
        let toggled = task.clone();
        self.persist();
        info!(completed = toggled.completed, "task toggled");
        Some(toggled)
    }

    /// Removes every completed task, returning how many were removed.
    ///
    /// Nothing is written when no task is completed.
    #[tracing::instrument(skip(self))]
    pub fn clear_completed(&mut self) -> usize {
        let count = self.completed_count();
        if count == 0 {
            return 0;
        }
        self.tasks.retain(|task| !task.completed);
        self.persist();
        info!(count, "completed tasks cleared");
        count
    }

    /// Stages the task with `id` for editing without removing it.
    pub fn edit(&self, id: RecordId) -> Option<TaskEdit> {
        self.get(id).map(|task| TaskEdit {
            original_id: task.id,
            draft: TaskInput::from(task),
        })
    }

    /// Replaces the edited task with a new one built from `input`.
    ///
    /// The replacement gets a fresh id, goes to the front of the collection
    /// and starts incomplete. Returns `None`, changing nothing, when the
    /// original task no longer exists.
    #[tracing::instrument(skip(self, edit, input), fields(original_id = edit.original_id))]
    pub fn commit_edit(&mut self, edit: TaskEdit, input: TaskInput) -> Option<Task> {
        let position = self
            .tasks
            .iter()
            .position(|task| task.id == edit.original_id)?;
        self.tasks.remove(position);
        let now = self.clock.now();
        let task = input.into_task(self.ids.next_id(now), now);
        self.tasks.insert(0, task.clone());
        self.persist();
        info!(id = task.id, "task edited");
        Some(task)
    }

    fn persist(&self) {
        if let Err(e) = self.storage.save(TASKS_KEY, self.tasks.as_slice()) {
            error!(error = %e, "failed to persist tasks, keeping in-memory changes");
        }
    }
}

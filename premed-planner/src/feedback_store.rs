use crate::clock::{Clock, IdGenerator, RecordId};
use crate::feedback::{Feedback, FeedbackInput};
use crate::storage::{FEEDBACKS_KEY, Storage, StorageAdapter};
use tracing::{error, info};

/// Mutations over the feedback collection.
///
/// Feedback entries are never edited; they are added, removed one at a time,
/// or cleared all at once. Clearing by type is not offered.
pub struct FeedbackStore<'a, S> {
    feedbacks: &'a mut Vec<Feedback>,
    ids: &'a mut IdGenerator,
    clock: &'a dyn Clock,
    storage: &'a StorageAdapter<S>,
}

impl<'a, S: Storage> FeedbackStore<'a, S> {
    pub fn new(
        feedbacks: &'a mut Vec<Feedback>,
        ids: &'a mut IdGenerator,
        clock: &'a dyn Clock,
        storage: &'a StorageAdapter<S>,
    ) -> Self {
        Self {
            feedbacks,
            ids,
            clock,
            storage,
        }
    }

    pub fn feedbacks(&self) -> &[Feedback] {
        self.feedbacks.as_slice()
    }

    pub fn get(&self, id: RecordId) -> Option<&Feedback> {
        self.feedbacks.iter().find(|feedback| feedback.id == id)
    }

    #[tracing::instrument(skip(self, input), fields(kind = %input.role.kind()))]
    pub fn add(&mut self, input: FeedbackInput) -> Feedback {
        let now = self.clock.now();
        let feedback = input.into_feedback(self.ids.next_id(now), now);
        self.feedbacks.insert(0, feedback.clone());
        self.persist();
        info!(id = feedback.id, "feedback added");
        feedback
    }

    #[tracing::instrument(skip(self))]
    pub fn remove(&mut self, id: RecordId) -> bool {
        let before = self.feedbacks.len();
        self.feedbacks.retain(|feedback| feedback.id != id);
        let removed = self.feedbacks.len() != before;
        if removed {
            self.persist();
            info!("feedback removed");
        }
        removed
    }

    /// Deletes every feedback entry. Nothing is written when already empty.
    #[tracing::instrument(skip(self))]
    pub fn clear_all(&mut self) -> usize {
        let count = self.feedbacks.len();
        if count == 0 {
            return 0;
        }
        self.feedbacks.clear();
        self.persist();
        info!(count, "feedback history cleared");
        count
    }

    fn persist(&self) {
        if let Err(e) = self.storage.save(FEEDBACKS_KEY, self.feedbacks.as_slice()) {
            error!(error = %e, "failed to persist feedback, keeping in-memory changes");
        }
    }
}

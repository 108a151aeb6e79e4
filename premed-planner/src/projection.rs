//! Display-ready views derived from the task and feedback collections.
//!
//! Everything here is a pure function of its arguments: projecting the same
//! collection with the same filter always yields the same sequence, and the
//! source collection is never touched.

use crate::feedback::{Feedback, FeedbackKind, FeedbackRole, Mood, Rating};
use crate::filter::{Filter, TaskFilter};
use crate::task::Task;
use chrono::{NaiveDate, NaiveTime};
use std::fmt::{Display, Formatter};

/// A task as it appears in the task list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskView<'a> {
    pub task: &'a Task,
    /// e.g. "Jan 10, 2024"
    pub formatted_date: String,
    /// e.g. "2:30 PM"; `None` when the task has no time.
    pub formatted_time: Option<String>,
    pub is_overdue: bool,
}

impl<'a> TaskView<'a> {
    pub fn new(task: &'a Task, today: NaiveDate) -> Self {
        Self {
            task,
            formatted_date: format_date(task.date),
            formatted_time: task.time.map(format_time),
            is_overdue: is_overdue(task, today),
        }
    }
}

/// Aggregate counts shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    pub progress_percent: u8,
}

/// Why a projection came back empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    /// Nothing has been added yet.
    NoRecords,
    /// Records exist but the current filter hides all of them.
    FilteredOut,
}

impl EmptyState {
    /// Returns the hint to show for a projection of `shown` items out of a
    /// collection of `total`, or `None` when something is shown.
    pub fn of(shown: usize, total: usize) -> Option<Self> {
        match (shown, total) {
            (0, 0) => Some(EmptyState::NoRecords),
            (0, _) => Some(EmptyState::FilteredOut),
            _ => None,
        }
    }
}

/// The role-specific detail of a feedback entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackSummary<'a> {
    Mood(Mood),
    Rating(Rating),
    Relation(&'a str),
}

impl<'a> From<&'a FeedbackRole> for FeedbackSummary<'a> {
    fn from(role: &'a FeedbackRole) -> Self {
        match role {
            FeedbackRole::Student { mood } => FeedbackSummary::Mood(*mood),
            FeedbackRole::Counselor { rating } => FeedbackSummary::Rating(*rating),
            FeedbackRole::Parent { relation } => FeedbackSummary::Relation(relation),
        }
    }
}

impl Display for FeedbackSummary<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedbackSummary::Mood(mood) => write!(f, "Feeling: {mood}"),
            FeedbackSummary::Rating(rating) => write!(f, "Rating: {rating}"),
            FeedbackSummary::Relation(relation) => write!(f, "Relation: {relation}"),
        }
    }
}

/// A feedback entry as it appears in the feedback history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackView<'a> {
    pub feedback: &'a Feedback,
    pub formatted_date: String,
    pub summary: FeedbackSummary<'a>,
}

impl<'a> FeedbackView<'a> {
    pub fn new(feedback: &'a Feedback) -> Self {
        Self {
            feedback,
            formatted_date: format_date(feedback.date),
            summary: FeedbackSummary::from(&feedback.role),
        }
    }
}

/// Filters and orders tasks for display.
///
/// Incomplete tasks come before completed ones; within each group tasks are
/// ordered by ascending date and then by priority, most urgent first. The
/// sort is stable, so ties keep their collection order (newest first).
pub fn project_tasks<'a>(
    tasks: &'a [Task],
    filter: &TaskFilter,
    today: NaiveDate,
) -> Vec<TaskView<'a>> {
    let mut selected: Vec<&Task> = tasks.iter().filter(|task| filter.matches(task)).collect();
    selected.sort_by_key(|task| (task.completed, task.date, task.priority.rank()));
    selected
        .into_iter()
        .map(|task| TaskView::new(task, today))
        .collect()
}

/// Counts tasks over the whole collection, ignoring any filter.
pub fn task_stats(tasks: &[Task]) -> TaskStats {
    let total = tasks.len();
    let completed = tasks.iter().filter(|task| task.completed).count();
    TaskStats {
        total,
        completed,
        pending: total - completed,
        progress_percent: progress_percent(completed, total),
    }
}

/// Filters feedback by kind, keeping collection order.
pub fn project_feedbacks(
    feedbacks: &[Feedback],
    filter: Filter<FeedbackKind>,
) -> Vec<FeedbackView<'_>> {
    feedbacks
        .iter()
        .filter(|feedback| filter.matches(&feedback.kind()))
        .map(FeedbackView::new)
        .collect()
}

/// An incomplete task dated strictly before `today`.
pub fn is_overdue(task: &Task, today: NaiveDate) -> bool {
    !task.completed && task.date < today
}

/// `completed / total` as a whole percentage, rounding halves up.
pub fn progress_percent(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let percent = (completed * 200 + total) / (total * 2);
    u8::try_from(percent.min(100)).unwrap_or(100)
}

/// Formats a date as "Jan 10, 2024".
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Formats a time of day on a 12-hour clock, e.g. "2:30 PM" or "12:05 AM".
pub fn format_time(time: NaiveTime) -> String {
    time.format("%-I:%M %p").to_string()
}

use crate::clock::RecordId;
use crate::error::{ParseError, ValidationError};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// A scheduled activity with a completion state.
///
/// Field names and formats match the blobs written by the browser planner,
/// so existing `preMedTasks` data loads unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: RecordId,
    /// Study track the task belongs to, such as "Pre-Med".
    #[serde(default)]
    pub field: String,
    pub title: String,
    pub category: Category,
    pub date: NaiveDate,
    #[serde(default, with = "hhmm")]
    pub time: Option<NaiveTime>,
    pub priority: Priority,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

/// Everything a caller supplies to create a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskInput {
    pub field: String,
    pub title: String,
    pub category: Category,
    pub date: NaiveDate,
    pub time: Option<NaiveTime>,
    pub priority: Priority,
    pub description: String,
}

impl TaskInput {
    /// Checks the input the way the task form does before submitting it.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        Ok(())
    }

    /// Returns a copy with surrounding whitespace removed from free text.
    pub fn trimmed(&self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            ..self.clone()
        }
    }

    pub(crate) fn into_task(self, id: RecordId, created_at: DateTime<Utc>) -> Task {
        Task {
            id,
            field: self.field,
            title: self.title,
            category: self.category,
            date: self.date,
            time: self.time,
            priority: self.priority,
            description: self.description,
            completed: false,
            created_at,
        }
    }
}

impl From<&Task> for TaskInput {
    fn from(task: &Task) -> Self {
        Self {
            field: task.field.clone(),
            title: task.title.clone(),
            category: task.category,
            date: task.date,
            time: task.time,
            priority: task.priority,
            description: task.description.clone(),
        }
    }
}

/// Task urgency. Variants are declared from most to least urgent, so the
/// derived ordering sorts `Urgent` first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    Urgent,
    High,
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 4] = [
        Priority::Urgent,
        Priority::High,
        Priority::Medium,
        Priority::Low,
    ];

    /// Sort rank, 0 for `Urgent` through 3 for `Low`.
    pub fn rank(self) -> u8 {
        match self {
            Priority::Urgent => 0,
            Priority::High => 1,
            Priority::Medium => 2,
            Priority::Low => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Urgent => "Urgent",
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Priority::ALL
            .into_iter()
            .find(|priority| priority.as_str() == s)
            .ok_or_else(|| ParseError::UnknownPriority(s.to_string()))
    }
}

/// Kind of activity a task represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Study,
    Exam,
    #[serde(rename = "Clinical Experience")]
    ClinicalExperience,
    Research,
    Volunteering,
    Shadowing,
    Application,
    Extracurricular,
    Personal,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::Study,
        Category::Exam,
        Category::ClinicalExperience,
        Category::Research,
        Category::Volunteering,
        Category::Shadowing,
        Category::Application,
        Category::Extracurricular,
        Category::Personal,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Study => "Study",
            Category::Exam => "Exam",
            Category::ClinicalExperience => "Clinical Experience",
            Category::Research => "Research",
            Category::Volunteering => "Volunteering",
            Category::Shadowing => "Shadowing",
            Category::Application => "Application",
            Category::Extracurricular => "Extracurricular",
            Category::Personal => "Personal",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| ParseError::UnknownCategory(s.to_string()))
    }
}

/// `HH:MM` time of day, written as `""` when absent. `HH:MM:SS` is also read.
mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";
    const WITH_SECONDS: &str = "%H:%M:%S";

    pub fn serialize<S: Serializer>(time: &Option<NaiveTime>, s: S) -> Result<S::Ok, S::Error> {
        match time {
            Some(time) => s.collect_str(&time.format(FORMAT)),
            None => s.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveTime>, D::Error> {
        let raw: Option<String> = Option::deserialize(d)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => NaiveTime::parse_from_str(raw, FORMAT)
                .or_else(|_| NaiveTime::parse_from_str(raw, WITH_SECONDS))
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}

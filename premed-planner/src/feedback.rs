use crate::clock::RecordId;
use crate::error::{ParseError, ValidationError};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// A reflection or comment left by a student, counselor or parent.
///
/// Serialized flat with a `type` discriminant next to the common fields,
/// e.g. `{"id":1,"type":"Student","name":"Ana","mood":"Good",...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub id: RecordId,
    pub name: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub comment: String,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub role: FeedbackRole,
}

impl Feedback {
    pub fn kind(&self) -> FeedbackKind {
        self.role.kind()
    }
}

/// The role-specific part of a feedback entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FeedbackRole {
    Student { mood: Mood },
    Counselor { rating: Rating },
    Parent { relation: String },
}

impl FeedbackRole {
    pub fn kind(&self) -> FeedbackKind {
        match self {
            FeedbackRole::Student { .. } => FeedbackKind::Student,
            FeedbackRole::Counselor { .. } => FeedbackKind::Counselor,
            FeedbackRole::Parent { .. } => FeedbackKind::Parent,
        }
    }
}

/// Discriminant of [`FeedbackRole`], used for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeedbackKind {
    Student,
    Counselor,
    Parent,
}

impl FeedbackKind {
    pub const ALL: [FeedbackKind; 3] = [
        FeedbackKind::Student,
        FeedbackKind::Counselor,
        FeedbackKind::Parent,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FeedbackKind::Student => "Student",
            FeedbackKind::Counselor => "Counselor",
            FeedbackKind::Parent => "Parent",
        }
    }
}

impl Display for FeedbackKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeedbackKind {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FeedbackKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ParseError::UnknownFeedbackKind(s.to_string()))
    }
}

/// How a student felt when writing a reflection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mood {
    Excellent,
    Good,
    Okay,
    Stressed,
    Overwhelmed,
}

impl Mood {
    pub const ALL: [Mood; 5] = [
        Mood::Excellent,
        Mood::Good,
        Mood::Okay,
        Mood::Stressed,
        Mood::Overwhelmed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Mood::Excellent => "Excellent",
            Mood::Good => "Good",
            Mood::Okay => "Okay",
            Mood::Stressed => "Stressed",
            Mood::Overwhelmed => "Overwhelmed",
        }
    }
}

impl Display for Mood {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mood {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mood::ALL
            .into_iter()
            .find(|mood| mood.as_str() == s)
            .ok_or_else(|| ParseError::UnknownMood(s.to_string()))
    }
}

/// A counselor's assessment of the student's progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rating {
    Excellent,
    Good,
    Satisfactory,
    #[serde(rename = "Needs Improvement")]
    NeedsImprovement,
}

impl Rating {
    pub const ALL: [Rating; 4] = [
        Rating::Excellent,
        Rating::Good,
        Rating::Satisfactory,
        Rating::NeedsImprovement,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Rating::Excellent => "Excellent",
            Rating::Good => "Good",
            Rating::Satisfactory => "Satisfactory",
            Rating::NeedsImprovement => "Needs Improvement",
        }
    }
}

impl Display for Rating {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rating {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rating::ALL
            .into_iter()
            .find(|rating| rating.as_str() == s)
            .ok_or_else(|| ParseError::UnknownRating(s.to_string()))
    }
}

/// Everything a caller supplies to record feedback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackInput {
    pub name: String,
    pub date: NaiveDate,
    pub comment: String,
    pub role: FeedbackRole,
}

impl FeedbackInput {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        Ok(())
    }

    /// Returns a copy with surrounding whitespace removed from name and comment.
    pub fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            comment: self.comment.trim().to_string(),
            ..self.clone()
        }
    }

    pub(crate) fn into_feedback(self, id: RecordId, created_at: DateTime<Utc>) -> Feedback {
        Feedback {
            id,
            name: self.name,
            date: self.date,
            comment: self.comment,
            created_at,
            role: self.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_each_role() {
        // Arrange
        let json = r#"[
            {"id": 3, "type": "Parent", "name": "Rosa", "date": "2024-01-12",
             "relation": "Mother", "comment": "Proud", "createdAt": "2024-01-12T09:00:00.000Z"},
            {"id": 2, "type": "Counselor", "name": "Mr. Park", "date": "2024-01-11",
             "rating": "Needs Improvement", "comment": "More hours", "createdAt": "2024-01-11T09:00:00.000Z"},
            {"id": 1, "type": "Student", "name": "Ana", "date": "2024-01-10",
             "mood": "Stressed", "comment": "Orgo exam", "createdAt": "2024-01-10T09:00:00.000Z"}
        ]"#;

        // Act
        let feedbacks: Vec<Feedback> = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(
            feedbacks[0].role,
            FeedbackRole::Parent {
                relation: "Mother".to_string()
            }
        );
        assert_eq!(
            feedbacks[1].role,
            FeedbackRole::Counselor {
                rating: Rating::NeedsImprovement
            }
        );
        assert_eq!(
            feedbacks[2].role,
            FeedbackRole::Student {
                mood: Mood::Stressed
            }
        );
        assert_eq!(feedbacks[2].kind(), FeedbackKind::Student);
    }

    #[test]
    fn test_student_serializes_mood_only() {
        let feedback = FeedbackInput {
            name: "Ana".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            comment: "Good week".to_string(),
            role: FeedbackRole::Student { mood: Mood::Good },
        }
        .into_feedback(1, "2024-01-10T09:00:00Z".parse().unwrap());

        let json = serde_json::to_value(&feedback).unwrap();

        assert_eq!(json["type"], "Student");
        assert_eq!(json["mood"], "Good");
        assert!(json.get("rating").is_none());
        assert!(json.get("relation").is_none());
    }

    #[test]
    fn test_missing_variant_field_is_rejected() {
        let json = r#"{"id": 1, "type": "Counselor", "name": "Mr. Park", "date": "2024-01-11",
            "comment": "", "createdAt": "2024-01-11T09:00:00Z"}"#;

        assert!(serde_json::from_str::<Feedback>(json).is_err());
    }

    #[test]
    fn test_validate_rejects_blank_name() {
        let input = FeedbackInput {
            name: " ".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            comment: String::new(),
            role: FeedbackRole::Parent {
                relation: "Father".to_string(),
            },
        };

        assert_eq!(input.validate(), Err(ValidationError::EmptyName));
    }

    #[test]
    fn test_parse_kind_mood_and_rating() {
        assert_eq!("Counselor".parse::<FeedbackKind>(), Ok(FeedbackKind::Counselor));
        assert_eq!("Overwhelmed".parse::<Mood>(), Ok(Mood::Overwhelmed));
        assert_eq!(
            "Needs Improvement".parse::<Rating>(),
            Ok(Rating::NeedsImprovement)
        );
        assert_eq!(
            "Mentor".parse::<FeedbackKind>(),
            Err(ParseError::UnknownFeedbackKind("Mentor".to_string()))
        );
    }
}

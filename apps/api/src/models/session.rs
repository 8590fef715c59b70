use std::fmt;

use serde::Serialize;

/// Body shown in place of the optimized CV when the match reply could not be parsed.
pub const PARSE_FAILURE_MESSAGE: &str = "Failed to parse AI response";

/// A match score as displayed: the digits exactly as the model wrote them,
/// or the `Error` sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum Score {
    Percent(String),
    Error,
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Score::Percent(digits) => f.write_str(digits),
            Score::Error => f.write_str("Error"),
        }
    }
}

impl From<Score> for String {
    fn from(score: Score) -> Self {
        score.to_string()
    }
}

/// The three match fields. They only ever exist together.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub original_score: Score,
    pub optimized_score: Score,
    pub optimized_cv_text: String,
}

impl MatchResult {
    /// What the user sees when the reply did not follow the template.
    pub fn parse_failure() -> Self {
        Self {
            original_score: Score::Error,
            optimized_score: Score::Error,
            optimized_cv_text: PARSE_FAILURE_MESSAGE.to_string(),
        }
    }
}

/// Outcome of a simulated assignment submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionResult {
    pub assignment_result: String,
    pub feedback: String,
}

/// A competency missing from the CV, with a suggested mini-assignment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillGap {
    pub skill: String,
    pub description: String,
    pub result: Option<SubmissionResult>,
}

impl SkillGap {
    pub fn new(skill: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            skill: skill.into(),
            description: description.into(),
            result: None,
        }
    }
}

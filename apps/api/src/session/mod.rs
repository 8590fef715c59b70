//! Session state and the pure reducers that move it forward.
//!
//! Every user action is a function `(&SessionState, payload) -> next state`.
//! Nothing here touches the network or the store; handlers own those.

pub mod store;

use serde::Serialize;
use thiserror::Error;

use crate::matching::workflow::MatchReport;
use crate::models::session::{MatchResult, SkillGap, SubmissionResult};

/// File name offered for the optimized CV download.
pub const DOWNLOAD_FILENAME: &str = "optimized_cv.txt";

const SUBMISSION_RESULT: &str = "Submitted Successfully";
const SUBMISSION_FEEDBACK: &str = "Great effort! You're on the right track.";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Both CV text and job description are required")]
    MissingInput,

    #[error("A match request is already in progress")]
    AlreadyLoading,

    #[error("Skill gap {index} does not exist (session has {len})")]
    SkillGapOutOfRange { index: usize, len: usize },
}

/// Everything one user session holds. Starts empty; never persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionState {
    pub cv_text: String,
    pub jd_text: String,
    /// `None` until the first workflow completes.
    pub match_result: Option<MatchResult>,
    pub skill_gaps: Vec<SkillGap>,
    pub loading: bool,
}

/// The optimized CV as a file the client can save.
#[derive(Debug, Clone, PartialEq)]
pub struct CvDownload {
    pub filename: &'static str,
    pub contents: String,
}

/// Replaces both input texts.
pub fn set_inputs(state: &SessionState, cv_text: String, jd_text: String) -> SessionState {
    SessionState {
        cv_text,
        jd_text,
        ..state.clone()
    }
}

/// Starts a match workflow. Refused while one is in flight or an input is blank.
pub fn begin_match(state: &SessionState) -> Result<SessionState, SessionError> {
    if state.loading {
        return Err(SessionError::AlreadyLoading);
    }
    if state.cv_text.trim().is_empty() || state.jd_text.trim().is_empty() {
        return Err(SessionError::MissingInput);
    }

    Ok(SessionState {
        loading: true,
        ..state.clone()
    })
}

/// Applies a finished workflow and clears `loading`.
///
/// The three match fields are replaced as one unit; skill gaps are replaced
/// wholesale (an empty list hides the panel).
pub fn complete_match(state: &SessionState, report: MatchReport) -> SessionState {
    SessionState {
        match_result: Some(report.outcome.into_result()),
        skill_gaps: report.skill_gaps,
        loading: false,
        ..state.clone()
    }
}

/// Marks the skill gap at `index` as submitted. Other entries are untouched.
pub fn simulate_submission(
    state: &SessionState,
    index: usize,
) -> Result<SessionState, SessionError> {
    let len = state.skill_gaps.len();
    if index >= len {
        return Err(SessionError::SkillGapOutOfRange { index, len });
    }

    let mut next = state.clone();
    next.skill_gaps[index].result = Some(SubmissionResult {
        assignment_result: SUBMISSION_RESULT.to_string(),
        feedback: SUBMISSION_FEEDBACK.to_string(),
    });
    Ok(next)
}

/// The optimized CV as a download, once a match has completed.
pub fn download(state: &SessionState) -> Option<CvDownload> {
    state.match_result.as_ref().map(|m| CvDownload {
        filename: DOWNLOAD_FILENAME,
        contents: m.optimized_cv_text.clone(),
    })
}

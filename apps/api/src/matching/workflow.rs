//! Match workflow — both prompts, both calls, both parsers.
//!
//! The two calls are independent, so they are issued together and joined.
//! Neither can fail outward: `call_ai` folds every error into text, which the
//! parsers then treat like any other unexpected reply.

use tracing::{debug, info, warn};

use crate::llm_client::{CompletionBackend, ResponseFormat};
use crate::matching::parser::{parse_match_response, parse_skill_gaps, MatchOutcome};
use crate::matching::prompts::{
    build_match_score_prompt, build_skill_gaps_prompt, match_score_schema, skill_gaps_schema,
};
use crate::models::session::SkillGap;

/// Everything one workflow run produces.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchReport {
    pub outcome: MatchOutcome,
    pub skill_gaps: Vec<SkillGap>,
}

pub async fn run_match(
    backend: &dyn CompletionBackend,
    cv_text: &str,
    jd_text: &str,
    structured_output: bool,
) -> MatchReport {
    let (match_format, gaps_format) = if structured_output {
        (
            ResponseFormat::Json(match_score_schema()),
            ResponseFormat::Json(skill_gaps_schema()),
        )
    } else {
        (ResponseFormat::Text, ResponseFormat::Text)
    };

    let match_prompt = build_match_score_prompt(cv_text, jd_text);
    let gaps_prompt = build_skill_gaps_prompt(cv_text, jd_text);

    let (match_raw, gaps_raw) = tokio::join!(
        backend.call_ai(&match_prompt, &match_format),
        backend.call_ai(&gaps_prompt, &gaps_format),
    );

    debug!("Match score response: {match_raw}");
    debug!("Skill gaps response: {gaps_raw}");

    let outcome = parse_match_response(&match_raw);
    if outcome == MatchOutcome::ParseFailure {
        warn!("Match score response did not follow the expected format");
    }

    let skill_gaps = parse_skill_gaps(&gaps_raw);
    info!(
        "Match workflow finished: parsed={}, skill_gaps={}",
        matches!(outcome, MatchOutcome::Parsed(_)),
        skill_gaps.len()
    );

    MatchReport {
        outcome,
        skill_gaps,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    use crate::llm_client::{LlmError, CALL_FAILED_PREFIX};
    use crate::models::session::Score;

    /// Backend that answers by prompt kind and records what it was asked.
    #[derive(Default)]
    pub struct ScriptedBackend {
        pub match_reply: Option<String>,
        pub gaps_reply: Option<String>,
        pub fail: bool,
        pub seen_formats: Mutex<Vec<ResponseFormat>>,
    }

    impl ScriptedBackend {
        pub fn replying(match_reply: &str, gaps_reply: &str) -> Self {
            Self {
                match_reply: Some(match_reply.to_string()),
                gaps_reply: Some(gaps_reply.to_string()),
                ..Default::default()
            }
        }

        pub fn failing() -> Self {
            Self {
                fail: true,
                ..Default::default()
            }
        }
    }

    #[async_trait]
    impl CompletionBackend for ScriptedBackend {
        async fn generate(
            &self,
            prompt: &str,
            format: &ResponseFormat,
        ) -> Result<Option<String>, LlmError> {
            self.seen_formats.lock().unwrap().push(format.clone());
            if self.fail {
                return Err(LlmError::Parse(
                    serde_json::from_str::<serde_json::Value>("not json").unwrap_err(),
                ));
            }
            if prompt.contains("identify 3-5 key skill gaps") {
                Ok(self.gaps_reply.clone())
            } else {
                Ok(self.match_reply.clone())
            }
        }
    }

    pub const MATCH_REPLY: &str =
        "Original CV Match Score: 72%\nOptimized CV Text: Sample body\nOptimized CV Match Score: 88%";
    pub const GAPS_REPLY: &str =
        "Skill Gaps:\n- Communication: Write a 1-paragraph status update.\n- SQL: Practice a JOIN query.";

    #[tokio::test]
    async fn test_run_match_parses_both_replies() {
        let backend = ScriptedBackend::replying(MATCH_REPLY, GAPS_REPLY);
        let report = run_match(&backend, "cv", "jd", false).await;

        let MatchOutcome::Parsed(result) = report.outcome else {
            panic!("expected a parsed match");
        };
        assert_eq!(result.original_score, Score::Percent("72".into()));
        assert_eq!(result.optimized_score, Score::Percent("88".into()));
        assert_eq!(report.skill_gaps.len(), 2);
        assert_eq!(report.skill_gaps[1].skill, "SQL");
    }

    #[tokio::test]
    async fn test_run_match_degrades_when_backend_fails() {
        let backend = ScriptedBackend::failing();
        let report = run_match(&backend, "cv", "jd", false).await;

        assert_eq!(report.outcome, MatchOutcome::ParseFailure);
        assert!(report.skill_gaps.is_empty());
    }

    #[tokio::test]
    async fn test_run_match_degrades_when_reply_has_no_text() {
        let backend = ScriptedBackend::default();
        let report = run_match(&backend, "cv", "jd", false).await;

        assert_eq!(report.outcome, MatchOutcome::ParseFailure);
        assert!(report.skill_gaps.is_empty());
    }

    #[tokio::test]
    async fn test_failure_text_mentions_the_call_error() {
        let backend = ScriptedBackend::failing();
        let text = backend.call_ai("p", &ResponseFormat::Text).await;
        assert!(text.starts_with(CALL_FAILED_PREFIX));
    }

    #[tokio::test]
    async fn test_structured_mode_requests_json_for_both_calls() {
        let backend = ScriptedBackend::replying(
            r#"{"original_score": 10, "optimized_cv_text": "x", "optimized_score": 20}"#,
            r#"{"skill_gaps": []}"#,
        );
        let report = run_match(&backend, "cv", "jd", true).await;

        assert!(matches!(report.outcome, MatchOutcome::Parsed(_)));
        let formats = backend.seen_formats.lock().unwrap();
        assert_eq!(formats.len(), 2);
        assert!(formats.iter().all(|f| matches!(f, ResponseFormat::Json(_))));
    }
}

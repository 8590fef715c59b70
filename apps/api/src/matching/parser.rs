//! Response parsers — pure functions from a raw model reply to display fields.
//!
//! Both parsers first try the structured (JSON) shape, then fall back to the
//! free-text template. The model is not bound to either format, so a parse
//! failure is an ordinary outcome, not an exceptional one.

use std::sync::OnceLock;

use regex::Regex;
use serde::Deserialize;

use crate::llm_client::strip_json_fences;
use crate::models::session::{MatchResult, Score, SkillGap};

/// Tagged result of parsing the match-score reply.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchOutcome {
    Parsed(MatchResult),
    ParseFailure,
}

impl MatchOutcome {
    /// Collapses the outcome into what the session shows; failures become sentinels.
    pub fn into_result(self) -> MatchResult {
        match self {
            MatchOutcome::Parsed(result) => result,
            MatchOutcome::ParseFailure => MatchResult::parse_failure(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct StructuredMatch {
    original_score: u32,
    optimized_cv_text: String,
    optimized_score: u32,
}

#[derive(Debug, Deserialize)]
struct StructuredSkillGaps {
    skill_gaps: Vec<StructuredSkillGap>,
}

#[derive(Debug, Deserialize)]
struct StructuredSkillGap {
    skill: String,
    description: String,
}

fn match_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // Body is lazy so it stops at the first optimized-score marker. Digit
        // groups are ASCII only; `\d` would also take other scripts' digits.
        Regex::new(
            r"(?s)Original CV Match Score:\s*([0-9]+)%.*?Optimized CV Text:\s*(.*?)Optimized CV Match Score:\s*([0-9]+)%",
        )
        .expect("Invalid match score regex")
    })
}

fn bullet_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*- (.+?): (.*)$").expect("Invalid skill gap bullet regex")
    })
}

/// Parses the match-score reply into scores and the optimized CV body.
pub fn parse_match_response(raw: &str) -> MatchOutcome {
    if let Ok(structured) = serde_json::from_str::<StructuredMatch>(strip_json_fences(raw)) {
        return MatchOutcome::Parsed(MatchResult {
            original_score: Score::Percent(structured.original_score.to_string()),
            optimized_score: Score::Percent(structured.optimized_score.to_string()),
            optimized_cv_text: structured.optimized_cv_text.trim().to_string(),
        });
    }

    let Some(caps) = match_regex().captures(raw) else {
        return MatchOutcome::ParseFailure;
    };

    MatchOutcome::Parsed(MatchResult {
        original_score: Score::Percent(caps[1].to_string()),
        optimized_score: Score::Percent(caps[3].to_string()),
        optimized_cv_text: caps[2].trim().to_string(),
    })
}

/// Parses the skill-gap reply into entries, each with no submission result.
///
/// Line-oriented: a `- Skill: description` line opens an entry, following
/// non-bullet lines extend its description, a blank line closes it. Text
/// before the first bullet is ignored. No bullets yields an empty list.
pub fn parse_skill_gaps(raw: &str) -> Vec<SkillGap> {
    if let Ok(structured) = serde_json::from_str::<StructuredSkillGaps>(strip_json_fences(raw)) {
        return structured
            .skill_gaps
            .into_iter()
            .map(|g| SkillGap::new(g.skill.trim(), g.description.trim()))
            .collect();
    }

    let mut gaps = Vec::new();
    let mut open: Option<SkillGap> = None;

    for line in raw.lines() {
        if let Some(caps) = bullet_regex().captures(line) {
            gaps.extend(open.take());
            open = Some(SkillGap::new(
                caps[1].trim().trim_matches('*').trim(),
                caps[2].trim(),
            ));
        } else if line.trim().is_empty() {
            gaps.extend(open.take());
        } else if let Some(gap) = open.as_mut() {
            if !gap.description.is_empty() {
                gap.description.push(' ');
            }
            gap.description.push_str(line.trim());
        }
    }
    gaps.extend(open);

    gaps
}

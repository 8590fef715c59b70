// All LLM prompt constants for the matching workflow.
// Templates are filled with `str::replace`; placeholders are `{cv_text}` and `{jd_text}`.

use serde_json::{json, Value};

/// Match-score prompt. The three-line format at the end is what
/// `parser::parse_match_response` expects back.
pub const MATCH_SCORE_PROMPT_TEMPLATE: &str = "Analyze the following Candidate CV and Job Description.
CV: {cv_text}
Job Description: {jd_text}

Provide a score for how well the CV matches the JD out of 100.
Then, provide an optimized version of the CV that is better tuned to the Job Description.
Finally, give a new score for the optimized CV out of 100.

Format your response clearly with these exact sections:
Original CV Match Score: [Score]%
Optimized CV Text: [Optimized CV Content]
Optimized CV Match Score: [Score]%";

/// Skill-gap prompt. Each gap comes back as one `- Skill: assignment` bullet.
pub const SKILL_GAPS_PROMPT_TEMPLATE: &str = "Based on the following Candidate CV and Job Description, identify 3-5 key skill gaps.
CV: {cv_text}
Job Description: {jd_text}

For each skill gap, suggest a very brief mini-assignment or learning snippet (1-2 sentences) to help close that gap.

Format your response clearly with these exact sections:
Skill Gaps:
- [Skill 1]: [Mini-assignment/Learning snippet]
- [Skill 2]: [Mini-assignment/Learning snippet]";

pub fn build_match_score_prompt(cv_text: &str, jd_text: &str) -> String {
    fill(MATCH_SCORE_PROMPT_TEMPLATE, cv_text, jd_text)
}

pub fn build_skill_gaps_prompt(cv_text: &str, jd_text: &str) -> String {
    fill(SKILL_GAPS_PROMPT_TEMPLATE, cv_text, jd_text)
}

// Split on the template's own placeholders so user text that happens to
// contain `{jd_text}` is never substituted a second time.
fn fill(template: &str, cv_text: &str, jd_text: &str) -> String {
    template
        .split("{cv_text}")
        .map(|chunk| chunk.replace("{jd_text}", jd_text))
        .collect::<Vec<_>>()
        .join(cv_text)
}

/// Response schema for the match-score call in structured-output mode.
pub fn match_score_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "original_score": {"type": "INTEGER"},
            "optimized_cv_text": {"type": "STRING"},
            "optimized_score": {"type": "INTEGER"}
        },
        "required": ["original_score", "optimized_cv_text", "optimized_score"]
    })
}

/// Response schema for the skill-gap call in structured-output mode.
pub fn skill_gaps_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "skill_gaps": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "skill": {"type": "STRING"},
                        "description": {"type": "STRING"}
                    },
                    "required": ["skill", "description"]
                }
            }
        },
        "required": ["skill_gaps"]
    })
}

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::json;
use ureq::Agent;

use super::grade::{GameAnalysis, Grade};
use super::{AnalysisError, Analyst};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

const SYSTEM_PROMPT: &str = "You are a sarcastic but good-natured arcade commentator. \
You review a single finished game of classic Snake played on a small square grid, where each food \
is worth 10 points. Reply with one or two short sentences of commentary and a letter grade \
from S (legendary) through A, B, C, D down to F (embarrassing). No emoji.";

#[derive(Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

impl Content {
    fn text(role: Option<&str>, text: String) -> Self {
        Self {
            role: role.map(str::to_string),
            parts: vec![Part { text }],
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: serde_json::Value,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Request {
    system_instruction: Content,
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

impl Request {
    fn new(score: u32, length: usize) -> Self {
        let grades: Vec<&str> = Grade::AWARDED.iter().map(Grade::as_str).collect();

        Self {
            system_instruction: Content::text(None, SYSTEM_PROMPT.to_string()),
            contents: vec![Content::text(
                Some("user"),
                format!("The player finished with a score of {score} and a snake length of {length}."),
            )],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: json!({
                    "type": "OBJECT",
                    "properties": {
                        "commentary": { "type": "STRING" },
                        "grade": { "type": "STRING", "enum": grades },
                    },
                    "required": ["commentary", "grade"],
                }),
            },
        }
    }
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Deserialize)]
struct Response {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl Response {
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content.parts.iter().map(|part| part.text.as_str()).collect();
        (!text.trim().is_empty()).then_some(text)
    }
}

/// What the model is asked to return
#[derive(Deserialize)]
struct Verdict {
    commentary: String,
    grade: String,
}

/// Turn the model's JSON text into an analysis
fn parse_verdict(text: &str) -> Result<GameAnalysis, AnalysisError> {
    let verdict: Verdict = serde_json::from_str(text)?;
    let grade = verdict
        .grade
        .parse::<Grade>()
        .map_err(AnalysisError::UnknownGrade)?;

    let commentary = verdict.commentary.trim();
    if commentary.is_empty() {
        return Err(AnalysisError::EmptyResponse);
    }

    Ok(GameAnalysis {
        commentary: commentary.to_string(),
        grade,
    })
}

/// Gemini `generateContent` client
pub struct GeminiAnalyst {
    agent: Agent,
    api_key: String,
    model: String,
}

impl GeminiAnalyst {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        let config = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(20)))
            .build();

        Self {
            agent: Agent::new_with_config(config),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{API_BASE}/{}:generateContent", self.model)
    }
}

impl Analyst for GeminiAnalyst {
    fn analyze(&self, score: u32, length: usize) -> Result<GameAnalysis, AnalysisError> {
        let mut response = self
            .agent
            .post(self.endpoint())
            .header("x-goog-api-key", self.api_key.as_str())
            .send_json(Request::new(score, length))?;

        let body: Response = response.body_mut().read_json()?;
        let text = body.text().ok_or(AnalysisError::EmptyResponse)?;

        parse_verdict(&text)
    }
}

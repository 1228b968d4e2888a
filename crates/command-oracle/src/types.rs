use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OracleKind {
    /// OpenAI-compatible `/v1/chat/completions` endpoint.
    OpenAi,
    /// Offline keyword interpreter, for bench runs without a model.
    Keyword,
}

/// Oracle backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OracleConfig {
    pub kind: OracleKind,
    pub endpoint: String,
    pub model: String,
    pub temperature: f32,
    /// Environment variable holding the bearer token, if the endpoint needs one.
    pub api_key_env: String,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            kind: OracleKind::OpenAi,
            endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
            model: "gpt-4o-mini".to_string(),
            temperature: 0.0,
            api_key_env: "OPENAI_API_KEY".to_string(),
        }
    }
}

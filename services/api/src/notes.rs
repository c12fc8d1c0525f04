use async_trait::async_trait;
use health_profiler::config::NotesConfig;
use health_profiler::workflows::profiles::{
    DisabledNotes, NotesError, NotesGenerator, NotesPrompt,
};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

const MAX_NOTE_TOKENS: u32 = 300;
const NOTE_TEMPERATURE: f32 = 0.4;

/// Notes generator backed by an OpenAI-compatible chat completions endpoint.
pub(crate) struct HttpNotesGenerator {
    client: Client,
    completions_url: String,
    api_key: Option<String>,
    model: String,
}

impl HttpNotesGenerator {
    /// Returns `Ok(None)` when no endpoint is configured.
    pub(crate) fn from_config(config: &NotesConfig) -> Result<Option<Self>, NotesError> {
        let Some(endpoint) = config.endpoint.as_deref() else {
            return Ok(None);
        };

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| NotesError::Transport(err.to_string()))?;

        Ok(Some(Self {
            client,
            completions_url: format!("{}/chat/completions", endpoint.trim_end_matches('/')),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        }))
    }

    fn completion_request(&self, prompt: &NotesPrompt) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.render(),
            }],
            max_tokens: MAX_NOTE_TOKENS,
            temperature: NOTE_TEMPERATURE,
        }
    }
}

#[async_trait]
impl NotesGenerator for HttpNotesGenerator {
    async fn generate(&self, prompt: &NotesPrompt) -> Result<String, NotesError> {
        let mut request = self
            .client
            .post(&self.completions_url)
            .json(&self.completion_request(prompt));
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|err| NotesError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotesError::Transport(format!("status {status}: {body}")));
        }

        let payload: ChatResponse = response
            .json()
            .await
            .map_err(|err| NotesError::InvalidResponse(err.to_string()))?;
        let text = first_choice(payload)?;
        debug!(chars = text.len(), "notes generated");
        Ok(text)
    }
}

/// Notes backend selected from configuration at startup.
pub(crate) enum ConfiguredNotes {
    Http(HttpNotesGenerator),
    Disabled(DisabledNotes),
}

impl ConfiguredNotes {
    pub(crate) fn from_config(config: &NotesConfig) -> Result<Self, NotesError> {
        Ok(match HttpNotesGenerator::from_config(config)? {
            Some(generator) => Self::Http(generator),
            None => Self::Disabled(DisabledNotes),
        })
    }

    pub(crate) fn is_enabled(&self) -> bool {
        matches!(self, Self::Http(_))
    }
}

#[async_trait]
impl NotesGenerator for ConfiguredNotes {
    async fn generate(&self, prompt: &NotesPrompt) -> Result<String, NotesError> {
        match self {
            Self::Http(generator) => generator.generate(prompt).await,
            Self::Disabled(generator) => generator.generate(prompt).await,
        }
    }
}

fn first_choice(response: ChatResponse) -> Result<String, NotesError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|content| content.trim().to_string())
        .ok_or_else(|| NotesError::InvalidResponse("no choices in response".to_string()))
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

//! Model Router: the text generator behind the gateway.
//!
//! `Mock` streams a canned, mode-aware reply word by word. `Live` calls an
//! OpenAI-compatible chat completions endpoint (OpenRouter by default) with `stream: true`
//! and relays content deltas through a bounded channel.

use crate::sse::{SseDecoder, SseEvent};
use futures_util::StreamExt;
use moodgate_core::prompts::SUPPORTIVE_SYSTEM;
use moodgate_core::{
    api_key_from_env, FragmentReceiver, GatewayConfig, GenerationError, GenerationRequest,
    GenerationResult, LlmMode, TextGenerator,
};
use serde::Serialize;
use std::time::Duration;
use tokio::sync::mpsc;

const MOCK_SUPPORTIVE: &str = "[Mock reply] That sounds like a lot to carry, and it makes sense to feel this way. \
Try writing down the one thing weighing on you most and a small first step for it. \
What feels most pressing right now?";

const MOCK_EXPLORATORY: &str = "[Mock reply] That is a good thread to pull on. \
One way in is to pick a concrete example and trace it end to end. \
Which part would you like to dig into first?";

// OpenAI-compatible request structures
#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
    stream: bool,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

/// Endpoint settings for live mode.
#[derive(Debug, Clone)]
pub struct LiveSettings {
    pub api_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Explicit key; when `None` the key is resolved from the environment per request.
    pub api_key: Option<String>,
}

impl LiveSettings {
    pub fn from_config(config: &GatewayConfig) -> Self {
        Self {
            api_url: config.llm_api_url.clone(),
            model: config.llm_model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            api_key: None,
        }
    }

    fn resolve_key(&self) -> GenerationResult<String> {
        match self.api_key.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(key) => Ok(key.to_string()),
            None => api_key_from_env(),
        }
    }
}

/// Routes a generation request to the mock or a live API.
pub struct ModelRouter {
    mode: LlmMode,
    client: reqwest::Client,
    live: LiveSettings,
    channel_capacity: usize,
    mock_delay: Duration,
}

impl ModelRouter {
    pub fn from_config(config: &GatewayConfig) -> Self {
        Self {
            mode: config.mode(),
            client: reqwest::Client::new(),
            live: LiveSettings::from_config(config),
            channel_capacity: config.channel_capacity.max(1),
            mock_delay: Duration::from_millis(config.mock_delay_ms),
        }
    }

    pub fn with_mode(mode: LlmMode) -> Self {
        let mut router = Self::from_config(&GatewayConfig::default());
        router.mode = mode;
        router
    }

    pub fn with_live_settings(mut self, live: LiveSettings) -> Self {
        self.live = live;
        self
    }

    pub fn with_mock_delay(mut self, delay: Duration) -> Self {
        self.mock_delay = delay;
        self
    }

    pub fn mode(&self) -> LlmMode {
        self.mode
    }

    /// The missing-key error live mode would fail with right now, if any.
    pub fn missing_api_key(&self) -> Option<GenerationError> {
        match self.mode {
            LlmMode::Mock => None,
            LlmMode::Live => self.live.resolve_key().err(),
        }
    }

    /// Deterministic reply for the mock; the wording follows the selected mode.
    fn mock_generate(&self, request: &GenerationRequest) -> &'static str {
        if request.system_prompt == SUPPORTIVE_SYSTEM {
            MOCK_SUPPORTIVE
        } else {
            MOCK_EXPLORATORY
        }
    }

    /// Mock streaming: yields words with delays to simulate streaming.
    pub fn mock_stream_generate(&self, request: &GenerationRequest) -> FragmentReceiver {
        let (tx, rx) = mpsc::channel(self.channel_capacity);
        let reply = self.mock_generate(request);
        let delay = self.mock_delay;

        tokio::spawn(async move {
            for word in reply.split_inclusive(' ') {
                if tx.send(Ok(word.to_string())).await.is_err() {
                    tracing::debug!(target: "moodgate::model_router", "Mock stream receiver dropped");
                    break;
                }
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
            }
        });

        rx
    }

    /// Live API with streaming: sends [system, user] and streams content deltas via a channel.
    pub async fn stream_generate(&self, request: &GenerationRequest) -> GenerationResult<FragmentReceiver> {
        let key = self.live.resolve_key()?;
        let body = ChatRequest {
            model: &self.live.model,
            messages: vec![
                ChatMessage { role: "system", content: &request.system_prompt },
                ChatMessage { role: "user", content: &request.user_prompt },
            ],
            temperature: self.live.temperature,
            max_tokens: self.live.max_tokens,
            stream: true,
        };

        tracing::info!(
            target: "moodgate::model_router",
            model = %self.live.model,
            "[ModelRouter] Streaming session started for model: {}",
            self.live.model
        );

        let response = self
            .client
            .post(&self.live.api_url)
            .header("Authorization", format!("Bearer {}", key))
            .header("HTTP-Referer", "https://moodgate.local")
            .header("X-Title", "Moodgate")
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            tracing::error!(
                target: "moodgate::model_router",
                status = %status,
                "[ModelRouter] HTTP {} from LLM endpoint: {}",
                status,
                error_text
            );
            return Err(GenerationError::Status {
                status: status.as_u16(),
                body: error_text,
            });
        }

        tracing::info!(
            target: "moodgate::model_router",
            "[ModelRouter] HTTP {} OK - SSE stream established",
            status
        );

        let (tx, rx) = mpsc::channel(self.channel_capacity);
        let model_for_log = self.live.model.clone();

        tokio::spawn(async move {
            let mut stream = response.bytes_stream();
            let mut decoder = SseDecoder::default();

            loop {
                // Stop reading upstream as soon as the consumer goes away, even while idle.
                let next = tokio::select! {
                    _ = tx.closed() => {
                        tracing::debug!(target: "moodgate::model_router", "Receiver dropped, aborting upstream read");
                        return;
                    }
                    next = stream.next() => next,
                };

                let bytes = match next {
                    Some(Ok(bytes)) => bytes,
                    Some(Err(e)) => {
                        let _ = tx.send(Err(GenerationError::Transport(e.to_string()))).await;
                        return;
                    }
                    None => {
                        tracing::info!(
                            target: "moodgate::model_router",
                            "[ModelRouter] Upstream closed without [DONE] for model: {}",
                            model_for_log
                        );
                        return;
                    }
                };

                for event in decoder.push(&bytes) {
                    match event {
                        SseEvent::Text(text) => {
                            if tx.send(Ok(text)).await.is_err() {
                                return;
                            }
                        }
                        SseEvent::Done => {
                            tracing::info!(
                                target: "moodgate::model_router",
                                "[ModelRouter] Stream completed for model: {}",
                                model_for_log
                            );
                            return;
                        }
                        SseEvent::Error(message) => {
                            let _ = tx.send(Err(GenerationError::Upstream(message))).await;
                            return;
                        }
                    }
                }
            }
        });

        Ok(rx)
    }
}

impl Default for ModelRouter {
    fn default() -> Self {
        Self::with_mode(LlmMode::Mock)
    }
}

#[async_trait::async_trait]
impl TextGenerator for ModelRouter {
    fn name(&self) -> &str {
        self.mode.as_str()
    }

    fn preflight(&self) -> GenerationResult<()> {
        match self.missing_api_key() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    async fn stream(&self, request: GenerationRequest) -> GenerationResult<FragmentReceiver> {
        match self.mode {
            LlmMode::Mock => Ok(self.mock_stream_generate(&request)),
            LlmMode::Live => self.stream_generate(&request).await,
        }
    }
}

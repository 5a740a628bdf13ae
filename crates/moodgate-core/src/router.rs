//! Response router: picks the system prompt for a decision and starts generation.

use crate::decision::MoodDecision;
use crate::error::GenerationResult;
use crate::generator::{FragmentReceiver, GenerationRequest, TextGenerator};
use crate::prompts::{system_prompt, user_prompt};
use std::sync::Arc;

pub struct ResponseRouter {
    generator: Arc<dyn TextGenerator>,
}

impl ResponseRouter {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    pub fn generator_name(&self) -> &str {
        self.generator.name()
    }

    pub fn preflight(&self) -> GenerationResult<()> {
        self.generator.preflight()
    }

    /// The request that would be sent for `message` given its decision.
    pub fn build_request(message: &str, decision: &MoodDecision) -> GenerationRequest {
        GenerationRequest {
            system_prompt: system_prompt(decision.mode).to_string(),
            user_prompt: user_prompt(message, decision.mood, decision.mode),
        }
    }

    /// Issues exactly one streaming generation request for `message`.
    pub async fn route(
        &self,
        message: &str,
        decision: &MoodDecision,
    ) -> GenerationResult<FragmentReceiver> {
        let request = Self::build_request(message, decision);
        tracing::info!(
            target: "moodgate::router",
            generator = self.generator.name(),
            mode = %decision.mode,
            prompt_len = request.user_prompt.len(),
            "Routing message to generator"
        );
        self.generator.stream(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decision::{detect_mood, Mode};
    use crate::prompts::{EXPLORATORY_SYSTEM, SUPPORTIVE_SYSTEM};
    use std::sync::Mutex;
    use tokio::sync::mpsc;

    #[derive(Default)]
    struct Recording {
        requests: Mutex<Vec<GenerationRequest>>,
    }

    #[async_trait::async_trait]
    impl TextGenerator for Recording {
        fn name(&self) -> &str {
            "recording"
        }

        async fn stream(&self, request: GenerationRequest) -> GenerationResult<FragmentReceiver> {
            self.requests.lock().unwrap().push(request);
            let (_tx, rx) = mpsc::channel(1);
            Ok(rx)
        }
    }

    #[test]
    fn supportive_decision_uses_supportive_prompt() {
        let decision = detect_mood("I am so overwhelmed");
        assert_eq!(decision.mode, Mode::Supportive);
        let req = ResponseRouter::build_request("I am so overwhelmed", &decision);
        assert_eq!(req.system_prompt, SUPPORTIVE_SYSTEM);
        assert!(req.user_prompt.contains("Selected mode: Supportive"));
    }

    #[test]
    fn neutral_decision_uses_exploratory_prompt() {
        let decision = detect_mood("tell me about rust lifetimes");
        let req = ResponseRouter::build_request("tell me about rust lifetimes", &decision);
        assert_eq!(req.system_prompt, EXPLORATORY_SYSTEM);
    }

    #[tokio::test]
    async fn route_issues_a_single_request() {
        let generator = Arc::new(Recording::default());
        let router = ResponseRouter::new(generator.clone());
        let decision = detect_mood("I am curious and happy");
        router.route("I am curious and happy", &decision).await.unwrap();
        let requests = generator.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].user_prompt.starts_with("User message: I am curious and happy"));
    }
}

//! Recording adapter for the `LlmClient` port.

use std::sync::{Arc, Mutex};

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::{CompletionRequest, LlmClient, LlmFuture};

/// Records LLM interactions while delegating to an inner implementation.
pub struct RecordingLlmClient {
    inner: Box<dyn LlmClient>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingLlmClient {
    /// Creates a new recording LLM client wrapping the given implementation.
    pub fn new(inner: Box<dyn LlmClient>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl LlmClient for RecordingLlmClient {
    fn complete(&self, request: &CompletionRequest) -> LlmFuture<'_> {
        let request = request.clone();

        Box::pin(async move {
            let result = self.inner.complete(&request).await;
            record_result(&self.recorder, "llm", "complete", &request, &result);
            result
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::Cassette;
    use crate::ports::CompletionResponse;

    struct CannedLlm(&'static str);

    impl LlmClient for CannedLlm {
        fn complete(&self, _request: &CompletionRequest) -> LlmFuture<'_> {
            let text = self.0.to_string();
            Box::pin(async move {
                Ok(CompletionResponse { text, prompt_tokens: 3, completion_tokens: 5 })
            })
        }
    }

    #[tokio::test]
    async fn records_request_and_response() {
        let dir = std::env::temp_dir().join("techtasks_rec_llm_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("llm.cassette.yaml");

        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(&path, "test")));
        let request = CompletionRequest {
            model: "claude-sonnet-4-20250514".into(),
            system: "be terse".into(),
            prompt: "plan".into(),
            max_tokens: 64,
        };

        {
            let inner = Box::new(CannedLlm(r#"{"tasks": []}"#));
            let llm = RecordingLlmClient::new(inner, Arc::clone(&recorder));
            let response = llm.complete(&request).await.unwrap();
            assert_eq!(response.completion_tokens, 5);
        }

        let recorder = Arc::try_unwrap(recorder).unwrap().into_inner().unwrap();
        recorder.finish().unwrap();

        let cassette = Cassette::load(&path).unwrap();
        let interaction = &cassette.interactions[0];
        assert_eq!(interaction.method, "complete");
        assert_eq!(interaction.input["system"], "be terse");
        assert_eq!(interaction.output["ok"]["text"], r#"{"tasks": []}"#);

        let _ = std::fs::remove_dir_all(&dir);
    }
}

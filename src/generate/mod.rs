//! The generation pipeline: prompt, completion, parse.
//!
//! [`TaskGenerator::generate`] is the single entry point. It is stateless
//! between calls; everything it touches outside the process goes through
//! the ports in [`ServiceContext`].

pub mod output;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::context::ServiceContext;
use crate::error::{GenerateError, UpstreamError};
use crate::parse;
use crate::project::{ProjectPlan, WorkBreakdown};
use crate::prompt;
use crate::ports::CompletionRequest;
use crate::task::TaskList;

/// Model parameters for a generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Model identifier.
    pub model: String,
    /// Completion token budget.
    pub max_tokens: u32,
}

impl From<&Settings> for GeneratorConfig {
    fn from(settings: &Settings) -> Self {
        Self { model: settings.model.clone(), max_tokens: settings.max_tokens }
    }
}

/// Facts about one generation run, kept for auditing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationMetadata {
    /// Unique id of the run.
    pub run_id: String,
    /// Model the completion was requested from.
    pub model: String,
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// Wall time from prompt construction to validated list, in seconds.
    pub duration_secs: f64,
    /// Size of the raw completion in bytes.
    pub response_bytes: usize,
    /// Number of tasks in the validated list.
    pub task_count: usize,
    /// Prompt tokens reported by the model.
    pub prompt_tokens: u32,
    /// Completion tokens reported by the model.
    pub completion_tokens: u32,
}

/// The result of a successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct Generation {
    /// The validated task list.
    pub task_list: TaskList,
    /// System prompt sent to the model.
    pub system_prompt: String,
    /// User prompt sent to the model.
    pub user_prompt: String,
    /// Completion text exactly as received.
    pub raw_response: String,
    /// Run metadata.
    pub metadata: GenerationMetadata,
}

#[derive(Serialize)]
struct AuditRecord<'a> {
    metadata: &'a GenerationMetadata,
    system_prompt: &'a str,
    user_prompt: &'a str,
    raw_response: &'a str,
    task_list: &'a TaskList,
}

impl Generation {
    /// Pretty-printed audit record: metadata, both prompts, the raw
    /// completion and the validated list.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn audit_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&AuditRecord {
            metadata: &self.metadata,
            system_prompt: &self.system_prompt,
            user_prompt: &self.user_prompt,
            raw_response: &self.raw_response,
            task_list: &self.task_list,
        })
    }
}

/// Generates task lists from project plans.
pub struct TaskGenerator<'a> {
    ctx: &'a ServiceContext,
    config: GeneratorConfig,
}

impl<'a> TaskGenerator<'a> {
    /// Creates a generator using the ports in `ctx`.
    #[must_use]
    pub fn new(ctx: &'a ServiceContext, config: GeneratorConfig) -> Self {
        Self { ctx, config }
    }

    /// Runs one generation: build the prompt, ask the model, validate.
    ///
    /// No retries are attempted.
    ///
    /// # Errors
    ///
    /// - [`GenerateError::Input`] if the plan lacks a name or description;
    ///   the model is not called.
    /// - [`GenerateError::Upstream`] if the LLM port fails or returns no text.
    /// - [`GenerateError::Parse`] or [`GenerateError::Validation`] if the
    ///   completion is not a valid task list.
    pub async fn generate(
        &self,
        plan: &ProjectPlan,
        wbs: Option<&WorkBreakdown>,
    ) -> Result<Generation, GenerateError> {
        let run_id = self.ctx.id_gen.generate_id();
        let started_at = self.ctx.clock.now();
        info!(%run_id, model = %self.config.model, project = %plan.name, "generating task list");

        let result = self.run(plan, wbs, run_id.clone(), started_at).await;
        if let Err(err) = &result {
            warn!(%run_id, category = err.category(), error = %err, "generation failed");
        }
        result
    }

    async fn run(
        &self,
        plan: &ProjectPlan,
        wbs: Option<&WorkBreakdown>,
        run_id: String,
        started_at: DateTime<Utc>,
    ) -> Result<Generation, GenerateError> {
        let prompt = prompt::build(plan, wbs)?;
        debug!(system_len = prompt.system.len(), user_len = prompt.user.len(), "prompt built");

        let request = CompletionRequest {
            model: self.config.model.clone(),
            system: prompt.system.clone(),
            prompt: prompt.user.clone(),
            max_tokens: self.config.max_tokens,
        };
        let response = self.ctx.llm.complete(&request).await.map_err(UpstreamError::Llm)?;
        if response.text.trim().is_empty() {
            return Err(UpstreamError::EmptyResponse.into());
        }
        debug!(
            bytes = response.text.len(),
            prompt_tokens = response.prompt_tokens,
            completion_tokens = response.completion_tokens,
            "completion received"
        );

        let parsed = parse::parse_response(&response.text, &plan.name, &plan.description)?;

        let finished_at = self.ctx.clock.now();
        let duration_secs = (finished_at - started_at)
            .to_std()
            .map_or(0.0, |elapsed| elapsed.as_secs_f64());

        let metadata = GenerationMetadata {
            run_id,
            model: self.config.model.clone(),
            started_at,
            duration_secs,
            response_bytes: parsed.raw_response.len(),
            task_count: parsed.task_list.len(),
            prompt_tokens: response.prompt_tokens,
            completion_tokens: response.completion_tokens,
        };
        info!(
            run_id = %metadata.run_id,
            tasks = metadata.task_count,
            duration_secs = metadata.duration_secs,
            "task list generated"
        );

        Ok(Generation {
            task_list: parsed.task_list,
            system_prompt: prompt.system,
            user_prompt: prompt.user,
            raw_response: parsed.raw_response,
            metadata,
        })
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::error::Error;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use chrono::{DateTime, TimeZone, Utc};

    use crate::adapters::live::LiveFileSystem;
    use crate::context::ServiceContext;
    use crate::ports::{
        Clock, CompletionRequest, CompletionResponse, IdGenerator, LlmClient, LlmFuture,
    };

    /// Serves a fixed reply and remembers the last request.
    pub struct ScriptedLlm {
        reply: Result<String, String>,
        pub calls: AtomicUsize,
        pub last_request: Mutex<Option<CompletionRequest>>,
    }

    impl ScriptedLlm {
        fn with_reply(reply: Result<String, String>) -> Self {
            Self { reply, calls: AtomicUsize::new(0), last_request: Mutex::new(None) }
        }

        pub fn replying(text: &str) -> Self {
            Self::with_reply(Ok(text.to_string()))
        }

        pub fn failing(message: &str) -> Self {
            Self::with_reply(Err(message.to_string()))
        }
    }

    impl LlmClient for ScriptedLlm {
        fn complete(&self, request: &CompletionRequest) -> LlmFuture<'_> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_request.lock().unwrap() = Some(request.clone());
            let reply = self.reply.clone();
            Box::pin(async move {
                reply
                    .map(|text| CompletionResponse {
                        text,
                        prompt_tokens: 100,
                        completion_tokens: 50,
                    })
                    .map_err(|msg| -> Box<dyn Error + Send + Sync> { msg.into() })
            })
        }
    }

    impl LlmClient for std::sync::Arc<ScriptedLlm> {
        fn complete(&self, request: &CompletionRequest) -> LlmFuture<'_> {
            self.as_ref().complete(request)
        }
    }

    /// Advances three seconds per reading.
    pub struct SteppingClock(pub AtomicUsize);

    impl Clock for SteppingClock {
        fn now(&self) -> DateTime<Utc> {
            let step = self.0.fetch_add(1, Ordering::SeqCst);
            let base = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();
            base + chrono::Duration::seconds(3 * i64::try_from(step).unwrap())
        }
    }

    pub struct FixedId;

    impl IdGenerator for FixedId {
        fn generate_id(&self) -> String {
            "run-0001".to_string()
        }
    }

    pub fn context(llm: Box<dyn LlmClient>) -> ServiceContext {
        ServiceContext {
            llm,
            fs: Box::new(LiveFileSystem),
            clock: Box::new(SteppingClock(AtomicUsize::new(0))),
            id_gen: Box::new(FixedId),
        }
    }
}

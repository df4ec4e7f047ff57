//! Service context bundling all port trait objects.

use std::error::Error;
use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::adapters::live::{LiveClock, LiveFileSystem, LiveIdGenerator, LiveLlmClient};
use crate::adapters::recording::{
    RecordingClock, RecordingFileSystem, RecordingIdGenerator, RecordingLlmClient,
};
use crate::adapters::replaying::{
    ReplayingClock, ReplayingFileSystem, ReplayingIdGenerator, ReplayingLlmClient,
};
use crate::cassette::config::CassetteConfig;
use crate::cassette::session::RecordingSession;
use crate::config::Settings;
use crate::ports::{Clock, CompletionRequest, FileSystem, IdGenerator, LlmClient, LlmFuture};

/// Bundles all port trait objects into a single context.
///
/// Each field provides access to one external boundary. Constructors
/// wire up different adapter implementations (live, replaying, recording).
pub struct ServiceContext {
    /// LLM client for completions.
    pub llm: Box<dyn LlmClient>,
    /// Filesystem for reading plans and writing artifacts.
    pub fs: Box<dyn FileSystem>,
    /// Clock for timing generation runs.
    pub clock: Box<dyn Clock>,
    /// ID generator for run identifiers.
    pub id_gen: Box<dyn IdGenerator>,
}

impl ServiceContext {
    /// Creates a context backed entirely by live adapters.
    #[must_use]
    pub fn live(settings: &Settings) -> Self {
        Self {
            llm: Box::new(LiveLlmClient::new(settings.api_key.clone())),
            fs: Box::new(LiveFileSystem),
            clock: Box::new(LiveClock),
            id_gen: Box::new(LiveIdGenerator),
        }
    }

    /// Wraps every port of `inner` so its interactions are captured by
    /// `session`.
    ///
    /// The context must be dropped before `session.finish()` is called.
    #[must_use]
    pub fn recording(inner: Self, session: &RecordingSession) -> Self {
        Self {
            llm: Box::new(RecordingLlmClient::new(inner.llm, Arc::clone(&session.llm))),
            fs: Box::new(RecordingFileSystem::new(inner.fs, Arc::clone(&session.fs))),
            clock: Box::new(RecordingClock::new(inner.clock, Arc::clone(&session.clock))),
            id_gen: Box::new(RecordingIdGenerator::new(inner.id_gen, Arc::clone(&session.id_gen))),
        }
    }

    /// Creates a replaying context from per-port cassette files.
    ///
    /// Ports without a configured cassette use an adapter that panics with
    /// a clear message when called.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured cassette file cannot be read or parsed.
    pub fn replaying_from(config: &CassetteConfig) -> Result<Self, String> {
        let replayers = config.load_all()?;

        Ok(Self {
            llm: match replayers.llm {
                Some(r) => Box::new(ReplayingLlmClient::new(r)),
                None => Box::new(PanickingLlmClient),
            },
            fs: match replayers.fs {
                Some(r) => Box::new(ReplayingFileSystem::new(r)),
                None => Box::new(PanickingFileSystem),
            },
            clock: match replayers.clock {
                Some(r) => Box::new(ReplayingClock::new(r)),
                None => Box::new(PanickingClock),
            },
            id_gen: match replayers.id_gen {
                Some(r) => Box::new(ReplayingIdGenerator::new(r)),
                None => Box::new(PanickingIdGenerator),
            },
        })
    }

    /// Replaces the LLM port, keeping the others.
    #[must_use]
    pub fn with_llm(self, llm: Box<dyn LlmClient>) -> Self {
        Self { llm, ..self }
    }

    /// Replaces the filesystem port, keeping the others.
    #[must_use]
    pub fn with_fs(self, fs: Box<dyn FileSystem>) -> Self {
        Self { fs, ..self }
    }
}

// --- Panicking adapters for unspecified ports ---

struct PanickingLlmClient;
impl LlmClient for PanickingLlmClient {
    fn complete(&self, _request: &CompletionRequest) -> LlmFuture<'_> {
        panic!("LlmClient port not configured in CassetteConfig: no cassette loaded for llm");
    }
}

struct PanickingFileSystem;
impl FileSystem for PanickingFileSystem {
    fn read_to_string(&self, _path: &Path) -> Result<String, Box<dyn Error + Send + Sync>> {
        panic!("FileSystem port not configured in CassetteConfig: no cassette loaded for fs");
    }
    fn write(&self, _path: &Path, _contents: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        panic!("FileSystem port not configured in CassetteConfig: no cassette loaded for fs");
    }
}

struct PanickingClock;
impl Clock for PanickingClock {
    fn now(&self) -> DateTime<Utc> {
        panic!("Clock port not configured in CassetteConfig: no cassette loaded for clock");
    }
}

struct PanickingIdGenerator;
impl IdGenerator for PanickingIdGenerator {
    fn generate_id(&self) -> String {
        panic!("IdGenerator port not configured in CassetteConfig: no cassette loaded for id_gen");
    }
}

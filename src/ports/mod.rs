//! Port traits defining external boundaries.
//!
//! Each trait is a boundary between the generation pipeline and something
//! it does not control (the model, the disk, time, randomness).
//! Implementations live in `src/adapters/`.

pub mod clock;
pub mod filesystem;
pub mod id_gen;
pub mod llm;

pub use clock::Clock;
pub use filesystem::FileSystem;
pub use id_gen::IdGenerator;
pub use llm::{CompletionRequest, CompletionResponse, LlmClient, LlmFuture};

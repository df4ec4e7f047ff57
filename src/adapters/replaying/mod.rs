//! Replaying adapters that serve recorded interactions.

pub mod clock;
pub mod filesystem;
pub mod id_gen;
pub mod llm;

pub use clock::ReplayingClock;
pub use filesystem::ReplayingFileSystem;
pub use id_gen::ReplayingIdGenerator;
pub use llm::ReplayingLlmClient;

use std::error::Error;
use std::sync::{Mutex, PoisonError};

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::cassette::replayer::CassetteReplayer;

/// Take the output of the next `port::method` interaction.
pub(crate) fn next_output(replayer: &Mutex<CassetteReplayer>, port: &str, method: &str) -> Value {
    let mut guard = replayer.lock().unwrap_or_else(PoisonError::into_inner);
    guard.next_interaction(port, method).output.clone()
}

/// Decode an output written by `recording::record_result`.
///
/// `{"err": msg}` becomes `Err(msg)`; `{"ok": v}` is deserialized into `T`.
/// A bare value without either key is deserialized as-is so hand-written
/// cassettes can stay short.
pub(crate) fn replay_result<T: DeserializeOwned>(
    output: Value,
    context: &str,
) -> Result<T, Box<dyn Error + Send + Sync>> {
    if let Some(err) = output.get("err") {
        let msg = err.as_str().map_or_else(|| err.to_string(), str::to_string);
        return Err(msg.into());
    }
    let value = match output {
        Value::Object(mut map) if map.contains_key("ok") => map.remove("ok").unwrap_or(Value::Null),
        other => other,
    };
    serde_json::from_value(value).map_err(|e| format!("{context}: malformed recording: {e}").into())
}

/// Decode a plain (non-`Result`) output.
///
/// # Panics
///
/// Panics if the recording does not match the port's return type; there is
/// no error channel to report it through.
pub(crate) fn replay_value<T: DeserializeOwned>(output: Value, context: &str) -> T {
    serde_json::from_value(output)
        .unwrap_or_else(|e| panic!("{context}: malformed recording: {e}"))
}


#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn replay_result_reads_ok_err_and_bare_values() {
        let ok: String = replay_result(json!({"ok": "text"}), "t").unwrap();
        assert_eq!(ok, "text");

        let bare: u32 = replay_result(json!(7), "t").unwrap();
        assert_eq!(bare, 7);

        let err = replay_result::<String>(json!({"err": "boom"}), "t").unwrap_err();
        assert_eq!(err.to_string(), "boom");
    }

    #[test]
    fn replay_result_reports_shape_mismatch() {
        let err = replay_result::<u32>(json!({"ok": "not a number"}), "llm::complete").unwrap_err();
        assert!(err.to_string().starts_with("llm::complete: malformed recording"));
    }
}

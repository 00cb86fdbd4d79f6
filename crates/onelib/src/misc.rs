//! Identifiers and diagnostics

use std::fmt::Display;

use rand::Rng;

/// Random version-4 style identifier, `xxxxxxxx-xxxx-4xxx-yxxx-xxxxxxxxxxxx`.
///
/// Drawn from the thread-local RNG; do not use it where unpredictability
/// matters for security.
pub fn uuid() -> String {
    let bytes: [u8; 16] = rand::thread_rng().gen();
    uuid::Builder::from_random_bytes(bytes)
        .into_uuid()
        .hyphenated()
        .to_string()
}

/// Write the arguments, space-separated, to the diagnostic log
pub fn log<I>(args: I)
where
    I: IntoIterator,
    I::Item: Display,
{
    let line = args
        .into_iter()
        .map(|arg| arg.to_string())
        .collect::<Vec<_>>()
        .join(" ");
    tracing::info!(target: "onelib", "{}", line);
}

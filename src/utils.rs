use std::{borrow::Cow, collections::HashSet, future::Future, time::Duration};

use base64::{Engine, engine::general_purpose::STANDARD};
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;

/// Creates a steadily ticking spinner with the application's style.
pub fn spinner(message: impl Into<Cow<'static, str>>) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}

/// Runs `work` until it completes or `interrupt` fires first.
///
/// # Arguments
///
/// * `work` - The future whose output is wanted
/// * `interrupt` - A future that cancels `work` when it resolves, usually
///   `tokio::signal::ctrl_c()`
///
/// # Returns
///
/// `Some` with the output of `work`, or `None` if it was interrupted. An
/// interrupted `work` future is dropped.
pub async fn interruptible<T, I>(work: impl Future<Output = T>, interrupt: I) -> Option<T>
where
    I: Future,
{
    tokio::select! {
        biased;
        _ = interrupt => None,
        output = work => Some(output),
    }
}

pub fn display_total(total: Option<u64>) -> String {
    total.map_or_else(|| "unknown".to_string(), |t| t.to_string())
}

/// Renders a loosely typed JSON field as text.
///
/// Strings are kept as they are, `null` becomes `None` and every other value
/// is rendered as compact JSON.
pub fn value_to_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Decodes a `data:image/png;base64,...` URL (or bare base64) into bytes.
pub fn decode_data_url(data_url: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let encoded = match data_url.split_once(',') {
        Some((_, payload)) => payload,
        None => data_url,
    };
    STANDARD.decode(encoded.trim())
}

/// Removes zero and repeated ids, keeping the first occurrence of each.
pub fn distinct_ids(ids: impl IntoIterator<Item = i64>) -> Vec<i64> {
    let mut seen = HashSet::new();
    ids.into_iter()
        .filter(|id| *id != 0 && seen.insert(*id))
        .collect()
}

pub fn option_text<T: ToString>(value: &Option<T>) -> String {
    value
        .as_ref()
        .map_or_else(|| "-".to_string(), |v| v.to_string())
}

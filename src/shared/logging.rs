use serde_json::{Map, Value};
use std::fs;
use std::io::Write;
use std::path::Path;

/// Appends one JSON line to the event log at `path`.
///
/// `fields` are merged into the record next to `timestamp`, `level`, `event`
/// and `message`. Failures to log are swallowed: the log is diagnostic and
/// must never fail the operation being logged.
pub fn append_event_log(path: &Path, level: &str, event: &str, message: &str, fields: Value) {
    let mut record = Map::from_iter([
        (
            "timestamp".to_string(),
            Value::String(chrono::Utc::now().to_rfc3339()),
        ),
        ("level".to_string(), Value::String(level.to_string())),
        ("event".to_string(), Value::String(event.to_string())),
        ("message".to_string(), Value::String(message.to_string())),
    ]);
    if let Value::Object(extra) = fields {
        for (key, value) in extra {
            record.entry(key).or_insert(value);
        }
    }

    let Ok(line) = serde_json::to_string(&Value::Object(record)) else {
        return;
    };
    if let Some(parent) = path.parent() {
        if fs::create_dir_all(parent).is_err() {
            return;
        }
    }
    let Ok(mut file) = fs::OpenOptions::new().create(true).append(true).open(path) else {
        return;
    };
    let _ = writeln!(file, "{line}");
}

use std::ffi::OsStr;
use std::path::Path;

use chrono::Utc;

/// File name for a freshly synthesized audio artifact.
///
/// Millisecond timestamps keep names unique per request, so concurrent
/// writers never contend for the same file.
pub fn generated_wav_name() -> String {
    format!("audio_{}.wav", Utc::now().timestamp_millis())
}

/// Derives the declared MIME type from an audio file's extension.
pub fn mime_for_file(file_name: &str) -> String {
    let extension = Path::new(file_name)
        .extension()
        .and_then(OsStr::to_str)
        .unwrap_or("wav");
    format!("audio/{}", extension.to_ascii_lowercase())
}

mod audio_artifact;
mod classification;
mod embedding;
mod memory;

pub use audio_artifact::{generated_wav_name, mime_for_file};
pub use classification::Classification;
pub use embedding::Embedding;
pub use memory::{MemoryId, MemoryRecord, RecalledMemory};

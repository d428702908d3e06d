use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemoryId(Uuid);

impl MemoryId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for MemoryId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for MemoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single preserved memory: the transcript text plus where it came from.
///
/// Records are immutable once stored. The `embedding_model` tag records which
/// model produced the vector the record is indexed under, so that memories
/// from incompatible embedding spaces can be told apart.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryRecord {
    pub id: MemoryId,
    pub text: String,
    pub source: String,
    pub timestamp: DateTime<Utc>,
    pub embedding_model: String,
}

impl MemoryRecord {
    pub fn new(text: String, source: String, embedding_model: String) -> Self {
        Self {
            id: MemoryId::new(),
            text,
            source,
            timestamp: Utc::now(),
            embedding_model,
        }
    }
}

/// A memory surfaced by similarity search, with the store's score.
#[derive(Debug, Clone)]
pub struct RecalledMemory {
    pub memory: MemoryRecord,
    pub score: f32,
}

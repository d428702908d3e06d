mod qdrant_memory_store;

pub use qdrant_memory_store::QdrantMemoryStore;

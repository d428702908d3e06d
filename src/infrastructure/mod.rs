pub mod audio;
pub mod byte_stream;
pub mod llm;
pub mod observability;
pub mod persistence;
pub mod storage;

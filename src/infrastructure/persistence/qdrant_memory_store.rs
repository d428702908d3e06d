use async_trait::async_trait;
use chrono::{DateTime, Utc};
use qdrant_client::qdrant::{
    CreateCollectionBuilder, Distance, PointId, PointStruct, SearchPointsBuilder,
    UpsertPointsBuilder, VectorParamsBuilder, VectorsConfig,
};
use qdrant_client::{Payload, Qdrant};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::application::ports::{MemoryStore, MemoryStoreError};
use crate::domain::{Embedding, MemoryId, MemoryRecord, RecalledMemory};

/// Memory records in a Qdrant collection: one point per memory, the
/// transcript and its provenance in the payload.
pub struct QdrantMemoryStore {
    client: Qdrant,
    collection_name: String,
}

impl QdrantMemoryStore {
    pub fn new(url: &str, collection_name: String) -> Result<Self, MemoryStoreError> {
        let client = Qdrant::from_url(url)
            .build()
            .map_err(|e| MemoryStoreError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            collection_name,
        })
    }
}

#[async_trait]
impl MemoryStore for QdrantMemoryStore {
    #[instrument(skip(self), fields(collection = %self.collection_name))]
    async fn ensure_collection(&self, dimensions: u64) -> Result<bool, MemoryStoreError> {
        let exists = self
            .client
            .collection_exists(&self.collection_name)
            .await
            .map_err(|e| MemoryStoreError::ConnectionFailed(e.to_string()))?;

        if exists {
            info!(collection = %self.collection_name, "collection already exists");
            return Ok(false);
        }

        let vectors_config =
            VectorsConfig::from(VectorParamsBuilder::new(dimensions, Distance::Cosine));

        self.client
            .create_collection(
                CreateCollectionBuilder::new(&self.collection_name).vectors_config(vectors_config),
            )
            .await
            .map_err(|e| MemoryStoreError::CollectionCreationFailed(e.to_string()))?;

        info!(collection = %self.collection_name, dimensions, "collection_created");
        Ok(true)
    }

    #[instrument(skip(self, memory, embedding), fields(collection = %self.collection_name, memory_id = %memory.id))]
    async fn upsert(
        &self,
        memory: &MemoryRecord,
        embedding: &Embedding,
    ) -> Result<(), MemoryStoreError> {
        let payload: Payload = serde_json::json!({
            "text": memory.text,
            "source": memory.source,
            "timestamp": memory.timestamp.to_rfc3339(),
            "embedding_model": memory.embedding_model,
        })
        .try_into()
        .map_err(|e: qdrant_client::QdrantError| MemoryStoreError::UpsertFailed(e.to_string()))?;

        let point = PointStruct::new(
            PointId::from(memory.id.as_uuid().to_string()),
            embedding.values.clone(),
            payload,
        );

        self.client
            .upsert_points(UpsertPointsBuilder::new(&self.collection_name, vec![point]))
            .await
            .map_err(|e| MemoryStoreError::UpsertFailed(e.to_string()))?;

        info!(collection = %self.collection_name, "memory_upserted");
        Ok(())
    }

    #[instrument(skip(self, embedding), fields(collection = %self.collection_name, top_k = top_k))]
    async fn search(
        &self,
        embedding: &Embedding,
        top_k: usize,
    ) -> Result<Vec<RecalledMemory>, MemoryStoreError> {
        let search_result = self
            .client
            .search_points(
                SearchPointsBuilder::new(
                    &self.collection_name,
                    embedding.values.clone(),
                    top_k as u64,
                )
                .with_payload(true),
            )
            .await
            .map_err(|e| MemoryStoreError::SearchFailed(e.to_string()))?;

        // Points with a malformed payload are skipped, not fatal.
        let recalled: Vec<RecalledMemory> = search_result
            .result
            .into_iter()
            .filter_map(|point| {
                let id = match point.id?.point_id_options? {
                    qdrant_client::qdrant::point_id::PointIdOptions::Uuid(uuid) => {
                        Uuid::parse_str(&uuid).ok()?
                    }
                    qdrant_client::qdrant::point_id::PointIdOptions::Num(_) => return None,
                };

                let payload = point.payload;
                let text = payload.get("text")?.as_str()?.to_string();
                let source = payload.get("source")?.as_str()?.to_string();
                let timestamp = payload
                    .get("timestamp")?
                    .as_str()
                    .and_then(|ts| DateTime::parse_from_rfc3339(ts).ok())
                    .map(|ts| ts.with_timezone(&Utc))?;
                let embedding_model = payload.get("embedding_model")?.as_str()?.to_string();

                Some(RecalledMemory {
                    memory: MemoryRecord {
                        id: MemoryId::from_uuid(id),
                        text,
                        source,
                        timestamp,
                        embedding_model,
                    },
                    score: point.score,
                })
            })
            .collect();

        Ok(recalled)
    }
}

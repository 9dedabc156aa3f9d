use crate::error::StoreError;
use crate::store::ReadingStore;
use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::options::{ClientOptions, ReadPreference, SelectionCriteria};
use mongodb::{Client, Collection, Database};
use seedwave_core::Reading;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// MongoDB 连接配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MongoSettings {
    /// 连接字符串
    pub uri: String,

    /// 数据库名
    pub database: String,

    /// 集合名
    pub collection: String,
}

impl Default for MongoSettings {
    fn default() -> Self {
        Self {
            uri: "mongodb://localhost:27017".to_string(),
            database: "sample_iot_data".to_string(),
            collection: "readings".to_string(),
        }
    }
}

/// MongoDB 存储实现
pub struct MongoReadingStore {
    database: Database,
    collection: Collection<Reading>,
}

impl MongoReadingStore {
    /// 构建客户端并定位目标集合
    ///
    /// 驱动惰性建连，真正的连通性由 `ping` 验证。
    pub async fn connect(settings: &MongoSettings) -> Result<Self, StoreError> {
        let mut options = ClientOptions::parse(&settings.uri)
            .await
            .map_err(StoreError::InvalidUri)?;
        options.app_name = Some("seedwave".to_string());

        let client = Client::with_options(options).map_err(StoreError::Connect)?;
        let database = client.database(&settings.database);
        let collection = database.collection::<Reading>(&settings.collection);

        debug!(
            database = %settings.database,
            collection = %settings.collection,
            "MongoDB client configured"
        );

        Ok(Self {
            database,
            collection,
        })
    }
}

#[async_trait]
impl ReadingStore for MongoReadingStore {
    async fn ping(&self) -> anyhow::Result<()> {
        self.database
            .run_command(
                doc! { "ping": 1 },
                SelectionCriteria::ReadPreference(ReadPreference::Primary),
            )
            .await?;
        debug!("MongoDB ping ok");
        Ok(())
    }

    async fn truncate(&self) -> anyhow::Result<u64> {
        // 空过滤器匹配集合中的全部文档
        let result = self.collection.delete_many(doc! {}, None).await?;
        info!(deleted = result.deleted_count, "Truncated collection");
        Ok(result.deleted_count)
    }

    async fn insert_readings(&self, readings: &[Reading]) -> anyhow::Result<u64> {
        // 驱动拒绝空批量写入
        if readings.is_empty() {
            return Ok(0);
        }
        let result = self.collection.insert_many(readings, None).await?;
        Ok(result.inserted_ids.len() as u64)
    }

    async fn count_readings(&self) -> anyhow::Result<u64> {
        let count = self.collection.count_documents(doc! {}, None).await?;
        Ok(count)
    }
}

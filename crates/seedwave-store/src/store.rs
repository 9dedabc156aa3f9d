use async_trait::async_trait;
use seedwave_core::Reading;

/// 读数存储 trait
///
/// 连接句柄要求可被多个并发请求安全共用，调用方以
/// `Arc<dyn ReadingStore>` 形式共享。
#[async_trait]
pub trait ReadingStore: Send + Sync {
    /// 连接健康检查
    async fn ping(&self) -> anyhow::Result<()>;

    /// 清空目标集合，返回删除条数
    async fn truncate(&self) -> anyhow::Result<u64>;

    /// 批量写入一批读数，返回写入条数
    async fn insert_readings(&self, readings: &[Reading]) -> anyhow::Result<u64>;

    /// 查询集合当前文档总数
    async fn count_readings(&self) -> anyhow::Result<u64>;
}

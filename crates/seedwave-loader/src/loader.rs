use crate::model::{BatchFailure, LoadSummary};
use seedwave_core::Reading;
use seedwave_store::ReadingStore;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tokio::time::timeout;
use tracing::{debug, error, info};

/// 默认并发批次数
const DEFAULT_CONCURRENCY: usize = 10;

/// 默认单次写入超时
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// 单个批次的装载结果
enum BatchOutcome {
    Inserted(u64),
    Failed(String),
}

/// 批量装载器
///
/// 每个批次对应一次 insert-many 请求，批次之间相互隔离：单个
/// 批次失败或超时只记入汇总，不中断也不重试后续批次。批次任务
/// 经信号量限流并发执行，全部结束后才汇总返回。
pub struct BulkLoader {
    store: Arc<dyn ReadingStore>,
    concurrency: usize,
    request_timeout: Duration,
}

impl BulkLoader {
    pub fn new(store: Arc<dyn ReadingStore>) -> Self {
        Self {
            store,
            concurrency: DEFAULT_CONCURRENCY,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }

    /// 装载全部批次并汇总结果
    ///
    /// 任务完成顺序不保证，但汇总按批次序号聚合，失败明细有序。
    pub async fn load(&self, batches: Vec<Vec<Reading>>) -> LoadSummary {
        let start_time = Instant::now();
        let mut summary = LoadSummary::new(batches.len());

        info!(
            batches = summary.total_batches,
            concurrency = self.concurrency,
            timeout_secs = self.request_timeout.as_secs(),
            "Starting bulk load"
        );

        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let mut tasks = Vec::with_capacity(summary.total_batches);
        let mut offset = 0usize;

        for (batch_index, batch) in batches.into_iter().enumerate() {
            let store = self.store.clone();
            let semaphore = semaphore.clone();
            let request_timeout = self.request_timeout;
            let size = batch.len();
            let batch_start = offset;
            offset += size;

            tasks.push(tokio::spawn(async move {
                let _permit = semaphore.acquire().await.unwrap();

                let outcome = match timeout(request_timeout, store.insert_readings(&batch)).await {
                    Ok(Ok(inserted)) => {
                        debug!(batch = batch_index, records = size, "Batch inserted");
                        BatchOutcome::Inserted(inserted)
                    }
                    Ok(Err(e)) => {
                        error!(
                            batch = batch_index,
                            start = batch_start,
                            end = batch_start + size,
                            error = %e,
                            "Failed to insert batch"
                        );
                        BatchOutcome::Failed(e.to_string())
                    }
                    Err(_) => {
                        error!(
                            batch = batch_index,
                            start = batch_start,
                            end = batch_start + size,
                            timeout_secs = request_timeout.as_secs(),
                            "Batch insert timed out"
                        );
                        BatchOutcome::Failed(format!(
                            "insert timed out after {:?}",
                            request_timeout
                        ))
                    }
                };

                (batch_index, size, outcome)
            }));
        }

        // 等待全部任务结束后再汇总
        for task in tasks {
            match task.await {
                Ok((_, _, BatchOutcome::Inserted(inserted))) => {
                    summary.succeeded += 1;
                    summary.inserted += inserted;
                }
                Ok((batch_index, size, BatchOutcome::Failed(error))) => {
                    summary.failures.push(BatchFailure {
                        batch_index,
                        size,
                        error,
                    });
                }
                Err(e) => {
                    error!(error = %e, "Load task join error");
                }
            }
        }

        summary.duration_ms = start_time.elapsed().as_millis() as i64;

        info!(
            total = summary.total_batches,
            succeeded = summary.succeeded,
            failed = summary.failed(),
            inserted = summary.inserted,
            duration_ms = summary.duration_ms,
            "Bulk load completed"
        );

        summary
    }
}

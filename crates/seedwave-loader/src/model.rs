use serde::{Deserialize, Serialize};

/// 单个批次的失败记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchFailure {
    /// 批次序号，从 0 起
    pub batch_index: usize,

    /// 批次内读数条数
    pub size: usize,

    /// 错误信息
    pub error: String,
}

/// 批量装载汇总
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadSummary {
    /// 批次总数
    pub total_batches: usize,

    /// 成功批次数
    pub succeeded: usize,

    /// 实际写入的文档条数
    pub inserted: u64,

    /// 失败明细，按批次序号有序
    pub failures: Vec<BatchFailure>,

    /// 装载耗时（毫秒）
    pub duration_ms: i64,
}

impl LoadSummary {
    pub fn new(total_batches: usize) -> Self {
        Self {
            total_batches,
            succeeded: 0,
            inserted: 0,
            failures: Vec::new(),
            duration_ms: 0,
        }
    }

    /// 失败批次数
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// 成功率（百分比）
    pub fn success_rate(&self) -> f64 {
        if self.total_batches == 0 {
            100.0
        } else {
            (self.succeeded as f64 / self.total_batches as f64) * 100.0
        }
    }
}

use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// 单条合成传感器读数
///
/// 字段名即持久化后的文档字段。读数创建后不再修改。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reading {
    /// 读数标识，由种子哈希派生；为空时不写入文档
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub reading_id: String,

    /// 温度值
    pub temperature: f64,

    /// 所属设备标识，同一模拟设备的全部读数保持一致
    pub device_id: String,

    /// 采集时间，持久化为原生 datetime
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub recorded_at: DateTime<Utc>,
}

/// 温度取值范围
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureRange {
    /// 下限
    pub min: f64,

    /// 上限
    pub max: f64,
}

impl TemperatureRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// 在范围内按均匀分布采样一次
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.min + rng.gen::<f64>() * (self.max - self.min)
    }
}

impl Default for TemperatureRange {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 100.0,
        }
    }
}

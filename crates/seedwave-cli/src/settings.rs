use anyhow::{anyhow, Result};
use config::{Config, File, FileFormat};
use seedwave_core::{GenerationMode, TemperatureRange};
use seedwave_store::MongoSettings;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// 默认配置文件名
pub const DEFAULT_CONFIG_FILE: &str = "seedwave.toml";

/// 生成模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Flat,
    TimeSeries,
}

/// 数据生成配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    /// 生成模式
    pub mode: Mode,

    /// 设备数量
    pub devices: u32,

    /// 扁平模式下每台设备的条数
    pub readings_per_device: u32,

    /// 时序模式下回溯的天数
    pub days: u32,

    /// 温度下限
    pub temp_min: f64,

    /// 温度上限
    pub temp_max: f64,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            mode: Mode::Flat,
            devices: 1,
            readings_per_device: 10,
            days: 365,
            temp_min: 0.0,
            temp_max: 100.0,
        }
    }
}

impl GenerationSettings {
    /// 当前模式对应的生成参数
    pub fn generation_mode(&self) -> GenerationMode {
        match self.mode {
            Mode::Flat => GenerationMode::Flat {
                readings_per_device: self.readings_per_device,
            },
            Mode::TimeSeries => GenerationMode::TimeSeries { days: self.days },
        }
    }

    /// 温度取值区间
    pub fn temperature_range(&self) -> TemperatureRange {
        TemperatureRange::new(self.temp_min, self.temp_max)
    }
}

/// 批量写入配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadSettings {
    /// 单个批次条数
    pub batch_size: usize,

    /// 并发批次数
    pub concurrency: usize,

    /// 单次写入超时（秒）
    pub request_timeout_secs: u64,
}

impl Default for LoadSettings {
    fn default() -> Self {
        Self {
            batch_size: 500,
            concurrency: 10,
            request_timeout_secs: 5,
        }
    }
}

impl LoadSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// 装载器整体配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub mongo: MongoSettings,
    pub generation: GenerationSettings,
    pub load: LoadSettings,
}

/// 命令行覆盖项
#[derive(Debug, Default)]
pub struct Overrides {
    pub devices: Option<u32>,
    pub readings_per_device: Option<u32>,
    pub days: Option<u32>,
    pub batch_size: Option<usize>,
    pub concurrency: Option<usize>,
}

impl Settings {
    /// 加载配置
    ///
    /// 未指定路径时读取当前目录的默认配置文件，文件不存在则使用
    /// 内置默认值，之后应用环境变量覆盖。
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)?
                } else {
                    Self::default()
                }
            }
        };

        settings.apply_env();
        Ok(settings)
    }

    /// 从 TOML 文件读取
    fn from_file(path: &Path) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::new(
                path.to_str().ok_or_else(|| anyhow!("Invalid config path"))?,
                FileFormat::Toml,
            ))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// 环境变量覆盖 MongoDB 连接参数
    fn apply_env(&mut self) {
        if let Ok(uri) = std::env::var("MONGO_URI") {
            if !uri.is_empty() {
                self.mongo.uri = uri;
            }
        }
        if let Ok(database) = std::env::var("MONGO_DB") {
            if !database.is_empty() {
                self.mongo.database = database;
            }
        }
        if let Ok(collection) = std::env::var("MONGO_COLLECTION") {
            if !collection.is_empty() {
                self.mongo.collection = collection;
            }
        }
    }

    /// 应用命令行覆盖，模式跟随被覆盖的参数切换
    pub fn apply_overrides(&mut self, overrides: &Overrides) {
        if let Some(devices) = overrides.devices {
            self.generation.devices = devices;
        }
        if let Some(readings_per_device) = overrides.readings_per_device {
            self.generation.readings_per_device = readings_per_device;
            self.generation.mode = Mode::Flat;
        }
        if let Some(days) = overrides.days {
            self.generation.days = days;
            self.generation.mode = Mode::TimeSeries;
        }
        if let Some(batch_size) = overrides.batch_size {
            self.load.batch_size = batch_size;
        }
        if let Some(concurrency) = overrides.concurrency {
            self.load.concurrency = concurrency;
        }
    }

    /// 校验配置
    pub fn validate(&self) -> Result<()> {
        if self.generation.devices == 0 {
            return Err(anyhow!("devices must be greater than 0"));
        }

        if self.generation.temp_min > self.generation.temp_max {
            return Err(anyhow!(
                "temp_min ({}) cannot be greater than temp_max ({})",
                self.generation.temp_min,
                self.generation.temp_max
            ));
        }

        if self.load.batch_size == 0 {
            return Err(anyhow!("batch_size must be greater than 0"));
        }

        if self.load.concurrency == 0 {
            return Err(anyhow!("concurrency must be greater than 0"));
        }

        Ok(())
    }
}

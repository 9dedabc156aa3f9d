use crate::error::GeneratorError;
use crate::identity::hash_seed;
use crate::model::{Reading, TemperatureRange};
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use tracing::debug;

/// 一天的分钟数
const MINUTES_PER_DAY: u32 = 1440;

/// 读数生成模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationMode {
    /// 扁平模式：每个设备固定条数，时间戳取生成时刻
    Flat {
        /// 每设备读数条数
        readings_per_device: u32,
    },

    /// 时序模式：向前回填指定天数，每设备每分钟一条
    TimeSeries {
        /// 回填天数
        days: u32,
    },
}

/// 合成读数生成器
///
/// 一次性物化完整读数序列，生成过程单线程同步。随机源由调用方
/// 持有并注入，固定种子下整个序列可逐字节复现。
pub struct ReadingGenerator {
    devices: u32,
    mode: GenerationMode,
    range: TemperatureRange,
    reference_time: Option<DateTime<Utc>>,
}

impl ReadingGenerator {
    pub fn new(devices: u32, mode: GenerationMode) -> Self {
        Self {
            devices,
            mode,
            range: TemperatureRange::default(),
            reference_time: None,
        }
    }

    pub fn with_temperature_range(mut self, range: TemperatureRange) -> Self {
        self.range = range;
        self
    }

    /// 固定参考时刻，缺省取 `generate` 调用时的当前时间
    pub fn with_reference_time(mut self, reference_time: DateTime<Utc>) -> Self {
        self.reference_time = Some(reference_time);
        self
    }

    /// 将要生成的读数总条数
    pub fn total_readings(&self) -> u64 {
        match self.mode {
            GenerationMode::Flat {
                readings_per_device,
            } => self.devices as u64 * readings_per_device as u64,
            GenerationMode::TimeSeries { days } => {
                self.devices as u64 * days as u64 * MINUTES_PER_DAY as u64
            }
        }
    }

    /// 生成完整读数序列
    ///
    /// 温度值按固定循环顺序从注入的随机源抽取：扁平模式外层设备、
    /// 内层设备内序号；时序模式外层分钟偏移、内层设备序号。
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vec<Reading>, GeneratorError> {
        if self.devices == 0 {
            return Err(GeneratorError::NoDevices);
        }

        let reference_time = self.reference_time.unwrap_or_else(Utc::now);
        let readings = match self.mode {
            GenerationMode::Flat {
                readings_per_device,
            } => self.generate_flat(readings_per_device, reference_time, rng),
            GenerationMode::TimeSeries { days } => {
                self.generate_time_series(days, reference_time, rng)
            }
        };

        debug!(
            devices = self.devices,
            count = readings.len(),
            "Generated synthetic readings"
        );

        Ok(readings)
    }

    /// 扁平模式：设备序号从 0 起
    ///
    /// `reading_id` 只由设备内序号决定，跨设备重复是既定行为，
    /// 不要将其当作全局唯一键。
    fn generate_flat<R: Rng + ?Sized>(
        &self,
        readings_per_device: u32,
        recorded_at: DateTime<Utc>,
        rng: &mut R,
    ) -> Vec<Reading> {
        let mut readings = Vec::with_capacity(self.total_readings() as usize);

        for device in 0..self.devices as i64 {
            let device_id = hash_seed(device);
            for reading in 0..readings_per_device as i64 {
                readings.push(Reading {
                    reading_id: hash_seed(reading),
                    temperature: self.range.sample(rng),
                    device_id: device_id.clone(),
                    recorded_at,
                });
            }
        }

        readings
    }

    /// 时序模式：设备序号从 1 起，`reading_id = hash(分钟偏移 + 设备序号)`
    fn generate_time_series<R: Rng + ?Sized>(
        &self,
        days: u32,
        reference_time: DateTime<Utc>,
        rng: &mut R,
    ) -> Vec<Reading> {
        let total_minutes = days as i64 * MINUTES_PER_DAY as i64;
        let start = reference_time - Duration::days(days as i64);

        let device_ids: Vec<String> = (1..=self.devices as i64).map(hash_seed).collect();
        let mut readings = Vec::with_capacity(self.total_readings() as usize);

        for minute in 0..total_minutes {
            let recorded_at = start + Duration::minutes(minute);
            for device in 1..=self.devices as i64 {
                readings.push(Reading {
                    reading_id: hash_seed(minute + device),
                    temperature: self.range.sample(rng),
                    device_id: device_ids[(device - 1) as usize].clone(),
                    recorded_at,
                });
            }
        }

        readings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(1)
    }

    #[test]
    fn test_flat_reading_count() {
        let generator = ReadingGenerator::new(
            3,
            GenerationMode::Flat {
                readings_per_device: 5,
            },
        );
        let readings = generator.generate(&mut rng()).unwrap();

        assert_eq!(readings.len(), 15);
        assert_eq!(generator.total_readings(), 15);
    }

    #[test]
    fn test_flat_zero_readings_per_device() {
        let generator = ReadingGenerator::new(
            4,
            GenerationMode::Flat {
                readings_per_device: 0,
            },
        );
        let readings = generator.generate(&mut rng()).unwrap();

        assert!(readings.is_empty());
    }

    #[test]
    fn test_flat_device_ids_partition_sequence() {
        let generator = ReadingGenerator::new(
            4,
            GenerationMode::Flat {
                readings_per_device: 6,
            },
        );
        let readings = generator.generate(&mut rng()).unwrap();

        let devices: HashSet<&str> = readings.iter().map(|r| r.device_id.as_str()).collect();
        assert_eq!(devices.len(), 4);

        // 设备为外层循环：序列按设备分成连续段
        for chunk in readings.chunks(6) {
            let first = &chunk[0].device_id;
            assert!(chunk.iter().all(|r| &r.device_id == first));
        }
    }

    #[test]
    fn test_flat_reading_ids_repeat_across_devices() {
        let generator = ReadingGenerator::new(
            2,
            GenerationMode::Flat {
                readings_per_device: 3,
            },
        );
        let readings = generator.generate(&mut rng()).unwrap();

        // 设备内序号派生的标识在各设备间重复，这是既定行为
        assert_eq!(readings[0].reading_id, readings[3].reading_id);
        assert_eq!(readings[1].reading_id, readings[4].reading_id);
        assert_ne!(readings[0].device_id, readings[3].device_id);
    }

    #[test]
    fn test_flat_single_timestamp() {
        let generator = ReadingGenerator::new(
            3,
            GenerationMode::Flat {
                readings_per_device: 4,
            },
        );
        let readings = generator.generate(&mut rng()).unwrap();

        let first = readings[0].recorded_at;
        assert!(readings.iter().all(|r| r.recorded_at == first));
    }

    #[test]
    fn test_time_series_reading_count() {
        let generator = ReadingGenerator::new(2, GenerationMode::TimeSeries { days: 1 });
        let readings = generator.generate(&mut rng()).unwrap();

        assert_eq!(readings.len(), 2 * 1440);
    }

    #[test]
    fn test_time_series_zero_days() {
        let generator = ReadingGenerator::new(2, GenerationMode::TimeSeries { days: 0 });
        let readings = generator.generate(&mut rng()).unwrap();

        assert!(readings.is_empty());
    }

    #[test]
    fn test_time_series_minute_grid_per_device() {
        let devices = 3usize;
        let generator = ReadingGenerator::new(devices as u32, GenerationMode::TimeSeries { days: 1 });
        let readings = generator.generate(&mut rng()).unwrap();

        // 外层分钟、内层设备：同一设备的相邻读数正好差一分钟
        for device in 0..devices {
            let per_device: Vec<_> = readings
                .iter()
                .skip(device)
                .step_by(devices)
                .collect();
            assert_eq!(per_device.len(), 1440);

            for pair in per_device.windows(2) {
                assert_eq!(pair[1].recorded_at - pair[0].recorded_at, Duration::minutes(1));
                assert!(pair[1].recorded_at > pair[0].recorded_at);
            }
        }
    }

    #[test]
    fn test_time_series_device_index_starts_at_one() {
        let generator = ReadingGenerator::new(2, GenerationMode::TimeSeries { days: 1 });
        let readings = generator.generate(&mut rng()).unwrap();

        assert_eq!(readings[0].device_id, hash_seed(1));
        assert_eq!(readings[1].device_id, hash_seed(2));
    }

    #[test]
    fn test_time_series_reading_id_diagonal_collision() {
        let generator = ReadingGenerator::new(2, GenerationMode::TimeSeries { days: 1 });
        let readings = generator.generate(&mut rng()).unwrap();

        // hash(分钟 + 设备) 在对角线上重合：(m=0,d=2) 与 (m=1,d=1)
        assert_eq!(readings[1].reading_id, readings[2].reading_id);
        assert_ne!(readings[1].device_id, readings[2].device_id);
    }

    #[test]
    fn test_time_series_span_ends_at_reference_time() {
        let reference = Utc::now();
        let generator = ReadingGenerator::new(1, GenerationMode::TimeSeries { days: 2 })
            .with_reference_time(reference);
        let readings = generator.generate(&mut rng()).unwrap();

        let first = readings.first().unwrap();
        let last = readings.last().unwrap();
        assert_eq!(first.recorded_at, reference - Duration::days(2));
        assert_eq!(last.recorded_at, reference - Duration::minutes(1));
    }

    #[test]
    fn test_fixed_seed_reproduces_sequence() {
        let reference = Utc::now();

        let generate = |mode: GenerationMode| {
            let generator =
                ReadingGenerator::new(3, mode).with_reference_time(reference);
            let mut rng = StdRng::seed_from_u64(2024);
            generator.generate(&mut rng).unwrap()
        };

        for mode in [
            GenerationMode::Flat {
                readings_per_device: 50,
            },
            GenerationMode::TimeSeries { days: 1 },
        ] {
            let first = generate(mode);
            let second = generate(mode);

            assert_eq!(first.len(), second.len());
            for (a, b) in first.iter().zip(second.iter()) {
                assert_eq!(a.reading_id, b.reading_id);
                assert_eq!(a.device_id, b.device_id);
                assert_eq!(a.recorded_at, b.recorded_at);
                assert_eq!(a.temperature, b.temperature);
            }
        }
    }

    #[test]
    fn test_temperature_respects_configured_range() {
        let generator = ReadingGenerator::new(
            2,
            GenerationMode::Flat {
                readings_per_device: 200,
            },
        )
        .with_temperature_range(TemperatureRange::new(18.0, 24.0));
        let readings = generator.generate(&mut rng()).unwrap();

        assert!(readings
            .iter()
            .all(|r| r.temperature >= 18.0 && r.temperature < 24.0));
    }

    #[test]
    fn test_zero_devices_is_rejected() {
        let generator = ReadingGenerator::new(
            0,
            GenerationMode::Flat {
                readings_per_device: 10,
            },
        );

        assert!(matches!(
            generator.generate(&mut rng()),
            Err(GeneratorError::NoDevices)
        ));
    }
}

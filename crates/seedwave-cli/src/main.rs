mod settings;

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use seedwave_core::{into_batches, ReadingGenerator};
use seedwave_loader::BulkLoader;
use seedwave_store::{MongoReadingStore, ReadingStore};
use settings::{Mode, Overrides, Settings};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{error, info, warn};

/// Synthetic IoT telemetry generator and MongoDB bulk loader
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Config file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// How many mock devices would you like to create?
    #[arg(long)]
    devices: Option<u32>,

    /// How many readings per device would you like to create?
    #[arg(long, conflicts_with = "days")]
    readings_per_device: Option<u32>,

    /// How many days of minute-level history per device
    #[arg(long)]
    days: Option<u32>,

    /// Readings per insert batch
    #[arg(long)]
    batch_size: Option<usize>,

    /// Concurrent insert batches
    #[arg(long)]
    concurrency: Option<usize>,

    /// Fixed RNG seed for reproducible data
    #[arg(long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env 可选，缺失时直接用环境变量与内置默认值
    dotenv::dotenv().ok();

    // 初始化日志
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let args = Args::parse();

    // 加载配置：文件 -> 环境变量 -> 命令行
    let mut settings =
        Settings::load(args.config.as_deref()).context("Failed to load settings")?;
    settings.apply_overrides(&Overrides {
        devices: args.devices,
        readings_per_device: args.readings_per_device,
        days: args.days,
        batch_size: args.batch_size,
        concurrency: args.concurrency,
    });
    settings.validate()?;

    let generator = ReadingGenerator::new(
        settings.generation.devices,
        settings.generation.generation_mode(),
    )
    .with_temperature_range(settings.generation.temperature_range());

    match settings.generation.mode {
        Mode::Flat => info!(
            devices = settings.generation.devices,
            readings_per_device = settings.generation.readings_per_device,
            total = generator.total_readings(),
            "Starting mock data generation"
        ),
        Mode::TimeSeries => info!(
            devices = settings.generation.devices,
            days = settings.generation.days,
            total = generator.total_readings(),
            "Starting mock data generation"
        ),
    }

    // 连接并探活
    let store: Arc<dyn ReadingStore> =
        Arc::new(MongoReadingStore::connect(&settings.mongo).await?);
    store.ping().await.context("MongoDB ping failed")?;
    info!(
        database = %settings.mongo.database,
        collection = %settings.mongo.collection,
        "Connected to MongoDB"
    );

    // 清空旧数据，超时或失败视为启动错误
    info!("Truncating existing data");
    timeout(settings.load.request_timeout(), store.truncate())
        .await
        .context("Truncate timed out")?
        .context("Failed to truncate collection")?;

    // 生成数据
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let readings = generator.generate(&mut rng)?;

    // 切批并装载
    let batches = into_batches(readings, settings.load.batch_size);
    info!(
        batches = batches.len(),
        batch_size = settings.load.batch_size,
        "Inserting new data"
    );

    let loader = BulkLoader::new(store.clone())
        .with_concurrency(settings.load.concurrency)
        .with_request_timeout(settings.load.request_timeout());
    let summary = loader.load(batches).await;

    if summary.failed() > 0 {
        warn!(
            failed = summary.failed(),
            success_rate = summary.success_rate(),
            "Some batches failed to insert"
        );
    }

    // 计数只用于回报结果，失败不影响退出码
    match store.count_readings().await {
        Ok(count) => info!("Inserted {} records", count),
        Err(e) => error!(error = %e, "Failed to count documents"),
    }

    Ok(())
}

use thiserror::Error;

/// 生成阶段错误类型
#[derive(Error, Debug)]
pub enum GeneratorError {
    /// 设备数量非法
    #[error("device count must be greater than zero")]
    NoDevices,
}

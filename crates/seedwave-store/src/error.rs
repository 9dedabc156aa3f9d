use thiserror::Error;

/// 存储初始化错误类型
///
/// 初始化失败属于致命错误，整个运行应当中止；批次写入阶段的
/// 错误不走这里，由装载器逐批收集。
#[derive(Error, Debug)]
pub enum StoreError {
    /// 连接字符串解析失败
    #[error("invalid connection string: {0}")]
    InvalidUri(#[source] mongodb::error::Error),

    /// 客户端构建失败
    #[error("failed to create client: {0}")]
    Connect(#[source] mongodb::error::Error),
}

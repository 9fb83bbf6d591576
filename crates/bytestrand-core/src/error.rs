//! 核心错误类型（纯计算部分）
use thiserror::Error;

/// 核心计算的 Result 别名
pub type LcsResult<T> = std::result::Result<T, LcsError>;

/// 后缀数组与两两比对的错误
#[derive(Debug, Error)]
pub enum LcsError {
    /// 名次越界：合法区间为 `[min, len)`
    #[error("rank {rank} out of range (valid {min}..{len})")]
    OutOfRange { rank: usize, min: usize, len: usize },

    /// 比对对下标非法：要求 left < right < count
    #[error("invalid pair ({left}, {right}) for {count} buffers")]
    InvalidPair { left: usize, right: usize, count: usize },

    /// 输入缓冲不足两个，无法组成任何一对
    #[error("need at least two buffers to compare, got {count}")]
    EmptyInput { count: usize },

    #[error("build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

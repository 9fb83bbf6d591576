//! 运行选项与统计信息（模块）

/// 运行选项
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LcsOptions {
    /// 线程数：None 表示自动（等于 CPU 核数）；Some(1) 走串行
    pub threads: Option<usize>,
    /// 最大文件大小（字节）；超过则跳过
    pub max_file_size: Option<u64>,
    /// 是否递归子目录（默认只读一层）
    pub recursive: bool,
}

impl LcsOptions {
    /// 实际使用的线程数（至少为 1）
    pub fn effective_threads(&self) -> usize {
        self.threads.unwrap_or_else(num_cpus::get).max(1)
    }
}

/// 运行统计信息（便于 CLI 打印）
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunStats {
    pub files_loaded: usize,
    pub files_skipped: usize,
    pub records_written: usize,
}

//! 多缓冲两两聚合
use rayon::prelude::*;
use tracing::debug;

use crate::error::{LcsError, LcsResult};
use crate::record::{select_best, MatchRecord};
use crate::scanner::PairwiseLcsScanner;
use crate::suffix_array::SuffixArray;

/// 为每个输入缓冲建一个后缀数组，再对所有无序对 (k, t)，k < t 做扫描
pub struct LcsAggregator<'a> {
    arrays: Vec<SuffixArray<'a>>,
}

impl<'a> LcsAggregator<'a> {
    /// 串行构建全部后缀数组
    pub fn new<B: AsRef<[u8]>>(buffers: &'a [B]) -> Self {
        let arrays = buffers.iter().map(|b| SuffixArray::new(b.as_ref())).collect();
        Self { arrays }
    }

    /// 已构建好的后缀数组（例如并行构建）直接装入
    pub fn from_arrays(arrays: Vec<SuffixArray<'a>>) -> Self {
        Self { arrays }
    }

    pub fn buffer_count(&self) -> usize {
        self.arrays.len()
    }

    pub fn arrays(&self) -> &[SuffixArray<'a>] {
        &self.arrays
    }

    /// C(N, 2)
    pub fn pair_count(&self) -> usize {
        let n = self.arrays.len();
        n * n.saturating_sub(1) / 2
    }

    /// 按 (0,1), (0,2), ..., (1,2), ... 的顺序枚举无序对
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> {
        let n = self.arrays.len();
        (0..n).flat_map(move |k| (k + 1..n).map(move |t| (k, t)))
    }

    /// 扫描单对并生成记录；要求 k < t < 缓冲个数
    pub fn scan_pair(&self, k: usize, t: usize) -> LcsResult<MatchRecord> {
        let n = self.arrays.len();
        if k >= t || t >= n {
            return Err(LcsError::InvalidPair { left: k, right: t, count: n });
        }
        Ok(self.record_for(k, t))
    }

    /// 串行扫描所有对，结果按枚举顺序排列；不足两个缓冲时为空
    pub fn run(&self) -> Vec<MatchRecord> {
        self.pairs().map(|(k, t)| self.record_for(k, t)).collect()
    }

    /// 在独立的 Rayon 线程池中并行扫描；输出顺序与 `run` 相同
    pub fn run_parallel(&self, threads: usize) -> LcsResult<Vec<MatchRecord>> {
        let pool = rayon::ThreadPoolBuilder::new().num_threads(threads.max(1)).build()?;
        let pairs: Vec<(usize, usize)> = self.pairs().collect();
        Ok(pool.install(|| pairs.par_iter().map(|&(k, t)| self.record_for(k, t)).collect()))
    }

    /// 全部对中匹配最长的一条；不足两个缓冲时报 EmptyInput
    pub fn best(&self) -> LcsResult<MatchRecord> {
        if self.arrays.len() < 2 {
            return Err(LcsError::EmptyInput { count: self.arrays.len() });
        }
        select_best(&self.run()).cloned()
    }

    /// pairs() 产生的下标总是合法
    pub(crate) fn record_for(&self, k: usize, t: usize) -> MatchRecord {
        let (left, right) = (&self.arrays[k], &self.arrays[t]);
        let m = PairwiseLcsScanner::new(left, right).scan();
        debug!(left = k, right = t, len = m.len, "pair scanned");
        MatchRecord {
            left: k,
            right: t,
            left_offset: m.left_offset,
            right_offset: m.right_offset,
            matched: m.bytes(left.bytes()).unwrap_or_default().to_vec(),
        }
    }
}

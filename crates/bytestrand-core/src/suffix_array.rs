//! 后缀数组（比较排序构建）
//!
//! 缓冲区由调用方持有，后缀数组只借用它并保存起点排列；
//! 构建后不可变，可在线程间共享只读访问。
use rayon::prelude::*;

use crate::error::{LcsError, LcsResult};
use crate::suffix::{common_prefix_len, Suffix};

/// 超过该长度的缓冲使用并行排序
pub(crate) const PARALLEL_SORT_MIN: usize = 100_000;

/// 单个字节缓冲的后缀数组
#[derive(Debug, Clone)]
pub struct SuffixArray<'a> {
    bytes: &'a [u8],
    /// order[rank] = 该名次后缀的起始偏移
    order: Vec<usize>,
}

impl<'a> SuffixArray<'a> {
    /// 为每个起点生成一个后缀并按字节序排序，只保留起点排列
    ///
    /// 同一缓冲的后缀起点互不相同、长度互不相同，因此不会比较相等，
    /// 不稳定排序得到的结果与稳定排序一致。
    pub fn new(bytes: &'a [u8]) -> Self {
        let mut suffixes: Vec<Suffix<'a>> = (0..bytes.len()).map(|i| Suffix::new(bytes, i)).collect();
        if suffixes.len() >= PARALLEL_SORT_MIN {
            suffixes.par_sort_unstable();
        } else {
            suffixes.sort_unstable();
        }
        let order = suffixes.into_iter().map(|s| s.start()).collect();
        Self { bytes, order }
    }

    /// 后缀个数（等于缓冲长度）
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// 底层缓冲
    pub fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// 全部起点排列
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// 名次 `rank` 的后缀起点；合法区间 `[0, len)`
    pub fn index(&self, rank: usize) -> LcsResult<usize> {
        self.order.get(rank).copied().ok_or(LcsError::OutOfRange { rank, min: 0, len: self.len() })
    }

    /// 名次 `rank` 与 `rank-1` 两个相邻后缀的最长公共前缀；合法区间 `[1, len)`
    pub fn lcp(&self, rank: usize) -> LcsResult<usize> {
        if rank < 1 || rank >= self.len() {
            return Err(LcsError::OutOfRange { rank, min: 1, len: self.len() });
        }
        let cur = &self.bytes[self.order[rank]..];
        let prev = &self.bytes[self.order[rank - 1]..];
        Ok(common_prefix_len(cur, prev))
    }

    /// 名次 `rank` 的后缀字节（诊断/展示用）
    pub fn suffix_bytes(&self, rank: usize) -> LcsResult<&'a [u8]> {
        let start = self.index(rank)?;
        Ok(&self.bytes[start..])
    }

    /// 名次 `rank` 的后缀十六进制表示
    pub fn suffix_hex(&self, rank: usize) -> LcsResult<String> {
        self.suffix_bytes(rank).map(hex::encode)
    }

    /// 内部快速访问：调用方已保证 rank 合法
    #[inline]
    pub(crate) fn suffix_at(&self, rank: usize) -> (usize, &'a [u8]) {
        let start = self.order[rank];
        (start, &self.bytes[start..])
    }
}

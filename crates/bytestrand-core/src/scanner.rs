//! 两两最长公共子串扫描（双指针归并）
//!
//! 两个有序后缀列表按归并顺序推进：每一步只比较两侧当前指针处的后缀，
//! 较小者前进。跨数组、归并序相邻的后缀对都会被比较到，而最长公共
//! 子串一定出现在某一对相邻后缀的公共前缀中，因此无需 O(n·m) 全配对。
use std::cmp::Ordering;

use crate::suffix::compare_with_prefix;
use crate::suffix_array::SuffixArray;

/// 单对缓冲的扫描结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PairMatch {
    /// 匹配在左侧缓冲中的起点（len == 0 时为 0）
    pub left_offset: usize,
    /// 匹配在右侧缓冲中的起点（len == 0 时为 0）
    pub right_offset: usize,
    pub len: usize,
}

impl PairMatch {
    /// 从左侧缓冲中取出匹配字节；缓冲不够长时返回 None
    pub fn bytes<'b>(&self, left: &'b [u8]) -> Option<&'b [u8]> {
        left.get(self.left_offset..self.left_offset + self.len)
    }
}

/// 针对两个后缀数组的扫描器
pub struct PairwiseLcsScanner<'s, 'a> {
    left: &'s SuffixArray<'a>,
    right: &'s SuffixArray<'a>,
}

impl<'s, 'a> PairwiseLcsScanner<'s, 'a> {
    pub fn new(left: &'s SuffixArray<'a>, right: &'s SuffixArray<'a>) -> Self {
        Self { left, right }
    }

    /// 执行归并扫描
    /// - 仅当公共前缀严格更长时更新最佳，多个最大值时保留归并序中最先出现者
    /// - 两后缀完全相等时推进右侧指针
    pub fn scan(&self) -> PairMatch {
        let (n, m) = (self.left.len(), self.right.len());
        let mut best = PairMatch::default();
        let (mut i, mut j) = (0usize, 0usize);

        while i < n && j < m {
            let (p, a) = self.left.suffix_at(i);
            let (q, b) = self.right.suffix_at(j);
            let (c, ord) = compare_with_prefix(a, b);
            if c > best.len {
                best = PairMatch { left_offset: p, right_offset: q, len: c };
            }
            match ord {
                Ordering::Less => i += 1,
                _ => j += 1,
            }
        }

        best
    }
}

/// 便捷入口：直接对两个字节缓冲求最长公共子串
pub fn longest_common_substring(left: &[u8], right: &[u8]) -> PairMatch {
    let a = SuffixArray::new(left);
    let b = SuffixArray::new(right);
    PairwiseLcsScanner::new(&a, &b).scan()
}

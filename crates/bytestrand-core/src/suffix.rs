//! 后缀视图与字节序比较
use std::cmp::Ordering;

/// 指向某个字节缓冲区中一个起点的轻量视图，不复制数据
#[derive(Debug, Clone, Copy)]
pub struct Suffix<'a> {
    bytes: &'a [u8],
    start: usize,
}

impl<'a> Suffix<'a> {
    /// 仅供后缀数组构建时使用；`start` 必须小于等于缓冲长度
    pub(crate) fn new(bytes: &'a [u8], start: usize) -> Self {
        debug_assert!(start <= bytes.len());
        Self { bytes, start }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn len(&self) -> usize {
        self.bytes.len() - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 从起点到缓冲末尾的字节片段
    pub fn as_bytes(&self) -> &'a [u8] {
        &self.bytes[self.start..]
    }

    /// 与另一个后缀（可来自不同缓冲）的最长公共前缀长度
    pub fn common_prefix_len(&self, other: &Suffix<'_>) -> usize {
        common_prefix_len(self.as_bytes(), other.as_bytes())
    }
}

impl PartialEq for Suffix<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Suffix<'_> {}

impl PartialOrd for Suffix<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Suffix<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        // 同一缓冲同一起点：直接相等
        if std::ptr::eq(self.bytes, other.bytes) && self.start == other.start {
            return Ordering::Equal;
        }
        compare_with_prefix(self.as_bytes(), other.as_bytes()).1
    }
}

/// 线性扫描求两段字节的公共前缀长度（至较短者为止）
#[inline]
pub fn common_prefix_len(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b.iter()).take_while(|(x, y)| x == y).count()
}

/// 一次遍历同时得到公共前缀长度与字节序比较结果
/// - 首个不同字节（按无符号值）决定顺序
/// - 无差异时较短者在前，等长则相等
#[inline]
pub fn compare_with_prefix(a: &[u8], b: &[u8]) -> (usize, Ordering) {
    let c = common_prefix_len(a, b);
    let ord = match (a.get(c), b.get(c)) {
        (Some(x), Some(y)) => x.cmp(y),
        _ => a.len().cmp(&b.len()),
    };
    (c, ord)
}

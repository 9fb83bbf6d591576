//! 公共类型（对外暴露）
use serde::Serialize;

use crate::record::MatchRecord;

/// 输出项结构（对应 JSON 数组的单个元素）
#[derive(Debug, Clone, Serialize)]
pub struct OutputItem<'a> {
    pub left: &'a str,
    pub right: &'a str,
    pub left_offset: usize,
    pub right_offset: usize,
    pub length: usize,
    pub bytes_hex: String,
}

impl<'a> OutputItem<'a> {
    /// 用文件名替换记录中的下标
    pub fn from_record(record: &MatchRecord, names: &'a [String]) -> Self {
        Self {
            left: names.get(record.left).map(String::as_str).unwrap_or(""),
            right: names.get(record.right).map(String::as_str).unwrap_or(""),
            left_offset: record.left_offset,
            right_offset: record.right_offset,
            length: record.len(),
            bytes_hex: record.matched_hex(),
        }
    }
}

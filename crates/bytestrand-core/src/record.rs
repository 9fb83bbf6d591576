//! 两两比对记录与最佳选择
use serde::Serialize;

use crate::error::{LcsError, LcsResult};

/// 一对缓冲的比对结果；持有匹配字节的副本，可比后缀数组活得更久
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchRecord {
    /// 左侧缓冲在输入中的下标（总小于 right）
    pub left: usize,
    pub right: usize,
    pub left_offset: usize,
    pub right_offset: usize,
    #[serde(serialize_with = "serialize_hex")]
    pub matched: Vec<u8>,
}

impl MatchRecord {
    pub fn len(&self) -> usize {
        self.matched.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matched.is_empty()
    }

    pub fn matched_hex(&self) -> String {
        hex::encode(&self.matched)
    }
}

fn serialize_hex<S: serde::Serializer>(bytes: &[u8], s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&hex::encode(bytes))
}

/// 按匹配长度选出最佳记录；长度相同保留枚举顺序中最先出现者
pub fn select_best(records: &[MatchRecord]) -> LcsResult<&MatchRecord> {
    let mut iter = records.iter();
    let mut best = iter.next().ok_or(LcsError::EmptyInput { count: 0 })?;
    for r in iter {
        if r.len() > best.len() {
            best = r;
        }
    }
    Ok(best)
}

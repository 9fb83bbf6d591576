//! 字节串最长公共子串核心库
//!
//! 设计要点：
//! - 每个输入缓冲构建一个后缀数组（比较排序），后缀数组只借用缓冲，不复制。
//! - 两两之间用双指针归并扫描两个有序后缀列表，求最长公共子串，避免 O(n·m) 全配对。
//! - 所有数据按不透明字节处理，无编码语义。
//! - 纯计算部分（suffix / suffix_array / scanner / aggregate）不触及文件系统；
//!   目录读取与 JSON 输出在 corpus / pipeline 中完成。

mod aggregate;
mod config;
mod corpus;
mod error;
mod options;
mod pipeline;
mod record;
mod scanner;
mod suffix;
mod suffix_array;
mod types;

pub use aggregate::LcsAggregator;
pub use config::{load_options, parse_options};
pub use corpus::{load_corpus, Corpus, NamedBuffer};
pub use error::{LcsError, LcsResult};
pub use options::{LcsOptions, RunStats};
pub use pipeline::{find_longest_strand, RunReport};
pub use record::{select_best, MatchRecord};
pub use scanner::{longest_common_substring, PairMatch, PairwiseLcsScanner};
pub use suffix::{common_prefix_len, compare_with_prefix, Suffix};
pub use suffix_array::SuffixArray;
pub use types::OutputItem;

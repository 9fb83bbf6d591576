//! 配置文件加载（TOML）
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use crate::options::LcsOptions;

/// 顶层配置文件结构；缺省字段沿用默认值
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    threads: Option<usize>,
    #[serde(default)]
    max_file_size: Option<u64>,
    #[serde(default)]
    recursive: Option<bool>,
}

/// 解析 TOML 文本为运行选项
pub fn parse_options(txt: &str) -> Result<LcsOptions> {
    let parsed: ConfigFile = toml::from_str(txt)?;
    Ok(LcsOptions {
        // threads = 0 视为自动
        threads: parsed.threads.filter(|&n| n >= 1),
        max_file_size: parsed.max_file_size,
        recursive: parsed.recursive.unwrap_or(false),
    })
}

/// 从 TOML 配置文件加载运行选项
pub fn load_options(path: &Path) -> Result<LcsOptions> {
    let txt = std::fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    parse_options(&txt).with_context(|| format!("parse config {}", path.display()))
}

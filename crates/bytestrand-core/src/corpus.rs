//! 输入目录枚举与整文件读取
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::options::LcsOptions;

/// 带名字的字节缓冲（名字为相对输入目录的路径）
#[derive(Debug, Clone)]
pub struct NamedBuffer {
    pub name: String,
    pub path: PathBuf,
    pub bytes: Vec<u8>,
}

/// 按稳定顺序排列的一组输入；记录中的下标指向此顺序
#[derive(Debug, Default, Clone)]
pub struct Corpus {
    pub buffers: Vec<NamedBuffer>,
    /// 因大小超限或读取失败而跳过的文件数
    pub skipped: usize,
}

impl Corpus {
    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }

    pub fn names(&self) -> Vec<String> {
        self.buffers.iter().map(|b| b.name.clone()).collect()
    }

    /// 只取字节内容，供聚合器使用
    pub fn byte_slices(&self) -> Vec<&[u8]> {
        self.buffers.iter().map(|b| b.bytes.as_slice()).collect()
    }
}

/// 读取目录下的全部常规文件
/// - 默认只读一层；`recursive` 时遍历整棵子树
/// - 按相对路径排序，确保下标顺序可复现
/// - 超过 `max_file_size` 或读取失败的文件跳过并计数
pub fn load_corpus(input_dir: &Path, opts: &LcsOptions) -> Result<Corpus> {
    let md = std::fs::metadata(input_dir).with_context(|| format!("stat input dir {}", input_dir.display()))?;
    anyhow::ensure!(md.is_dir(), "input is not a directory: {}", input_dir.display());

    let mut walker = WalkDir::new(input_dir).min_depth(1);
    if !opts.recursive {
        walker = walker.max_depth(1);
    }

    let mut corpus = Corpus::default();
    let mut files: Vec<PathBuf> = vec![];
    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                warn!(%err, "skip unreadable entry");
                corpus.skipped += 1;
                continue;
            }
        };
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    files.sort();

    for path in files {
        let name = display_name(input_dir, &path);
        if let Some(max) = opts.max_file_size {
            if let Ok(md) = std::fs::metadata(&path) {
                if md.len() > max {
                    debug!(file = %name, size = md.len(), max, "skip oversized file");
                    corpus.skipped += 1;
                    continue;
                }
            }
        }
        match std::fs::read(&path) {
            Ok(bytes) => {
                debug!(file = %name, size = bytes.len(), "loaded");
                corpus.buffers.push(NamedBuffer { name, path, bytes });
            }
            Err(err) => {
                warn!(file = %name, %err, "skip unreadable file");
                corpus.skipped += 1;
            }
        }
    }

    Ok(corpus)
}

fn display_name(root: &Path, path: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn loads_sorted_single_level() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.bin"), b"bbb").unwrap();
        fs::write(dir.path().join("a.bin"), b"aaa").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub").join("c.bin"), b"ccc").unwrap();

        let corpus = load_corpus(dir.path(), &LcsOptions::default()).unwrap();
        assert_eq!(corpus.names(), vec!["a.bin".to_string(), "b.bin".to_string()]);
        assert_eq!(corpus.buffers[0].bytes, b"aaa");
        assert_eq!(corpus.skipped, 0);
    }

    #[test]
    fn recursive_includes_subdirs() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.bin"), b"aaa").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub").join("c.bin"), b"ccc").unwrap();

        let opts = LcsOptions { recursive: true, ..Default::default() };
        let corpus = load_corpus(dir.path(), &opts).unwrap();
        assert_eq!(corpus.len(), 2);
        assert!(corpus.buffers[1].name.ends_with("c.bin"));
    }

    #[test]
    fn oversized_files_skipped_empty_files_kept() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("big.bin"), vec![7u8; 64]).unwrap();
        fs::write(dir.path().join("empty.bin"), b"").unwrap();
        fs::write(dir.path().join("small.bin"), b"xy").unwrap();

        let opts = LcsOptions { max_file_size: Some(16), ..Default::default() };
        let corpus = load_corpus(dir.path(), &opts).unwrap();
        assert_eq!(corpus.names(), vec!["empty.bin".to_string(), "small.bin".to_string()]);
        assert_eq!(corpus.skipped, 1);
        assert!(corpus.buffers[0].bytes.is_empty());
    }

    #[test]
    fn missing_dir_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_corpus(&dir.path().join("nope"), &LcsOptions::default()).is_err());
    }
}

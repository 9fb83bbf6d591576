//! 运行主流程与并行调度
use anyhow::Result;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

use crate::aggregate::LcsAggregator;
use crate::corpus::load_corpus;
use crate::error::{LcsError, LcsResult};
use crate::options::{LcsOptions, RunStats};
use crate::record::MatchRecord;
use crate::suffix_array::SuffixArray;
use crate::types::OutputItem;

/// 一次运行的结果
#[derive(Debug, Clone)]
pub struct RunReport {
    pub stats: RunStats,
    /// 输入文件名，记录中的下标指向此列表
    pub names: Vec<String>,
    /// 全局最佳记录；文件不足两个时为 None
    pub best: Option<MatchRecord>,
}

impl RunReport {
    /// 最佳记录；文件不足两个时报 EmptyInput
    pub fn best(&self) -> LcsResult<&MatchRecord> {
        self.best.as_ref().ok_or(LcsError::EmptyInput { count: self.stats.files_loaded })
    }
}

/// 读取目录、两两比对，并将每对的记录以 JSON 数组流式写入 `out`
/// 稳定性保证：
/// - 文件按相对路径排序，下标可复现
/// - 记录按 (0,1), (0,2), ..., (1,2), ... 的顺序输出，与线程数无关
/// - 最佳记录取长度最大者，长度相同取输出顺序中最先者
pub fn find_longest_strand(input_dir: &Path, out: &mut dyn Write, opts: &LcsOptions) -> Result<RunReport> {
    let corpus = load_corpus(input_dir, opts)?;
    info!(files = corpus.len(), skipped = corpus.skipped, "corpus loaded");

    let names = corpus.names();
    let slices = corpus.byte_slices();
    let threads = opts.effective_threads();

    let mut sink = RecordSink::new(out, &names)?;
    // 决策：线程数>1 且至少有两对时走并行调度；否则串行
    if threads > 1 && slices.len() > 2 {
        run_parallel(&slices, &mut sink, threads)?;
    } else {
        let agg = LcsAggregator::new(&slices);
        for (k, t) in agg.pairs() {
            sink.push(agg.record_for(k, t))?;
        }
    }
    let (written, best) = sink.finish()?;

    let stats = RunStats { files_loaded: corpus.len(), files_skipped: corpus.skipped, records_written: written };
    Ok(RunReport { stats, names, best })
}

/// 并行调度：
/// - 在 Rayon 线程池中并行建后缀数组，再并行扫描各对
/// - 当前线程作为 Writer，按对序号重排后流式写出
fn run_parallel(slices: &[&[u8]], sink: &mut RecordSink<'_, '_>, threads: usize) -> Result<()> {
    use crossbeam_channel as channel;
    use rayon::prelude::*;
    use std::collections::BTreeMap;

    let pool = rayon::ThreadPoolBuilder::new().num_threads(threads).build().map_err(LcsError::from)?;
    let arrays: Vec<SuffixArray<'_>> = pool.install(|| slices.par_iter().map(|b| SuffixArray::new(*b)).collect());
    let agg = LcsAggregator::from_arrays(arrays);
    let pairs: Vec<(usize, usize)> = agg.pairs().collect();
    debug!(threads, pairs = pairs.len(), "parallel scan");

    std::thread::scope(|scope| -> Result<()> {
        let (tx, rx) = channel::bounded::<(usize, MatchRecord)>(256);
        let agg = &agg;
        let pairs = &pairs;
        let pool = &pool;

        scope.spawn(move || {
            pool.install(|| {
                pairs.par_iter().enumerate().for_each(|(idx, &(k, t))| {
                    // Writer 提前退出时发送失败，直接丢弃
                    let _ = tx.send((idx, agg.record_for(k, t)));
                });
            });
            // 结束后 Sender 被丢弃，Receiver 将收到关闭信号
        });

        // Writer：维护 next_idx 与缓存，按序输出
        let mut next_idx: usize = 0;
        let mut pending: BTreeMap<usize, MatchRecord> = BTreeMap::new();
        while let Ok((idx, record)) = rx.recv() {
            pending.insert(idx, record);
            while let Some(record) = pending.remove(&next_idx) {
                sink.push(record)?;
                next_idx += 1;
            }
        }
        debug_assert!(pending.is_empty());
        Ok(())
    })
}

/// 流式 JSON 数组写出，同时跟踪最佳记录
struct RecordSink<'w, 'n> {
    out: &'w mut dyn Write,
    names: &'n [String],
    first: bool,
    written: usize,
    best: Option<MatchRecord>,
}

impl<'w, 'n> RecordSink<'w, 'n> {
    fn new(out: &'w mut dyn Write, names: &'n [String]) -> Result<Self> {
        write!(out, "[")?;
        Ok(Self { out, names, first: true, written: 0, best: None })
    }

    fn push(&mut self, record: MatchRecord) -> Result<()> {
        if !self.first { write!(self.out, ",")?; } else { self.first = false; }
        let item = OutputItem::from_record(&record, self.names);
        serde_json::to_writer(&mut *self.out, &item)?;
        self.written += 1;
        if self.best.as_ref().map_or(true, |b| record.len() > b.len()) {
            self.best = Some(record);
        }
        Ok(())
    }

    fn finish(self) -> Result<(usize, Option<MatchRecord>)> {
        write!(self.out, "]")?;
        Ok((self.written, self.best))
    }
}

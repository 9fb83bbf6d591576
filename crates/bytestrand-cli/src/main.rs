use anyhow::{bail, Context, Result};
use bytestrand_core::{find_longest_strand, load_options, LcsOptions, MatchRecord, RunReport};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing::info;

/// 命令行入口（基于 clap）
#[derive(Parser, Debug)]
#[command(name = "bytestrand", version, about = "在一组文件中查找最长的公共字节串")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 两两比对目录下的文件，输出最长公共字节串所在位置
    Scan {
        /// 输入目录
        #[arg(long)]
        input: PathBuf,

        /// 每对文件的比对记录（JSON 数组）；缺省则不写出
        #[arg(long)]
        output: Option<PathBuf>,

        /// 线程数（"auto"=CPU 核心数；1 走串行）
        #[arg(long)]
        threads: Option<String>,

        /// 最大文件大小（单位字节），超过则跳过
        #[arg(long)]
        max_file_size: Option<u64>,

        /// 递归读取子目录
        #[arg(long, overrides_with = "no_recursive")]
        recursive: bool,

        /// 只读一层（覆盖配置文件中的 recursive = true）
        #[arg(long, overrides_with = "recursive")]
        no_recursive: bool,

        /// 配置文件路径（TOML）；命令行参数优先
        #[arg(long)]
        config: Option<PathBuf>,

        /// 同时打印匹配字节（十六进制）
        #[arg(long)]
        show_bytes: bool,
    },
}

fn main() -> Result<()> {
    // 初始化日志（支持通过 RUST_LOG 控制等级，例如 info、debug）
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Scan { input, output, threads, max_file_size, recursive, no_recursive, config, show_bytes } => {
            info!(?input, ?output, "starting scan");

            // 配置文件打底，命令行覆盖
            let file_opts = match &config {
                Some(path) => load_options(path)?,
                None => LcsOptions::default(),
            };
            let recursive = match (recursive, no_recursive) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            let opts = merge_options(file_opts, threads.as_deref(), max_file_size, recursive)?;

            let report = match &output {
                Some(path) => {
                    let mut out = BufWriter::new(File::create(path).context("create output file")?);
                    let report = find_longest_strand(&input, &mut out, &opts).context("scan failed")?;
                    out.flush().context("flush output file")?;
                    report
                }
                None => find_longest_strand(&input, &mut io::sink(), &opts).context("scan failed")?,
            };

            info!(
                files_loaded = report.stats.files_loaded,
                files_skipped = report.stats.files_skipped,
                records_written = report.stats.records_written,
                "scan finished"
            );

            let best = report.best()?;
            let stdout = io::stdout();
            print_best(&mut stdout.lock(), &report, best, show_bytes)?;
        }
    }

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, FmtSubscriber};
    // 日志写 stderr，stdout 只留给结果
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(env_filter).with_writer(io::stderr).finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// 解析线程参数："auto" 为 None（CPU 核数），其余必须是 >= 1 的整数
fn parse_threads(s: &str) -> Result<Option<usize>> {
    if s.eq_ignore_ascii_case("auto") { return Ok(None); }
    match s.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(Some(n)),
        _ => bail!("invalid --threads value {s:?}: expected \"auto\" or a positive integer"),
    }
}

/// 配置文件打底，命令行给出的值逐项覆盖
fn merge_options(
    file: LcsOptions,
    threads: Option<&str>,
    max_file_size: Option<u64>,
    recursive: Option<bool>,
) -> Result<LcsOptions> {
    let threads = match threads {
        Some(t) => parse_threads(t)?,
        None => file.threads,
    };
    Ok(LcsOptions {
        threads,
        max_file_size: max_file_size.or(file.max_file_size),
        recursive: recursive.unwrap_or(file.recursive),
    })
}

/// 打印最佳记录：文件名、各自偏移与匹配长度
fn print_best(out: &mut dyn Write, report: &RunReport, best: &MatchRecord, show_bytes: bool) -> io::Result<()> {
    writeln!(out, "The most longest strand bytes exists in the following files.")?;
    writeln!(
        out,
        "{} : The offset is {} : {} : The offset is {} : {}",
        report.names[best.left],
        best.left_offset,
        report.names[best.right],
        best.right_offset,
        best.len()
    )?;
    if show_bytes {
        writeln!(out, "{}", hex::encode(&best.matched))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytestrand_core::RunStats;

    #[test]
    fn threads_argument() {
        assert_eq!(parse_threads("auto").unwrap(), None);
        assert_eq!(parse_threads("AUTO").unwrap(), None);
        assert_eq!(parse_threads("3").unwrap(), Some(3));
        assert!(parse_threads("0").is_err());
        assert!(parse_threads("x").is_err());
    }

    fn file_opts() -> LcsOptions {
        LcsOptions { threads: Some(4), max_file_size: Some(1024), recursive: true }
    }

    #[test]
    fn file_values_kept_without_flags() {
        assert_eq!(merge_options(file_opts(), None, None, None).unwrap(), file_opts());
    }

    #[test]
    fn flags_override_file_values() {
        let opts = merge_options(file_opts(), Some("auto"), Some(64), Some(false)).unwrap();
        assert_eq!(opts, LcsOptions { threads: None, max_file_size: Some(64), recursive: false });

        let opts = merge_options(LcsOptions::default(), Some("2"), None, Some(true)).unwrap();
        assert_eq!(opts, LcsOptions { threads: Some(2), max_file_size: None, recursive: true });
    }

    #[test]
    fn bad_threads_flag_does_not_reset_config() {
        assert!(merge_options(file_opts(), Some("0"), None, None).is_err());
        assert!(merge_options(file_opts(), Some("x"), None, None).is_err());
    }

    #[test]
    fn no_recursive_flag_parses() {
        let cli = Cli::try_parse_from(["bytestrand", "scan", "--input", "dir", "--no-recursive"]).unwrap();
        match cli.command {
            Commands::Scan { recursive, no_recursive, .. } => {
                assert!(!recursive);
                assert!(no_recursive);
            }
        }
    }

    #[test]
    fn best_line_format() {
        let best = MatchRecord { left: 0, right: 1, left_offset: 1, right_offset: 0, matched: b"anana".to_vec() };
        let report = RunReport {
            stats: RunStats::default(),
            names: vec!["a.bin".into(), "b.bin".into()],
            best: Some(best.clone()),
        };
        let mut buf = Vec::new();
        print_best(&mut buf, &report, &best, true).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[1], "a.bin : The offset is 1 : b.bin : The offset is 0 : 5");
        assert_eq!(lines[2], "616e616e61");
    }

    #[test]
    fn cli_parses_scan() {
        let cli = Cli::try_parse_from(["bytestrand", "scan", "--input", "dir", "--threads", "2", "--recursive"]).unwrap();
        match cli.command {
            Commands::Scan { input, threads, recursive, show_bytes, .. } => {
                assert_eq!(input, PathBuf::from("dir"));
                assert_eq!(threads.as_deref(), Some("2"));
                assert!(recursive);
                assert!(!show_bytes);
            }
        }
    }
}

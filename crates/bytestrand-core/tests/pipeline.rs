//! 目录级端到端测试

use bytestrand_core::{find_longest_strand, LcsError, LcsOptions};
use std::fs;
use std::path::Path;

fn write_files(dir: &Path, files: &[(&str, &[u8])]) {
    for (name, bytes) in files {
        fs::write(dir.join(name), bytes).unwrap();
    }
}

fn run(dir: &Path, threads: usize) -> (bytestrand_core::RunReport, serde_json::Value) {
    let mut out = Vec::new();
    let opts = LcsOptions { threads: Some(threads), ..Default::default() };
    let report = find_longest_strand(dir, &mut out, &opts).unwrap();
    (report, serde_json::from_slice(&out).unwrap())
}

#[test]
fn best_pair_is_first_and_third_file() {
    let dir = tempfile::tempdir().unwrap();
    write_files(
        dir.path(),
        &[
            ("sample.1", b"\x00\x01header-COMMON-PAYLOAD\xff"),
            ("sample.2", b"\x10\x11COMMON\x12"),
            ("sample.3", b"zz-COMMON-PAYLOAD-zz"),
        ],
    );

    let (report, json) = run(dir.path(), 1);
    assert_eq!(report.stats.files_loaded, 3);
    assert_eq!(report.stats.records_written, 3);

    let best = report.best().unwrap();
    assert_eq!((best.left, best.right), (0, 2));
    assert_eq!(best.matched, b"-COMMON-PAYLOAD");
    assert_eq!((best.left_offset, best.right_offset), (8, 2));

    let items = json.as_array().unwrap();
    assert_eq!(items.len(), 3);
    assert_eq!(items[1]["left"], "sample.1");
    assert_eq!(items[1]["right"], "sample.3");
    assert_eq!(items[1]["length"], 15);
    assert_eq!(items[0]["bytes_hex"], hex::encode(b"COMMON"));
}

#[test]
fn parallel_output_matches_serial() {
    let dir = tempfile::tempdir().unwrap();
    for i in 0..6u32 {
        let bytes: Vec<u8> = (0..300u32).map(|j| ((j * (i + 2) + i) % 13) as u8).collect();
        fs::write(dir.path().join(format!("f{i}.bin")), bytes).unwrap();
    }

    let (serial, serial_json) = run(dir.path(), 1);
    let (parallel, parallel_json) = run(dir.path(), 4);
    assert_eq!(serial_json, parallel_json);
    assert_eq!(serial.best, parallel.best);
    assert_eq!(parallel.stats.records_written, 15);
}

#[test]
fn single_file_has_no_best() {
    let dir = tempfile::tempdir().unwrap();
    write_files(dir.path(), &[("only", b"abc")]);

    let (report, json) = run(dir.path(), 1);
    assert_eq!(json, serde_json::json!([]));
    assert!(matches!(report.best(), Err(LcsError::EmptyInput { count: 1 })));
}

#[test]
fn disjoint_files_report_zero_length() {
    let dir = tempfile::tempdir().unwrap();
    write_files(dir.path(), &[("a", &[0x00, 0x01]), ("b", &[0xFF, 0xFE])]);

    let (report, json) = run(dir.path(), 1);
    let best = report.best().unwrap();
    assert!(best.is_empty());
    assert_eq!(json[0]["length"], 0);
    assert_eq!(json[0]["bytes_hex"], "");
}

// Streaming-mode tests: lazy start, ordering, and abort-by-drop.

mod common;

use common::*;
use futures::StreamExt;
use scour::{sweep_stream, EntryKind, SweepOptions, SweptEntry};
use std::time::Duration;
use tempfile::tempdir;

#[tokio::test]
async fn test_stream_yields_every_record_then_ends() {
    let tmp = tempdir().unwrap();
    build_tree(tmp.path());

    let mut stream = sweep_stream(
        tmp.path(),
        SweepOptions {
            files: Some("*.*".into()),
            dirs: Some("*".into()),
            ..Default::default()
        },
    )
    .unwrap();

    let mut records: Vec<SweptEntry> = Vec::new();
    while let Some(record) = stream.next().await {
        records.push(record.unwrap());
    }

    assert_eq!(records.len(), FILE_COUNT + DIR_COUNT);
    assert!(records.iter().all(|entry| entry.deleted));
    assert_eq!(count_files(tmp.path()), 0);
    assert_eq!(count_dirs(tmp.path()), 0);
}

#[tokio::test]
async fn test_directories_emit_after_their_descendants() {
    let tmp = tempdir().unwrap();
    build_tree(tmp.path());

    let mut stream = sweep_stream(
        tmp.path(),
        SweepOptions {
            files: Some("*.*".into()),
            dirs: Some("*".into()),
            ..Default::default()
        },
    )
    .unwrap();

    let mut records: Vec<SweptEntry> = Vec::new();
    while let Some(record) = stream.next().await {
        records.push(record.unwrap());
    }

    // bottom-up per subtree: nothing under a directory may appear after
    // the directory's own record
    for (i, entry) in records.iter().enumerate() {
        if entry.kind == EntryKind::Directory {
            for later in &records[i + 1..] {
                assert!(
                    !later.path.starts_with(&entry.path),
                    "{} emitted after its ancestor {}",
                    later.path.display(),
                    entry.path.display()
                );
            }
        }
    }
}

#[tokio::test]
async fn test_unpolled_stream_touches_nothing() {
    let tmp = tempdir().unwrap();
    build_tree(tmp.path());

    let stream = sweep_stream(
        tmp.path(),
        SweepOptions {
            files: Some("*.*".into()),
            ..Default::default()
        },
    )
    .unwrap();
    drop(stream);

    tokio::time::sleep(Duration::from_millis(100)).await;

    assert_eq!(count_files(tmp.path()), FILE_COUNT);
}

#[tokio::test]
async fn test_dropping_the_stream_aborts_the_walk() {
    let tmp = tempdir().unwrap();
    for i in 0..12 {
        std::fs::write(tmp.path().join(format!("file{i}.tmp")), b"").unwrap();
    }

    let mut stream = sweep_stream(
        tmp.path(),
        SweepOptions {
            files: Some("*.*".into()),
            ..Default::default()
        },
    )
    .unwrap();

    let first = stream.next().await.unwrap().unwrap();
    assert!(first.deleted);
    drop(stream);

    // the capacity-1 channels bound the run-ahead: beyond the consumed
    // record, at most a couple more removals can already be in flight
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(count_files(tmp.path()) >= 12 - 4);
}

#[tokio::test]
async fn test_dry_run_stream_marks_records_processed() {
    let tmp = tempdir().unwrap();
    build_small_tree(tmp.path());

    let mut stream = sweep_stream(
        tmp.path(),
        SweepOptions {
            files: Some("*.*".into()),
            dry_run: true,
            ..Default::default()
        },
    )
    .unwrap();

    let mut count = 0;
    while let Some(record) = stream.next().await {
        let entry = record.unwrap();
        assert!(entry.deleted);
        count += 1;
    }

    assert_eq!(count, 3);
    assert_eq!(count_files(tmp.path()), 3);
}

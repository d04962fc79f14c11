//! Tests for MemStore fault injection
//! MemStore 故障注入测试

use std::{
  io::{Read, Write},
  path::Path,
};

use aok::{OK, Void};
use rlog_fs::{Fault, MemStore, Store, mem::MEM_CAP};

#[static_init::constructor(0)]
extern "C" fn _log_init() {
  log_init::init();
}

#[test]
fn test_short_write_once() -> Void {
  let store = MemStore::new();
  store.inject(Fault::ShortWrite(3));
  let mut w = store.open_append(Path::new("f"))?;
  assert_eq!(w.write(b"abcdef")?, 3);
  assert_eq!(store.pending(), 0);
  assert_eq!(w.write(b"xy")?, 2);
  assert_eq!(store.get("f"), Some(b"abcxy".to_vec()));
  OK
}

#[test]
fn test_short_read_snapshot() -> Void {
  let store = MemStore::new();
  store.put("f", b"0123456789".to_vec());
  store.inject(Fault::ShortRead(4));

  let mut buf = Vec::new();
  store
    .open_read(Path::new("f"))?
    .unwrap()
    .read_to_end(&mut buf)?;
  assert_eq!(buf, b"0123");

  // File itself is intact
  // 文件本身完整
  assert_eq!(store.size(Path::new("f"))?, Some(10));
  OK
}

#[test]
fn test_short_read_skips_absent() -> Void {
  let store = MemStore::new();
  store.inject(Fault::ShortRead(0));
  assert!(store.open_read(Path::new("none"))?.is_none());
  assert_eq!(store.pending(), 1);
  OK
}

#[test]
fn test_remove_rename_open_faults() -> Void {
  let store = MemStore::new();
  store.put("a", vec![1]);

  store.inject(Fault::Remove);
  assert!(store.remove(Path::new("a")).is_err());
  assert!(store.exists("a"));
  assert!(store.remove(Path::new("a"))?);

  store.put("a", vec![1]);
  store.inject(Fault::Rename);
  assert!(store.rename(Path::new("a"), Path::new("b")).is_err());
  assert!(store.exists("a"));
  store.rename(Path::new("a"), Path::new("b"))?;
  assert!(!store.exists("a"));
  assert_eq!(store.get("b"), Some(vec![1]));

  store.inject(Fault::Open);
  assert!(store.open_write(Path::new("c")).is_err());
  assert!(!store.exists("c"));
  store.open_write(Path::new("c"))?;
  assert!(store.exists("c"));
  OK
}

#[test]
fn test_faults_fire_in_kind() -> Void {
  let store = MemStore::new();
  store.inject(Fault::Rename);
  store.inject(Fault::Remove);
  assert_eq!(store.pending(), 2);

  // Remove fires first though queued second
  // Remove 虽排在后面也先触发
  assert!(store.remove(Path::new("x")).is_err());
  assert_eq!(store.pending(), 1);
  OK
}

#[test]
fn test_clones_share_files() -> Void {
  let store = MemStore::with_cap(4096);
  let other = store.clone();
  other.put("f", vec![0u8; 100]);
  assert!(store.exists("f"));

  let info = store.info()?;
  assert_eq!(info.total, 4096);
  assert_eq!(info.used, 100);
  assert_eq!(MemStore::new().info()?.total, MEM_CAP);
  OK
}

#[test]
fn test_truncate_missing() {
  let store = MemStore::new();
  assert!(store.truncate(Path::new("f"), 0).is_err());
}

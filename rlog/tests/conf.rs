//! Configuration tests
//! 配置测试

use aok::{OK, Void};
use rlog::{Cfg, Conf, Error, Log, conf::DEFAULT_MAX_DATA_SIZE};
use rlog_fs::MemStore;

#[static_init::constructor(0)]
extern "C" fn _log_init() {
  log_init::init();
}

#[test]
fn test_defaults() {
  let cfg = Cfg::default();
  assert_eq!(cfg.max_data_size, DEFAULT_MAX_DATA_SIZE);
  assert_eq!(cfg.buf_size, 4096);
  assert_eq!(cfg.cleanup_threshold, 0.95);
  assert_eq!(cfg.cleanup_target, 0.75);
  assert!(cfg.auto_cleanup);
  assert!(!cfg.format_on_init);
  assert!(cfg.reconcile);
  assert_eq!(cfg.max_entries(), 12 * 1024 * 1024 / 18);
  assert!(cfg.validate().is_ok());
}

#[test]
fn test_overrides_in_order() {
  let cfg = Cfg::new(&[
    Conf::MaxDataSize(2048),
    Conf::BufSize(2048),
    Conf::MaxDataSize(4096),
  ]);
  assert_eq!(cfg.max_data_size, 4096);
  assert_eq!(cfg.buf_size, 2048);
  assert_eq!(cfg.max_entries(), 227);
}

#[test]
fn test_invalid() -> Void {
  let cases: &[&[Conf]] = &[
    &[Conf::MaxDataSize(1023)],
    &[Conf::MaxDataSize(16 * 1024 * 1024 + 1)],
    &[Conf::MaxDataSize(0)],
    &[Conf::BufSize(512)],
    &[Conf::BufSize(64 * 1024 + 1)],
    &[Conf::CleanupThreshold(1.5)],
    &[Conf::CleanupThreshold(f64::NAN)],
    &[Conf::CleanupTarget(-0.1)],
    &[Conf::CleanupThreshold(0.5), Conf::CleanupTarget(0.5)],
    &[Conf::CleanupThreshold(0.5), Conf::CleanupTarget(0.8)],
    &[Conf::DataFile("".into())],
    &[Conf::MetaFile("data.bin".into())],
    // Temp names collide with the other file
    // 临时文件名与另一文件冲突
    &[Conf::MetaFile("data.bin.tmp".into())],
    &[Conf::DataFile("meta.bin.tmp".into())],
    &[
      Conf::DataFile("log/a".into()),
      Conf::MetaFile("log/a.tmp".into()),
    ],
    &[
      Conf::DataFile("log/a.tmp".into()),
      Conf::MetaFile("log/a".into()),
    ],
  ];

  for conf in cases {
    let store = MemStore::new();
    store.put("meta.bin", vec![1u8; 3]);
    let r = Log::open(store.clone(), conf);
    assert!(matches!(r, Err(Error::InvalidConfig(_))), "{conf:?}");

    // Store untouched
    // 存储未被访问
    assert_eq!(store.get("meta.bin"), Some(vec![1u8; 3]));
    assert!(!store.exists("data.bin"));
  }
  OK
}

#[test]
fn test_bounds_accepted() -> Void {
  for conf in [
    [Conf::MaxDataSize(1024), Conf::BufSize(1024)],
    [Conf::MaxDataSize(16 * 1024 * 1024), Conf::BufSize(64 * 1024)],
  ] {
    let log = Log::open(MemStore::new(), &conf)?;
    assert_eq!(log.cfg().max_data_size, log.status().free_bytes as u32);
  }

  let log = Log::open(
    MemStore::new(),
    &[Conf::CleanupThreshold(1.0), Conf::CleanupTarget(0.0)],
  )?;
  assert_eq!(log.cfg().cleanup_target, 0.0);
  OK
}

#[test]
fn test_meta_named_like_data_tmp_rejected() -> Void {
  let store = MemStore::new();
  let mut log = Log::open(store.clone(), &[])?;
  for i in 0..5 {
    log.append_at(i, 0, 0, 0)?;
  }
  drop(log);

  // Would be removed as a stale compaction temp on open
  // 打开时会被当作残留压缩临时文件删除
  let r = Log::open(store.clone(), &[Conf::MetaFile("data.bin.tmp".into())]);
  assert!(matches!(r, Err(Error::InvalidConfig(_))));
  assert!(store.exists("meta.bin"));
  assert_eq!(store.get("data.bin").map(|d| d.len()), Some(90));
  OK
}

#[test]
fn test_zero_target_cleanup() -> Void {
  // Target 0 clears the log once the threshold is hit
  // 目标为 0 时达到阈值即清空
  let mut log = Log::open(
    MemStore::new(),
    &[
      Conf::MaxDataSize(1024),
      Conf::CleanupThreshold(0.5),
      Conf::CleanupTarget(0.0),
    ],
  )?;
  for i in 0..28 {
    log.append_at(i, 0, 0, 0)?;
  }
  // 28 × 18 = 504 < 512
  assert_eq!(log.status().active, 28);
  log.append_at(28, 0, 0, 0)?;
  let status = log.status();
  assert_eq!(status.active, 0);
  assert_eq!(status.deleted, 29);
  OK
}

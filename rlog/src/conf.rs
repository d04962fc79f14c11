//! Configuration
//! 配置

use std::path::PathBuf;

use rlog_fs::{TMP, add_ext};

use crate::{
  Error, Result,
  consts::{ENTRY_SIZE, MAX_BUF_SIZE, MAX_DATA_SIZE, MIN_BUF_SIZE, MIN_DATA_SIZE},
};

pub const DEFAULT_MAX_DATA_SIZE: u32 = 12 * 1024 * 1024;
pub const DEFAULT_BUF_SIZE: usize = 4096;
pub const DEFAULT_CLEANUP_THRESHOLD: f64 = 0.95;
pub const DEFAULT_CLEANUP_TARGET: f64 = 0.75;
pub const DATA_FILE: &str = "data.bin";
pub const META_FILE: &str = "meta.bin";

/// Override of one default
/// 覆盖单个默认值
#[derive(Clone, Debug, PartialEq)]
pub enum Conf {
  /// Storage ceiling in bytes
  /// 存储上限（字节）
  MaxDataSize(u32),
  /// Compaction transfer buffer in bytes
  /// 压缩传输缓冲区（字节）
  BufSize(usize),
  /// Usage ratio that triggers auto cleanup
  /// 触发自动清理的使用率
  CleanupThreshold(f64),
  /// Usage ratio kept after auto cleanup
  /// 自动清理后保留的使用率
  CleanupTarget(f64),
  AutoCleanup(bool),
  /// Remove data and metadata before load
  /// 加载前删除数据与元数据
  FormatOnInit(bool),
  DataFile(PathBuf),
  MetaFile(PathBuf),
  /// Check data file against metadata on open
  /// 打开时按元数据核对数据文件
  Reconcile(bool),
}

/// Resolved configuration
/// 解析后的配置
#[derive(Clone, Debug, PartialEq)]
pub struct Cfg {
  pub max_data_size: u32,
  pub buf_size: usize,
  pub cleanup_threshold: f64,
  pub cleanup_target: f64,
  pub auto_cleanup: bool,
  pub format_on_init: bool,
  pub data_file: PathBuf,
  pub meta_file: PathBuf,
  pub reconcile: bool,
}

impl Default for Cfg {
  fn default() -> Self {
    Self {
      max_data_size: DEFAULT_MAX_DATA_SIZE,
      buf_size: DEFAULT_BUF_SIZE,
      cleanup_threshold: DEFAULT_CLEANUP_THRESHOLD,
      cleanup_target: DEFAULT_CLEANUP_TARGET,
      auto_cleanup: true,
      format_on_init: false,
      data_file: DATA_FILE.into(),
      meta_file: META_FILE.into(),
      reconcile: true,
    }
  }
}

fn ratio(name: &str, v: f64) -> Result<()> {
  if v.is_finite() && (0.0..=1.0).contains(&v) {
    return Ok(());
  }
  Err(Error::conf(format!("{name} {v} not in [0, 1]")))
}

impl Cfg {
  /// Defaults with overrides applied in order
  /// 按顺序应用覆盖后的默认值
  pub fn new(conf: &[Conf]) -> Self {
    let mut cfg = Self::default();
    for c in conf {
      match c {
        Conf::MaxDataSize(n) => cfg.max_data_size = *n,
        Conf::BufSize(n) => cfg.buf_size = *n,
        Conf::CleanupThreshold(v) => cfg.cleanup_threshold = *v,
        Conf::CleanupTarget(v) => cfg.cleanup_target = *v,
        Conf::AutoCleanup(b) => cfg.auto_cleanup = *b,
        Conf::FormatOnInit(b) => cfg.format_on_init = *b,
        Conf::DataFile(p) => cfg.data_file = p.clone(),
        Conf::MetaFile(p) => cfg.meta_file = p.clone(),
        Conf::Reconcile(b) => cfg.reconcile = *b,
      }
    }
    cfg
  }

  pub fn validate(&self) -> Result<()> {
    if !(MIN_DATA_SIZE..=MAX_DATA_SIZE).contains(&self.max_data_size) {
      return Err(Error::conf(format!(
        "max_data_size {} not in [{MIN_DATA_SIZE}, {MAX_DATA_SIZE}]",
        self.max_data_size
      )));
    }
    if !(MIN_BUF_SIZE..=MAX_BUF_SIZE).contains(&self.buf_size) {
      return Err(Error::conf(format!(
        "buf_size {} not in [{MIN_BUF_SIZE}, {MAX_BUF_SIZE}]",
        self.buf_size
      )));
    }
    ratio("cleanup_threshold", self.cleanup_threshold)?;
    ratio("cleanup_target", self.cleanup_target)?;
    if self.cleanup_threshold <= self.cleanup_target {
      return Err(Error::conf(format!(
        "cleanup_threshold {} must exceed cleanup_target {}",
        self.cleanup_threshold, self.cleanup_target
      )));
    }
    if self.data_file.as_os_str().is_empty() || self.meta_file.as_os_str().is_empty() {
      return Err(Error::conf("empty file name"));
    }
    // Each file and its temp must not land on the other's names
    // 每个文件及其临时文件不得与另一方的名字重合
    let data_tmp = add_ext(&self.data_file, TMP);
    let meta_tmp = add_ext(&self.meta_file, TMP);
    if self.data_file == self.meta_file
      || data_tmp == self.meta_file
      || meta_tmp == self.data_file
      || data_tmp == meta_tmp
    {
      return Err(Error::conf(format!(
        "data_file {} and meta_file {} collide",
        self.data_file.display(),
        self.meta_file.display()
      )));
    }
    Ok(())
  }

  /// Whole entries fitting in `max_data_size`
  /// `max_data_size` 可容纳的完整条目数
  #[inline]
  pub fn max_entries(&self) -> u32 {
    self.max_data_size / ENTRY_SIZE as u32
  }
}

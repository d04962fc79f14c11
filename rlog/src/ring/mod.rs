//! Log manager handle
//! 日志管理句柄

mod append;
mod evict;
mod open;

use log::{error, info, warn};
use rlog_fs::{Info, Store, TMP, add_ext};

use crate::{
  Cfg, DataFile, Entry, Error, Meta, Result, Status, consts::ENTRY_SIZE, meta,
};

/// Bounded FIFO entry log over one store
/// 基于单个存储的有界 FIFO 条目日志
///
/// Owns the only in-memory copy of the metadata. The copy is replaced only
/// after the new record is persisted.
/// 持有唯一的内存元数据副本，新记录持久化后才替换。
pub struct Log<S: Store> {
  store: S,
  cfg: Cfg,
  data: DataFile,
  meta: Meta,
}

impl<S: Store> Log<S> {
  #[inline]
  pub fn meta(&self) -> &Meta {
    &self.meta
  }

  #[inline]
  pub fn cfg(&self) -> &Cfg {
    &self.cfg
  }

  #[inline]
  pub fn store(&self) -> &S {
    &self.store
  }

  #[inline]
  fn used_bytes(&self) -> u64 {
    self.meta.active as u64 * ENTRY_SIZE as u64
  }

  /// Read up to `max` oldest entries, no mutation
  /// 读取最多 `max` 条最旧条目，不修改状态
  pub fn read_chunk(&self, max: u32) -> Result<Vec<Entry>> {
    let max = max.min(self.meta.active) as usize;
    self.data.read(&self.store, max)
  }

  /// Fill `buf` with the oldest entries, return count read
  /// 用最旧条目填充 `buf`，返回读取条数
  pub fn read_into(&self, buf: &mut [Entry]) -> Result<usize> {
    if buf.is_empty() {
      return Err(Error::InvalidArgument("empty read buffer".into()));
    }
    let max = buf.len().min(self.meta.active as usize);
    self.data.read_into(&self.store, &mut buf[..max])
  }

  pub fn status(&self) -> Status {
    let used_bytes = self.used_bytes();
    Status {
      total: self.meta.total,
      active: self.meta.active,
      deleted: self.meta.deleted,
      next_id: self.meta.next_id,
      used_bytes,
      free_bytes: (self.cfg.max_data_size as u64).saturating_sub(used_bytes),
      max_entries: self.cfg.max_entries(),
    }
  }

  /// Usage of the underlying store
  /// 底层存储用量
  pub fn fs_info(&self) -> Result<Info> {
    Ok(self.store.info()?)
  }

  /// Remove all entries and reset metadata, irreversible
  /// 删除全部条目并重置元数据，不可恢复
  pub fn format(&mut self) -> Result<()> {
    warn!("format: all entries will be lost");
    wipe(&self.store, &self.data, &self.cfg)?;
    let fresh = Meta::default();
    meta::persist(&self.store, &self.cfg.meta_file, &fresh)?;
    self.meta = fresh;
    info!("formatted");
    Ok(())
  }

  /// After a failed mutation: reconcile, then rewrite the metadata record
  /// 变更失败后：核对，然后重写元数据记录
  ///
  /// Skipped when reconciliation is off. Errors are logged only.
  /// 关闭核对时跳过，错误只记录日志。
  fn recover(&mut self) {
    if !self.cfg.reconcile {
      return;
    }
    let r = self
      .reconcile()
      .and_then(|()| meta::persist(&self.store, &self.cfg.meta_file, &self.meta));
    match r {
      Ok(()) => warn!(
        "recovered: active={}, deleted={}",
        self.meta.active, self.meta.deleted
      ),
      Err(e) => error!("recover failed: {e}"),
    }
  }

  /// Persist metadata and release the store
  /// 持久化元数据并释放存储
  pub fn close(self) -> Result<S> {
    meta::persist(&self.store, &self.cfg.meta_file, &self.meta)?;
    info!("closed: active={}", self.meta.active);
    Ok(self.store)
  }
}

/// Remove data, temp and metadata files, absence is fine
/// 删除数据、临时与元数据文件，不存在也可
fn wipe<S: Store>(store: &S, data: &DataFile, cfg: &Cfg) -> Result<()> {
  store.remove(data.path())?;
  store.remove(data.tmp())?;
  store.remove(&cfg.meta_file)?;
  store.remove(&add_ext(&cfg.meta_file, TMP))?;
  Ok(())
}

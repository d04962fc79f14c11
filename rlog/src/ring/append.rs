//! Append and auto cleanup
//! 追加与自动清理

use coarsetime::Clock;
use log::{debug, error, warn};
use rlog_fs::Store;

use super::Log;
use crate::{Entry, Meta, Result, meta};

impl<S: Store> Log<S> {
  /// Append with wall-clock seconds
  /// 以当前时间（秒）追加
  pub fn append(&mut self, kind: u8, unit: u8, val: i32) -> Result<Entry> {
    let ts = match Clock::now_since_epoch().as_secs() {
      // Clock not set, fall back to id
      // 时钟未设置，退回使用 id
      0 => self.meta.next_id,
      s => s as u32,
    };
    self.append_at(ts, kind, unit, val)
  }

  /// Append with caller timestamp
  /// 以调用方时间戳追加
  ///
  /// Auto cleanup failure is logged, not returned: the entry is committed.
  /// 自动清理失败只记录日志不返回：条目已提交。
  pub fn append_at(&mut self, ts: u32, kind: u8, unit: u8, val: i32) -> Result<Entry> {
    let entry = Entry {
      ts,
      id: self.meta.next_id,
      kind,
      unit,
      val,
    };
    let next = self.meta.appended()?;

    if let Err(e) = self.commit(&entry, &next) {
      error!("append id={} failed: {e}", entry.id);
      self.rollback();
      self.recover();
      return Err(e);
    }
    self.meta = next;
    debug!("append id={}", entry.id);

    if self.cfg.auto_cleanup
      && let Err(e) = self.auto_cleanup()
    {
      error!("auto cleanup failed: {e}");
    }
    Ok(entry)
  }

  fn commit(&self, entry: &Entry, next: &Meta) -> Result<()> {
    self.data.append(&self.store, entry)?;
    meta::persist(&self.store, &self.cfg.meta_file, next)
  }

  /// Cut uncommitted bytes off the data file
  /// 截掉数据文件中未提交的字节
  fn rollback(&self) {
    let len = self.used_bytes();
    let path = self.data.path();
    match self.store.size(path) {
      Ok(Some(size)) if size > len => {
        if let Err(e) = self.store.truncate(path, len) {
          error!("rollback {} to {len} bytes failed: {e}", path.display());
        }
      }
      Ok(_) => {}
      Err(e) => error!("rollback {}: {e}", path.display()),
    }
  }

  /// Evict down to `cleanup_target` once usage reaches `cleanup_threshold`
  /// 使用率达到 `cleanup_threshold` 时淘汰至 `cleanup_target`
  ///
  /// Returns entries evicted.
  /// 返回淘汰条数。
  pub fn auto_cleanup(&mut self) -> Result<u32> {
    let usage = self.used_bytes() as f64 / self.cfg.max_data_size as f64;
    if usage < self.cfg.cleanup_threshold {
      return Ok(0);
    }

    let target = (self.cfg.max_entries() as f64 * self.cfg.cleanup_target).floor() as u32;
    if self.meta.active <= target {
      return Ok(0);
    }

    warn!(
      "storage {:.1}% full, auto cleanup: remove {}, keep {target}",
      usage * 100.0,
      self.meta.active - target
    );
    self.evict(self.meta.active - target)
  }
}

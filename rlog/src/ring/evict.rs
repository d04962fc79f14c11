//! Eviction and manual cleanup
//! 淘汰与手动清理

use log::{error, info, warn};
use rlog_fs::Store;

use super::Log;
use crate::{Result, compact, meta};

impl<S: Store> Log<S> {
  /// Evict the oldest `count` entries, clamped to active
  /// 淘汰最旧的 `count` 条，上限为现存条数
  ///
  /// Returns entries evicted.
  /// 返回淘汰条数。
  pub fn evict(&mut self, count: u32) -> Result<u32> {
    let count = count.min(self.meta.active);
    if count == 0 {
      return Ok(0);
    }
    if let Err(e) = compact::evict(
      &self.store,
      &self.data,
      self.meta.active,
      count,
      self.cfg.buf_size,
    ) {
      self.recover();
      return Err(e);
    }

    // Data file already changed, the eviction stands even if persist fails
    // 数据文件已改变，即使持久化失败淘汰也已生效
    self.meta = self.meta.evicted(count);
    if let Err(e) = meta::persist(&self.store, &self.cfg.meta_file, &self.meta) {
      error!("persist metadata after evicting {count} failed: {e}");
      self.recover();
      return Err(e);
    }
    info!(
      "evicted {count}, active={}, deleted={}",
      self.meta.active, self.meta.deleted
    );
    Ok(count)
  }

  /// Keep only the newest `target` entries
  /// 只保留最新的 `target` 条
  pub fn cleanup(&mut self, target: u32) -> Result<u32> {
    let active = self.meta.active;
    if target >= active {
      warn!("cleanup target {target} >= active {active}, nothing to do");
      return Ok(0);
    }
    info!("cleanup: remove {}, keep {target}", active - target);
    self.evict(active - target)
  }
}

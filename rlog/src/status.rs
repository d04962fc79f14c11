//! Log status / 日志状态

use crate::consts::ENTRY_SIZE;

/// Counters and space usage / 计数与空间用量
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Status {
  /// Entries ever appended / 累计追加条目数
  pub total: u32,
  /// Entries present / 现存条目数
  pub active: u32,
  /// Entries evicted from the front / 从头部淘汰的条目数
  pub deleted: u32,
  pub next_id: u32,
  /// `active × ENTRY_SIZE`
  pub used_bytes: u64,
  /// `max_data_size − used_bytes`, floored at 0 / 下限为 0
  pub free_bytes: u64,
  pub max_entries: u32,
}

impl Status {
  /// Used fraction of whole-entry capacity, above 1.0 when over capacity
  /// 已用比例（按完整条目容量），超出容量时大于 1.0
  #[inline]
  pub fn usage(&self) -> f64 {
    let cap = self.max_entries as u64 * ENTRY_SIZE as u64;
    if cap == 0 {
      0.0
    } else {
      self.used_bytes as f64 / cap as f64
    }
  }
}

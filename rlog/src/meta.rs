//! Metadata record and its store
//! 元数据记录及其存储
//!
//! ```text
//! | total(4) | active(4) | next_id(4) | deleted(4) | tag(4) |  = 20
//! ```
//!
//! Every persist rewrites the whole record.
//! 每次持久化都重写整条记录。

use std::path::Path;

use log::{info, warn};
use rlog_fs::{Sink, Store, TMP, add_ext};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned, little_endian::U32};

use crate::{
  Error, Result,
  consts::{META_SIZE, META_TAG},
  io::{fill, write_once},
};

/// Log accounting counters
/// 日志计数
///
/// `active + deleted == total` holds after every completed operation.
/// 每个操作完成后 `active + deleted == total` 成立。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Meta {
  /// Entries ever appended / 累计追加条目数
  pub total: u32,
  /// Entries present in the data file / 数据文件中现存条目数
  pub active: u32,
  /// Next id to assign / 下一个分配的 id
  pub next_id: u32,
  /// Entries ever evicted from the front / 累计从头部淘汰的条目数
  pub deleted: u32,
}

#[derive(FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
#[repr(C)]
struct Disk {
  total: U32,
  active: U32,
  next_id: U32,
  deleted: U32,
  tag: U32,
}

const _: () = assert!(size_of::<Disk>() == META_SIZE);

impl Meta {
  /// Counters after appending one entry, `IdExhausted` once ids run out
  /// 追加一条后的计数，id 用尽时返回 `IdExhausted`
  #[inline]
  pub(crate) fn appended(self) -> Result<Self> {
    let bump = |n: u32| n.checked_add(1).ok_or(Error::IdExhausted);
    Ok(Self {
      total: bump(self.total)?,
      active: bump(self.active)?,
      next_id: bump(self.next_id)?,
      ..self
    })
  }

  /// Counters after evicting `n` oldest entries
  /// 淘汰最旧 `n` 条后的计数
  #[inline]
  pub(crate) fn evicted(self, n: u32) -> Self {
    Self {
      active: self.active - n,
      deleted: self.deleted + n,
      ..self
    }
  }

  #[inline]
  pub fn is_consistent(&self) -> bool {
    self.active as u64 + self.deleted as u64 == self.total as u64
  }

  fn to_disk(self) -> Disk {
    Disk {
      total: U32::new(self.total),
      active: U32::new(self.active),
      next_id: U32::new(self.next_id),
      deleted: U32::new(self.deleted),
      tag: U32::new(META_TAG),
    }
  }
}

/// Load metadata, fresh on first run or tag mismatch
/// 加载元数据，首次运行或标记不符时返回新记录
pub fn load<S: Store>(store: &S, path: &Path) -> Result<Meta> {
  let Some(mut file) = store.open_read(path)? else {
    info!("fresh metadata: {}", path.display());
    return Ok(Meta::default());
  };

  let mut buf = [0u8; META_SIZE];
  let len = fill(&mut file, &mut buf)?;
  if len < META_SIZE {
    return Err(Error::CorruptMetadata { len });
  }

  let Ok(d) = Disk::ref_from_bytes(&buf) else {
    return Err(Error::CorruptMetadata { len });
  };
  if d.tag.get() != META_TAG {
    warn!(
      "metadata tag {:#010x} invalid, reinitializing: {}",
      d.tag.get(),
      path.display()
    );
    return Ok(Meta::default());
  }

  let meta = Meta {
    total: d.total.get(),
    active: d.active.get(),
    next_id: d.next_id.get(),
    deleted: d.deleted.get(),
  };
  info!(
    "metadata loaded: active={}, total={}, deleted={}",
    meta.active, meta.total, meta.deleted
  );
  Ok(meta)
}

/// Overwrite metadata record
/// 覆盖写入元数据记录
///
/// With atomic rename the record goes to a temp file first, so a crash never
/// leaves a half-written record behind.
/// 支持原子改名时先写临时文件，崩溃不会留下半条记录。
pub fn persist<S: Store>(store: &S, path: &Path, meta: &Meta) -> Result<()> {
  let disk = meta.to_disk();
  if !S::ATOMIC_REPLACE {
    let mut file = store.open_write(path)?;
    write_once(&mut file, disk.as_bytes())?;
    file.sync()?;
    return Ok(());
  }

  let tmp = add_ext(path, TMP);
  let r = (|| -> Result<()> {
    let mut file = store.open_write(&tmp)?;
    write_once(&mut file, disk.as_bytes())?;
    file.sync()?;
    drop(file);
    store.rename(&tmp, path)?;
    Ok(())
  })();
  if r.is_err() {
    let _ = store.remove(&tmp);
  }
  r
}

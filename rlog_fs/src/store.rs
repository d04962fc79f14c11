//! Byte store boundary
//! 字节存储边界

use std::{
  fs::File,
  io::{self, Read, Seek, Write},
  path::Path,
};

/// Store usage
/// 存储用量
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Info {
  /// Capacity in bytes / 总容量（字节）
  pub total: u64,
  /// Used bytes / 已用字节
  pub used: u64,
}

/// Writable handle that can be made durable
/// 可持久化的写句柄
pub trait Sink: Write {
  /// Flush and sync to medium
  /// 刷新并同步到介质
  fn sync(&mut self) -> io::Result<()>;
}

impl Sink for File {
  #[inline]
  fn sync(&mut self) -> io::Result<()> {
    self.sync_all()
  }
}

/// Named-file byte store, synchronous
/// 命名文件字节存储（同步）
///
/// Durable on close, not transactional.
/// 关闭即持久，非事务。
pub trait Store {
  type Reader: Read + Seek;
  type Writer: Sink;

  /// `rename` over an existing target is atomic
  /// `rename` 覆盖已有目标是否原子
  const ATOMIC_REPLACE: bool;

  /// Open for append, create if absent
  /// 追加打开，不存在则创建
  fn open_append(&self, path: &Path) -> io::Result<Self::Writer>;

  /// Create or truncate for write
  /// 创建或截断写入
  fn open_write(&self, path: &Path) -> io::Result<Self::Writer>;

  /// Open for read, `None` if absent
  /// 读取打开，不存在返回 `None`
  fn open_read(&self, path: &Path) -> io::Result<Option<Self::Reader>>;

  fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;

  /// Remove file, `false` if it was absent
  /// 删除文件，不存在返回 `false`
  fn remove(&self, path: &Path) -> io::Result<bool>;

  /// File size, `None` if absent
  /// 文件大小，不存在返回 `None`
  fn size(&self, path: &Path) -> io::Result<Option<u64>>;

  /// Cut file to `len` bytes
  /// 截断文件到 `len` 字节
  fn truncate(&self, path: &Path, len: u64) -> io::Result<()>;

  fn info(&self) -> io::Result<Info>;
}

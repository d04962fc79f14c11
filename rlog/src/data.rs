//! Entry store: the data file
//! 条目存储：数据文件
//!
//! Knows only the record width. Counts live in metadata.
//! 只知道记录宽度，计数由元数据维护。

use std::{
  io::BufReader,
  path::{Path, PathBuf},
};

use rlog_fs::{Sink, Store, TMP, add_ext};

use crate::{
  Entry, Result,
  consts::ENTRY_SIZE,
  io::{fill, write_once},
};

// Records per read buffer
// 每个读缓冲区的记录数
const READ_BATCH: usize = 256;

#[derive(Debug, Clone)]
pub struct DataFile {
  path: PathBuf,
  tmp: PathBuf,
}

impl DataFile {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    let path = path.into();
    let tmp = add_ext(&path, TMP);
    Self { path, tmp }
  }

  #[inline]
  pub fn path(&self) -> &Path {
    &self.path
  }

  /// Compaction target, swapped in on success
  /// 压缩目标文件，成功后替换原文件
  #[inline]
  pub fn tmp(&self) -> &Path {
    &self.tmp
  }

  /// Append one record
  /// 追加一条记录
  pub fn append<S: Store>(&self, store: &S, entry: &Entry) -> Result<()> {
    let mut file = store.open_append(&self.path)?;
    write_once(&mut file, &entry.encode())?;
    file.sync()?;
    Ok(())
  }

  /// Decode records from the start into `out`, stop early on EOF
  /// 从头解码记录到 `out`，遇 EOF 提前停止
  pub fn read_into<S: Store>(&self, store: &S, out: &mut [Entry]) -> Result<usize> {
    if out.is_empty() {
      return Ok(0);
    }
    let Some(file) = store.open_read(&self.path)? else {
      return Ok(0);
    };
    let cap = ENTRY_SIZE * out.len().min(READ_BATCH);
    let mut reader = BufReader::with_capacity(cap, file);
    let mut buf = [0u8; ENTRY_SIZE];
    let mut n = 0;
    for slot in out.iter_mut() {
      if fill(&mut reader, &mut buf)? < ENTRY_SIZE {
        break;
      }
      let Some(entry) = Entry::decode(&buf) else {
        break;
      };
      *slot = entry;
      n += 1;
    }
    Ok(n)
  }

  /// Read up to `max` records from the start
  /// 从头读取最多 `max` 条记录
  pub fn read<S: Store>(&self, store: &S, max: usize) -> Result<Vec<Entry>> {
    let mut li = vec![Entry::default(); max];
    let n = self.read_into(store, &mut li)?;
    li.truncate(n);
    Ok(li)
  }

  /// Physical size in bytes, 0 if absent
  /// 物理大小（字节），不存在为 0
  pub fn len<S: Store>(&self, store: &S) -> Result<u64> {
    Ok(store.size(&self.path)?.unwrap_or(0))
  }

  /// Drop the oldest `skip` of `active` records
  /// 删除 `active` 条中最旧的 `skip` 条
  pub fn truncate_front<S: Store>(
    &self,
    store: &S,
    skip: u32,
    active: u32,
    buf_size: usize,
  ) -> Result<()> {
    let skip_bytes = skip as u64 * ENTRY_SIZE as u64;
    let remaining = (active - skip) as u64 * ENTRY_SIZE as u64;
    crate::compact::copy_tail(store, self, skip_bytes, remaining, buf_size)
  }
}

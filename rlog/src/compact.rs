//! Front eviction with bounded memory
//! 内存受限的头部淘汰
//!
//! ## Flow / 流程
//!
//! 1. Evict all: remove data file / 全部淘汰：删除数据文件
//! 2. Copy surviving tail into temp through one transfer buffer
//!    通过单个传输缓冲区把存活尾部复制到临时文件
//! 3. Swap temp in / 替换临时文件
//!
//! Without atomic rename, step 3 removes the original before renaming. A crash
//! between the two leaves only the temp file; open reconciles it.
//! 无原子改名时，第 3 步先删原文件再改名。两者间崩溃只留下临时文件，打开时修复。

use std::{
  io::{Seek, SeekFrom, Write},
  path::Path,
};

use log::{error, info};
use rlog_fs::{Sink, Store};

use crate::{DataFile, Error, Result, consts::PROGRESS_INTERVAL, io::fill};

/// Drop the oldest `count` of `active` entries from the data file,
/// `0 < count <= active`
/// 从数据文件删除 `active` 条中最旧的 `count` 条，`0 < count <= active`
///
/// On `Ok` the data file already holds only the survivors, metadata is the
/// caller's to persist. On error before the swap nothing changed.
/// 返回 `Ok` 时数据文件只剩存活条目，元数据由调用方持久化。交换前出错则无任何变化。
pub(crate) fn evict<S: Store>(
  store: &S,
  data: &DataFile,
  active: u32,
  count: u32,
  buf_size: usize,
) -> Result<()> {
  debug_assert!(count > 0 && count <= active);

  if count == active {
    info!("evict all {count} entries");
    store.remove(data.path())?;
    return Ok(());
  }
  info!("evict {count} of {active} entries");
  data.truncate_front(store, count, active, buf_size)
}

/// Copy `remaining` bytes after `skip` into temp, then swap it in
/// 将 `skip` 之后的 `remaining` 字节复制到临时文件并替换
pub(crate) fn copy_tail<S: Store>(
  store: &S,
  data: &DataFile,
  skip: u64,
  remaining: u64,
  buf_size: usize,
) -> Result<()> {
  let mut buf = Vec::new();
  buf
    .try_reserve_exact(buf_size)
    .map_err(|_| Error::OutOfMemory(buf_size))?;
  buf.resize(buf_size, 0);

  info!("copy {remaining} bytes in chunks of {buf_size}");
  if let Err(e) = copy(store, data, skip, remaining, &mut buf) {
    discard(store, data.tmp());
    return Err(e);
  }
  drop(buf);

  swap(store, data)
}

fn copy<S: Store>(
  store: &S,
  data: &DataFile,
  skip: u64,
  remaining: u64,
  buf: &mut [u8],
) -> Result<()> {
  let fail = |copied| Error::CompactionFailed {
    copied,
    expected: remaining,
  };

  let Some(mut src) = store.open_read(data.path())? else {
    error!("source missing: {}", data.path().display());
    return Err(fail(0));
  };
  src.seek(SeekFrom::Start(skip))?;
  let mut dst = store.open_write(data.tmp())?;

  let mut copied = 0u64;
  while copied < remaining {
    let want = (remaining - copied).min(buf.len() as u64) as usize;
    let chunk = &mut buf[..want];

    let got = fill(&mut src, chunk)?;
    if got != want {
      error!("read {got}, expected {want} at offset {copied}");
      return Err(fail(copied));
    }
    let written = dst.write(chunk)?;
    if written != want {
      error!("wrote {written}, expected {want} at offset {copied}");
      return Err(fail(copied));
    }

    let prev = copied;
    copied += want as u64;
    if copied / PROGRESS_INTERVAL != prev / PROGRESS_INTERVAL {
      info!(
        "copied {copied}/{remaining} bytes ({:.1}%)",
        100.0 * copied as f64 / remaining as f64
      );
    }
  }

  dst.sync()?;
  Ok(())
}

fn swap<S: Store>(store: &S, data: &DataFile) -> Result<()> {
  let (tmp, dst) = (data.tmp(), data.path());

  if S::ATOMIC_REPLACE {
    if let Err(e) = store.rename(tmp, dst) {
      error!("replace {} failed: {e}", dst.display());
      discard(store, tmp);
      return Err(e.into());
    }
    return Ok(());
  }

  if let Err(e) = store.remove(dst) {
    error!("remove {} failed: {e}", dst.display());
    discard(store, tmp);
    return Err(e.into());
  }
  if let Err(e) = store.rename(tmp, dst) {
    // Original is gone, survivors stay in temp until next open
    // 原文件已删除，存活数据留在临时文件直到下次打开
    error!(
      "rename {} -> {} failed: {e}",
      tmp.display(),
      dst.display()
    );
    return Err(e.into());
  }
  Ok(())
}

fn discard<S: Store>(store: &S, tmp: &Path) {
  if let Err(e) = store.remove(tmp) {
    error!("remove tmp file failed: {}, err={e}", tmp.display());
  }
}

//! Store on a mounted directory
//! 挂载目录上的存储

use std::{
  fs::{self, File, OpenOptions},
  io,
  path::{Path, PathBuf},
};

use fs4::fs_std::FileExt;

use crate::{Info, Store};

/// Files under one root directory (the mount point)
/// 单一根目录（挂载点）下的文件
#[derive(Debug, Clone)]
pub struct DirStore {
  root: PathBuf,
}

impl DirStore {
  /// Open store, create root if absent
  /// 打开存储，根目录不存在则创建
  pub fn open(root: impl Into<PathBuf>) -> io::Result<Self> {
    let root = root.into();
    fs::create_dir_all(&root)?;
    Ok(Self { root })
  }

  #[inline]
  pub fn root(&self) -> &Path {
    &self.root
  }

  #[inline]
  fn path(&self, path: &Path) -> PathBuf {
    self.root.join(path)
  }
}

#[inline]
fn absent<T>(r: io::Result<T>) -> io::Result<Option<T>> {
  match r {
    Ok(v) => Ok(Some(v)),
    Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
    Err(e) => Err(e),
  }
}

impl Store for DirStore {
  type Reader = File;
  type Writer = File;

  const ATOMIC_REPLACE: bool = true;

  fn open_append(&self, path: &Path) -> io::Result<File> {
    OpenOptions::new()
      .append(true)
      .create(true)
      .open(self.path(path))
  }

  fn open_write(&self, path: &Path) -> io::Result<File> {
    let file = File::create(self.path(path))?;
    // Fail fast if another writer holds it
    // 其他写入者持有时快速失败
    file.try_lock_exclusive()?;
    Ok(file)
  }

  fn open_read(&self, path: &Path) -> io::Result<Option<File>> {
    absent(File::open(self.path(path)))
  }

  fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
    fs::rename(self.path(from), self.path(to))
  }

  fn remove(&self, path: &Path) -> io::Result<bool> {
    Ok(absent(fs::remove_file(self.path(path)))?.is_some())
  }

  fn size(&self, path: &Path) -> io::Result<Option<u64>> {
    Ok(absent(fs::metadata(self.path(path)))?.map(|m| m.len()))
  }

  fn truncate(&self, path: &Path, len: u64) -> io::Result<()> {
    let file = OpenOptions::new().write(true).open(self.path(path))?;
    file.set_len(len)?;
    file.sync_all()
  }

  fn info(&self) -> io::Result<Info> {
    let total = fs4::total_space(&self.root)?;
    let free = fs4::free_space(&self.root)?;
    Ok(Info {
      total,
      used: total.saturating_sub(free),
    })
  }
}

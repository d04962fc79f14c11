//! In-memory store with fault injection
//! 带故障注入的内存存储
//!
//! Handles are cheap clones sharing one file map, so a test can keep a copy
//! and inspect files while the log owns another.
//! 句柄克隆共享同一文件表，测试可保留副本检查文件。
//!
//! `rename` is not atomic here, the log takes the remove-then-rename path.
//! 此处 `rename` 非原子，日志走先删后改名路径。

use std::{
  cell::RefCell,
  collections::HashMap,
  io::{self, Cursor, Write},
  path::{Path, PathBuf},
  rc::Rc,
};

use log::debug;

use crate::{Info, Sink, Store};

/// Default capacity reported by `info` (16MB)
/// `info` 报告的默认容量
pub const MEM_CAP: u64 = 16 * 1024 * 1024;

/// One-shot fault, fires on the next matching call
/// 一次性故障，在下一次匹配调用时触发
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
  /// Next write stores at most n bytes
  /// 下一次写入最多写 n 字节
  ShortWrite(usize),
  /// Next opened reader sees file cut at this length
  /// 下一个读句柄看到的文件在此长度截断
  ShortRead(u64),
  Remove,
  Rename,
  Open,
}

#[derive(Debug, Default)]
struct Inner {
  files: HashMap<PathBuf, Vec<u8>>,
  faults: Vec<Fault>,
  cap: u64,
}

impl Inner {
  fn take(&mut self, hit: impl Fn(&Fault) -> bool) -> Option<Fault> {
    let pos = self.faults.iter().position(hit)?;
    let fault = self.faults.remove(pos);
    debug!("mem store fault: {fault:?}");
    Some(fault)
  }

  fn open(&mut self) -> io::Result<()> {
    if self.take(|f| *f == Fault::Open).is_some() {
      return Err(io::Error::other("injected open fault"));
    }
    Ok(())
  }
}

#[derive(Debug, Clone, Default)]
pub struct MemStore(Rc<RefCell<Inner>>);

impl MemStore {
  pub fn new() -> Self {
    Self::with_cap(MEM_CAP)
  }

  /// Store reporting `cap` bytes of capacity
  /// 报告 `cap` 字节容量的存储
  pub fn with_cap(cap: u64) -> Self {
    let store = Self::default();
    store.0.borrow_mut().cap = cap;
    store
  }

  pub fn inject(&self, fault: Fault) {
    self.0.borrow_mut().faults.push(fault);
  }

  /// Faults not fired yet
  /// 尚未触发的故障数
  pub fn pending(&self) -> usize {
    self.0.borrow().faults.len()
  }

  pub fn get(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
    self.0.borrow().files.get(path.as_ref()).cloned()
  }

  pub fn put(&self, path: impl Into<PathBuf>, data: impl Into<Vec<u8>>) {
    self.0.borrow_mut().files.insert(path.into(), data.into());
  }

  pub fn exists(&self, path: impl AsRef<Path>) -> bool {
    self.0.borrow().files.contains_key(path.as_ref())
  }
}

/// Writer appending to one in-memory file
/// 追加写入单个内存文件
#[derive(Debug)]
pub struct MemWriter {
  inner: Rc<RefCell<Inner>>,
  path: PathBuf,
}

impl Write for MemWriter {
  fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
    let mut inner = self.inner.borrow_mut();
    let n = match inner.take(|f| matches!(f, Fault::ShortWrite(_))) {
      Some(Fault::ShortWrite(n)) => n.min(buf.len()),
      _ => buf.len(),
    };
    inner
      .files
      .entry(self.path.clone())
      .or_default()
      .extend_from_slice(&buf[..n]);
    Ok(n)
  }

  #[inline]
  fn flush(&mut self) -> io::Result<()> {
    Ok(())
  }
}

impl Sink for MemWriter {
  #[inline]
  fn sync(&mut self) -> io::Result<()> {
    Ok(())
  }
}

fn not_found(path: &Path) -> io::Error {
  io::Error::new(
    io::ErrorKind::NotFound,
    format!("{} not found", path.display()),
  )
}

impl Store for MemStore {
  type Reader = Cursor<Vec<u8>>;
  type Writer = MemWriter;

  const ATOMIC_REPLACE: bool = false;

  fn open_append(&self, path: &Path) -> io::Result<MemWriter> {
    let mut inner = self.0.borrow_mut();
    inner.open()?;
    inner.files.entry(path.to_path_buf()).or_default();
    Ok(MemWriter {
      inner: self.0.clone(),
      path: path.to_path_buf(),
    })
  }

  fn open_write(&self, path: &Path) -> io::Result<MemWriter> {
    let mut inner = self.0.borrow_mut();
    inner.open()?;
    inner.files.insert(path.to_path_buf(), Vec::new());
    Ok(MemWriter {
      inner: self.0.clone(),
      path: path.to_path_buf(),
    })
  }

  fn open_read(&self, path: &Path) -> io::Result<Option<Self::Reader>> {
    let mut inner = self.0.borrow_mut();
    inner.open()?;
    let Some(mut data) = inner.files.get(path).cloned() else {
      return Ok(None);
    };
    if let Some(Fault::ShortRead(limit)) = inner.take(|f| matches!(f, Fault::ShortRead(_))) {
      data.truncate(limit as usize);
    }
    Ok(Some(Cursor::new(data)))
  }

  fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
    let mut inner = self.0.borrow_mut();
    if inner.take(|f| *f == Fault::Rename).is_some() {
      return Err(io::Error::other("injected rename fault"));
    }
    let data = inner.files.remove(from).ok_or_else(|| not_found(from))?;
    inner.files.insert(to.to_path_buf(), data);
    Ok(())
  }

  fn remove(&self, path: &Path) -> io::Result<bool> {
    let mut inner = self.0.borrow_mut();
    if inner.take(|f| *f == Fault::Remove).is_some() {
      return Err(io::Error::other("injected remove fault"));
    }
    Ok(inner.files.remove(path).is_some())
  }

  fn size(&self, path: &Path) -> io::Result<Option<u64>> {
    Ok(self.0.borrow().files.get(path).map(|d| d.len() as u64))
  }

  fn truncate(&self, path: &Path, len: u64) -> io::Result<()> {
    let mut inner = self.0.borrow_mut();
    let data = inner.files.get_mut(path).ok_or_else(|| not_found(path))?;
    data.truncate(len as usize);
    Ok(())
  }

  fn info(&self) -> io::Result<Info> {
    let inner = self.0.borrow();
    Ok(Info {
      total: inner.cap,
      used: inner.files.values().map(|d| d.len() as u64).sum(),
    })
  }
}

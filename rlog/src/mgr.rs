//! Lifecycle facade over `Log`
//! `Log` 的生命周期外观
//!
//! ```text
//! Uninit --init--> Init --deinit--> Deinit (terminal)
//! ```
//!
//! `init` while `Init` is a no-op success that keeps the open log; the store
//! passed in is dropped. Data operations outside `Init` fail with
//! `NotInitialized`, or `Closed` after `deinit`.
//! `Init` 状态下再次 `init` 直接成功并保留已打开的日志，传入的存储被丢弃。
//! 非 `Init` 状态的数据操作返回 `NotInitialized`，`deinit` 之后返回 `Closed`。

use log::{info, warn};
use rlog_fs::{Info, Store};

use crate::{Conf, Entry, Error, Log, Result, Status};

pub enum State<S: Store> {
  Uninit,
  Init(Log<S>),
  Deinit,
}

pub struct Mgr<S: Store> {
  state: State<S>,
}

impl<S: Store> Default for Mgr<S> {
  fn default() -> Self {
    Self::new()
  }
}

impl<S: Store> Mgr<S> {
  pub fn new() -> Self {
    Self {
      state: State::Uninit,
    }
  }

  #[inline]
  pub fn state(&self) -> &State<S> {
    &self.state
  }

  #[inline]
  pub fn is_init(&self) -> bool {
    matches!(self.state, State::Init(_))
  }

  pub fn init(&mut self, store: S, conf: &[Conf]) -> Result<()> {
    match self.state {
      State::Init(_) => {
        warn!("already initialized");
        Ok(())
      }
      State::Deinit => Err(Error::Closed),
      State::Uninit => {
        self.state = State::Init(Log::open(store, conf)?);
        Ok(())
      }
    }
  }

  /// Persist metadata and enter the terminal state
  /// 持久化元数据并进入终止状态
  pub fn deinit(&mut self) -> Result<()> {
    if !self.is_init() {
      return Ok(());
    }
    if let State::Init(log) = std::mem::replace(&mut self.state, State::Deinit) {
      log.close()?;
    }
    info!("deinitialized");
    Ok(())
  }

  pub fn log(&self) -> Result<&Log<S>> {
    match &self.state {
      State::Init(log) => Ok(log),
      State::Uninit => Err(Error::NotInitialized),
      State::Deinit => Err(Error::Closed),
    }
  }

  pub fn log_mut(&mut self) -> Result<&mut Log<S>> {
    match &mut self.state {
      State::Init(log) => Ok(log),
      State::Uninit => Err(Error::NotInitialized),
      State::Deinit => Err(Error::Closed),
    }
  }

  pub fn append(&mut self, kind: u8, unit: u8, val: i32) -> Result<Entry> {
    self.log_mut()?.append(kind, unit, val)
  }

  pub fn append_at(&mut self, ts: u32, kind: u8, unit: u8, val: i32) -> Result<Entry> {
    self.log_mut()?.append_at(ts, kind, unit, val)
  }

  pub fn read_chunk(&self, max: u32) -> Result<Vec<Entry>> {
    self.log()?.read_chunk(max)
  }

  pub fn read_into(&self, buf: &mut [Entry]) -> Result<usize> {
    self.log()?.read_into(buf)
  }

  pub fn evict(&mut self, count: u32) -> Result<u32> {
    self.log_mut()?.evict(count)
  }

  pub fn cleanup(&mut self, target: u32) -> Result<u32> {
    self.log_mut()?.cleanup(target)
  }

  /// Fails outside `Init` rather than reporting zeroed counters
  /// 非 `Init` 状态返回错误，而非零计数
  pub fn status(&self) -> Result<Status> {
    Ok(self.log()?.status())
  }

  pub fn format(&mut self) -> Result<()> {
    self.log_mut()?.format()
  }

  pub fn fs_info(&self) -> Result<Info> {
    self.log()?.fs_info()
  }
}

//! Error types for rlog
//! rlog 错误类型

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid config: {0}")]
  InvalidConfig(Box<str>),

  #[error("not initialized")]
  NotInitialized,

  #[error("deinitialized")]
  Closed,

  #[error("invalid argument: {0}")]
  InvalidArgument(Box<str>),

  /// `next_id` reached `u32::MAX`, format to start over
  /// `next_id` 已达 `u32::MAX`，需格式化重新开始
  #[error("id space exhausted")]
  IdExhausted,

  #[error("alloc {0} bytes failed")]
  OutOfMemory(usize),

  #[error("io: {0}")]
  Io(#[from] std::io::Error),

  #[error("short write: {written}/{expected}")]
  WriteFailed { written: usize, expected: usize },

  #[error("compaction failed: {copied}/{expected} bytes copied")]
  CompactionFailed { copied: u64, expected: u64 },

  #[error("metadata corrupted: {len} bytes")]
  CorruptMetadata { len: usize },
}

impl Error {
  #[inline]
  pub(crate) fn conf(msg: impl Into<Box<str>>) -> Self {
    Self::InvalidConfig(msg.into())
  }
}

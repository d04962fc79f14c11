#![cfg_attr(docsrs, feature(doc_cfg))]

//! # rlog - Bounded FIFO entry log
//! 有界 FIFO 条目日志
//!
//! Fixed-width entries appended to one data file, counters kept in one
//! metadata record. The oldest entries are evicted by copying the surviving
//! tail through a small transfer buffer, so memory stays bounded however large
//! the log grows.
//! 定长条目追加到单个数据文件，计数保存在单条元数据记录中。通过小传输缓冲区
//! 复制存活尾部来淘汰最旧条目，内存占用与日志大小无关。
//!
//! ## Files / 文件
//!
//! | File           | Content                                   |
//! |----------------|-------------------------------------------|
//! | `data.bin`     | entries, oldest first, 18 bytes each      |
//! | `data.bin.tmp` | compaction target, exists only mid-evict  |
//! | `meta.bin`     | total, active, next_id, deleted, tag      |

mod compact;
pub mod conf;
pub mod consts;
pub mod data;
pub mod entry;
pub mod error;
mod io;
pub mod meta;
pub mod mgr;
mod ring;
pub mod status;

pub use conf::{Cfg, Conf};
pub use consts::ENTRY_SIZE;
pub use data::DataFile;
pub use entry::Entry;
pub use error::{Error, Result};
pub use meta::Meta;
pub use mgr::{Mgr, State};
pub use ring::Log;
pub use status::Status;

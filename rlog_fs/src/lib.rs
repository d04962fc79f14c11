#![cfg_attr(docsrs, feature(doc_cfg))]

//! rlog_fs - Byte store for rlog
//! rlog 字节存储
//!
//! | Store      | Medium            | Atomic rename |
//! |------------|-------------------|---------------|
//! | `DirStore` | mounted directory | yes           |
//! | `MemStore` | memory            | no            |

mod add_ext;
pub mod dir;
pub mod mem;
pub mod store;

pub use add_ext::{TMP, add_ext};
pub use dir::DirStore;
pub use mem::{Fault, MemStore};
pub use store::{Info, Sink, Store};

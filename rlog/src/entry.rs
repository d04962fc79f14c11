//! Entry and its disk layout
//! 条目及其磁盘布局
//!
//! ```text
//! | ts(4) | id(4) | kind(1) | unit(1) | val(4) | reserved(4) |  = 18
//! ```
//! All fields little-endian.
//! 所有字段小端序。

use zerocopy::{
  FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned,
  little_endian::{I32, U32},
};

use crate::consts::ENTRY_SIZE;

/// One logged observation
/// 一条记录的观测值
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Entry {
  /// Seconds / 秒
  pub ts: u32,
  /// Assigned at append, never reused / 追加时分配，永不复用
  pub id: u32,
  pub kind: u8,
  pub unit: u8,
  /// Fixed-point value, caller-chosen scale / 定点值，比例由调用方决定
  pub val: i32,
}

#[derive(FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
#[repr(C)]
pub(crate) struct Disk {
  ts: U32,
  id: U32,
  kind: u8,
  unit: u8,
  val: I32,
  _rsv: [u8; 4],
}

const _: () = assert!(size_of::<Disk>() == ENTRY_SIZE);

impl Entry {
  #[inline]
  pub(crate) fn to_disk(&self) -> Disk {
    Disk {
      ts: U32::new(self.ts),
      id: U32::new(self.id),
      kind: self.kind,
      unit: self.unit,
      val: I32::new(self.val),
      _rsv: [0; 4],
    }
  }

  /// Decode one record, `None` if `buf` is not exactly one record
  /// 解码一条记录，`buf` 长度不符返回 `None`
  #[inline]
  pub fn decode(buf: &[u8]) -> Option<Self> {
    let d = Disk::ref_from_bytes(buf).ok()?;
    Some(Self {
      ts: d.ts.get(),
      id: d.id.get(),
      kind: d.kind,
      unit: d.unit,
      val: d.val.get(),
    })
  }

  #[inline]
  pub fn encode(&self) -> [u8; ENTRY_SIZE] {
    let mut buf = [0; ENTRY_SIZE];
    buf.copy_from_slice(self.to_disk().as_bytes());
    buf
  }
}

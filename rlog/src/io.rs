//! Read/write helpers with explicit short counts
//! 显式处理短读写的辅助函数

use std::io::{self, ErrorKind, Read, Write};

use crate::{Error, Result};

/// Read until `buf` is full or EOF, return bytes read
/// 读取直到 `buf` 填满或 EOF，返回读取字节数
pub(crate) fn fill(r: &mut impl Read, buf: &mut [u8]) -> io::Result<usize> {
  let mut n = 0;
  while n < buf.len() {
    match r.read(&mut buf[n..]) {
      Ok(0) => break,
      Ok(m) => n += m,
      Err(e) if e.kind() == ErrorKind::Interrupted => {}
      Err(e) => return Err(e),
    }
  }
  Ok(n)
}

/// Single write, anything short is `WriteFailed`
/// 单次写入，写不满即 `WriteFailed`
pub(crate) fn write_once(w: &mut impl Write, buf: &[u8]) -> Result<()> {
  let written = w.write(buf)?;
  if written != buf.len() {
    return Err(Error::WriteFailed {
      written,
      expected: buf.len(),
    });
  }
  Ok(())
}

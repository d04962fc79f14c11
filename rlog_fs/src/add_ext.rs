//! Temp file naming
//! 临时文件命名

use std::{
  ffi::{OsStr, OsString},
  path::PathBuf,
};

/// Temp file extension
/// 临时文件扩展名
pub const TMP: &str = "tmp";

/// Sibling name with ".{ext}" appended
/// 追加 ".{ext}" 的同目录文件名
///
/// Names the compaction target and the metadata temp record. The full name is
/// kept, so `data.bin` and `data.log` never share a temp file, as they would
/// with `Path::with_extension`.
/// 用于压缩目标与元数据临时记录。保留完整文件名，`data.bin` 与 `data.log`
/// 不会像 `Path::with_extension` 那样共用一个临时文件。
///
/// ```
/// use std::path::PathBuf;
/// use rlog_fs::add_ext;
///
/// assert_eq!(add_ext("data", "tmp"), PathBuf::from("data.tmp"));
/// assert_eq!(add_ext("data.bin", "tmp"), PathBuf::from("data.bin.tmp"));
/// ```
pub fn add_ext(path: impl Into<PathBuf>, ext: impl AsRef<OsStr>) -> PathBuf {
  let path = path.into();
  let ext = ext.as_ref();
  let mut name = OsString::with_capacity(path.as_os_str().len() + 1 + ext.len());
  name.push(path);
  name.push(".");
  name.push(ext);
  name.into()
}

//! Tests for add_ext
//! add_ext 测试

use std::path::PathBuf;

use rlog_fs::{TMP, add_ext};

#[test]
fn test_add_ext_no_ext() {
  assert_eq!(add_ext("meta", TMP), PathBuf::from("meta.tmp"));
}

#[test]
fn test_add_ext_keeps_ext() {
  assert_eq!(add_ext("data.bin", TMP), PathBuf::from("data.bin.tmp"));
}

#[test]
fn test_add_ext_nested_path() {
  // Only the file name changes
  // 只改变文件名
  let path = PathBuf::from("/mnt/sd/log/data.bin");
  assert_eq!(
    add_ext(&path, TMP),
    PathBuf::from("/mnt/sd/log/data.bin.tmp")
  );
}

#[test]
fn test_add_ext_distinct_per_name() {
  // Same stem, different extensions, different temps
  // 同名不同扩展名，临时文件不同
  assert_ne!(add_ext("data.bin", TMP), add_ext("data.log", TMP));
}

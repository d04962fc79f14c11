//! Property tests for log accounting / 日志计数属性测试
//!
//! Any sequence of operations keeps counters, file size and ids in agreement.
//! 任意操作序列都保持计数、文件大小与 id 一致。

use std::path::Path;

use proptest::prelude::*;
use rlog::{Conf, ENTRY_SIZE, Log};
use rlog_fs::{MemStore, Store};

/// Operations on a log / 日志操作
#[derive(Debug, Clone)]
enum Op {
  Append(i32),
  Evict(u32),
  Cleanup(u32),
  Format,
  Reopen,
}

fn arb_op() -> impl Strategy<Value = Op> {
  prop_oneof![
    8 => any::<i32>().prop_map(Op::Append),
    2 => (0u32..70).prop_map(Op::Evict),
    1 => (0u32..70).prop_map(Op::Cleanup),
    1 => Just(Op::Format),
    1 => Just(Op::Reopen),
  ]
}

const CONF: [Conf; 2] = [Conf::MaxDataSize(1024), Conf::BufSize(1024)];

proptest! {
  #![proptest_config(ProptestConfig::with_cases(64))]

  #[test]
  fn prop_accounting(ops in prop::collection::vec(arb_op(), 1..200)) {
    let store = MemStore::new();
    let mut log = Log::open(store.clone(), &CONF).unwrap();
    // Value by id, reset on format
    // 按 id 索引的值，格式化时重置
    let mut vals: Vec<i32> = Vec::new();

    for op in ops {
      match op {
        Op::Append(val) => {
          let entry = log.append_at(vals.len() as u32, 0, 0, val).unwrap();
          prop_assert_eq!(entry.id as usize, vals.len());
          vals.push(val);
        }
        Op::Evict(n) => {
          let active = log.meta().active;
          prop_assert_eq!(log.evict(n).unwrap(), n.min(active));
        }
        Op::Cleanup(t) => {
          let active = log.meta().active;
          prop_assert_eq!(log.cleanup(t).unwrap(), active.saturating_sub(t));
        }
        Op::Format => {
          log.format().unwrap();
          vals.clear();
        }
        Op::Reopen => {
          let store = log.close().unwrap();
          log = Log::open(store, &CONF).unwrap();
        }
      }

      let meta = *log.meta();
      prop_assert!(meta.is_consistent());
      prop_assert_eq!(meta.next_id as usize, vals.len());
      prop_assert!(meta.active <= log.cfg().max_entries());

      let size = store.size(Path::new("data.bin")).unwrap().unwrap_or(0);
      prop_assert_eq!(size, meta.active as u64 * ENTRY_SIZE as u64);
      prop_assert!(!store.exists("data.bin.tmp"));

      let li = log.read_chunk(meta.active).unwrap();
      prop_assert_eq!(li.len(), meta.active as usize);
      for (n, e) in li.iter().enumerate() {
        prop_assert_eq!(e.id, meta.next_id - meta.active + n as u32);
        prop_assert_eq!(e.val, vals[e.id as usize]);
      }
    }
  }
}

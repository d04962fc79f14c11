//! Open and reconcile
//! 打开与核对

use log::{info, warn};
use rlog_fs::Store;

use super::{Log, wipe};
use crate::{Cfg, Conf, DataFile, Result, consts::ENTRY_SIZE, meta};

impl<S: Store> Log<S> {
  /// Open with default config plus overrides
  /// 使用默认配置加覆盖项打开
  pub fn open(store: S, conf: &[Conf]) -> Result<Self> {
    Self::open_cfg(store, Cfg::new(conf))
  }

  /// Validate config, load metadata, reconcile data file
  /// 校验配置、加载元数据、核对数据文件
  ///
  /// Invalid config fails before touching the store.
  /// 配置无效时在访问存储前失败。
  pub fn open_cfg(store: S, cfg: Cfg) -> Result<Self> {
    cfg.validate()?;
    info!(
      "open: max_data_size={} ({:.1} MB), buf_size={}, auto_cleanup={}",
      cfg.max_data_size,
      cfg.max_data_size as f64 / (1024.0 * 1024.0),
      cfg.buf_size,
      cfg.auto_cleanup
    );

    let data = DataFile::new(&cfg.data_file);
    if cfg.format_on_init {
      warn!("format on init");
      wipe(&store, &data, &cfg)?;
    }

    let meta = meta::load(&store, &cfg.meta_file)?;
    let mut log = Self {
      store,
      cfg,
      data,
      meta,
    };
    if log.cfg.reconcile {
      log.reconcile()?;
    }

    info!(
      "opened: max_entries={}, active={}",
      log.cfg.max_entries(),
      log.meta.active
    );
    Ok(log)
  }

  /// Bring data file and metadata back to agreement
  /// 使数据文件与元数据重新一致
  ///
  /// | Found                         | Action                         |
  /// |-------------------------------|--------------------------------|
  /// | temp only                     | rename temp into place         |
  /// | temp and data                 | remove temp                    |
  /// | fewer whole records than meta | count missing front as evicted |
  /// | extra or partial bytes        | truncate to `active` records   |
  pub(super) fn reconcile(&mut self) -> Result<()> {
    let (store, data) = (&self.store, &self.data);

    if let Some(tmp_len) = store.size(data.tmp())? {
      if store.size(data.path())?.is_none() {
        warn!(
          "data file missing, adopt {} ({tmp_len} bytes)",
          data.tmp().display()
        );
        store.rename(data.tmp(), data.path())?;
      } else {
        warn!("remove stale {}", data.tmp().display());
        store.remove(data.tmp())?;
      }
    }

    let size = data.len(store)?;
    let whole = size / ENTRY_SIZE as u64;
    let mut next = self.meta;

    if whole < next.active as u64 {
      let lost = next.active - whole as u32;
      warn!(
        "data file holds {whole} of {} entries, {lost} counted as evicted",
        next.active
      );
      next = next.evicted(lost);
    }

    let want = next.active as u64 * ENTRY_SIZE as u64;
    if size != want {
      warn!("truncate data file {size} -> {want} bytes");
      store.truncate(data.path(), want)?;
    }

    if next != self.meta {
      meta::persist(store, &self.cfg.meta_file, &next)?;
      self.meta = next;
    }
    Ok(())
  }
}

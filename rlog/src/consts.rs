/// Entry record size on disk
/// 磁盘条目记录大小
pub const ENTRY_SIZE: usize = 18;

/// Metadata record size on disk
/// 磁盘元数据记录大小
pub const META_SIZE: usize = 20;

/// Metadata integrity tag
/// 元数据校验标记
pub const META_TAG: u32 = 0xFEED_C0DE;

pub const MIN_DATA_SIZE: u32 = 1024;
pub const MAX_DATA_SIZE: u32 = 16 * 1024 * 1024;

pub const MIN_BUF_SIZE: usize = 1024;
pub const MAX_BUF_SIZE: usize = 64 * 1024;

/// Log copy progress every 40KB
/// 每复制 40KB 记录一次进度
pub const PROGRESS_INTERVAL: u64 = 10 * 4096;

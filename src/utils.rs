use chrono::{DateTime, Local};

pub fn current_timestamp() -> DateTime<Local> {
    Local::now()
}

/// `list` 使用的时间格式，例如 `Oct 18 09:42`
pub fn format_timestamp(ts: &DateTime<Local>) -> String {
    ts.format("%b %d %H:%M").to_string()
}

/// 存放 `len` 字节需要的块数（向上取整）
pub fn blocks_needed(len: u64, block_size: usize) -> usize {
    len.div_ceil(block_size as u64) as usize
}

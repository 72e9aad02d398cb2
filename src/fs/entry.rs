use chrono::{DateTime, Local};

use crate::fs::block_bitmap::BlockIndex;

/// 一个目录项：文件名、逻辑大小、按顺序排列的块列表和导入时间
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub name: String,
    pub size: u64,
    pub blocks: Vec<BlockIndex>, // 文件内容依次存放在这些块中
    pub created: DateTime<Local>,
}

impl FileEntry {
    pub fn new(name: &str, size: u64, blocks: Vec<BlockIndex>, created: DateTime<Local>) -> Self {
        Self {
            name: name.to_string(),
            size,
            blocks,
            created,
        }
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    // 第 i 块中属于文件内容的字节数，最后一块可能不满
    pub fn bytes_in_block(&self, i: usize, block_size: usize) -> usize {
        let start = (i * block_size) as u64;
        if start >= self.size {
            return 0;
        }
        (self.size - start).min(block_size as u64) as usize
    }
}

/// `list` 输出的一行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntrySummary {
    pub name: String,
    pub size: u64,
    pub created: DateTime<Local>,
}

impl From<&FileEntry> for EntrySummary {
    fn from(entry: &FileEntry) -> Self {
        Self {
            name: entry.name.clone(),
            size: entry.size,
            created: entry.created,
        }
    }
}

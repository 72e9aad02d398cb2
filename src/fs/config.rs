use crate::fs::error::{FsError, Result};

/// 每个块的字节数：4KB
pub const DEFAULT_BLOCK_SIZE: usize = 4096;

/// 块池中的块总数，1250 * 4KB ≈ 5MB
pub const DEFAULT_TOTAL_BLOCKS: usize = 1250;

/// 目录最多容纳的文件数
pub const DEFAULT_MAX_FILES: usize = 128;

// 单个文件最多占用的块数，决定了最大文件大小
pub const DEFAULT_MAX_BLOCKS_PER_FILE: usize = 32;

pub const DEFAULT_MAX_NAME_LEN: usize = 255;

/// 块池与目录的几何参数，启动时确定，运行期间不变
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FsConfig {
    pub block_size: usize,
    pub total_blocks: usize,
    pub max_files: usize,
    pub max_blocks_per_file: usize,
    pub max_name_len: usize,
}

impl Default for FsConfig {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
            total_blocks: DEFAULT_TOTAL_BLOCKS,
            max_files: DEFAULT_MAX_FILES,
            max_blocks_per_file: DEFAULT_MAX_BLOCKS_PER_FILE,
            max_name_len: DEFAULT_MAX_NAME_LEN,
        }
    }
}

impl FsConfig {
    pub fn max_file_size(&self) -> u64 {
        self.max_blocks_per_file as u64 * self.block_size as u64
    }

    pub fn capacity(&self) -> u64 {
        self.total_blocks as u64 * self.block_size as u64
    }

    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("block size", self.block_size),
            ("block count", self.total_blocks),
            ("directory size", self.max_files),
            ("blocks per file", self.max_blocks_per_file),
            ("name length", self.max_name_len),
        ];
        for (what, value) in fields {
            if value == 0 {
                return Err(FsError::InvalidConfig(format!("{} must be non-zero", what)));
            }
        }

        // 数据区是一整块连续内存，字节数必须能放进一个 Vec
        let products = [
            (self.total_blocks, self.block_size),
            (self.max_blocks_per_file, self.block_size),
        ];
        for (count, size) in products {
            match count.checked_mul(size) {
                Some(bytes) if bytes <= isize::MAX as usize => {}
                _ => return Err(FsError::InvalidConfig("geometry overflows".to_string())),
            }
        }
        Ok(())
    }
}

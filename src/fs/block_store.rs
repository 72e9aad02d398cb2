use log::debug;

use crate::fs::{
    block_bitmap::{BlockBitmap, BlockIndex},
    data_area::DataArea,
    error::Result,
};

/// 块池：固定数量、固定大小的数据块 + 与之平行的分配状态表
#[derive(Debug)]
pub struct BlockStore {
    bitmap: BlockBitmap,
    data: DataArea,
    block_size: usize,
}

impl BlockStore {
    pub fn new(total_blocks: usize, block_size: usize) -> Self {
        Self {
            bitmap: BlockBitmap::new(total_blocks),
            data: DataArea::new(total_blocks, block_size),
            block_size,
        }
    }

    /// 分配编号最小的空闲块并标记为已用，没有空闲块时返回 `None`
    pub fn allocate_block(&mut self) -> Option<BlockIndex> {
        let index = self.bitmap.alloc()?;
        debug!("allocated block {}", index);
        Some(index)
    }

    /// 无条件释放，重复释放是空操作
    pub fn release_block(&mut self, index: BlockIndex) {
        self.bitmap.free(index);
        debug!("released block {}", index);
    }

    pub fn free_block_count(&self) -> usize {
        self.bitmap.free_blocks()
    }

    pub fn free_byte_count(&self) -> u64 {
        self.bitmap.free_blocks() as u64 * self.block_size as u64
    }

    pub fn used_byte_count(&self) -> u64 {
        (self.total_blocks() - self.bitmap.free_blocks()) as u64 * self.block_size as u64
    }

    pub fn is_allocated(&self, index: BlockIndex) -> bool {
        self.bitmap.is_used(index)
    }

    pub fn total_blocks(&self) -> usize {
        self.bitmap.total_blocks()
    }

    pub fn write_block(&mut self, index: BlockIndex, bytes: &[u8]) -> Result<()> {
        self.data.write_block(index, bytes)
    }

    /// 整块返回；最后一块超出文件大小的部分没有意义，读取方必须按 size 截断
    pub fn read_block(&self, index: BlockIndex) -> Result<&[u8]> {
        self.data.read_block(index)
    }
}

use crate::fs::{
    block_bitmap::BlockIndex,
    error::{FsError, Result},
};

/// 所有数据块的原始字节，扁平化存储在一块连续内存里
#[derive(Debug)]
pub struct DataArea {
    blocks: Vec<u8>,
    block_size: usize,
    total_blocks: usize,
}

impl DataArea {
    pub fn new(total_blocks: usize, block_size: usize) -> Self {
        Self {
            blocks: vec![0u8; total_blocks * block_size],
            block_size,
            total_blocks,
        }
    }

    pub fn write_block(&mut self, index: BlockIndex, buf: &[u8]) -> Result<()> {
        if index >= self.total_blocks {
            return Err(FsError::BlockOutOfRange(index));
        }
        if buf.len() > self.block_size {
            return Err(FsError::BlockOverflow {
                len: buf.len(),
                block_size: self.block_size,
            });
        }
        let start = index * self.block_size;
        self.blocks[start..start + buf.len()].copy_from_slice(buf);
        // 尾部清零，避免残留上一个文件的内容
        if buf.len() < self.block_size {
            self.blocks[start + buf.len()..start + self.block_size].fill(0);
        }
        Ok(())
    }

    // 返回整块内容，调用方需按文件大小截断
    pub fn read_block(&self, index: BlockIndex) -> Result<&[u8]> {
        if index >= self.total_blocks {
            return Err(FsError::BlockOutOfRange(index));
        }
        let start = index * self.block_size;
        Ok(&self.blocks[start..start + self.block_size])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_write_zero_fills_the_tail() {
        let mut area = DataArea::new(4, 8);
        area.write_block(2, &[0xAA; 8]).unwrap();
        area.write_block(2, b"abc").unwrap();
        assert_eq!(area.read_block(2).unwrap(), b"abc\0\0\0\0\0");
        assert_eq!(area.read_block(1).unwrap(), &[0u8; 8]);
    }

    #[test]
    fn out_of_range_access_is_an_error() {
        let mut area = DataArea::new(4, 8);
        assert!(matches!(
            area.write_block(4, b"x"),
            Err(FsError::BlockOutOfRange(4))
        ));
        assert!(matches!(area.read_block(9), Err(FsError::BlockOutOfRange(9))));
    }

    #[test]
    fn oversized_buffer_is_rejected() {
        let mut area = DataArea::new(2, 4);
        assert!(matches!(
            area.write_block(0, b"too long"),
            Err(FsError::BlockOverflow { len: 8, block_size: 4 })
        ));
    }
}

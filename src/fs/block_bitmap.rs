/// 块编号，从 0 开始
pub type BlockIndex = usize;

/// 块分配状态表，每个 bit 表示一个块：1 = 已分配，0 = 空闲
///
/// 这是分配状态的唯一真相来源，目录中的块列表只能引用已分配的块。
#[derive(Debug)]
pub struct BlockBitmap {
    bits: Vec<u8>,
    total_blocks: usize,
    free_blocks: usize,
}

impl BlockBitmap {
    pub fn new(total_blocks: usize) -> Self {
        let byte_len = total_blocks.div_ceil(8);

        Self {
            bits: vec![0; byte_len],
            total_blocks,
            free_blocks: total_blocks,
        }
    }

    // 分配编号最小的空闲块
    pub fn alloc(&mut self) -> Option<BlockIndex> {
        for (byte_index, byte) in self.bits.iter_mut().enumerate() {
            if *byte == 0xFF {
                continue;
            }
            for bit in 0..8 {
                let index = byte_index * 8 + bit;
                // 最后一个字节可能有多余的填充位
                if index >= self.total_blocks {
                    return None;
                }
                if *byte & (1 << bit) == 0 {
                    *byte |= 1 << bit;
                    self.free_blocks -= 1;
                    return Some(index);
                }
            }
        }
        None
    }

    // 释放一个块，重复释放无副作用
    pub fn free(&mut self, index: BlockIndex) {
        if index >= self.total_blocks {
            return;
        }

        let (byte_index, bit) = Self::locate(index);
        if self.bits[byte_index] & (1 << bit) != 0 {
            self.bits[byte_index] &= !(1 << bit);
            self.free_blocks += 1;
        }
    }

    pub fn is_used(&self, index: BlockIndex) -> bool {
        if index >= self.total_blocks {
            return false;
        }
        let (byte_index, bit) = Self::locate(index);
        self.bits[byte_index] & (1 << bit) != 0
    }

    pub fn free_blocks(&self) -> usize {
        self.free_blocks
    }

    pub fn total_blocks(&self) -> usize {
        self.total_blocks
    }

    fn locate(index: BlockIndex) -> (usize, u8) {
        (index / 8, (index % 8) as u8)
    }
}

use log::{info, warn};
use std::io::{Read, Write};

use crate::{
    fs::{
        block_bitmap::BlockIndex,
        block_store::BlockStore,
        config::FsConfig,
        directory::{Directory, EntryHandle},
        entry::{EntrySummary, FileEntry},
        error::{FsError, Result},
        host::{HostSink, HostSource},
    },
    utils::{blocks_needed, current_timestamp},
};

pub mod block_bitmap;
pub mod block_store;
pub mod config;
pub mod data_area;
pub mod directory;
pub mod entry;
pub mod error;
pub mod host;

/// 内存中的块文件系统：块池 + 目录，进程启动时创建，退出时随之销毁
#[derive(Debug)]
pub struct FileSystem {
    config: FsConfig,
    block_store: BlockStore, // 数据块与分配状态
    directory: Directory,    // 文件名 -> 块列表
}

impl FileSystem {
    pub fn new(config: FsConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            block_store: BlockStore::new(config.total_blocks, config.block_size),
            directory: Directory::new(config.max_files),
        })
    }

    pub fn config(&self) -> &FsConfig {
        &self.config
    }

    /// 从字节流导入一个文件，`len` 为来源声明的长度
    ///
    /// 检查顺序：文件名 → 重名 → 单文件上限 → 剩余空间 → 目录槽位。
    /// 所有检查都在分配任何块之前完成；拷贝过程中出错会释放已分配的块，
    /// 目录保持不变。
    pub fn put<R: Read>(&mut self, name: &str, mut source: R, len: u64) -> Result<EntryHandle> {
        self.check_name(name)?;

        if self.directory.find_by_name(name).is_some() {
            return Err(FsError::FileAlreadyExists(name.to_string()));
        }

        let block_size = self.config.block_size;
        let required_blocks = blocks_needed(len, block_size);
        if required_blocks > self.config.max_blocks_per_file {
            return Err(FsError::FileTooLarge {
                size: len,
                max: self.config.max_file_size(),
            });
        }

        let required = required_blocks as u64 * block_size as u64;
        let free = self.block_store.free_byte_count();
        if required > free {
            return Err(FsError::InsufficientSpace { required, free });
        }

        if !self.directory.has_free_slot() {
            return Err(FsError::DirectoryFull);
        }

        let mut blocks = Vec::with_capacity(required_blocks);
        if let Err(e) = self.copy_into_blocks(&mut source, len, &mut blocks) {
            warn!("put '{}' failed after {} blocks, rolling back", name, blocks.len());
            self.rollback(&blocks);
            return Err(e);
        }

        match self
            .directory
            .create_entry(name, len, blocks.clone(), current_timestamp())
        {
            Ok(handle) => {
                info!("stored '{}' ({} bytes, blocks {:?})", name, len, blocks);
                Ok(handle)
            }
            Err(e) => {
                self.rollback(&blocks);
                Err(e)
            }
        }
    }

    /// 从主机文件导入，文件名即参数本身
    pub fn put_file(&mut self, path: &str) -> Result<EntryHandle> {
        let source = HostSource::open(path)?;
        let len = source.len();
        self.put(path, source, len)
    }

    /// 把文件内容按块顺序写入 `sink`，恰好写出 `size` 字节
    pub fn get<W: Write>(&self, name: &str, mut sink: W) -> Result<u64> {
        let (_, entry) = self
            .directory
            .find_by_name(name)
            .ok_or_else(|| FsError::FileNotFound(name.to_string()))?;

        let block_size = self.config.block_size;
        for (i, &index) in entry.blocks.iter().enumerate() {
            let n = entry.bytes_in_block(i, block_size);
            let data = self.block_store.read_block(index)?;
            sink.write_all(&data[..n])?;
        }
        sink.flush()?;

        Ok(entry.size)
    }

    /// 导出到主机文件，`dest` 缺省时使用原文件名
    pub fn get_file(&self, name: &str, dest: Option<&str>) -> Result<(u64, String)> {
        if self.directory.find_by_name(name).is_none() {
            return Err(FsError::FileNotFound(name.to_string()));
        }
        let dest = dest.unwrap_or(name);
        let sink = HostSink::create(dest)?;
        let written = self.get(name, sink)?;
        info!("exported '{}' to {} ({} bytes)", name, dest, written);
        Ok((written, dest.to_string()))
    }

    pub fn del(&mut self, name: &str) -> Result<FileEntry> {
        let (handle, _) = self
            .directory
            .find_by_name(name)
            .ok_or_else(|| FsError::FileNotFound(name.to_string()))?;

        let entry = self
            .directory
            .delete_entry(handle, &mut self.block_store)
            .ok_or_else(|| FsError::FileNotFound(name.to_string()))?;
        info!("deleted '{}', {} blocks reclaimed", name, entry.block_count());
        Ok(entry)
    }

    pub fn list(&self) -> Vec<EntrySummary> {
        self.directory.list_entries()
    }

    /// 剩余字节数 = 空闲块数 × 块大小
    pub fn df(&self) -> u64 {
        self.block_store.free_byte_count()
    }

    pub fn free_block_count(&self) -> usize {
        self.block_store.free_block_count()
    }

    pub fn used_byte_count(&self) -> u64 {
        self.block_store.used_byte_count()
    }

    pub fn file_count(&self) -> usize {
        self.directory.len()
    }

    pub fn stat(&self, name: &str) -> Result<&FileEntry> {
        self.directory
            .find_by_name(name)
            .map(|(_, entry)| entry)
            .ok_or_else(|| FsError::FileNotFound(name.to_string()))
    }

    fn check_name(&self, name: &str) -> Result<()> {
        if name.is_empty() || name.len() > self.config.max_name_len {
            return Err(FsError::InvalidName(name.to_string()));
        }
        Ok(())
    }

    // 每分配一个块就立刻记入 blocks，出错时调用方据此回滚
    fn copy_into_blocks<R: Read>(
        &mut self,
        source: &mut R,
        len: u64,
        blocks: &mut Vec<BlockIndex>,
    ) -> Result<()> {
        let block_size = self.config.block_size;
        let mut buf = vec![0u8; block_size];
        let mut remaining = len;

        while remaining > 0 {
            let chunk = remaining.min(block_size as u64) as usize;
            let index = self
                .block_store
                .allocate_block()
                .ok_or(FsError::InsufficientSpace {
                    required: remaining,
                    free: 0,
                })?;
            blocks.push(index);

            source.read_exact(&mut buf[..chunk])?;
            self.block_store.write_block(index, &buf[..chunk])?;
            remaining -= chunk as u64;
        }
        Ok(())
    }

    fn rollback(&mut self, blocks: &[BlockIndex]) {
        for &index in blocks {
            self.block_store.release_block(index);
        }
    }
}

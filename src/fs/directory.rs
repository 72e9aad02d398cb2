use chrono::{DateTime, Local};
use log::debug;
use std::collections::HashMap;

use crate::fs::{
    block_bitmap::BlockIndex,
    block_store::BlockStore,
    entry::{EntrySummary, FileEntry},
    error::{FsError, Result},
};

/// 目录槽位编号，`create_entry` 返回，`delete_entry` 使用
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryHandle(pub usize);

/// 固定容量的扁平目录，没有子目录
#[derive(Debug)]
pub struct Directory {
    slots: Vec<Option<FileEntry>>,
    index_map: HashMap<String, usize>, // name -> 槽位
}

impl Directory {
    pub fn new(max_files: usize) -> Self {
        Self {
            slots: vec![None; max_files],
            index_map: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.index_map.len()
    }

    pub fn has_free_slot(&self) -> bool {
        self.slots.iter().any(Option::is_none)
    }

    pub fn find_by_name(&self, name: &str) -> Option<(EntryHandle, &FileEntry)> {
        let &slot = self.index_map.get(name)?;
        self.slots[slot]
            .as_ref()
            .map(|entry| (EntryHandle(slot), entry))
    }

    // 占用第一个空槽位；目录已满时不做任何修改
    pub fn create_entry(
        &mut self,
        name: &str,
        size: u64,
        blocks: Vec<BlockIndex>,
        created: DateTime<Local>,
    ) -> Result<EntryHandle> {
        if self.index_map.contains_key(name) {
            return Err(FsError::FileAlreadyExists(name.to_string()));
        }
        let slot = self
            .slots
            .iter()
            .position(Option::is_none)
            .ok_or(FsError::DirectoryFull)?;

        self.slots[slot] = Some(FileEntry::new(name, size, blocks, created));
        self.index_map.insert(name.to_string(), slot);
        debug!("directory slot {} <- '{}'", slot, name);
        Ok(EntryHandle(slot))
    }

    // 释放该目录项拥有的所有块，然后清空槽位
    pub fn delete_entry(&mut self, handle: EntryHandle, store: &mut BlockStore) -> Option<FileEntry> {
        let entry = self.slots.get_mut(handle.0)?.take()?;
        for &index in &entry.blocks {
            store.release_block(index);
        }
        self.index_map.remove(&entry.name);
        debug!("directory slot {} cleared", handle.0);
        Some(entry)
    }

    /// 按槽位顺序列出已占用的目录项（不是插入顺序，也不是字母顺序）
    pub fn list_entries(&self) -> Vec<EntrySummary> {
        self.entries().map(EntrySummary::from).collect()
    }

    pub fn entries(&self) -> impl Iterator<Item = &FileEntry> {
        self.slots.iter().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(dir: &Directory) -> Vec<String> {
        dir.list_entries().into_iter().map(|e| e.name).collect()
    }

    #[test]
    fn create_and_find() {
        let mut dir = Directory::new(4);
        let handle = dir.create_entry("a.txt", 3, vec![0], Local::now()).unwrap();
        assert_eq!(handle, EntryHandle(0));

        let (found, entry) = dir.find_by_name("a.txt").unwrap();
        assert_eq!(found, handle);
        assert_eq!(entry.size, 3);
        assert!(dir.find_by_name("b.txt").is_none());
    }

    #[test]
    fn full_directory_is_rejected() {
        let mut dir = Directory::new(2);
        dir.create_entry("a", 0, vec![], Local::now()).unwrap();
        dir.create_entry("b", 0, vec![], Local::now()).unwrap();
        assert!(!dir.has_free_slot());
        assert!(matches!(
            dir.create_entry("c", 0, vec![], Local::now()),
            Err(FsError::DirectoryFull)
        ));
        assert_eq!(dir.len(), 2);
    }

    #[test]
    fn listing_follows_slot_order() {
        let mut dir = Directory::new(3);
        let mut store = BlockStore::new(4, 8);
        dir.create_entry("first", 0, vec![], Local::now()).unwrap();
        let second = dir.create_entry("second", 0, vec![], Local::now()).unwrap();
        dir.create_entry("third", 0, vec![], Local::now()).unwrap();

        dir.delete_entry(second, &mut store).unwrap();
        dir.create_entry("fourth", 0, vec![], Local::now()).unwrap();

        // 新文件复用了中间的空槽位
        assert_eq!(names(&dir), vec!["first", "fourth", "third"]);
    }

    #[test]
    fn delete_releases_blocks() {
        let mut dir = Directory::new(2);
        let mut store = BlockStore::new(4, 8);
        let blocks: Vec<_> = (0..3).filter_map(|_| store.allocate_block()).collect();
        let handle = dir
            .create_entry("data", 20, blocks.clone(), Local::now())
            .unwrap();

        let removed = dir.delete_entry(handle, &mut store).unwrap();
        assert_eq!(removed.blocks, blocks);
        assert_eq!(store.free_block_count(), 4);
        assert!(dir.find_by_name("data").is_none());
        assert!(dir.delete_entry(handle, &mut store).is_none());
    }
}

use std::io;
use thiserror::Error;

use crate::fs::block_bitmap::BlockIndex;

/// 文件系统错误类型
///
/// 所有错误都在命令级别可恢复：shell 打印一次后继续读下一条命令。
#[derive(Debug, Error)]
pub enum FsError {
    #[error("file already exists: {0}")]
    FileAlreadyExists(String),

    #[error("insufficient free space: {required} bytes required, {free} bytes free")]
    InsufficientSpace { required: u64, free: u64 },

    #[error("insufficient file directory space")]
    DirectoryFull,

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("file too large: {size} bytes, at most {max} bytes per file")]
    FileTooLarge { size: u64, max: u64 },

    #[error("invalid file name: '{0}'")]
    InvalidName(String),

    // 主机文件打不开（put 的来源）
    #[error("unable to open file {path}: {source}")]
    SourceUnavailable {
        path: String,
        #[source]
        source: io::Error,
    },

    // 主机文件无法写入（get 的目标）
    #[error("could not open output file {path}: {source}")]
    SinkUnavailable {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("host I/O error: {0}")]
    HostIo(#[from] io::Error),

    #[error("block index out of range: {0}")]
    BlockOutOfRange(BlockIndex),

    #[error("{len} bytes do not fit in a {block_size} byte block")]
    BlockOverflow { len: usize, block_size: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// 文件系统统一结果类型
pub type Result<T> = std::result::Result<T, FsError>;

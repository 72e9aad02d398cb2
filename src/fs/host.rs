use std::{
    fs::{File, OpenOptions},
    io::{BufReader, BufWriter, Read, Write},
    path::Path,
};

use crate::fs::error::{FsError, Result};

/// 主机上的输入文件，只在一次 put 期间持有
pub struct HostSource {
    reader: BufReader<File>,
    len: u64,
}

impl HostSource {
    pub fn open(path: &str) -> Result<Self> {
        let unavailable = |source| FsError::SourceUnavailable {
            path: path.to_string(),
            source,
        };
        let file = File::open(Path::new(path)).map_err(unavailable)?;
        let metadata = file.metadata().map_err(unavailable)?;
        if metadata.is_dir() {
            return Err(unavailable(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "is a directory",
            )));
        }

        Ok(Self {
            reader: BufReader::new(file),
            len: metadata.len(),
        })
    }

    pub fn len(&self) -> u64 {
        self.len
    }
}

impl Read for HostSource {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.reader.read(buf)
    }
}

/// 主机上的输出文件，创建或截断
pub struct HostSink {
    writer: BufWriter<File>,
}

impl HostSink {
    pub fn create(path: &str) -> Result<Self> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .map_err(|source| FsError::SinkUnavailable {
                path: path.to_string(),
                source,
            })?;

        Ok(Self {
            writer: BufWriter::new(file),
        })
    }
}

impl Write for HostSink {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.writer.flush()
    }
}

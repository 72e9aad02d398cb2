use clap::Parser;
use colored::*;
use log::LevelFilter;

use crate::{
    fs::{
        config::{
            FsConfig, DEFAULT_BLOCK_SIZE, DEFAULT_MAX_BLOCKS_PER_FILE, DEFAULT_MAX_FILES,
            DEFAULT_MAX_NAME_LEN, DEFAULT_TOTAL_BLOCKS,
        },
        FileSystem,
    },
    logger::init_logger,
    shell::start_shell,
};

mod fs;
mod logger;
mod shell;
mod utils;

/// In-memory block file system simulator
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Number of blocks in the storage pool
    #[arg(long, default_value_t = DEFAULT_TOTAL_BLOCKS)]
    blocks: usize,

    /// Size of one block in bytes
    #[arg(long, default_value_t = DEFAULT_BLOCK_SIZE)]
    block_size: usize,

    /// Maximum number of files in the directory
    #[arg(long, default_value_t = DEFAULT_MAX_FILES)]
    files: usize,

    /// Maximum number of blocks a single file may occupy
    #[arg(long, default_value_t = DEFAULT_MAX_BLOCKS_PER_FILE)]
    blocks_per_file: usize,

    /// Log level written to stderr (off, error, warn, info, debug, trace)
    #[arg(long, default_value_t = LevelFilter::Warn)]
    log_level: LevelFilter,

    /// Skip the startup banner
    #[arg(long)]
    no_banner: bool,
}

impl Args {
    fn fs_config(&self) -> FsConfig {
        FsConfig {
            block_size: self.block_size,
            total_blocks: self.blocks,
            max_files: self.files,
            max_blocks_per_file: self.blocks_per_file,
            max_name_len: DEFAULT_MAX_NAME_LEN,
        }
    }
}

fn main() {
    let args = Args::parse();
    init_logger(args.log_level);

    let fs = match FileSystem::new(args.fs_config()) {
        Ok(fs) => fs,
        Err(e) => {
            eprintln!("{} {}", "❌ Error:".red().bold(), e);
            std::process::exit(2);
        }
    };

    start_shell(fs, !args.no_banner);
}

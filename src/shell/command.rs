use colored::*;
use dialoguer::Confirm;
use indicatif::{ProgressBar, ProgressStyle};
use std::error::Error;

use crate::{
    fs::{
        entry::{EntrySummary, FileEntry},
        FileSystem,
    },
    utils::format_timestamp,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Put(String),
    Get { name: String, dest: Option<String> },
    Del(String),
    List,
    Df,
    Stat(String),
    Format,
    Quit,
}

impl Command {
    pub fn verb(&self) -> &'static str {
        match self {
            Command::Help => "help",
            Command::Put(_) => "put",
            Command::Get { .. } => "get",
            Command::Del(_) => "del",
            Command::List => "list",
            Command::Df => "df",
            Command::Stat(_) => "stat",
            Command::Format => "format",
            Command::Quit => "quit",
        }
    }
}

pub fn execute_command(cmd: &Command, fs: &mut FileSystem) -> Result<(), Box<dyn Error>> {
    match cmd {
        Command::Help => print_help(),
        Command::Put(path) => {
            fs.put_file(path)?;
            let size = fs.stat(path)?.size;
            println!("📥 Stored {} ({} bytes)", path.green(), size);
        }
        Command::Get { name, dest } => {
            let (written, dest) = fs.get_file(name, dest.as_deref())?;
            println!("Writing {} bytes to {}", written, dest.cyan());
        }
        Command::Del(name) => {
            fs.del(name)?;
            println!("❌ Deleted {}", name.red());
        }
        Command::List => {
            for line in render_listing(&fs.list()) {
                println!("{}", line);
            }
        }
        Command::Df => {
            println!("{}", render_df(fs.df()));
            println!(
                "{}",
                format!(
                    "{} of {} blocks free, {} files",
                    fs.free_block_count(),
                    fs.config().total_blocks,
                    fs.file_count()
                )
                .bright_black()
            );
        }
        Command::Stat(name) => {
            let entry = fs.stat(name)?;
            println!("{}", render_stat(entry, fs.config().block_size));
        }
        Command::Format => format_all(fs)?,
        Command::Quit => println!("{}", "👋 Exiting block-fs shell...".yellow().bold()),
    }

    Ok(())
}

/// 每行：大小、时间、文件名，按目录槽位顺序
pub fn render_listing(entries: &[EntrySummary]) -> Vec<String> {
    entries
        .iter()
        .map(|e| format!("{}\t{} {}", e.size, format_timestamp(&e.created), e.name))
        .collect()
}

pub fn render_df(free: u64) -> String {
    format!("{} bytes free.", free)
}

pub fn render_stat(entry: &FileEntry, block_size: usize) -> String {
    let last = entry
        .blocks
        .len()
        .checked_sub(1)
        .map(|i| entry.bytes_in_block(i, block_size))
        .unwrap_or(0);
    format!(
        "{}\n{}: {}\n{}: {} bytes\n{}: {}\n{}: {:?} (last block holds {} bytes)",
        "📊 File Info".bright_yellow().bold(),
        "Name".blue(),
        entry.name,
        "Size".blue(),
        entry.size,
        "Stored".blue(),
        format_timestamp(&entry.created),
        "Blocks".blue(),
        entry.blocks,
        last
    )
}

// 逐个删除所有文件，而不是直接清空状态表
fn format_all(fs: &mut FileSystem) -> Result<(), Box<dyn Error>> {
    let names: Vec<String> = fs.list().into_iter().map(|e| e.name).collect();
    if names.is_empty() {
        println!("{}", "Nothing to format, the directory is empty.".bright_black());
        return Ok(());
    }

    let confirmed = Confirm::new()
        .with_prompt(format!("Erase all {} stored files?", names.len()))
        .default(false)
        .interact()?;
    if !confirmed {
        println!("{}", "Format cancelled.".yellow());
        return Ok(());
    }

    let pb = ProgressBar::new(names.len() as u64);
    pb.set_style(
        ProgressStyle::with_template("[{bar:40.green/black}] {pos:>3}/{len} {msg}")?
            .progress_chars("#>-"),
    );
    for name in &names {
        pb.set_message(name.clone());
        fs.del(name)?;
        pb.inc(1);
    }
    pb.finish_with_message("✅ All files erased");
    Ok(())
}

fn print_help() {
    println!("{}", "📘 block-fs Commands".bright_cyan().bold());
    println!(
        "{}",
        "
  put <file>           Copy a host file into the file system
  get <file> [newname] Copy a file back to the host
  del <file>           Delete a file and reclaim its blocks
  list                 List stored files
  df                   Show free space
  stat <file>          Show size, time and blocks of a file
  format               Delete every stored file
  help                 Show this help message
  quit                 Quit the shell
"
        .bright_black()
    );
}

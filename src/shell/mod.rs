pub mod command;
pub mod parse;

use crate::{
    fs::FileSystem,
    shell::{
        command::{execute_command, Command},
        parse::parse_command,
    },
};
use colored::*;
use crossterm::{
    cursor, execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use log::warn;
use reedline::{
    DefaultCompleter, DefaultPrompt, DefaultPromptSegment, FileBackedHistory, Reedline, Signal,
};
use std::{io::stdout, path::PathBuf};

const COMMANDS: [&str; 10] = [
    "help", "put", "get", "del", "list", "df", "stat", "format", "quit", "exit",
];

/// 读取一行 → 解析 → 执行，一条命令完全执行完才读取下一条
pub fn start_shell(mut fs: FileSystem, banner: bool) {
    if banner {
        print_banner(&fs);
    }

    let username = whoami::username();
    let hostname = whoami::fallible::hostname().unwrap_or_else(|_| "localhost".to_string());

    println!(
        "{}",
        "Type 'help' for available commands. Use ↑↓ for history, Tab for auto-completion.\n"
            .bright_black()
    );

    // 初始化 reedline
    let history_path = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".blockfs_history");

    let mut line_editor = Reedline::create();
    match FileBackedHistory::with_file(100, history_path) {
        Ok(history) => line_editor = line_editor.with_history(Box::new(history)),
        Err(e) => warn!("command history disabled: {}", e),
    }

    // 命令补全
    let completer = DefaultCompleter::new_with_wordlen(
        COMMANDS.iter().map(|c| c.to_string()).collect(),
        2,
    );
    line_editor = line_editor.with_completer(Box::new(completer));

    let prompt = DefaultPrompt::new(
        DefaultPromptSegment::Basic(format!(
            "{}@{}",
            username.green().bold(),
            hostname.cyan().bold()
        )),
        DefaultPromptSegment::Basic("block-fs".bright_blue().bold().to_string()),
    );

    loop {
        match line_editor.read_line(&prompt) {
            Ok(Signal::Success(buffer)) => {
                let trimmed = buffer.trim();
                if trimmed.is_empty() {
                    continue;
                }

                match parse_command(trimmed) {
                    Some(cmd) => {
                        if let Err(e) = execute_command(&cmd, &mut fs) {
                            warn!("{} failed: {}", cmd.verb(), e);
                            println!("{} {}", format!("{} error:", cmd.verb()).red().bold(), e);
                        }
                        if cmd == Command::Quit {
                            break;
                        }
                    }
                    None => println!(
                        "{}",
                        "⚠️  Unrecognized input or missing argument. Type 'help' for command list."
                            .yellow()
                    ),
                }
            }
            Ok(Signal::CtrlC) => {
                println!();
                continue;
            }
            Ok(Signal::CtrlD) => {
                println!("{}", "Exiting block-fs...".yellow());
                break;
            }
            Err(e) => {
                println!("Error reading line: {}", e);
                break;
            }
        }
    }

    println!("{}", "GoodBye!".bright_yellow());
}

fn print_banner(fs: &FileSystem) {
    let config = fs.config();
    let mut stdout = stdout();

    let _ = execute!(
        stdout,
        Clear(ClearType::All),
        cursor::MoveTo(0, 0),
        SetForegroundColor(Color::Cyan),
        Print(format!("Welcome to block-fs v{}\n", env!("CARGO_PKG_VERSION"))),
        ResetColor
    );
    println!(
        "{}",
        format!(
            "{} blocks × {} bytes ({} bytes), {} file slots, at most {} bytes per file",
            config.total_blocks,
            config.block_size,
            config.capacity(),
            config.max_files,
            config.max_file_size()
        )
        .bright_black()
    );
}

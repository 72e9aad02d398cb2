use colored::*;
use log::{Level, LevelFilter, Log, Metadata, Record};

static LOGGER: ShellLogger = ShellLogger;

/// 把日志写到 stderr，避免和命令输出混在一起
struct ShellLogger;

impl Log for ShellLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level() && metadata.target().starts_with("block_fs")
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let level = match record.level() {
            Level::Error => "ERROR".red().bold(),
            Level::Warn => "WARN ".yellow().bold(),
            Level::Info => "INFO ".green(),
            Level::Debug => "DEBUG".blue(),
            Level::Trace => "TRACE".bright_black(),
        };
        eprintln!("{} {}", level, record.args());
    }

    fn flush(&self) {}
}

/// 安装全局 logger（启动时调用一次）
pub fn init_logger(level: LevelFilter) {
    if let Err(e) = log::set_logger(&LOGGER) {
        eprintln!("logger already installed: {}", e);
    }
    log::set_max_level(level);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_install_keeps_running() {
        init_logger(LevelFilter::Info);
        init_logger(LevelFilter::Debug);
        assert_eq!(log::max_level(), LevelFilter::Debug);
        log::debug!("still logging after a repeated install");
    }
}

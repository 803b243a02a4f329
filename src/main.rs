//! # gitchunk - 分块添加文件到 git
//!
//! 递归遍历目录树，按大小和文件数把文件分块，
//! 每个分块再按命令行长度拆分为若干 `git add -f` 调用，最后提交一次。
//!
//! ## 子命令
//! - `add`  - 分块暂存并提交
//! - `plan` - 仅规划分块，输出表格 / CSV 清单
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     └── batch/     (分块累加、遍历调度、子批次执行)
//!   ├── utils/      (输出、进度条、git 命令、大小换算)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        let mut message = format!("{}", e);
        let mut source = std::error::Error::source(&e);
        while let Some(cause) = source {
            message.push_str(&format!("\n  caused by: {}", cause));
            source = std::error::Error::source(cause);
        }
        utils::output::print_error(&message);
        std::process::exit(1);
    }
}

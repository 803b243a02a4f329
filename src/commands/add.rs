//! # add 命令实现
//!
//! 遍历目录树，分块执行 `git add -f` 并提交。
//!
//! ## 功能
//! - 按大小/数量分块
//! - 按命令行长度拆分子批次
//! - dry-run 仅打印命令
//! - 失败的批次只报告，不中断运行，退出码仍为 0
//! - 默认静默；`--verbose` / `--progress` 时输出标题、参数与统计
//!
//! ## 依赖关系
//! - 使用 `cli/add.rs` 定义的参数
//! - 使用 `batch/`, `utils/git.rs`, `utils/output.rs`

use crate::batch::{Dispatcher, GitHandler, GitOptions};
use crate::cli::add::AddArgs;
use crate::error::Result;
use crate::utils::git::{ProcessRunner, MAX_COMMAND_LEN};
use crate::utils::output;

/// 执行 add 命令
pub fn execute(args: AddArgs) -> Result<()> {
    let chatty = args.verbose || args.progress;

    if chatty {
        output::print_header(if args.dry_run {
            "Chunked Git Add (dry run)"
        } else {
            "Chunked Git Add"
        });
    }

    let mut config = super::dispatch_config(&args.chunk)?;
    config.verbose = args.verbose;
    config.progress = args.progress;

    if chatty {
        super::print_settings(&args.chunk);
    }

    let options = GitOptions {
        message: args.message,
        dry_run: args.dry_run,
        progress: args.progress,
        max_command_len: MAX_COMMAND_LEN,
    };

    let mut dispatcher = Dispatcher::new(config, GitHandler::new(ProcessRunner, options));
    let stats = dispatcher.traverse(&args.chunk.root)?;

    if chatty {
        super::print_stats(&stats);
    }

    if stats.failed_commands() > 0 {
        output::print_warning(&format!(
            "{} git commands failed; the run continued past them",
            stats.failed_commands()
        ));
        for (index, stderr) in &stats.failures {
            let first_line = stderr.lines().next().unwrap_or("(no output)");
            output::print_warning(&format!("  chunk {}: {}", index, first_line));
        }
    } else if chatty && !args.dry_run && stats.chunks > 0 {
        output::print_success("All chunks committed");
    }

    Ok(())
}

//! # add 子命令 CLI 定义
//!
//! 分块执行 `git add -f` 和 `git commit`
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/add.rs`

use super::ChunkArgs;
use crate::batch::runner::DEFAULT_MESSAGE;
use clap::Args;

/// add 子命令参数
#[derive(Args, Debug)]
pub struct AddArgs {
    #[command(flatten)]
    pub chunk: ChunkArgs,

    /// Commit message template ('{n}' = chunk number, '{files}' = file count)
    #[arg(short, long, default_value = DEFAULT_MESSAGE)]
    pub message: String,

    // ─────────────────────────────────────────────────────────────
    // Execution control
    // ─────────────────────────────────────────────────────────────
    /// Only print the git commands, do not run them
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,

    /// Print a summary line for each chunk
    #[arg(long, default_value_t = false)]
    pub progress: bool,

    /// Print every file as it is added to a chunk
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

//! # plan 子命令 CLI 定义
//!
//! 仅规划分块，输出表格和可选的 CSV 清单
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/plan.rs`

use super::ChunkArgs;
use clap::Args;
use std::path::PathBuf;

/// plan 子命令参数
#[derive(Args, Debug)]
pub struct PlanArgs {
    #[command(flatten)]
    pub chunk: ChunkArgs,

    /// Write a per-file CSV manifest (chunk, path, size_bytes)
    #[arg(long)]
    pub manifest: Option<PathBuf>,
}

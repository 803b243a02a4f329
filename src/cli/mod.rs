//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `add`: 分块暂存并提交到 git
//! - `plan`: 仅规划分块，不执行 git
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: add, plan

pub mod add;
pub mod plan;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// gitchunk - 分块添加大量文件到 git
#[derive(Parser)]
#[command(name = "gitchunk")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "A tool for adding files to git in chunks", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Stage and commit a directory tree in bounded chunks
    Add(add::AddArgs),

    /// Show how a directory tree would be chunked without touching git
    Plan(plan::PlanArgs),
}

/// 分块相关的公共参数
#[derive(Args, Debug)]
pub struct ChunkArgs {
    /// Root directory to walk
    pub root: PathBuf,

    /// Maximum size of a chunk (in MB)
    #[arg(short, long, env = "GITCHUNK_SIZE", default_value_t = 500)]
    pub size: u64,

    /// Maximum number of files in a chunk
    #[arg(short, long, env = "GITCHUNK_COUNT", default_value_t = 1000)]
    pub count: usize,

    /// Resume from this path (files sorting before it are skipped)
    #[arg(long)]
    pub resume: Option<PathBuf>,

    /// Glob pattern to exclude (file name or path relative to root, repeatable)
    #[arg(long, value_delimiter = ',')]
    pub exclude: Vec<String>,
}

//! # 分块处理模块
//!
//! 将目录遍历发现的文件按大小和数量分块，逐块交给处理器。
//!
//! ## 功能
//! - 分块累加与准入判断
//! - 字典序遍历与断点续传
//! - 按命令行长度拆分子批次
//! - git 暂存与提交 / 仅规划
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 使用 `walkdir` 遍历目录
//! - 使用 `utils/git.rs` 执行外部命令

pub mod accumulator;
pub mod collector;
pub mod cursor;
pub mod runner;

pub use accumulator::ChunkLimits;
pub use collector::{DispatchConfig, DispatchStats, Dispatcher};
pub use runner::{GitHandler, GitOptions, PlanHandler};

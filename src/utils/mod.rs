//! # 工具函数模块
//!
//! 提供美化输出、进度条、git 命令构造与执行、大小换算等工具。
//!
//! ## 依赖关系
//! - 被 `batch/`, `commands/` 模块使用
//! - 子模块: output, progress, git, size

pub mod git;
pub mod output;
pub mod progress;
pub mod size;

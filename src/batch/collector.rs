//! # 分块调度器
//!
//! 按文件名字典序深度优先遍历目录树，把文件逐个送入累加器，
//! 分块满时交给 `ChunkHandler` 处理并清空，支持断点续传。
//!
//! ## 功能
//! - 字典序遍历（`walkdir` 内部使用显式目录栈，不依赖递归深度）
//! - 断点续传：游标之前的文件不 stat，直接跳过
//! - 始终排除 `.git` 目录，支持 glob 排除模式
//! - verbose 模式逐文件输出，progress 模式逐分块输出摘要
//!
//! ## 依赖关系
//! - 被 `commands/` 调用
//! - 使用 `batch/accumulator.rs`, `batch/cursor.rs`, `batch/runner.rs`
//! - 使用 `walkdir` 遍历目录, `glob` 匹配排除模式

use crate::batch::accumulator::{Accumulator, ChunkLimits};
use crate::batch::cursor::{CursorDecision, ResumeCursor};
use crate::batch::runner::{BatchKind, BatchOutcome, ChunkHandler, ChunkReport};
use crate::error::{GitChunkError, Result};
use crate::utils::{output, size};

use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// git 元数据目录名
const GIT_DIR: &str = ".git";

/// 调度器配置（每次运行构造一次）
#[derive(Debug, Clone)]
pub struct DispatchConfig {
    /// 分块上限
    pub limits: ChunkLimits,
    /// 断点续传路径
    pub resume: Option<PathBuf>,
    /// 排除模式
    pub excludes: Vec<glob::Pattern>,
    /// 逐文件输出
    pub verbose: bool,
    /// 逐分块输出摘要
    pub progress: bool,
}

impl DispatchConfig {
    pub fn new(limits: ChunkLimits) -> Self {
        Self {
            limits,
            resume: None,
            excludes: Vec::new(),
            verbose: false,
            progress: false,
        }
    }

    /// 解析逗号分隔或多次给出的排除模式
    pub fn with_excludes(mut self, patterns: &[String]) -> Result<Self> {
        for pattern in patterns {
            let compiled = glob::Pattern::new(pattern).map_err(|e| {
                GitChunkError::InvalidArgument(format!("Invalid pattern '{}': {}", pattern, e))
            })?;
            self.excludes.push(compiled);
        }
        Ok(self)
    }
}

/// 一次运行的统计
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchStats {
    /// 遍历到的文件数（含跳过的）
    pub files_seen: usize,
    /// 因断点续传跳过的文件数
    pub files_skipped: usize,
    /// 被排除的条目数
    pub excluded: usize,
    /// 加入分块的文件数
    pub files_admitted: usize,
    /// 加入分块的总字节数
    pub bytes_admitted: u64,
    /// 处理的分块数
    pub chunks: usize,
    /// `git add` 子批次数
    pub stage_batches: usize,
    /// 失败的命令（分块序号, 错误输出）
    pub failures: Vec<(usize, String)>,
}

impl DispatchStats {
    /// 合并一个分块的处理结果
    fn record(&mut self, index: usize, report: &ChunkReport) {
        self.chunks += 1;
        for outcome in &report.outcomes {
            if let BatchKind::Stage(_) = outcome.kind() {
                self.stage_batches += 1;
            }
            if let BatchOutcome::Failed(_, stderr) = outcome {
                self.failures.push((index, stderr.clone()));
            }
        }
    }

    /// 失败的命令数
    pub fn failed_commands(&self) -> usize {
        self.failures.len()
    }
}

/// 分块调度器
pub struct Dispatcher<H: ChunkHandler> {
    accumulator: Accumulator,
    cursor: ResumeCursor,
    excludes: Vec<glob::Pattern>,
    verbose: bool,
    progress: bool,
    handler: H,
    stats: DispatchStats,
}

impl<H: ChunkHandler> Dispatcher<H> {
    /// 创建调度器
    pub fn new(config: DispatchConfig, handler: H) -> Self {
        Self {
            accumulator: Accumulator::new(config.limits),
            cursor: ResumeCursor::new(config.resume),
            excludes: config.excludes,
            verbose: config.verbose,
            progress: config.progress,
            handler,
            stats: DispatchStats::default(),
        }
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// 遍历 `root` 并处理所有分块
    pub fn traverse(&mut self, root: &Path) -> Result<DispatchStats> {
        if !root.exists() {
            return Err(GitChunkError::DirectoryNotFound {
                path: root.display().to_string(),
            });
        }

        let mut walker = WalkDir::new(root).sort_by_file_name().into_iter();

        while let Some(entry) = walker.next() {
            let entry = entry.map_err(|e| GitChunkError::Walk {
                path: e
                    .path()
                    .unwrap_or(root)
                    .display()
                    .to_string(),
                source: e.into(),
            })?;

            if entry.depth() > 0 && self.is_excluded(root, &entry) {
                self.stats.excluded += 1;
                if entry.file_type().is_dir() {
                    walker.skip_current_dir();
                }
                continue;
            }

            if entry.file_type().is_dir() {
                if self.cursor.check_dir(entry.path()) == CursorDecision::Prune {
                    walker.skip_current_dir();
                }
                continue;
            }

            self.stats.files_seen += 1;

            if self.cursor.check_file(entry.path()) == CursorDecision::Skip {
                self.stats.files_skipped += 1;
                continue;
            }

            let size = entry
                .metadata()
                .map_err(|e| GitChunkError::Stat {
                    path: entry.path().display().to_string(),
                    source: e.into(),
                })?
                .len();

            self.accept(entry.into_path(), size)?;
        }

        if self.accumulator.is_non_empty() {
            self.flush()?;
        }

        if let Some(target) = self.cursor.target() {
            output::print_warning(&format!(
                "Resume point '{}' was never reached",
                target.display()
            ));
        }

        self.handler.finish()?;

        Ok(self.stats.clone())
    }

    /// 把文件加入分块，分块已满时先处理当前分块
    fn accept(&mut self, path: PathBuf, size: u64) -> Result<()> {
        if !self.accumulator.can_admit(size) {
            self.flush()?;
        }

        if self.verbose {
            output::print_path(&path.display().to_string());
        }

        let display = path.display().to_string();
        if !self.accumulator.admit(path, size) {
            return Err(GitChunkError::Other(format!(
                "Empty chunk refused file: {}",
                display
            )));
        }

        self.stats.files_admitted += 1;
        self.stats.bytes_admitted += size;
        Ok(())
    }

    /// 处理当前分块并清空累加器
    fn flush(&mut self) -> Result<()> {
        let index = self.stats.chunks + 1;

        if self.progress {
            print_chunk_summary(index, &self.accumulator);
        }

        let report = self.handler.handle(index, self.accumulator.chunk())?;
        self.stats.record(index, &report);
        self.accumulator.clear();

        Ok(())
    }

    /// 条目是否被排除（`.git` 或匹配任一排除模式）
    fn is_excluded(&self, root: &Path, entry: &DirEntry) -> bool {
        let name = entry.file_name();
        if name == GIT_DIR {
            return true;
        }

        if self.excludes.is_empty() {
            return false;
        }

        let name = name.to_string_lossy();
        let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
        let relative = relative.to_string_lossy();

        self.excludes
            .iter()
            .any(|p| p.matches(&name) || p.matches(&relative))
    }
}

/// 打印分块摘要行
fn print_chunk_summary(index: usize, accumulator: &Accumulator) {
    let dir = accumulator
        .chunk()
        .common_dir()
        .map(|d| {
            if d.as_os_str().is_empty() {
                ".".to_string()
            } else {
                d.display().to_string()
            }
        })
        .unwrap_or_default();
    output::print_chunk(
        index,
        &dir,
        accumulator.member_count(),
        &size::format_size(accumulator.total_bytes()),
    );
}

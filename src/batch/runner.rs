//! # 分块处理器
//!
//! 将完成的分块交给处理器。git 处理器把分块按命令行长度上限
//! 再拆分为若干子批次，逐个执行 `git add -f`，最后执行一次 `git commit`。
//!
//! ## 功能
//! - `ChunkHandler` 统一接口，可替换处理方式
//! - 按命令行长度拆分子批次
//! - dry-run 仅打印命令
//! - 单个子批次失败不影响后续批次
//! - plan 模式汇总为表格和 CSV 清单
//!
//! ## 依赖关系
//! - 被 `batch/collector.rs`, `commands/` 调用
//! - 使用 `utils/git.rs` 构造与执行命令
//! - 使用 `utils/output.rs`, `utils/progress.rs`, `utils/size.rs`

use crate::batch::accumulator::Chunk;
use crate::error::{GitChunkError, Result};
use crate::utils::git::{self, CommandRunner, GitCommand};
use crate::utils::{output, progress, size};

use serde::Serialize;
use std::path::{Path, PathBuf};
use tabled::{Table, Tabled};

/// 子批次类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchKind {
    /// `git add -f`，携带文件数
    Stage(usize),
    /// `git commit`
    Finalize,
}

/// 单个子批次的处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOutcome {
    /// 执行成功
    Success(BatchKind),
    /// 仅打印未执行，携带打印的命令行
    DryRun(BatchKind, String),
    /// 执行失败
    Failed(BatchKind, String), // (批次类型, 错误输出)
}

impl BatchOutcome {
    pub fn kind(&self) -> BatchKind {
        match self {
            BatchOutcome::Success(k) | BatchOutcome::DryRun(k, _) | BatchOutcome::Failed(k, _) => *k,
        }
    }
}

/// 一个分块的处理报告
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChunkReport {
    pub outcomes: Vec<BatchOutcome>,
}

impl ChunkReport {
    pub fn push(&mut self, outcome: BatchOutcome) {
        self.outcomes.push(outcome);
    }

    /// 子批次总数
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }
}

/// 分块处理接口
pub trait ChunkHandler {
    /// 处理一个完成的分块（`index` 从 1 开始）
    ///
    /// 外部命令失败记录在报告中；只有结构性错误才返回 `Err`。
    fn handle(&mut self, index: usize, chunk: &Chunk) -> Result<ChunkReport>;

    /// 遍历结束后调用一次
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// 按命令行长度上限拆分路径
///
/// 运行长度从 `prefix_len` 开始，每个路径占 `1 + 路径长度`（分隔空格）。
/// 超出上限时关闭当前子批次并以该路径开启新批次；
/// 单个超长路径独占一个批次。
pub fn split_into_batches<'a, I>(prefix_len: usize, paths: I, ceiling: usize) -> Vec<Vec<PathBuf>>
where
    I: IntoIterator<Item = &'a Path>,
{
    let mut batches = Vec::new();
    let mut current: Vec<PathBuf> = Vec::new();
    let mut length = prefix_len;

    for path in paths {
        let cost = 1 + path.as_os_str().len();

        if length + cost > ceiling && !current.is_empty() {
            batches.push(std::mem::take(&mut current));
            length = prefix_len;
        }

        current.push(path.to_path_buf());
        length += cost;
    }

    if !current.is_empty() {
        batches.push(current);
    }

    batches
}

/// 提交信息模板的默认值
pub const DEFAULT_MESSAGE: &str = "Add files (chunk {n}, {files} files)";

/// git 处理器配置
#[derive(Debug, Clone)]
pub struct GitOptions {
    /// 提交信息模板，`{n}` 替换为分块序号，`{files}` 替换为文件数
    pub message: String,
    /// 仅打印命令
    pub dry_run: bool,
    /// 显示子批次构造进度
    pub progress: bool,
    /// 命令行长度上限
    pub max_command_len: usize,
}

impl Default for GitOptions {
    fn default() -> Self {
        GitOptions {
            message: DEFAULT_MESSAGE.to_string(),
            dry_run: false,
            progress: false,
            max_command_len: git::MAX_COMMAND_LEN,
        }
    }
}

impl GitOptions {
    /// 渲染某个分块的提交信息
    pub fn message_for(&self, index: usize, chunk: &Chunk) -> String {
        self.message
            .replace("{n}", &index.to_string())
            .replace("{files}", &chunk.len().to_string())
    }
}

/// git 处理器：逐子批次 `git add -f`，然后 `git commit`
pub struct GitHandler<R: CommandRunner> {
    runner: R,
    options: GitOptions,
}

impl<R: CommandRunner> GitHandler<R> {
    pub fn new(runner: R, options: GitOptions) -> Self {
        Self { runner, options }
    }

    #[cfg(test)]
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// 执行（或打印）单条命令
    fn dispatch(&mut self, kind: BatchKind, command: &GitCommand) -> Result<BatchOutcome> {
        if self.options.dry_run {
            let line = command.render();
            output::print_dry(&line);
            return Ok(BatchOutcome::DryRun(kind, line));
        }

        let out = self.runner.run(command)?;
        if out.success {
            return Ok(BatchOutcome::Success(kind));
        }

        let label = match kind {
            BatchKind::Stage(files) => format!("git add -f ({} paths)", files),
            BatchKind::Finalize => command.render(),
        };
        let err = GitChunkError::CommandFailed {
            command: label,
            stderr: out.stderr.clone(),
        };
        output::print_error(&err.to_string());

        Ok(BatchOutcome::Failed(kind, out.stderr))
    }
}

impl<R: CommandRunner> ChunkHandler for GitHandler<R> {
    fn handle(&mut self, index: usize, chunk: &Chunk) -> Result<ChunkReport> {
        let pb = if self.options.progress {
            progress::create_progress_bar(chunk.len() as u64, "Building batches")
        } else {
            progress::hidden()
        };

        let batches = split_into_batches(
            git::stage_prefix_len(),
            chunk.paths().inspect(|_| pb.inc(1)),
            self.options.max_command_len,
        );
        pb.finish_and_clear();

        let mut report = ChunkReport::default();

        for batch in batches {
            let kind = BatchKind::Stage(batch.len());
            let command = GitCommand::stage(batch);
            report.push(self.dispatch(kind, &command)?);
        }

        let command = GitCommand::finalize(&self.options.message_for(index, chunk));
        report.push(self.dispatch(BatchKind::Finalize, &command)?);

        Ok(report)
    }
}

/// plan 表格行
#[derive(Debug, Clone, Tabled)]
struct PlanRow {
    #[tabled(rename = "Chunk")]
    chunk: usize,
    #[tabled(rename = "Directory")]
    directory: String,
    #[tabled(rename = "Files")]
    files: usize,
    #[tabled(rename = "Size")]
    size: String,
    #[tabled(rename = "Commands")]
    commands: usize,
}

/// CSV 清单行
#[derive(Debug, Clone, Serialize)]
struct ManifestRow {
    chunk: usize,
    path: String,
    size_bytes: u64,
}

/// plan 处理器：只记录分块，不执行任何外部命令
pub struct PlanHandler {
    rows: Vec<PlanRow>,
    manifest: Option<(PathBuf, Vec<ManifestRow>)>,
}

impl PlanHandler {
    pub fn new(manifest: Option<PathBuf>) -> Self {
        Self {
            rows: Vec::new(),
            manifest: manifest.map(|p| (p, Vec::new())),
        }
    }

    /// 已记录的分块数
    pub fn chunks(&self) -> usize {
        self.rows.len()
    }

    /// CSV 清单路径
    pub fn manifest_path(&self) -> Option<&Path> {
        self.manifest.as_ref().map(|(p, _)| p.as_path())
    }

    /// 渲染分块表格
    pub fn table(&self) -> Table {
        Table::new(&self.rows)
    }
}

impl ChunkHandler for PlanHandler {
    fn handle(&mut self, index: usize, chunk: &Chunk) -> Result<ChunkReport> {
        let batches =
            split_into_batches(git::stage_prefix_len(), chunk.paths(), git::MAX_COMMAND_LEN);

        let mut report = ChunkReport::default();
        for batch in batches {
            let kind = BatchKind::Stage(batch.len());
            report.push(BatchOutcome::DryRun(kind, GitCommand::stage(batch).render()));
        }
        let commit = GitCommand::finalize(&GitOptions::default().message_for(index, chunk));
        report.push(BatchOutcome::DryRun(BatchKind::Finalize, commit.render()));

        self.rows.push(PlanRow {
            chunk: index,
            directory: chunk
                .common_dir()
                .map(|d| d.display().to_string())
                .unwrap_or_default(),
            files: chunk.len(),
            size: size::format_size(chunk.total_bytes()),
            commands: report.total(),
        });

        if let Some((_, rows)) = self.manifest.as_mut() {
            rows.extend(chunk.entries().iter().map(|e| ManifestRow {
                chunk: index,
                path: e.path.display().to_string(),
                size_bytes: e.size,
            }));
        }

        Ok(report)
    }

    fn finish(&mut self) -> Result<()> {
        match &self.manifest {
            Some((path, rows)) => write_manifest(path, rows),
            None => Ok(()),
        }
    }
}

/// 写入 CSV 清单
fn write_manifest(output_path: &Path, rows: &[ManifestRow]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    for row in rows {
        wtr.serialize(row)?;
    }

    wtr.flush().map_err(|e| GitChunkError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

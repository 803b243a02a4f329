//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `batch/`, `utils/`
//! - 子模块: add, plan

pub mod add;
pub mod plan;

use crate::batch::{ChunkLimits, DispatchConfig, DispatchStats};
use crate::cli::{ChunkArgs, Commands};
use crate::error::{GitChunkError, Result};
use crate::utils::{output, size};

use std::path::{Component, Path, PathBuf};

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Add(args) => add::execute(args),
        Commands::Plan(args) => plan::execute(args),
    }
}

/// 由公共参数构造调度器配置
fn dispatch_config(args: &ChunkArgs) -> Result<DispatchConfig> {
    let limits = ChunkLimits::from_megabytes(args.size, args.count)?;

    let mut config = DispatchConfig::new(limits).with_excludes(&args.exclude)?;
    if let Some(resume) = args.resume.as_deref() {
        let cwd = std::env::current_dir().map_err(|e| {
            GitChunkError::Configuration(format!("Cannot read current directory: {}", e))
        })?;
        config.resume = Some(resolve_resume(&args.root, resume, &cwd)?);
    }

    Ok(config)
}

/// 把续传点改写成与遍历路径相同的写法（以 `root` 原样开头）
///
/// 两者先按 `cwd` 规范化为绝对路径再比较。相对路径若相对 `cwd`
/// 已位于根目录之下则按 `cwd` 理解，否则视为相对于根目录。
/// 规范化是纯词法的，不解析符号链接。
fn resolve_resume(root: &Path, resume: &Path, cwd: &Path) -> Result<PathBuf> {
    let abs_root = normalize(cwd, root);
    let from_cwd = normalize(cwd, resume);

    let absolute = if resume.is_relative() && !from_cwd.starts_with(&abs_root) {
        normalize(&abs_root, resume)
    } else {
        from_cwd
    };

    let relative = absolute.strip_prefix(&abs_root).map_err(|_| {
        GitChunkError::InvalidArgument(format!(
            "Resume path '{}' is not under '{}'",
            resume.display(),
            root.display()
        ))
    })?;

    if relative.as_os_str().is_empty() {
        Ok(root.to_path_buf())
    } else {
        Ok(root.join(relative))
    }
}

/// 以 `base` 为基准的词法绝对路径，去掉 `.` 并折叠 `..`
fn normalize(base: &Path, path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in base.join(path).components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}

/// 打印运行参数
fn print_settings(args: &ChunkArgs) {
    output::print_info(&format!(
        "Walking '{}' (max {} MB / {} files per chunk)",
        args.root.display(),
        args.size,
        args.count
    ));
    if let Some(resume) = &args.resume {
        output::print_info(&format!("Resuming from '{}'", resume.display()));
    }
}

/// 打印运行统计
fn print_stats(stats: &DispatchStats) {
    output::print_separator();
    if stats.files_skipped > 0 {
        output::print_skip(&format!(
            "{} files before the resume point",
            stats.files_skipped
        ));
    }
    if stats.excluded > 0 {
        output::print_skip(&format!("{} excluded entries", stats.excluded));
    }
    output::print_done(&format!(
        "{} of {} files ({}) in {} chunks, {} git add batches",
        stats.files_admitted,
        stats.files_seen,
        size::format_size(stats.bytes_admitted),
        stats.chunks,
        stats.stage_batches
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::{Dispatcher, PlanHandler};

    fn chunk_args(size: u64, count: usize) -> ChunkArgs {
        ChunkArgs {
            root: PathBuf::from("data"),
            size,
            count,
            resume: None,
            exclude: Vec::new(),
        }
    }

    #[test]
    fn test_resolve_resume() {
        let root = Path::new("data");
        let cwd = Path::new("/work");
        assert_eq!(
            resolve_resume(root, Path::new("data/a/b"), cwd).unwrap(),
            PathBuf::from("data/a/b")
        );
        assert_eq!(
            resolve_resume(root, Path::new("a/b"), cwd).unwrap(),
            PathBuf::from("data/a/b")
        );
        assert_eq!(
            resolve_resume(root, Path::new("data"), cwd).unwrap(),
            PathBuf::from("data")
        );
    }

    #[test]
    fn test_resolve_resume_mixed_spellings() {
        let cwd = Path::new("/work");

        // 根目录带 "./"，续传点相对当前目录
        let cursor = resolve_resume(Path::new("./data"), Path::new("data/a/b/file5"), cwd).unwrap();
        assert_eq!(cursor.as_os_str(), "./data/a/b/file5");

        // 根目录相对，续传点绝对
        let cursor = resolve_resume(Path::new("data"), Path::new("/work/data/a/b/file5"), cwd).unwrap();
        assert_eq!(cursor.as_os_str(), "data/a/b/file5");

        // 根目录绝对，续传点相对当前目录
        let cursor = resolve_resume(Path::new("/work/data"), Path::new("./data/a/b/file5"), cwd).unwrap();
        assert_eq!(cursor.as_os_str(), "/work/data/a/b/file5");

        // ".." 在比较前折叠
        let cursor = resolve_resume(Path::new("data"), Path::new("../data/a"), cwd).unwrap();
        assert_eq!(cursor.as_os_str(), "data/a");
    }

    #[test]
    fn test_resolve_resume_outside_root() {
        let result = resolve_resume(Path::new("data"), Path::new("/elsewhere/file"), Path::new("/work"));
        assert!(matches!(result, Err(GitChunkError::InvalidArgument(_))));
    }

    #[test]
    fn test_resume_with_mixed_spellings_keeps_every_later_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let base = dir.path();
        for i in 1..=9 {
            let path = base.join(format!("data/a/b/file{}", i));
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(&path, b"x").unwrap();
        }
        std::fs::write(base.join("data/z"), b"x").unwrap();

        let spellings = [
            (base.join(".").join("data"), PathBuf::from("data/a/b/file5")),
            (base.join("data"), base.join("data/../data/a/b/file5")),
            (base.join("data"), PathBuf::from("a/b/file5")),
        ];

        for (root, resume) in spellings {
            let mut args = chunk_args(1, 3);
            args.root = root.clone();
            let mut config = dispatch_config(&args).unwrap();
            config.resume = Some(resolve_resume(&root, &resume, base).unwrap());

            let mut dispatcher = Dispatcher::new(config, PlanHandler::new(None));
            let stats = dispatcher.traverse(&root).unwrap();

            // file5..file9 与 z
            assert_eq!(stats.files_admitted, 6, "root {:?} resume {:?}", root, resume);
            assert_eq!(stats.files_skipped, 4, "root {:?} resume {:?}", root, resume);
            assert_eq!(stats.chunks, 2);
        }
    }

    #[test]
    fn test_dispatch_config_rejects_zero_limits() {
        assert!(matches!(
            dispatch_config(&chunk_args(0, 10)),
            Err(GitChunkError::Configuration(_))
        ));
        assert!(matches!(
            dispatch_config(&chunk_args(10, 0)),
            Err(GitChunkError::Configuration(_))
        ));
    }

    #[test]
    fn test_dispatch_config_defaults() {
        let mut args = chunk_args(500, 1000);
        args.resume = Some(PathBuf::from("x"));
        let config = dispatch_config(&args).unwrap();
        assert_eq!(config.limits, ChunkLimits::new(500 * 1024 * 1024, 1000).unwrap());
        assert_eq!(config.resume, Some(PathBuf::from("data/x")));
        assert!(config.excludes.is_empty());
    }
}

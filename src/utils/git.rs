//! # git 命令构造与执行
//!
//! 构造 `git add -f` / `git commit -m` 命令，渲染命令行文本，
//! 并通过 `CommandRunner` 同步执行外部进程。
//!
//! ## 依赖关系
//! - 被 `batch/runner.rs` 使用
//! - 使用 `std::process::Command`

use crate::error::{GitChunkError, Result};

use std::ffi::{OsStr, OsString};
use std::path::PathBuf;
use std::process::Command;

/// 单条命令行的长度上限（各平台命令行上限的最小公约数）
pub const MAX_COMMAND_LEN: usize = 8192;

/// git 可执行文件名
pub const GIT: &str = "git";

/// `git add -f` 的固定前缀
const STAGE_PREFIX: [&str; 3] = [GIT, "add", "-f"];

/// 一条待执行的 git 命令
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitCommand {
    args: Vec<OsString>,
}

impl GitCommand {
    /// `git add -f <paths...>`
    pub fn stage<I>(paths: I) -> Self
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let mut args: Vec<OsString> =
            STAGE_PREFIX[1..].iter().map(|a| OsString::from(*a)).collect();
        args.extend(paths.into_iter().map(PathBuf::into_os_string));
        Self { args }
    }

    /// `git commit -m <message>`
    pub fn finalize(message: &str) -> Self {
        Self {
            args: vec!["commit".into(), "-m".into(), message.into()],
        }
    }

    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    /// 渲染为可粘贴到 shell 的命令行文本（dry-run 输出）
    ///
    /// 含空白或 shell 元字符的参数加单引号；长度预算仍按原始参数计算。
    pub fn render(&self) -> String {
        std::iter::once(OsStr::new(GIT))
            .chain(self.args.iter().map(OsString::as_os_str))
            .map(|a| shell_quote(&a.to_string_lossy()))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// 需要加引号的字符
fn needs_quoting(c: char) -> bool {
    c.is_whitespace()
        || matches!(
            c,
            '\'' | '"' | '\\' | '$' | '`' | '!' | '*' | '?' | '[' | ']' | '(' | ')' | '{' | '}'
                | '<' | '>' | '|' | '&' | ';' | '#' | '~'
        )
}

/// POSIX shell 单引号转义，`'` 写作 `'\''`
fn shell_quote(arg: &str) -> String {
    if !arg.is_empty() && !arg.chars().any(needs_quoting) {
        return arg.to_string();
    }
    format!("'{}'", arg.replace('\'', "'\\''"))
}

/// 前缀渲染后的长度
pub fn stage_prefix_len() -> usize {
    STAGE_PREFIX.join(" ").len()
}

/// 外部命令执行结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub success: bool,
    pub stderr: String,
}

/// 外部进程执行接口
pub trait CommandRunner {
    /// 同步执行命令，返回退出状态与捕获的错误输出
    ///
    /// 仅当进程无法启动时返回错误；非零退出码体现在 `CommandOutput` 中。
    fn run(&mut self, command: &GitCommand) -> Result<CommandOutput>;
}

/// 基于 `std::process::Command` 的执行器
#[derive(Debug, Default)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn run(&mut self, command: &GitCommand) -> Result<CommandOutput> {
        let out = Command::new(GIT)
            .args(command.args())
            .output()
            .map_err(|_| GitChunkError::CommandNotFound {
                command: GIT.to_string(),
            })?;

        let mut stderr = String::from_utf8_lossy(&out.stderr).trim().to_string();
        if stderr.is_empty() && !out.status.success() {
            // git commit 在无可提交内容时只写 stdout
            stderr = String::from_utf8_lossy(&out.stdout).trim().to_string();
        }

        Ok(CommandOutput {
            success: out.status.success(),
            stderr,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_render() {
        let cmd = GitCommand::stage(vec![PathBuf::from("a/b.txt"), PathBuf::from("c")]);
        assert_eq!(cmd.render(), "git add -f a/b.txt c");
        assert_eq!(cmd.args().len(), 4);
    }

    #[test]
    fn test_finalize_render() {
        let cmd = GitCommand::finalize("Add chunk 1");
        assert_eq!(cmd.render(), "git commit -m 'Add chunk 1'");
        assert_eq!(cmd.args()[2], OsString::from("Add chunk 1"));
    }

    #[test]
    fn test_render_quotes_shell_words() {
        let cmd = GitCommand::stage(vec![
            PathBuf::from("my docs/a b.txt"),
            PathBuf::from("it's.txt"),
            PathBuf::from("plain.txt"),
        ]);
        assert_eq!(
            cmd.render(),
            "git add -f 'my docs/a b.txt' 'it'\\''s.txt' plain.txt"
        );
        // argv 不含引号
        assert_eq!(cmd.args()[2], OsString::from("my docs/a b.txt"));

        let commit = GitCommand::finalize("Add files (chunk 1, 2 files)");
        assert_eq!(commit.render(), "git commit -m 'Add files (chunk 1, 2 files)'");
        assert_eq!(GitCommand::finalize("").render(), "git commit -m ''");
    }

    #[test]
    fn test_stage_prefix_len() {
        assert_eq!(stage_prefix_len(), "git add -f".len());
        let empty = GitCommand::stage(Vec::new());
        assert_eq!(empty.render().len(), stage_prefix_len());
    }
}

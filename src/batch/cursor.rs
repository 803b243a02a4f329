//! # 断点续传游标
//!
//! 记录上一次运行停止的位置。遍历按文件名字典序进行，
//! `Path` 的逐组件比较与该顺序一致，因此可直接比较路径。
//!
//! ## 依赖关系
//! - 被 `batch/collector.rs` 使用

use std::path::{Path, PathBuf};

/// 游标对一个遍历条目的判定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorDecision {
    /// 条目在游标之前，跳过
    Skip,
    /// 目录在游标之前且不包含游标，整棵子树跳过
    Prune,
    /// 正常处理
    Visit,
}

/// 断点续传游标
#[derive(Debug, Clone, Default)]
pub struct ResumeCursor {
    target: Option<PathBuf>,
}

impl ResumeCursor {
    pub fn new(target: Option<PathBuf>) -> Self {
        Self { target }
    }

    #[cfg(test)]
    pub fn is_active(&self) -> bool {
        self.target.is_some()
    }

    /// 尚未到达的续传点
    pub fn target(&self) -> Option<&Path> {
        self.target.as_deref()
    }

    /// 判定目录条目
    ///
    /// 到达与游标相同的目录时清除游标。
    pub fn check_dir(&mut self, dir: &Path) -> CursorDecision {
        let Some(target) = self.target.as_deref() else {
            return CursorDecision::Visit;
        };

        if target.starts_with(dir) {
            if target.components().count() <= dir.components().count() {
                self.target = None;
            }
            return CursorDecision::Visit;
        }

        if dir < target {
            CursorDecision::Prune
        } else {
            // 已越过游标位置（例如游标指向不存在的路径）
            self.target = None;
            CursorDecision::Visit
        }
    }

    /// 判定文件条目
    ///
    /// 第一个不在游标之前的文件会清除游标。
    pub fn check_file(&mut self, file: &Path) -> CursorDecision {
        match self.target.as_deref() {
            Some(target) if file < target => CursorDecision::Skip,
            Some(_) => {
                self.target = None;
                CursorDecision::Visit
            }
            None => CursorDecision::Visit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inactive_cursor_visits_everything() {
        let mut cursor = ResumeCursor::new(None);
        assert!(!cursor.is_active());
        assert_eq!(cursor.check_file(Path::new("/a")), CursorDecision::Visit);
        assert_eq!(cursor.check_dir(Path::new("/a")), CursorDecision::Visit);
    }

    #[test]
    fn test_skips_files_before_target() {
        let mut cursor = ResumeCursor::new(Some(PathBuf::from("/a/b/file5")));
        assert_eq!(cursor.check_file(Path::new("/a/b/file1")), CursorDecision::Skip);
        assert_eq!(cursor.check_file(Path::new("/a/a.txt")), CursorDecision::Skip);
        assert!(cursor.is_active());

        assert_eq!(cursor.check_file(Path::new("/a/b/file5")), CursorDecision::Visit);
        assert!(!cursor.is_active());
        assert_eq!(cursor.check_file(Path::new("/a/b/file1")), CursorDecision::Visit);
    }

    #[test]
    fn test_ancestor_dirs_are_entered() {
        let mut cursor = ResumeCursor::new(Some(PathBuf::from("/a/b/file5")));
        assert_eq!(cursor.check_dir(Path::new("/a")), CursorDecision::Visit);
        assert_eq!(cursor.check_dir(Path::new("/a/b")), CursorDecision::Visit);
        assert!(cursor.is_active());
    }

    #[test]
    fn test_earlier_sibling_dirs_are_pruned() {
        let mut cursor = ResumeCursor::new(Some(PathBuf::from("/a/b/file5")));
        assert_eq!(cursor.check_dir(Path::new("/a/a")), CursorDecision::Prune);
        assert!(cursor.is_active());
    }

    #[test]
    fn test_dir_equal_to_target_clears() {
        let mut cursor = ResumeCursor::new(Some(PathBuf::from("/a/b")));
        assert_eq!(cursor.check_dir(Path::new("/a")), CursorDecision::Visit);
        assert!(cursor.is_active());
        assert_eq!(cursor.check_dir(Path::new("/a/b")), CursorDecision::Visit);
        assert!(!cursor.is_active());
    }

    #[test]
    fn test_passing_a_missing_target_clears() {
        let mut cursor = ResumeCursor::new(Some(PathBuf::from("/a/b/gone")));
        assert_eq!(cursor.check_dir(Path::new("/a/b")), CursorDecision::Visit);
        assert_eq!(cursor.check_dir(Path::new("/a/c")), CursorDecision::Visit);
        assert!(!cursor.is_active());
    }

    #[test]
    fn test_component_order_not_byte_order() {
        // "a-b" < "a/x" bytewise ('-' < '/'), but the walk visits "a" before "a-b"
        let mut cursor = ResumeCursor::new(Some(PathBuf::from("a/x")));
        assert_eq!(cursor.check_file(Path::new("a-b")), CursorDecision::Visit);
    }
}

//! # 分块累加器
//!
//! 持有当前分块的成员与累计大小，决定下一个文件能否加入。
//!
//! ## 不变量
//! - `total_bytes` 始终等于所有成员大小之和
//! - 成员数不超过 `max_files`
//! - 总大小不超过 `max_bytes`，唯一例外是仅含一个超大文件的分块
//!
//! ## 依赖关系
//! - 被 `batch/collector.rs` 使用
//! - 使用 `error.rs`

use crate::error::{GitChunkError, Result};

use std::path::{Path, PathBuf};

/// 分块上限（每次运行构造一次）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkLimits {
    /// 最大字节数
    pub max_bytes: u64,
    /// 最大文件数
    pub max_files: usize,
}

impl ChunkLimits {
    /// 创建分块上限，任一上限为 0 时返回配置错误
    pub fn new(max_bytes: u64, max_files: usize) -> Result<Self> {
        if max_bytes == 0 || max_files == 0 {
            return Err(GitChunkError::Configuration(
                "chunk size and file count must be positive values".to_string(),
            ));
        }
        Ok(Self {
            max_bytes,
            max_files,
        })
    }

    /// 以 MB 为单位创建
    pub fn from_megabytes(megabytes: u64, max_files: usize) -> Result<Self> {
        let max_bytes = crate::utils::size::megabytes_to_bytes(megabytes).ok_or_else(|| {
            GitChunkError::Configuration(format!("chunk size of {} MB is too large", megabytes))
        })?;
        Self::new(max_bytes, max_files)
    }
}

/// 分块中的单个文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkEntry {
    pub path: PathBuf,
    pub size: u64,
}

/// 一个分块：按发现顺序排列的文件
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Chunk {
    entries: Vec<ChunkEntry>,
    total_bytes: u64,
}

impl Chunk {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_bytes(&self) -> u64 {
        self.total_bytes
    }

    pub fn entries(&self) -> &[ChunkEntry] {
        &self.entries
    }

    /// 按顺序迭代成员路径
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.entries.iter().map(|e| e.path.as_path())
    }

    /// 所有成员的最深公共父目录（用于进度输出）
    pub fn common_dir(&self) -> Option<PathBuf> {
        let mut iter = self.entries.iter();
        let first = iter.next()?;
        let mut common = first.path.parent().unwrap_or(Path::new("")).to_path_buf();

        for entry in iter {
            while !entry.path.starts_with(&common) {
                if !common.pop() {
                    return Some(PathBuf::new());
                }
            }
        }

        Some(common)
    }
}

/// 分块累加器
#[derive(Debug)]
pub struct Accumulator {
    limits: ChunkLimits,
    chunk: Chunk,
}

impl Accumulator {
    /// 创建空累加器
    pub fn new(limits: ChunkLimits) -> Self {
        Self {
            limits,
            chunk: Chunk::default(),
        }
    }

    /// 判断能否再加入一个大小为 `size` 的文件（无副作用）
    ///
    /// 空分块总能接受一个文件，即使它本身超过字节上限。
    pub fn can_admit(&self, size: u64) -> bool {
        if self.chunk.is_empty() {
            return true;
        }

        let count_ok = self.chunk.len() < self.limits.max_files;
        let bytes_ok = self
            .chunk
            .total_bytes
            .checked_add(size)
            .is_some_and(|total| total <= self.limits.max_bytes);

        count_ok && bytes_ok
    }

    /// 尝试加入文件，分块已满时返回 false 且不做任何修改
    pub fn admit(&mut self, path: impl Into<PathBuf>, size: u64) -> bool {
        if !self.can_admit(size) {
            return false;
        }

        self.chunk.entries.push(ChunkEntry {
            path: path.into(),
            size,
        });
        self.chunk.total_bytes += size;
        true
    }

    pub fn is_non_empty(&self) -> bool {
        !self.chunk.is_empty()
    }

    pub fn member_count(&self) -> usize {
        self.chunk.len()
    }

    pub fn total_bytes(&self) -> u64 {
        self.chunk.total_bytes
    }

    /// 当前分块（只读）
    pub fn chunk(&self) -> &Chunk {
        &self.chunk
    }

    /// 清空分块
    pub fn clear(&mut self) {
        self.chunk.entries.clear();
        self.chunk.total_bytes = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits(bytes: u64, files: usize) -> ChunkLimits {
        ChunkLimits::new(bytes, files).unwrap()
    }

    #[test]
    fn test_limits_reject_zero() {
        assert!(matches!(
            ChunkLimits::new(0, 10),
            Err(GitChunkError::Configuration(_))
        ));
        assert!(matches!(
            ChunkLimits::new(10, 0),
            Err(GitChunkError::Configuration(_))
        ));
        assert!(ChunkLimits::new(1, 1).is_ok());
    }

    #[test]
    fn test_limits_from_megabytes() {
        let l = ChunkLimits::from_megabytes(500, 1000).unwrap();
        assert_eq!(l.max_bytes, 500 * 1024 * 1024);
        assert_eq!(l.max_files, 1000);
        assert!(ChunkLimits::from_megabytes(0, 1000).is_err());
        assert!(ChunkLimits::from_megabytes(u64::MAX, 1000).is_err());
    }

    #[test]
    fn test_totals_track_admitted_sizes() {
        let mut acc = Accumulator::new(limits(100, 5));
        let sizes = [10, 0, 40, 30, 25, 5, 1];
        let mut admitted_bytes = 0;
        let mut admitted_count = 0;

        for (i, size) in sizes.iter().enumerate() {
            if acc.admit(format!("f{}", i), *size) {
                admitted_bytes += size;
                admitted_count += 1;
            }
            assert_eq!(acc.total_bytes(), admitted_bytes);
            assert_eq!(acc.member_count(), admitted_count);
            assert!(acc.total_bytes() <= 100);
            assert!(acc.member_count() <= 5);
        }

        // 10 + 0 + 40 + 30 = 80, 25 rejected, 5 fits, 1 rejected by count
        assert_eq!(acc.member_count(), 5);
        assert_eq!(acc.total_bytes(), 85);
    }

    #[test]
    fn test_count_ceiling() {
        let mut acc = Accumulator::new(limits(u64::MAX, 2));
        assert!(acc.admit("a", 1));
        assert!(acc.admit("b", 1));
        assert!(!acc.can_admit(0));
        assert!(!acc.admit("c", 0));
        assert_eq!(acc.member_count(), 2);
    }

    #[test]
    fn test_refuses_without_mutation() {
        let mut acc = Accumulator::new(limits(25, 10));
        assert!(acc.admit("a", 10));
        assert!(acc.admit("b", 10));
        let before = acc.chunk().clone();

        assert!(!acc.admit("c", 10));
        assert_eq!(acc.chunk(), &before);
    }

    #[test]
    fn test_lone_oversized_file_is_admitted() {
        let mut acc = Accumulator::new(limits(10, 10));
        assert!(acc.admit("big", 1000));
        assert_eq!(acc.total_bytes(), 1000);
        assert!(!acc.admit("small", 1));
    }

    #[test]
    fn test_overflowing_size_is_refused() {
        let mut acc = Accumulator::new(limits(u64::MAX, 10));
        assert!(acc.admit("a", u64::MAX - 1));
        assert!(!acc.can_admit(2));
    }

    #[test]
    fn test_clear_resets_and_accepts_again() {
        let mut acc = Accumulator::new(limits(20, 2));
        assert!(acc.admit("a", 15));
        assert!(!acc.admit("b", 15));

        acc.clear();
        assert!(!acc.is_non_empty());
        assert_eq!(acc.member_count(), 0);
        assert_eq!(acc.total_bytes(), 0);

        assert!(acc.admit("b", 15));
        assert!(acc.is_non_empty());
    }

    #[test]
    fn test_zero_size_file_counts_as_member() {
        let mut acc = Accumulator::new(limits(10, 10));
        assert!(acc.admit("empty", 0));
        assert!(acc.is_non_empty());
        assert_eq!(acc.total_bytes(), 0);
    }

    #[test]
    fn test_common_dir() {
        let mut acc = Accumulator::new(limits(100, 10));
        acc.admit("root/a/b/one", 1);
        acc.admit("root/a/b/two", 1);
        assert_eq!(acc.chunk().common_dir(), Some(PathBuf::from("root/a/b")));

        acc.admit("root/a/c/three", 1);
        assert_eq!(acc.chunk().common_dir(), Some(PathBuf::from("root/a")));

        acc.clear();
        assert_eq!(acc.chunk().common_dir(), None);
    }

    #[test]
    fn test_paths_keep_discovery_order() {
        let mut acc = Accumulator::new(limits(100, 10));
        acc.admit("z", 1);
        acc.admit("a", 1);
        acc.admit("m", 1);
        let paths: Vec<_> = acc.chunk().paths().map(|p| p.to_path_buf()).collect();
        assert_eq!(
            paths,
            vec![PathBuf::from("z"), PathBuf::from("a"), PathBuf::from("m")]
        );
    }
}

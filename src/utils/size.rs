//! # 大小换算工具
//!
//! MB 与字节之间的换算，以及人类可读的大小格式。

const KIB: u64 = 1024;
const MIB: u64 = KIB * 1024;

/// MB 转字节，溢出时返回 None
pub fn megabytes_to_bytes(megabytes: u64) -> Option<u64> {
    megabytes.checked_mul(MIB)
}

/// 格式化为人类可读的大小 (e.g., "512 B", "1.5 MB")
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["KB", "MB", "GB", "TB", "PB"];

    if bytes < KIB {
        return format!("{} B", bytes);
    }

    let mut value = bytes as f64;
    let mut unit = "B";
    for u in UNITS {
        if value < KIB as f64 {
            break;
        }
        value /= KIB as f64;
        unit = u;
    }

    format!("{:.1} {}", value, unit)
}

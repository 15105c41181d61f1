//! 不支持扩展属性的平台的兜底实现
//!
//! 所有操作直接返回 [`std::io::ErrorKind::Unsupported`]，
//! 上层翻译为 [`crate::ErrorKind::Unsupported`]。

use std::io;
use std::path::Path;

use crate::types::SetFlags;

fn unsupported() -> io::Error {
    io::Error::new(
        io::ErrorKind::Unsupported,
        "extended attributes are not supported on this platform",
    )
}

/// 判断错误是否表示「属性不存在」（本平台永远不会）
pub fn is_attr_missing(_err: &io::Error) -> bool {
    false
}

/// 读取属性值（恒为不支持）
pub fn get(_path: &Path, _name: &str, _follow: bool) -> io::Result<Vec<u8>> {
    Err(unsupported())
}

/// 写入属性值（恒为不支持）
pub fn set(
    _path: &Path,
    _name: &str,
    _value: &[u8],
    _flags: SetFlags,
    _follow: bool,
) -> io::Result<()> {
    Err(unsupported())
}

/// 列出属性名（恒为不支持）
pub fn list(_path: &Path, _follow: bool) -> io::Result<Vec<u8>> {
    Err(unsupported())
}

/// 删除属性（恒为不支持）
pub fn remove(_path: &Path, _name: &str, _follow: bool) -> io::Result<()> {
    Err(unsupported())
}

//! 错误类型定义
//!
//! 提供扩展属性操作的错误类型，以及 OS errno 到错误类别的翻译。

use std::fmt;
use std::io;

/// 扩展属性操作错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    kind: ErrorKind,
    message: &'static str,
    errno: Option<i32>,
}

/// 错误类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// 目标路径不存在
    NotFound,
    /// 权限不足
    PermissionDenied,
    /// 文件系统或操作系统不支持扩展属性
    Unsupported,
    /// 无效参数（空属性名、内嵌 NUL 字节、非 UTF-8 名称等）
    InvalidInput,
    /// 其他系统调用失败（值过大、空间不足等），保留原始 errno
    Os,
}

impl Error {
    /// 创建新错误
    pub const fn new(kind: ErrorKind, message: &'static str) -> Self {
        Self {
            kind,
            message,
            errno: None,
        }
    }

    /// 从系统调用错误创建
    ///
    /// errno 到类别的翻译规则：
    /// - `ENOENT` → [`ErrorKind::NotFound`]
    /// - `EACCES` / `EPERM` → [`ErrorKind::PermissionDenied`]
    /// - `ENOTSUP` / `EOPNOTSUPP` → [`ErrorKind::Unsupported`]
    /// - 其他 → [`ErrorKind::Os`]（原始 errno 保留在错误值中）
    ///
    /// 注意：「属性不存在」的 errno（Linux 上 `ENODATA`，macOS 上
    /// `ENOATTR`）不会到达这里——它在 `api` 层被改写为成功结果。
    pub fn from_os(err: io::Error, message: &'static str) -> Self {
        let errno = err.raw_os_error();
        let kind = match errno {
            Some(libc::ENOENT) => ErrorKind::NotFound,
            Some(libc::EACCES) | Some(libc::EPERM) => ErrorKind::PermissionDenied,
            #[allow(unreachable_patterns)] // Linux 上 ENOTSUP == EOPNOTSUPP
            Some(libc::ENOTSUP) | Some(libc::EOPNOTSUPP) => ErrorKind::Unsupported,
            // 无 errno 的 Unsupported 来自不支持 xattr 的平台兜底实现
            None if err.kind() == io::ErrorKind::Unsupported => ErrorKind::Unsupported,
            _ => ErrorKind::Os,
        };
        Self {
            kind,
            message,
            errno,
        }
    }

    /// 获取错误类型
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// 获取错误消息
    pub const fn message(&self) -> &'static str {
        self.message
    }

    /// 获取原始 errno（如果来自系统调用）
    pub const fn errno(&self) -> Option<i32> {
        self.errno
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.errno {
            Some(errno) => write!(f, "{:?}: {} (errno {})", self.kind, self.message, errno),
            None => write!(f, "{:?}: {}", self.kind, self.message),
        }
    }
}

impl std::error::Error for Error {}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, Error>;

//! 常量定义

// ===== 命名空间前缀 =====

/// 用户自定义属性命名空间前缀
pub const XATTR_NAMESPACE_USER: &str = "user.";

/// 可信属性命名空间前缀
pub const XATTR_NAMESPACE_TRUSTED: &str = "trusted.";

/// 安全标签命名空间前缀（如 SELinux）
pub const XATTR_NAMESPACE_SECURITY: &str = "security.";

/// 系统属性命名空间前缀（如 ACL）
pub const XATTR_NAMESPACE_SYSTEM: &str = "system.";

// ===== 工作线程池 =====

/// 后台工作线程数上限
///
/// 每个异步调用占用一个工作线程直到底层系统调用返回，
/// 系统调用本身很短，少量线程即可。
pub const MAX_WORKER_THREADS: usize = 4;

/// 工作线程名称前缀
pub const WORKER_THREAD_NAME: &str = "fsxattr-worker";

//! fsxattr_core: 扩展文件属性（xattr）访问库
//!
//! 把操作系统的扩展属性系统调用家族
//! （`getxattr` / `setxattr` / `listxattr` / `removexattr`）
//! 封装为同步和异步两套调用形式，旨在提供：
//! - **薄封装**：每次调用就是一次系统调用，不缓存、不重试、不加锁
//! - **统一的错误模型**：errno 按类别翻译，保留原始错误码
//! - **一致的双形式契约**：异步形式只是卸载到后台线程的包装，
//!   对相同输入与同步形式产生逐字节一致的结果
//!
//! 两处有意的 errno 改写（也是本库唯一的「策略」）：
//! 读取时「属性不存在」返回 `None` 而非错误；
//! 删除时「属性已不存在」视为成功（幂等删除）。
//!
//! # 示例
//!
//! ```no_run
//! use fsxattr_core::Result;
//!
//! fn main() -> Result<()> {
//!     // 同步形式
//!     fsxattr_core::set("data.bin", "user.author", b"Alice")?;
//!     let value = fsxattr_core::get("data.bin", "user.author")?;
//!     assert_eq!(value.as_deref(), Some(&b"Alice"[..]));
//!
//!     for name in fsxattr_core::list("data.bin")? {
//!         println!("{name}");
//!     }
//!
//!     // 幂等删除：重复删除不报错
//!     fsxattr_core::remove("data.bin", "user.author")?;
//!     fsxattr_core::remove("data.bin", "user.author")?;
//!     Ok(())
//! }
//! ```
//!
//! 异步形式在 [`nonblocking`] 模块下，函数名一一对应：
//!
//! ```no_run
//! # async fn demo() -> fsxattr_core::Result<()> {
//! fsxattr_core::nonblocking::set("data.bin", "user.author", b"Alice").await?;
//! let value = fsxattr_core::nonblocking::get("data.bin", "user.author").await?;
//! # Ok(())
//! # }
//! ```
//!
//! # 模块结构
//!
//! - [`error`] - 错误类型定义和 errno 翻译
//! - [`consts`] - 常量定义
//! - [`types`] - setxattr 标志位
//! - [`name`] - 属性名校验和命名空间拆分
//! - [`api`] - 同步公共 API（契约层）
//! - [`task`] - 后台工作线程池
//! - [`nonblocking`] - 非阻塞公共 API

#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs)]

// ===== 核心模块 =====

/// 错误处理
pub mod error;

/// 常量定义
pub mod consts;

/// 数据结构定义
pub mod types;

/// 属性名处理
pub mod name;

/// 系统调用层
pub(crate) mod sys;

/// 同步公共 API
pub mod api;

/// 后台工作线程池
pub mod task;

/// 非阻塞公共 API
pub mod nonblocking;

// ===== 公共导出 =====

// 错误处理
pub use error::{Error, ErrorKind, Result};

// setxattr 标志
pub use types::SetFlags;

// 同步操作
pub use api::{
    get, get_link, list, list_link, remove, remove_link, set, set_link, set_with_flags,
};

// 后台任务原语
pub use task::{spawn_blocking, JoinHandle};

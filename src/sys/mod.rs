//! 系统调用层
//!
//! 按平台封装原始的 xattr 系统调用家族，包括与内核的缓冲区大小协商。
//!
//! 本层只做两件事：
//! 1. 发起系统调用，失败时原样返回 [`std::io::Error`]（errno 保留）
//! 2. get/list 的「先探测大小、再分配、`ERANGE` 时重试」循环
//!
//! errno 到本库错误类别的翻译、以及「属性不存在」的成功改写，
//! 都在上层 `api` 模块完成。

#[cfg(any(target_os = "linux", target_os = "android"))]
mod linux;

#[cfg(any(target_os = "macos", target_os = "ios"))]
mod macos;

#[cfg(not(any(
    target_os = "linux",
    target_os = "android",
    target_os = "macos",
    target_os = "ios"
)))]
mod unsupported;

#[cfg(any(target_os = "linux", target_os = "android"))]
pub use linux::{get, is_attr_missing, list, remove, set};

#[cfg(any(target_os = "macos", target_os = "ios"))]
pub use macos::{get, is_attr_missing, list, remove, set};

#[cfg(not(any(
    target_os = "linux",
    target_os = "android",
    target_os = "macos",
    target_os = "ios"
)))]
pub use unsupported::{get, is_attr_missing, list, remove, set};

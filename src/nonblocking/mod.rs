//! 非阻塞公共 API
//!
//! [`crate::api`] 中每个操作的异步形式。纯粹的卸载包装：
//! 输入转为自有数据，同步实现提交到 [`crate::task`] 的
//! 后台线程池，调用方在 `await` 处挂起直到系统调用完成。
//!
//! 契约保证：对相同输入，这里的每个函数与对应的同步函数
//! 产生逐字节一致的结果和一致的错误分类——没有第二套算法。
//! 并发调用之间不提供顺序保证；不支持取消和超时。

use std::path::Path;

use crate::api;
use crate::error::{Error, ErrorKind, Result};
use crate::task;
use crate::types::SetFlags;

/// 在线程池上运行一个同步操作并等待其结果
async fn run<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    task::spawn_blocking(f)
        .await
        .map_err(|_| Error::new(ErrorKind::Os, "xattr worker dropped the result"))?
}

/// 读取扩展属性值（非阻塞）
///
/// 语义与 [`api::get`] 完全一致：属性不存在返回 `None`，
/// 路径不存在返回 [`ErrorKind::NotFound`] 错误。
pub async fn get<P: AsRef<Path>>(path: P, attr_name: &str) -> Result<Option<Vec<u8>>> {
    let path = path.as_ref().to_path_buf();
    let attr_name = attr_name.to_owned();
    run(move || api::get(&path, &attr_name)).await
}

/// 读取符号链接自身的扩展属性值（非阻塞，不跟随链接）
pub async fn get_link<P: AsRef<Path>>(path: P, attr_name: &str) -> Result<Option<Vec<u8>>> {
    let path = path.as_ref().to_path_buf();
    let attr_name = attr_name.to_owned();
    run(move || api::get_link(&path, &attr_name)).await
}

/// 写入扩展属性值（非阻塞，完整覆盖）
///
/// 语义与 [`api::set`] 完全一致。
pub async fn set<P: AsRef<Path>>(path: P, attr_name: &str, value: &[u8]) -> Result<()> {
    let path = path.as_ref().to_path_buf();
    let attr_name = attr_name.to_owned();
    let value = value.to_vec();
    run(move || api::set(&path, &attr_name, &value)).await
}

/// 写入符号链接自身的扩展属性值（非阻塞，不跟随链接）
pub async fn set_link<P: AsRef<Path>>(path: P, attr_name: &str, value: &[u8]) -> Result<()> {
    let path = path.as_ref().to_path_buf();
    let attr_name = attr_name.to_owned();
    let value = value.to_vec();
    run(move || api::set_link(&path, &attr_name, &value)).await
}

/// 按 create/replace 语义写入扩展属性值（非阻塞）
///
/// 语义与 [`api::set_with_flags`] 完全一致。
pub async fn set_with_flags<P: AsRef<Path>>(
    path: P,
    attr_name: &str,
    value: &[u8],
    flags: SetFlags,
) -> Result<()> {
    let path = path.as_ref().to_path_buf();
    let attr_name = attr_name.to_owned();
    let value = value.to_vec();
    run(move || api::set_with_flags(&path, &attr_name, &value, flags)).await
}

/// 列出路径上的全部扩展属性名（非阻塞）
///
/// 语义与 [`api::list`] 完全一致。
pub async fn list<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref().to_path_buf();
    run(move || api::list(&path)).await
}

/// 列出符号链接自身的全部扩展属性名（非阻塞，不跟随链接）
pub async fn list_link<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref().to_path_buf();
    run(move || api::list_link(&path)).await
}

/// 删除扩展属性（非阻塞，幂等）
///
/// 语义与 [`api::remove`] 完全一致：属性已不存在视为成功。
pub async fn remove<P: AsRef<Path>>(path: P, attr_name: &str) -> Result<()> {
    let path = path.as_ref().to_path_buf();
    let attr_name = attr_name.to_owned();
    run(move || api::remove(&path, &attr_name)).await
}

/// 删除符号链接自身的扩展属性（非阻塞，不跟随链接）
pub async fn remove_link<P: AsRef<Path>>(path: P, attr_name: &str) -> Result<()> {
    let path = path.as_ref().to_path_buf();
    let attr_name = attr_name.to_owned();
    run(move || api::remove_link(&path, &attr_name)).await
}

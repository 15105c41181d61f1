//! 同步公共 API
//!
//! 提供阻塞形式的四个扩展属性操作：get / set / list / remove，
//! 以及它们作用于符号链接自身的 `*_link` 变体。
//!
//! 本层是契约层，负责把 `sys` 层的原始结果翻译成调用方的模型：
//!
//! - 「属性不存在」在读取时不是错误，返回 `None`
//! - 「属性已不存在」在删除时不是错误，返回 `Ok(())`（幂等删除）
//! - 其余所有 OS 错误码按 [`crate::ErrorKind`] 分类后原样传出，
//!   不重试、不回退、不做任何本地恢复
//!
//! 对应的非阻塞形式见 [`crate::nonblocking`]，两者对相同输入
//! 产生逐字节一致的结果和一致的错误分类。

use std::path::Path;

use crate::error::{Error, ErrorKind, Result};
use crate::name;
use crate::sys;
use crate::types::SetFlags;

#[cfg(unix)]
fn validate_path(path: &Path) -> Result<()> {
    use std::os::unix::ffi::OsStrExt;
    if path.as_os_str().as_bytes().contains(&0) {
        return Err(Error::new(
            ErrorKind::InvalidInput,
            "path contains NUL byte",
        ));
    }
    Ok(())
}

#[cfg(not(unix))]
fn validate_path(_path: &Path) -> Result<()> {
    Ok(())
}

fn get_impl(path: &Path, attr_name: &str, follow: bool) -> Result<Option<Vec<u8>>> {
    name::validate(attr_name)?;
    validate_path(path)?;
    log::trace!("[XATTR] get path={:?} name={}", path, attr_name);

    match sys::get(path, attr_name, follow) {
        Ok(value) => Ok(Some(value)),
        Err(err) if sys::is_attr_missing(&err) => Ok(None),
        Err(err) => Err(Error::from_os(err, "getxattr failed")),
    }
}

fn set_impl(
    path: &Path,
    attr_name: &str,
    value: &[u8],
    flags: SetFlags,
    follow: bool,
) -> Result<()> {
    name::validate(attr_name)?;
    validate_path(path)?;
    log::trace!(
        "[XATTR] set path={:?} name={} value_len={}",
        path,
        attr_name,
        value.len()
    );

    sys::set(path, attr_name, value, flags, follow)
        .map_err(|err| Error::from_os(err, "setxattr failed"))
}

fn list_impl(path: &Path, follow: bool) -> Result<Vec<String>> {
    validate_path(path)?;
    log::trace!("[XATTR] list path={:?}", path);

    let raw = sys::list(path, follow).map_err(|err| Error::from_os(err, "listxattr failed"))?;

    // 内核返回 NUL 分隔的名称序列
    let mut names = Vec::new();
    for chunk in raw.split(|b| *b == 0) {
        if chunk.is_empty() {
            continue;
        }
        let s = std::str::from_utf8(chunk).map_err(|_| {
            Error::new(ErrorKind::InvalidInput, "attribute name is not valid UTF-8")
        })?;
        names.push(s.to_owned());
    }
    Ok(names)
}

fn remove_impl(path: &Path, attr_name: &str, follow: bool) -> Result<()> {
    name::validate(attr_name)?;
    validate_path(path)?;
    log::trace!("[XATTR] remove path={:?} name={}", path, attr_name);

    match sys::remove(path, attr_name, follow) {
        Ok(()) => Ok(()),
        // 幂等删除：属性已不存在视为成功
        Err(err) if sys::is_attr_missing(&err) => Ok(()),
        Err(err) => Err(Error::from_os(err, "removexattr failed")),
    }
}

/// 读取扩展属性值
///
/// 返回属性的完整字节序列。属性不存在时返回 `None`（不是错误）；
/// 路径不存在时返回 [`ErrorKind::NotFound`] 错误。
///
/// # 示例
///
/// ```no_run
/// # fn main() -> fsxattr_core::Result<()> {
/// let value = fsxattr_core::get("data.bin", "user.comment")?;
/// if let Some(bytes) = value {
///     println!("comment: {} bytes", bytes.len());
/// }
/// # Ok(())
/// # }
/// ```
pub fn get<P: AsRef<Path>>(path: P, attr_name: &str) -> Result<Option<Vec<u8>>> {
    get_impl(path.as_ref(), attr_name, true)
}

/// 读取符号链接自身的扩展属性值（不跟随链接）
pub fn get_link<P: AsRef<Path>>(path: P, attr_name: &str) -> Result<Option<Vec<u8>>> {
    get_impl(path.as_ref(), attr_name, false)
}

/// 写入扩展属性值（完整覆盖，不是追加）
///
/// 路径不存在时返回 [`ErrorKind::NotFound`]，权限不足时返回
/// [`ErrorKind::PermissionDenied`]，文件系统不支持时返回
/// [`ErrorKind::Unsupported`]，其余系统调用失败（值过大、空间不足等）
/// 返回 [`ErrorKind::Os`]。
pub fn set<P: AsRef<Path>>(path: P, attr_name: &str, value: &[u8]) -> Result<()> {
    set_impl(path.as_ref(), attr_name, value, SetFlags::empty(), true)
}

/// 写入符号链接自身的扩展属性值（不跟随链接）
pub fn set_link<P: AsRef<Path>>(path: P, attr_name: &str, value: &[u8]) -> Result<()> {
    set_impl(path.as_ref(), attr_name, value, SetFlags::empty(), false)
}

/// 按 create/replace 语义写入扩展属性值
///
/// [`SetFlags::CREATE`] 时属性已存在则失败（EEXIST），
/// [`SetFlags::REPLACE`] 时属性不存在则失败。
/// `SetFlags::empty()` 与 [`set`] 行为完全相同。
pub fn set_with_flags<P: AsRef<Path>>(
    path: P,
    attr_name: &str,
    value: &[u8],
    flags: SetFlags,
) -> Result<()> {
    set_impl(path.as_ref(), attr_name, value, flags, true)
}

/// 列出路径上的全部扩展属性名
///
/// 没有任何属性时返回空列表。顺序由操作系统决定，不保证稳定。
/// 名称不是合法 UTF-8 时返回 [`ErrorKind::InvalidInput`] 错误。
pub fn list<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    list_impl(path.as_ref(), true)
}

/// 列出符号链接自身的全部扩展属性名（不跟随链接）
pub fn list_link<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    list_impl(path.as_ref(), false)
}

/// 删除扩展属性
///
/// 幂等：属性已不存在时同样返回成功，重复删除不会报错。
/// 路径不存在时返回 [`ErrorKind::NotFound`] 错误。
pub fn remove<P: AsRef<Path>>(path: P, attr_name: &str) -> Result<()> {
    remove_impl(path.as_ref(), attr_name, true)
}

/// 删除符号链接自身的扩展属性（不跟随链接）
pub fn remove_link<P: AsRef<Path>>(path: P, attr_name: &str) -> Result<()> {
    remove_impl(path.as_ref(), attr_name, false)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ATTRIBUTE0: &str = "user.linusu.test";
    const ATTRIBUTE1: &str = "user.linusu.secondary";

    /// 生成 n 字节随机数据的十六进制字符串（2n 个字符）
    fn random_hex(n: usize) -> String {
        use rand::RngCore;

        let mut bytes = vec![0u8; n];
        rand::thread_rng().fill_bytes(&mut bytes);
        bytes.iter().map(|b| format!("{b:02x}")).collect()
    }

    fn scratch_file() -> tempfile::NamedTempFile {
        tempfile::NamedTempFile::new().expect("create temp file")
    }

    /// 探测临时目录所在文件系统是否支持 user.* 属性，
    /// 不支持时跳过依赖真实 xattr 的测试
    fn xattr_supported(path: &Path) -> bool {
        match set(path, "user.fsxattr.probe", b"1") {
            Ok(()) => {
                remove(path, "user.fsxattr.probe").expect("remove probe attribute");
                true
            }
            Err(err) if err.kind() == ErrorKind::Unsupported => false,
            Err(err) => panic!("unexpected probe failure: {err}"),
        }
    }

    #[test]
    fn test_set_then_get_roundtrip() {
        let file = scratch_file();
        if !xattr_supported(file.path()) {
            return;
        }

        let payload = random_hex(24);
        set(file.path(), ATTRIBUTE0, payload.as_bytes()).expect("set");

        let value = get(file.path(), ATTRIBUTE0).expect("get");
        assert_eq!(value.as_deref(), Some(payload.as_bytes()));
    }

    #[test]
    fn test_set_overwrites_value() {
        let file = scratch_file();
        if !xattr_supported(file.path()) {
            return;
        }

        set(file.path(), ATTRIBUTE0, b"first-longer-value").expect("set");
        set(file.path(), ATTRIBUTE0, b"second").expect("overwrite");

        let value = get(file.path(), ATTRIBUTE0).expect("get");
        assert_eq!(value.as_deref(), Some(&b"second"[..]));
    }

    #[test]
    fn test_binary_value_roundtrip() {
        let file = scratch_file();
        if !xattr_supported(file.path()) {
            return;
        }

        // 值是不透明字节序列，内嵌 NUL 也必须原样保存
        let payload = [0u8, 1, 2, 0, 255, 0];
        set(file.path(), ATTRIBUTE0, &payload).expect("set");

        let value = get(file.path(), ATTRIBUTE0).expect("get");
        assert_eq!(value.as_deref(), Some(&payload[..]));
    }

    #[test]
    fn test_get_missing_attribute_returns_none() {
        let file = scratch_file();
        if !xattr_supported(file.path()) {
            return;
        }

        let value = get(file.path(), "user.fsxattr.never-set").expect("get");
        assert_eq!(value, None);
    }

    #[test]
    fn test_remove_then_get_returns_none() {
        let file = scratch_file();
        if !xattr_supported(file.path()) {
            return;
        }

        set(file.path(), ATTRIBUTE0, b"value").expect("set");
        remove(file.path(), ATTRIBUTE0).expect("remove");

        let value = get(file.path(), ATTRIBUTE0).expect("get");
        assert_eq!(value, None);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let file = scratch_file();
        if !xattr_supported(file.path()) {
            return;
        }

        // 从未设置过的属性，重复删除两次都必须成功
        remove(file.path(), ATTRIBUTE0).expect("first remove");
        remove(file.path(), ATTRIBUTE0).expect("second remove");
    }

    #[test]
    fn test_list_includes_and_excludes() {
        let file = scratch_file();
        if !xattr_supported(file.path()) {
            return;
        }

        set(file.path(), ATTRIBUTE0, b"a").expect("set");
        set(file.path(), ATTRIBUTE1, b"b").expect("set");

        let names = list(file.path()).expect("list");
        assert!(names.iter().any(|n| n == ATTRIBUTE0));
        assert!(names.iter().any(|n| n == ATTRIBUTE1));

        remove(file.path(), ATTRIBUTE0).expect("remove");

        let names = list(file.path()).expect("list");
        assert!(!names.iter().any(|n| n == ATTRIBUTE0));
        assert!(names.iter().any(|n| n == ATTRIBUTE1));
    }

    #[test]
    fn test_list_empty_when_no_attributes() {
        let file = scratch_file();
        if !xattr_supported(file.path()) {
            return;
        }

        let names = list(file.path()).expect("list");
        assert!(names.is_empty());
    }

    #[test]
    fn test_two_attribute_scenario() {
        let file = scratch_file();
        if !xattr_supported(file.path()) {
            return;
        }

        let payload0 = random_hex(24);
        let payload1 = random_hex(24);
        assert_ne!(payload0, payload1);

        set(file.path(), ATTRIBUTE0, payload0.as_bytes()).expect("set");
        set(file.path(), ATTRIBUTE1, payload1.as_bytes()).expect("set");

        let names = list(file.path()).expect("list");
        assert!(names.iter().any(|n| n == ATTRIBUTE0));
        assert!(names.iter().any(|n| n == ATTRIBUTE1));

        let value0 = get(file.path(), ATTRIBUTE0).expect("get");
        let value1 = get(file.path(), ATTRIBUTE1).expect("get");
        assert_eq!(value0.as_deref(), Some(payload0.as_bytes()));
        assert_eq!(value1.as_deref(), Some(payload1.as_bytes()));

        remove(file.path(), ATTRIBUTE0).expect("remove");
        remove(file.path(), ATTRIBUTE1).expect("remove");

        assert_eq!(get(file.path(), ATTRIBUTE0).expect("get"), None);
        assert_eq!(get(file.path(), ATTRIBUTE1).expect("get"), None);
    }

    #[test]
    fn test_missing_path_reports_not_found() {
        let path = Path::new("/nonexistent/fsxattr-api-test");

        let err = get(path, ATTRIBUTE0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let err = set(path, ATTRIBUTE0, b"value").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let err = list(path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let err = remove(path, ATTRIBUTE0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_empty_name_is_invalid_input() {
        let file = scratch_file();

        let err = get(file.path(), "").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);

        let err = set(file.path(), "", b"value").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);

        let err = remove(file.path(), "").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_set_with_flags_create_and_replace() {
        let file = scratch_file();
        if !xattr_supported(file.path()) {
            return;
        }

        // REPLACE 要求属性已存在
        let err =
            set_with_flags(file.path(), ATTRIBUTE0, b"value", SetFlags::REPLACE).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Os);

        // CREATE 首次成功，再次失败（EEXIST）
        set_with_flags(file.path(), ATTRIBUTE0, b"value", SetFlags::CREATE).expect("create");
        let err = set_with_flags(file.path(), ATTRIBUTE0, b"other", SetFlags::CREATE).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Os);
        assert_eq!(err.errno(), Some(libc::EEXIST));

        // 属性存在后 REPLACE 成功
        set_with_flags(file.path(), ATTRIBUTE0, b"replaced", SetFlags::REPLACE).expect("replace");
        let value = get(file.path(), ATTRIBUTE0).expect("get");
        assert_eq!(value.as_deref(), Some(&b"replaced"[..]));
    }

    #[test]
    fn test_link_variants_on_regular_file() {
        // 对普通文件，link 变体直接作用于文件本身
        let file = scratch_file();
        if !xattr_supported(file.path()) {
            return;
        }

        set_link(file.path(), ATTRIBUTE0, b"link-value").expect("set_link");

        let value = get_link(file.path(), ATTRIBUTE0).expect("get_link");
        assert_eq!(value.as_deref(), Some(&b"link-value"[..]));

        let names = list_link(file.path()).expect("list_link");
        assert!(names.iter().any(|n| n == ATTRIBUTE0));

        remove_link(file.path(), ATTRIBUTE0).expect("remove_link");
        assert_eq!(get_link(file.path(), ATTRIBUTE0).expect("get_link"), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_link_variants_do_not_follow_symlink() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let target = dir.path().join("target");
        std::fs::write(&target, b"").expect("create target file");
        if !xattr_supported(&target) {
            return;
        }

        let link = dir.path().join("link");
        std::os::unix::fs::symlink(&target, &link).expect("create symlink");

        // 跟随变体经符号链接写到目标文件上
        set(&link, ATTRIBUTE0, b"through-link").expect("set through link");
        let value = get(&target, ATTRIBUTE0).expect("get on target");
        assert_eq!(value.as_deref(), Some(&b"through-link"[..]));

        // 不跟随变体看链接自身，看不到目标上的属性
        assert_eq!(get_link(&link, ATTRIBUTE0).expect("get_link"), None);
        let names = list_link(&link).expect("list_link");
        assert!(!names.iter().any(|n| n == ATTRIBUTE0));

        // 对链接自身写入：Linux 禁止在符号链接上放 user.* 属性（EPERM）；
        // 允许的平台上属性只落在链接自身，两种情况下目标都不受影响
        match set_link(&link, ATTRIBUTE1, b"on-link") {
            Ok(()) => {
                let value = get_link(&link, ATTRIBUTE1).expect("get_link");
                assert_eq!(value.as_deref(), Some(&b"on-link"[..]));
            }
            Err(err) => assert_eq!(err.kind(), ErrorKind::PermissionDenied),
        }
        assert_eq!(get(&target, ATTRIBUTE1).expect("get on target"), None);

        let names = list(&target).expect("list on target");
        assert!(names.iter().any(|n| n == ATTRIBUTE0));
        assert!(!names.iter().any(|n| n == ATTRIBUTE1));
    }
}

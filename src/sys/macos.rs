//! macOS / iOS 平台的 xattr 系统调用封装
//!
//! Darwin 的系统调用带 `position` 和 `options` 参数：
//! - `position` 仅对资源派生属性有意义，这里恒为 0
//! - 不跟随符号链接通过 `XATTR_NOFOLLOW` 选项位表达，而非 l 前缀函数
//!
//! 「属性不存在」的 errno 是 `ENOATTR`。

use std::ffi::CString;
use std::io;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

use crate::types::SetFlags;

/// 判断错误是否表示「属性不存在」
pub fn is_attr_missing(err: &io::Error) -> bool {
    err.raw_os_error() == Some(libc::ENOATTR)
}

fn cstr(bytes: &[u8]) -> io::Result<CString> {
    // 内嵌 NUL 在 api 层已拒绝，这里仅作兜底
    CString::new(bytes).map_err(|_| io::Error::from_raw_os_error(libc::EINVAL))
}

fn base_options(follow: bool) -> libc::c_int {
    if follow {
        0
    } else {
        libc::XATTR_NOFOLLOW
    }
}

fn native_set_options(flags: SetFlags, follow: bool) -> libc::c_int {
    let mut raw = base_options(follow);
    if flags.contains(SetFlags::CREATE) {
        raw |= libc::XATTR_CREATE;
    }
    if flags.contains(SetFlags::REPLACE) {
        raw |= libc::XATTR_REPLACE;
    }
    raw
}

/// 读取属性值
///
/// 与内核协商缓冲区大小：先以零长缓冲区探测，再分配并读取。
/// 两次调用之间属性被并发改大时内核返回 `ERANGE`，此时重新协商。
pub fn get(path: &Path, name: &str, follow: bool) -> io::Result<Vec<u8>> {
    let path = cstr(path.as_os_str().as_bytes())?;
    let name = cstr(name.as_bytes())?;
    let options = base_options(follow);

    loop {
        let size = unsafe {
            libc::getxattr(
                path.as_ptr(),
                name.as_ptr(),
                std::ptr::null_mut(),
                0,
                0,
                options,
            )
        };
        if size < 0 {
            return Err(io::Error::last_os_error());
        }

        let mut buf = vec![0u8; size as usize];
        let ret = unsafe {
            libc::getxattr(
                path.as_ptr(),
                name.as_ptr(),
                buf.as_mut_ptr().cast(),
                buf.len(),
                0,
                options,
            )
        };
        if ret >= 0 {
            buf.truncate(ret as usize);
            return Ok(buf);
        }

        let err = io::Error::last_os_error();
        if err.raw_os_error() != Some(libc::ERANGE) {
            return Err(err);
        }
        log::debug!("[XATTR] getxattr value grew concurrently, renegotiating buffer");
    }
}

/// 写入属性值（完整覆盖或按 flags 的 create/replace 语义）
pub fn set(path: &Path, name: &str, value: &[u8], flags: SetFlags, follow: bool) -> io::Result<()> {
    let path = cstr(path.as_os_str().as_bytes())?;
    let name = cstr(name.as_bytes())?;
    let options = native_set_options(flags, follow);

    let ret = unsafe {
        libc::setxattr(
            path.as_ptr(),
            name.as_ptr(),
            value.as_ptr().cast(),
            value.len(),
            0,
            options,
        )
    };
    if ret < 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

/// 列出全部属性名，返回 NUL 分隔的原始字节
pub fn list(path: &Path, follow: bool) -> io::Result<Vec<u8>> {
    let path = cstr(path.as_os_str().as_bytes())?;
    let options = base_options(follow);

    loop {
        let size = unsafe { libc::listxattr(path.as_ptr(), std::ptr::null_mut(), 0, options) };
        if size < 0 {
            return Err(io::Error::last_os_error());
        }

        let mut buf = vec![0u8; size as usize];
        let ret =
            unsafe { libc::listxattr(path.as_ptr(), buf.as_mut_ptr().cast(), buf.len(), options) };
        if ret >= 0 {
            buf.truncate(ret as usize);
            return Ok(buf);
        }

        let err = io::Error::last_os_error();
        if err.raw_os_error() != Some(libc::ERANGE) {
            return Err(err);
        }
        log::debug!("[XATTR] listxattr name list grew concurrently, renegotiating buffer");
    }
}

/// 删除属性
///
/// 属性不存在时内核返回 `ENOATTR`，原样传出；
/// 幂等化（改写为成功）在 api 层完成。
pub fn remove(path: &Path, name: &str, follow: bool) -> io::Result<()> {
    let path = cstr(path.as_os_str().as_bytes())?;
    let name = cstr(name.as_bytes())?;
    let options = base_options(follow);

    let ret = unsafe { libc::removexattr(path.as_ptr(), name.as_ptr(), options) };
    if ret < 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

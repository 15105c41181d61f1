//! Linux / Android 平台的 xattr 系统调用封装
//!
//! 跟随符号链接时使用 `getxattr` 家族，不跟随时使用 `lgetxattr` 家族。
//! 「属性不存在」的 errno 是 `ENODATA`。

use std::ffi::CString;
use std::io;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

use crate::types::SetFlags;

/// getxattr / lgetxattr 的函数指针类型
type GetFn = unsafe extern "C" fn(
    *const libc::c_char,
    *const libc::c_char,
    *mut libc::c_void,
    libc::size_t,
) -> libc::ssize_t;

/// listxattr / llistxattr 的函数指针类型
type ListFn =
    unsafe extern "C" fn(*const libc::c_char, *mut libc::c_char, libc::size_t) -> libc::ssize_t;

/// 判断错误是否表示「属性不存在」
pub fn is_attr_missing(err: &io::Error) -> bool {
    err.raw_os_error() == Some(libc::ENODATA)
}

fn cstr(bytes: &[u8]) -> io::Result<CString> {
    // 内嵌 NUL 在 api 层已拒绝，这里仅作兜底
    CString::new(bytes).map_err(|_| io::Error::from_raw_os_error(libc::EINVAL))
}

fn native_set_flags(flags: SetFlags) -> libc::c_int {
    let mut raw = 0;
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
    let func: GetFn = if follow {
        libc::getxattr
    } else {
        libc::lgetxattr
    };

    loop {
        let size = unsafe { func(path.as_ptr(), name.as_ptr(), std::ptr::null_mut(), 0) };
        if size < 0 {
            return Err(io::Error::last_os_error());
        }

        let mut buf = vec![0u8; size as usize];
        let ret = unsafe {
            func(
                path.as_ptr(),
                name.as_ptr(),
                buf.as_mut_ptr().cast(),
                buf.len(),
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
    let raw_flags = native_set_flags(flags);

    let ret = unsafe {
        if follow {
            libc::setxattr(
                path.as_ptr(),
                name.as_ptr(),
                value.as_ptr().cast(),
                value.len(),
                raw_flags,
            )
        } else {
            libc::lsetxattr(
                path.as_ptr(),
                name.as_ptr(),
                value.as_ptr().cast(),
                value.len(),
                raw_flags,
            )
        }
    };
    if ret < 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

/// 列出全部属性名，返回 NUL 分隔的原始字节
pub fn list(path: &Path, follow: bool) -> io::Result<Vec<u8>> {
    let path = cstr(path.as_os_str().as_bytes())?;
    let func: ListFn = if follow {
        libc::listxattr
    } else {
        libc::llistxattr
    };

    loop {
        let size = unsafe { func(path.as_ptr(), std::ptr::null_mut(), 0) };
        if size < 0 {
            return Err(io::Error::last_os_error());
        }

        let mut buf = vec![0u8; size as usize];
        let ret = unsafe { func(path.as_ptr(), buf.as_mut_ptr().cast(), buf.len()) };
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
/// 属性不存在时内核返回 `ENODATA`，原样传出；
/// 幂等化（改写为成功）在 api 层完成。
pub fn remove(path: &Path, name: &str, follow: bool) -> io::Result<()> {
    let path = cstr(path.as_os_str().as_bytes())?;
    let name = cstr(name.as_bytes())?;

    let ret = unsafe {
        if follow {
            libc::removexattr(path.as_ptr(), name.as_ptr())
        } else {
            libc::lremovexattr(path.as_ptr(), name.as_ptr())
        }
    };
    if ret < 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

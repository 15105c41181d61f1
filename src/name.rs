//! 属性名处理
//!
//! 属性名的基本校验，以及命名空间前缀的拆分辅助函数。
//!
//! 注意：命名空间规则（哪些前缀合法、访问权限如何）由操作系统定义，
//! 本层不做强制；[`split_namespace`] 仅是便利函数。
//! 本层强制的只有两条：属性名非空、不含 NUL 字节。

use crate::consts::*;
use crate::error::{Error, ErrorKind, Result};

/// 命名空间前缀表条目
struct NamespacePrefix {
    prefix: &'static str,
}

/// 命名空间前缀表
///
/// 常见的四个 OS 命名空间；不在表内的前缀不视为错误。
static PREFIX_TABLE: &[NamespacePrefix] = &[
    NamespacePrefix {
        prefix: XATTR_NAMESPACE_USER,
    },
    NamespacePrefix {
        prefix: XATTR_NAMESPACE_TRUSTED,
    },
    NamespacePrefix {
        prefix: XATTR_NAMESPACE_SECURITY,
    },
    NamespacePrefix {
        prefix: XATTR_NAMESPACE_SYSTEM,
    },
];

/// 校验属性名
///
/// 只做本层自己的契约检查：
/// - 属性名必须非空
/// - 属性名不能包含 NUL 字节（无法传给 C 系统调用）
///
/// 其余规则（长度上限、前缀合法性）留给操作系统判定。
pub fn validate(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::new(ErrorKind::InvalidInput, "empty xattr name"));
    }
    if name.as_bytes().contains(&0) {
        return Err(Error::new(
            ErrorKind::InvalidInput,
            "xattr name contains NUL byte",
        ));
    }
    Ok(())
}

/// 从完整属性名中拆分命名空间前缀和剩余名称
///
/// # 参数
///
/// * `full_name` - 完整的属性名（如 "user.comment"）
///
/// # 返回
///
/// 返回 (prefix, name)：
/// - `prefix` - 命名空间前缀（含结尾的 '.'）
/// - `name` - 去除前缀后的属性名
///
/// 前缀不在已知表内、或前缀后没有名称时返回 None。
///
/// # 示例
///
/// ```
/// use fsxattr_core::name::split_namespace;
///
/// let result = split_namespace("user.comment");
/// assert_eq!(result, Some(("user.", "comment")));
/// ```
pub fn split_namespace(full_name: &str) -> Option<(&'static str, &str)> {
    if full_name.is_empty() {
        return None;
    }

    for entry in PREFIX_TABLE {
        let prefix = entry.prefix;

        if full_name.starts_with(prefix) {
            let name = &full_name[prefix.len()..];

            // 前缀后必须有实际名称
            if name.is_empty() {
                return None;
            }

            return Some((prefix, name));
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_user_namespace() {
        let result = split_namespace("user.comment");
        assert_eq!(result, Some(("user.", "comment")));
    }

    #[test]
    fn test_split_security_namespace() {
        let result = split_namespace("security.selinux");
        assert_eq!(result, Some(("security.", "selinux")));
    }

    #[test]
    fn test_split_empty_name_after_prefix() {
        // "user." 后面没有名称，应该失败
        let result = split_namespace("user.");
        assert_eq!(result, None);
    }

    #[test]
    fn test_split_unknown_prefix() {
        let result = split_namespace("invalid.name");
        assert_eq!(result, None);
    }

    #[test]
    fn test_validate_ok() {
        assert!(validate("user.comment").is_ok());
        // 本层不强制前缀规则
        assert!(validate("no-namespace").is_ok());
    }

    #[test]
    fn test_validate_empty() {
        let err = validate("").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_validate_nul_byte() {
        let err = validate("user.bad\0name").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }
}

//! 数据结构定义

use bitflags::bitflags;

bitflags! {
    /// setxattr 标志
    ///
    /// 对应系统调用的 `XATTR_CREATE` / `XATTR_REPLACE` 语义。
    /// 位值是本库自己的表示；各平台的原生常量值不同
    /// （macOS 上 `XATTR_CREATE` 是 0x2），由 `sys` 层翻译。
    /// 空标志（默认）表示无条件覆盖写入。
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct SetFlags: u32 {
        /// 仅创建：属性已存在时失败（EEXIST）
        const CREATE  = 0x1;
        /// 仅替换：属性不存在时失败（ENODATA / ENOATTR）
        const REPLACE = 0x2;
    }
}

//! 名称安全化模块
//!
//! 将书名、部名和章节名转换为可以安全用作目录名或文件名的形式。

use percent_encoding::{CONTROLS, utf8_percent_encode};

/// 将任意文本转换为文件系统安全的名称
///
/// 转换依次执行以下步骤：
/// 1. 全部转换为小写
/// 2. 空白字符替换为连字符
/// 3. 只保留字母数字以及连字符、下划线和百分号
/// 4. 对非ASCII字符进行百分号编码
///
/// 编码产生的十六进制统一为小写，同一输入无论处理多少次结果都相同。
///
/// # 参数
///
/// * `name` - 原始名称文本
///
/// # 返回值
///
/// * `String` - 文件系统安全的名称
///
/// # 示例
///
/// ```rust
/// use corpusforge::convert::sanitize_name;
///
/// assert_eq!(sanitize_name("Hello World"), "hello-world");
/// assert_eq!(sanitize_name("第一章"), "%e7%ac%ac%e4%b8%80%e7%ab%a0");
/// ```
pub fn sanitize_name(name: &str) -> String {
    let filtered: String = name
        .to_lowercase()
        .chars()
        .map(|c| if c.is_whitespace() { '-' } else { c })
        .filter(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '%'))
        .collect();

    utf8_percent_encode(&filtered, CONTROLS)
        .to_string()
        .to_lowercase()
}

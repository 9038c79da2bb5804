//! 语料转换模块
//!
//! 把EPUB电子书按导航结构转换为部和章节组成的纯文本目录树。
//!
//! 模块组成：
//! - `config` - 转换行为的YAML配置
//! - `converter` - 转换流程编排
//! - `meta` - 章节文件的元数据头
//! - `sanitize` - 目录名和文件名的安全化
//! - `text` - HTML章节内容到纯文本的转换

pub mod config;
pub mod converter;
pub mod meta;
pub mod sanitize;
pub mod text;

pub use config::ConvertConfig;
pub use converter::{ConvertSummary, Converter};
pub use meta::MetaHeader;
pub use sanitize::sanitize_name;
pub use text::{HtmlTextConverter, TextConverter};

//! OPF（Open Packaging Format）文件解析模块
//!
//! 此模块提供EPUB清单文件的解析功能，提取书名、作者以及NCX导航文件的引用。

mod book;
mod parser;

// 重新导出公共类型以保持API兼容性
pub use book::BookInfo;
pub use parser::DEFAULT_TOC_IDS;

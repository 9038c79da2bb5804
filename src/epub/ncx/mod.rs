//! NCX（Navigation Control file for XML）文件解析模块
//!
//! 此模块提供EPUB导航控制文件的解析功能。目录被还原为按文档顺序
//! 排列的扁平导航点序列，供语料转换流程逐一处理。

mod navigation;
mod parser;

// 重新导出公共类型以保持API兼容性
pub use navigation::NavPoint;
pub use parser::Ncx;

//! # CorpusForge
//!
//! 一个将EPUB电子书提取为纯文本语料目录树的Rust工具。
//!
//! 读取EPUB的导航信息，把书中的部建成目录，把章节转换为
//! 带元数据头的纯文本文件，供语料构建和文本分析流程使用。

pub mod convert;
pub mod epub;

// === 核心API重新导出 ===

/// EPUB文件读取器（主要接口）
pub use epub::Epub;

/// 语料转换器（主要接口）
pub use convert::{ConvertSummary, Converter};

/// 错误处理
pub use epub::{EpubError, Result};

// === 数据结构 ===

/// 书籍基本信息
pub use epub::BookInfo;

/// NCX导航信息
pub use epub::{NavPoint, Ncx};

/// 容器组件
pub use epub::{Container, RootFile};

/// 转换配置
pub use convert::ConvertConfig;

/// 文本转换组件
pub use convert::{HtmlTextConverter, TextConverter};

// === 库信息 ===

/// CorpusForge库的版本信息
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// CorpusForge库的描述
pub const DESCRIPTION: &str = "一个将EPUB电子书提取为纯文本语料目录树的Rust工具";

/// 库的主页
pub const HOMEPAGE: &str = "https://github.com/FWW321/corpusforge";

// === 便捷函数 ===

/// 快速打开EPUB文件
///
/// 这是 `Epub::new` 的便捷包装函数。
///
/// # 参数
/// * `path` - EPUB文件路径
///
/// # 返回值
/// * `Result<Epub>` - EPUB实例
///
/// # 示例
///
/// ```no_run
/// use corpusforge;
///
/// let mut epub = corpusforge::open("book.epub")?;
/// let info = epub.parse_book_info()?;
/// println!("书名: {}", info.title);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn open<P: AsRef<std::path::Path>>(path: P) -> Result<Epub> {
    Epub::new(path)
}

/// 将单个EPUB文件转换为语料目录树
///
/// 这是 `Converter::new().convert_file` 的便捷包装函数，
/// 在当前目录下生成以书名命名的输出目录。
///
/// # 参数
/// * `path` - EPUB文件路径
///
/// # 返回值
/// * `Result<ConvertSummary>` - 转换统计信息
///
/// # 示例
///
/// ```no_run
/// use corpusforge;
///
/// let summary = corpusforge::convert("book.epub")?;
/// println!("输出目录: {}", summary.output_dir.display());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn convert<P: AsRef<std::path::Path>>(path: P) -> Result<ConvertSummary> {
    Converter::new().convert_file(path)
}

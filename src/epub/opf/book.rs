//! 书籍信息模块
//!
//! 提供从OPF清单中提取的书籍核心信息的结构定义。

/// 从OPF清单中提取的书籍核心信息
#[derive(Debug, Clone, Default)]
pub struct BookInfo {
    /// 书名
    pub title: String,
    /// 作者
    pub author: String,
    /// NCX导航文件的href（相对于OPF所在目录）
    pub toc_href: String,
}

impl BookInfo {
    /// 创建空的书籍信息
    pub fn new() -> Self {
        Self::default()
    }

    /// 清单中是否声明了NCX导航文件
    pub fn has_toc_ref(&self) -> bool {
        !self.toc_href.is_empty()
    }

    /// 用于显示的书名，缺失时返回占位文本
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            "未知书名"
        } else {
            &self.title
        }
    }

    /// 用于显示的作者，缺失时返回占位文本
    pub fn display_author(&self) -> &str {
        if self.author.is_empty() {
            "未知作者"
        } else {
            &self.author
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_book_info_is_empty() {
        let info = BookInfo::new();
        assert!(info.title.is_empty());
        assert!(info.author.is_empty());
        assert!(!info.has_toc_ref());
    }

    #[test]
    fn test_display_fallbacks() {
        let info = BookInfo::new();
        assert_eq!(info.display_title(), "未知书名");
        assert_eq!(info.display_author(), "未知作者");

        let info = BookInfo {
            title: "测试书籍".to_string(),
            author: "测试作者".to_string(),
            toc_href: "toc.ncx".to_string(),
        };
        assert_eq!(info.display_title(), "测试书籍");
        assert_eq!(info.display_author(), "测试作者");
        assert!(info.has_toc_ref());
    }
}

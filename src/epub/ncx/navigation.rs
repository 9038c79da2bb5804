//! NCX导航元素数据结构定义
//!
//! 定义扁平化的导航点序列。导航点按文档顺序排列，
//! 原始的嵌套关系通过level字段还原。

/// NCX中的单个导航点
#[derive(Debug, Clone)]
pub struct NavPoint {
    /// 唯一标识符
    pub id: String,
    /// 声明的播放顺序
    pub play_order: u32,
    /// 嵌套深度（根导航点为0）
    pub level: u32,
    /// content元素的src引用（已做URL解码，可能带#片段）
    pub src: Option<String>,
    /// navLabel中的标签文本
    pub label: Option<String>,
}

impl NavPoint {
    /// 创建新的导航点，src与label由后续解析事件填充
    pub fn new(id: String, play_order: u32, level: u32) -> Self {
        Self {
            id,
            play_order,
            level,
            src: None,
            label: None,
        }
    }

    /// 标签文本，未设置时返回空字符串
    pub fn label_text(&self) -> &str {
        self.label.as_deref().unwrap_or("")
    }

    /// 去掉#片段后的src路径
    pub fn src_path(&self) -> Option<&str> {
        self.src.as_deref().map(|s| s.split('#').next().unwrap_or(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_nav_point() {
        let point = NavPoint::new("navPoint-1".to_string(), 1, 0);
        assert_eq!(point.id, "navPoint-1");
        assert_eq!(point.play_order, 1);
        assert_eq!(point.level, 0);
        assert!(point.src.is_none());
        assert!(point.label.is_none());
    }

    #[test]
    fn test_label_text_fallback() {
        let mut point = NavPoint::new("p1".to_string(), 1, 0);
        assert_eq!(point.label_text(), "");

        point.label = Some("第一章".to_string());
        assert_eq!(point.label_text(), "第一章");
    }

    #[test]
    fn test_src_path_strips_fragment() {
        let mut point = NavPoint::new("p1".to_string(), 1, 0);
        assert_eq!(point.src_path(), None);

        point.src = Some("chapter1.html#section2".to_string());
        assert_eq!(point.src_path(), Some("chapter1.html"));

        point.src = Some("chapter1.html".to_string());
        assert_eq!(point.src_path(), Some("chapter1.html"));
    }
}

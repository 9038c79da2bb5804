//! 章节文本转换模块
//!
//! 将章节的原始HTML内容转换为适合语料使用的纯文本。

use crate::epub::error::{EpubError, Result};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

/// body元素选择器
static BODY_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("body").unwrap());

/// 章节原始内容到正文文本的转换接口
///
/// 转换器接收章节条目的原始字节，返回写入章节文件的正文文本。
pub trait TextConverter {
    /// 将章节原始内容转换为纯文本
    ///
    /// # 参数
    ///
    /// * `content` - 章节条目的原始字节
    ///
    /// # 返回值
    ///
    /// * `Result<String>` - 成功时返回正文文本，失败时返回错误
    fn convert(&self, content: &[u8]) -> Result<String>;
}

/// 基于HTML解析的默认文本转换器
///
/// 解析章节HTML后按文档结构提取文本：
/// 1. 跳过文档头部、脚本和媒体元素
/// 2. 块级元素结束时补换行，`<br>`转换为换行
/// 3. 压缩文本节点内部的连续空白
/// 4. 正确处理HTML实体（如&amp;nbsp;、&amp;lt;等）
#[derive(Debug, Default)]
pub struct HtmlTextConverter;

impl HtmlTextConverter {
    /// 创建默认文本转换器
    pub fn new() -> Self {
        Self
    }

    /// 将HTML转换为纯文本
    fn convert_html_to_text(html: &str) -> String {
        // 解析HTML文档
        let document = Html::parse_document(html);

        // 选择body元素，如果没有body则处理整个文档
        let mut text = String::new();
        if let Some(body) = document.select(&BODY_SELECTOR).next() {
            Self::process_element(body, &mut text);
        } else {
            Self::process_element(document.root_element(), &mut text);
        }

        // 清理多余的连续换行符，但保持段落间的分隔
        Self::clean_excessive_newlines(&text)
    }

    /// 处理HTML元素以提取文本
    fn process_element(element: ElementRef, result: &mut String) {
        let tag_name = element.value().name();

        // 跳过文档头部和脚本相关标签
        if matches!(
            tag_name,
            "head" | "script" | "style" | "meta" | "link" | "title" | "base" | "noscript"
        ) {
            return;
        }

        // 跳过媒体标签和相关元素
        if matches!(
            tag_name,
            "img" | "svg" | "video" | "audio" | "canvas" | "embed" | "object"
                | "iframe" | "picture" | "source" | "track" | "param" | "area" | "map"
        ) {
            return;
        }

        // 跳过特定类型的表单输入元素（图像按钮等）
        if tag_name == "input" {
            if let Some(input_type) = element.value().attr("type") {
                if matches!(input_type, "image" | "file" | "hidden") {
                    return;
                }
            }
        }

        // 处理元素的文本内容
        for node in element.children() {
            match node.value() {
                scraper::node::Node::Text(text) => {
                    Self::push_normalized_text(text, result);
                }
                scraper::node::Node::Element(_) => {
                    if let Some(child_element) = ElementRef::wrap(node) {
                        Self::process_element(child_element, result);
                    }
                }
                _ => {}
            }
        }

        // 根据标签类型添加格式
        match tag_name {
            // 块级元素在结束时换行
            "div" | "p" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "blockquote" | "pre" => {
                result.push('\n');
            }
            // 列表和表格元素
            "ul" | "ol" | "li" | "table" | "tbody" | "thead" | "tr" => {
                result.push('\n');
            }
            // 换行标签
            "br" => {
                result.push('\n');
            }
            _ => {}
        }
    }

    /// 压缩文本节点内部的空白后追加到结果
    ///
    /// 文本节点内的连续空白压缩为单个空格。如果节点以空白开头或结尾，
    /// 在与相邻内容拼接处保留一个空格，保持行内元素之间的间隔。
    fn push_normalized_text(text: &str, result: &mut String) {
        let words: Vec<&str> = text.split_whitespace().collect();
        if words.is_empty() {
            return;
        }

        let has_leading = text.starts_with(|c: char| c.is_whitespace());
        if has_leading && !result.is_empty() && !result.ends_with(|c: char| c.is_whitespace()) {
            result.push(' ');
        }

        result.push_str(&words.join(" "));

        if text.ends_with(|c: char| c.is_whitespace()) {
            result.push(' ');
        }
    }

    /// 清理多余的连续换行符
    ///
    /// 超过2个的连续换行符压缩为2个，换行符前的行尾空格一并去除，
    /// 最后移除整体首尾的空白字符。
    fn clean_excessive_newlines(text: &str) -> String {
        let mut result = String::new();
        let mut newline_count = 0;
        let mut pending_spaces = String::new();

        for ch in text.chars() {
            match ch {
                '\n' => {
                    // 行尾的空格不进入结果
                    pending_spaces.clear();
                    newline_count += 1;
                    if newline_count <= 2 {
                        result.push('\n');
                    }
                }
                ' ' | '\t' => {
                    pending_spaces.push(ch);
                }
                _ => {
                    if !pending_spaces.is_empty() {
                        result.push_str(&pending_spaces);
                        pending_spaces.clear();
                    }
                    newline_count = 0;
                    result.push(ch);
                }
            }
        }

        // 移除开头和结尾的空白字符
        result.trim().to_string()
    }
}

impl TextConverter for HtmlTextConverter {
    fn convert(&self, content: &[u8]) -> Result<String> {
        let html = std::str::from_utf8(content)
            .map_err(|e| EpubError::ConversionError(format!("章节内容不是有效的UTF-8编码: {}", e)))?;

        Ok(Self::convert_html_to_text(html))
    }
}

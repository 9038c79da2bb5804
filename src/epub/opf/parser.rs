//! OPF解析器模块
//!
//! 以SAX风格遍历OPF清单，提取书名、作者以及NCX导航文件的引用。

use crate::epub::error::{EpubError, Result};
use crate::epub::opf::book::BookInfo;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

/// 清单中NCX条目的常见id取值
pub const DEFAULT_TOC_IDS: &[&str] = &["ncx", "toc", "ncxtoc"];

/// 文本捕获状态机
///
/// 记录当前是否位于书名/作者元素内部，并累积字符数据。
/// 缓冲区在对应元素关闭时取出并复位。
#[derive(Debug, Default)]
struct TextCapture {
    in_title: bool,
    in_author: bool,
    buffer: String,
}

impl TextCapture {
    fn open_title(&mut self) {
        self.in_title = true;
        self.buffer.clear();
    }

    fn open_author(&mut self) {
        self.in_author = true;
        self.buffer.clear();
    }

    fn push(&mut self, text: &str) {
        if self.in_title || self.in_author {
            self.buffer.push_str(text);
        }
    }

    fn close_title(&mut self) -> Option<String> {
        if !self.in_title {
            return None;
        }
        self.in_title = false;
        Some(std::mem::take(&mut self.buffer))
    }

    fn close_author(&mut self) -> Option<String> {
        if !self.in_author {
            return None;
        }
        self.in_author = false;
        Some(std::mem::take(&mut self.buffer))
    }
}

impl BookInfo {
    /// 解析OPF文件内容
    ///
    /// # 参数
    /// * `xml_content` - OPF文件的XML内容
    ///
    /// # 返回值
    /// * `Result<BookInfo, EpubError>` - 解析后的书籍信息
    pub fn parse_xml(xml_content: &str) -> Result<BookInfo> {
        Self::parse_xml_with_ids(xml_content, DEFAULT_TOC_IDS)
    }

    /// 使用指定的NCX id集合解析OPF文件内容
    ///
    /// # 参数
    /// * `xml_content` - OPF文件的XML内容
    /// * `toc_ids` - 清单中视为NCX条目的id集合（区分大小写的精确匹配）
    ///
    /// # 返回值
    /// * `Result<BookInfo, EpubError>` - 解析后的书籍信息
    pub fn parse_xml_with_ids(xml_content: &str, toc_ids: &[&str]) -> Result<BookInfo> {
        let mut reader = Reader::from_str(xml_content);
        reader.config_mut().trim_text(true);
        reader.config_mut().expand_empty_elements = true;

        let mut info = BookInfo::new();
        let mut capture = TextCapture::default();
        let mut buf = Vec::new();
        let mut current_section = String::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(ref e) => {
                    match e.local_name().as_ref() {
                        b"metadata" => {
                            current_section = "metadata".to_string();
                        }
                        b"manifest" => {
                            current_section = "manifest".to_string();
                        }
                        b"title" if current_section == "metadata" => {
                            capture.open_title();
                        }
                        b"creator" if current_section == "metadata" => {
                            capture.open_author();
                        }
                        b"item" if current_section == "manifest" => {
                            Self::parse_manifest_item(e, toc_ids, &mut info)?;
                        }
                        _ => {}
                    }
                }
                Event::End(ref e) => {
                    match e.local_name().as_ref() {
                        b"metadata" | b"manifest" => {
                            current_section.clear();
                        }
                        // 同名元素重复出现时，后出现者覆盖先出现者
                        b"title" => {
                            if let Some(text) = capture.close_title() {
                                info.title = text.trim().to_string();
                            }
                        }
                        b"creator" => {
                            if let Some(text) = capture.close_author() {
                                info.author = text.trim().to_string();
                            }
                        }
                        _ => {}
                    }
                }
                Event::Text(e) => {
                    capture.push(&e.unescape()?);
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(info)
    }

    /// 解析manifest中的item元素，命中NCX id时记录其href
    fn parse_manifest_item(
        e: &BytesStart,
        toc_ids: &[&str],
        info: &mut BookInfo,
    ) -> Result<()> {
        let mut id = None;
        let mut href = None;

        for attr_result in e.attributes() {
            let attr = attr_result.map_err(|err| EpubError::XmlError(quick_xml::Error::InvalidAttr(err)))?;
            match attr.key.local_name().as_ref() {
                b"id" => {
                    id = Some(String::from_utf8_lossy(&attr.value).to_string());
                }
                b"href" => {
                    href = Some(String::from_utf8_lossy(&attr.value).to_string());
                }
                _ => {}
            }
        }

        let id = id.ok_or_else(|| EpubError::OpfParseError(
            "manifest中的item元素缺少id属性".to_string()
        ))?;

        if toc_ids.contains(&id.as_str()) {
            let href = href.ok_or_else(|| EpubError::OpfParseError(
                format!("NCX清单项 {} 缺少href属性", id)
            ))?;
            info.toc_href = href;
        }

        Ok(())
    }
}

//! NCX解析器模块
//!
//! 提供NCX（Navigation Control file for XML）文件的XML解析功能。
//! navMap中的导航点被展开为按文档顺序排列的扁平序列，
//! 嵌套深度在进入navPoint时由打开栈的深度确定。

use crate::epub::error::{EpubError, Result};
use crate::epub::ncx::navigation::NavPoint;
use percent_encoding::percent_decode_str;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

/// navMap遍历状态机
///
/// 持有输出序列与"当前打开"导航点的索引栈。进入navPoint时
/// 以当前栈深度作为level并立即追加到输出序列，因此输出顺序
/// 与文档顺序一致；标签与content赋值给栈顶导航点。
#[derive(Debug, Default)]
struct NavMapState {
    points: Vec<NavPoint>,
    open: Vec<usize>,
    in_text: bool,
    text_buf: String,
}

impl NavMapState {
    fn enter_point(&mut self, id: String, play_order: u32) {
        let level = self.open.len() as u32;
        self.open.push(self.points.len());
        self.points.push(NavPoint::new(id, play_order, level));
    }

    fn exit_point(&mut self) {
        self.open.pop();
    }

    fn current_mut(&mut self) -> Option<&mut NavPoint> {
        let idx = *self.open.last()?;
        self.points.get_mut(idx)
    }

    fn open_text(&mut self) {
        self.in_text = true;
        self.text_buf.clear();
    }

    fn push_text(&mut self, text: &str) {
        if self.in_text {
            self.text_buf.push_str(text);
        }
    }

    /// text元素关闭：把累积文本赋给栈顶导航点；没有打开的导航点时忽略
    fn close_text(&mut self) {
        if !self.in_text {
            return;
        }
        self.in_text = false;
        let text = std::mem::take(&mut self.text_buf);
        if let Some(point) = self.current_mut() {
            point.label = Some(text.trim().to_string());
        }
    }

    /// content的src必须落在某个打开的导航点上，否则数据会被静默丢弃
    fn assign_src(&mut self, src: String) -> Result<()> {
        match self.current_mut() {
            Some(point) => {
                point.src = Some(src);
                Ok(())
            }
            None => Err(EpubError::NcxParseError(
                "content元素出现在任何navPoint之外".to_string()
            )),
        }
    }

    fn into_points(self) -> Vec<NavPoint> {
        self.points
    }
}

/// NCX文件解析结果
#[derive(Debug, Clone)]
pub struct Ncx {
    /// 按文档顺序排列的导航点
    pub nav_points: Vec<NavPoint>,
}

impl Ncx {
    /// 解析NCX文件内容
    ///
    /// # 参数
    /// * `xml_content` - NCX文件的XML内容
    ///
    /// # 返回值
    /// * `Result<Ncx, EpubError>` - 解析后的NCX信息
    pub fn parse_xml(xml_content: &str) -> Result<Ncx> {
        let mut reader = Reader::from_str(xml_content);
        reader.config_mut().trim_text(true);
        reader.config_mut().expand_empty_elements = true;

        let mut state = NavMapState::default();
        let mut buf = Vec::new();
        let mut in_nav_map = false;

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(ref e) => {
                    match e.local_name().as_ref() {
                        b"navMap" => {
                            in_nav_map = true;
                        }
                        b"navPoint" if in_nav_map => {
                            let (id, play_order) = Self::parse_nav_point_attributes(e)?;
                            state.enter_point(id, play_order);
                        }
                        b"content" if in_nav_map => {
                            let src = Self::parse_content_src(e)?;
                            state.assign_src(src)?;
                        }
                        b"text" if in_nav_map => {
                            state.open_text();
                        }
                        _ => {}
                    }
                }
                Event::End(ref e) => {
                    match e.local_name().as_ref() {
                        b"navMap" => {
                            in_nav_map = false;
                        }
                        b"navPoint" if in_nav_map => {
                            state.exit_point();
                        }
                        b"text" if in_nav_map => {
                            state.close_text();
                        }
                        _ => {}
                    }
                }
                Event::Text(e) => {
                    state.push_text(&e.unescape()?);
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(Ncx {
            nav_points: state.into_points(),
        })
    }

    /// 解析navPoint元素的id与playOrder属性
    fn parse_nav_point_attributes(e: &BytesStart) -> Result<(String, u32)> {
        let mut id = None;
        let mut play_order = None;

        for attr_result in e.attributes() {
            let attr = attr_result.map_err(|err| EpubError::XmlError(quick_xml::Error::InvalidAttr(err)))?;
            match attr.key.local_name().as_ref() {
                b"id" => {
                    id = Some(String::from_utf8_lossy(&attr.value).to_string());
                }
                b"playOrder" => {
                    let raw = String::from_utf8_lossy(&attr.value).to_string();
                    let parsed = raw.parse().map_err(|_| EpubError::NcxParseError(
                        format!("navPoint的playOrder属性不是整数: {}", raw)
                    ))?;
                    play_order = Some(parsed);
                }
                _ => {}
            }
        }

        let id = id.ok_or_else(|| EpubError::NcxParseError(
            "navPoint元素缺少id属性".to_string()
        ))?;
        let play_order = play_order.ok_or_else(|| EpubError::NcxParseError(
            format!("navPoint {} 缺少playOrder属性", id)
        ))?;

        Ok((id, play_order))
    }

    /// 解析content元素的src属性并做URL解码
    fn parse_content_src(e: &BytesStart) -> Result<String> {
        for attr_result in e.attributes() {
            let attr = attr_result.map_err(|err| EpubError::XmlError(quick_xml::Error::InvalidAttr(err)))?;
            if attr.key.local_name().as_ref() == b"src" {
                let raw = String::from_utf8_lossy(&attr.value).to_string();
                let decoded = percent_decode_str(&raw)
                    .decode_utf8()
                    .map_err(|_| EpubError::NcxParseError(
                        format!("content的src属性无法解码为UTF-8: {}", raw)
                    ))?;
                return Ok(decoded.to_string());
            }
        }

        Err(EpubError::NcxParseError(
            "content元素缺少src属性".to_string()
        ))
    }
}

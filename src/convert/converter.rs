//! 转换编排模块
//!
//! 按导航点的文档顺序遍历EPUB，把识别为部的导航点建成目录，
//! 识别为章节的导航点提取为带元数据头的文本文件。

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::convert::config::ConvertConfig;
use crate::convert::meta::MetaHeader;
use crate::convert::sanitize::sanitize_name;
use crate::convert::text::{HtmlTextConverter, TextConverter};
use crate::epub::Epub;
use crate::epub::error::{EpubError, Result};

/// 一本书转换完成后的统计信息
#[derive(Debug, Clone)]
pub struct ConvertSummary {
    /// 书名
    pub title: String,
    /// 作者
    pub author: String,
    /// 输出根目录
    pub output_dir: PathBuf,
    /// 创建的部数量
    pub part_count: u32,
    /// 写出的章节数量
    pub chapter_count: u32,
    /// 因排除列表未输出的章节数量
    pub excluded_count: u32,
    /// 未识别为部或章节而跳过的导航点数量
    pub skipped_count: u32,
}

/// EPUB到语料目录树的转换器
///
/// 转换器持有转换配置和文本转换器，可以连续转换多本书。
/// 每本书在输出基准目录下得到一个以安全化书名命名的独立目录。
pub struct Converter {
    config: ConvertConfig,
    text_converter: Box<dyn TextConverter>,
    base_dir: PathBuf,
}

impl Converter {
    /// 使用默认配置创建转换器
    ///
    /// 配置从当前目录下的 `corpusforge.yaml` 加载，
    /// 文件不存在时使用内置默认值并生成配置文件。
    pub fn new() -> Self {
        Self::with_config(ConvertConfig::new())
    }

    /// 使用指定配置创建转换器
    ///
    /// # 参数
    ///
    /// * `config` - 转换配置
    pub fn with_config(config: ConvertConfig) -> Self {
        Self {
            config,
            text_converter: Box::new(HtmlTextConverter::new()),
            base_dir: PathBuf::from("."),
        }
    }

    /// 替换章节内容使用的文本转换器
    pub fn with_text_converter(mut self, text_converter: Box<dyn TextConverter>) -> Self {
        self.text_converter = text_converter;
        self
    }

    /// 设置输出基准目录，默认为当前目录
    pub fn with_base_dir<P: AsRef<Path>>(mut self, base_dir: P) -> Self {
        self.base_dir = base_dir.as_ref().to_path_buf();
        self
    }

    /// 转换指定路径的EPUB文件
    ///
    /// # 参数
    ///
    /// * `path` - EPUB文件路径
    ///
    /// # 返回值
    ///
    /// * `Result<ConvertSummary>` - 成功时返回转换统计，失败时返回错误
    ///
    /// # 示例
    ///
    /// ```no_run
    /// use corpusforge::convert::Converter;
    ///
    /// let converter = Converter::new();
    /// let summary = converter.convert_file("book.epub")?;
    /// println!("共提取 {} 个章节", summary.chapter_count);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn convert_file<P: AsRef<Path>>(&self, path: P) -> Result<ConvertSummary> {
        let mut epub = Epub::new(path)?;
        self.convert_epub(&mut epub)
    }

    /// 转换一个已打开的EPUB
    ///
    /// 按导航点的文档顺序处理：内容路径包含部标记的导航点创建部目录，
    /// 包含章节标记且不在排除列表中的导航点写出章节文件，其余跳过。
    /// 章节编号全书连续递增，不随部重置；排除的章节不占用编号。
    /// 部出现之前的章节直接写在输出根目录下，文件名为原始标题。
    ///
    /// # 参数
    ///
    /// * `epub` - 已打开的EPUB文件
    ///
    /// # 返回值
    ///
    /// * `Result<ConvertSummary>` - 成功时返回转换统计，失败时返回错误
    pub fn convert_epub(&self, epub: &mut Epub) -> Result<ConvertSummary> {
        let toc_ids = self.config.toc_id_refs();
        let info = epub.parse_book_info_with_ids(&toc_ids)?;
        let opf_dir = epub.get_opf_directory()?;
        let ncx = epub.parse_ncx(&info)?;

        // 输出目录已存在时整本书的转换直接失败，不做合并或覆盖
        let output_dir = self.base_dir.join(sanitize_name(info.display_title()));
        fs::create_dir(&output_dir).map_err(|e| {
            if e.kind() == ErrorKind::AlreadyExists {
                EpubError::OutputDirExists(output_dir.clone())
            } else {
                EpubError::Io(e)
            }
        })?;

        let mut meta = MetaHeader::new(&info.title, &info.author);
        let mut part_number: u32 = 0;
        let mut chapter_number: u32 = 0;
        let mut excluded_count: u32 = 0;
        let mut skipped_count: u32 = 0;
        let mut current_part_dir: Option<PathBuf> = None;

        for point in &ncx.nav_points {
            let src = point.src.as_deref().ok_or_else(|| {
                EpubError::NcxParseError(format!("导航点 {} 缺少content引用", point.id))
            })?;

            if src.contains(&self.config.part_marker) {
                part_number += 1;
                let part_label = point.label_text();
                let part_dir = output_dir.join(format!(
                    "{:03}-{}",
                    part_number,
                    sanitize_name(part_label)
                ));
                fs::create_dir(&part_dir)?;

                meta.set_part(part_label, part_number);
                current_part_dir = Some(part_dir);
            } else if src.contains(&self.config.chapter_marker) {
                let chapter_label = point.label_text();
                if self.config.is_excluded(chapter_label) {
                    excluded_count += 1;
                    continue;
                }

                chapter_number += 1;
                meta.set_chapter(chapter_label, chapter_number);

                let chapter_path = match &current_part_dir {
                    Some(part_dir) => part_dir.join(format!(
                        "{:03}-{}.{}",
                        chapter_number,
                        sanitize_name(chapter_label),
                        self.config.chapter_extension
                    )),
                    None => output_dir.join(chapter_label),
                };

                let content_path = point.src_path().unwrap_or(src);
                let entry_path = if opf_dir.is_empty() {
                    content_path.to_string()
                } else {
                    format!("{}/{}", opf_dir, content_path)
                };

                let content = epub.extract_binary_file(&entry_path)?;
                let body = self.text_converter.convert(&content)?;

                fs::write(
                    &chapter_path,
                    format!("{}\n\n{}\n", meta.to_element_string(), body),
                )?;
            } else {
                skipped_count += 1;
            }
        }

        Ok(ConvertSummary {
            title: info.display_title().to_string(),
            author: info.display_author().to_string(),
            output_dir,
            part_count: part_number,
            chapter_count: chapter_number,
            excluded_count,
            skipped_count,
        })
    }
}

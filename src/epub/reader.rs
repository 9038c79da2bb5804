use std::fs::File;
use std::io::Read;
use std::path::Path;
use zip::ZipArchive;

use crate::epub::container::Container;
use crate::epub::error::{EpubError, Result};
use crate::epub::ncx::Ncx;
use crate::epub::opf::{BookInfo, DEFAULT_TOC_IDS};

/// 表示一个已打开的EPUB文件
pub struct Epub {
    archive: ZipArchive<File>,
}

impl Epub {
    /// 从文件路径创建Epub实例
    ///
    /// # 参数
    /// * `path` - epub文件的路径
    ///
    /// # 返回值
    /// * `Result<Epub, EpubError>` - 成功返回Epub实例，失败返回错误
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Epub> {
        let file = File::open(path)?;
        let archive = ZipArchive::new(file)?;

        Ok(Epub { archive })
    }

    /// 列出EPUB文件中的所有条目
    pub fn list_files(&mut self) -> Result<Vec<String>> {
        let mut files = Vec::new();

        for i in 0..self.archive.len() {
            let file = self.archive.by_index(i)?;
            files.push(file.name().to_string());
        }

        Ok(files)
    }

    /// 提取指定条目的文本内容
    ///
    /// # 参数
    /// * `filename` - 要提取的条目名
    ///
    /// # 返回值
    /// * `Result<String, EpubError>` - 条目内容
    pub fn extract_file(&mut self, filename: &str) -> Result<String> {
        let mut file = self.archive.by_name(filename)?;
        let mut content = String::new();
        file.read_to_string(&mut content)?;
        Ok(content)
    }

    /// 提取指定条目的二进制内容
    ///
    /// # 参数
    /// * `filename` - 要提取的条目名
    ///
    /// # 返回值
    /// * `Result<Vec<u8>, EpubError>` - 条目的二进制内容
    pub fn extract_binary_file(&mut self, filename: &str) -> Result<Vec<u8>> {
        let mut file = self.archive.by_name(filename)?;
        let mut buffer = Vec::new();
        file.read_to_end(&mut buffer)?;
        Ok(buffer)
    }

    /// 解析container.xml文件
    ///
    /// # 返回值
    /// * `Result<Container, EpubError>` - 解析后的Container信息
    pub fn parse_container(&mut self) -> Result<Container> {
        let container_content = self.extract_file("META-INF/container.xml")?;
        Container::parse_xml(&container_content)
    }

    /// 获取主要的OPF文件路径
    ///
    /// # 返回值
    /// * `Result<String, EpubError>` - OPF文件的完整路径
    pub fn get_opf_path(&mut self) -> Result<String> {
        let container = self.parse_container()?;

        container.get_opf_path().ok_or_else(|| {
            EpubError::ContainerParseError(
                "container.xml中没有找到有效的rootfile".to_string()
            )
        })
    }

    /// 解析OPF文件，提取书籍信息
    ///
    /// # 返回值
    /// * `Result<BookInfo, EpubError>` - 书名、作者与NCX引用
    pub fn parse_book_info(&mut self) -> Result<BookInfo> {
        self.parse_book_info_with_ids(DEFAULT_TOC_IDS)
    }

    /// 使用指定的NCX id集合解析OPF文件
    ///
    /// # 参数
    /// * `toc_ids` - 清单中视为NCX条目的id集合
    ///
    /// # 返回值
    /// * `Result<BookInfo, EpubError>` - 书名、作者与NCX引用
    pub fn parse_book_info_with_ids(&mut self, toc_ids: &[&str]) -> Result<BookInfo> {
        let opf_path = self.get_opf_path()?;
        let opf_content = self.extract_file(&opf_path)?;

        BookInfo::parse_xml_with_ids(&opf_content, toc_ids).map_err(|e| match e {
            EpubError::XmlError(xml_err) => EpubError::OpfParseError(format!("XML解析错误: {}", xml_err)),
            other => other,
        })
    }

    /// 获取OPF文件所在的目录
    ///
    /// # 返回值
    /// * `Result<String, EpubError>` - OPF文件所在的目录路径，位于根目录时为空字符串
    pub fn get_opf_directory(&mut self) -> Result<String> {
        let opf_path = self.get_opf_path()?;

        if let Some(parent) = std::path::Path::new(&opf_path).parent() {
            Ok(parent.to_string_lossy().to_string())
        } else {
            Ok(String::new())
        }
    }

    /// 获取NCX导航文件在压缩包内的完整路径
    ///
    /// # 参数
    /// * `info` - 已解析的书籍信息
    ///
    /// # 返回值
    /// * `Result<String, EpubError>` - NCX文件的完整路径
    pub fn get_ncx_path(&mut self, info: &BookInfo) -> Result<String> {
        if !info.has_toc_ref() {
            return Err(EpubError::OpfParseError(
                "OPF清单中没有声明NCX导航文件".to_string()
            ));
        }

        let opf_dir = self.get_opf_directory()?;
        if opf_dir.is_empty() {
            Ok(info.toc_href.clone())
        } else {
            Ok(format!("{}/{}", opf_dir, info.toc_href))
        }
    }

    /// 解析NCX导航文件
    ///
    /// # 参数
    /// * `info` - 已解析的书籍信息
    ///
    /// # 返回值
    /// * `Result<Ncx, EpubError>` - 按文档顺序排列的导航点序列
    pub fn parse_ncx(&mut self, info: &BookInfo) -> Result<Ncx> {
        let ncx_path = self.get_ncx_path(info)?;
        let ncx_content = self.extract_file(&ncx_path)?;

        Ncx::parse_xml(&ncx_content).map_err(|e| match e {
            EpubError::XmlError(xml_err) => EpubError::NcxParseError(format!("XML解析错误: {}", xml_err)),
            other => other,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::TempDir;
    use zip::write::FileOptions;
    use zip::ZipWriter;

    const TEST_CONTAINER: &str = r#"<?xml version="1.0"?>
<container version="1.0" xmlns="urn:oasis:names:tc:opendocument:xmlns:container">
    <rootfiles>
        <rootfile full-path="OEBPS/content.opf" media-type="application/oebps-package+xml"/>
    </rootfiles>
</container>"#;

    const TEST_OPF: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<package version="2.0" xmlns="http://www.idpf.org/2007/opf" unique-identifier="BookId">
    <metadata xmlns:dc="http://purl.org/dc/elements/1.1/">
        <dc:title>测试书籍</dc:title>
        <dc:creator>测试作者</dc:creator>
        <dc:language>zh-CN</dc:language>
    </metadata>
    <manifest>
        <item id="ncx" href="toc.ncx" media-type="application/x-dtbncx+xml"/>
        <item id="chapter1" href="text/epub_c_chapter1.html" media-type="application/xhtml+xml"/>
    </manifest>
    <spine toc="ncx">
        <itemref idref="chapter1"/>
    </spine>
</package>"#;

    const TEST_NCX: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ncx xmlns="http://www.daisy.org/z3986/2005/ncx/" version="2005-1">
    <docTitle><text>测试书籍</text></docTitle>
    <navMap>
        <navPoint id="navPoint-1" playOrder="1">
            <navLabel><text>第一章</text></navLabel>
            <content src="text/epub_c_chapter1.html"/>
        </navPoint>
    </navMap>
</ncx>"#;

    /// 创建一个测试用的EPUB文件
    fn create_test_epub(path: &Path) -> Result<()> {
        let file = File::create(path)?;
        let mut zip = ZipWriter::new(file);

        zip.start_file("mimetype", FileOptions::<()>::default())?;
        zip.write_all(b"application/epub+zip")?;

        zip.start_file("META-INF/container.xml", FileOptions::<()>::default())?;
        zip.write_all(TEST_CONTAINER.as_bytes())?;

        zip.start_file("OEBPS/content.opf", FileOptions::<()>::default())?;
        zip.write_all(TEST_OPF.as_bytes())?;

        zip.start_file("OEBPS/toc.ncx", FileOptions::<()>::default())?;
        zip.write_all(TEST_NCX.as_bytes())?;

        zip.start_file("OEBPS/text/epub_c_chapter1.html", FileOptions::<()>::default())?;
        let chapter1 = r#"<html><head><title>第一章</title></head>
<body><h1>第一章</h1><p>这是第一章的内容。</p></body></html>"#;
        zip.write_all(chapter1.as_bytes())?;

        zip.finish()?;
        Ok(())
    }

    fn test_epub_path(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("test.epub");
        create_test_epub(&path).unwrap();
        path
    }

    #[test]
    fn test_open_epub() {
        let dir = TempDir::new().unwrap();
        let result = Epub::new(test_epub_path(&dir));
        assert!(result.is_ok());
    }

    #[test]
    fn test_open_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = Epub::new(dir.path().join("missing.epub"));
        assert!(matches!(result, Err(EpubError::Io(_))));
    }

    #[test]
    fn test_list_files() {
        let dir = TempDir::new().unwrap();
        let mut epub = Epub::new(test_epub_path(&dir)).unwrap();

        let files = epub.list_files().unwrap();
        assert!(files.contains(&"META-INF/container.xml".to_string()));
        assert!(files.contains(&"OEBPS/content.opf".to_string()));
        assert!(files.contains(&"OEBPS/toc.ncx".to_string()));
    }

    #[test]
    fn test_extract_missing_entry() {
        let dir = TempDir::new().unwrap();
        let mut epub = Epub::new(test_epub_path(&dir)).unwrap();

        let result = epub.extract_file("OEBPS/nothing.html");
        assert!(matches!(result, Err(EpubError::Zip(zip::result::ZipError::FileNotFound))));
    }

    #[test]
    fn test_parse_container_from_epub() {
        let dir = TempDir::new().unwrap();
        let mut epub = Epub::new(test_epub_path(&dir)).unwrap();

        let container = epub.parse_container().unwrap();
        assert_eq!(container.rootfiles.len(), 1);
        assert_eq!(container.rootfiles[0].full_path, "OEBPS/content.opf");
    }

    #[test]
    fn test_get_opf_path() {
        let dir = TempDir::new().unwrap();
        let mut epub = Epub::new(test_epub_path(&dir)).unwrap();

        assert_eq!(epub.get_opf_path().unwrap(), "OEBPS/content.opf");
    }

    #[test]
    fn test_parse_book_info() {
        let dir = TempDir::new().unwrap();
        let mut epub = Epub::new(test_epub_path(&dir)).unwrap();

        let info = epub.parse_book_info().unwrap();
        assert_eq!(info.title, "测试书籍");
        assert_eq!(info.author, "测试作者");
        assert_eq!(info.toc_href, "toc.ncx");
    }

    #[test]
    fn test_get_opf_directory() {
        let dir = TempDir::new().unwrap();
        let mut epub = Epub::new(test_epub_path(&dir)).unwrap();

        assert_eq!(epub.get_opf_directory().unwrap(), "OEBPS");
    }

    #[test]
    fn test_get_ncx_path() {
        let dir = TempDir::new().unwrap();
        let mut epub = Epub::new(test_epub_path(&dir)).unwrap();

        let info = epub.parse_book_info().unwrap();
        assert_eq!(epub.get_ncx_path(&info).unwrap(), "OEBPS/toc.ncx");
    }

    #[test]
    fn test_get_ncx_path_without_toc_ref() {
        let dir = TempDir::new().unwrap();
        let mut epub = Epub::new(test_epub_path(&dir)).unwrap();

        let info = BookInfo::new();
        let result = epub.get_ncx_path(&info);
        assert!(matches!(result, Err(EpubError::OpfParseError(_))));
    }

    #[test]
    fn test_parse_ncx_from_epub() {
        let dir = TempDir::new().unwrap();
        let mut epub = Epub::new(test_epub_path(&dir)).unwrap();

        let info = epub.parse_book_info().unwrap();
        let ncx = epub.parse_ncx(&info).unwrap();

        assert_eq!(ncx.nav_points.len(), 1);
        assert_eq!(ncx.nav_points[0].label_text(), "第一章");
        assert_eq!(ncx.nav_points[0].src.as_deref(), Some("text/epub_c_chapter1.html"));
    }
}

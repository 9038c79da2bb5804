//! 章节元数据头模块
//!
//! 每个输出的章节文件首行写入一个元数据头，记录当前的书籍、部和章节信息。

/// 章节文件的元数据头
///
/// 书名和作者在整本书的转换过程中保持不变。部信息在遇到新的部时更新，
/// 并延续到其后的所有章节；章节信息在每个章节写出前更新。
/// 部出现之前写出的章节不包含部字段。
#[derive(Debug, Clone)]
pub struct MetaHeader {
    book_title: String,
    author: String,
    part_name: Option<String>,
    part_number: Option<u32>,
    chapter_name: Option<String>,
    chapter_number: Option<u32>,
}

impl MetaHeader {
    /// 创建只包含书籍信息的元数据头
    ///
    /// # 参数
    ///
    /// * `book_title` - 书名
    /// * `author` - 作者
    pub fn new(book_title: &str, author: &str) -> Self {
        Self {
            book_title: book_title.to_string(),
            author: author.to_string(),
            part_name: None,
            part_number: None,
            chapter_name: None,
            chapter_number: None,
        }
    }

    /// 记录当前所在的部
    pub fn set_part(&mut self, name: &str, number: u32) {
        self.part_name = Some(name.to_string());
        self.part_number = Some(number);
    }

    /// 记录当前写出的章节
    pub fn set_chapter(&mut self, name: &str, number: u32) {
        self.chapter_name = Some(name.to_string());
        self.chapter_number = Some(number);
    }

    /// 生成单行元数据标签
    ///
    /// 输出形如 `<meta book-title="书名" author="作者" chapter-name="章节" chapter-number=1 />`，
    /// 字段顺序固定为书名、作者、部名、部号、章节名、章节号，
    /// 字符串值带双引号，数字值不带。未设置的部或章节字段不输出。
    ///
    /// # 返回值
    ///
    /// * `String` - 单行元数据标签
    pub fn to_element_string(&self) -> String {
        let mut element = String::from("<meta ");

        element.push_str(&format!("book-title=\"{}\" ", self.book_title));
        element.push_str(&format!("author=\"{}\" ", self.author));

        if let (Some(name), Some(number)) = (&self.part_name, self.part_number) {
            element.push_str(&format!("part-name=\"{}\" part-number={} ", name, number));
        }

        if let (Some(name), Some(number)) = (&self.chapter_name, self.chapter_number) {
            element.push_str(&format!("chapter-name=\"{}\" chapter-number={} ", name, number));
        }

        element.push_str("/>");
        element
    }
}

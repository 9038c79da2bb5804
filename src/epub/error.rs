use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, EpubError>;

/// Epub处理相关的错误类型
#[derive(Error, Debug)]
pub enum EpubError {
    #[error("IO错误: {0}")]
    Io(#[from] io::Error),

    #[error("Zip文件错误: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("XML解析错误: {0}")]
    XmlError(#[from] quick_xml::Error),

    #[error("container.xml解析错误: {0}")]
    ContainerParseError(String),

    #[error("OPF文件解析错误: {0}")]
    OpfParseError(String),

    #[error("NCX文件解析错误: {0}")]
    NcxParseError(String),

    #[error("输出目录已存在: {}", .0.display())]
    OutputDirExists(PathBuf),

    #[error("文本转换错误: {0}")]
    ConversionError(String),

    #[error("配置文件错误: {0}")]
    ConfigError(String),
}

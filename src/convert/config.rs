//! 转换配置模块
//!
//! 提供语料转换行为的配置管理功能，支持从YAML文件加载配置。

use crate::epub::error::{EpubError, Result};
use serde::{Deserialize, Serialize};
use std::fs;

/// 默认配置文件路径
const DEFAULT_CONFIG_PATH: &str = "corpusforge.yaml";

/// 语料转换配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertConfig {
    /// 部标记，内容路径包含该子串的导航点识别为部
    pub part_marker: String,
    /// 章节标记，内容路径包含该子串的导航点识别为章节
    pub chapter_marker: String,
    /// OPF清单中NCX条目的候选id列表
    pub toc_ids: Vec<String>,
    /// 不输出的章节标题列表，匹配时忽略大小写
    pub excluded_labels: Vec<String>,
    /// 章节文件的扩展名
    pub chapter_extension: String,
}

impl ConvertConfig {
    /// 从默认配置文件中加载转换配置
    ///
    /// 配置文件默认为当前目录下的 `corpusforge.yaml`
    ///
    /// # 返回值
    ///
    /// * `Result<Self>` - 加载成功返回配置实例，失败返回错误
    pub fn from_file() -> Result<Self> {
        let content = fs::read_to_string(DEFAULT_CONFIG_PATH)
            .map_err(|e| EpubError::ConfigError(format!("无法读取配置文件: {}", e)))?;

        serde_yml::from_str(&content)
            .map_err(|e| EpubError::ConfigError(format!("配置文件格式错误: {}", e)))
    }

    /// 生成默认配置文件到当前目录
    ///
    /// 配置文件将生成为当前目录下的 `corpusforge.yaml`
    ///
    /// # 返回值
    ///
    /// * `Result<()>` - 生成成功返回Ok，失败返回错误
    pub fn generate_default_config() -> Result<()> {
        let default_config = Self::default_config();
        let yaml_content = serde_yml::to_string(&default_config)
            .map_err(|e| EpubError::ConfigError(format!("序列化配置失败: {}", e)))?;

        // 在YAML内容前添加注释说明
        let content_with_header = format!(
            "# 语料转换配置文件\n# 定义导航点分类使用的标记子串以及输出规则\n# 修改后对之后的转换立即生效\n\n{}",
            yaml_content
        );

        fs::write(DEFAULT_CONFIG_PATH, content_with_header)
            .map_err(|e| EpubError::ConfigError(format!("写入配置文件失败: {}", e)))?;

        Ok(())
    }

    /// 获取默认配置
    ///
    /// # 返回值
    ///
    /// * `Self` - 默认配置实例
    pub fn default_config() -> Self {
        Self {
            part_marker: "epub_p".to_string(),
            chapter_marker: "epub_c".to_string(),
            toc_ids: vec![
                "ncx".to_string(),
                "toc".to_string(),
                "ncxtoc".to_string(),
            ],
            excluded_labels: vec!["cover".to_string(), "copyright".to_string()],
            chapter_extension: "txt".to_string(),
        }
    }

    /// 尝试从默认配置文件加载，如果文件不存在则先生成配置文件再加载
    ///
    /// 配置文件为当前目录下的 `corpusforge.yaml`
    ///
    /// # 返回值
    ///
    /// * `Self` - 配置实例
    pub fn new() -> Self {
        // 首先尝试从文件加载
        match Self::from_file() {
            Ok(config) => config,
            Err(_) => {
                // 如果文件不存在，先生成默认配置文件
                let _ = Self::generate_default_config();
                Self::default_config()
            }
        }
    }

    /// 判断章节标题是否在排除列表中
    ///
    /// 比较时忽略标题两端的空白和大小写。
    ///
    /// # 参数
    ///
    /// * `label` - 章节标题
    ///
    /// # 返回值
    ///
    /// * `bool` - 在排除列表中返回true
    pub fn is_excluded(&self, label: &str) -> bool {
        let normalized = label.trim().to_lowercase();
        self.excluded_labels
            .iter()
            .any(|excluded| excluded.to_lowercase() == normalized)
    }

    /// 获取NCX候选id列表的借用视图
    pub fn toc_id_refs(&self) -> Vec<&str> {
        self.toc_ids.iter().map(|id| id.as_str()).collect()
    }
}

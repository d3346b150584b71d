use clap::{ArgAction, Parser};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "searchie-fs-importer")]
#[command(about = "Import files into Searchie / 将本地目录中的文件导入 Searchie 数据集")]
#[command(version)]
#[command(after_help = r#"
EXAMPLES / 示例:
  Import into an existing dataset / 导入到已有数据集:
    searchie-fs-importer ./notes --dataset-id ds_123 --searchie-url http://localhost:3000

  Create a new dataset interactively / 交互式创建新数据集:
    searchie-fs-importer ./notes --searchie-url http://localhost:3000

ENVIRONMENT / 环境变量:
  SEARCHIE_URL          same as --searchie-url
  SEARCHIE_DATASET_ID   same as --dataset-id
"#)]
pub struct Cli {
    /// 要导入的根目录 / Root folder to import
    pub folder: PathBuf,

    /// 目标数据集 ID，省略时交互式创建 / Dataset ID to import into
    #[arg(long, env = "SEARCHIE_DATASET_ID")]
    pub dataset_id: Option<String>,

    /// Searchie API 地址 / Searchie API URL
    #[arg(long, env = "SEARCHIE_URL", required = true)]
    pub searchie_url: String,

    /// 日志详细程度 (-v, -vv) / Increase log verbosity
    #[arg(short = 'v', long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// 一次运行的不可变配置，启动时构造一次
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub folder: PathBuf,
    pub dataset_id: Option<String>,
    pub searchie_url: String,
}

impl Cli {
    pub fn into_settings(self) -> Settings {
        Settings {
            folder: self.folder,
            dataset_id: self.dataset_id.filter(|id| !id.is_empty()),
            searchie_url: self.searchie_url.trim_end_matches('/').to_string(),
        }
    }

    /// 根据 -v 次数得到默认日志级别
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

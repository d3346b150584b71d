use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 递归收集根目录下所有非目录条目
///
/// 顺序为文件系统遍历顺序。符号链接不跟随也不过滤，隐藏文件同样包含在内。
/// 遇到任何遍历错误立即返回，已收集的部分结果丢弃。
pub fn collect_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root) {
        let entry = entry.with_context(|| format!("error walking directory {}", root.display()))?;
        if !entry.file_type().is_dir() {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

/// 数据点名称：相对根目录的路径，去掉最后一个扩展名
pub fn datapoint_name(root: &Path, file: &Path) -> String {
    let relative = match file.strip_prefix(root) {
        Ok(rest) if !rest.as_os_str().is_empty() => rest,
        _ => file,
    };

    let stem = if relative.extension().is_some() {
        relative.with_extension("")
    } else {
        relative.to_path_buf()
    };

    stem.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

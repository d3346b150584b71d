use super::client::{ApiError, DataPoint, DataPointRequest, SearchieApi};
use super::walk::datapoint_name;
use anyhow::{Context, Result};
use comfy_table::Table;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// 被服务端拒绝的文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub path: PathBuf,
    pub status: u16,
    pub body: String,
}

#[derive(Debug, Default)]
pub struct UploadReport {
    pub total: usize,
    pub uploaded: usize,
    pub rejected: Vec<Rejection>,
}

pub fn progress_bar(len: usize) -> Result<ProgressBar> {
    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("##-"),
    );
    Ok(pb)
}

pub fn rejection_line(file: &Path, body: &str) -> String {
    format!("error response for file {}: {}", file.display(), body)
}

/// 逐个上传文件
///
/// 读取失败与传输失败直接中止整个运行；服务端拒绝（非 2xx）只向 `out`
/// 写一行并跳过，该文件不计入进度。
pub async fn upload_files<A, W>(
    api: &A,
    dataset_id: &str,
    root: &Path,
    files: &[PathBuf],
    pb: &ProgressBar,
    out: &mut W,
) -> Result<UploadReport>
where
    A: SearchieApi + ?Sized,
    W: Write + ?Sized,
{
    let mut report = UploadReport {
        total: files.len(),
        ..Default::default()
    };

    for file in files {
        let content =
            fs::read(file).with_context(|| format!("error reading file {}", file.display()))?;

        let name = datapoint_name(root, file);
        pb.set_message(name.clone());
        debug!(file = %file.display(), %name, bytes = content.len(), "uploading");

        let request = DataPointRequest::single(
            dataset_id,
            DataPoint::text(name, String::from_utf8_lossy(&content)),
        );

        match api.create_datapoint(&request).await {
            Ok(()) => {
                report.uploaded += 1;
                pb.inc(1);
            }
            Err(ApiError::Rejected { status, body }) => {
                debug!(file = %file.display(), status, "upload rejected");
                pb.suspend(|| writeln!(out, "{}", rejection_line(file, &body)))?;
                report.rejected.push(Rejection {
                    path: file.clone(),
                    status,
                    body,
                });
            }
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("error making request for file {}", file.display()));
            }
        }
    }

    pb.finish_with_message("done");
    Ok(report)
}

pub fn summary_table(report: &UploadReport) -> Option<Table> {
    if report.rejected.is_empty() {
        return None;
    }

    let mut table = Table::new();
    table.set_header(vec!["File", "Status", "Response"]);
    for rejection in &report.rejected {
        table.add_row(vec![
            rejection.path.display().to_string(),
            rejection.status.to_string(),
            rejection.body.clone(),
        ]);
    }
    Some(table)
}

pub fn print_summary(report: &UploadReport) {
    println!(
        "✅ Uploaded {}/{} files ({} rejected)",
        report.uploaded,
        report.total,
        report.rejected.len()
    );
    if let Some(table) = summary_table(report) {
        println!("{table}");
    }
}

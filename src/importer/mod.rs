pub mod cli;
pub mod client;
pub mod dataset;
pub mod prompt;
pub mod upload;
pub mod walk;

use anyhow::Result;
use indicatif::ProgressBar;
use std::io;
use tracing::info;

use self::cli::Settings;
use self::client::SearchieApi;
use self::prompt::Prompter;
use self::upload::UploadReport;

/// 执行一次导入：确定数据集 → 收集文件 → 逐个上传
pub async fn run<A, P>(settings: &Settings, api: &A, prompter: &mut P) -> Result<UploadReport>
where
    A: SearchieApi + ?Sized,
    P: Prompter + ?Sized,
{
    run_with_progress(settings, api, prompter, upload::progress_bar).await
}

async fn run_with_progress<A, P, F>(
    settings: &Settings,
    api: &A,
    prompter: &mut P,
    make_progress: F,
) -> Result<UploadReport>
where
    A: SearchieApi + ?Sized,
    P: Prompter + ?Sized,
    F: FnOnce(usize) -> Result<ProgressBar>,
{
    let dataset_id =
        dataset::resolve_dataset_id(settings.dataset_id.as_deref(), api, prompter).await?;
    info!(dataset_id = %dataset_id, "using dataset");

    println!("🔍 Scanning: {}", settings.folder.display());
    let files = walk::collect_files(&settings.folder)?;
    println!("📄 Found {} files", files.len());

    let pb = make_progress(files.len())?;
    upload::upload_files(
        api,
        &dataset_id,
        &settings.folder,
        &files,
        &pb,
        &mut io::stdout(),
    )
    .await
}

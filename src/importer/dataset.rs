use super::client::SearchieApi;
use super::prompt::Prompter;
use anyhow::{bail, Context, Result};
use tracing::info;

const CREATE_QUESTION: &str =
    "No dataset ID provided. Would you like to create a new dataset? (y/n): ";
const NAME_QUESTION: &str = "Enter dataset name: ";

/// 确定目标数据集 ID
///
/// 已提供非空 ID 时原样返回，不访问远端也不提示；否则询问是否新建数据集。
pub async fn resolve_dataset_id<A, P>(
    preset: Option<&str>,
    api: &A,
    prompter: &mut P,
) -> Result<String>
where
    A: SearchieApi + ?Sized,
    P: Prompter + ?Sized,
{
    if let Some(id) = preset.filter(|id| !id.is_empty()) {
        return Ok(id.to_string());
    }

    if !prompter.ask_yes_no(CREATE_QUESTION)? {
        bail!("dataset ID is required");
    }

    let name = prompter
        .ask_line(NAME_QUESTION)
        .context("error reading dataset name")?;

    let id = api
        .create_dataset(&name)
        .await
        .context("error creating dataset")?;
    if id.is_empty() {
        bail!("error creating dataset: response did not contain a dataset ID");
    }

    info!(dataset = %name, id = %id, "dataset created");
    println!("✅ Created dataset with ID: {}", id);
    Ok(id)
}

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// 单个数据点，每个文件对应一个
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataPoint {
    pub data_type: String,
    pub name: String,
    pub data: String,
}

impl DataPoint {
    pub fn text(name: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            data_type: "text".to_string(),
            name: name.into(),
            data: data.into(),
        }
    }
}

/// POST /api/datapoints 的请求体
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataPointRequest {
    pub dataset_id: String,
    pub datapoints: Vec<DataPoint>,
}

impl DataPointRequest {
    pub fn single(dataset_id: &str, datapoint: DataPoint) -> Self {
        Self {
            dataset_id: dataset_id.to_string(),
            datapoints: vec![datapoint],
        }
    }
}

#[derive(Debug, Serialize)]
struct CreateDatasetRequest<'a> {
    name: &'a str,
}

/// 远端数据集
#[derive(Debug, Clone, Deserialize)]
pub struct Dataset {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize)]
struct DatasetResponse {
    data: Dataset,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// 请求未得到响应（连接被拒绝、DNS、TLS 等）
    #[error("request failed: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// 服务端返回非 2xx
    #[error("{status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("invalid response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport(Box::new(err))
    }
}

/// Searchie 远端接口，便于在测试中替换为假实现
#[async_trait]
pub trait SearchieApi {
    /// 创建数据集并返回其 ID
    async fn create_dataset(&self, name: &str) -> Result<String, ApiError>;

    /// 上传数据点，任何 2xx 均视为成功
    async fn create_datapoint(&self, request: &DataPointRequest) -> Result<(), ApiError>;
}

pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<reqwest::Response, ApiError> {
        let url = self.endpoint(path);
        debug!(%url, "POST");

        let response = self.client.post(&url).json(body).send().await?;

        let status = response.status();
        debug!(%url, status = status.as_u16(), "response");
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl SearchieApi for HttpClient {
    async fn create_dataset(&self, name: &str) -> Result<String, ApiError> {
        let response = self
            .post("/api/datasets", &CreateDatasetRequest { name })
            .await?;

        let text = response.text().await?;
        let parsed: DatasetResponse =
            serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))?;

        debug!(id = %parsed.data.id, name = %parsed.data.name, "dataset created");
        Ok(parsed.data.id)
    }

    async fn create_datapoint(&self, request: &DataPointRequest) -> Result<(), ApiError> {
        self.post("/api/datapoints", request).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    #[test]
    fn datapoint_request_wire_shape() {
        let request = DataPointRequest::single("ds_1", DataPoint::text("a/b", "hello"));
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(
            value,
            json!({
                "dataset_id": "ds_1",
                "datapoints": [{ "data_type": "text", "name": "a/b", "data": "hello" }]
            })
        );
    }

    #[tokio::test]
    async fn create_dataset_returns_id() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/datasets")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(json!({ "name": "My Set" })))
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(r#"{"data":{"id":"ds_123","name":"My Set"}}"#)
            .create_async()
            .await;

        let client = HttpClient::new(&server.url());
        let id = client.create_dataset("My Set").await.unwrap();

        assert_eq!(id, "ds_123");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn create_dataset_without_id_is_decode_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/datasets")
            .with_status(200)
            .with_body(r#"{"ok":true}"#)
            .create_async()
            .await;

        let client = HttpClient::new(&server.url());
        let err = client.create_dataset("x").await.unwrap_err();

        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn create_dataset_rejection_keeps_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/datasets")
            .with_status(400)
            .with_body("name taken")
            .create_async()
            .await;

        let client = HttpClient::new(&server.url());
        let err = client.create_dataset("x").await.unwrap_err();

        match err {
            ApiError::Rejected { status, body } => {
                assert_eq!(status, 400);
                assert_eq!(body, "name taken");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn create_datapoint_posts_request() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/datapoints")
            .match_body(Matcher::Json(json!({
                "dataset_id": "ds_1",
                "datapoints": [{ "data_type": "text", "name": "note", "data": "body" }]
            })))
            .with_status(204)
            .create_async()
            .await;

        let client = HttpClient::new(&format!("{}/", server.url()));
        let request = DataPointRequest::single("ds_1", DataPoint::text("note", "body"));
        client.create_datapoint(&request).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn create_datapoint_422_is_rejection() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/datapoints")
            .with_status(422)
            .with_body(r#"{"error":"bad"}"#)
            .create_async()
            .await;

        let client = HttpClient::new(&server.url());
        let request = DataPointRequest::single("ds_1", DataPoint::text("n", ""));
        let err = client.create_datapoint(&request).await.unwrap_err();

        assert!(matches!(err, ApiError::Rejected { status: 422, .. }));
    }

    #[tokio::test]
    async fn unreachable_server_is_transport_error() {
        let client = HttpClient::new("http://127.0.0.1:1");
        let request = DataPointRequest::single("ds_1", DataPoint::text("n", ""));
        let err = client.create_datapoint(&request).await.unwrap_err();

        assert!(matches!(err, ApiError::Transport(_)));
    }
}

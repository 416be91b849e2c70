//! 后端行数据接口

use super::session_repo::SessionProvider;
use crate::config::ApiSettings;
use crate::errors::AppError;
use crate::models::{AdminQuery, Row, SubmissionPayload, SubmissionReceipt};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

/// 操作员侧接口：提交记录、查询循环次数
#[async_trait::async_trait]
pub trait RowsApi: Send + Sync {
    async fn submit(&self, payload: &SubmissionPayload) -> Result<SubmissionReceipt, AppError>;

    /// 无历史记录时为 0
    async fn fetch_cycles(&self, battery_id: &str) -> Result<u64, AppError>;
}

/// 管理端接口：查询与导出
#[async_trait::async_trait]
pub trait AdminRowsApi: Send + Sync {
    async fn search(&self, query: &AdminQuery) -> Result<Vec<Row>, AppError>;

    /// 原始 CSV 字节
    async fn export(&self, query: &AdminQuery) -> Result<Vec<u8>, AppError>;
}

/// 错误响应体
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// 基于 HTTP 的接口实现
///
/// 不设置客户端超时；失败只来自服务端响应或连接错误。
pub struct HttpRowsClient {
    client: Client,
    base_url: String,
    sessions: Arc<dyn SessionProvider>,
}

impl HttpRowsClient {
    pub fn new(settings: &ApiSettings, sessions: Arc<dyn SessionProvider>) -> Result<Self, AppError> {
        let client = Client::builder().build()?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            sessions,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// 附加 Bearer 令牌
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.sessions.current() {
            Some(session) => request.bearer_auth(session.token()),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, AppError> {
        let response = self.authorize(request).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(error_for_status(status, &body))
    }
}

#[async_trait::async_trait]
impl RowsApi for HttpRowsClient {
    async fn submit(&self, payload: &SubmissionPayload) -> Result<SubmissionReceipt, AppError> {
        let request = self.client.post(self.url("rows")).json(payload);
        let body = self.send(request).await?.text().await?;

        Ok(parse_receipt(&json_or_null(&body)))
    }

    async fn fetch_cycles(&self, battery_id: &str) -> Result<u64, AppError> {
        let request = self
            .client
            .get(self.url("rows/cycles"))
            .query(&[("batteryId", battery_id)]);
        let body = self.send(request).await?.text().await?;

        Ok(parse_cycles(&json_or_null(&body)))
    }
}

#[async_trait::async_trait]
impl AdminRowsApi for HttpRowsClient {
    async fn search(&self, query: &AdminQuery) -> Result<Vec<Row>, AppError> {
        let path = if query.is_by_battery() {
            "admin/rows/search"
        } else {
            "admin/rows/by-date"
        };
        let request = self.client.get(self.url(path)).query(&query.query_pairs());
        let body: Value = self.send(request).await?.json().await?;

        Ok(rows_from_value(body))
    }

    async fn export(&self, query: &AdminQuery) -> Result<Vec<u8>, AppError> {
        let request = self
            .client
            .get(self.url("admin/rows/export"))
            .query(&query.query_pairs());
        let bytes = self.send(request).await?.bytes().await?;

        Ok(bytes.to_vec())
    }
}

/// 非 2xx 响应转换为错误
pub(crate) fn error_for_status(status: StatusCode, body: &str) -> AppError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty());

    match status {
        StatusCode::UNAUTHORIZED => {
            AppError::Unauthorized(message.unwrap_or_else(|| "会话已失效".to_string()))
        }
        StatusCode::FORBIDDEN => {
            AppError::Forbidden(message.unwrap_or_else(|| "无权访问".to_string()))
        }
        _ => AppError::Transport {
            status: status.as_u16(),
            message,
        },
    }
}

/// 2xx 响应体可能为空或不是 JSON，按 null 处理
fn json_or_null(body: &str) -> Value {
    serde_json::from_str(body).unwrap_or(Value::Null)
}

/// 次数字段：接受数字或数字字符串，负数和其他值视为缺失
fn lenient_count(value: Option<&Value>) -> Option<u64> {
    let number = match value? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    (number.is_finite() && number >= 0.0).then_some(number as u64)
}

/// `{ "cycles": n }`，缺失、负数或无法解析时为 0
pub(crate) fn parse_cycles(body: &Value) -> u64 {
    lenient_count(body.get("cycles")).unwrap_or(0)
}

/// `{ "chargingCycle"?: n }`
pub(crate) fn parse_receipt(body: &Value) -> SubmissionReceipt {
    SubmissionReceipt {
        charging_cycle: lenient_count(body.get("chargingCycle")),
    }
}

/// 非数组响应视为空结果
pub(crate) fn rows_from_value(body: Value) -> Vec<Row> {
    match body {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::Object(row) => Some(row),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

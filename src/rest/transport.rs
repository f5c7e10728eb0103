//! transport 模块
//! - Transport 是 rest 调用的唯一 I/O 能力，按流量类别各建一个实例共享
//! - HttpTransport 基于 reqwest 阻塞客户端，连接池和超时都在这一层
//! - DummyTransport 离线替身，录制请求并返回预置应答

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use serde_json::{json, Value};

use crate::common::error::DeviceError;
use crate::rest::entity::{RequestType, RestResponse};

/// one blocking round trip; implementations must be shareable across instances
pub trait Transport: Send + Sync {
    fn send(
        &self,
        method: RequestType,
        url: &str,
        body: Option<&Value>,
    ) -> Result<RestResponse, DeviceError>;
}

/// pooled http client with one fixed timeout per instance
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, DeviceError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| {
                DeviceError::Configuration(format!("cannot build http client: {}", err))
            })?;
        Ok(HttpTransport { client })
    }
}

impl Transport for HttpTransport {
    fn send(
        &self,
        method: RequestType,
        url: &str,
        body: Option<&Value>,
    ) -> Result<RestResponse, DeviceError> {
        let mut request = match method {
            RequestType::Get => self.client.get(url),
            RequestType::Put => self.client.put(url),
            RequestType::Post => self.client.post(url),
            RequestType::Patch => self.client.patch(url),
            RequestType::Delete => self.client.delete(url),
        };

        if let Some(data) = body {
            // json() 顺带设置 Content-Type: application/json
            request = request.json(data);
        }

        let response = request.send().map_err(|err| DeviceError::Communication {
            url: url.to_string(),
            msg: err.to_string(),
        })?;

        let status = response.status().as_u16();
        // 空应答体或者非 json 应答体在这里变成 None，由调用侧决定是否算错
        let body = response.json::<Value>().ok();

        Ok(RestResponse { status, body })
    }
}

/// request record kept by the dummy transport
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: RequestType,
    pub url: String,
    pub body: Option<Value>,
}

/// offline stand-in: replays canned responses keyed by "<VERB> <url>"
///
/// 没有预置应答的请求一律回 200 空对象，方便只关心请求形状的用例
pub struct DummyTransport {
    responses: Mutex<HashMap<String, RestResponse>>,
    requests: Mutex<Vec<RecordedRequest>>,
    offline: Mutex<bool>,
}

impl DummyTransport {
    pub fn new() -> Self {
        DummyTransport {
            responses: Mutex::new(HashMap::new()),
            requests: Mutex::new(Vec::new()),
            offline: Mutex::new(false),
        }
    }

    pub fn respond_with(&self, method: RequestType, url: &str, status: u16, body: Option<Value>) {
        self.responses
            .lock()
            .unwrap()
            .insert(format!("{} {}", method.name(), url), RestResponse { status, body });
    }

    /// 模拟断链，之后所有请求都报通信错误
    pub fn set_offline(&self, offline: bool) {
        *self.offline.lock().unwrap() = offline;
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

impl Default for DummyTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for DummyTransport {
    fn send(
        &self,
        method: RequestType,
        url: &str,
        body: Option<&Value>,
    ) -> Result<RestResponse, DeviceError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            method,
            url: url.to_string(),
            body: body.cloned(),
        });

        if *self.offline.lock().unwrap() {
            return Err(DeviceError::Communication {
                url: url.to_string(),
                msg: "connection timed out".to_string(),
            });
        }

        let canned = self
            .responses
            .lock()
            .unwrap()
            .get(&format!("{} {}", method.name(), url))
            .cloned();

        Ok(canned.unwrap_or(RestResponse {
            status: 200,
            body: Some(json!({})),
        }))
    }
}

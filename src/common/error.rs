//! 错误类型模块
//! - 整个引擎共享一个错误类型，每个变体带一个稳定的数字编码
//! - rest 调用失败时携带 url / 状态码 / 应答体，方便排查现场问题

use std::error::Error;
use std::fmt;
use std::fmt::{Display, Formatter};

use serde_json::Value;

use crate::rest::entity::RequestType;

#[derive(Debug, Clone)]
pub enum DeviceError {
    /// endpoint table fault at definition time, or a bad call shape
    /// (unknown endpoint name, missing / surplus placeholder value)
    Configuration(String),
    /// the descriptor defines no template for the attempted verb
    UnsupportedOperation { endpoint: String, verb: RequestType },
    /// transport level failure: refused, timeout, dns. never carries a body
    Communication { url: String, msg: String },
    /// non-2xx status, or a 2xx without the json body the call requires
    Protocol {
        verb: RequestType,
        url: String,
        status: u16,
        body: Option<Value>,
    },
    /// an enumerated value helper did not recognise the given value
    Lookup(String),
}

impl DeviceError {
    pub fn code(&self) -> u16 {
        match self {
            DeviceError::Configuration(_) => 1000,
            DeviceError::UnsupportedOperation { .. } => 1001,
            DeviceError::Communication { .. } => 1002,
            DeviceError::Protocol { .. } => 1003,
            DeviceError::Lookup(_) => 1004,
        }
    }
}

impl Display for DeviceError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "设备引擎错误 code: {}, ", self.code())?;
        match self {
            DeviceError::Configuration(msg) => write!(f, "配置错误: {}", msg),
            DeviceError::UnsupportedOperation { endpoint, verb } => {
                write!(f, "endpoint '{}' 没有定义 {} 操作", endpoint, verb.name())
            }
            DeviceError::Communication { url, msg } => {
                write!(f, "请求 {} 通信失败: {}", url, msg)
            }
            DeviceError::Protocol {
                verb,
                url,
                status,
                body,
            } => {
                // 设备应答体里的 message 字段通常说明了失败原因
                let detail = body
                    .as_ref()
                    .and_then(|data| data["message"].as_str())
                    .unwrap_or("no message");
                write!(
                    f,
                    "{} request to {} produced status code: {} - {}",
                    verb.name(),
                    url,
                    status,
                    detail
                )
            }
            DeviceError::Lookup(msg) => write!(f, "查找失败: {}", msg),
        }
    }
}

impl Error for DeviceError {}

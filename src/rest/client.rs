//! rest 绑定客户端
//! - 每个 wrapper 实例持有一个 RestClient，表 + base_url + transport 注入后不可变
//! - 属性表项走 get / set / delete，带占位符的表项走 call_* 系列
//! - 所有失败都翻译成 DeviceError，不吞错误、不重试、不缓存

use std::sync::Arc;

use serde_json::Value;

use crate::common::error::DeviceError;
use crate::debug;
use crate::rest::entity::{
    fill_template, EndpointDescriptor, EndpointKind, RequestType, RestResponse,
};
use crate::rest::table::EndpointTable;
use crate::rest::transport::Transport;

const LOG_TAG: &str = "rest-client";

/// one bound wrapper instance: issues requests for the accessors of one table
pub struct RestClient {
    base_url: String,
    hostname: String,
    table: Arc<EndpointTable>,
    transport: Arc<dyn Transport>,
}

impl RestClient {
    pub fn new(
        table: Arc<EndpointTable>,
        base_url: &str,
        hostname: &str,
        transport: Arc<dyn Transport>,
    ) -> Self {
        RestClient {
            base_url: base_url.trim_end_matches('/').to_string(),
            hostname: hostname.to_string(),
            table,
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    /// read a property endpoint, a decodable json body is required
    pub fn get(&self, name: &str) -> Result<Value, DeviceError> {
        let descriptor = self.descriptor(name, EndpointKind::Property)?;
        let template = Self::template(descriptor, RequestType::Get)?;
        let response = self.execute(RequestType::Get, template, None)?;
        self.require_body(RequestType::Get, template, response)
    }

    /// write a property endpoint with its single setter verb, reply body is discarded
    pub fn set(&self, name: &str, body: Value) -> Result<(), DeviceError> {
        let descriptor = self.descriptor(name, EndpointKind::Property)?;
        let verb = descriptor
            .setter_verb()
            .ok_or(DeviceError::UnsupportedOperation {
                endpoint: name.to_string(),
                verb: RequestType::Put,
            })?;
        let template = Self::template(descriptor, verb)?;
        self.execute(verb, template, Some(&body))?;
        Ok(())
    }

    /// delete a fixed-path property resource
    pub fn delete(&self, name: &str) -> Result<Value, DeviceError> {
        let descriptor = self.descriptor(name, EndpointKind::Property)?;
        let template = Self::template(descriptor, RequestType::Delete)?;
        let response = self.execute(RequestType::Delete, template, None)?;
        Ok(response.body.unwrap_or(Value::Null))
    }

    /// read a parameterized endpoint, every placeholder must be supplied
    pub fn call_get(&self, name: &str, args: &[(&str, &str)]) -> Result<Value, DeviceError> {
        let descriptor = self.descriptor(name, EndpointKind::Method)?;
        let template = Self::template(descriptor, RequestType::Get)?;
        let path = fill_template(template, args)?;
        let response = self.execute(RequestType::Get, &path, None)?;
        self.require_body(RequestType::Get, &path, response)
    }

    pub fn call_put(
        &self,
        name: &str,
        args: &[(&str, &str)],
        body: Value,
    ) -> Result<Value, DeviceError> {
        self.call_write(RequestType::Put, name, args, body)
    }

    pub fn call_post(
        &self,
        name: &str,
        args: &[(&str, &str)],
        body: Value,
    ) -> Result<Value, DeviceError> {
        self.call_write(RequestType::Post, name, args, body)
    }

    pub fn call_delete(&self, name: &str, args: &[(&str, &str)]) -> Result<Value, DeviceError> {
        let descriptor = self.descriptor(name, EndpointKind::Method)?;
        let template = Self::template(descriptor, RequestType::Delete)?;
        let path = fill_template(template, args)?;
        let response = self.execute(RequestType::Delete, &path, None)?;
        Ok(response.body.unwrap_or(Value::Null))
    }

    fn call_write(
        &self,
        verb: RequestType,
        name: &str,
        args: &[(&str, &str)],
        body: Value,
    ) -> Result<Value, DeviceError> {
        let descriptor = self.descriptor(name, EndpointKind::Method)?;
        let template = Self::template(descriptor, verb)?;
        let path = fill_template(template, args)?;
        let response = self.execute(verb, &path, Some(&body))?;
        // 写操作的空应答体是合法的
        Ok(response.body.unwrap_or(Value::Null))
    }

    fn descriptor(
        &self,
        name: &str,
        kind: EndpointKind,
    ) -> Result<&EndpointDescriptor, DeviceError> {
        let descriptor = self
            .table
            .find(name)
            .ok_or(DeviceError::Configuration(format!(
                "unknown endpoint name '{}'",
                name
            )))?;
        if descriptor.kind != kind {
            let expected = match kind {
                EndpointKind::Property => "a property accessor",
                EndpointKind::Method => "a parameterized call",
            };
            return Err(DeviceError::Configuration(format!(
                "endpoint '{}' cannot be used through {}",
                name, expected
            )));
        }
        Ok(descriptor)
    }

    fn template(
        descriptor: &EndpointDescriptor,
        verb: RequestType,
    ) -> Result<&str, DeviceError> {
        descriptor
            .template(verb)
            .ok_or(DeviceError::UnsupportedOperation {
                endpoint: descriptor.name.clone(),
                verb,
            })
    }

    /// one round trip: join the url, send, translate non-2xx into a protocol error
    fn execute(
        &self,
        verb: RequestType,
        path: &str,
        body: Option<&Value>,
    ) -> Result<RestResponse, DeviceError> {
        let url = format!("{}/{}", self.base_url, path);
        debug!(LOG_TAG, "{} {} {}", self.hostname, verb.name(), url);
        let response = self.transport.send(verb, &url, body)?;
        if !response.is_success() {
            return Err(DeviceError::Protocol {
                verb,
                url,
                status: response.status,
                body: response.body,
            });
        }
        Ok(response)
    }

    fn require_body(
        &self,
        verb: RequestType,
        path: &str,
        response: RestResponse,
    ) -> Result<Value, DeviceError> {
        let status = response.status;
        response.body.ok_or(DeviceError::Protocol {
            verb,
            url: format!("{}/{}", self.base_url, path),
            status,
            body: None,
        })
    }
}

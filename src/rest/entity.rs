//! rest 绑定层的基础数据类型
//! - RequestType / EndpointKind / EndpointDescriptor 描述一个 endpoint 表项
//! - RestResponse 是 transport 解码后的应答
//! - 路径模板的 {placeholder} 解析和替换也在这里

use std::collections::HashMap;

use serde_json::Value;

use crate::common::error::DeviceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestType {
    Get,
    Put,
    Post,
    Patch,
    Delete,
}

impl RequestType {
    pub fn name(&self) -> &'static str {
        match self {
            RequestType::Get => "GET",
            RequestType::Put => "PUT",
            RequestType::Post => "POST",
            RequestType::Patch => "PATCH",
            RequestType::Delete => "DELETE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointKind {
    /// 固定路径，绑定成属性读写
    Property,
    /// 路径里带 {placeholder}，绑定成按调用填参的方法
    Method,
}

/// one logical device feature: a name plus a path template per verb
#[derive(Debug, Clone)]
pub struct EndpointDescriptor {
    pub name: String,
    pub kind: EndpointKind,
    pub doc: String,
    verbs: HashMap<RequestType, String>,
}

impl EndpointDescriptor {
    pub fn new(
        name: &str,
        kind: EndpointKind,
        doc: &str,
        verbs: HashMap<RequestType, String>,
    ) -> Self {
        EndpointDescriptor {
            name: name.to_string(),
            kind,
            doc: doc.to_string(),
            verbs,
        }
    }

    pub fn template(&self, verb: RequestType) -> Option<&str> {
        self.verbs.get(&verb).map(|template| template.as_str())
    }

    /// 属性写操作用的 verb，每个属性最多定义一个 setter
    pub fn setter_verb(&self) -> Option<RequestType> {
        [RequestType::Put, RequestType::Post, RequestType::Patch]
            .into_iter()
            .find(|verb| self.verbs.contains_key(verb))
    }
}

/// decoded reply from the transport, body is None when nothing decodable came back
#[derive(Debug, Clone)]
pub struct RestResponse {
    pub status: u16,
    pub body: Option<Value>,
}

impl RestResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// collect the placeholder names of a path template
///
/// 未闭合的 '{' 属于表定义错误，建表时就要报出来
pub fn placeholders(template: &str) -> Result<Vec<String>, DeviceError> {
    let mut names = Vec::new();
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        let after = &rest[start + 1..];
        let end = after.find('}').ok_or(DeviceError::Configuration(format!(
            "unterminated placeholder in template '{}'",
            template
        )))?;
        names.push(after[..end].to_string());
        rest = &after[end + 1..];
    }
    Ok(names)
}

/// substitute every placeholder of a template from the given arguments
///
/// 缺参、多参都按调用配置错误处理
pub fn fill_template(template: &str, args: &[(&str, &str)]) -> Result<String, DeviceError> {
    let names = placeholders(template)?;

    for (key, _) in args {
        if !names.iter().any(|name| name == key) {
            return Err(DeviceError::Configuration(format!(
                "argument '{}' matches no placeholder of template '{}'",
                key, template
            )));
        }
    }

    let mut resolved = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        resolved.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        // placeholders() 已经验证过闭合
        let end = after.find('}').unwrap_or(after.len());
        let key = &after[..end];
        let value = args
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| *value)
            .ok_or(DeviceError::Configuration(format!(
                "missing value for placeholder '{{{}}}' in template '{}'",
                key, template
            )))?;
        resolved.push_str(value);
        rest = &after[end + 1..];
    }
    resolved.push_str(rest);
    Ok(resolved)
}

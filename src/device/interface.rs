//! 网络接口枚举
//! - mgmt 是管理口，media0 / media1 是媒体口
//! - rest 路径里用的是 sfp 槽位名，内核里用的是网卡名

use crate::common::error::DeviceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interface {
    Mgmt,
    Media0,
    Media1,
}

impl Interface {
    /// name used by the linux kernel on the unit
    pub fn kernel_name(&self) -> &'static str {
        match self {
            Interface::Mgmt => "eth0",
            Interface::Media0 => "phabEth0",
            Interface::Media1 => "phabEth1",
        }
    }

    /// human readable name for log lines
    pub fn log_name(&self) -> &'static str {
        match self {
            Interface::Mgmt => "management interface",
            Interface::Media0 => "media interface 0",
            Interface::Media1 => "media interface 1",
        }
    }

    /// sfp slot name used in rest paths, the management port has no slot
    pub fn sfp_name(&self) -> Result<&'static str, DeviceError> {
        match self {
            Interface::Mgmt => Err(DeviceError::Lookup(
                "management interface has no sfp slot".to_string(),
            )),
            Interface::Media0 => Ok("sfpA"),
            Interface::Media1 => Ok("sfpB"),
        }
    }

    pub fn from_sfp_name(name: &str) -> Result<Self, DeviceError> {
        match name {
            "sfpA" => Ok(Interface::Media0),
            "sfpB" => Ok(Interface::Media1),
            other => Err(DeviceError::Lookup(format!(
                "unknown sfp slot name '{}'",
                other
            ))),
        }
    }
}

//! 单台 qx 设备的组合根
//! - 在这里拼 base_url，建快、慢两个 transport，注入各 feature wrapper
//! - wrapper 之间不互相持有引用，只共享 transport

use std::sync::Arc;
use std::time::Duration;

use crate::common::error::DeviceError;
use crate::common::setting::Settings;
use crate::device::generator::Generator;
use crate::device::ptp::Ptp;
use crate::device::sfp::SfpManagement;
use crate::info;
use crate::rest::transport::{HttpTransport, Transport};

const LOG_TAG: &str = "qx-device";

/// handle for one physical unit, feature apis hang off the public fields
pub struct Qx {
    hostname: String,
    base_url: String,
    pub generator: Generator,
    pub ptp: Ptp,
    pub sfp: SfpManagement,
}

impl Qx {
    /// build a handle with the timeouts from the settings file
    pub fn new(hostname: &str) -> Result<Self, DeviceError> {
        let settings = Settings::get();
        Self::with_timeouts(
            hostname,
            settings.device.rest_port,
            Duration::from_secs(settings.rest.fast_timeout_secs),
            Duration::from_secs(settings.rest.slow_timeout_secs),
        )
    }

    pub fn with_timeouts(
        hostname: &str,
        rest_port: u16,
        fast_timeout: Duration,
        slow_timeout: Duration,
    ) -> Result<Self, DeviceError> {
        let fast: Arc<dyn Transport> = Arc::new(HttpTransport::new(fast_timeout)?);
        let slow: Arc<dyn Transport> = Arc::new(HttpTransport::new(slow_timeout)?);
        Ok(Self::with_transports(hostname, rest_port, fast, slow))
    }

    /// substitute both transports, used to drive the wrappers offline
    pub fn with_transports(
        hostname: &str,
        rest_port: u16,
        fast: Arc<dyn Transport>,
        slow: Arc<dyn Transport>,
    ) -> Self {
        let base_url = format!("http://{}:{}/api/v1", hostname, rest_port);

        let qx = Qx {
            // generator 接口响应慢，单独走慢速 transport
            generator: Generator::new(&base_url, hostname, slow),
            ptp: Ptp::new(&base_url, hostname, fast.clone()),
            sfp: SfpManagement::new(&base_url, hostname, fast),
            hostname: hostname.to_string(),
            base_url,
        };
        info!(LOG_TAG, "created instance of Qx (hostname: {})", qx.hostname);
        qx
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::interface::Interface;
    use crate::rest::transport::DummyTransport;
    use serde_json::json;

    #[test]
    fn test_wrappers_are_split_across_traffic_classes() {
        let fast = Arc::new(DummyTransport::new());
        let slow = Arc::new(DummyTransport::new());
        let qx = Qx::with_transports(
            "qx-020437",
            8080,
            fast.clone() as Arc<dyn Transport>,
            slow.clone() as Arc<dyn Transport>,
        );

        assert_eq!(qx.base_url(), "http://qx-020437:8080/api/v1");

        qx.generator.status().unwrap();
        qx.sfp.get_info(Interface::Media0).unwrap();
        qx.ptp.get_info(Interface::Media0).unwrap();

        // generator 走慢速，其余走快速
        assert_eq!(slow.requests().len(), 1);
        assert_eq!(fast.requests().len(), 2);
        assert_eq!(
            slow.last_request().unwrap().url,
            "http://qx-020437:8080/api/v1/generator/status"
        );
    }

    #[test]
    fn test_bouncing_box_through_the_composition_root() {
        let fast = Arc::new(DummyTransport::new());
        let slow = Arc::new(DummyTransport::new());
        slow.respond_with(
            crate::rest::entity::RequestType::Get,
            "http://qx-020437:8080/api/v1/generator/bouncingBox",
            200,
            Some(json!({"enabled": false})),
        );
        let qx = Qx::with_transports(
            "qx-020437",
            8080,
            fast as Arc<dyn Transport>,
            slow as Arc<dyn Transport>,
        );
        assert!(!qx.generator.bouncing_box().unwrap());
    }
}

//! sfp 接口管理 wrapper

use std::sync::Arc;

use lazy_static::lazy_static;
use serde_json::Value;

use crate::common::error::DeviceError;
use crate::device::interface::Interface;
use crate::rest::client::RestClient;
use crate::rest::entity::RequestType::{Get, Put};
use crate::rest::table::EndpointTable;
use crate::rest::transport::Transport;

lazy_static! {
    static ref TABLE: Arc<EndpointTable> = Arc::new(
        EndpointTable::builder()
            .method("info", &[(Get, "sfpInfo/{interface}")], "SFP information")
            .method(
                "ip_network",
                &[
                    (Get, "sfpIpNetwork/{interface}"),
                    (Put, "sfpIpNetwork/{interface}"),
                ],
                "SFP IP network information",
            )
            .build()
            .expect("sfp endpoint table")
    );
}

/// sfp module information and ip network configuration
pub struct SfpManagement {
    client: RestClient,
}

impl SfpManagement {
    pub fn new(base_url: &str, hostname: &str, transport: Arc<dyn Transport>) -> Self {
        SfpManagement {
            client: RestClient::new(TABLE.clone(), base_url, hostname, transport),
        }
    }

    pub fn get_info(&self, interface: Interface) -> Result<Value, DeviceError> {
        self.client
            .call_get("info", &[("interface", interface.sfp_name()?)])
    }

    pub fn get_ip_network(&self, interface: Interface) -> Result<Value, DeviceError> {
        self.client
            .call_get("ip_network", &[("interface", interface.sfp_name()?)])
    }

    pub fn put_ip_network(
        &self,
        interface: Interface,
        config: Value,
    ) -> Result<Value, DeviceError> {
        self.client
            .call_put("ip_network", &[("interface", interface.sfp_name()?)], config)
    }
}

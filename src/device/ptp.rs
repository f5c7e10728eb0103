//! ptp 配置和状态查询 wrapper

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
            .property(
                "reference",
                &[(Get, "timing/reference"), (Put, "timing/reference")],
                "Details of the current timing reference.",
            )
            .method(
                "config",
                &[
                    (Get, "timing/ptp/{interface}/config"),
                    (Put, "timing/ptp/{interface}/config"),
                ],
                "PTP configuration settings",
            )
            .method(
                "info",
                &[
                    (Get, "timing/ptp/{interface}/info"),
                    (Put, "timing/ptp/{interface}/info"),
                ],
                "PTP status information",
            )
            .build()
            .expect("ptp endpoint table")
    );
}

/// precision time protocol inspection and limited configuration
pub struct Ptp {
    client: RestClient,
}

impl Ptp {
    pub fn new(base_url: &str, hostname: &str, transport: Arc<dyn Transport>) -> Self {
        Ptp {
            client: RestClient::new(TABLE.clone(), base_url, hostname, transport),
        }
    }

    pub fn reference(&self) -> Result<Value, DeviceError> {
        self.client.get("reference")
    }

    pub fn set_reference(&self, reference: Value) -> Result<(), DeviceError> {
        self.client.set("reference", reference)
    }

    pub fn get_config(&self, interface: Interface) -> Result<Value, DeviceError> {
        self.client
            .call_get("config", &[("interface", interface.sfp_name()?)])
    }

    pub fn put_config(&self, interface: Interface, config: Value) -> Result<Value, DeviceError> {
        self.client
            .call_put("config", &[("interface", interface.sfp_name()?)], config)
    }

    pub fn get_info(&self, interface: Interface) -> Result<Value, DeviceError> {
        self.client
            .call_get("info", &[("interface", interface.sfp_name()?)])
    }

    /// reset the ptp status counters
    pub fn put_info(&self, interface: Interface, body: Value) -> Result<Value, DeviceError> {
        self.client
            .call_put("info", &[("interface", interface.sfp_name()?)], body)
    }

    /// ptp lock status, absent field counts as unlocked
    pub fn is_locked(&self, interface: Interface) -> Result<bool, DeviceError> {
        let info = self.get_info(interface)?;
        Ok(info["ptpLocked"].as_bool().unwrap_or(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::entity::RequestType;
    use crate::rest::transport::DummyTransport;
    use serde_json::json;

    const BASE: &str = "http://qx-test:8080/api/v1";

    fn ptp(transport: &Arc<DummyTransport>) -> Ptp {
        Ptp::new(BASE, "qx-test", transport.clone() as Arc<dyn Transport>)
    }

    #[test]
    fn test_is_locked_reads_ptp_locked_field() {
        let transport = Arc::new(DummyTransport::new());
        transport.respond_with(
            RequestType::Get,
            &format!("{}/timing/ptp/sfpA/info", BASE),
            200,
            Some(json!({"ptpLocked": true})),
        );
        let ptp = ptp(&transport);
        assert!(ptp.is_locked(Interface::Media0).unwrap());
    }

    #[test]
    fn test_is_locked_defaults_to_false_without_field() {
        let transport = Arc::new(DummyTransport::new());
        transport.respond_with(
            RequestType::Get,
            &format!("{}/timing/ptp/sfpB/info", BASE),
            200,
            Some(json!({"grandmasterId": "00:11:22"})),
        );
        let ptp = ptp(&transport);
        assert!(!ptp.is_locked(Interface::Media1).unwrap());
    }

    #[test]
    fn test_config_path_uses_sfp_slot_name() {
        let transport = Arc::new(DummyTransport::new());
        let ptp = ptp(&transport);
        ptp.put_config(Interface::Media0, json!({"domain": 127})).unwrap();

        let recorded = transport.last_request().unwrap();
        assert_eq!(recorded.method, RequestType::Put);
        assert_eq!(recorded.url, format!("{}/timing/ptp/sfpA/config", BASE));
        assert_eq!(recorded.body.unwrap(), json!({"domain": 127}));
    }

    #[test]
    fn test_mgmt_interface_is_rejected_before_any_request() {
        let transport = Arc::new(DummyTransport::new());
        let ptp = ptp(&transport);
        let err = ptp.get_info(Interface::Mgmt).unwrap_err();
        assert!(matches!(err, DeviceError::Lookup(_)));
        assert!(transport.requests().is_empty());
    }
}

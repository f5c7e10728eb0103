//! 信号发生器 wrapper
//! - generator 的接口普遍比其他路径慢，要用慢速流量类别的 transport

use std::sync::Arc;

use lazy_static::lazy_static;
use serde_json::{json, Value};

use crate::common::error::DeviceError;
use crate::info;
use crate::rest::client::RestClient;
use crate::rest::entity::RequestType::{Get, Put};
use crate::rest::table::EndpointTable;
use crate::rest::transport::Transport;
use crate::util::json::get_bool;

const LOG_TAG: &str = "generator";

lazy_static! {
    static ref TABLE: Arc<EndpointTable> = Arc::new(
        EndpointTable::builder()
            .property(
                "bouncing_box",
                &[(Get, "generator/bouncingBox"), (Put, "generator/bouncingBox")],
                "State of the bouncing box.",
            )
            .property(
                "ident",
                &[(Get, "generator/ident"), (Put, "generator/ident")],
                "State of the generator ident message.",
            )
            .property(
                "standard",
                &[(Get, "generator/standard"), (Put, "generator/standard")],
                "The generated standard.",
            )
            .property("status", &[(Get, "generator/status")], "Current generator status.")
            .property(
                "test_pattern",
                &[(Get, "generator/testPattern"), (Put, "generator/testPattern")],
                "Current generator test pattern.",
            )
            .property(
                "timecode",
                &[(Get, "generator/timecode"), (Put, "generator/timecode")],
                "Configuration of the timecode generator.",
            )
            .build()
            .expect("generator endpoint table")
    );
}

/// signal generator configuration and status
pub struct Generator {
    client: RestClient,
}

impl Generator {
    pub fn new(base_url: &str, hostname: &str, transport: Arc<dyn Transport>) -> Self {
        Generator {
            client: RestClient::new(TABLE.clone(), base_url, hostname, transport),
        }
    }

    pub fn standard(&self) -> Result<Value, DeviceError> {
        self.client.get("standard")
    }

    /// configure a new generated standard
    pub fn set_standard(&self, standard: Value) -> Result<(), DeviceError> {
        info!(LOG_TAG, "{} - set generator standard", self.client.hostname());
        self.client.set("standard", standard)
    }

    pub fn status(&self) -> Result<Value, DeviceError> {
        self.client.get("status")
    }

    pub fn test_pattern(&self) -> Result<Value, DeviceError> {
        self.client.get("test_pattern")
    }

    pub fn set_test_pattern(&self, pattern: Value) -> Result<(), DeviceError> {
        self.client.set("test_pattern", pattern)
    }

    pub fn timecode(&self) -> Result<Value, DeviceError> {
        self.client.get("timecode")
    }

    pub fn set_timecode(&self, config: Value) -> Result<(), DeviceError> {
        self.client.set("timecode", config)
    }

    pub fn ident(&self) -> Result<Value, DeviceError> {
        self.client.get("ident")
    }

    pub fn set_ident(&self, ident: Value) -> Result<(), DeviceError> {
        self.client.set("ident", ident)
    }

    /// enabled state of the bouncing box on the generated stream
    pub fn bouncing_box(&self) -> Result<bool, DeviceError> {
        let state = self.client.get("bouncing_box")?;
        get_bool(&state, "enabled")
    }

    pub fn set_bouncing_box(&self, enable: bool) -> Result<(), DeviceError> {
        self.client.set("bouncing_box", json!({ "enabled": enable }))
    }
}

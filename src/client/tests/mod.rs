//! Test utilities and mock retrieval for client testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::client::{NwisClient, RdbSource};
use crate::config::NwisConfig;
use crate::error::Result;
use crate::models::QueryParams;

// Test modules
mod nwis_tests;

pub const BASE: &str = "http://nwis.test/nwis";
pub const WATERDATA: &str = "http://waterdata.test";

/// Mock source answering every request to a URL with a fixed body
#[derive(Debug, Default)]
pub struct MockSource {
    bodies: HashMap<String, String>,
    calls: Mutex<Vec<(String, Vec<QueryParams>)>>,
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_body(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.bodies.insert(url.into(), body.into());
        self
    }

    /// URLs and parameter sets seen so far, in call order
    pub fn calls(&self) -> Vec<(String, Vec<QueryParams>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl RdbSource for MockSource {
    async fn retrieve_text(&self, url: &str, params: &[QueryParams]) -> Result<Vec<String>> {
        self.calls
            .lock()
            .unwrap()
            .push((url.to_string(), params.to_vec()));
        let body = self.bodies.get(url).cloned().unwrap_or_default();
        Ok(params.iter().map(|_| body.clone()).collect())
    }
}

/// Helper to create a client over a mock source with test endpoints
pub fn create_test_client(source: MockSource) -> NwisClient<MockSource> {
    let config = NwisConfig::default()
        .with_waterservices_url(BASE)
        .with_waterdata_url(WATERDATA);
    NwisClient::with_source(source, config)
}

pub const IV_BODY: &str = "#
agency_cd\tsite_no\tdatetime\ttz_cd\t69928_00060\t69928_00060_cd
5s\t15s\t20d\t6s\t14n\t10s
USGS\t01646500\t2023-06-01 00:00\tEDT\t10500\tP
USGS\t01646500\t2023-06-01 00:15\tEDT\t10400\tP
";

pub const SITE_BODY: &str = "#
agency_cd\tsite_no\tstation_nm\tstate_cd\tcounty_cd
5s\t15s\t50s\t2s\t3s
USGS\t01646500\tPOTOMAC RIVER NEAR WASH, DC LITTLE FALLS PUMP STA\t24\t031
";

pub const PEAK_BODY: &str = "#
agency_cd\tsite_no\tpeak_dt\tpeak_tm\tpeak_va\tpeak_cd\tgage_ht
5s\t15s\t10d\t6s\t8s\t27s\t8s
USGS\t01646500\t1936-03-19\t\t484000\t\t28.10
USGS\t01646500\t1942-10-16\t\t447000\t\t26.91
";

pub const ANNUAL_STAT_BODY: &str = "#
agency_cd\tsite_no\tparameter_cd\tts_id\tloc_web_ds\tyear_nu\tmean_va
5s\t15s\t5s\t10n\t15s\t4s\t12s
USGS\t01646500\t00060\t69928\t\t2020\t12850
";

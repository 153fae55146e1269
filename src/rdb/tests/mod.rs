//! Test utilities and RDB fixtures for normalizer testing

use crate::models::QueryParams;
use crate::rdb::RdbResponse;


/// Instantaneous discharge for one site, three readings
pub const IV_RDB: &str = "# ---------------------------------- WARNING ----------------------------------------
# Some of the data that you have obtained from this U.S. Geological Survey database
# may not have received Director's approval.
#
# Data provided for site 01646500
#            TS   parameter     Description
#         69928       00060     Discharge, cubic feet per second
#
agency_cd\tsite_no\tdatetime\ttz_cd\t69928_00060\t69928_00060_cd
5s\t15s\t20d\t6s\t14n\t10s
USGS\t01646500\t2023-06-01 00:00\tEDT\t10500\tP
USGS\t01646500\t2023-06-01 00:15\tEDT\t10400\tP
USGS\t01646500\t2023-06-01 00:30\tEDT\t<NA>\tP
";

/// Second response for another site, same layout as [`IV_RDB`]
pub const IV_RDB_SECOND_SITE: &str = "# Data provided for site 01638500
#
agency_cd\tsite_no\tdatetime\ttz_cd\t69928_00060\t69928_00060_cd
5s\t15s\t20d\t6s\t14n\t10s
USGS\t01638500\t2023-06-01 00:00\tEDT\t9800\tP
";

/// Only comments; no header and no data
pub const COMMENT_ONLY_RDB: &str = "# No sites found matching all criteria
#
";

/// Helper to pair fixture bodies with empty request parameters
pub fn responses(bodies: &[&str]) -> Vec<RdbResponse> {
    bodies
        .iter()
        .map(|body| RdbResponse::new(QueryParams::new(), *body))
        .collect()
}

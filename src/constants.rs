//! Application constants for NWIS RDB processing
//!
//! This module contains the format markers, lookup tables, default values
//! and column names used throughout the normalizer, reshapers and client.

// =============================================================================
// RDB Format Markers
// =============================================================================

/// Comment / metadata line prefix in RDB responses
pub const RDB_COMMENT_PREFIX: char = '#';

/// RDB field delimiter
pub const RDB_FIELD_DELIMITER: char = '\t';

/// Literal missing-value token emitted by NWIS
pub const RDB_NA_TOKEN: &str = "<NA>";

/// Substring marking a 503 page returned in place of RDB text
pub const SERVICE_UNAVAILABLE_MARKER: &str = "503 Service Unavailable";

/// Pattern matching repeated header and type-marker rows in `agency_cd`.
///
/// When several responses are concatenated, every body after the first
/// contributes its own header (`agency_cd`) and marker (`5s`) lines as data.
pub const HEADER_ARTIFACT_PATTERN: &str = "agency_cd|5s";

// =============================================================================
// Timezone Lookup
// =============================================================================

/// Site-reported timezone abbreviations mapped to IANA zone and UTC offset (seconds).
///
/// Anything not listed here is left timezone-naive.
pub const TIMEZONE_ABBREVIATIONS: &[(&str, &str, i32)] = &[
    ("EST", "America/New_York", -5 * 3600),
    ("EDT", "America/New_York", -4 * 3600),
    ("CST", "America/Chicago", -6 * 3600),
    ("CDT", "America/Chicago", -5 * 3600),
    ("MST", "America/Denver", -7 * 3600),
    ("MDT", "America/Denver", -6 * 3600),
    ("PST", "America/Los_Angeles", -8 * 3600),
    ("PDT", "America/Los_Angeles", -7 * 3600),
];

// =============================================================================
// State FIPS Lookup
// =============================================================================

/// State FIPS codes mapped to USPS abbreviations (measurements / peak URLs)
pub const STATE_FIPS: &[(u32, &str)] = &[
    (1, "AL"),
    (2, "AK"),
    (4, "AZ"),
    (5, "AR"),
    (6, "CA"),
    (8, "CO"),
    (9, "CT"),
    (10, "DE"),
    (11, "DC"),
    (12, "FL"),
    (13, "GA"),
    (15, "HI"),
    (16, "ID"),
    (17, "IL"),
    (18, "IN"),
    (19, "IA"),
    (20, "KS"),
    (21, "KY"),
    (22, "LA"),
    (23, "ME"),
    (24, "MD"),
    (25, "MA"),
    (26, "MI"),
    (27, "MN"),
    (28, "MS"),
    (29, "MO"),
    (30, "MT"),
    (31, "NE"),
    (32, "NV"),
    (33, "NH"),
    (34, "NJ"),
    (35, "NM"),
    (36, "NY"),
    (37, "NC"),
    (38, "ND"),
    (39, "OH"),
    (40, "OK"),
    (41, "OR"),
    (42, "PA"),
    (44, "RI"),
    (45, "SC"),
    (46, "SD"),
    (47, "TN"),
    (48, "TX"),
    (49, "UT"),
    (50, "VT"),
    (51, "VA"),
    (53, "WA"),
    (54, "WV"),
    (55, "WI"),
    (56, "WY"),
];

/// Look up the USPS abbreviation for a state FIPS code
pub fn state_abbreviation(fips: u32) -> Option<&'static str> {
    STATE_FIPS
        .iter()
        .find(|(code, _)| *code == fips)
        .map(|(_, abbr)| *abbr)
}

// =============================================================================
// Service Endpoints
// =============================================================================

/// Default base URL for the NWIS web services
pub const DEFAULT_WATERSERVICES_URL: &str = "https://waterservices.usgs.gov/nwis";

/// Default base URL for the legacy per-state NWIS pages
pub const DEFAULT_WATERDATA_URL: &str = "https://nwis.waterdata.usgs.gov";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Default number of concurrent requests per batch
pub const DEFAULT_MAX_CONCURRENT_REQUESTS: usize = 4;

/// Date format accepted by NWIS for `startDT` / `endDT`
pub const NWIS_DATE_FORMAT: &str = "%Y-%m-%d";

// =============================================================================
// Statistics Defaults
// =============================================================================

/// Statistic selection sent when the caller names none
pub mod stat_defaults {
    pub const STAT_TYPE: &str = "all";
}

// =============================================================================
// Column Name Constants
// =============================================================================

/// Standard column names in NWIS RDB tables
pub mod columns {
    // Keys
    pub const AGENCY: &str = "agency_cd";
    pub const SITE: &str = "site_no";
    pub const PARAMETER: &str = "parameter_cd";
    pub const TS_ID: &str = "ts_id";

    // Instantaneous / daily values
    pub const DATETIME: &str = "datetime";
    pub const TZ: &str = "tz_cd";

    // Statistics
    pub const MONTH: &str = "month_nu";
    pub const DAY: &str = "day_nu";
    pub const YEAR: &str = "year_nu";

    // Groundwater levels
    pub const LEV_DATE: &str = "lev_dt";
    pub const LEV_TIME: &str = "lev_tm";
    pub const LEV_TZ: &str = "lev_tz_cd";

    // Measurements / peak
    pub const MEASUREMENT_DATE: &str = "measurement_dt";
    pub const PEAK_DATE: &str = "peak_dt";

    // Site metadata
    pub const STATE: &str = "state_cd";

    /// Name of the index column in wide tables
    pub const INDEX: &str = "Datetime";

    /// Quality / flag companion column suffix
    pub const CODE_SUFFIX: &str = "_cd";
}

/// Column names that always stay textual during type inference
pub const IDENTIFIER_COLUMNS: &[&str] = &[
    columns::AGENCY,
    columns::SITE,
    columns::PARAMETER,
    columns::TS_ID,
    columns::DATETIME,
    columns::TZ,
];

/// Column name suffixes that always stay textual during type inference
pub const IDENTIFIER_SUFFIXES: &[&str] = &["_cd", "_dt", "_tm", "_nm", "_no", "_id", "_ds"];

//! Test utilities and RDB fixtures for reshaper testing

use crate::models::LongTable;
use crate::rdb::parse_rdb;


/// Two sites with disjoint timestamps and different parameters
pub const TWO_SITE_IV_RDB: &str = "#
agency_cd\tsite_no\tdatetime\ttz_cd\t00060\t00060_cd\t00065\t00065_cd
5s\t15s\t20d\t6s\t14n\t10s\t14n\t10s
USGS\t01646500\t2023-06-01 00:00\tEDT\t10500\tP\t<NA>\t<NA>
USGS\t01646500\t2023-06-01 00:15\tEDT\t10400\tP\t<NA>\t<NA>
USGS\t01638500\t2023-06-01 00:05\tEDT\t<NA>\t<NA>\t3.12\tP
";

/// The same instant reported by an Eastern and a Central site
pub const CROSS_ZONE_IV_RDB: &str = "#
agency_cd\tsite_no\tdatetime\ttz_cd\t00060
5s\t15s\t20d\t6s\t14n
USGS\t01646500\t2023-06-01 01:00\tEDT\t10500
USGS\t05586100\t2023-06-01 00:00\tCDT\t21300
";

/// Daily statistics for one series, deliberately out of order
pub const DAILY_STAT_RDB: &str = "#
agency_cd\tsite_no\tparameter_cd\tts_id\tloc_web_ds\tmonth_nu\tday_nu\tbegin_yr\tend_yr\tcount_nu\tmean_va\tp50_va
5s\t15s\t5s\t10n\t15s\t3n\t3n\t6n\t6n\t8n\t12s\t12s
USGS\t01646500\t00060\t69928\t\t1\t2\t1930\t2022\t93\t13100\t9400
USGS\t01646500\t00060\t69928\t\t1\t1\t1930\t2022\t93\t13500\t9860
USGS\t01646500\t00060\t69928\t\t2\t29\t1932\t2020\t23\t12800\t10500
";

/// Annual statistics for two years
pub const ANNUAL_STAT_RDB: &str = "#
agency_cd\tsite_no\tparameter_cd\tts_id\tloc_web_ds\tyear_nu\tmean_va
5s\t15s\t5s\t10n\t15s\t4s\t12s
USGS\t01646500\t00060\t69928\t\t2020\t12850
USGS\t01646500\t00060\t69928\t\t2021\t10120
";

/// Monthly statistics for two series at the same site
pub const MONTHLY_STAT_RDB: &str = "#
agency_cd\tsite_no\tparameter_cd\tts_id\tyear_nu\tmonth_nu\tmean_va
5s\t15s\t5s\t10n\t4s\t2s\t12s
USGS\t01646500\t00065\t69930\t2021\t1\t3.1
USGS\t01646500\t00060\t69928\t2021\t1\t11200
USGS\t01646500\t00060\t69928\t2021\t2\t14800
";

/// Groundwater levels, the second reading without a time
pub const GWLEVELS_RDB: &str = "#
agency_cd\tsite_no\tlev_dt\tlev_tm\tlev_tz_cd\tlev_va\tlev_status_cd
5s\t15s\t10d\t5d\t6s\t12s\t1s
USGS\t394829074053502\t2022-03-14\t10:30\tEDT\t9.52\t1
USGS\t394829074053502\t2022-09-20\t\t\t10.11\t1
";

/// Field measurements, one with a partial and one with a bad date
pub const MEASUREMENTS_RDB: &str = "#
agency_cd\tsite_no\tmeasurement_nu\tmeasurement_dt\ttz_cd\tgage_height_va\tdischarge_va
5s\t15s\t6s\t19d\t6s\t12s\t12s
USGS\t01646500\t1101\t2021-04-06 10:27:00\tEDT\t4.31\t9850
USGS\t01646500\t1102\t1954-09\t\t\t4200
USGS\t01646500\t1103\tunknown\t\t5.02\t12100
";

/// Parse a fixture that is known to be valid
pub fn table(rdb: &str) -> LongTable {
    parse_rdb(rdb).unwrap()
}

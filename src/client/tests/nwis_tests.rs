//! Tests for the NWIS service adapters

use super::*;
use crate::client::{Service, SiteQuery};
use crate::error::NwisError;
use crate::models::Value;
use crate::reshape::{StatOptions, StatReportType, StatYearType, TimeSeriesOptions};

#[test]
fn test_service_urls() {
    let client = create_test_client(MockSource::new());

    assert_eq!(
        client.service_url(Service::InstantaneousValues),
        "http://nwis.test/nwis/iv/"
    );
    assert_eq!(
        client.service_url(Service::Statistics),
        "http://nwis.test/nwis/stat/"
    );
    assert_eq!(
        client.state_url("md", Service::Peak),
        "http://waterdata.test/md/nwis/peak"
    );
}

#[tokio::test]
async fn test_iv_drops_codes_by_default() {
    let source = MockSource::new().with_body(format!("{}/iv/", BASE), IV_BODY);
    let client = create_test_client(source);

    let query = SiteQuery::new(["01646500"])
        .with_parameters(["00060"])
        .with_range("2023/06/01", "2023/06/02");
    let wide = client.iv(&query, &TimeSeriesOptions::default()).await.unwrap();

    assert_eq!(wide.len(), 2);
    assert_eq!(wide.column_names(), vec!["USGS_01646500_69928_00060"]);

    let calls = client.source().calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].1[0].get("startDT"), Some("2023-06-01"));
    assert_eq!(calls[0].1[0].get("sites"), Some("01646500"));
}

#[tokio::test]
async fn test_dv_keeps_codes_when_asked() {
    let source = MockSource::new().with_body(format!("{}/dv/", BASE), IV_BODY);
    let client = create_test_client(source);

    let options = TimeSeriesOptions {
        include_codes: true,
    };
    let wide = client
        .dv(&SiteQuery::new(["01646500"]), &options)
        .await
        .unwrap();

    assert!(wide.column("USGS_01646500_69928_00060_cd").is_some());
}

#[tokio::test]
async fn test_stat_validates_before_request() {
    let client = create_test_client(MockSource::new());
    let options = StatOptions::new().with_year_type(StatYearType::Water);

    let result = client.stat(&SiteQuery::new(["01646500"]), &options).await;

    assert!(matches!(
        result,
        Err(NwisError::InvalidStatConfiguration { .. })
    ));
    assert!(client.source().calls().is_empty());
}

#[tokio::test]
async fn test_stat_annual_water_year() {
    let source = MockSource::new().with_body(format!("{}/stat/", BASE), ANNUAL_STAT_BODY);
    let client = create_test_client(source);
    let options = StatOptions::new()
        .with_report_type(StatReportType::Annual)
        .with_year_type(StatYearType::Water);

    let wide = client
        .stat(&SiteQuery::new(["01646500"]), &options)
        .await
        .unwrap();

    assert_eq!(wide.index[0].to_string(), "2019-10-01");
    let params = &client.source().calls()[0].1[0];
    assert_eq!(params.get("statReportType"), Some("annual"));
    assert_eq!(params.get("statYearType"), Some("water"));
}

#[tokio::test]
async fn test_site_forces_expanded_output() {
    let source = MockSource::new().with_body(format!("{}/site/", BASE), SITE_BODY);
    let client = create_test_client(source);

    let table = client.site(&SiteQuery::new(["01646500"])).await.unwrap();

    assert_eq!(table.len(), 1);
    assert_eq!(table.text(0, "state_cd").as_deref(), Some("24"));
    let params = &client.source().calls()[0].1[0];
    assert_eq!(params.get("siteOutput"), Some("expanded"));
    assert_eq!(params.get("siteStatus"), Some("all"));
}

#[tokio::test]
async fn test_peak_uses_state_page() {
    let source = MockSource::new()
        .with_body(format!("{}/site/", BASE), SITE_BODY)
        .with_body(format!("{}/md/nwis/peak", WATERDATA), PEAK_BODY);
    let client = create_test_client(source);

    let wide = client.peak("01646500").await.unwrap();

    assert_eq!(wide.len(), 2);
    assert_eq!(
        wide.column_names(),
        vec!["peak_tm", "peak_va", "peak_cd", "gage_ht"]
    );
    assert_eq!(wide.value(0, "peak_va"), Some(&Value::Integer(484000)));

    let calls = client.source().calls();
    assert_eq!(calls[1].0, "http://waterdata.test/md/nwis/peak");
    assert_eq!(calls[1].1[0].get("format"), Some("rdb"));
    assert_eq!(calls[1].1[0].get("site_no"), Some("01646500"));
}

#[tokio::test]
async fn test_measurements_request_expanded_format() {
    let source = MockSource::new()
        .with_body(format!("{}/site/", BASE), SITE_BODY)
        .with_body(
            format!("{}/md/nwis/measurements", WATERDATA),
            "#\nagency_cd\tsite_no\tmeasurement_dt\tdischarge_va\n5s\t15s\t19d\t12s\nUSGS\t01646500\t2021-04-06 10:27:00\t9850\n",
        );
    let client = create_test_client(source);

    let wide = client.measurements("01646500").await.unwrap();

    assert_eq!(wide.len(), 1);
    assert_eq!(client.source().calls()[1].1[0].get("format"), Some("rdb_expanded"));
}

#[tokio::test]
async fn test_unknown_state_has_no_measurements() {
    let site = SITE_BODY.replace("\t24\t", "\t72\t");
    let source = MockSource::new().with_body(format!("{}/site/", BASE), site);
    let client = create_test_client(source);

    let result = client.measurements("01646500").await;

    assert!(matches!(result, Err(NwisError::NoMeasurements { site }) if site == "01646500"));
}

#[tokio::test]
async fn test_service_unavailable_propagates() {
    let source = MockSource::new().with_body(
        format!("{}/gwlevels/", BASE),
        "<html><body><h1>503 Service Unavailable</h1></body></html>",
    );
    let client = create_test_client(source);

    let result = client.gwlevels(&SiteQuery::new(["394829074053502"])).await;

    assert!(matches!(result, Err(NwisError::ServiceUnavailable { .. })));
}

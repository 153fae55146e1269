//! Request parameter construction for the site-based NWIS services

use crate::datetime::normalize_request_date;
use crate::error::{NwisError, Result};
use crate::models::QueryParams;

/// Which sites and what time window to request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteQuery {
    /// Site numbers, e.g. `01646500`
    pub sites: Vec<String>,
    /// Two-letter state postal code, as an alternative to explicit sites
    pub state_cd: Option<String>,
    /// Five-digit parameter codes, e.g. `00060` for discharge
    pub parameter_cd: Vec<String>,
    /// ISO-8601 duration ending now, e.g. `P7D`
    pub period: Option<String>,
    pub start_dt: Option<String>,
    pub end_dt: Option<String>,
}

impl SiteQuery {
    pub fn new<I, S>(sites: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            sites: sites.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn for_state(state_cd: impl Into<String>) -> Self {
        Self {
            state_cd: Some(state_cd.into()),
            ..Default::default()
        }
    }

    pub fn with_parameters<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parameter_cd = codes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_period(mut self, period: impl Into<String>) -> Self {
        self.period = Some(period.into());
        self
    }

    pub fn with_range(mut self, start_dt: impl Into<String>, end_dt: impl Into<String>) -> Self {
        self.start_dt = Some(start_dt.into());
        self.end_dt = Some(end_dt.into());
        self
    }

    pub fn with_start(mut self, start_dt: impl Into<String>) -> Self {
        self.start_dt = Some(start_dt.into());
        self
    }

    /// Build request parameters.
    ///
    /// Start and end dates are normalized to `YYYY-MM-DD`; a period cannot be
    /// combined with either of them.
    pub fn to_params(&self) -> Result<QueryParams> {
        if self.sites.is_empty() && self.state_cd.is_none() {
            return Err(NwisError::configuration(
                "query needs at least one site or a state code",
            ));
        }
        if self.period.is_some() && (self.start_dt.is_some() || self.end_dt.is_some()) {
            return Err(NwisError::configuration(
                "period cannot be combined with startDT/endDT",
            ));
        }

        let mut params = QueryParams::new();
        if !self.sites.is_empty() {
            params.insert("sites", self.sites.join(","));
        }
        params.insert_opt("stateCd", self.state_cd.clone());
        if !self.parameter_cd.is_empty() {
            params.insert("parameterCd", self.parameter_cd.join(","));
        }
        params.insert_opt("period", self.period.clone());

        if let Some(start) = &self.start_dt {
            params.insert("startDT", normalize_request_date("startDT", start)?);
        }
        if let Some(end) = &self.end_dt {
            params.insert("endDT", normalize_request_date("endDT", end)?);
        }

        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_query_params() {
        let params = SiteQuery::new(["01646500", "01638500"])
            .with_parameters(["00060", "00065"])
            .with_range("2023/06/01", "2023-06-02T12:00")
            .to_params()
            .unwrap();

        assert_eq!(params.get("sites"), Some("01646500,01638500"));
        assert_eq!(params.get("parameterCd"), Some("00060,00065"));
        assert_eq!(params.get("startDT"), Some("2023-06-01"));
        assert_eq!(params.get("endDT"), Some("2023-06-02"));
        assert_eq!(params.get("period"), None);
    }

    #[test]
    fn test_state_query() {
        let params = SiteQuery::for_state("md").to_params().unwrap();
        assert_eq!(params.get("stateCd"), Some("md"));
        assert_eq!(params.get("sites"), None);
    }

    #[test]
    fn test_query_validation() {
        assert!(SiteQuery::default().to_params().is_err());
        assert!(
            SiteQuery::new(["01646500"])
                .with_period("P7D")
                .with_start("2023-01-01")
                .to_params()
                .is_err()
        );
        assert!(matches!(
            SiteQuery::new(["01646500"]).with_start("someday").to_params(),
            Err(NwisError::InvalidDateTime { .. })
        ));
    }
}

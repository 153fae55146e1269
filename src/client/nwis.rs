//! NWIS service adapters
//!
//! Each adapter builds the request parameters for one service, retrieves
//! the RDB text through an [`RdbSource`], normalizes it and applies the
//! matching reshaper.

use tracing::{debug, info};

use super::params::SiteQuery;
use super::source::{HttpSource, RdbSource};
use crate::config::NwisConfig;
use crate::constants::{columns, state_abbreviation};
use crate::error::{NwisError, Result};
use crate::models::{LongTable, QueryParams, StatDate, Timestamp, WideTable};
use crate::rdb::{ParseResult, RdbResponse, read_rdb};
use crate::reshape::{
    StatOptions, TimeSeriesOptions, index_records, reshape_groundwater_levels,
    reshape_statistics, reshape_time_series,
};

/// NWIS services reachable through [`NwisClient`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    InstantaneousValues,
    DailyValues,
    Statistics,
    GroundwaterLevels,
    Site,
    Measurements,
    Peak,
}

impl Service {
    /// Path segment of the service URL
    pub fn path(&self) -> &'static str {
        match self {
            Service::InstantaneousValues => "iv",
            Service::DailyValues => "dv",
            Service::Statistics => "stat",
            Service::GroundwaterLevels => "gwlevels",
            Service::Site => "site",
            Service::Measurements => "measurements",
            Service::Peak => "peak",
        }
    }
}

/// Client for the USGS National Water Information System
pub struct NwisClient<S> {
    source: S,
    config: NwisConfig,
}

impl NwisClient<HttpSource> {
    /// Create an HTTP-backed client from a validated configuration
    pub fn new(config: NwisConfig) -> Result<Self> {
        config.validate()?;
        let source = HttpSource::new(&config)?;
        Ok(Self { source, config })
    }
}

impl<S: RdbSource> NwisClient<S> {
    /// Create a client over any retrieval backend
    pub fn with_source(source: S, config: NwisConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &NwisConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// URL of a waterservices endpoint, e.g. `.../nwis/iv/`
    pub fn service_url(&self, service: Service) -> String {
        format!(
            "{}/{}/",
            self.config.waterservices_url.trim_end_matches('/'),
            service.path()
        )
    }

    /// URL of a per-state waterdata page, e.g. `.../md/nwis/peak`
    pub fn state_url(&self, state: &str, service: Service) -> String {
        format!(
            "{}/{}/nwis/{}",
            self.config.waterdata_url.trim_end_matches('/'),
            state,
            service.path()
        )
    }

    /// Retrieve and normalize one or more parameter sets against `url`
    pub async fn read(&self, url: &str, params: Vec<QueryParams>) -> Result<ParseResult> {
        let bodies = self.source.retrieve_text(url, &params).await?;
        if bodies.len() != params.len() {
            return Err(NwisError::malformed(format!(
                "expected {} response bodies from {}, got {}",
                params.len(),
                url,
                bodies.len()
            )));
        }

        let responses: Vec<RdbResponse> = params
            .into_iter()
            .zip(bodies)
            .map(|(p, body)| RdbResponse::new(p, body))
            .collect();
        let result = read_rdb(&responses)?;

        info!(
            "Retrieved {} records from {} ({} responses)",
            result.stats.records, url, result.stats.responses
        );
        Ok(result)
    }

    async fn read_service(&self, service: Service, params: QueryParams) -> Result<LongTable> {
        let url = self.service_url(service);
        Ok(self.read(&url, vec![params]).await?.table)
    }

    /// Instantaneous values, one column per site and parameter
    pub async fn iv(
        &self,
        query: &SiteQuery,
        options: &TimeSeriesOptions,
    ) -> Result<WideTable<Timestamp>> {
        let table = self
            .read_service(Service::InstantaneousValues, query.to_params()?)
            .await?;
        reshape_time_series(&table, options)
    }

    /// Daily values, one column per site, parameter and statistic
    pub async fn dv(
        &self,
        query: &SiteQuery,
        options: &TimeSeriesOptions,
    ) -> Result<WideTable<Timestamp>> {
        let table = self
            .read_service(Service::DailyValues, query.to_params()?)
            .await?;
        reshape_time_series(&table, options)
    }

    /// Daily, monthly or annual statistics.
    ///
    /// Options are validated before any request is made.
    pub async fn stat(&self, query: &SiteQuery, options: &StatOptions) -> Result<WideTable<StatDate>> {
        let resolved = options.resolve()?;
        let mut params = query.to_params()?;
        resolved.apply_to(&mut params);

        let table = self.read_service(Service::Statistics, params).await?;
        reshape_statistics(&table, &resolved)
    }

    /// Groundwater levels, one column per variable and site
    pub async fn gwlevels(&self, query: &SiteQuery) -> Result<WideTable<Timestamp>> {
        let table = self
            .read_service(Service::GroundwaterLevels, query.to_params()?)
            .await?;
        reshape_groundwater_levels(&table)
    }

    /// Expanded site metadata for every matching site, active or not
    pub async fn site(&self, query: &SiteQuery) -> Result<LongTable> {
        let mut params = query.to_params()?;
        params.insert("siteOutput", "expanded");
        params.insert("siteStatus", "all");
        self.read_service(Service::Site, params).await
    }

    /// Field measurements for one site, indexed by measurement date
    pub async fn measurements(&self, site: &str) -> Result<WideTable<Option<Timestamp>>> {
        self.state_records(site, Service::Measurements, columns::MEASUREMENT_DATE)
            .await
    }

    /// Annual peak flows for one site, indexed by peak date
    pub async fn peak(&self, site: &str) -> Result<WideTable<Option<Timestamp>>> {
        self.state_records(site, Service::Peak, columns::PEAK_DATE)
            .await
    }

    /// Resolve the lower-case state code of a site from its metadata
    pub async fn site_state(&self, site: &str) -> Result<String> {
        let metadata = self.site(&SiteQuery::new([site])).await?;
        let no_measurements = || NwisError::NoMeasurements {
            site: site.to_string(),
        };

        let fips = metadata
            .text(0, columns::STATE)
            .and_then(|code| code.trim().parse::<u32>().ok())
            .ok_or_else(no_measurements)?;
        let state = state_abbreviation(fips).ok_or_else(no_measurements)?;

        debug!("Site {} is in state {} (FIPS {})", site, state, fips);
        Ok(state.to_lowercase())
    }

    async fn state_records(
        &self,
        site: &str,
        service: Service,
        date_column: &str,
    ) -> Result<WideTable<Option<Timestamp>>> {
        let state = self.site_state(site).await?;
        let format = match service {
            Service::Measurements => "rdb_expanded",
            _ => "rdb",
        };
        let params = QueryParams::new()
            .with("site_no", site)
            .with("agency_cd", "USGS")
            .with("format", format);

        let url = self.state_url(&state, service);
        let table = self.read(&url, vec![params]).await?.table;
        index_records(&table, date_column)
    }
}

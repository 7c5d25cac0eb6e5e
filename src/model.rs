//! Wire and domain types for the Everactive data services API.
//!
//! Field names are mapped once per type through serde attributes. Optional
//! wire fields decode to `None`; unknown fields are ignored.

use crate::format::{CsvRecordProducer, Formattable, FormattingError, OutputFormat};
use serde::{Deserialize, Serialize};

/// Pagination metadata attached to a list response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationInfo {
    #[serde(rename = "page")]
    pub page: u32,
    #[serde(rename = "pageSize")]
    pub page_size: u32,
    #[serde(rename = "totalItems")]
    pub total_items: u64,
    #[serde(rename = "totalPages")]
    pub total_pages: u32,
}

/// One page of a list response: `{data: [...], paginationInfo?: {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PagedResult<T> {
    #[serde(rename = "data")]
    pub data: Vec<T>,
    #[serde(
        rename = "paginationInfo",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub pagination: Option<PaginationInfo>,
}

impl<T> PagedResult<T> {
    pub fn into_data(self) -> Vec<T> {
        self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// True when the server reported pages after this one.
    pub fn has_more(&self) -> bool {
        self.pagination
            .map(|p| p.page < p.total_pages)
            .unwrap_or(false)
    }
}

impl<T> Formattable for PagedResult<T>
where
    T: Serialize + CsvRecordProducer,
{
    fn format(&self, f: &OutputFormat) -> Result<String, FormattingError> {
        match f {
            OutputFormat::Json(options) => {
                if options.pretty {
                    Ok(serde_json::to_string_pretty(self)?)
                } else {
                    Ok(serde_json::to_string(self)?)
                }
            }
            OutputFormat::Csv(options) => {
                let records = self
                    .data
                    .iter()
                    .flat_map(|item| item.as_csv_records())
                    .collect::<Vec<_>>();
                crate::format::write_csv(
                    options.with_headers.then(T::csv_header),
                    records,
                )
            }
        }
    }
}

/// Current condition reported for a steam trap.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SteamTrapStatus {
    #[serde(rename = "current", default, skip_serializing_if = "Option::is_none")]
    pub current: Option<String>,
    #[serde(rename = "since", default, skip_serializing_if = "Option::is_none")]
    pub since: Option<i64>,
    #[serde(rename = "reason", default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(
        rename = "temperatureF",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub temperature_f: Option<f64>,
}

/// Installation details of a steam trap.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SteamTrapDetail {
    #[serde(
        rename = "manufacturer",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub manufacturer: Option<String>,
    #[serde(rename = "model", default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub trap_type: Option<String>,
    #[serde(rename = "location", default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(
        rename = "pipeDiameter",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub pipe_diameter: Option<f64>,
    #[serde(
        rename = "operatingPressure",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub operating_pressure: Option<f64>,
}

/// A monitored steam trap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SteamTrap {
    #[serde(rename = "id")]
    pub id: String,
    #[serde(rename = "tag", default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(rename = "siteId", default, skip_serializing_if = "Option::is_none")]
    pub site_id: Option<String>,
    #[serde(rename = "siteName", default, skip_serializing_if = "Option::is_none")]
    pub site_name: Option<String>,
    #[serde(
        rename = "macAddress",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub sensor_mac_address: Option<String>,
    #[serde(
        rename = "lastReadingTimestamp",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub last_reading_timestamp: Option<i64>,
    #[serde(rename = "status", default, skip_serializing_if = "Option::is_none")]
    pub status: Option<SteamTrapStatus>,
    #[serde(rename = "detail", default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<SteamTrapDetail>,
}

fn cell<T: ToString>(value: &Option<T>) -> String {
    value.as_ref().map(ToString::to_string).unwrap_or_default()
}

impl CsvRecordProducer for SteamTrap {
    fn csv_header() -> Vec<String> {
        vec![
            "ID".to_string(),
            "TAG".to_string(),
            "SITE".to_string(),
            "MAC_ADDRESS".to_string(),
            "STATUS".to_string(),
            "MANUFACTURER".to_string(),
            "MODEL".to_string(),
        ]
    }

    fn as_csv_records(&self) -> Vec<Vec<String>> {
        let status = self.status.as_ref().and_then(|s| s.current.clone());
        let manufacturer = self.detail.as_ref().and_then(|d| d.manufacturer.clone());
        let model = self.detail.as_ref().and_then(|d| d.model.clone());

        vec![vec![
            self.id.clone(),
            cell(&self.tag),
            cell(&self.site_name),
            cell(&self.sensor_mac_address),
            cell(&status),
            cell(&manufacturer),
            cell(&model),
        ]]
    }
}

/// Most recent transmission of an Eversensor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EversensorLastInfo {
    #[serde(rename = "timestamp", default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    #[serde(rename = "rssiUl", default, skip_serializing_if = "Option::is_none")]
    pub rssi_ul: Option<i32>,
    #[serde(
        rename = "gatewaySerialNumber",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub gateway_serial_number: Option<String>,
}

/// An Eversensor device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Eversensor {
    #[serde(rename = "macAddress")]
    pub mac_address: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub sensor_type: Option<String>,
    #[serde(
        rename = "firmwareVersion",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub firmware_version: Option<String>,
    #[serde(rename = "placement", default, skip_serializing_if = "Option::is_none")]
    pub placement: Option<String>,
    #[serde(rename = "lastInfo", default, skip_serializing_if = "Option::is_none")]
    pub last_info: Option<EversensorLastInfo>,
}

impl CsvRecordProducer for Eversensor {
    fn csv_header() -> Vec<String> {
        vec![
            "MAC_ADDRESS".to_string(),
            "TYPE".to_string(),
            "FIRMWARE".to_string(),
            "LAST_SEEN".to_string(),
        ]
    }

    fn as_csv_records(&self) -> Vec<Vec<String>> {
        let last_seen = self.last_info.as_ref().and_then(|info| info.timestamp);
        vec![vec![
            self.mac_address.clone(),
            cell(&self.sensor_type),
            cell(&self.firmware_version),
            cell(&last_seen),
        ]]
    }
}

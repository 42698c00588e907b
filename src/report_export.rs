// XML and JSON renderings of the utilization report
use crate::occupancy::{DateRangeReport, DateReport, RoomReport};
use quick_xml::de::from_str;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("XML conversion error: {0}")]
    XmlError(String),

    #[error("JSON conversion error: {0}")]
    JsonError(#[from] serde_json::Error),
}

// Structures for the XML document; amounts are kept as text
#[derive(Debug, PartialEq, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "PascalCase")]
#[serde(rename = "UtilizationReport")]
pub struct XmlUtilizationReport {
    #[serde(rename = "@start")]
    pub date_start: String,
    #[serde(rename = "@stop")]
    pub date_stop: String,
    pub totals: XmlTotals,
    pub dates: XmlDates,
}

#[derive(Debug, PartialEq, Default, Deserialize, Clone, Serialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct XmlTotals {
    #[serde(rename = "@revenue")]
    pub revenue: String,
    #[serde(rename = "@cleaningCost")]
    pub cleaning_cost: String,
}

#[derive(Debug, PartialEq, Default, Deserialize, Clone, Serialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct XmlDates {
    #[serde(rename = "Date")]
    pub dates: Vec<XmlDate>,
}

#[derive(Debug, PartialEq, Default, Deserialize, Clone, Serialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct XmlDate {
    #[serde(rename = "@value")]
    pub date: String,
    #[serde(rename = "@occupancy")]
    pub occupancy_percentage: String,
    #[serde(rename = "@revenue")]
    pub revenue: String,
    #[serde(rename = "@cleaningCost")]
    pub cleaning_cost: String,
    pub rooms: XmlRooms,
}

#[derive(Debug, PartialEq, Default, Deserialize, Clone, Serialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct XmlRooms {
    #[serde(rename = "Room")]
    pub rooms: Vec<XmlRoom>,
}

#[derive(Debug, PartialEq, Default, Deserialize, Clone, Serialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct XmlRoom {
    #[serde(rename = "@number")]
    pub room_number: String,
    #[serde(rename = "@type")]
    pub room_type: String,
    #[serde(rename = "@occupied")]
    pub occupied: String,
    #[serde(rename = "@revenue")]
    pub daily_revenue: String,
    #[serde(rename = "@cleaningCost")]
    pub daily_cleaning_cost: String,
}

impl From<&RoomReport> for XmlRoom {
    fn from(item: &RoomReport) -> Self {
        XmlRoom {
            room_number: item.room_number.to_string(),
            room_type: item.room_type.to_string(),
            occupied: item.occupied.to_string(),
            daily_revenue: item.daily_revenue.to_string(),
            daily_cleaning_cost: item.daily_cleaning_cost.to_string(),
        }
    }
}

impl From<&DateReport> for XmlDate {
    fn from(item: &DateReport) -> Self {
        XmlDate {
            date: item.date.to_string(),
            occupancy_percentage: format!("{:.2}", item.occupancy_percentage),
            revenue: item.revenue.to_string(),
            cleaning_cost: item.cleaning_cost.to_string(),
            rooms: XmlRooms {
                rooms: item.rooms.iter().map(XmlRoom::from).collect(),
            },
        }
    }
}

impl From<&DateRangeReport> for XmlUtilizationReport {
    fn from(item: &DateRangeReport) -> Self {
        XmlUtilizationReport {
            date_start: item.date_start.to_string(),
            date_stop: item.date_stop.to_string(),
            totals: XmlTotals {
                revenue: item.total_revenue.to_string(),
                cleaning_cost: item.total_cleaning_cost.to_string(),
            },
            dates: XmlDates {
                dates: item.dates.iter().map(XmlDate::from).collect(),
            },
        }
    }
}

pub fn to_xml(report: &DateRangeReport) -> Result<String, ExportError> {
    let xml_report = XmlUtilizationReport::from(report);
    quick_xml::se::to_string(&xml_report).map_err(|e| ExportError::XmlError(e.to_string()))
}

// Reads back a document produced by to_xml
pub fn from_xml(xml: &str) -> Result<XmlUtilizationReport, ExportError> {
    from_str(xml).map_err(|e| ExportError::XmlError(e.to_string()))
}

pub fn to_json(report: &DateRangeReport) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(report)?)
}

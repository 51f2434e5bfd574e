//! Report model matching the backend report payload.

use serde::{Deserialize, Serialize};

use super::null_as_default;

/// Lifecycle status of a report.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Open,
    InProgress,
    Resolved,
    Denied,
    Closed,
    #[default]
    #[serde(other)]
    Unknown,
}

impl ReportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Open => "open",
            ReportStatus::InProgress => "in_progress",
            ReportStatus::Resolved => "resolved",
            ReportStatus::Denied => "denied",
            ReportStatus::Closed => "closed",
            ReportStatus::Unknown => "unknown",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "open" => Some(ReportStatus::Open),
            "in_progress" => Some(ReportStatus::InProgress),
            "resolved" => Some(ReportStatus::Resolved),
            "denied" => Some(ReportStatus::Denied),
            "closed" => Some(ReportStatus::Closed),
            _ => None,
        }
    }
}

/// Issue category of a report.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum ReportCategory {
    Pothole,
    StreetLight,
    TrafficSignal,
    RoadDamage,
    Sanitation,
    Flooding,
    WaterOutage,
    WanderingWaste,
    ElectricalHazard,
    Sinkhole,
    FallenTree,
    PipeLeak,
    #[default]
    #[serde(other)]
    Other,
}

impl ReportCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportCategory::Pothole => "pothole",
            ReportCategory::StreetLight => "street_light",
            ReportCategory::TrafficSignal => "traffic_signal",
            ReportCategory::RoadDamage => "road_damage",
            ReportCategory::Sanitation => "sanitation",
            ReportCategory::Flooding => "flooding",
            ReportCategory::WaterOutage => "water_outage",
            ReportCategory::WanderingWaste => "wandering_waste",
            ReportCategory::ElectricalHazard => "electrical_hazard",
            ReportCategory::Sinkhole => "sinkhole",
            ReportCategory::FallenTree => "fallen_tree",
            ReportCategory::PipeLeak => "pipe_leak",
            ReportCategory::Other => "other",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pothole" => Some(ReportCategory::Pothole),
            "street_light" => Some(ReportCategory::StreetLight),
            "traffic_signal" => Some(ReportCategory::TrafficSignal),
            "road_damage" => Some(ReportCategory::RoadDamage),
            "sanitation" => Some(ReportCategory::Sanitation),
            "flooding" => Some(ReportCategory::Flooding),
            "water_outage" => Some(ReportCategory::WaterOutage),
            "wandering_waste" => Some(ReportCategory::WanderingWaste),
            "electrical_hazard" => Some(ReportCategory::ElectricalHazard),
            "sinkhole" => Some(ReportCategory::Sinkhole),
            "fallen_tree" => Some(ReportCategory::FallenTree),
            "pipe_leak" => Some(ReportCategory::PipeLeak),
            "other" => Some(ReportCategory::Other),
            _ => None,
        }
    }
}

/// Creation-date ordering of the feed.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    /// Newest first
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Resolved location attached to a report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Location {
    pub id: i64,
    #[serde(default)]
    pub city: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

/// The backend sends either a location id or the expanded location.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ReportLocation {
    Id(i64),
    Detail(Location),
}

/// A citizen-submitted issue report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Report {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: ReportStatus,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: ReportCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validated_by: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_by: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Total one-star ratings
    #[serde(default, deserialize_with = "null_as_default")]
    pub rating: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<ReportLocation>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_backend_row_decodes() {
        let report: Report = serde_json::from_value(json!({
            "id": 7,
            "title": "Hole on PR-2",
            "description": "Deep pothole in the right lane",
            "status": "in_progress",
            "category": "pothole",
            "created_by": 3,
            "validated_by": null,
            "resolved_by": null,
            "created_at": "2025-03-01T10:00:00",
            "resolved_at": null,
            "location": 12,
            "image_url": "/uploads/a.jpg",
            "rating": null
        }))
        .unwrap();

        assert_eq!(report.status, ReportStatus::InProgress);
        assert_eq!(report.category, ReportCategory::Pothole);
        assert_eq!(report.rating, 0);
        assert_eq!(report.location, Some(ReportLocation::Id(12)));
        assert!(report.updated_at.is_none());
    }

    #[test]
    fn test_unknown_values_degrade() {
        let report: Report = serde_json::from_value(json!({
            "id": 1,
            "status": "archived",
            "category": "graffiti",
            "location": {"id": 4, "city": "Mayagüez", "latitude": 18.2, "longitude": -67.1}
        }))
        .unwrap();

        assert_eq!(report.status, ReportStatus::Unknown);
        assert_eq!(report.category, ReportCategory::Other);
        assert!(report.title.is_empty());
        match report.location {
            Some(ReportLocation::Detail(loc)) => assert_eq!(loc.city.as_deref(), Some("Mayagüez")),
            other => panic!("unexpected location: {:?}", other),
        }
    }

    #[test]
    fn test_category_strings() {
        for category in [
            ReportCategory::StreetLight,
            ReportCategory::WanderingWaste,
            ReportCategory::PipeLeak,
        ] {
            assert_eq!(ReportCategory::parse(category.as_str()), Some(category));
        }
        assert_eq!(ReportCategory::parse(""), None);
        assert_eq!(ReportStatus::parse("in_progress"), Some(ReportStatus::InProgress));
        assert_eq!(SortOrder::default(), SortOrder::Desc);
    }
}

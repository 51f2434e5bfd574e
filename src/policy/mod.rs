//! Department category policy.
//!
//! Administrators only see the report categories their department handles.
//! Departments without a mapping see everything.

use crate::models::{AdminContext, Department, Report, ReportCategory};

const LUMA_CATEGORIES: &[ReportCategory] = &[
    ReportCategory::StreetLight,
    ReportCategory::TrafficSignal,
    ReportCategory::ElectricalHazard,
];

const DTOP_CATEGORIES: &[ReportCategory] = &[
    ReportCategory::Pothole,
    ReportCategory::RoadDamage,
    ReportCategory::FallenTree,
];

const AAA_CATEGORIES: &[ReportCategory] = &[
    ReportCategory::Flooding,
    ReportCategory::WaterOutage,
    ReportCategory::PipeLeak,
];

const DDS_CATEGORIES: &[ReportCategory] = &[
    ReportCategory::Sanitation,
    ReportCategory::WanderingWaste,
    ReportCategory::Sinkhole,
];

/// Categories a department may see. Empty means no restriction.
pub fn allowed_categories(department: Option<&str>) -> &'static [ReportCategory] {
    match department.and_then(Department::parse) {
        Some(Department::LUMA) => LUMA_CATEGORIES,
        Some(Department::DTOP) => DTOP_CATEGORIES,
        Some(Department::AAA) => AAA_CATEGORIES,
        Some(Department::DDS) => DDS_CATEGORIES,
        None => &[],
    }
}

/// Whether a single report is visible under `ctx`.
pub fn is_visible(ctx: &AdminContext, report: &Report) -> bool {
    if !ctx.is_admin {
        return true;
    }
    let allowed = allowed_categories(ctx.department.as_deref());
    allowed.is_empty() || allowed.contains(&report.category)
}

/// Drop reports outside the administrator's department.
pub fn apply_admin_filter(ctx: &AdminContext, reports: Vec<Report>) -> Vec<Report> {
    if !ctx.is_admin || allowed_categories(ctx.department.as_deref()).is_empty() {
        return reports;
    }
    reports
        .into_iter()
        .filter(|report| is_visible(ctx, report))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(id: i64, category: ReportCategory) -> Report {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "category": category.as_str(),
        }))
        .unwrap()
    }

    fn categories(reports: &[Report]) -> Vec<ReportCategory> {
        reports.iter().map(|r| r.category).collect()
    }

    #[test]
    fn test_department_table() {
        assert_eq!(allowed_categories(Some("LUMA")), LUMA_CATEGORIES);
        assert_eq!(allowed_categories(Some("DTOP")), DTOP_CATEGORIES);
        assert_eq!(allowed_categories(Some("AAA")), AAA_CATEGORIES);
        assert_eq!(allowed_categories(Some("DDS")), DDS_CATEGORIES);
        assert!(allowed_categories(Some("FEMA")).is_empty());
        assert!(allowed_categories(Some("luma")).is_empty());
        assert!(allowed_categories(None).is_empty());
    }

    #[test]
    fn test_luma_keeps_only_street_lights() {
        let page = vec![
            report(1, ReportCategory::Pothole),
            report(2, ReportCategory::StreetLight),
            report(3, ReportCategory::Flooding),
        ];

        let visible = apply_admin_filter(&AdminContext::admin("LUMA"), page);

        assert_eq!(categories(&visible), vec![ReportCategory::StreetLight]);
    }

    #[test]
    fn test_unmapped_department_is_identity() {
        let page = vec![
            report(1, ReportCategory::Pothole),
            report(2, ReportCategory::Sanitation),
        ];

        let no_department = AdminContext {
            is_admin: true,
            department: None,
        };
        assert_eq!(apply_admin_filter(&no_department, page.clone()), page);
        assert_eq!(apply_admin_filter(&AdminContext::admin("FEMA"), page.clone()), page);
        assert_eq!(apply_admin_filter(&AdminContext::anonymous(), page.clone()), page);
    }

    #[test]
    fn test_department_ignored_for_non_admins() {
        let ctx = AdminContext {
            is_admin: false,
            department: Some("DDS".to_string()),
        };
        assert!(is_visible(&ctx, &report(1, ReportCategory::Pothole)));
    }
}

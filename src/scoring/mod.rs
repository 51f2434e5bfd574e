//! Resolution score for a set of reports.

use serde::Serialize;

use crate::models::ReportStatus;

/// Points for the best possible outcome.
pub const MAX_POINTS_PER_REPORT: u64 = 5;

/// Points a report earns in `status`.
pub fn status_points(status: ReportStatus) -> u64 {
    match status {
        ReportStatus::Resolved => 5,
        ReportStatus::InProgress => 3,
        ReportStatus::Open => 2,
        ReportStatus::Denied => 1,
        ReportStatus::Closed | ReportStatus::Unknown => 0,
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    pub fn from_percentage(percentage: u32) -> Self {
        match percentage {
            90.. => Grade::A,
            75..=89 => Grade::B,
            60..=74 => Grade::C,
            40..=59 => Grade::D,
            _ => Grade::F,
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Grade::A => "#4CAF50",
            Grade::B => "#8BC34A",
            Grade::C => "#FFC107",
            Grade::D => "#FF9800",
            Grade::F => "#F44336",
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionMetrics {
    pub score: u64,
    pub max_possible_score: u64,
    pub percentage: u32,
    pub grade: Grade,
    pub grade_color: &'static str,
}

/// Score `(status, count)` pairs. Repeated statuses are summed.
pub fn calculate_resolution_score<I>(counts: I) -> ResolutionMetrics
where
    I: IntoIterator<Item = (ReportStatus, u64)>,
{
    let (score, total) = counts
        .into_iter()
        .fold((0u64, 0u64), |(score, total), (status, count)| {
            (score + status_points(status) * count, total + count)
        });

    let max_possible_score = total * MAX_POINTS_PER_REPORT;
    let percentage = if max_possible_score == 0 {
        0
    } else {
        ((score as f64 / max_possible_score as f64) * 100.0).round() as u32
    };
    let grade = Grade::from_percentage(percentage);

    ResolutionMetrics {
        score,
        max_possible_score,
        percentage,
        grade,
        grade_color: grade.color(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_reports() {
        let metrics = calculate_resolution_score(Vec::<(ReportStatus, u64)>::new());
        assert_eq!(metrics.score, 0);
        assert_eq!(metrics.max_possible_score, 0);
        assert_eq!(metrics.percentage, 0);
        assert_eq!(metrics.grade, Grade::F);
        assert_eq!(metrics.grade_color, "#F44336");
    }

    #[test]
    fn test_mixed_statuses() {
        // 4*5 + 2*3 + 3*2 + 1*1 + 0 = 33 of 55
        let metrics = calculate_resolution_score([
            (ReportStatus::Resolved, 4),
            (ReportStatus::InProgress, 2),
            (ReportStatus::Open, 3),
            (ReportStatus::Denied, 1),
            (ReportStatus::Closed, 1),
        ]);
        assert_eq!(metrics.score, 33);
        assert_eq!(metrics.max_possible_score, 55);
        assert_eq!(metrics.percentage, 60);
        assert_eq!(metrics.grade, Grade::C);
    }

    #[test]
    fn test_all_resolved() {
        let metrics = calculate_resolution_score([(ReportStatus::Resolved, 7)]);
        assert_eq!(metrics.percentage, 100);
        assert_eq!(metrics.grade, Grade::A);
        assert_eq!(metrics.grade_color, "#4CAF50");
    }

    #[test]
    fn test_unknown_counts_toward_total() {
        let metrics = calculate_resolution_score([
            (ReportStatus::Resolved, 1),
            (ReportStatus::Unknown, 1),
        ]);
        assert_eq!(metrics.max_possible_score, 10);
        assert_eq!(metrics.percentage, 50);
        assert_eq!(metrics.grade, Grade::D);
    }

    #[test]
    fn test_grade_boundaries() {
        assert_eq!(Grade::from_percentage(90), Grade::A);
        assert_eq!(Grade::from_percentage(89), Grade::B);
        assert_eq!(Grade::from_percentage(75), Grade::B);
        assert_eq!(Grade::from_percentage(74), Grade::C);
        assert_eq!(Grade::from_percentage(40), Grade::D);
        assert_eq!(Grade::from_percentage(39), Grade::F);
    }
}

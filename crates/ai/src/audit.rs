//! Post-generation consistency checks on an allocation plan.
//!
//! The model is asked to respect these constraints but nothing forces it to.
//! The audit only reports; it never adjusts a plan.

use std::collections::HashMap;
use std::fmt;

use folioadvisor_core::profiles::Profile;
use folioadvisor_core::projects::Project;
use folioadvisor_core::recommendations::AllocationPlan;

/// Allowed distance of the ratio sum from 100, in percentage points.
pub const RATIO_SUM_TOLERANCE: f64 = 1.0;

#[derive(Debug, Clone, PartialEq)]
pub enum PlanIssue {
    RatioSum { total: f64 },
    BelowThreshold {
        project_id: i64,
        amount: f64,
        threshold: f64,
    },
    UnknownProject { project_id: i64 },
}

impl fmt::Display for PlanIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanIssue::RatioSum { total } => write!(f, "配置比例之和为 {total}%，应为 100%"),
            PlanIssue::BelowThreshold {
                project_id,
                amount,
                threshold,
            } => write!(
                f,
                "项目 {project_id} 的投资额 {amount} 低于投资门槛 {threshold}"
            ),
            PlanIssue::UnknownProject { project_id } => {
                write!(f, "项目 {project_id} 不在项目库中")
            }
        }
    }
}

pub fn audit_plan(plan: &AllocationPlan, profile: &Profile, catalog: &[Project]) -> Vec<PlanIssue> {
    let mut issues = Vec::new();

    let total = plan.total_ratio();
    if (total - 100.0).abs() > RATIO_SUM_TOLERANCE {
        issues.push(PlanIssue::RatioSum { total });
    }

    let by_id: HashMap<i64, &Project> = catalog.iter().map(|p| (p.id, p)).collect();
    for allocation in &plan.project_allocations {
        let Some(project) = by_id.get(&allocation.project_id) else {
            issues.push(PlanIssue::UnknownProject {
                project_id: allocation.project_id,
            });
            continue;
        };
        let amount = profile.investment_amount * allocation.allocation_ratio / 100.0;
        if amount < project.investment_threshold {
            issues.push(PlanIssue::BelowThreshold {
                project_id: project.id,
                amount,
                threshold: project.investment_threshold,
            });
        }
    }

    issues
}

/// Joins issues into one line for logs and rejection messages.
pub fn describe(issues: &[PlanIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

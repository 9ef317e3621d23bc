use crate::profiles::{InvestmentGoal, InvestmentPeriod, ProfileData, RiskPreference};
use crate::projects::{NewProject, ProjectType};
use crate::recommendations::{AllocationPlan, ProjectAllocation};
use crate::users::NewUser;

pub fn new_user(username: &str) -> NewUser {
    NewUser {
        username: username.to_string(),
        password_hash: format!("$argon2id$v=19$m=19456,t=2,p=1$fake${username}"),
    }
}

pub fn balanced_profile(amount: f64) -> ProfileData {
    ProfileData {
        risk_preference: RiskPreference::Balanced,
        investment_amount: amount,
        investment_period: InvestmentPeriod::OneToThreeYears,
        investment_goal: InvestmentGoal::SteadyIncome,
    }
}

pub fn aggressive_profile(amount: f64) -> ProfileData {
    ProfileData {
        risk_preference: RiskPreference::Aggressive,
        investment_amount: amount,
        investment_period: InvestmentPeriod::OverFiveYears,
        investment_goal: InvestmentGoal::HighGrowth,
    }
}

pub fn bond_project(name: &str) -> NewProject {
    NewProject {
        name: name.to_string(),
        project_type: ProjectType::Bond,
        risk_level: 1,
        expected_return: 3.1,
        investment_threshold: 1_000.0,
        description: Some("国债，到期还本付息".to_string()),
    }
}

pub fn equity_project(name: &str) -> NewProject {
    NewProject {
        name: name.to_string(),
        project_type: ProjectType::Equity,
        risk_level: 4,
        expected_return: 12.5,
        investment_threshold: 10_000.0,
        description: None,
    }
}

/// A two-line plan whose ratios sum to 100.
pub fn sample_plan(bond_id: i64, equity_id: i64) -> AllocationPlan {
    AllocationPlan {
        overall_expected_return: 5.98,
        overall_risk_level: 2,
        match_score: 88.0,
        project_allocations: vec![
            ProjectAllocation {
                project_id: bond_id,
                project_name: "国债A".to_string(),
                allocation_type: "债券".to_string(),
                allocation_ratio: 70.0,
                expected_return_contribution: 2.17,
                risk_warning: "低风险，本金安全性高".to_string(),
            },
            ProjectAllocation {
                project_id: equity_id,
                project_name: "蓝筹股B".to_string(),
                allocation_type: "股票".to_string(),
                allocation_ratio: 30.0,
                expected_return_contribution: 3.81,
                risk_warning: "股价波动较大".to_string(),
            },
        ],
        reasoning: "以债券为主、股票为辅，兼顾收益与安全".to_string(),
    }
}

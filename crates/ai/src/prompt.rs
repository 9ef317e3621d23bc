//! Prompt assembly for plan generation.

use std::fmt::Write;

use folioadvisor_core::profiles::{Profile, RiskPreference};
use folioadvisor_core::projects::Project;

/// Allocation rules the model must follow for a given risk preference.
pub fn risk_rules(preference: RiskPreference) -> &'static str {
    match preference {
        RiskPreference::Conservative => {
            "低风险项目（1-2星）占比≥70%，中风险项目（3星）≤30%，无高风险项目"
        }
        RiskPreference::Balanced => {
            "低风险+中低风险项目占比≥60%，中风险项目占比30%，中高风险项目（4星）≤10%"
        }
        RiskPreference::Aggressive => {
            "中高风险+高风险项目（4-5星）占比≥60%，中风险项目≤30%，低风险项目≤10%"
        }
    }
}

pub fn system_prompt(profile: &Profile) -> String {
    format!(
        "你是一位专业的投资顾问。请根据用户的投资画像和可选项目库，生成个性化的投资配置方案。

**配置规则：**
{rules}

**输出要求：**
1. 综合预期收益率（加权平均）
2. 整体风险等级（1-5，根据配置项目的风险加权计算）
3. 适配度评分（0-100，评估方案与用户需求的匹配程度）
4. 项目配置列表（每个项目的配置比例、预期收益贡献、风险提示）
5. 推荐理由（简要说明为何这样配置）

**重要约束：**
- 所有配置比例之和必须等于100%
- 单个项目投资额 = 用户投资金额 × 配置比例，必须≥项目投资门槛
- 如果某个项目的投资门槛过高，不应包含在配置中
- 严格遵守用户的风险偏好配置规则

请以JSON格式返回结果。",
        rules = risk_rules(profile.risk_preference)
    )
}

const RESPONSE_SHAPE: &str = r#"{
  "overallExpectedReturn": 5.2,
  "overallRiskLevel": 2,
  "matchScore": 92,
  "projectAllocations": [
    {
      "projectId": 1,
      "projectName": "项目名称",
      "allocationType": "债券",
      "allocationRatio": 40,
      "expectedReturnContribution": 2.0,
      "riskWarning": "低风险，本金安全性高"
    }
  ],
  "reasoning": "根据您的保守型风险偏好..."
}"#;

pub fn user_prompt(profile: &Profile, projects: &[Project]) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = write!(
        out,
        "
**用户投资画像：**
- 风险偏好：{}
- 投资金额：¥{}
- 投资期限：{}
- 投资目标：{}

**可选项目库：**
",
        profile.risk_preference,
        group_thousands(profile.investment_amount),
        profile.investment_period,
        profile.investment_goal,
    );

    for project in projects {
        let _ = write!(
            out,
            "
- 项目ID: {}
- 项目名称：{}
- 项目类型：{}
- 风险等级：{}星
- 预期收益率：{}%
- 投资门槛：¥{}
- 项目描述：{}
",
            project.id,
            project.name,
            project.project_type,
            project.risk_level,
            project.expected_return,
            group_thousands(project.investment_threshold),
            project.description.as_deref().unwrap_or("无"),
        );
    }

    let _ = write!(out, "\n请生成投资配置方案，返回格式如下：\n{RESPONSE_SHAPE}");
    out
}

/// `1234567.5` -> `1,234,567.5`. At most three fractional digits, trailing
/// zeros dropped.
pub fn group_thousands(value: f64) -> String {
    let rendered = format!("{:.3}", value.abs());
    let (int_part, frac_part) = rendered.split_once('.').unwrap_or((&rendered, ""));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let frac = frac_part.trim_end_matches('0');
    let sign = if value < 0.0 { "-" } else { "" };
    if frac.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{frac}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folioadvisor_core::profiles::{InvestmentGoal, InvestmentPeriod};
    use folioadvisor_core::projects::ProjectType;
    use folioadvisor_core::utils::time_utils::now_utc;

    fn profile(pref: RiskPreference) -> Profile {
        Profile {
            id: 1,
            user_id: 1,
            risk_preference: pref,
            investment_amount: 100_000.0,
            investment_period: InvestmentPeriod::OneToThreeYears,
            investment_goal: InvestmentGoal::SteadyIncome,
            updated_at: now_utc(),
        }
    }

    fn project(id: i64, description: Option<&str>) -> Project {
        Project {
            id,
            name: format!("项目{id}"),
            project_type: ProjectType::Fund,
            risk_level: 3,
            expected_return: 6.5,
            investment_threshold: 50_000.0,
            description: description.map(str::to_string),
            created_at: now_utc(),
            updated_at: now_utc(),
        }
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(100_000.0), "100,000");
        assert_eq!(group_thousands(999.0), "999");
        assert_eq!(group_thousands(1_234_567.5), "1,234,567.5");
        assert_eq!(group_thousands(0.0), "0");
        assert_eq!(group_thousands(1000.125), "1,000.125");
    }

    #[test]
    fn test_system_prompt_carries_rules_for_preference() {
        let prompt = system_prompt(&profile(RiskPreference::Conservative));
        assert!(prompt.contains("低风险项目（1-2星）占比≥70%"));
        assert!(!prompt.contains("中高风险+高风险项目"));
        assert!(prompt.contains("所有配置比例之和必须等于100%"));
    }

    #[test]
    fn test_user_prompt_lists_every_project() {
        let projects = vec![project(1, Some("货币基金")), project(2, None)];
        let prompt = user_prompt(&profile(RiskPreference::Balanced), &projects);
        assert!(prompt.contains("- 风险偏好：稳健"));
        assert!(prompt.contains("- 投资金额：¥100,000"));
        assert!(prompt.contains("- 项目ID: 1"));
        assert!(prompt.contains("- 项目ID: 2"));
        assert!(prompt.contains("- 项目描述：货币基金"));
        assert!(prompt.contains("- 项目描述：无"));
        assert!(prompt.contains("- 投资门槛：¥50,000"));
        assert!(prompt.ends_with(RESPONSE_SHAPE));
    }
}

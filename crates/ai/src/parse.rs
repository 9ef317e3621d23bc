//! Strict parsing of model output into an `AllocationPlan`.

use folioadvisor_core::recommendations::{AllocationPlan, ProjectAllocation};
use serde::Deserialize;

use crate::error::AiError;

/// Plan as the model emits it. Numeric fields are read as floats and checked
/// afterwards so an out-of-range value gets a precise message.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlanPayload {
    overall_expected_return: f64,
    overall_risk_level: f64,
    match_score: f64,
    #[serde(default)]
    project_allocations: Option<Vec<ProjectAllocation>>,
    reasoning: String,
}

/// Removes one surrounding markdown code fence (```json ... ```), if present.
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return trimmed;
    };
    // Drop the info string (e.g. "json") on the opening line.
    match body.split_once('\n') {
        Some((_, inner)) => inner.trim(),
        None => body.trim(),
    }
}

pub fn parse_plan(text: &str) -> Result<AllocationPlan, AiError> {
    let payload: PlanPayload = serde_json::from_str(strip_code_fence(text))
        .map_err(|e| AiError::invalid_response(e.to_string()))?;

    let project_allocations = match payload.project_allocations {
        Some(list) if !list.is_empty() => list,
        _ => return Err(AiError::NoAllocations),
    };

    let risk = payload.overall_risk_level.round();
    if !(1.0..=5.0).contains(&risk) {
        return Err(AiError::invalid_response(format!(
            "overallRiskLevel {} 不在 1-5 范围内",
            payload.overall_risk_level
        )));
    }
    if !(0.0..=100.0).contains(&payload.match_score) {
        return Err(AiError::invalid_response(format!(
            "matchScore {} 不在 0-100 范围内",
            payload.match_score
        )));
    }
    if !payload.overall_expected_return.is_finite() {
        return Err(AiError::invalid_response("overallExpectedReturn 不是有效数字"));
    }

    Ok(AllocationPlan {
        overall_expected_return: payload.overall_expected_return,
        overall_risk_level: risk as i32,
        match_score: payload.match_score,
        project_allocations,
        reasoning: payload.reasoning,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAN: &str = r#"{
        "overallExpectedReturn": 5.2,
        "overallRiskLevel": 2,
        "matchScore": 92,
        "projectAllocations": [
            {"projectId": 1, "projectName": "国债A", "allocationType": "债券",
             "allocationRatio": 100, "expectedReturnContribution": 5.2,
             "riskWarning": "低风险"}
        ],
        "reasoning": "稳健为主"
    }"#;

    #[test]
    fn test_parses_plain_json() {
        let plan = parse_plan(PLAN).unwrap();
        assert_eq!(plan.overall_risk_level, 2);
        assert_eq!(plan.match_score, 92.0);
        assert_eq!(plan.project_allocations[0].project_id, 1);
        assert_eq!(plan.reasoning, "稳健为主");
    }

    #[test]
    fn test_strips_markdown_fence() {
        let fenced = format!("```json\n{PLAN}\n```");
        assert_eq!(parse_plan(&fenced).unwrap(), parse_plan(PLAN).unwrap());
        assert_eq!(strip_code_fence("```\n{}\n```"), "{}");
        assert_eq!(strip_code_fence("  {}  "), "{}");
    }

    #[test]
    fn test_fractional_risk_level_is_rounded() {
        let text = PLAN.replace("\"overallRiskLevel\": 2", "\"overallRiskLevel\": 2.4");
        assert_eq!(parse_plan(&text).unwrap().overall_risk_level, 2);
    }

    #[test]
    fn test_rejects_non_json() {
        let err = parse_plan("我无法完成这个请求").unwrap_err();
        assert!(matches!(err, AiError::InvalidResponse(_)));
    }

    #[test]
    fn test_rejects_missing_or_empty_allocations() {
        let empty = PLAN.replace(
            &PLAN[PLAN.find("[").unwrap()..=PLAN.rfind("]").unwrap()],
            "[]",
        );
        assert!(matches!(parse_plan(&empty), Err(AiError::NoAllocations)));

        let missing = r#"{"overallExpectedReturn":1,"overallRiskLevel":1,"matchScore":1,"reasoning":""}"#;
        let err = parse_plan(missing).unwrap_err();
        assert!(matches!(err, AiError::NoAllocations));
        assert_eq!(err.to_string(), "未生成有效的项目配置");
    }

    #[test]
    fn test_rejects_out_of_range_scores() {
        let risky = PLAN.replace("\"overallRiskLevel\": 2", "\"overallRiskLevel\": 7");
        assert!(matches!(parse_plan(&risky), Err(AiError::InvalidResponse(_))));

        let overconfident = PLAN.replace("\"matchScore\": 92", "\"matchScore\": 120");
        assert!(matches!(
            parse_plan(&overconfident),
            Err(AiError::InvalidResponse(_))
        ));
    }
}

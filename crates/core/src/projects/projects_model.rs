//! Project catalog domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::profiles::labelled_enum;
use crate::{Error, Result};

pub const PROJECT_NAME_MAX_CHARS: usize = 50;
pub const MAX_EXPECTED_RETURN: f64 = 100.0;
pub const MAX_INVESTMENT_THRESHOLD: f64 = 100_000_000.0;

labelled_enum! {
    /// Instrument category of a catalog entry.
    ProjectType, "请选择项目类型" {
        Bond => "债券",
        Fund => "基金",
        Equity => "股票",
        WealthProduct => "理财产品",
        Other => "其他",
    }
}

/// A shared catalog entry any authenticated user may edit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub project_type: ProjectType,
    /// 1 (lowest) to 5 (highest)
    pub risk_level: i32,
    /// Expected annual return, in percent.
    pub expected_return: f64,
    /// Minimum amount that can be invested.
    pub investment_threshold: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input model for creating a new project.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProject {
    pub name: String,
    pub project_type: ProjectType,
    pub risk_level: i32,
    pub expected_return: f64,
    pub investment_threshold: f64,
    pub description: Option<String>,
}

/// Partial update merged onto an existing project. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectUpdate {
    pub name: Option<String>,
    pub project_type: Option<ProjectType>,
    pub risk_level: Option<i32>,
    pub expected_return: Option<f64>,
    pub investment_threshold: Option<f64>,
    pub description: Option<String>,
}

impl ProjectUpdate {
    /// Merges the present fields into `project`. Identifier and creation time
    /// are never touched; the caller stamps `updated_at`.
    pub fn apply_to(self, project: &mut Project) {
        if let Some(name) = self.name {
            project.name = name;
        }
        if let Some(project_type) = self.project_type {
            project.project_type = project_type;
        }
        if let Some(risk_level) = self.risk_level {
            project.risk_level = risk_level;
        }
        if let Some(expected_return) = self.expected_return {
            project.expected_return = expected_return;
        }
        if let Some(investment_threshold) = self.investment_threshold {
            project.investment_threshold = investment_threshold;
        }
        if let Some(description) = self.description {
            project.description = Some(description);
        }
    }
}

impl From<NewProject> for ProjectUpdate {
    fn from(p: NewProject) -> Self {
        Self {
            name: Some(p.name),
            project_type: Some(p.project_type),
            risk_level: Some(p.risk_level),
            expected_return: Some(p.expected_return),
            investment_threshold: Some(p.investment_threshold),
            description: p.description,
        }
    }
}

/// Raw project payload as submitted by a client.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInput {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub project_type: Option<String>,
    pub risk_level: Option<f64>,
    pub expected_return: Option<f64>,
    pub investment_threshold: Option<f64>,
    pub description: Option<String>,
}

impl ProjectInput {
    pub fn validate(&self) -> Result<NewProject> {
        let name = self.name.clone().unwrap_or_default();
        if name.is_empty() {
            return Err(Error::invalid("项目名称不能为空"));
        }
        if name.chars().count() > PROJECT_NAME_MAX_CHARS {
            return Err(Error::invalid("项目名称最多50个字符"));
        }

        let project_type = self
            .project_type
            .as_deref()
            .ok_or_else(|| Error::invalid("请选择项目类型"))?
            .parse()?;

        let risk_level = self
            .risk_level
            .ok_or_else(|| Error::invalid("请选择风险等级"))?;
        if risk_level.fract() != 0.0 {
            return Err(Error::invalid("风险等级必须是整数"));
        }
        if risk_level < 1.0 {
            return Err(Error::invalid("风险等级最低1星"));
        }
        if risk_level > 5.0 {
            return Err(Error::invalid("风险等级最高5星"));
        }

        let expected_return = self
            .expected_return
            .ok_or_else(|| Error::invalid("请输入预期收益率"))?;
        if expected_return < 0.0 {
            return Err(Error::invalid("预期收益率不能为负数"));
        }
        if expected_return > MAX_EXPECTED_RETURN {
            return Err(Error::invalid("预期收益率不能超过100%"));
        }

        let investment_threshold = self
            .investment_threshold
            .ok_or_else(|| Error::invalid("请输入投资门槛"))?;
        if investment_threshold < 0.0 {
            return Err(Error::invalid("投资门槛不能为负数"));
        }
        if investment_threshold > MAX_INVESTMENT_THRESHOLD {
            return Err(Error::invalid("投资门槛过大"));
        }

        Ok(NewProject {
            name,
            project_type,
            risk_level: risk_level as i32,
            expected_return,
            investment_threshold,
            description: self.description.clone(),
        })
    }
}

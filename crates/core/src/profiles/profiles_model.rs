//! Investment profile domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

pub const MAX_INVESTMENT_AMOUNT: f64 = 100_000_000.0;

/// Declares a closed set of labels that travel on the wire as Chinese strings.
macro_rules! labelled_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $err:literal {
            $($variant:ident => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::errors::Error;

            fn from_str(s: &str) -> $crate::errors::Result<Self> {
                match s {
                    $($label => Ok($name::$variant),)+
                    _ => Err($crate::errors::Error::invalid($err)),
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

pub(crate) use labelled_enum;

labelled_enum! {
    /// Self-declared appetite for risk.
    RiskPreference, "请选择风险偏好" {
        Conservative => "保守",
        Balanced => "稳健",
        Aggressive => "激进",
    }
}

labelled_enum! {
    /// Bucketed investment horizon.
    InvestmentPeriod, "请选择投资期限" {
        UnderOneYear => "1年以内",
        OneToThreeYears => "1-3年",
        ThreeToFiveYears => "3-5年",
        OverFiveYears => "5年以上",
    }
}

labelled_enum! {
    InvestmentGoal, "请选择投资目标" {
        CapitalPreservation => "保本增值",
        SteadyIncome => "稳健收益",
        HighGrowth => "高收益增长",
    }
}

/// A user's investment profile. At most one exists per user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: i64,
    pub user_id: i64,
    pub risk_preference: RiskPreference,
    pub investment_amount: f64,
    pub investment_period: InvestmentPeriod,
    pub investment_goal: InvestmentGoal,
    pub updated_at: DateTime<Utc>,
}

/// Validated profile fields, written wholesale on every save.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileData {
    pub risk_preference: RiskPreference,
    pub investment_amount: f64,
    pub investment_period: InvestmentPeriod,
    pub investment_goal: InvestmentGoal,
}

/// Raw profile payload as submitted by a client.
///
/// Enum fields arrive as strings so that unknown labels produce a readable
/// validation message rather than a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileInput {
    pub risk_preference: Option<String>,
    pub investment_amount: Option<f64>,
    pub investment_period: Option<String>,
    pub investment_goal: Option<String>,
}

impl ProfileInput {
    pub fn validate(&self) -> Result<ProfileData> {
        let risk_preference = self
            .risk_preference
            .as_deref()
            .ok_or_else(|| Error::invalid("请选择风险偏好"))?
            .parse()?;
        let investment_amount = self
            .investment_amount
            .ok_or_else(|| Error::invalid("请输入投资金额"))?;
        if !investment_amount.is_finite() || investment_amount < 0.0 {
            return Err(Error::invalid("投资金额不能为负数"));
        }
        if investment_amount > MAX_INVESTMENT_AMOUNT {
            return Err(Error::invalid("投资金额过大"));
        }
        let investment_period = self
            .investment_period
            .as_deref()
            .ok_or_else(|| Error::invalid("请选择投资期限"))?
            .parse()?;
        let investment_goal = self
            .investment_goal
            .as_deref()
            .ok_or_else(|| Error::invalid("请选择投资目标"))?
            .parse()?;

        Ok(ProfileData {
            risk_preference,
            investment_amount,
            investment_period,
            investment_goal,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(risk: &str, amount: f64) -> ProfileInput {
        ProfileInput {
            risk_preference: Some(risk.to_string()),
            investment_amount: Some(amount),
            investment_period: Some("1-3年".to_string()),
            investment_goal: Some("稳健收益".to_string()),
        }
    }

    #[test]
    fn test_enums_use_chinese_labels_on_the_wire() {
        let json = serde_json::to_string(&RiskPreference::Balanced).unwrap();
        assert_eq!(json, "\"稳健\"");
        let period: InvestmentPeriod = serde_json::from_str("\"5年以上\"").unwrap();
        assert_eq!(period, InvestmentPeriod::OverFiveYears);
        assert_eq!(
            "高收益增长".parse::<InvestmentGoal>().unwrap(),
            InvestmentGoal::HighGrowth
        );
    }

    #[test]
    fn test_validate_accepts_zero_amount() {
        let data = input("保守", 0.0).validate().unwrap();
        assert_eq!(data.risk_preference, RiskPreference::Conservative);
        assert_eq!(data.investment_amount, 0.0);
    }

    #[test]
    fn test_validate_rejects_out_of_range_amounts() {
        assert!(input("稳健", -1.0).validate().is_err());
        assert!(input("稳健", MAX_INVESTMENT_AMOUNT + 1.0).validate().is_err());
    }

    #[test]
    fn test_validate_reports_unknown_label() {
        let err = input("balanced", 1000.0).validate().unwrap_err();
        assert_eq!(err.to_string(), "Input validation failed: 请选择风险偏好");
    }

    #[test]
    fn test_validate_requires_every_field() {
        let mut missing = input("激进", 1000.0);
        missing.investment_goal = None;
        assert!(missing.validate().is_err());
    }
}

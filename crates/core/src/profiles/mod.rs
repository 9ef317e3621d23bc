//! Profiles module - one investment profile per user.

mod profiles_model;
mod profiles_service;
mod profiles_traits;

pub(crate) use profiles_model::labelled_enum;
pub use profiles_model::{
    InvestmentGoal, InvestmentPeriod, Profile, ProfileData, ProfileInput, RiskPreference,
    MAX_INVESTMENT_AMOUNT,
};
pub use profiles_service::ProfileService;
pub use profiles_traits::{ProfileRepositoryTrait, ProfileServiceTrait};

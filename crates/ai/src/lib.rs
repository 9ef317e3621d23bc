//! Allocation plan generation.
//!
//! Turns an investment profile and the project catalog into a prompt, sends
//! it to an OpenAI-compatible chat completions endpoint and parses the reply
//! into an `AllocationPlan`.
//!
//! - `prompt`: risk rules and prompt text
//! - `client`: HTTP client and `ClientConfig`
//! - `parse`: strict plan parsing
//! - `audit`: post-generation consistency checks
//! - `generator`: `RecommendationGeneratorTrait` and a fake for tests

pub mod audit;
pub mod client;
pub mod error;
pub mod generator;
pub mod parse;
pub mod prompt;

pub use audit::{audit_plan, PlanIssue};
pub use client::{ClientConfig, RecommendationClient, DEFAULT_API_URL, DEFAULT_MODEL};
pub use error::AiError;
pub use generator::{FakeRecommendationGenerator, ProviderCredentials, RecommendationGeneratorTrait};

//! The plan generation seam and its test double.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use folioadvisor_core::profiles::Profile;
use folioadvisor_core::projects::Project;
use folioadvisor_core::recommendations::AllocationPlan;

use crate::error::AiError;

/// Caller-supplied credentials for the generative endpoint. Used for one
/// request and never stored.
#[derive(Clone, Default)]
pub struct ProviderCredentials {
    pub api_key: String,
    /// Overrides the configured endpoint for this request.
    pub api_url: Option<String>,
}

impl std::fmt::Debug for ProviderCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderCredentials")
            .field("api_key", &"<redacted>")
            .field("api_url", &self.api_url)
            .finish()
    }
}

#[async_trait]
pub trait RecommendationGeneratorTrait: Send + Sync {
    /// Produces an allocation plan for `profile` over the whole `catalog`.
    async fn generate(
        &self,
        profile: &Profile,
        catalog: &[Project],
        credentials: &ProviderCredentials,
    ) -> Result<AllocationPlan, AiError>;
}

// ============================================================================
// Fake Generator for Testing
// ============================================================================

/// Returns a fixed plan, or a fixed upstream failure, without any network.
pub struct FakeRecommendationGenerator {
    outcome: Result<AllocationPlan, (u16, String)>,
    calls: AtomicUsize,
}

impl FakeRecommendationGenerator {
    pub fn with_plan(plan: AllocationPlan) -> Self {
        Self {
            outcome: Ok(plan),
            calls: AtomicUsize::new(0),
        }
    }

    /// Fails every call as if the endpoint answered `status` with `message`.
    pub fn failing(status: u16, message: &str) -> Self {
        Self {
            outcome: Err((status, message.to_string())),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecommendationGeneratorTrait for FakeRecommendationGenerator {
    async fn generate(
        &self,
        _profile: &Profile,
        _catalog: &[Project],
        credentials: &ProviderCredentials,
    ) -> Result<AllocationPlan, AiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if credentials.api_key.trim().is_empty() {
            return Err(AiError::MissingApiKey);
        }
        match &self.outcome {
            Ok(plan) => Ok(plan.clone()),
            Err((status, message)) => Err(AiError::Upstream {
                status: *status,
                message: message.clone(),
            }),
        }
    }
}

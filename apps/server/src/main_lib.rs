use std::sync::Arc;

use folioadvisor_ai::{ClientConfig, RecommendationClient, RecommendationGeneratorTrait};
use folioadvisor_core::{
    profiles::{ProfileService, ProfileServiceTrait},
    projects::{ProjectService, ProjectServiceTrait},
    recommendations::{RecommendationService, RecommendationServiceTrait},
    users::{UserService, UserServiceTrait},
    RecordStore,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::{
    auth::{AuthConfig, CredentialManager},
    config::{Config, LogFormat, StorageBackend},
};

pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait>,
    pub profile_service: Arc<dyn ProfileServiceTrait>,
    pub project_service: Arc<dyn ProjectServiceTrait>,
    pub recommendation_service: Arc<dyn RecommendationServiceTrait>,
    pub credentials: Arc<CredentialManager>,
    pub generator: Arc<dyn RecommendationGeneratorTrait>,
}

pub fn init_tracing(log_format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format == LogFormat::Text {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    } else {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    }
}

/// Opens the record store the config asks for.
pub fn open_store(config: &Config) -> anyhow::Result<RecordStore> {
    let store = match config.storage {
        StorageBackend::Sqlite => {
            tracing::info!("Database path in use: {}", config.db_path);
            folioadvisor_storage_sqlite::open_record_store(&config.db_path)?
        }
        StorageBackend::Redis => {
            let url = config
                .redis_url
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("FA_REDIS_URL is required when FA_STORAGE=redis"))?;
            tracing::info!("Using Redis record store");
            folioadvisor_storage_kv::redis_record_store(url)?
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory record store; data is lost on exit");
            folioadvisor_storage_kv::memory_record_store()
        }
    };
    Ok(store)
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let store = open_store(config)?;
    let client = RecommendationClient::new(ClientConfig {
        api_url: config.llm_api_url.clone(),
        model: config.llm_model.clone(),
        timeout: config.llm_timeout,
        strict_audit: config.strict_plan_audit,
        ..ClientConfig::default()
    })?;
    build_state_with_generator(config, store, Arc::new(client))
}

/// Wires services over an already opened store and a chosen plan generator.
pub fn build_state_with_generator(
    config: &Config,
    store: RecordStore,
    generator: Arc<dyn RecommendationGeneratorTrait>,
) -> anyhow::Result<Arc<AppState>> {
    let auth_config = AuthConfig::from_secret(config.jwt_secret.as_deref())?;

    Ok(Arc::new(AppState {
        user_service: Arc::new(UserService::new(store.users)),
        profile_service: Arc::new(ProfileService::new(store.profiles)),
        project_service: Arc::new(ProjectService::new(store.projects)),
        recommendation_service: Arc::new(RecommendationService::new(store.recommendations)),
        credentials: Arc::new(CredentialManager::new(&auth_config)),
        generator,
    }))
}

//! Application state shared across handlers

use std::sync::Arc;

use axum::extract::FromRef;

use crate::admin::{InquiryReview, PackageCatalog};
use crate::auth::IdentityVerifier;
use crate::config::DEFAULT_SUBMISSIONS_PER_MINUTE;
use crate::gateway::GatewaySlot;
use crate::middleware::RateLimiter;
use crate::profile::ProfileService;
use crate::queries::DataAccess;

/// Shared application state. Every service reads and writes through the same
/// [`DataAccess`], so they share one query cache.
#[derive(Clone)]
pub struct AppState {
    pub data: DataAccess,
    pub review: InquiryReview,
    pub catalog: PackageCatalog,
    pub profiles: ProfileService,
    pub verifier: Arc<IdentityVerifier>,
    pub submission_limiter: RateLimiter,
}


impl AppState {
    pub fn new(gateway: GatewaySlot, verifier: IdentityVerifier) -> Self {
        let data = DataAccess::new(gateway);
        Self {
            review: InquiryReview::new(data.clone()),
            catalog: PackageCatalog::new(data.clone()),
            profiles: ProfileService::new(data.clone()),
            data,
            verifier: Arc::new(verifier),
            submission_limiter: RateLimiter::per_minute(DEFAULT_SUBMISSIONS_PER_MINUTE),
        }
    }

    pub fn with_submission_limiter(mut self, limiter: RateLimiter) -> Self {
        self.submission_limiter = limiter;
        self
    }
}

impl FromRef<AppState> for Arc<IdentityVerifier> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.verifier.clone()
    }
}

impl FromRef<AppState> for ProfileService {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.profiles.clone()
    }
}

//! Cache-aware data access over the gateway
//!
//! Reads go through [`QueryCache`] and are skipped entirely while the gateway
//! slot is unresolved. Writes fail with [`GatewayError::Unavailable`] until
//! the slot resolves, and on success invalidate the keys their [`Mutation`]
//! declares. Nothing writes cached values directly.

mod cache;
mod mutations;

use std::future::Future;
use std::sync::Arc;

use crate::gateway::{Gateway, GatewayError, GatewayResult, GatewaySlot};
use crate::models::{CustomerInquiry, Principal, TourPackage, UserProfile, UserRole};

pub use cache::{QueryCache, QueryKey, QueryPolicy};
pub use mutations::{
    AssignRole, CreatePackage, DeletePackage, Mutation, SaveProfile, SubmitInquiry,
    UpdateInquiryStatus, UpdatePackage,
};

/// Outcome of a read
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryState<T> {
    /// The gateway handle has not resolved; no call was made
    Disabled,
    Ready(T),
}

impl<T> QueryState<T> {
    pub fn ready(self) -> Option<T> {
        match self {
            QueryState::Disabled => None,
            QueryState::Ready(value) => Some(value),
        }
    }

    pub fn is_disabled(&self) -> bool {
        matches!(self, QueryState::Disabled)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> QueryState<U> {
        match self {
            QueryState::Disabled => QueryState::Disabled,
            QueryState::Ready(value) => QueryState::Ready(f(value)),
        }
    }
}

/// Gateway slot plus the shared query cache
#[derive(Clone)]
pub struct DataAccess {
    gateway: GatewaySlot,
    cache: QueryCache,
}

impl DataAccess {
    pub fn new(gateway: GatewaySlot) -> Self {
        Self {
            gateway,
            cache: QueryCache::new(),
        }
    }

    pub fn gateway(&self) -> &GatewaySlot {
        &self.gateway
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    async fn query<T, F, Fut>(&self, key: QueryKey, fetch: F) -> GatewayResult<QueryState<T>>
    where
        T: Clone + Send + Sync + 'static,
        F: Fn(Arc<dyn Gateway>) -> Fut,
        Fut: Future<Output = GatewayResult<T>>,
    {
        let Some(gateway) = self.gateway.current().await else {
            tracing::debug!(key = %key, "Gateway not resolved, query disabled");
            return Ok(QueryState::Disabled);
        };

        self.cache
            .get_or_fetch(&key, || fetch(gateway.clone()))
            .await
            .map(QueryState::Ready)
    }

    pub async fn public_packages(
        &self,
        caller: &Principal,
    ) -> GatewayResult<QueryState<Vec<TourPackage>>> {
        self.query(QueryKey::PublicPackages, |gateway| async move {
            gateway.get_public_packages(caller).await
        })
        .await
    }

    pub async fn all_inquiries(
        &self,
        caller: &Principal,
    ) -> GatewayResult<QueryState<Vec<CustomerInquiry>>> {
        self.query(QueryKey::AllInquiries, |gateway| async move {
            gateway.get_all_inquiries(caller).await
        })
        .await
    }

    pub async fn caller_profile(
        &self,
        caller: &Principal,
    ) -> GatewayResult<QueryState<Option<UserProfile>>> {
        self.query(QueryKey::CallerProfile(caller.clone()), |gateway| async move {
            gateway.get_caller_user_profile(caller).await
        })
        .await
    }

    pub async fn is_caller_admin(&self, caller: &Principal) -> GatewayResult<QueryState<bool>> {
        self.query(QueryKey::CallerIsAdmin(caller.clone()), |gateway| async move {
            gateway.is_caller_admin(caller).await
        })
        .await
    }

    pub async fn caller_role(&self, caller: &Principal) -> GatewayResult<QueryState<UserRole>> {
        self.query(QueryKey::CallerRole(caller.clone()), |gateway| async move {
            gateway.get_caller_user_role(caller).await
        })
        .await
    }

    /// Run `mutation` against the gateway and invalidate its keys on success.
    ///
    /// The call runs on its own task: if the caller stops waiting, the write
    /// and its invalidation still complete and the late result is discarded.
    pub async fn mutate<M: Mutation>(&self, caller: &Principal, mutation: M) -> GatewayResult<()> {
        let gateway = self
            .gateway
            .current()
            .await
            .ok_or(GatewayError::Unavailable)?;
        let cache = self.cache.clone();
        let caller = caller.clone();

        let task = tokio::spawn(async move {
            let name = mutation.name();
            match mutation.execute(gateway.as_ref(), &caller).await {
                Ok(()) => {
                    for key in mutation.invalidates(&caller) {
                        cache.invalidate(&key).await;
                    }
                    tracing::info!(mutation = name, caller = %caller, "Mutation succeeded");
                    Ok(())
                }
                Err(err) => {
                    tracing::warn!(mutation = name, caller = %caller, error = %err, "Mutation failed");
                    Err(err)
                }
            }
        });

        task.await
            .map_err(|err| GatewayError::Transport(format!("Mutation task failed: {}", err)))?
    }
}

//! Caller profile and role management

use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::gateway::GatewayError;
use crate::models::{Principal, UserProfile, UserRole};
use crate::queries::{AssignRole, DataAccess, QueryState, SaveProfile};
use crate::validation::not_blank;

#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("Invalid profile: {0}")]
    Invalid(#[from] ValidationErrors),

    #[error("Sign in to manage your profile")]
    Anonymous,

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ProfileForm {
    #[validate(custom = "not_blank")]
    pub name: String,
}

/// Whether the profile setup dialog should be shown: the caller is
/// authenticated, the profile fetch has completed, and no profile exists.
pub fn needs_profile_setup(
    authenticated: bool,
    fetched: bool,
    profile: Option<&UserProfile>,
) -> bool {
    authenticated && fetched && profile.is_none()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileView {
    pub profile: Option<UserProfile>,
    pub setup_required: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleView {
    pub role: UserRole,
    pub is_admin: bool,
}

#[derive(Clone)]
pub struct ProfileService {
    data: DataAccess,
}

impl ProfileService {
    pub fn new(data: DataAccess) -> Self {
        Self { data }
    }

    pub async fn profile(&self, caller: &Principal) -> Result<ProfileView, ProfileError> {
        let authenticated = !caller.is_anonymous();
        if !authenticated {
            return Ok(ProfileView {
                profile: None,
                setup_required: false,
            });
        }
        let view = match self.data.caller_profile(caller).await? {
            QueryState::Disabled => ProfileView {
                profile: None,
                setup_required: false,
            },
            QueryState::Ready(profile) => ProfileView {
                setup_required: needs_profile_setup(authenticated, true, profile.as_ref()),
                profile,
            },
        };
        Ok(view)
    }

    pub async fn save(
        &self,
        caller: &Principal,
        form: ProfileForm,
    ) -> Result<UserProfile, ProfileError> {
        if caller.is_anonymous() {
            return Err(ProfileError::Anonymous);
        }
        form.validate()?;
        let profile = UserProfile {
            name: form.name.trim().to_string(),
        };
        self.data
            .mutate(caller, SaveProfile { profile: profile.clone() })
            .await?;
        Ok(profile)
    }

    /// Role of the caller; `Disabled` until the gateway resolves
    pub async fn role(&self, caller: &Principal) -> Result<QueryState<RoleView>, ProfileError> {
        let role = self.data.caller_role(caller).await?;
        let is_admin = self.data.is_caller_admin(caller).await?;
        Ok(match (role, is_admin) {
            (QueryState::Ready(role), QueryState::Ready(is_admin)) => {
                QueryState::Ready(RoleView { role, is_admin })
            }
            _ => QueryState::Disabled,
        })
    }

    /// Admin check; `Disabled` until the gateway resolves, so callers can
    /// tell "unknown" apart from "not an admin"
    pub async fn is_admin(&self, caller: &Principal) -> Result<QueryState<bool>, ProfileError> {
        Ok(self.data.is_caller_admin(caller).await?)
    }

    pub async fn assign_role(
        &self,
        caller: &Principal,
        user: Principal,
        role: UserRole,
    ) -> Result<(), ProfileError> {
        self.data
            .mutate(caller, AssignRole { user: user.clone(), role })
            .await?;
        tracing::info!(user = %user, role = role.as_str(), "Role assigned");
        Ok(())
    }
}

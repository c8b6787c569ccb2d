//! Admin package management
//!
//! Create, update and delete go through the shared mutation path, so every
//! successful write invalidates the public package listing.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::gateway::GatewayError;
use crate::models::{Principal, TourPackage};
use crate::queries::{CreatePackage, DataAccess, DeletePackage, QueryState, UpdatePackage};
use crate::validation::{at_least_one, nat_field, non_negative, not_blank};

#[derive(Error, Debug)]
pub enum PackageError {
    #[error("Invalid package: {0}")]
    Invalid(#[from] ValidationErrors),

    #[error("Deletion of package '{0}' was not confirmed")]
    NotConfirmed(String),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// Package fields as typed by the admin
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PackageForm {
    #[serde(default)]
    #[validate(custom = "not_blank")]
    pub id: String,
    #[validate(custom = "not_blank")]
    pub title: String,
    #[validate(custom = "not_blank")]
    pub description: String,
    #[validate(custom = "non_negative")]
    pub price: String,
    #[validate(custom = "at_least_one")]
    pub duration: String,
}

impl PackageForm {
    pub fn from_package(package: &TourPackage) -> Self {
        Self {
            id: package.id.clone(),
            title: package.title.clone(),
            description: package.description.clone(),
            price: package.price.to_string(),
            duration: package.duration.to_string(),
        }
    }

    pub fn to_package(&self) -> Result<TourPackage, ValidationErrors> {
        self.validate()?;
        Ok(TourPackage {
            id: self.id.trim().to_string(),
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            price: nat_field("price", &self.price)?,
            duration: nat_field("duration", &self.duration)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    /// Editing an existing package; its id is fixed
    Edit { id: String },
}

#[derive(Debug, Clone)]
pub struct PackageEditor {
    mode: EditorMode,
    form: PackageForm,
}

impl PackageEditor {
    pub fn create() -> Self {
        Self {
            mode: EditorMode::Create,
            form: PackageForm::default(),
        }
    }

    pub fn edit(package: &TourPackage) -> Self {
        Self {
            mode: EditorMode::Edit {
                id: package.id.clone(),
            },
            form: PackageForm::from_package(package),
        }
    }

    pub fn mode(&self) -> &EditorMode {
        &self.mode
    }

    pub fn form(&self) -> &PackageForm {
        &self.form
    }

    pub fn is_id_editable(&self) -> bool {
        self.mode == EditorMode::Create
    }

    /// Replace the form contents. In edit mode the id input is disabled, so
    /// any id in `form` is ignored.
    pub fn set_form(&mut self, mut form: PackageForm) {
        if let EditorMode::Edit { id } = &self.mode {
            form.id = id.clone();
        }
        self.form = form;
    }

    pub fn package(&self) -> Result<TourPackage, ValidationErrors> {
        self.form.to_package()
    }
}

/// Proof that deletion of `id` was requested and shown for confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDeletion {
    id: String,
}

impl PendingDeletion {
    pub fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Clone)]
pub struct PackageCatalog {
    data: DataAccess,
}

impl PackageCatalog {
    pub fn new(data: DataAccess) -> Self {
        Self { data }
    }

    pub async fn list(
        &self,
        caller: &Principal,
    ) -> Result<QueryState<Vec<TourPackage>>, PackageError> {
        Ok(self.data.public_packages(caller).await?)
    }

    /// Create or update, depending on the editor mode. Returns the package
    /// as sent to the gateway.
    pub async fn save(
        &self,
        caller: &Principal,
        editor: &PackageEditor,
    ) -> Result<TourPackage, PackageError> {
        let package = editor.package()?;
        match editor.mode() {
            EditorMode::Create => {
                self.data
                    .mutate(caller, CreatePackage { package: package.clone() })
                    .await?;
                tracing::info!(package_id = %package.id, "Package created");
            }
            EditorMode::Edit { .. } => {
                self.data
                    .mutate(caller, UpdatePackage { package: package.clone() })
                    .await?;
                tracing::info!(package_id = %package.id, "Package updated");
            }
        }
        Ok(package)
    }

    pub async fn create(
        &self,
        caller: &Principal,
        form: PackageForm,
    ) -> Result<TourPackage, PackageError> {
        let mut editor = PackageEditor::create();
        editor.set_form(form);
        self.save(caller, &editor).await
    }

    /// Replace every mutable field of package `id`
    pub async fn update(
        &self,
        caller: &Principal,
        id: &str,
        form: PackageForm,
    ) -> Result<TourPackage, PackageError> {
        let mut editor = PackageEditor {
            mode: EditorMode::Edit { id: id.to_string() },
            form: PackageForm::default(),
        };
        editor.set_form(form);
        self.save(caller, &editor).await
    }

    /// First step of deletion; nothing is sent to the gateway
    pub fn request_delete(&self, id: &str) -> PendingDeletion {
        PendingDeletion { id: id.to_string() }
    }

    pub async fn confirm_delete(
        &self,
        caller: &Principal,
        pending: PendingDeletion,
    ) -> Result<(), PackageError> {
        self.data
            .mutate(caller, DeletePackage { id: pending.id.clone() })
            .await?;
        tracing::info!(package_id = %pending.id, "Package deleted");
        Ok(())
    }

    pub async fn delete(
        &self,
        caller: &Principal,
        id: &str,
        confirmed: bool,
    ) -> Result<(), PackageError> {
        let pending = self.request_delete(id);
        if !confirmed {
            return Err(PackageError::NotConfirmed(pending.id));
        }
        self.confirm_delete(caller, pending).await
    }
}

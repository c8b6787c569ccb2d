//! Admin back-office: inquiry review and package catalog management

mod packages;
mod review;

pub use packages::{
    EditorMode, PackageCatalog, PackageEditor, PackageError, PackageForm, PendingDeletion,
};
pub use review::{
    detail_panel, CategoryFilter, DetailPanel, DetailRow, InquiryReview, StatusSummary,
};

//! Tour package catalog model

use serde::{Deserialize, Serialize};

use super::Nat;

/// A package offered in the public catalog
///
/// `id` is chosen by the admin at creation time and never changes afterwards;
/// it doubles as the edit key and the route parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TourPackage {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Price in whole currency units
    pub price: Nat,
    /// Duration in days
    pub duration: Nat,
}

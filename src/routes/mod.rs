//! Route definitions

mod admin;
mod inquiries;
mod packages;
mod profile;

pub use admin::admin_routes;
pub use inquiries::inquiry_routes;
pub use packages::package_routes;
pub use profile::profile_routes;

//! Security policy document: thresholds, secret blocking, forbidden
//! licenses and exemptions.

mod error;
mod loading;
mod types;

pub use error::PolicyError;
pub use types::{
    Action, Exemption, Exemptions, KnownIssues, LicensePolicy, Policy, SecretsPolicy, Threshold,
    Thresholds,
};

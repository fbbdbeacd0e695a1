//! Outbound collaborator for the applicant-tracking API.

mod context;
mod error;
mod source;

pub use context::{ClientContext, Credential};
pub use error::{ClientError, GENERIC_FETCH_FAILURE};
pub use reqwest::Url;
pub use source::{HttpScreeningSource, ScreeningSource, PENDING_SCREENINGS_PATH};

//! The prediction request/response workflow: field state and validation,
//! model selection, the wire client, and report export.

pub mod api;
pub mod fields;
pub mod models;
pub mod report;

pub use api::{ModelResult, PredictError, ResultSet};
pub use fields::{FieldError, FieldKey, FormFields, NumericPayload};
pub use models::{ModelId, ModelSelection};

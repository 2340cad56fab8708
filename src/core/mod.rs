pub mod engine;
pub mod pipeline;

pub use crate::domain::model::{
    OemReview, Proposal, RfpDocument, RfpReview, RfpSection, TechnicalContent,
};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;

pub mod matcher;
pub mod report;
pub mod service;

pub use crate::domain::model::{ProfileSnapshot, TransformResult};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;

pub mod aggregate;
pub mod classifier;
pub mod etl;
pub mod render;

pub use crate::domain::model::{JobRecord, RawJob, Source, TransformResult};
pub use crate::domain::ports::{Dispatcher, Pipeline, SourceExtractor, Storage};
pub use crate::utils::error::Result;

pub mod digest_pipeline;

pub use digest_pipeline::DigestPipeline;

// Adapters layer: concrete implementations for external systems (http, job boards, smtp, storage).

pub mod http;
pub mod mail;
pub mod sources;
pub mod storage;

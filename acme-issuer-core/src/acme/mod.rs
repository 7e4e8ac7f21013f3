//! Production ACME client, backed by `instant-acme`.

mod instant;

pub use instant::InstantAcmeSession;

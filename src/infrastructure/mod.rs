//! Infrastructure layer - Storage, messaging and service implementations

pub mod logging;
pub mod messaging;
pub mod observability;
pub mod storage;
pub mod user;

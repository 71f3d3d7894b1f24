//! Infrastructure layer - Storage, telemetry and logging implementations

pub mod logging;
pub mod storage;
pub mod telemetry;
pub mod user;

//! Service layer providing business-oriented operations on top of models.
//! - Separates business logic from data access.
//! - Reuses validation and entity definitions in `models` crate.
//! - Serializes reservation position assignment per queue.

pub mod errors;
pub mod position_lock;
pub mod queue_service;
pub mod reservation_service;
#[cfg(test)]
pub mod test_support;

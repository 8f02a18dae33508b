/// Liveness and version endpoints
pub mod health;
/// Participant endpoints
pub mod participant;
/// Slot pages and form endpoints
pub mod slot;

/// Participant creation and listing
pub mod participant;
/// Slot views, creation, editing and removal
pub mod slot;

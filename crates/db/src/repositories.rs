pub mod participant;
pub mod slot;

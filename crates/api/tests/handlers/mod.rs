mod participant_test;
mod service_test;
mod slot_test;

pub mod activity;
pub mod actor;
pub mod geo;
pub mod job;
pub mod material;
pub mod time_entry;

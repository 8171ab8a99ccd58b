pub mod clock;
pub mod gateway;
pub mod job;
pub mod material;
pub mod time_entry;

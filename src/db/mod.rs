pub mod activity;
pub mod actors;
pub mod initialize;
pub mod jobs;
pub mod materials;
pub mod migrate;
pub mod pool;
pub mod time_entries;

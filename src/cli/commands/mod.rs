pub mod activity;
pub mod clock;
pub mod config;
pub mod crew;
pub mod db;
pub mod init;
pub mod job;
pub mod material;
pub mod time;

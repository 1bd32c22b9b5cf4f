pub mod amend;
pub mod backup;
pub mod balance;
pub mod clock;
pub mod config;
pub mod db;
pub mod export;
pub mod init;
pub mod log;
pub mod month;
pub mod status;
pub mod update;
pub mod week;

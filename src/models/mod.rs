pub mod day_record;
pub mod ledger;
pub mod stamp;
pub mod status;
pub mod summary;

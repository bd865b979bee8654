mod course;
mod enrollment;
mod payout;
mod transaction;

pub mod process_status;
pub mod signing_session;

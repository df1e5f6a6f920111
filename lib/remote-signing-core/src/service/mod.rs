pub mod signing_session;

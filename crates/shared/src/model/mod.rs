pub mod withdrawal;

pub mod hashing;
pub mod pin;
pub mod rate_limit;
pub mod session;

pub mod blog;
pub mod hash;
pub mod jwt;

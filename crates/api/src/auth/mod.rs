//! Token issuing and password hashing for the `/auth` endpoints.

pub mod jwt;
pub mod password;

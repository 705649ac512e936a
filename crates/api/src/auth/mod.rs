//! Credentials and sessions. Argon2id hashes live in [`password`]; the
//! HMAC-signed cookie format lives in [`session`].

pub mod password;
pub mod session;

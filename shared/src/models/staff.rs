//! Staff Account Model

use serde::Serialize;

/// Staff account entity
///
/// `password_hash` is an argon2 PHC string; it never leaves the server.
#[derive(Debug, Clone, Serialize)]
pub struct StaffAccount {
    pub id: String,
    pub username: String,
    pub name: String,
    /// Role tag: staff | kitchen | admin
    pub role: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
}

//! User Data

use std::fmt;

/// New User Data
#[derive(Clone, PartialEq)]
pub struct NewUser {
    pub username: String,
    pub email: String,

    /// Plain-text password; hashed before it reaches storage.
    pub password: String,

    /// Requested role; `None` registers a plain user.
    pub role: Option<String>,
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"**redacted**")
            .field("role", &self.role)
            .finish()
    }
}

/// User Update Data
///
/// Fields left as `None` keep their stored value.
#[derive(Clone, Default, PartialEq)]
pub struct UserUpdate {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

impl fmt::Debug for UserUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserUpdate")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "**redacted**"))
            .field("role", &self.role)
            .finish()
    }
}

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use fishbowl_common::xml::element::{element_with, text_element};
use fishbowl_common::{Envelope, FishbowlError, Request, Result};
use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};

/// How this integration identifies itself to the server.
///
/// The server asks an administrator to approve each new integration id once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppIdentity {
    pub id: u32,
    pub name: String,
    pub description: String,
}

impl Default for AppIdentity {
    fn default() -> Self {
        Self {
            id: 7311,
            name: "fishbowl-client".to_string(),
            description: "Rust client for the Fishbowl XML API".to_string(),
        }
    }
}

/// `LoginRq`: opens a session. The ticket comes back on the reply envelope.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Login {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub identity: AppIdentity,
}

impl Login {
    pub const NAME: &'static str = "login";

    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            identity: AppIdentity::default(),
        }
    }

    pub fn with_identity(mut self, identity: AppIdentity) -> Self {
        self.identity = identity;
        self
    }
}

/// The server expects base64(MD5(password)), never the clear text.
pub fn encode_password(password: &str) -> String {
    STANDARD.encode(Md5::digest(password.as_bytes()))
}

impl std::fmt::Debug for Login {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Login")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("identity", &self.identity)
            .finish()
    }
}

impl Request for Login {
    type Output = ();

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn compose(&self) -> Result<Envelope> {
        if self.username.trim().is_empty() {
            return Err(FishbowlError::MissingUsername);
        }
        if self.password.trim().is_empty() {
            return Err(FishbowlError::MissingPassword);
        }

        Ok(Envelope::request(element_with(
            "LoginRq",
            [
                text_element("IAID", self.identity.id.to_string()),
                text_element("IAName", self.identity.name.as_str()),
                text_element("IADescription", self.identity.description.as_str()),
                text_element("UserName", self.username.as_str()),
                text_element("UserPassword", encode_password(&self.password)),
            ],
        )))
    }

    fn distill(&self, _response: &Envelope) -> Result<()> {
        Ok(())
    }
}

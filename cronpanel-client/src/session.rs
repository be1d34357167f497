use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

/// An opaque bearer token.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Returns `None` for blank input.
    pub fn new(token: &str) -> Option<Self> {
        let token = token.trim();
        if token.is_empty() {
            None
        } else {
            Some(Self(token.to_string()))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// The one active credential, shared between the API client and the UI.
///
/// Cloning yields a handle onto the same slot.
#[derive(Debug, Clone, Default)]
pub struct Session {
    slot: Arc<RwLock<Option<Credential>>>,
}

impl Session {
    pub fn init(credential: Option<Credential>) -> Self {
        Self {
            slot: Arc::new(RwLock::new(credential)),
        }
    }

    pub fn set(&self, credential: Credential) {
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = Some(credential);
    }

    pub fn clear(&self) {
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    pub fn current(&self) -> Option<Credential> {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_token_is_not_a_credential() {
        assert!(Credential::new("   ").is_none());
        assert_eq!(Credential::new(" abc \n").unwrap().expose(), "abc");
    }

    #[test]
    fn clones_share_the_same_slot() {
        let session = Session::default();
        let handle = session.clone();

        session.set(Credential::new("tok").unwrap());
        assert!(handle.is_authenticated());

        handle.clear();
        assert!(!session.is_authenticated());
        assert!(session.current().is_none());
    }

    #[test]
    fn debug_output_redacts_token() {
        let credential = Credential::new("super-secret").unwrap();
        assert!(!format!("{:?}", credential).contains("super-secret"));
    }
}

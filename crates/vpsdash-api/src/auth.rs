use std::sync::{PoisonError, RwLock};

use secrecy::{ExposeSecret, SecretString};

/// Holder for the bearer token issued at login.
///
/// Both backends keep exactly one of these; it is the only mutable state a
/// backend carries between calls.
#[derive(Debug, Default)]
pub struct SessionSlot {
    token: RwLock<Option<SecretString>>,
}

impl SessionSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, token: SecretString) {
        self.replace(Some(token));
    }

    pub fn clear(&self) {
        self.replace(None);
    }

    pub fn is_active(&self) -> bool {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// `Authorization` header value, if a token is held.
    pub fn bearer(&self) -> Option<String> {
        let guard = self.token.read().unwrap_or_else(PoisonError::into_inner);
        guard
            .as_ref()
            .map(|t| format!("Bearer {}", t.expose_secret()))
    }

    fn replace(&self, token: Option<SecretString>) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = token;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_follows_set_and_clear() {
        let slot = SessionSlot::new();
        assert!(!slot.is_active());
        assert_eq!(slot.bearer(), None);

        slot.set(SecretString::from("abc".to_owned()));
        assert!(slot.is_active());
        assert_eq!(slot.bearer().as_deref(), Some("Bearer abc"));

        slot.clear();
        assert!(!slot.is_active());
    }
}

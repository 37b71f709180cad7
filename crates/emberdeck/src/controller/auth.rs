use crate::store::{KeyValueStore, keys};

/// Password gate in front of the slides.
///
/// The secret sits in cleartext in the local store, so this only keeps
/// casual viewers out. There is no lockout or throttling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthGate {
    authenticated: bool,
    has_attempted_wrong: bool,
}

/// The configured secret, if any. An empty stored value counts as none.
pub fn configured_secret(store: &dyn KeyValueStore) -> Option<String> {
    store.get(keys::PASSWORD).filter(|s| !s.is_empty())
}

impl AuthGate {
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let authenticated =
            configured_secret(store).is_none() || store.flag(keys::AUTHENTICATED);
        Self {
            authenticated,
            has_attempted_wrong: false,
        }
    }

    pub fn is_open(&self) -> bool {
        self.authenticated
    }

    pub fn has_attempted_wrong(&self) -> bool {
        self.has_attempted_wrong
    }

    pub fn submit(&mut self, store: &mut dyn KeyValueStore, candidate: &str) -> bool {
        let accepted = match configured_secret(store) {
            None => true,
            Some(secret) => secret == candidate,
        };
        if accepted {
            self.authenticated = true;
            self.has_attempted_wrong = false;
            store.set_flag(keys::AUTHENTICATED);
            tracing::info!("presentation unlocked");
        } else {
            self.has_attempted_wrong = true;
            tracing::info!("wrong password submitted");
        }
        accepted
    }

    /// Store a new secret. The running session stays unlocked; the next
    /// launch asks for the password again.
    pub fn set_password(&mut self, store: &mut dyn KeyValueStore, secret: &str) -> bool {
        if secret.is_empty() {
            return false;
        }
        store.set(keys::PASSWORD, secret);
        store.remove(keys::AUTHENTICATED);
        tracing::info!("password set");
        true
    }

    pub fn clear_password(&mut self, store: &mut dyn KeyValueStore) {
        store.remove(keys::PASSWORD);
        store.remove(keys::AUTHENTICATED);
        self.authenticated = true;
        self.has_attempted_wrong = false;
        tracing::info!("password cleared");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_open_without_secret() {
        let mut store = MemoryStore::new();
        let mut gate = AuthGate::load(&store);
        assert!(gate.is_open());
        assert!(gate.submit(&mut store, "anything at all"));
        assert!(gate.is_open());
    }

    #[test]
    fn test_empty_secret_counts_as_none() {
        let store = MemoryStore::with(&[(keys::PASSWORD, "")]);
        assert!(AuthGate::load(&store).is_open());
    }

    #[test]
    fn test_closed_with_secret_until_correct_submit() {
        let mut store = MemoryStore::with(&[(keys::PASSWORD, "hunter2")]);
        let mut gate = AuthGate::load(&store);
        assert!(!gate.is_open());
        assert!(!gate.has_attempted_wrong());

        assert!(!gate.submit(&mut store, "hunter3"));
        assert!(!gate.is_open());
        assert!(gate.has_attempted_wrong());
        assert!(!store.flag(keys::AUTHENTICATED));

        assert!(gate.submit(&mut store, "hunter2"));
        assert!(gate.is_open());
        assert!(store.flag(keys::AUTHENTICATED));
    }

    #[test]
    fn test_authenticated_marker_survives_reload() {
        let mut store = MemoryStore::with(&[(keys::PASSWORD, "pw")]);
        AuthGate::load(&store).submit(&mut store, "pw");
        assert!(AuthGate::load(&store).is_open());
    }

    #[test]
    fn test_set_password_locks_next_launch() {
        let mut store = MemoryStore::new();
        let mut gate = AuthGate::load(&store);
        assert!(!gate.set_password(&mut store, ""));
        assert!(gate.set_password(&mut store, "secret"));
        assert!(gate.is_open());
        assert!(!AuthGate::load(&store).is_open());

        gate.clear_password(&mut store);
        assert!(AuthGate::load(&store).is_open());
    }
}

use anyhow::Result;
use colored::Colorize;

use crate::store::{FileStore, KeyValueStore, keys};

/// Per-viewer state. The password and theme are left alone.
const RESET_KEYS: [&str; 4] = [
    keys::CURRENT_SLIDE,
    keys::AUTHENTICATED,
    keys::FULLSCREEN_DISMISSED,
    keys::LIGHT_MODE_DISMISSED,
];

pub fn run() -> Result<()> {
    let mut store = FileStore::open()?;
    reset(&mut store);
    store.persist()?;
    println!(
        "{} ({})",
        "Presentation state reset.".green().bold(),
        store.location().display()
    );
    Ok(())
}

fn reset(store: &mut dyn KeyValueStore) {
    for key in RESET_KEYS {
        store.remove(key);
    }
    tracing::info!("cleared slide position, unlock and dismissed prompts");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_reset_keeps_password_and_theme() {
        let mut store = MemoryStore::with(&[
            (keys::CURRENT_SLIDE, "3"),
            (keys::PASSWORD, "ember"),
            (keys::AUTHENTICATED, "true"),
            (keys::THEME, "light"),
            (keys::FULLSCREEN_DISMISSED, "true"),
            (keys::LIGHT_MODE_DISMISSED, "true"),
        ]);
        reset(&mut store);

        assert_eq!(store.get(keys::CURRENT_SLIDE), None);
        assert_eq!(store.get(keys::AUTHENTICATED), None);
        assert!(!store.flag(keys::FULLSCREEN_DISMISSED));
        assert!(!store.flag(keys::LIGHT_MODE_DISMISSED));
        assert_eq!(store.get(keys::PASSWORD).as_deref(), Some("ember"));
        assert_eq!(store.get(keys::THEME).as_deref(), Some("light"));
    }
}

use std::sync::Arc;

use tracing::warn;

use super::store::KeyValueStore;

/// Key the last used player name is stored under
pub const PLAYER_NAME_KEY: &str = "snake-player-name";

/// Best-effort memory of the last player name
pub struct PlayerProfile {
    store: Arc<dyn KeyValueStore>,
}

impl PlayerProfile {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Last saved name, or `None` if absent or unreadable
    pub fn last_name(&self) -> Option<String> {
        let raw = match self.store.get(PLAYER_NAME_KEY) {
            Ok(raw) => raw?,
            Err(err) => {
                warn!(error = %err, "could not read player name");
                return None;
            }
        };

        serde_json::from_str::<String>(&raw)
            .inspect_err(|err| warn!(error = %err, "stored player name is corrupt"))
            .ok()
            .filter(|name| !name.trim().is_empty())
    }

    pub fn remember(&self, name: &str) {
        let result = serde_json::to_string(name)
            .map_err(|err| err.to_string())
            .and_then(|json| {
                self.store
                    .set(PLAYER_NAME_KEY, &json)
                    .map_err(|err| err.to_string())
            });

        if let Err(err) = result {
            warn!(error = %err, "could not save player name");
        }
    }
}

use crate::catalog;
use crate::core::kv::SnapshotStore;
use crate::core::types::Threat;

/// Key the full threat snapshot is persisted under.
pub const SNAPSHOT_KEY: &str = "threat_model/threats";

/// Owns the bridge between the threat list and the snapshot store.
/// Load and save absorb every persistence failure; callers always get a
/// usable list and the in-memory state stays authoritative for the session.
pub struct ThreatStore;

impl ThreatStore {
    /// Restore the persisted snapshot, or fall back to a fresh catalog copy
    /// on a missing key, a read error, or a malformed payload.
    pub fn load(kv: &dyn SnapshotStore) -> Vec<Threat> {
        match kv.get(SNAPSHOT_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Threat>>(&raw) {
                Ok(threats) => {
                    tracing::info!(count = threats.len(), "restored threat snapshot");
                    threats
                }
                Err(err) => {
                    tracing::error!("malformed threat snapshot, using catalog: {err}");
                    catalog::threats()
                }
            },
            Ok(None) => {
                tracing::info!("no saved snapshot, starting from catalog");
                catalog::threats()
            }
            Err(err) => {
                tracing::error!("snapshot read failed, using catalog: {err}");
                catalog::threats()
            }
        }
    }

    /// Persist the full list. Failures are logged and swallowed.
    pub fn save(kv: &mut dyn SnapshotStore, threats: &[Threat]) {
        let json = match serde_json::to_string(threats) {
            Ok(json) => json,
            Err(err) => {
                tracing::error!("threat snapshot serialization failed: {err}");
                return;
            }
        };
        if let Err(err) = kv.set(SNAPSHOT_KEY, &json) {
            tracing::error!("threat snapshot write failed: {err}");
        }
    }

    /// New list with the matching threat's `mitigated` flag inverted.
    /// An unknown id yields a value-equal copy of the input, not an error.
    pub fn toggle_mitigation(threats: &[Threat], id: &str) -> Vec<Threat> {
        threats
            .iter()
            .map(|t| {
                let mut t = t.clone();
                if t.id == id {
                    t.mitigated = !t.mitigated;
                }
                t
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::kv::MemorySnapshots;

    #[test]
    fn load_falls_back_on_missing_key() {
        let kv = MemorySnapshots::new();
        let threats = ThreatStore::load(&kv);
        assert_eq!(threats, catalog::threats());
    }

    #[test]
    fn load_falls_back_on_malformed_payload() {
        let mut kv = MemorySnapshots::new();
        kv.set(SNAPSHOT_KEY, "{not json").unwrap();
        assert_eq!(ThreatStore::load(&kv), catalog::threats());
    }

    #[test]
    fn save_failure_is_swallowed() {
        let mut kv = MemorySnapshots::new();
        kv.reject_writes = true;
        ThreatStore::save(&mut kv, &catalog::threats());
    }

    #[test]
    fn toggle_twice_restores_original() {
        let threats = catalog::threats();
        let once = ThreatStore::toggle_mitigation(&threats, "S-1");
        assert_ne!(once, threats);
        let twice = ThreatStore::toggle_mitigation(&once, "S-1");
        assert_eq!(twice, threats);
    }

    #[test]
    fn toggle_unknown_id_is_noop() {
        let threats = catalog::threats();
        assert_eq!(ThreatStore::toggle_mitigation(&threats, "X-9"), threats);
    }
}

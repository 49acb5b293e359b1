use sha2::{Digest, Sha256};

use crate::core::types::Threat;

pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Short identifier for a report, stable for a given threat snapshot.
pub fn assessment_id(threats: &[Threat]) -> String {
    let json = serde_json::to_string(threats).unwrap_or_default();
    let digest = sha256_hex(json.as_bytes());
    format!("TM-{}", &digest[..12])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;

    #[test]
    fn assessment_id_is_deterministic() {
        let threats = catalog::threats();
        let a = assessment_id(&threats);
        let b = assessment_id(&threats);
        assert_eq!(a, b);
        assert!(a.starts_with("TM-"));
        assert_eq!(a.len(), "TM-".len() + 12);
    }

    #[test]
    fn assessment_id_tracks_mitigation_state() {
        let threats = catalog::threats();
        let mut toggled = threats.clone();
        toggled[0].mitigated = true;
        assert_ne!(assessment_id(&threats), assessment_id(&toggled));
    }
}

use std::path::PathBuf;

use stride_workbench::core::kv::{MemorySnapshots, SnapshotStore, SqliteSnapshots};
use stride_workbench::core::session::Session;
use stride_workbench::core::store::{ThreatStore, SNAPSHOT_KEY};
use stride_workbench::core::types::{Category, Phase};

fn memory_session() -> Session {
    Session::new(Box::new(MemorySnapshots::new()))
}

fn temp_db(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join("sw_session_flow");
    let _ = std::fs::create_dir_all(&dir);
    let path = dir.join(name);
    let _ = std::fs::remove_file(&path);
    path
}

#[test]
fn fresh_session_starts_from_catalog() {
    let session = memory_session();
    assert_eq!(session.threats().len(), 6);
    assert_eq!(session.phase(), Phase::Definition);
    assert_eq!(session.active_category(), None);
    assert_eq!(session.view_model().security_score, 0);
}

#[test]
fn toggling_one_threat_moves_the_score() {
    let mut session = memory_session();
    assert!(session.toggle_mitigation("S-1"));

    let threats = session.threats();
    assert!(threats.iter().find(|t| t.id == "S-1").unwrap().mitigated);
    assert_eq!(threats.iter().filter(|t| t.mitigated).count(), 1);
    assert_eq!(session.view_model().security_score, 17);
}

#[test]
fn selecting_a_category_surfaces_its_first_threat() {
    let mut session = memory_session();
    session.toggle_mitigation("S-1");
    session.set_phase(Phase::Analysis);
    session.set_active_category(Some(Category::S));

    let vm = session.view_model();
    let active = vm.active_threat.expect("active threat");
    assert_eq!(active.id, "S-1");
    assert!(active.mitigated);

    // The affected components light up in the diagram view.
    let active_nodes: Vec<&str> = vm
        .nodes
        .iter()
        .filter(|n| n.active)
        .map(|n| n.node.id.as_str())
        .collect();
    assert_eq!(active_nodes, vec!["car-tcu", "cloud-gateway"]);
}

#[test]
fn phase_change_clears_the_selection() {
    let mut session = memory_session();
    session.set_phase(Phase::Analysis);
    session.set_active_category(Some(Category::S));
    session.set_phase(Phase::Reporting);

    assert_eq!(session.phase(), Phase::Reporting);
    assert_eq!(session.active_category(), None);
    assert!(session.view_model().active_threat.is_none());
}

#[test]
fn full_mitigation_yields_perfect_score() {
    let mut session = memory_session();
    for id in ["S-1", "T-1", "R-1", "I-1", "D-1", "E-1"] {
        assert!(session.toggle_mitigation(id));
    }
    let vm = session.view_model();
    assert_eq!(vm.security_score, 100);
    assert!(vm.high_risk_open.is_empty());
    assert!(vm.categories.iter().all(|c| c.score == 100));
}

#[test]
fn link_security_follows_the_gate_table() {
    let mut session = memory_session();
    session.toggle_mitigation("S-1");
    let vm = session.view_model();
    let tcu_hop = vm
        .links
        .iter()
        .find(|l| l.link.source == "car-tcu" && l.link.target == "network")
        .unwrap();
    assert!(!tcu_hop.secure, "S-1 alone must not secure the hop");

    session.toggle_mitigation("T-1");
    let vm = session.view_model();
    let tcu_hop = vm
        .links
        .iter()
        .find(|l| l.link.source == "car-tcu" && l.link.target == "network")
        .unwrap();
    assert!(tcu_hop.secure);

    let attack = vm.links.iter().find(|l| l.attack).unwrap();
    assert_eq!(attack.link.source, "attacker");
    assert!(!attack.secure);
}

#[test]
fn snapshot_roundtrips_through_the_store() {
    let mut kv = MemorySnapshots::new();
    let threats = ThreatStore::toggle_mitigation(&ThreatStore::load(&kv), "I-1");
    ThreatStore::save(&mut kv, &threats);
    assert_eq!(ThreatStore::load(&kv), threats);
}

#[test]
fn mitigation_state_survives_a_new_session() {
    let path = temp_db("persist.db");

    let kv = SqliteSnapshots::new(&path).unwrap();
    let mut session = Session::new(Box::new(kv));
    session.toggle_mitigation("D-1");
    session.toggle_mitigation("E-1");
    drop(session);

    let kv = SqliteSnapshots::new(&path).unwrap();
    let session = Session::new(Box::new(kv));
    let mitigated: Vec<&str> = session
        .threats()
        .iter()
        .filter(|t| t.mitigated)
        .map(|t| t.id.as_str())
        .collect();
    assert_eq!(mitigated, vec!["D-1", "E-1"]);
    assert_eq!(session.view_model().security_score, 33);
}

#[test]
fn corrupt_snapshot_falls_back_to_catalog() {
    let path = temp_db("corrupt.db");
    let mut kv = SqliteSnapshots::new(&path).unwrap();
    kv.set(SNAPSHOT_KEY, "]]] not json").unwrap();

    let session = Session::new(Box::new(kv));
    assert_eq!(session.threats().len(), 6);
    assert!(session.threats().iter().all(|t| !t.mitigated));
}

#[test]
fn toggle_unknown_id_changes_nothing() {
    let mut session = memory_session();
    let before = session.threats().to_vec();
    let rev = session.revision();
    assert!(!session.toggle_mitigation("Z-99"));
    assert_eq!(session.threats(), &before[..]);
    assert_eq!(session.revision(), rev);
}

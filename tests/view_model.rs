use stride_workbench::catalog;
use stride_workbench::core::store::ThreatStore;
use stride_workbench::core::types::{Category, Threat};
use stride_workbench::core::view::{
    active_threat, category_status, high_risk_open_threats, is_link_secure, is_node_active,
    security_score,
};

fn with_mitigated(ids: &[&str]) -> Vec<Threat> {
    let mut threats = catalog::threats();
    for t in &mut threats {
        if ids.contains(&t.id.as_str()) {
            t.mitigated = true;
        }
    }
    threats
}

#[test]
fn score_matches_rounded_percentage() {
    assert_eq!(security_score(&catalog::threats()), 0);
    assert_eq!(security_score(&with_mitigated(&["S-1"])), 17); // round(100/6)
    assert_eq!(security_score(&with_mitigated(&["S-1", "T-1"])), 33);
    assert_eq!(security_score(&with_mitigated(&["S-1", "T-1", "R-1"])), 50);
    assert_eq!(
        security_score(&with_mitigated(&["S-1", "T-1", "R-1", "I-1", "D-1", "E-1"])),
        100
    );
}

#[test]
fn score_of_empty_list_is_zero() {
    assert_eq!(security_score(&[]), 0);
}

#[test]
fn active_threat_is_none_without_category() {
    assert!(active_threat(&catalog::threats(), None).is_none());
    assert!(active_threat(&[], None).is_none());
}

#[test]
fn active_threat_takes_first_match_in_list_order() {
    let threats = catalog::threats();
    let found = active_threat(&threats, Some(Category::S)).unwrap();
    assert_eq!(found.id, "S-1");

    // Duplicate category: still the first in list order.
    let mut doubled = threats.clone();
    let mut clone = doubled[0].clone();
    clone.id = "S-2".into();
    doubled.push(clone);
    assert_eq!(active_threat(&doubled, Some(Category::S)).unwrap().id, "S-1");
}

#[test]
fn category_status_guards_empty_category() {
    let without_spoofing: Vec<Threat> = catalog::threats()
        .into_iter()
        .filter(|t| t.category != Category::S)
        .collect();
    let status = category_status(&without_spoofing, Category::S);
    assert_eq!(status.total, 0);
    assert_eq!(status.mitigated, 0);
    assert_eq!(status.score, 0);
}

#[test]
fn category_status_scores_per_category() {
    let threats = with_mitigated(&["I-1"]);
    let info = category_status(&threats, Category::I);
    assert_eq!((info.mitigated, info.total, info.score), (1, 1, 100));
    let spoof = category_status(&threats, Category::S);
    assert_eq!((spoof.mitigated, spoof.total, spoof.score), (0, 1, 0));
}

#[test]
fn no_node_is_active_without_category() {
    let threats = catalog::threats();
    let active = active_threat(&threats, None);
    for node in catalog::diagram_nodes() {
        assert!(!is_node_active(&node, active));
    }
}

#[test]
fn affected_nodes_light_up_for_active_threat() {
    let threats = catalog::threats();
    let active = active_threat(&threats, Some(Category::S));
    for node in catalog::diagram_nodes() {
        let expected = matches!(node.id.as_str(), "car-tcu" | "cloud-gateway");
        assert_eq!(is_node_active(&node, active), expected, "node {}", node.id);
    }
}

#[test]
fn tcu_network_hop_needs_both_gating_mitigations() {
    let open = catalog::threats();
    assert!(!is_link_secure("car-tcu", "network", &open));
    assert!(!is_link_secure("car-tcu", "network", &with_mitigated(&["S-1"])));
    assert!(!is_link_secure("car-tcu", "network", &with_mitigated(&["T-1"])));
    assert!(is_link_secure(
        "car-tcu",
        "network",
        &with_mitigated(&["S-1", "T-1"])
    ));
}

#[test]
fn single_gated_hops_follow_their_mitigation() {
    assert!(is_link_secure(
        "network",
        "cloud-gateway",
        &with_mitigated(&["D-1"])
    ));
    assert!(is_link_secure("cloud-gateway", "db", &with_mitigated(&["I-1"])));
    assert!(!is_link_secure("cloud-gateway", "db", &with_mitigated(&["D-1"])));
}

#[test]
fn ungated_pairs_are_never_secure() {
    let everything = with_mitigated(&["S-1", "T-1", "R-1", "I-1", "D-1", "E-1"]);
    assert!(!is_link_secure("attacker", "network", &everything));
    assert!(!is_link_secure("db", "cloud-gateway", &everything));
    assert!(!is_link_secure("nope", "network", &everything));
}

#[test]
fn high_risk_filter_excludes_critical_impact() {
    let open = catalog::threats();
    let high: Vec<&str> = high_risk_open_threats(&open)
        .iter()
        .map(|t| t.id.as_str())
        .collect();
    // E-1 is Critical and R-1 is Medium; both stay out of the High filter.
    assert_eq!(high, vec!["S-1", "T-1", "I-1", "D-1"]);
}

#[test]
fn mitigated_threats_leave_the_high_risk_list() {
    let threats = with_mitigated(&["S-1", "T-1", "I-1", "D-1"]);
    assert!(high_risk_open_threats(&threats).is_empty());
}

#[test]
fn toggle_is_a_pure_value_mapping() {
    let threats = catalog::threats();
    let toggled = ThreatStore::toggle_mitigation(&threats, "D-1");
    for (before, after) in threats.iter().zip(&toggled) {
        if before.id == "D-1" {
            assert!(after.mitigated);
        } else {
            assert_eq!(before, after);
        }
    }
    // Input untouched.
    assert!(threats.iter().all(|t| !t.mitigated));
}

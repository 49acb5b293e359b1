//! Pure derivations over a threat snapshot and the model state. Everything
//! here is recomputed in full on each change; the data set is a handful of
//! records, so there is no caching layer.

use serde::Serialize;

use crate::catalog;
use crate::core::state::ModelState;
use crate::core::types::{Category, DiagramLink, DiagramNode, Impact, NodeType, Threat};

/// Which mitigations gate the "secure" rendering of each diagram edge.
/// This is domain knowledge about the architecture, kept as a literal
/// table rather than derived from the graph. The attacker edge has no
/// entry and is never secure.
const SECURE_LINK_GATES: &[((&str, &str), &[&str])] = &[
    (("car-tcu", "network"), &["S-1", "T-1"]),
    (("network", "cloud-gateway"), &["D-1"]),
    (("cloud-gateway", "db"), &["I-1"]),
];

/// Percentage of threats mitigated, rounded; 0 for an empty list.
pub fn security_score(threats: &[Threat]) -> u8 {
    let total = threats.len();
    if total == 0 {
        return 0;
    }
    let mitigated = threats.iter().filter(|t| t.mitigated).count();
    ((mitigated * 100) as f64 / total as f64).round() as u8
}

/// First threat in list order matching the active category. Later threats
/// in the same category are not surfaced; this mirrors the workbook's
/// one-finding-per-category presentation.
pub fn active_threat(threats: &[Threat], active_category: Option<Category>) -> Option<&Threat> {
    let category = active_category?;
    threats.iter().find(|t| t.category == category)
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CategoryStatus {
    pub category: Category,
    pub mitigated: usize,
    pub total: usize,
    pub score: u8,
}

pub fn category_status(threats: &[Threat], category: Category) -> CategoryStatus {
    let in_category: Vec<&Threat> = threats.iter().filter(|t| t.category == category).collect();
    let total = in_category.len();
    let mitigated = in_category.iter().filter(|t| t.mitigated).count();
    let score = if total == 0 {
        0
    } else {
        ((mitigated * 100) as f64 / total as f64).round() as u8
    };
    CategoryStatus {
        category,
        mitigated,
        total,
        score,
    }
}

pub fn is_node_active(node: &DiagramNode, active: Option<&Threat>) -> bool {
    match active {
        Some(threat) => threat.affected_components.iter().any(|c| *c == node.id),
        None => false,
    }
}

pub fn is_link_secure(source: &str, target: &str, threats: &[Threat]) -> bool {
    let Some((_, gates)) = SECURE_LINK_GATES
        .iter()
        .find(|((s, t), _)| *s == source && *t == target)
    else {
        return false;
    };
    gates
        .iter()
        .all(|id| threats.iter().any(|t| t.id == *id && t.mitigated))
}

/// Open threats with exactly High impact. Critical is deliberately not
/// folded in; the report lists it separately with its own impact tag.
pub fn high_risk_open_threats(threats: &[Threat]) -> Vec<&Threat> {
    threats
        .iter()
        .filter(|t| !t.mitigated && t.impact == Impact::High)
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct NodeView {
    pub node: DiagramNode,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct LinkView {
    pub link: DiagramLink,
    pub secure: bool,
    pub attack: bool,
}

/// Everything the presenter needs for one frame, in display order.
#[derive(Debug, Clone, Serialize)]
pub struct ViewModel {
    pub total: usize,
    pub mitigated_count: usize,
    pub security_score: u8,
    pub active_threat: Option<Threat>,
    pub categories: Vec<CategoryStatus>,
    pub nodes: Vec<NodeView>,
    pub links: Vec<LinkView>,
    pub high_risk_open: Vec<Threat>,
    pub threats: Vec<Threat>,
}

pub fn build(threats: &[Threat], state: &ModelState) -> ViewModel {
    let active = active_threat(threats, state.active_category());
    let nodes = catalog::diagram_nodes()
        .into_iter()
        .map(|node| {
            let is_active = is_node_active(&node, active);
            NodeView {
                node,
                active: is_active,
            }
        })
        .collect();
    let links = catalog::diagram_links()
        .into_iter()
        .map(|link| {
            let secure = is_link_secure(&link.source, &link.target, threats);
            let attack = link.source == "attacker";
            LinkView {
                link,
                secure,
                attack,
            }
        })
        .collect();

    ViewModel {
        total: threats.len(),
        mitigated_count: threats.iter().filter(|t| t.mitigated).count(),
        security_score: security_score(threats),
        active_threat: active.cloned(),
        categories: Category::ALL
            .iter()
            .map(|c| category_status(threats, *c))
            .collect(),
        nodes,
        links,
        high_risk_open: high_risk_open_threats(threats)
            .into_iter()
            .cloned()
            .collect(),
        threats: threats.to_vec(),
    }
}

/// Marker glyph for a node in the text diagram.
pub fn node_glyph(node_type: NodeType) -> &'static str {
    match node_type {
        NodeType::Actor => "🚗",
        NodeType::External => "📡",
        NodeType::Attacker => "🥷",
        NodeType::Process => "⚙",
        NodeType::Datastore => "💾",
    }
}

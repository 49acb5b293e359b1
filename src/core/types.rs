use std::fmt;

use serde::{Deserialize, Serialize};

/// STRIDE classification tag. Serialized as the single-letter tag
/// ("S", "T", ...) so snapshots stay readable.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Category {
    S,
    T,
    R,
    I,
    D,
    E,
}

impl Category {
    /// All six tags in canonical STRIDE order.
    pub const ALL: [Category; 6] = [
        Category::S,
        Category::T,
        Category::R,
        Category::I,
        Category::D,
        Category::E,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Category::S => "Spoofing",
            Category::T => "Tampering",
            Category::R => "Repudiation",
            Category::I => "Information Disclosure",
            Category::D => "Denial of Service",
            Category::E => "Elevation of Privilege",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Category::S => "Impersonating something or someone else",
            Category::T => "Modifying data or code improperly",
            Category::R => "Denying an action occurred",
            Category::I => "Exposing information to unauthorized parties",
            Category::D => "Denying or degrading service to users",
            Category::E => "Gaining capabilities without proper authorization",
        }
    }

    pub fn letter(&self) -> char {
        match self {
            Category::S => 'S',
            Category::T => 'T',
            Category::R => 'R',
            Category::I => 'I',
            Category::D => 'D',
            Category::E => 'E',
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum Impact {
    Low,
    Medium,
    High,
    Critical,
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Impact::Low => "Low",
            Impact::Medium => "Medium",
            Impact::High => "High",
            Impact::Critical => "Critical",
        };
        write!(f, "{label}")
    }
}

/// One security finding from the fixed catalog. Only `mitigated` changes
/// after load; everything else is descriptive and immutable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Threat {
    pub id: String,
    pub category: Category,
    pub title: String,
    pub definition: String,
    pub context: String,
    pub mitigation: String,
    pub affected_components: Vec<String>,
    pub mitigated: bool,
    pub impact: Impact,
    #[serde(default)]
    pub likelihood: String,
    #[serde(default)]
    pub risk_level: String,
    #[serde(default)]
    pub cvss_score: f64,
    #[serde(default)]
    pub attack_vector: String,
    #[serde(default)]
    pub security_controls: Vec<String>,
    #[serde(default)]
    pub compliance: Vec<String>,
}

/// Workbook phase. Transient UI state, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Definition,
    Analysis,
    Mitigation,
    Reporting,
}

impl Phase {
    pub const ALL: [Phase; 4] = [
        Phase::Definition,
        Phase::Analysis,
        Phase::Mitigation,
        Phase::Reporting,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Phase::Definition => "Architecture",
            Phase::Analysis => "Threat Analysis",
            Phase::Mitigation => "Risk Mitigation",
            Phase::Reporting => "Security Report",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Phase::Definition => "System Overview",
            Phase::Analysis => "STRIDE Assessment",
            Phase::Mitigation => "Security Controls",
            Phase::Reporting => "Compliance Documentation",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum NodeType {
    Actor,
    External,
    Attacker,
    Process,
    Datastore,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum TrustZone {
    Car,
    Public,
    Cloud,
}

impl TrustZone {
    pub fn label(&self) -> &'static str {
        match self {
            TrustZone::Car => "Vehicle Trust Zone",
            TrustZone::Public => "Public Network",
            TrustZone::Cloud => "Cloud Trust Zone",
        }
    }
}

/// Fixed point in the architecture diagram.
#[derive(Debug, Clone, Serialize)]
pub struct DiagramNode {
    pub id: String,
    pub label: String,
    pub x: u16,
    pub y: u16,
    pub node_type: NodeType,
    pub trust_zone: TrustZone,
}

/// Directed edge between two diagram nodes.
#[derive(Debug, Clone, Serialize)]
pub struct DiagramLink {
    pub source: String,
    pub target: String,
    pub label: String,
}

//! Fixed content catalog: the predefined threats, the architecture diagram,
//! component descriptions and the defense-in-depth layer table. Loaded once;
//! callers get fresh owned copies they are free to mutate.

use crate::core::types::{
    Category, DiagramLink, DiagramNode, Impact, NodeType, Threat, TrustZone,
};

/// Description of one architecture component, shown on the definition
/// screen and in the report.
#[derive(Debug, Clone)]
pub struct ArchitectureComponent {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub trust_level: &'static str,
    pub security_controls: &'static [&'static str],
}

#[derive(Debug, Clone)]
pub struct DefenseLayer {
    pub layer: &'static str,
    pub controls: &'static [&'static str],
}

pub fn components() -> Vec<ArchitectureComponent> {
    vec![
        ArchitectureComponent {
            id: "car-tcu",
            name: "Telematics Control Unit",
            description: "Embedded system in vehicle collecting and transmitting telemetry data",
            trust_level: "High",
            security_controls: &["Secure Boot", "Hardware Security Module", "Firmware Signing"],
        },
        ArchitectureComponent {
            id: "network",
            name: "Cellular Network (4G/5G)",
            description: "Public wireless communication infrastructure",
            trust_level: "None",
            security_controls: &["TLS 1.3", "Network Segmentation", "VPN"],
        },
        ArchitectureComponent {
            id: "cloud-gateway",
            name: "IoT Cloud Gateway",
            description: "Cloud-based message broker and protocol translator",
            trust_level: "Medium",
            security_controls: &["mTLS", "API Gateway", "WAF"],
        },
        ArchitectureComponent {
            id: "db",
            name: "Telemetry Database",
            description: "Time-series database storing vehicle telemetry and analytics",
            trust_level: "High",
            security_controls: &["Encryption at Rest", "RBAC", "Backup & Recovery"],
        },
    ]
}

pub fn defense_layers() -> Vec<DefenseLayer> {
    vec![
        DefenseLayer {
            layer: "Physical Security",
            controls: &["Hardware Security Modules", "Secure Element", "Tamper Detection"],
        },
        DefenseLayer {
            layer: "Network Security",
            controls: &["TLS 1.3", "VPN", "Network Segmentation", "Firewalls"],
        },
        DefenseLayer {
            layer: "Application Security",
            controls: &["Input Validation", "Secure Coding", "API Security", "mTLS"],
        },
        DefenseLayer {
            layer: "Data Security",
            controls: &[
                "Encryption at Rest",
                "Encryption in Transit",
                "Data Masking",
                "Key Management",
            ],
        },
        DefenseLayer {
            layer: "Identity & Access",
            controls: &[
                "RBAC",
                "MFA",
                "Certificate-based Auth",
                "Principle of Least Privilege",
            ],
        },
        DefenseLayer {
            layer: "Monitoring & Response",
            controls: &["SIEM", "Audit Logging", "Incident Response", "Threat Intelligence"],
        },
    ]
}

/// The six predefined findings, one per STRIDE category. Each call returns
/// an independent copy so a session can flip mitigation flags without
/// touching the catalog.
pub fn threats() -> Vec<Threat> {
    vec![
        Threat {
            id: "S-1".into(),
            category: Category::S,
            title: "TCU Identity Spoofing Attack".into(),
            definition: "Unauthorized entity masquerades as legitimate vehicle telematics unit"
                .into(),
            context: "Malicious actor clones VIN and security credentials to establish \
                      unauthorized connection to telemetry cloud, potentially injecting false \
                      safety-critical data"
                .into(),
            mitigation: "Implement Mutual TLS with X.509 certificates provisioned via secure \
                         manufacturing process. Utilize Hardware Security Modules for key \
                         storage. Implement certificate revocation mechanisms."
                .into(),
            affected_components: vec!["car-tcu".into(), "cloud-gateway".into()],
            mitigated: false,
            impact: Impact::High,
            likelihood: "Medium".into(),
            risk_level: "High".into(),
            cvss_score: 8.2,
            attack_vector: "Network".into(),
            security_controls: vec![
                "mTLS Authentication".into(),
                "Certificate Management".into(),
                "HSM Integration".into(),
            ],
            compliance: vec!["UN R155".into(), "ISO 21434".into(), "WP.29".into()],
        },
        Threat {
            id: "T-1".into(),
            category: Category::T,
            title: "Telemetry Data Tampering in Transit".into(),
            definition: "Unauthorized modification of telemetry data during transmission".into(),
            context: "Adversary intercepts cellular communication using rogue base station, \
                      modifying GPS coordinates, speed data, or engine status to create false \
                      operational picture"
                .into(),
            mitigation: "Implement end-to-end encryption with TLS 1.3. Apply application-layer \
                         signing using HMAC-SHA256. Implement secure time-stamping and sequence \
                         numbers."
                .into(),
            affected_components: vec!["network".into(), "attacker".into()],
            mitigated: false,
            impact: Impact::High,
            likelihood: "Medium".into(),
            risk_level: "High".into(),
            cvss_score: 7.5,
            attack_vector: "Adjacent Network".into(),
            security_controls: vec![
                "TLS 1.3".into(),
                "Data Signing".into(),
                "Message Authentication".into(),
            ],
            compliance: vec!["ISO 27001".into(), "NIST CSF".into()],
        },
        Threat {
            id: "R-1".into(),
            category: Category::R,
            title: "Remote Command Repudiation".into(),
            definition: "User denies executing remote vehicle commands".into(),
            context: "Vehicle owner disputes remote door unlock command, claiming unauthorized \
                      access. System lacks cryptographic proof of user authorization for the \
                      action."
                .into(),
            mitigation: "Implement non-repudiation through digital signatures. Maintain \
                         cryptographically signed audit logs. Use secure timestamping services."
                .into(),
            affected_components: vec!["cloud-gateway".into(), "db".into()],
            mitigated: false,
            impact: Impact::Medium,
            likelihood: "Low".into(),
            risk_level: "Medium".into(),
            cvss_score: 5.3,
            attack_vector: "Network".into(),
            security_controls: vec![
                "Digital Signatures".into(),
                "Audit Logging".into(),
                "Secure Timestamping".into(),
            ],
            compliance: vec!["GDPR".into(), "SOX".into(), "ISO 27001".into()],
        },
        Threat {
            id: "I-1".into(),
            category: Category::I,
            title: "Sensitive Telemetry Data Exposure".into(),
            definition: "Unauthorized access to confidential vehicle and driver data".into(),
            context: "Database compromised through SQL injection vulnerability, exposing \
                      detailed travel patterns, location history, and driver behavior analytics \
                      of high-profile customers"
                .into(),
            mitigation: "Implement field-level encryption for sensitive data. Deploy database \
                         activity monitoring. Apply strict access controls and data masking. \
                         Conduct regular security assessments."
                .into(),
            affected_components: vec!["db".into()],
            mitigated: false,
            impact: Impact::High,
            likelihood: "Medium".into(),
            risk_level: "High".into(),
            cvss_score: 8.8,
            attack_vector: "Network".into(),
            security_controls: vec![
                "Encryption at Rest".into(),
                "Database Security".into(),
                "Access Controls".into(),
            ],
            compliance: vec!["GDPR".into(), "CCPA".into(), "ISO 27001".into()],
        },
        Threat {
            id: "D-1".into(),
            category: Category::D,
            title: "Distributed Denial of Service on Telemetry Gateway".into(),
            definition: "Coordinated attack rendering telemetry services unavailable".into(),
            context: "Botnet orchestrates massive connection attempts to MQTT brokers, \
                      exhausting resources and preventing legitimate vehicles from reporting \
                      critical safety events or receiving updates"
                .into(),
            mitigation: "Deploy cloud-based DDoS protection services. Implement rate limiting \
                         and connection throttling. Design for graceful degradation and \
                         emergency communication channels."
                .into(),
            affected_components: vec!["cloud-gateway".into(), "network".into()],
            mitigated: false,
            impact: Impact::High,
            likelihood: "High".into(),
            risk_level: "High".into(),
            cvss_score: 7.8,
            attack_vector: "Network".into(),
            security_controls: vec![
                "DDoS Protection".into(),
                "Rate Limiting".into(),
                "High Availability".into(),
            ],
            compliance: vec!["ISO 27001".into(), "NIST CSF".into()],
        },
        Threat {
            id: "E-1".into(),
            category: Category::E,
            title: "Remote Code Execution via OTA Updates".into(),
            definition: "Unauthorized privilege escalation through update mechanism".into(),
            context: "Vulnerability in over-the-air update process allows attacker to deploy \
                      malicious firmware with elevated privileges, potentially gaining root \
                      access to vehicle control systems"
                .into(),
            mitigation: "Implement code signing with hardware-backed keys. Enable secure boot \
                         verification. Apply principle of least privilege to update services. \
                         Conduct third-party security audits."
                .into(),
            affected_components: vec!["car-tcu".into(), "cloud-gateway".into()],
            mitigated: false,
            impact: Impact::Critical,
            likelihood: "Medium".into(),
            risk_level: "High".into(),
            cvss_score: 9.1,
            attack_vector: "Network".into(),
            security_controls: vec![
                "Code Signing".into(),
                "Secure Boot".into(),
                "Privilege Management".into(),
            ],
            compliance: vec!["UN R155".into(), "ISO 21434".into(), "SAE J3061".into()],
        },
    ]
}

pub fn diagram_nodes() -> Vec<DiagramNode> {
    vec![
        DiagramNode {
            id: "car-tcu".into(),
            label: "Car TCU".into(),
            x: 100,
            y: 150,
            node_type: NodeType::Actor,
            trust_zone: TrustZone::Car,
        },
        DiagramNode {
            id: "network".into(),
            label: "Cellular (4G/5G)".into(),
            x: 300,
            y: 150,
            node_type: NodeType::External,
            trust_zone: TrustZone::Public,
        },
        DiagramNode {
            id: "attacker".into(),
            label: "Threat Actor".into(),
            x: 300,
            y: 260,
            node_type: NodeType::Attacker,
            trust_zone: TrustZone::Public,
        },
        DiagramNode {
            id: "cloud-gateway".into(),
            label: "IoT Gateway".into(),
            x: 500,
            y: 150,
            node_type: NodeType::Process,
            trust_zone: TrustZone::Cloud,
        },
        DiagramNode {
            id: "db".into(),
            label: "Telemetry DB".into(),
            x: 700,
            y: 150,
            node_type: NodeType::Datastore,
            trust_zone: TrustZone::Cloud,
        },
    ]
}

pub fn diagram_links() -> Vec<DiagramLink> {
    vec![
        DiagramLink {
            source: "car-tcu".into(),
            target: "network".into(),
            label: "MQTT Telemetry".into(),
        },
        DiagramLink {
            source: "network".into(),
            target: "cloud-gateway".into(),
            label: "TLS 1.3".into(),
        },
        DiagramLink {
            source: "cloud-gateway".into(),
            target: "db".into(),
            label: "Secure Write".into(),
        },
        DiagramLink {
            source: "attacker".into(),
            target: "network".into(),
            label: "Attack Vector".into(),
        },
    ]
}

/// Display label for a diagram node id, falling back to the raw id for
/// references the diagram does not know about.
pub fn node_label(id: &str) -> String {
    diagram_nodes()
        .into_iter()
        .find(|n| n.id == id)
        .map(|n| n.label)
        .unwrap_or_else(|| id.to_string())
}

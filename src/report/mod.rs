//! Report generation for the reporting phase: the assessment document the
//! workbook produces once mitigations have been reviewed.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};

use crate::catalog;
use crate::core::error::WorkbenchError;
use crate::core::hash::assessment_id;
use crate::core::view::ViewModel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Markdown,
    Json,
}

pub fn write_report(
    view: &ViewModel,
    format: ReportFormat,
    generated_at: DateTime<Utc>,
    path: &Path,
) -> Result<(), WorkbenchError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = match format {
        ReportFormat::Markdown => render_markdown(view, generated_at),
        ReportFormat::Json => serde_json::to_string_pretty(view)
            .map_err(|e| WorkbenchError::Report(e.to_string()))?,
    };
    fs::write(path, content)?;
    Ok(())
}

pub fn render_markdown(view: &ViewModel, generated_at: DateTime<Utc>) -> String {
    let mut out = String::new();
    let id = assessment_id(&view.threats);

    out.push_str("# Threat Model Assessment Report\n\n");
    out.push_str("Connected Vehicle Telemetry System v2.0\n\n");
    let _ = writeln!(out, "- Date: {}", generated_at.format("%B %-d, %Y"));
    let _ = writeln!(out, "- Assessment ID: {id}");
    out.push_str("- Prepared by: Automotive Security Team\n\n");

    out.push_str("## Executive Summary\n\n");
    let _ = writeln!(out, "- Total Threats: {}", view.total);
    let _ = writeln!(out, "- Mitigated: {}", view.mitigated_count);
    let _ = writeln!(out, "- High Risk Open: {}", view.high_risk_open.len());
    let _ = writeln!(out, "- Security Score: {}%", view.security_score);
    out.push('\n');
    if view.high_risk_open.is_empty() {
        out.push_str(
            "The system architecture meets baseline security requirements with all \
             high-risk threats addressed.\n\n",
        );
    } else {
        let _ = writeln!(
            out,
            "**CRITICAL: {} high-risk vulnerabilities require immediate attention.**\n",
            view.high_risk_open.len()
        );
    }

    out.push_str("## System Architecture Overview\n\n");
    for comp in catalog::components() {
        let _ = writeln!(out, "### {}", comp.name);
        let _ = writeln!(out, "{}", comp.description);
        let _ = writeln!(out, "- Trust Level: {}", comp.trust_level);
        let _ = writeln!(out, "- Controls: {}", comp.security_controls.join(", "));
        out.push('\n');
    }

    out.push_str("## STRIDE Categories Assessment\n\n");
    out.push_str("| Category | Mitigated | Score |\n");
    out.push_str("|---|---|---|\n");
    for status in &view.categories {
        let _ = writeln!(
            out,
            "| {} ({}) | {}/{} | {}% |",
            status.category,
            status.category.name(),
            status.mitigated,
            status.total,
            status.score
        );
    }
    out.push('\n');

    out.push_str("## Detailed Threat Findings\n\n");
    for threat in &view.threats {
        let status = if threat.mitigated {
            "MITIGATED".to_string()
        } else {
            format!("OPEN - {} RISK", threat.impact)
        };
        let _ = writeln!(out, "### {}: {}", threat.id, threat.title);
        let _ = writeln!(out, "- Status: {status}");
        let _ = writeln!(
            out,
            "- Category: {} ({})",
            threat.category,
            threat.category.name()
        );
        let _ = writeln!(out, "- Impact: {}", threat.impact);
        if !threat.likelihood.is_empty() {
            let _ = writeln!(out, "- Likelihood: {}", threat.likelihood);
        }
        if threat.cvss_score > 0.0 {
            let _ = writeln!(out, "- CVSS: {:.1}", threat.cvss_score);
        }
        if !threat.attack_vector.is_empty() {
            let _ = writeln!(out, "- Attack Vector: {}", threat.attack_vector);
        }
        let components: Vec<String> = threat
            .affected_components
            .iter()
            .map(|id| catalog::node_label(id))
            .collect();
        let _ = writeln!(out, "- Affected Components: {}", components.join(", "));
        if !threat.compliance.is_empty() {
            let _ = writeln!(out, "- Compliance: {}", threat.compliance.join(", "));
        }
        out.push('\n');
        let _ = writeln!(out, "**Attack Scenario.** {}\n", threat.context);
        let controls = if threat.mitigated {
            "Implemented Controls"
        } else {
            "Required Controls"
        };
        let _ = writeln!(out, "**{controls}.** {}\n", threat.mitigation);
    }

    out.push_str("## Defense in Depth\n\n");
    for layer in catalog::defense_layers() {
        let _ = writeln!(out, "- {}: {}", layer.layer, layer.controls.join(", "));
    }
    out.push('\n');

    out.push_str("## Compliance & Standards\n\n");
    for standard in [
        "ISO 21434 - Road Vehicles Cybersecurity",
        "UN R155 - Cybersecurity Management",
        "SAE J3061 - Cybersecurity Guidebook",
        "NIST CSF - Cybersecurity Framework",
    ] {
        let _ = writeln!(out, "- {standard}");
    }
    out.push('\n');

    let next_review = generated_at + chrono::Duration::days(90);
    let _ = writeln!(out, "Next assessment: {}", next_review.format("%Y-%m-%d"));
    out.push_str("Generated by STRIDE Workbench | Confidential - authorized personnel only\n");
    out
}

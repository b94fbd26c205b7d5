//! Peak reports: one text line per peak, or a JSON array.

use serde::Serialize;

use crate::pipeline::{CircleDetection, LineDetection};

pub fn circle_report_line(c: &CircleDetection) -> String {
    format!("Centro: ({}, {}) - votos: {}", c.a, c.b, c.votes)
}

pub fn line_report_line(l: &LineDetection) -> String {
    format!("rho={:.1}, theta_deg={:.1}, votes={}", l.rho, l.theta_deg(), l.votes)
}

/// Newline-terminated text report, one circle per line.
pub fn circle_report(circles: &[CircleDetection]) -> String {
    circles.iter().map(|c| circle_report_line(c) + "\n").collect()
}

/// Newline-terminated text report, one line per detected line.
pub fn line_report(lines: &[LineDetection]) -> String {
    lines.iter().map(|l| line_report_line(l) + "\n").collect()
}

#[derive(Serialize)]
struct LineEntry {
    rho: f64,
    theta_deg: f64,
    votes: u32,
    segment: Option<[(i32, i32); 2]>,
}

pub fn line_report_json(lines: &[LineDetection]) -> Result<String, serde_json::Error> {
    let entries: Vec<LineEntry> = lines
        .iter()
        .map(|l| LineEntry {
            rho: l.rho,
            theta_deg: l.theta_deg(),
            votes: l.votes,
            segment: l.segment.map(|s| [s.start, s.end]),
        })
        .collect();
    serde_json::to_string_pretty(&entries)
}

pub fn circle_report_json(circles: &[CircleDetection]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(circles)
}

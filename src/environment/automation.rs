//! Automation, headless and VM heuristics
//!
//! Produces an additive, uncapped suspicion score; the UI layer picks its
//! own threshold. Every rule degrades to "no points" when the underlying
//! API is absent, except where absence is itself the signal (missing
//! language/platform/plugins — real browsers always expose those).

use serde::Serialize;

use super::ambient;
use super::devtools::detect_dev_tools;

/// Well-known globals leaked by automation tooling, with their weights.
const AUTOMATION_GLOBALS: &[(&str, u32)] = &[
    ("__nightmare", 30),
    ("__phantomjs", 30),
    ("callPhantom", 30),
    ("_phantom", 30),
    ("spawn", 20),
    ("emit", 20),
    ("Buffer", 15),
];

/// User-agent substrings of headless engines.
const HEADLESS_UA_MARKERS: &[&str] = &["HeadlessChrome", "PhantomJS"];

/// Suspicion score with the individual signals that fired, for the UI
/// layer's diagnostics.
#[derive(Debug, Clone, Serialize)]
pub struct AutomationReport {
    pub score: u32,
    pub signals: Vec<String>,
}

/// VM-environment suspicion contribution: low core count, low memory,
/// sub-desktop screen.
pub fn detect_vm() -> u32 {
    let mut score = 0;

    if let Some(cores) = ambient::navigator_prop("hardwareConcurrency").and_then(|v| v.as_f64()) {
        if cores >= 1.0 && cores < 2.0 {
            score += 20;
        }
    }

    if let Some(memory) = ambient::navigator_prop("deviceMemory").and_then(|v| v.as_f64()) {
        if memory > 0.0 && memory < 4.0 {
            score += 15;
        }
    }

    if let Some(screen) = ambient::global_prop("screen") {
        let dim = |name| ambient::prop_of(&screen, name).and_then(|v| v.as_f64());
        if let (Some(w), Some(h)) = (dim("width"), dim("height")) {
            if w < 1024.0 || h < 768.0 {
                score += 10;
            }
        }
    }

    score
}

/// Total automation suspicion score (see [`automation_report`] for the
/// breakdown).
pub fn detect_automation() -> u32 {
    automation_report().score
}

/// Run all automation heuristics and report which fired.
pub fn automation_report() -> AutomationReport {
    let mut fired: Vec<(String, u32)> = Vec::new();

    if ambient::navigator_prop("webdriver").map(|v| v.is_truthy()).unwrap_or(false) {
        fired.push(("webdriver".into(), 30));
    }

    for (name, weight) in AUTOMATION_GLOBALS {
        if ambient::global_truthy(name) {
            fired.push(((*name).into(), *weight));
        }
    }

    let user_agent = ambient::navigator_prop("userAgent")
        .and_then(|v| v.as_string())
        .unwrap_or_default();
    for marker in HEADLESS_UA_MARKERS {
        if user_agent.contains(marker) {
            fired.push(((*marker).into(), 30));
        }
    }

    // Real browsers always expose plugins; zero is suspicious, an absurd
    // count doubly so
    let plugin_count = ambient::navigator_prop("plugins")
        .and_then(|p| ambient::prop_of(&p, "length"))
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    if plugin_count == 0.0 {
        fired.push(("no-plugins".into(), 15));
    }
    if plugin_count > 20.0 {
        fired.push(("excessive-plugins".into(), 10));
    }

    let language = ambient::navigator_prop("language")
        .and_then(|v| v.as_string())
        .unwrap_or_default();
    if language.is_empty() {
        fired.push(("no-language".into(), 15));
    }
    let languages_len = ambient::navigator_prop("languages")
        .and_then(|l| ambient::prop_of(&l, "length"))
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    if languages_len == 0.0 {
        fired.push(("no-languages".into(), 10));
    }

    let platform = ambient::navigator_prop("platform")
        .and_then(|v| v.as_string())
        .unwrap_or_default();
    if platform.is_empty() {
        fired.push(("no-platform".into(), 15));
    }

    if ambient::navigator_prop("permissions").is_none() {
        fired.push(("no-permissions-api".into(), 10));
    }

    if detect_dev_tools() {
        fired.push(("devtools".into(), 25));
    }

    let vm = detect_vm();
    if vm > 0 {
        fired.push(("vm-environment".into(), vm));
    }

    let score = fired.iter().map(|(_, w)| w).sum();
    let signals: Vec<String> = fired.into_iter().map(|(name, _)| name).collect();

    if score >= 30 {
        log::debug!("🤖 automation suspicion {}: {:?}", score, signals);
    }

    AutomationReport { score, signals }
}

//! Label suggestion for captured text.
//!
//! Priority: tool name → known heading → `capture`.

use once_cell::sync::Lazy;
use regex::Regex;

/// Label used when nothing better can be derived.
pub const FALLBACK_LABEL: &str = "capture";

/// Well-known tools and the label their output usually belongs under.
const TOOL_LABELS: &[(&str, &str)] = &[
    ("nmap", "port_scan"),
    ("masscan", "port_scan"),
    ("rustscan", "port_scan"),
    ("ffuf", "ffuf_output"),
    ("wfuzz", "ffuf_output"),
    ("gobuster", "dir_scan"),
    ("dirsearch", "dir_scan"),
    ("feroxbuster", "dir_scan"),
    ("nikto", "vuln_scan"),
    ("nuclei", "vuln_scan"),
    ("sqlmap", "sqli_output"),
    ("hydra", "brute_force"),
    ("medusa", "brute_force"),
    ("hashcat", "hash_crack"),
    ("john", "hash_crack"),
    ("curl", "curl_output"),
    ("wget", "wget_output"),
];

static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\W+").expect("valid non-word regex"));
static UNDERSCORES: Lazy<Regex> = Lazy::new(|| Regex::new(r"_+").expect("valid underscore regex"));
static HEADING_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#+\s*").expect("valid heading marker regex"));

/// Suggest a snake_case label for `text`.
///
/// `command` is the invocation that produced the text (e.g. `nmap -sV host`
/// or `/usr/bin/ffuf`); `known_headings` are destination headings the first
/// line of `text` may name.
pub fn suggest(text: &str, command: Option<&str>, known_headings: &[String]) -> String {
    if let Some(base) = command.and_then(command_basename) {
        return TOOL_LABELS
            .iter()
            .find(|(tool, _)| *tool == base)
            .map(|(_, label)| (*label).to_string())
            .unwrap_or_else(|| normalize(&format!("{}_output", base)));
    }

    if let Some(heading) = match_heading(text, known_headings) {
        return heading;
    }

    FALLBACK_LABEL.to_string()
}

/// Lowercased program name of a command line, without directories or arguments.
fn command_basename(command: &str) -> Option<String> {
    let program = command.split_whitespace().next()?;
    let base = program.rsplit(['/', '\\']).next().unwrap_or(program);
    (!base.is_empty()).then(|| base.to_lowercase())
}

/// The first heading contained (case-insensitively) in the first non-empty
/// line of `text`, normalized. The heading must appear inside the line, not
/// the other way round.
fn match_heading(text: &str, known_headings: &[String]) -> Option<String> {
    let first_line = text.lines().map(str::trim).find(|line| !line.is_empty())?;
    let clean = HEADING_MARKER.replace(first_line, "").trim().to_lowercase();

    known_headings
        .iter()
        .filter(|heading| !heading.trim().is_empty())
        .find(|heading| clean.contains(&heading.to_lowercase()))
        .map(|heading| normalize(heading))
        .filter(|label| !label.is_empty())
}

/// snake_case form of arbitrary text: runs of non-word characters become a
/// single underscore, lowercased, without leading or trailing underscores.
pub fn normalize(text: &str) -> String {
    let replaced = NON_WORD.replace_all(text, "_");
    let collapsed = UNDERSCORES.replace_all(&replaced, "_");
    collapsed.to_lowercase().trim_matches('_').to_string()
}

//! Content inspection.
//!
//! Pure, synchronous functions over HTML and script text: manifest link
//! detection, script source extraction, and capability-usage pattern
//! matching. Every function is total over arbitrary input — malformed
//! markup or binary noise simply yields "no match", never an error.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};
use url::Url;

const LINK_SELECTOR_STR: &str = "link[rel]";
const SCRIPT_SELECTOR_STR: &str = "script[src]";

static LINK_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(LINK_SELECTOR_STR).unwrap_or_else(|e| {
        log::error!(
            "Failed to parse link selector '{}': {}",
            LINK_SELECTOR_STR,
            e
        );
        // Fall back to a known-valid selector that matches nothing.
        Selector::parse("*:not(*)").expect("fallback selector is valid")
    })
});

static SCRIPT_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(SCRIPT_SELECTOR_STR).unwrap_or_else(|e| {
        log::error!(
            "Failed to parse script selector '{}': {}",
            SCRIPT_SELECTOR_STR,
            e
        );
        Selector::parse("*:not(*)").expect("fallback selector is valid")
    })
});

// Call-shape patterns, tolerant of whitespace around the member access and
// call parenthesis. Substring-level matching on raw script text: a string
// literal containing the pattern is a known false positive, a renamed or
// dynamically-accessed call site a known false negative.
static SERVICE_WORKER_REGISTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"serviceWorker\s*\.\s*register\s*\(").expect("service worker pattern is valid")
});

static PUSH_MANAGER_SUBSCRIBE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"pushManager\s*\.\s*subscribe\s*\(").expect("push subscribe pattern is valid")
});

/// Returns true if the document contains a `<link>` element whose `rel`
/// attribute is (case-insensitively) `manifest`.
pub fn has_manifest_link(html: &str) -> bool {
    let document = Html::parse_document(html);
    document.select(&LINK_SELECTOR).any(|element| {
        element
            .value()
            .attr("rel")
            .is_some_and(|rel| rel.trim().eq_ignore_ascii_case("manifest"))
    })
}

/// Extracts `<script src>` references and resolves each against `base`.
///
/// Relative references become absolute; absolute references pass through
/// unchanged. Order matches document order and duplicates are kept — each
/// reference is fetched independently. References that resolve to nothing
/// parseable are skipped.
pub fn extract_script_sources(html: &str, base: &Url) -> Vec<Url> {
    let document = Html::parse_document(html);
    document
        .select(&SCRIPT_SELECTOR)
        .filter_map(|element| element.value().attr("src"))
        .filter(|src| !src.trim().is_empty())
        .filter_map(|src| base.join(src).ok())
        .collect()
}

/// Returns true if the script text contains a service-worker registration
/// call (`serviceWorker.register(...)` on any receiver).
pub fn uses_service_worker_registration(script: &str) -> bool {
    SERVICE_WORKER_REGISTER.is_match(script)
}

/// Returns true if the script text contains a push-subscription call
/// (`pushManager.subscribe(...)` on any receiver).
pub fn uses_push_subscription(script: &str) -> bool {
    PUSH_MANAGER_SUBSCRIBE.is_match(script)
}

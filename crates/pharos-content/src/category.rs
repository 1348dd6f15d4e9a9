//! Category resolution and keyword inference.

use pharos_core::content::DEFAULT_CATEGORY;
use regex::Regex;
use std::sync::LazyLock;

/// Ordered `(label, keywords)` rules. First rule with any keyword hit wins,
/// so specific categories sit above broad ones.
const RULES: &[(&str, &[&str])] = &[
    (
        "Market Access",
        &[
            "market access",
            "pricing",
            "reimbursement",
            "payer",
            "hta",
            "health technology assessment",
        ],
    ),
    (
        "Rare Diseases",
        &["rare disease", "orphan drug", "orphan designation"],
    ),
    (
        "Oncology",
        &["oncology", "cancer", "tumor", "tumour", "oncologist"],
    ),
    (
        "Medical Devices",
        &["medical device", "medtech", "diagnostic", "implant"],
    ),
    (
        "Digital Health",
        &[
            "digital health",
            "telehealth",
            "telemedicine",
            "artificial intelligence",
            "machine learning",
            "wearable",
        ],
    ),
    (
        "Regulatory",
        &["regulatory", "fda", "european medicines agency", "approval", "compliance"],
    ),
    (
        "Patient Insights",
        &["patient journey", "patient experience", "caregiver", "patient"],
    ),
    (
        "Physician Research",
        &["physician", "hcp", "kol", "key opinion leader", "clinician"],
    ),
    (
        "Research Methodology",
        &[
            "qualitative",
            "quantitative",
            "survey",
            "methodology",
            "focus group",
            "interview",
        ],
    ),
];

/// One case-insensitive whole-word matcher per rule. A trailing `s` is
/// allowed so plurals still hit.
static MATCHERS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    RULES
        .iter()
        .map(|(label, keywords)| {
            let alternation = keywords
                .iter()
                .map(|k| regex::escape(k))
                .collect::<Vec<_>>()
                .join("|");
            let re = Regex::new(&format!(r"(?i)\b(?:{alternation})s?\b"))
                .expect("keyword patterns are escaped");
            (*label, re)
        })
        .collect()
});

/// Infer a category from the item's title and excerpt.
pub fn infer_category(title: &str, excerpt: &str) -> &'static str {
    let haystack = format!("{title} {excerpt}");
    MATCHERS
        .iter()
        .find(|(_, re)| re.is_match(&haystack))
        .map(|(label, _)| *label)
        .unwrap_or(DEFAULT_CATEGORY)
}

/// Explicit category, else the linked taxonomy title, else inference.
pub fn resolve_category(
    explicit: Option<&str>,
    taxonomy_title: Option<&str>,
    title: &str,
    excerpt: &str,
) -> String {
    fn non_empty(s: Option<&str>) -> Option<&str> {
        s.map(str::trim).filter(|s| !s.is_empty())
    }
    non_empty(explicit)
        .or_else(|| non_empty(taxonomy_title))
        .map(str::to_string)
        .unwrap_or_else(|| infer_category(title, excerpt).to_string())
}

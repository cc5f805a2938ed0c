use once_cell::sync::Lazy;
use regex::Regex;

/// Compliance verdict for a single license string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Compliant,
    /// Redistribution must carry an attribution notice (CC-BY-4.0, BSD-4-Clause).
    NeedsAcknowledgment,
    /// Copyleft or copyleft-adjacent terms that need legal review.
    Complex,
    Unsupported,
    /// Empty or unextractable declaration.
    Unknown,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Compliant => write!(f, "compliant"),
            Verdict::NeedsAcknowledgment => write!(f, "needs acknowledgment"),
            Verdict::Complex => write!(f, "complex"),
            Verdict::Unsupported => write!(f, "unsupported"),
            Verdict::Unknown => write!(f, "unknown"),
        }
    }
}

/// Ordered decision list; the first matching pattern decides. Order matters:
/// `Apache-2.0` must be caught before the generic fallbacks, `CC0` before the
/// CC-BY family, every numbered BSD before plain `BSD`.
static RULES: Lazy<Vec<(Regex, Verdict)>> = Lazy::new(|| {
    [
        (r"^cc0", Verdict::Compliant),
        (r"^cc.*4", Verdict::NeedsAcknowledgment),
        (r"mit", Verdict::Compliant),
        (r"isc", Verdict::Compliant),
        (r"0bsd|bsd.*0", Verdict::Compliant),
        (r"bsd.*3", Verdict::Compliant),
        (r"bsd.*2", Verdict::Compliant),
        (r"bsd", Verdict::NeedsAcknowledgment),
        (r"apache.*2", Verdict::Compliant),
        (r"apache.*1", Verdict::Complex),
        (r"gnu|gpl", Verdict::Complex),
        (r"mpl", Verdict::Complex),
    ]
    .into_iter()
    .map(|(pattern, verdict)| {
        let re = Regex::new(&format!("(?i){}", pattern)).expect("license rule pattern");
        (re, verdict)
    })
    .collect()
});

static ATTRIBUTION: Lazy<[Regex; 2]> = Lazy::new(|| {
    [
        Regex::new(r"(?i)bsd.*4").expect("attribution pattern"),
        Regex::new(r"(?i)^cc.*4").expect("attribution pattern"),
    ]
});

/// Evaluate one raw license string against the policy.
pub fn evaluate(license: &str) -> Verdict {
    if license.is_empty() {
        return Verdict::Unknown;
    }
    RULES
        .iter()
        .find(|(re, _)| re.is_match(license))
        .map(|(_, verdict)| *verdict)
        .unwrap_or(Verdict::Unsupported)
}

/// Whether any of `licenses` obliges redistributors to reproduce an
/// attribution notice.
pub fn requires_attribution(licenses: &[String]) -> bool {
    licenses
        .iter()
        .any(|l| ATTRIBUTION.iter().any(|re| re.is_match(l)))
}

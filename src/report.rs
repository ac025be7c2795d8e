//! Audit report types.
//!
//! The service answers `GET /?url=...&token=...` with a JSON document of the
//! shape
//!
//! ```json
//! {
//!   "result": {
//!     "url": "https://...",
//!     "report-url": "https://...",
//!     "priorities": {
//!       "seo": { "diagnostics": [ ... ] },
//!       "grc": { "diagnostics": [ ... ] },
//!       "ux":  { "diagnostics": [ ... ] }
//!     }
//!   }
//! }
//! ```
//!
//! Parsing is deliberately lenient: every level defaults, so a thin or even
//! empty body decodes to an empty report (three clean categories, no
//! open-window targets) rather than failing the cycle, and a `total` sent
//! as a float or a quoted number is coerced instead of rejected. Only a
//! body that is not JSON at all is an error, and that is raised by the
//! client.

use serde::Deserialize;

/// The three diagnostic categories, in the order the panel displays them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Seo,
    Grc,
    Ux,
}

impl Category {
    /// Display order is fixed: SEO, then GRC, then UX.
    pub const ALL: [Category; 3] = [Category::Seo, Category::Grc, Category::Ux];

    /// The service's key for this category.
    pub const fn key(self) -> &'static str {
        match self {
            Category::Seo => "seo",
            Category::Grc => "grc",
            Category::Ux => "ux",
        }
    }

    /// Section heading shown in the panel.
    pub const fn label(self) -> &'static str {
        match self {
            Category::Seo => "SEO",
            Category::Grc => "GRC",
            Category::Ux => "UX",
        }
    }

    /// Stable position in per-category arrays.
    pub const fn idx(self) -> usize {
        match self {
            Category::Seo => 0,
            Category::Grc => 1,
            Category::Ux => 2,
        }
    }
}

/// One row of the report: a single finding within a category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Diagnostic {
    /// The service's own fine-grained category label for the finding
    /// (e.g. "Accessibility"), distinct from the panel's three groups.
    pub category: String,
    /// Human-readable summary of the finding.
    pub title: String,
    /// Number of occurrences across the page.
    #[serde(deserialize_with = "deserialize_total")]
    pub total: u64,
    /// Longer explanation, shown as a tooltip. Absent for many findings.
    pub info: Option<String>,
    /// Link to a help video, opened in the browser. Absent for most findings.
    pub video: Option<String>,
}

/// Custom deserializer to handle `total` values sent as floats or quoted
/// numbers as well as plain integers; any other shape reads as zero.
fn deserialize_total<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, IgnoredAny, MapAccess, SeqAccess, Visitor};
    use std::fmt;

    struct TotalVisitor;

    impl<'de> Visitor<'de> for TotalVisitor {
        type Value = u64;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("an occurrence count as a number or numeric string")
        }

        fn visit_u64<E>(self, count: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(count)
        }

        fn visit_i64<E>(self, count: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(count.max(0) as u64)
        }

        fn visit_f64<E>(self, count: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            // `as` saturates: NaN and negatives land on zero.
            Ok(count as u64)
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            match value.parse::<u64>() {
                Ok(count) => Ok(count),
                Err(_) => Ok(value.parse::<f64>().map_or(0, |count| count as u64)),
            }
        }

        fn visit_bool<E>(self, _: bool) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(0)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(0)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(0)
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: SeqAccess<'de>,
        {
            while seq.next_element::<IgnoredAny>()?.is_some() {}
            Ok(0)
        }

        fn visit_map<M>(self, mut map: M) -> Result<Self::Value, M::Error>
        where
            M: MapAccess<'de>,
        {
            while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
            Ok(0)
        }
    }

    deserializer.deserialize_any(TotalVisitor)
}

/// Parsed report for one audited URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisReport {
    /// SMARTVIEW page for the audited URL (`result.url`).
    pub smartview_url: String,
    /// Full report page (`result."report-url"`).
    pub report_url: String,
    /// Diagnostics per category, service order preserved.
    groups: [Vec<Diagnostic>; 3],
}

impl AnalysisReport {
    /// Diagnostics for one category, in the order the service listed them.
    pub fn group(&self, category: Category) -> &[Diagnostic] {
        &self.groups[category.idx()]
    }

    /// True when no category holds any diagnostic.
    pub fn is_clean(&self) -> bool {
        self.groups.iter().all(Vec::is_empty)
    }

    /// Finding count across all categories.
    pub fn total_diagnostics(&self) -> usize {
        self.groups.iter().map(Vec::len).sum()
    }

    /// Decode a raw response body.
    pub fn from_json(body: &str) -> serde_json::Result<Self> {
        let envelope: ReportEnvelope = serde_json::from_str(body)?;
        Ok(envelope.into())
    }

    #[cfg(test)]
    pub(crate) fn for_tests(
        smartview_url: &str,
        report_url: &str,
        groups: [Vec<Diagnostic>; 3],
    ) -> Self {
        Self {
            smartview_url: smartview_url.into(),
            report_url: report_url.into(),
            groups,
        }
    }
}

// ============================================================================
// Wire types
// ============================================================================

/// Top-level response document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReportEnvelope {
    pub result: ReportPayload,
}

/// The `result` object.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReportPayload {
    pub url: String,
    #[serde(rename = "report-url")]
    pub report_url: String,
    pub priorities: Priorities,
}

/// Per-category groupings under `result.priorities`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Priorities {
    pub seo: CategoryGroup,
    pub grc: CategoryGroup,
    pub ux: CategoryGroup,
}

/// One category's diagnostics list.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CategoryGroup {
    pub diagnostics: Vec<Diagnostic>,
}

impl From<ReportEnvelope> for AnalysisReport {
    fn from(envelope: ReportEnvelope) -> Self {
        let result = envelope.result;
        Self {
            smartview_url: result.url,
            report_url: result.report_url,
            groups: [
                result.priorities.seo.diagnostics,
                result.priorities.grc.diagnostics,
                result.priorities.ux.diagnostics,
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_BODY: &str = r#"{
        "result": {
            "url": "https://sv.example/page/42",
            "report-url": "https://sv.example/report/42",
            "priorities": {
                "seo": { "diagnostics": [] },
                "grc": { "diagnostics": [
                    { "category": "Accessibility", "title": "Missing alt text", "total": 3,
                      "info": "Images need alternative text.",
                      "video": "https://sv.example/video/alt" }
                ] },
                "ux": { "diagnostics": [
                    { "category": "Performance", "title": "Large page weight", "total": 1 }
                ] }
            }
        }
    }"#;

    #[test]
    fn test_parse_full_body() {
        let report = AnalysisReport::from_json(FULL_BODY).unwrap();
        assert_eq!(report.smartview_url, "https://sv.example/page/42");
        assert_eq!(report.report_url, "https://sv.example/report/42");
        assert!(report.group(Category::Seo).is_empty());
        assert_eq!(report.group(Category::Grc).len(), 1);
        assert_eq!(report.group(Category::Ux).len(), 1);
        assert_eq!(report.total_diagnostics(), 2);

        let grc = &report.group(Category::Grc)[0];
        assert_eq!(grc.category, "Accessibility");
        assert_eq!(grc.total, 3);
        assert!(grc.info.is_some());
        assert!(grc.video.is_some());

        let ux = &report.group(Category::Ux)[0];
        assert!(ux.info.is_none());
        assert!(ux.video.is_none());
    }

    #[test]
    fn test_empty_object_parses_to_clean_report() {
        let report = AnalysisReport::from_json("{}").unwrap();
        assert!(report.is_clean());
        assert!(report.smartview_url.is_empty());
        assert!(report.report_url.is_empty());
    }

    #[test]
    fn test_missing_priorities_defaults_to_empty_groups() {
        let body = r#"{"result": {"url": "u", "report-url": "r"}}"#;
        let report = AnalysisReport::from_json(body).unwrap();
        assert!(report.is_clean());
        assert_eq!(report.smartview_url, "u");
        assert_eq!(report.report_url, "r");
    }

    #[test]
    fn test_missing_category_defaults_to_empty() {
        let body = r#"{"result": {"priorities": {"ux": {"diagnostics": [
            {"category": "c", "title": "t", "total": 2}
        ]}}}}"#;
        let report = AnalysisReport::from_json(body).unwrap();
        assert!(report.group(Category::Seo).is_empty());
        assert!(report.group(Category::Grc).is_empty());
        assert_eq!(report.group(Category::Ux).len(), 1);
    }

    #[test]
    fn test_float_total_truncates() {
        let body = r#"{"result": {"priorities": {"seo": {"diagnostics": [
            {"category": "c", "title": "t", "total": 3.7}
        ]}}}}"#;
        let report = AnalysisReport::from_json(body).unwrap();
        assert_eq!(report.group(Category::Seo)[0].total, 3);
    }

    #[test]
    fn test_quoted_total_parses() {
        let body = r#"{"result": {"priorities": {"grc": {"diagnostics": [
            {"category": "c", "title": "t", "total": "12"},
            {"category": "c", "title": "t", "total": "2.9"}
        ]}}}}"#;
        let report = AnalysisReport::from_json(body).unwrap();
        assert_eq!(report.group(Category::Grc)[0].total, 12);
        assert_eq!(report.group(Category::Grc)[1].total, 2);
    }

    #[test]
    fn test_unusable_total_reads_as_zero() {
        for total in [r#""many""#, "null", "-2", "true", "[1, 2]", r#"{"n": 1}"#] {
            let body = format!(
                r#"{{"result": {{"priorities": {{"ux": {{"diagnostics": [
                    {{"category": "c", "title": "t", "total": {total}}}
                ]}}}}}}}}"#
            );
            let report = AnalysisReport::from_json(&body).unwrap();
            assert_eq!(report.group(Category::Ux)[0].total, 0, "total: {total}");
        }
    }

    #[test]
    fn test_non_json_body_is_an_error() {
        assert!(AnalysisReport::from_json("<html>nope</html>").is_err());
    }

    #[test]
    fn test_service_order_preserved() {
        let body = r#"{"result": {"priorities": {"seo": {"diagnostics": [
            {"title": "b", "total": 1},
            {"title": "a", "total": 9},
            {"title": "c", "total": 4}
        ]}}}}"#;
        let report = AnalysisReport::from_json(body).unwrap();
        let titles: Vec<_> = report
            .group(Category::Seo)
            .iter()
            .map(|d| d.title.as_str())
            .collect();
        assert_eq!(titles, ["b", "a", "c"]);
    }

    #[test]
    fn test_category_display_order() {
        assert_eq!(
            Category::ALL.map(Category::key),
            ["seo", "grc", "ux"]
        );
    }
}

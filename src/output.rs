//! Rendering of search outcomes for the terminal
//!
//! Markdown for people, JSON for scripts. Query tokens found in a product name
//! are wrapped in `**bold**`; positions come from nucleo so accented names
//! highlight against unaccented queries.

use crate::search::{SearchOutcome, SuggestionSet};
use nucleo_matcher::pattern::{AtomKind, CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher, Utf32Str};
use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Markdown,
    Json,
}

/// Wrap the runs of `name` matched by the query tokens in `**bold**`.
///
/// Names that do not contain every token (fuzzy results) are returned unchanged.
pub fn highlight(name: &str, query: &str, matcher: &mut Matcher) -> String {
    if query.trim().is_empty() {
        return name.to_string();
    }

    let pattern = Pattern::new(
        query,
        CaseMatching::Ignore,
        Normalization::Smart,
        AtomKind::Substring,
    );
    let mut buf = Vec::new();
    let haystack = Utf32Str::new(name, &mut buf);
    let mut indices = Vec::new();
    if pattern.indices(haystack, matcher, &mut indices).is_none() {
        return name.to_string();
    }
    indices.sort_unstable();
    indices.dedup();

    // Haystack positions are grapheme indices
    let mut out = String::with_capacity(name.len() + 8);
    let mut open = false;
    for (i, grapheme) in name.graphemes(true).enumerate() {
        let hit = indices.binary_search(&(i as u32)).is_ok();
        if hit != open {
            out.push_str("**");
            open = hit;
        }
        out.push_str(grapheme);
    }
    if open {
        out.push_str("**");
    }
    out
}

pub fn render_markdown(outcome: &SearchOutcome) -> String {
    let page = &outcome.page;
    let mut matcher = Matcher::new(Config::DEFAULT);
    let mut md = String::new();

    let noun = if page.total == 1 { "product" } else { "products" };
    if outcome.query.is_empty() {
        md.push_str(&format!("# Catalog · {} {}\n\n", page.total, noun));
    } else {
        md.push_str(&format!(
            "# Search Results · {} {} for \"{}\"\n\n",
            page.total, noun, outcome.query.raw
        ));
    }

    if let Some(suggestions) = &outcome.suggestions {
        let names: Vec<&str> = suggestions.iter().collect();
        md.push_str(&format!("Did you mean: {}?\n\n", names.join(", ")));
    }

    if page.items.is_empty() {
        md.push_str("No products matched.\n");
        return md;
    }

    for (i, result) in page.items.iter().enumerate() {
        let record = &result.candidate.record;
        let mut line = format!(
            "{}. {}",
            page.offset() + i + 1,
            highlight(&record.name, &outcome.query.normalized, &mut matcher)
        );
        if let Some(category) = &record.category {
            line.push_str(&format!(" · {}", category));
        }
        if let Some(price) = record.price {
            line.push_str(&format!(" · {:.2}", price));
        }
        if !outcome.query.is_empty() {
            line.push_str(&format!(" _({})_", result.kind.label()));
        }
        md.push_str(&line);
        md.push('\n');
    }

    let first = page.offset() + 1;
    let last = page.offset() + page.items.len();
    md.push_str(&format!(
        "\nPage {} of {} · showing {}-{} of {}\n",
        page.page, page.total_pages, first, last, page.total
    ));
    if page.has_next {
        md.push_str(&format!("Next: --page {}\n", page.page + 1));
    }

    md
}

pub fn render_json(outcome: &SearchOutcome) -> serde_json::Result<String> {
    serde_json::to_string_pretty(outcome)
}

pub fn render_suggestions_markdown(query: &str, suggestions: &SuggestionSet) -> String {
    if suggestions.is_empty() {
        return format!("No suggestions for \"{}\".\n", query);
    }
    let mut md = format!("# Did you mean · \"{}\"\n\n", query);
    for suggestion in suggestions.iter() {
        md.push_str(&format!("- {}\n", suggestion));
    }
    md
}

pub fn render_suggestions_json(suggestions: &SuggestionSet) -> serde_json::Result<String> {
    serde_json::to_string_pretty(suggestions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Candidate, CatalogRecord};
    use crate::search::paginate::paginate;
    use crate::search::{Query, ScoredResult};

    fn matcher() -> Matcher {
        Matcher::new(Config::DEFAULT)
    }

    fn outcome(query: &str, names: &[(&str, Option<f64>)], page: usize, page_size: usize) -> SearchOutcome {
        let query = Query::parse(query);
        let results: Vec<ScoredResult> = names
            .iter()
            .enumerate()
            .map(|(i, (name, price))| {
                let candidate = Candidate::new(CatalogRecord {
                    id: i.to_string(),
                    name: name.to_string(),
                    category: Some("Despensa".to_string()),
                    price: *price,
                });
                ScoredResult::scored(candidate, &query)
            })
            .collect();
        SearchOutcome {
            query,
            page: paginate(results, page, page_size).unwrap(),
            suggestions: None,
            fuzzy_fallback: false,
        }
    }

    #[test]
    fn test_highlight_single_token() {
        assert_eq!(highlight("Leche entera", "leche", &mut matcher()), "**Leche** entera");
    }

    #[test]
    fn test_highlight_multiple_tokens() {
        assert_eq!(
            highlight("Aceite de oliva", "aceite oliva", &mut matcher()),
            "**Aceite** de **oliva**"
        );
    }

    #[test]
    fn test_highlight_accented_name() {
        assert_eq!(highlight("Azúcar moreno", "azucar", &mut matcher()), "**Azúcar** moreno");
    }

    #[test]
    fn test_highlight_no_match_unchanged() {
        assert_eq!(highlight("Garbanzos", "garbano", &mut matcher()), "Garbanzos");
        assert_eq!(highlight("Garbanzos", "", &mut matcher()), "Garbanzos");
    }

    #[test]
    fn test_markdown_results_and_footer() {
        let outcome = outcome(
            "aceite",
            &[("Aceite de oliva", Some(6.5)), ("Aceite de girasol", None)],
            1,
            1,
        );
        let md = render_markdown(&outcome);

        assert!(md.starts_with("# Search Results · 2 products for \"aceite\""));
        assert!(md.contains("1. **Aceite** de oliva · Despensa · 6.50 _(starts-with)_"));
        assert!(!md.contains("girasol"));
        assert!(md.contains("Page 1 of 2 · showing 1-1 of 2"));
        assert!(md.contains("Next: --page 2"));
    }

    #[test]
    fn test_markdown_numbering_continues_across_pages() {
        let outcome = outcome("pan", &[("Pan", None), ("Pan integral", None)], 2, 1);
        let md = render_markdown(&outcome);
        assert!(md.contains("2. **Pan** integral"));
        assert!(!md.contains("Next:"));
    }

    #[test]
    fn test_markdown_empty_with_suggestions() {
        let mut outcome = outcome("garbano", &[], 1, 24);
        outcome.suggestions = Some(SuggestionSet {
            suggestions: vec!["garbanzos".to_string()],
        });
        let md = render_markdown(&outcome);
        assert!(md.contains("Did you mean: garbanzos?"));
        assert!(md.contains("No products matched."));
    }

    #[test]
    fn test_json_contains_page_metadata() {
        let outcome = outcome("pan", &[("Pan", Some(1.0))], 1, 24);
        let json: serde_json::Value = serde_json::from_str(&render_json(&outcome).unwrap()).unwrap();
        assert_eq!(json["page"]["total"], 1);
        assert_eq!(json["page"]["items"][0]["kind"], "exact");
        assert_eq!(json["query"]["tokens"][0], "pan");
    }

    #[test]
    fn test_suggestions_rendering() {
        let set = SuggestionSet {
            suggestions: vec!["garbanzo".to_string(), "garbanzos".to_string()],
        };
        let md = render_suggestions_markdown("garbanso", &set);
        assert!(md.contains("- garbanzo\n- garbanzos\n"));
        assert_eq!(
            render_suggestions_markdown("xyz", &SuggestionSet::default()),
            "No suggestions for \"xyz\".\n"
        );
        assert!(render_suggestions_json(&set).unwrap().contains("garbanzos"));
    }
}

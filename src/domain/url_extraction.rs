use itertools::Itertools;
use serde_json::Value;
use url::Url;

const URL_KEY_HINTS: [&str; 3] = ["url", "link", "href"];

/// Collects every link mentioned anywhere in a prior site analysis.
///
/// Relative references are resolved against `base_url`. The result only
/// holds absolute http(s) URLs without fragments, deduplicated in the order
/// they were first seen. Anything that does not resolve is skipped.
pub fn extract_urls(analysis: &Value, base_url: &str) -> Vec<String> {
    let base = Url::parse(base_url).ok();

    let mut candidates = vec![];
    collect_candidates(analysis, None, &mut candidates);

    candidates
        .into_iter()
        .filter_map(|c| resolve(c, base.as_ref()))
        .unique()
        .collect()
}

fn collect_candidates<'a>(value: &'a Value, key: Option<&str>, out: &mut Vec<&'a str>) {
    match value {
        Value::String(s) => {
            if is_candidate(s, key) {
                out.push(s.trim());
            }
        }
        // Items of an array inherit the key the array sits under
        Value::Array(items) => items
            .iter()
            .for_each(|item| collect_candidates(item, key, out)),
        Value::Object(map) => map
            .iter()
            .for_each(|(k, v)| collect_candidates(v, Some(k), out)),
        _ => {}
    }
}

fn is_candidate(text: &str, key: Option<&str>) -> bool {
    let text = text.trim();
    if text.is_empty() || text.contains(char::is_whitespace) {
        return false;
    }

    let lowercase = text.to_lowercase();
    if lowercase.starts_with("http://") || lowercase.starts_with("https://") {
        return true;
    }

    if text.starts_with('/') || text.starts_with("./") || text.starts_with("../") {
        return true;
    }

    match key {
        Some(k) => {
            let k = k.to_lowercase();
            URL_KEY_HINTS.iter().any(|hint| k.contains(hint))
        }
        None => false,
    }
}

fn resolve(candidate: &str, base: Option<&Url>) -> Option<String> {
    let mut url = match Url::parse(candidate) {
        Ok(url) => url,
        Err(url::ParseError::RelativeUrlWithoutBase) => base?.join(candidate).ok()?,
        Err(_) => return None,
    };

    match url.scheme() {
        "http" | "https" => {}
        _ => return None,
    }
    url.host_str()?;
    url.set_fragment(None);

    Some(url.into())
}

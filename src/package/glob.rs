/*!
 * Glob Matching
 * Segment-wise matching of relative, '/'-separated paths
 *
 * Supports `*` and `?` within a segment, `**` across any number of segments,
 * and `{a,b}` alternatives. A trailing `/` is ignored (patterns name directories).
 */

/// Compiled glob pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobPattern {
    source: String,
    alternatives: Vec<Vec<String>>,
}

impl GlobPattern {
    pub fn new(pattern: &str) -> Self {
        let trimmed = pattern.trim().trim_start_matches("./").trim_end_matches('/');
        let alternatives = expand_braces(trimmed)
            .into_iter()
            .map(|alt| {
                alt.split('/')
                    .filter(|segment| !segment.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .collect();

        Self {
            source: pattern.to_string(),
            alternatives,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Match a relative path such as `packs/billing`
    pub fn matches(&self, path: &str) -> bool {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        self.alternatives.iter().any(|pattern| {
            let pattern: Vec<&str> = pattern.iter().map(String::as_str).collect();
            match_segments(&pattern, &segments)
        })
    }
}

/// Whether any pattern in the set matches
pub fn matches_any(patterns: &[GlobPattern], path: &str) -> bool {
    patterns.iter().any(|p| p.matches(path))
}

fn match_segments(pattern: &[&str], path: &[&str]) -> bool {
    match pattern.split_first() {
        None => path.is_empty(),
        Some((&"**", rest)) => (0..=path.len()).any(|skip| match_segments(rest, &path[skip..])),
        Some((segment, rest)) => match path.split_first() {
            Some((head, tail)) => match_segment(segment.as_bytes(), head.as_bytes()) && match_segments(rest, tail),
            None => false,
        },
    }
}

fn match_segment(pattern: &[u8], text: &[u8]) -> bool {
    match pattern.split_first() {
        None => text.is_empty(),
        Some((b'*', rest)) => (0..=text.len()).any(|skip| match_segment(rest, &text[skip..])),
        Some((b'?', rest)) => !text.is_empty() && match_segment(rest, &text[1..]),
        Some((c, rest)) => text.first() == Some(c) && match_segment(rest, &text[1..]),
    }
}

/// Expand the first `{a,b}` group recursively into plain patterns
fn expand_braces(pattern: &str) -> Vec<String> {
    let Some(open) = pattern.find('{') else {
        return vec![pattern.to_string()];
    };
    let Some(close) = pattern[open..].find('}').map(|idx| open + idx) else {
        return vec![pattern.to_string()];
    };

    let prefix = &pattern[..open];
    let suffix = &pattern[close + 1..];
    pattern[open + 1..close]
        .split(',')
        .flat_map(|choice| expand_braces(&format!("{prefix}{choice}{suffix}")))
        .collect()
}

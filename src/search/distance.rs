//! Edit distance
//!
//! Classic Levenshtein distance over characters, plus an approximate
//! substring alignment (free start and end in the text) used by the fuzzy engine.

/// Minimum number of single-character insertions, deletions or substitutions
/// turning `a` into `b`. O(len(a) * len(b)) time, O(min) space.
pub fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    // Keep the shorter string on the row axis
    let (long, short) = if a_chars.len() >= b_chars.len() {
        (&a_chars, &b_chars)
    } else {
        (&b_chars, &a_chars)
    };

    if short.is_empty() {
        return long.len();
    }

    let mut prev_row: Vec<usize> = (0..=short.len()).collect();
    let mut curr_row: Vec<usize> = vec![0; short.len() + 1];

    for (i, lc) in long.iter().enumerate() {
        curr_row[0] = i + 1;
        for (j, sc) in short.iter().enumerate() {
            let cost = usize::from(lc != sc);
            curr_row[j + 1] = (prev_row[j + 1] + 1) // deletion
                .min(curr_row[j] + 1) // insertion
                .min(prev_row[j] + cost); // substitution
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[short.len()]
}

/// Best placement of a pattern inside a text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alignment {
    /// Edits needed to turn the matched text window into the pattern
    pub errors: usize,
    /// Character offset in the text where the window starts
    pub start: usize,
    /// Character offset one past the window's last character
    pub end: usize,
}

/// Align `pattern` against the best-matching window of `text`.
///
/// Leading and trailing text is free; only edits inside the window count.
/// Among windows with equal errors the leftmost one wins.
pub fn align(pattern: &str, text: &str) -> Alignment {
    let p: Vec<char> = pattern.chars().collect();
    let t: Vec<char> = text.chars().collect();

    if p.is_empty() {
        return Alignment {
            errors: 0,
            start: 0,
            end: 0,
        };
    }

    // Each cell holds (edits, window start). Columns run over the text.
    let mut prev: Vec<(usize, usize)> = (0..=t.len()).map(|j| (0, j)).collect();
    let mut curr: Vec<(usize, usize)> = vec![(0, 0); t.len() + 1];

    for (i, pc) in p.iter().enumerate() {
        curr[0] = (i + 1, 0);
        for (j, tc) in t.iter().enumerate() {
            let cost = usize::from(pc != tc);
            let diagonal = (prev[j].0 + cost, prev[j].1);
            let skip_pattern = (prev[j + 1].0 + 1, prev[j + 1].1);
            let skip_text = (curr[j].0 + 1, curr[j].1);
            curr[j + 1] = diagonal.min(skip_pattern).min(skip_text);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    let (end, &(errors, start)) = prev
        .iter()
        .enumerate()
        .min_by_key(|(end, (errors, start))| (*errors, *start, *end))
        .unwrap_or((0, &(p.len(), 0)));

    Alignment { errors, start, end }
}

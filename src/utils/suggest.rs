fn normalize(value: &str) -> String {
    value
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

fn edit_distance(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }
    if a.is_empty() || b.is_empty() {
        return a.len().max(b.len());
    }
    let b_chars: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b_chars.len()).collect();
    for (i, ca) in a.chars().enumerate() {
        let mut curr = vec![i + 1];
        for (j, cb) in b_chars.iter().enumerate() {
            let cost = if ca == *cb { 0 } else { 1 };
            let best = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
            curr.push(best);
        }
        prev = curr;
    }
    prev[b_chars.len()]
}

fn score(input: &str, candidate: &str) -> usize {
    let a = normalize(input);
    let b = normalize(candidate);
    if a.is_empty() || b.is_empty() {
        return usize::MAX;
    }
    if a == b {
        return 0;
    }
    if a.contains(&b) || b.contains(&a) {
        return 1;
    }
    edit_distance(&a, &b)
}

fn threshold(input: &str) -> usize {
    match normalize(input).len() {
        0 => 0,
        1..=4 => 1,
        5..=8 => 2,
        _ => 3,
    }
}

/// Near matches for an unrecognized name, best first.
pub fn suggest(input: &str, candidates: &[&str], max: usize) -> Vec<String> {
    let limit = threshold(input);
    let mut scored: Vec<(usize, &str)> = candidates
        .iter()
        .map(|candidate| (score(input, candidate), *candidate))
        .filter(|(s, _)| *s <= limit)
        .collect();
    scored.sort_by_key(|(s, candidate)| (*s, candidate.to_string()));
    scored
        .into_iter()
        .take(max)
        .map(|(_, candidate)| candidate.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_and_near_matches_rank_first() {
        let candidates = ["listDeals", "getDeal", "createDeal", "moveDeal"];
        assert_eq!(suggest("listdeals", &candidates, 3), vec!["listDeals"]);
        assert_eq!(suggest("listDeal", &candidates, 3)[0], "listDeals");
    }

    #[test]
    fn unrelated_input_yields_nothing() {
        let candidates = ["listDeals", "getDeal"];
        assert!(suggest("zzzzzzzzzz", &candidates, 3).is_empty());
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(suggest("", &["listDeals"], 3).is_empty());
    }
}

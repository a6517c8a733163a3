// Approximate string matching against a small closed vocabulary.
// The score is the Ratcliff/Obershelp "gestalt" ratio: 2*M / (|a| + |b|),
// where M is the total length of the recursively found matching blocks.

/// Similarity ratio in [0, 1]. Two empty strings are identical.
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    let matches = matching_characters(&a, &b);
    2.0 * matches as f64 / total as f64
}

/// Best vocabulary entry scoring at least `cutoff` against `word`.
/// Ties go to the lexicographically greater entry.
pub fn closest_match<'a>(word: &str, vocabulary: &[&'a str], cutoff: f64) -> Option<&'a str> {
    let mut best: Option<(f64, &'a str)> = None;
    for &candidate in vocabulary {
        let score = similarity_ratio(candidate, word);
        if score < cutoff {
            continue;
        }
        best = match best {
            Some((best_score, best_word))
                if best_score > score || (best_score == score && best_word >= candidate) =>
            {
                Some((best_score, best_word))
            }
            _ => Some((score, candidate)),
        };
    }
    best.map(|(_, word)| word)
}

// Sum of the sizes of all matching blocks
fn matching_characters(a: &[char], b: &[char]) -> usize {
    let mut total = 0;
    let mut queue = vec![(0, a.len(), 0, b.len())];

    while let Some((alo, ahi, blo, bhi)) = queue.pop() {
        let (i, j, size) = longest_match(a, b, alo, ahi, blo, bhi);
        if size == 0 {
            continue;
        }
        total += size;
        if alo < i && blo < j {
            queue.push((alo, i, blo, j));
        }
        if i + size < ahi && j + size < bhi {
            queue.push((i + size, ahi, j + size, bhi));
        }
    }

    total
}

// Longest common run of a[alo..ahi] and b[blo..bhi]; earliest in `a` wins ties.
fn longest_match(
    a: &[char],
    b: &[char],
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0);
    let mut previous = vec![0usize; bhi - blo + 1];

    for i in alo..ahi {
        let mut current = vec![0usize; bhi - blo + 1];
        for j in blo..bhi {
            if a[i] != b[j] {
                continue;
            }
            let k = previous[j - blo] + 1;
            current[j - blo + 1] = k;
            if k > best_size {
                best_i = i + 1 - k;
                best_j = j + 1 - k;
                best_size = k;
            }
        }
        previous = current;
    }

    (best_i, best_j, best_size)
}

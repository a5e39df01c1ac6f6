use strsim::normalized_levenshtein;

/// Normalised edit-distance similarity in `[0, 1]`:
/// `1 - levenshtein(a, b) / max(len(a), len(b))`, measured in chars.
///
/// Symmetric, and `similarity(a, a) == 1.0` (including two empty strings).
pub fn similarity(a: &str, b: &str) -> f64 {
    normalized_levenshtein(a, b)
}

/// Longest string (in chars) that is ever fed to the edit-distance routine.
pub const MAX_COMPARABLE_LEN: usize = 64;

/// [`similarity`] for fuzzy matching against `threshold`, or `None` when the
/// pair cannot reach it.
///
/// Pairs with either side longer than [`MAX_COMPARABLE_LEN`] are never
/// compared, and neither are pairs whose length difference alone keeps the
/// score below `threshold`. Edit distance is at least the length difference,
/// so the skip never hides a passing pair.
pub fn comparable_similarity(a: &str, b: &str, threshold: f64) -> Option<f64> {
    let (len_a, len_b) = (a.chars().count(), b.chars().count());
    let longest = len_a.max(len_b);
    if longest > MAX_COMPARABLE_LEN {
        return None;
    }
    if longest > 0 {
        let upper_bound = 1.0 - len_a.abs_diff(len_b) as f64 / longest as f64;
        if upper_bound < threshold {
            return None;
        }
    }
    Some(similarity(a, b))
}

/// True when `needle` is long enough to count as evidence and occurs in `haystack`.
///
/// Very short strings ("c", "go") would otherwise match inside unrelated words.
pub fn contains_meaningful(haystack: &str, needle: &str) -> bool {
    needle.chars().count() >= MIN_CONTAINMENT_LEN && haystack.contains(needle)
}

/// True when either string meaningfully contains the other.
pub fn overlaps(a: &str, b: &str) -> bool {
    a == b || contains_meaningful(a, b) || contains_meaningful(b, a)
}

const MIN_CONTAINMENT_LEN: usize = 3;

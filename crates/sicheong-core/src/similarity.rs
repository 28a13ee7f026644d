/// Similarity ratio in `[0, 1]` based on the longest common subsequence.
///
/// `2 * LCS(a, b) / (len(a) + len(b))`, counted in chars. Two empty strings
/// are identical (1.0); one empty string against a non-empty one is 0.0.
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * lcs_len(&a, &b) as f64 / total as f64
}

/// Length of the longest common subsequence, two-row dynamic programming.
fn lcs_len(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    for &ca in a {
        for (j, &cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn identical() {
        assert!(close(ratio("결혼하자맹꽁아", "결혼하자맹꽁아"), 1.0));
    }

    #[test]
    fn disjoint() {
        assert!(close(ratio("가나다", "라마바"), 0.0));
    }

    #[test]
    fn both_empty() {
        assert!(close(ratio("", ""), 1.0));
    }

    #[test]
    fn one_empty() {
        assert!(close(ratio("", "닥터차정숙"), 0.0));
        assert!(close(ratio("닥터차정숙", ""), 0.0));
    }

    #[test]
    fn partial_overlap() {
        // LCS("abcd", "abxd") = 3 → 6 / 8
        assert!(close(ratio("abcd", "abxd"), 0.75));
    }

    #[test]
    fn symmetric() {
        let pairs = [("효심이네각자도생", "효심이네"), ("수지맞은우리", "수지맞은우리들")];
        for (a, b) in pairs {
            assert!(close(ratio(a, b), ratio(b, a)));
        }
    }

    #[test]
    fn lcs_is_subsequence_not_substring() {
        assert_eq!(lcs_len(&['a', 'x', 'b', 'y', 'c'], &['a', 'b', 'c']), 3);
    }
}

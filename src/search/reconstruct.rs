use super::engine::Candidate;
use super::topk::TopKSet;
use crate::transposer::Permutation;
use itertools::Itertools;
use std::collections::HashSet;

/// Rearranges the consecutive pairs of `transpose` in every possible order.
///
/// `[0,1,2,3,4]` groups as `[0,1] [2,3] [4]`; elements never move within
/// their pair.
pub fn pair_orderings(transpose: &Permutation) -> Vec<Permutation> {
    let pairs: Vec<&[usize]> = transpose.as_slice().chunks(2).collect();
    (0..pairs.len())
        .permutations(pairs.len())
        .map(|order| {
            let key: Vec<usize> = order.iter().flat_map(|&i| pairs[i]).copied().collect();
            Permutation::new(key)
        })
        .filter_map(Result::ok)
        .collect()
}

/// Full-length key hypotheses from the retained candidates, best IC first,
/// deduplicated in first-seen order.
pub fn generate_hypotheses(top: &TopKSet<Candidate>) -> Vec<Permutation> {
    hypotheses_from(top.sorted_desc().into_iter().map(|(_, c)| &c.transpose))
}

pub fn hypotheses_from<'a, I>(transposes: I) -> Vec<Permutation>
where
    I: IntoIterator<Item = &'a Permutation>,
{
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for transpose in transposes {
        for hypothesis in pair_orderings(transpose) {
            if seen.insert(hypothesis.clone()) {
                out.push(hypothesis);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn perm(v: &[usize]) -> Permutation {
        Permutation::new(v.to_vec()).unwrap()
    }

    #[test]
    fn even_key_swaps_pairs_only() {
        let out = pair_orderings(&perm(&[0, 1, 2, 3]));
        assert_eq!(out, vec![perm(&[0, 1, 2, 3]), perm(&[2, 3, 0, 1])]);
        assert!(!out.contains(&perm(&[0, 2, 1, 3])));
        assert!(!out.contains(&perm(&[1, 0, 2, 3])));
    }

    #[test]
    fn odd_key_moves_the_singleton_too() {
        let out = pair_orderings(&perm(&[3, 1, 4, 0, 2]));
        assert_eq!(out.len(), 6);
        assert!(out.contains(&perm(&[2, 3, 1, 4, 0])));
        assert!(out.contains(&perm(&[4, 0, 2, 3, 1])));
    }

    #[test]
    fn duplicates_across_candidates_collapse() {
        let a = perm(&[0, 1, 2, 3]);
        let b = perm(&[2, 3, 0, 1]);
        let out = hypotheses_from([&a, &b]);
        assert_eq!(out, vec![a, b]);
    }
}

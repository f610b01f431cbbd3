use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashSet};

/// Canonical dedup key: the score rounded to six decimal places, held as an
/// integer so equal renderings compare equal without string formatting.
pub fn canonical_key(score: f64) -> i64 {
    (score * 1_000_000.0).round() as i64
}

struct Slot<T> {
    score: f64,
    key: i64,
    item: T,
}

impl<T> PartialEq for Slot<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for Slot<T> {}

impl<T> PartialOrd for Slot<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Slot<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score
            .total_cmp(&other.score)
            .then_with(|| self.key.cmp(&other.key))
    }
}

#[derive(Debug, PartialEq)]
pub enum Admission<T> {
    Inserted,
    Replaced { evicted_score: f64, evicted: T },
    Duplicate,
    Rejected,
}

/// Bounded set of the highest-scoring items with distinct canonical keys.
///
/// At capacity a newcomer must beat the current minimum strictly; equal
/// scores keep whichever arrived first.
pub struct TopKSet<T> {
    capacity: usize,
    heap: BinaryHeap<Reverse<Slot<T>>>,
    keys: HashSet<i64>,
}

impl<T> TopKSet<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            heap: BinaryHeap::with_capacity(capacity + 1),
            keys: HashSet::with_capacity(capacity + 1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn min_score(&self) -> Option<f64> {
        self.heap.peek().map(|Reverse(s)| s.score)
    }

    pub fn contains_key(&self, key: i64) -> bool {
        self.keys.contains(&key)
    }

    pub fn would_admit(&self, score: f64) -> bool {
        if self.capacity == 0 || self.keys.contains(&canonical_key(score)) {
            return false;
        }
        match self.min_score() {
            Some(min) if self.heap.len() >= self.capacity => score > min,
            _ => true,
        }
    }

    pub fn offer(&mut self, score: f64, item: T) -> Admission<T> {
        let key = canonical_key(score);
        if self.keys.contains(&key) {
            return Admission::Duplicate;
        }
        if self.capacity == 0 {
            return Admission::Rejected;
        }

        if self.heap.len() < self.capacity {
            self.keys.insert(key);
            self.heap.push(Reverse(Slot { score, key, item }));
            return Admission::Inserted;
        }

        match self.heap.peek() {
            Some(Reverse(min)) if score > min.score => {}
            _ => return Admission::Rejected,
        }

        let evicted = self.heap.pop().map(|Reverse(s)| s);
        self.keys.insert(key);
        self.heap.push(Reverse(Slot { score, key, item }));
        match evicted {
            Some(slot) => {
                self.keys.remove(&slot.key);
                Admission::Replaced {
                    evicted_score: slot.score,
                    evicted: slot.item,
                }
            }
            None => Admission::Inserted,
        }
    }

    /// Items with their scores, best first.
    pub fn sorted_desc(&self) -> Vec<(f64, &T)> {
        let mut out: Vec<(f64, i64, &T)> = self
            .heap
            .iter()
            .map(|Reverse(s)| (s.score, s.key, &s.item))
            .collect();
        out.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| b.0.total_cmp(&a.0)));
        out.into_iter().map(|(s, _, t)| (s, t)).collect()
    }

    pub fn into_sorted_desc(self) -> Vec<(f64, T)> {
        // BinaryHeap::into_sorted_vec is ascending over Reverse, i.e. best first
        self.heap
            .into_sorted_vec()
            .into_iter()
            .map(|Reverse(s)| (s.score, s.item))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_best_and_evicts_minimum() {
        let mut set = TopKSet::new(2);
        assert_eq!(set.offer(1.0, "a"), Admission::Inserted);
        assert_eq!(set.offer(2.0, "b"), Admission::Inserted);
        assert_eq!(set.offer(0.5, "c"), Admission::Rejected);
        assert_eq!(
            set.offer(3.0, "d"),
            Admission::Replaced {
                evicted_score: 1.0,
                evicted: "a"
            }
        );
        let items: Vec<&str> = set.sorted_desc().into_iter().map(|(_, t)| *t).collect();
        assert_eq!(items, vec!["d", "b"]);
    }

    #[test]
    fn rejects_duplicate_keys() {
        let mut set = TopKSet::new(4);
        set.offer(1.2345671, 1);
        assert_eq!(set.offer(1.2345672, 2), Admission::Duplicate);
        assert_eq!(set.offer(1.234568, 3), Admission::Inserted);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn ties_at_the_boundary_keep_first_arrival() {
        let mut set = TopKSet::new(1);
        set.offer(1.0, "first");
        assert!(!set.would_admit(1.0));
        assert_eq!(set.offer(1.0000004, "second"), Admission::Duplicate);
        assert_eq!(set.into_sorted_desc()[0].1, "first");
    }

    #[test]
    fn zero_capacity_holds_nothing() {
        let mut set = TopKSet::new(0);
        assert!(!set.would_admit(5.0));
        assert_eq!(set.offer(5.0, ()), Admission::Rejected);
        assert!(set.is_empty());
    }

    #[test]
    fn sorted_views_agree() {
        let mut set = TopKSet::new(3);
        for (s, t) in [(0.3, 'x'), (0.9, 'y'), (0.1, 'z'), (0.5, 'w')] {
            set.offer(s, t);
        }
        let borrowed: Vec<char> = set.sorted_desc().into_iter().map(|(_, t)| *t).collect();
        let owned: Vec<char> = set.into_sorted_desc().into_iter().map(|(_, t)| t).collect();
        assert_eq!(borrowed, vec!['y', 'w', 'x']);
        assert_eq!(owned, borrowed);
    }
}

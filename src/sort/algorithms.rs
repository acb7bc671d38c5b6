//! Hand-written comparison sorts.
//!
//! | Algorithm | Comparisons             | Stable |
//! |-----------|-------------------------|--------|
//! | selection | O(n²) always            | no     |
//! | insertion | O(n²), O(n) when sorted | yes    |
//! | quick     | O(n log n) avg, O(n²)   | see below |
//!
//! `quick_sort` partitions into less / equal / greater groups with a single
//! linear pass each, so tied elements keep their input order. That follows
//! from the partitioning order used here, not from quicksort in general.

use std::cmp::Ordering;

/// Repeatedly select the minimum of the unsorted tail and swap it into place
pub fn selection_sort<T, F>(items: &mut [T], cmp: F)
where
    F: Fn(&T, &T) -> Ordering,
{
    let n = items.len();
    for i in 0..n {
        let mut min = i;
        for j in (i + 1)..n {
            if cmp(&items[j], &items[min]) == Ordering::Less {
                min = j;
            }
        }
        items.swap(i, min);
    }
}

/// Shift each element left past every predecessor that is strictly greater
pub fn insertion_sort<T, F>(items: &mut [T], cmp: F)
where
    F: Fn(&T, &T) -> Ordering,
{
    for i in 1..items.len() {
        let mut j = i;
        while j > 0 && cmp(&items[j - 1], &items[j]) == Ordering::Greater {
            items.swap(j - 1, j);
            j -= 1;
        }
    }
}

/// Pending work for [`quick_sort`]
enum Group<T> {
    Unsorted(Vec<T>),
    Sorted(Vec<T>),
}

/// Three-way partition around the middle element
///
/// Groups wait on a heap-allocated work stack instead of the call stack, so
/// the O(n) worst-case depth cannot overflow. The less group is popped first
/// and fully emitted before the equal and greater groups.
pub fn quick_sort<T, F>(items: Vec<T>, cmp: &F) -> Vec<T>
where
    F: Fn(&T, &T) -> Ordering,
{
    let mut sorted = Vec::with_capacity(items.len());
    let mut pending = vec![Group::Unsorted(items)];

    while let Some(group) = pending.pop() {
        match group {
            Group::Sorted(mut items) => sorted.append(&mut items),
            Group::Unsorted(items) if items.len() <= 1 => sorted.extend(items),
            Group::Unsorted(items) => {
                let (less, equal, greater) = partition(items, cmp);
                pending.push(Group::Unsorted(greater));
                pending.push(Group::Sorted(equal));
                pending.push(Group::Unsorted(less));
            }
        }
    }

    sorted
}

/// Split around the middle element, keeping input order within each group
fn partition<T, F>(items: Vec<T>, cmp: &F) -> (Vec<T>, Vec<T>, Vec<T>)
where
    F: Fn(&T, &T) -> Ordering,
{
    let pivot = items.len() / 2;
    let placement: Vec<Ordering> = items.iter().map(|item| cmp(item, &items[pivot])).collect();

    let mut less = Vec::new();
    let mut equal = Vec::new();
    let mut greater = Vec::new();

    for (item, ord) in items.into_iter().zip(placement) {
        match ord {
            Ordering::Less => less.push(item),
            Ordering::Equal => equal.push(item),
            Ordering::Greater => greater.push(item),
        }
    }

    (less, equal, greater)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn by_key(a: &(u32, char), b: &(u32, char)) -> Ordering {
        a.0.cmp(&b.0)
    }

    fn keys(items: &[(u32, char)]) -> Vec<u32> {
        items.iter().map(|(k, _)| *k).collect()
    }

    fn sample() -> Vec<(u32, char)> {
        vec![(5, 'a'), (3, 'b'), (9, 'c'), (3, 'd'), (1, 'e'), (5, 'f'), (0, 'g')]
    }

    #[test]
    fn test_selection_sort_orders_keys() {
        let mut items = sample();
        selection_sort(&mut items, by_key);
        assert_eq!(keys(&items), vec![0, 1, 3, 3, 5, 5, 9]);
    }

    #[test]
    fn test_selection_sort_is_not_stable() {
        let mut items = vec![(2, 'a'), (2, 'b'), (1, 'c')];
        selection_sort(&mut items, by_key);
        assert_eq!(items, vec![(1, 'c'), (2, 'b'), (2, 'a')]);
    }

    #[test]
    fn test_insertion_sort_is_stable() {
        let mut items = sample();
        insertion_sort(&mut items, by_key);
        assert_eq!(
            items,
            vec![(0, 'g'), (1, 'e'), (3, 'b'), (3, 'd'), (5, 'a'), (5, 'f'), (9, 'c')]
        );
    }

    #[test]
    fn test_insertion_sort_on_sorted_input() {
        let mut items: Vec<(u32, char)> = (0..10).map(|i| (i, 'x')).collect();
        insertion_sort(&mut items, by_key);
        assert_eq!(keys(&items), (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_quick_sort_orders_keys() {
        let sorted = quick_sort(sample(), &by_key);
        assert_eq!(keys(&sorted), vec![0, 1, 3, 3, 5, 5, 9]);
    }

    #[test]
    fn test_quick_sort_keeps_equal_keys_in_input_order() {
        let items = vec![
            (2, 'a'),
            (1, 'b'),
            (2, 'c'),
            (3, 'd'),
            (1, 'e'),
            (2, 'f'),
            (3, 'g'),
            (1, 'h'),
        ];
        let sorted = quick_sort(items, &by_key);
        assert_eq!(
            sorted,
            vec![
                (1, 'b'),
                (1, 'e'),
                (1, 'h'),
                (2, 'a'),
                (2, 'c'),
                (2, 'f'),
                (3, 'd'),
                (3, 'g'),
            ]
        );
    }

    #[test]
    fn test_empty_and_single() {
        let mut empty: Vec<(u32, char)> = Vec::new();
        selection_sort(&mut empty, by_key);
        insertion_sort(&mut empty, by_key);
        assert!(quick_sort(empty, &by_key).is_empty());

        let single = quick_sort(vec![(4, 'z')], &by_key);
        assert_eq!(single, vec![(4, 'z')]);
    }

    #[test]
    fn test_quick_sort_survives_worst_case_pivots() {
        // Every middle pivot is the largest remaining key, so each pass
        // peels off a single element
        let n = 20_000;
        let mut items: Vec<(u32, char)> = Vec::with_capacity(n as usize);
        for k in 1..=n {
            items.insert((k / 2) as usize, (k, 'x'));
        }

        let sorted = quick_sort(items, &by_key);
        assert_eq!(keys(&sorted), (1..=n).collect::<Vec<_>>());
    }
}

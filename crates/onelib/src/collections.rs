//! Sequence and record helpers. None of them mutate their input.

use std::hash::Hash;

use ahash::AHashSet;
use rand::Rng;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Drop repeated values, keeping each first occurrence in order
pub fn unique<T>(items: &[T]) -> Vec<T>
where
    T: Eq + Hash + Clone,
{
    let mut seen = AHashSet::with_capacity(items.len());
    items
        .iter()
        .filter(|item| seen.insert(*item))
        .cloned()
        .collect()
}

/// Split into consecutive groups of `size`; the last group may be shorter
pub fn chunk<T: Clone>(items: &[T], size: usize) -> Result<Vec<Vec<T>>> {
    if size == 0 {
        return Err(Error::InvalidChunkSize(size));
    }
    Ok(items.chunks(size).map(<[T]>::to_vec).collect())
}

/// A uniformly random permutation of a copy of `items` (Fisher-Yates)
pub fn shuffle<T: Clone>(items: &[T]) -> Vec<T> {
    let mut shuffled = items.to_vec();
    let mut rng = rand::thread_rng();
    for i in (1..shuffled.len()).rev() {
        let j = rng.gen_range(0..=i);
        shuffled.swap(i, j);
    }
    shuffled
}

/// Shallow union of two records; `b` wins on key collisions
pub fn merge(a: &Map<String, Value>, b: &Map<String, Value>) -> Map<String, Value> {
    let mut merged = a.clone();
    for (key, value) in b {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

/// Deep copy through JSON.
///
/// Only what JSON can represent survives: non-finite floats become `null`,
/// and types with custom `Serialize` impls come back in their serialized form.
pub fn clone<T>(value: &T) -> Result<Value>
where
    T: Serialize + ?Sized,
{
    let text = serde_json::to_string(value)?;
    Ok(serde_json::from_str(&text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unique_keeps_first_occurrence() {
        assert_eq!(unique(&[3, 1, 3, 2, 1, 4]), vec![3, 1, 2, 4]);
        assert_eq!(unique(&["b", "a", "b"]), vec!["b", "a"]);
        assert!(unique::<i32>(&[]).is_empty());
    }

    #[test]
    fn test_chunk() {
        let items: Vec<i32> = (1..=7).collect();
        let chunks = chunk(&items, 3).unwrap();

        assert_eq!(chunks, vec![vec![1, 2, 3], vec![4, 5, 6], vec![7]]);
        assert_eq!(chunks.concat(), items);
        assert!(chunk::<i32>(&[], 2).unwrap().is_empty());
        assert!(matches!(chunk(&items, 0), Err(Error::InvalidChunkSize(0))));
    }

    #[test]
    fn test_shuffle_is_a_permutation() {
        let items: Vec<i32> = (0..50).collect();
        let mut shuffled = shuffle(&items);

        assert_eq!(items, (0..50).collect::<Vec<_>>());
        shuffled.sort();
        assert_eq!(shuffled, items);
        assert!(shuffle::<i32>(&[]).is_empty());
    }

    #[test]
    fn test_merge_second_wins() {
        let a = json!({ "x": 1, "y": { "deep": true } });
        let b = json!({ "y": 2, "z": 3 });

        let merged = merge(a.as_object().unwrap(), b.as_object().unwrap());

        assert_eq!(Value::Object(merged), json!({ "x": 1, "y": 2, "z": 3 }));
        assert_eq!(a["y"], json!({ "deep": true }));
    }

    #[test]
    fn test_clone_is_independent() {
        let original = json!({ "list": [1, 2, { "k": "v" }], "n": null });
        let mut copy = clone(&original).unwrap();

        assert_eq!(copy, original);
        copy["list"][2]["k"] = json!("changed");
        assert_eq!(original["list"][2]["k"], "v");
    }

    #[test]
    fn test_clone_drops_non_json_values() {
        let copy = clone(&vec![1.5, f64::NAN, f64::INFINITY]).unwrap();
        assert_eq!(copy, json!([1.5, null, null]));
    }
}

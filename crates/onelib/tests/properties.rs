//! End-to-end checks through the crate-root namespace

use std::sync::{Arc, Mutex};
use std::time::Duration;

use onelib::*;
use serde_json::json;
use tokio::time::Instant;

#[test]
fn sum_and_avg_agree() {
    let sequences: [&[f64]; 4] = [&[1.0], &[2.0, 4.0], &[-1.5, 3.25, 8.0, 0.0], &[1e6, 1e-6]];
    for s in sequences {
        let expected = avg(s) * s.len() as f64;
        assert!((sum(s) - expected).abs() <= 1e-9 * expected.abs().max(1.0));
    }
    assert_eq!(sum(&[]), 0.0);
    assert_eq!(avg(&[]), 0.0);
}

#[test]
fn text_examples() {
    assert_eq!(capitalize("hELLO"), "Hello");
    assert_eq!(slug("Hello, World!"), "hello-world");
    for s in ["", "racecar", "mixed Ünicode ✓"] {
        assert_eq!(reverse(&reverse(s)), s);
    }
}

#[test]
fn unique_and_chunk() {
    let items = vec![5, 3, 5, 1, 3, 9, 1];
    let deduped = unique(&items);
    assert_eq!(deduped, vec![5, 3, 1, 9]);

    for n in 1..=8 {
        let chunks = chunk(&items, n).unwrap();
        assert_eq!(chunks.concat(), items);
        let (last, rest) = chunks.split_last().unwrap();
        assert!(rest.iter().all(|c| c.len() == n));
        assert!(!last.is_empty() && last.len() <= n);
    }
}

#[test]
fn clone_is_deep() {
    let original = json!({ "a": { "b": [1, { "c": true }] } });
    let mut copy = clone(&original).unwrap();
    assert_eq!(copy, original);

    copy["a"]["b"][1]["c"] = json!(false);
    assert_eq!(original["a"]["b"][1]["c"], json!(true));
}

#[test]
fn save_load_round_trip() {
    let store = MemoryStore::new();
    for (key, value) in [
        ("n", json!(42)),
        ("s", json!("text")),
        ("a", json!([1, "two", null])),
        ("o", json!({ "nested": { "x": 1.5 } })),
    ] {
        save(&store, key, &value).unwrap();
        assert_eq!(load(&store, key), Some(value));
    }
    assert_eq!(load(&store, "never"), None);
}

#[test]
fn is_empty_examples() {
    assert!(is_empty(&serde_json::Value::Null));
    assert!(is_empty(&json!("")));
    assert!(is_empty(&json!([])));
    assert!(is_empty(&json!({})));
    assert!(!is_empty(&json!(0)));
}

#[tokio::test(start_paused = true)]
async fn debounce_timeline() {
    let start = Instant::now();
    let fired = Arc::new(Mutex::new(Vec::new()));
    let sink = fired.clone();
    let debounced = debounce(
        move |n: u32| sink.lock().unwrap().push((n, start.elapsed())),
        50,
    );

    for (at, n) in [(0, 1), (10, 2), (20, 3)] {
        tokio::time::sleep_until(start + Duration::from_millis(at)).await;
        debounced.call(n).await;
    }
    wait(200).await;

    let fired = fired.lock().unwrap();
    assert_eq!(fired.len(), 1);
    assert_eq!(fired[0].0, 3);
    assert!(fired[0].1 >= Duration::from_millis(70) && fired[0].1 < Duration::from_millis(71));
}

#[tokio::test(start_paused = true)]
async fn throttle_timeline() {
    let start = Instant::now();
    let fired = Arc::new(Mutex::new(Vec::new()));
    let sink = fired.clone();
    let throttled = throttle(
        move |n: u32| sink.lock().unwrap().push((n, start.elapsed())),
        50,
    );

    for (at, n) in [(0, 1), (10, 2), (20, 3)] {
        tokio::time::sleep_until(start + Duration::from_millis(at)).await;
        throttled.call(n).await;
    }
    wait(200).await;

    assert_eq!(*fired.lock().unwrap(), vec![(1, Duration::ZERO)]);
}

#[tokio::test]
async fn facade_with_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let config = OneLibConfig {
        storage: StorageConfig::File {
            path: dir.path().join("store.json"),
        },
        ..Default::default()
    };

    {
        let lib = OneLib::builder()
            .config(config.clone())
            .clipboard(Arc::new(MemoryClipboard::new()))
            .build()
            .unwrap();
        lib.save("visits", &3).unwrap();
        assert!(lib.copy("ok").await);
    }

    let lib = OneLib::builder()
        .config(config)
        .clipboard(Arc::new(MemoryClipboard::new()))
        .build()
        .unwrap();
    assert_eq!(lib.load_as::<u32>("visits"), Some(3));
}

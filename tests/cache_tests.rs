mod common;

use common::{write_fixture, SAMPLE_CSV};
use datesheet::excel::cache::{get_schedule_cached, is_cached};
use datesheet::excel::LoadOptions;
use std::path::Path;
use std::sync::Arc;

#[test]
fn table_is_built_once_and_shared() {
    let path = write_fixture("cache-sample.csv", SAMPLE_CSV);
    let first = get_schedule_cached(&path, &LoadOptions::default()).unwrap();
    assert!(is_cached(&path));

    // aunque el archivo desaparezca, la tabla ya construida se reutiliza
    std::fs::remove_file(&path).unwrap();
    let second = get_schedule_cached(&path, &LoadOptions::default()).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(second.len(), 7);
}

#[test]
fn failed_load_is_not_cached() {
    let path = Path::new("/definitely/not/here/cached.csv");
    assert!(get_schedule_cached(path, &LoadOptions::default()).is_err());
    assert!(!is_cached(path));
}

#[test]
fn concurrent_first_requests_share_one_table() {
    let path = write_fixture("cache-threads.csv", SAMPLE_CSV);
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let p = path.clone();
            std::thread::spawn(move || get_schedule_cached(&p, &LoadOptions::default()).unwrap())
        })
        .collect();
    let tables: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for t in tables.iter().skip(1) {
        assert!(Arc::ptr_eq(&tables[0], t));
    }
    let _ = std::fs::remove_file(path);
}

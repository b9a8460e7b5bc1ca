use std::collections::HashSet;
use std::fs;
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::{Duration, SystemTime};

use quiz_core::model::QuestionId;
use services::{DispenseError, QuizServices};
use storage::StoreError;
use tempfile::TempDir;

fn write_questions(path: &std::path::Path, contents: &str, mtime_secs: u64) {
    fs::write(path, contents).unwrap();
    let file = fs::File::options().write(true).open(path).unwrap();
    file.set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(mtime_secs))
        .unwrap();
}

const QUESTIONS: &str = "\
Capital of France? | Paris
Largest planet? | Jupiter
How many continents are there? | seven
Author of Hamlet? | William Shakespeare

this line is ignored
";

#[test]
fn full_round_over_a_file_store() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("questions.txt");
    write_questions(&path, QUESTIONS, 1_000);

    let services = QuizServices::from_file(&path).unwrap();
    let dispenser = services.dispenser();
    assert_eq!(services.questions().all_questions().unwrap().len(), 4);

    let mut ids = HashSet::new();
    for _ in 0..4 {
        let q = dispenser.next_question().unwrap();
        assert!(!q.words.is_empty());
        ids.insert(q.id);
    }
    assert_eq!(ids.len(), 4);
    assert!(matches!(
        dispenser.next_question(),
        Err(DispenseError::Exhausted)
    ));

    let continents = QuestionId::for_question("How many continents are there?");
    assert!(dispenser.validate(&continents, Some("7")).unwrap());
    let hamlet = QuestionId::for_question("Author of Hamlet?");
    assert!(dispenser.validate(&hamlet, Some("william   shakespeare.")).unwrap());
    assert!(!dispenser.validate(&hamlet, Some("Marlowe")).unwrap());

    dispenser.clear();
    assert_eq!(dispenser.used_count(), 0);
    assert_eq!(dispenser.remaining().unwrap(), 4);
}

#[test]
fn missing_file_at_startup_is_store_error() {
    let dir = TempDir::new().unwrap();
    let err = QuizServices::from_file(dir.path().join("nope.txt")).err().unwrap();
    assert!(matches!(
        err,
        DispenseError::Store(StoreError::ResourceNotFound { .. })
    ));
}

#[test]
fn file_reload_between_dispense_and_validate() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("questions.txt");
    write_questions(&path, "Old question? | old\n", 1_000);
    let services = QuizServices::from_file(&path).unwrap();
    let dispenser = services.dispenser();

    let q = dispenser.next_question().unwrap();
    write_questions(&path, "New question? | new\n", 2_000);

    let err = dispenser.validate(&q.id, Some("old")).unwrap_err();
    assert!(matches!(err, DispenseError::UnknownQuestion { .. }));

    let next = dispenser.next_question().unwrap();
    assert_eq!(next.question, "New question?");
}

#[test]
fn file_removed_after_startup_fails_every_operation() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("questions.txt");
    write_questions(&path, QUESTIONS, 1_000);
    let dispenser = QuizServices::from_file(&path).unwrap().dispenser();

    fs::remove_file(&path).unwrap();

    assert!(matches!(
        dispenser.next_question(),
        Err(DispenseError::Store(StoreError::ResourceNotFound { .. }))
    ));
    let id = QuestionId::for_question("Capital of France?");
    assert!(matches!(
        dispenser.validate(&id, Some("Paris")),
        Err(DispenseError::Store(StoreError::ResourceNotFound { .. }))
    ));
}

#[test]
fn concurrent_callers_never_share_the_last_question() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("questions.txt");
    write_questions(&path, "Only question? | yes\n", 1_000);
    let dispenser = QuizServices::from_file(&path).unwrap().dispenser();

    for _ in 0..20 {
        dispenser.clear();
        let callers = 8;
        let barrier = Arc::new(Barrier::new(callers));
        let handles: Vec<_> = (0..callers)
            .map(|_| {
                let dispenser = Arc::clone(&dispenser);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    dispenser.next_question().is_ok()
                })
            })
            .collect();

        let winners = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();
        assert_eq!(winners, 1);
        assert_eq!(dispenser.used_count(), 1);
    }
}

#[test]
fn concurrent_callers_split_the_pool_without_repeats() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("questions.txt");
    let contents: String = (0..50).map(|i| format!("Question {i}? | {i}\n")).collect();
    write_questions(&path, &contents, 1_000);
    let dispenser = QuizServices::from_file(&path).unwrap().dispenser();

    let handles: Vec<_> = (0..5)
        .map(|_| {
            let dispenser = Arc::clone(&dispenser);
            thread::spawn(move || {
                let mut mine = Vec::new();
                while let Ok(q) = dispenser.next_question() {
                    mine.push(q.id);
                }
                mine
            })
        })
        .collect();

    let mut all = Vec::new();
    for h in handles {
        all.extend(h.join().unwrap());
    }
    let distinct: HashSet<_> = all.iter().cloned().collect();
    assert_eq!(all.len(), 50);
    assert_eq!(distinct.len(), 50);
}

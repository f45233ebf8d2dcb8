use std::io::Write;

use storage::repository::{QuestionRepository, Storage, StorageError};
use storage::JsonQuestionRepository;
use tutor_core::model::QuestionId;

const TWO_QUESTIONS: &str = r#"[
  {
    "id": 10,
    "domain": "Dermatology",
    "question": "Most likely diagnosis?",
    "options": [
      { "key": "A", "value": "Tinea corporis" },
      { "key": "B", "value": "Psoriasis" }
    ],
    "correctAnswer": { "key": "A", "value": "Tinea corporis" }
  },
  {
    "id": 11,
    "domain": "Neurology",
    "question": "Next step?",
    "options": [
      { "key": "A", "value": "CT head" },
      { "key": "B", "value": "Reassure" }
    ],
    "correctAnswer": { "key": "A", "value": "CT head" }
  }
]"#;

#[tokio::test]
async fn loads_questions_from_file_in_order() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(TWO_QUESTIONS.as_bytes()).expect("write");

    let storage = Storage::json_file(file.path());
    let set = storage.questions.load_questions().await.expect("load");

    assert_eq!(set.len(), 2);
    assert_eq!(set[0].id(), QuestionId::new(10));
    assert_eq!(set[1].domain(), "Neurology");
    assert_eq!(set[1].correct_answer().value, "CT head");
}

#[tokio::test]
async fn missing_file_is_not_found() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("nope.json");

    let err = JsonQuestionRepository::from_path(&path)
        .load_questions()
        .await
        .unwrap_err();

    match err {
        StorageError::NotFound(shown) => assert!(shown.ends_with("nope.json")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn malformed_file_is_a_serialization_error() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(br#"{"not": "an array"}"#).expect("write");

    let err = Storage::json_file(file.path())
        .questions
        .load_questions()
        .await
        .unwrap_err();

    assert!(matches!(err, StorageError::Serialization(_)));
}

#[tokio::test]
async fn bundled_dataset_is_available() {
    let set = Storage::bundled().questions.load_questions().await.expect("load");
    assert!(set.len() >= 4);
    assert_eq!(set[0].options().len(), 4);
}

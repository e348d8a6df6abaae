//! Integration tests for CourseBuddy
//!
//! Exercises the full flow from a snapshot file on disk to a composed answer.

use std::sync::Arc;

use coursebuddy::{
    knowledge::{KnowledgeSnapshot, KnowledgeStore, SnapshotDocument},
    rag::{rank, AnswerComposer, AnswerPipeline, ANSWER_HEADER, FALLBACK_ANSWER},
    Link,
};

fn snapshot_doc(title: &str, content: &str, url: &str) -> SnapshotDocument {
    SnapshotDocument {
        title: Some(title.to_string()),
        content: Some(content.to_string()),
        url: Some(url.to_string()),
        ..Default::default()
    }
}

fn write_snapshot(dir: &tempfile::TempDir, snapshot: &KnowledgeSnapshot) -> std::path::PathBuf {
    let path = dir.path().join("knowledge_base.json");
    snapshot.save(&path).unwrap();
    path
}

#[test]
fn test_python_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_snapshot(
        &dir,
        &KnowledgeSnapshot {
            course_content: vec![snapshot_doc("Intro", "Python basics", "https://x/1")],
            forum_posts: vec![snapshot_doc("Help", "need python help", "")],
            created_date: None,
        },
    );
    let store = KnowledgeStore::load(&path);

    let matches = rank("python", &store, 5);
    assert_eq!(matches.len(), 2);
    assert!(matches.iter().all(|m| m.relevance_score == 1));

    let answer = AnswerComposer::new().compose(&matches);
    assert_eq!(
        answer.answer,
        format!("{ANSWER_HEADER}\n\n• From course materials: Intro\n• From forum discussion: Help")
    );
    assert_eq!(
        answer.links,
        vec![Link {
            url: "https://x/1".to_string(),
            text: "Intro".to_string(),
        }]
    );
}

#[test]
fn test_empty_store_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(KnowledgeStore::load(&dir.path().join("missing.json")));
    let pipeline = AnswerPipeline::new(store);

    let answer = pipeline.answer_question("anything", None).unwrap();
    assert_eq!(answer.answer, FALLBACK_ANSWER);
    assert!(answer.links.is_empty());
}

#[test]
fn test_empty_question_scenario() {
    let store = Arc::new(
        KnowledgeStore::from_snapshot(KnowledgeSnapshot {
            course_content: vec![snapshot_doc("Anything", "at all", "https://x/a")],
            forum_posts: vec![],
            created_date: None,
        })
        .unwrap(),
    );
    let pipeline = AnswerPipeline::new(store);

    let answer = pipeline.answer_question("", None).unwrap();
    assert_eq!(answer.answer, FALLBACK_ANSWER);
    assert!(answer.links.is_empty());
}

#[test]
fn test_no_matching_tokens_falls_back() {
    let store = KnowledgeStore::from_snapshot(KnowledgeSnapshot {
        course_content: vec![snapshot_doc("Docker", "containers", "https://x/d")],
        forum_posts: vec![snapshot_doc("Git", "branches", "https://x/g")],
        created_date: None,
    })
    .unwrap();

    let matches = rank("kubernetes helm", &store, 5);
    assert!(matches.is_empty());
    assert_eq!(AnswerComposer::new().compose(&matches).answer, FALLBACK_ANSWER);
}

#[test]
fn test_fetcher_written_snapshot_is_answerable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("knowledge_base.json");
    std::fs::write(
        &path,
        r#"{
  "course_content": [
    {
      "url": "https://tds.s-anand.net/",
      "title": "Tools in Data Science",
      "content": "Learn to use LLMs, deploy with Vercel and scrape with Python.",
      "headings": ["Tools in Data Science", "Modules"],
      "scraped_date": "2025-02-01T09:15:42.123456"
    }
  ],
  "forum_posts": [],
  "created_date": "2025-02-01T09:15:43.654321"
}"#,
    )
    .unwrap();

    let store = Arc::new(KnowledgeStore::load(&path));
    assert!(store.summary().created_at.is_some());

    let answer = AnswerPipeline::new(store)
        .answer_question("How do I deploy on Vercel?", None)
        .unwrap();
    assert!(answer.answer.contains("• From course materials: Tools in Data Science"));
    assert_eq!(answer.links[0].url, "https://tds.s-anand.net/");
}

#[test]
fn test_untitled_forum_post_with_url() {
    let store = Arc::new(
        KnowledgeStore::from_snapshot(KnowledgeSnapshot {
            course_content: vec![],
            forum_posts: vec![SnapshotDocument {
                content: Some("GA3 deadline extended".to_string()),
                url: Some("https://discourse.example/t/123".to_string()),
                ..Default::default()
            }],
            created_date: None,
        })
        .unwrap(),
    );

    let answer = AnswerPipeline::new(store)
        .answer_question("ga3 deadline", None)
        .unwrap();
    assert!(answer.answer.ends_with("• From forum discussion: Forum Post"));
    assert_eq!(answer.links[0].text, "Forum Discussion");
}

#[test]
fn test_five_match_cap_and_three_source_cap() {
    let course: Vec<SnapshotDocument> = (0..10)
        .map(|i| snapshot_doc(&format!("Lesson {i}"), "regex", &format!("https://x/{i}")))
        .collect();
    let store = KnowledgeStore::from_snapshot(KnowledgeSnapshot {
        course_content: course,
        forum_posts: vec![],
        created_date: None,
    })
    .unwrap();

    let matches = rank("regex", &store, 5);
    assert_eq!(matches.len(), 5);

    let answer = AnswerComposer::new().compose(&matches);
    assert_eq!(answer.answer.lines().filter(|l| l.starts_with('•')).count(), 3);
    let urls: Vec<&str> = answer.links.iter().map(|l| l.url.as_str()).collect();
    assert_eq!(urls, vec!["https://x/0", "https://x/1", "https://x/2"]);
}

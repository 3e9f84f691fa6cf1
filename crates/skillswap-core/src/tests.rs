//! Service tests against in-memory (and, for the race, file-backed) stores.

use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

use skillswap_crypto::keys::generate_message_key;
use skillswap_crypto::{MessageCipher, UNAVAILABLE_PLACEHOLDER};
use skillswap_db::queries::messages as message_rows;
use skillswap_db::{Database, now_timestamp};
use skillswap_types::models::SwapStatus;

use crate::{Error, ErrorKind, MessageStore, SkillSwap};

struct Fixture {
    db: Arc<Database>,
    app: SkillSwap,
}

fn fixture() -> Fixture {
    let db = Arc::new(Database::open_in_memory().expect("in-memory store"));
    let cipher = MessageCipher::new(&generate_message_key());
    let app = SkillSwap::new(db.clone(), cipher);
    Fixture { db, app }
}

fn user(db: &Database, name: &str) -> i64 {
    db.create_user(name, None).unwrap()
}

fn scalar(db: &Database, sql: &str) -> i64 {
    db.with_conn(|conn| {
        conn.query_row(sql, [], |r| r.get(0))
            .map_err(skillswap_db::Error::from)
    })
    .unwrap()
}

fn stored_content(db: &Database, message_id: i64) -> String {
    db.with_conn(|conn| {
        conn.query_row(
            "SELECT content FROM messages WHERE id = ?1",
            [message_id],
            |r| r.get(0),
        )
        .map_err(skillswap_db::Error::from)
    })
    .unwrap()
}

fn unread_for(app: &SkillSwap, user_id: i64, conversation_id: i64) -> u32 {
    app.summaries
        .list_for_user(user_id)
        .unwrap()
        .into_iter()
        .find(|s| s.conversation_id == conversation_id)
        .expect("conversation in inbox")
        .unread_count
}

// -- Conversations --

#[test]
fn resolve_is_symmetric() {
    let f = fixture();
    let (a, b) = (user(&f.db, "Alice"), user(&f.db, "Bob"));

    let ab = f.app.conversations.resolve_or_create(a, b).unwrap();
    let ba = f.app.conversations.resolve_or_create(b, a).unwrap();
    assert_eq!(ab, ba);
    assert_eq!(scalar(&f.db, "SELECT COUNT(*) FROM conversations"), 1);
}

#[test]
fn distinct_pairs_get_distinct_conversations() {
    let f = fixture();
    let (a, b, c) = (user(&f.db, "A"), user(&f.db, "B"), user(&f.db, "C"));

    let ab = f.app.conversations.resolve_or_create(a, b).unwrap();
    let ac = f.app.conversations.resolve_or_create(a, c).unwrap();
    assert_ne!(ab, ac);
}

#[test]
fn self_conversation_is_rejected() {
    let f = fixture();
    let a = user(&f.db, "Alice");

    let err = f.app.conversations.resolve_or_create(a, a).unwrap_err();
    assert!(matches!(err, Error::InvalidParticipants));
    assert_eq!(scalar(&f.db, "SELECT COUNT(*) FROM conversations"), 0);
}

#[test]
fn unknown_user_is_not_found() {
    let f = fixture();
    let a = user(&f.db, "Alice");

    let err = f.app.conversations.resolve_or_create(a, a + 42).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn resolve_bumps_updated_at() {
    let f = fixture();
    let (a, b) = (user(&f.db, "Alice"), user(&f.db, "Bob"));

    let id = f.app.conversations.resolve_or_create(a, b).unwrap();
    let before = f.app.conversations.get(id, a).unwrap().updated_at;
    thread::sleep(Duration::from_millis(2));
    f.app.conversations.resolve_or_create(b, a).unwrap();
    let after = f.app.conversations.get(id, a).unwrap().updated_at;
    assert!(after > before);
}

#[test]
fn conversation_is_hidden_from_outsiders() {
    let f = fixture();
    let (a, b, eve) = (user(&f.db, "Alice"), user(&f.db, "Bob"), user(&f.db, "Eve"));

    let id = f.app.conversations.resolve_or_create(a, b).unwrap();
    let conversation = f.app.conversations.get(id, b).unwrap();
    assert!(conversation.has_participant(a));
    assert_eq!(conversation.other_participant(b), a);
    assert!(matches!(f.app.conversations.get(id, eve), Err(Error::NotFound(_))));
}

#[test]
fn concurrent_first_sends_create_one_conversation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("race.db");
    let key = generate_message_key();

    let setup = Database::open(&path).unwrap();
    let pairs: Vec<(i64, i64)> = (0..8)
        .map(|i| {
            (
                setup.create_user(&format!("left {}", i), None).unwrap(),
                setup.create_user(&format!("right {}", i), None).unwrap(),
            )
        })
        .collect();

    for &(a, b) in &pairs {
        let barrier = Arc::new(Barrier::new(2));
        let handles: Vec<_> = [(a, b), (b, a)]
            .into_iter()
            .map(|(from, to)| {
                // Separate handles: separate SQLite connections racing on the file.
                let db = Arc::new(Database::open(&path).unwrap());
                let store = MessageStore::new(db, MessageCipher::new(&key));
                let barrier = barrier.clone();
                thread::spawn(move || {
                    barrier.wait();
                    store.send(from, to, "first!").unwrap().conversation_id
                })
            })
            .collect();

        let ids: Vec<i64> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(ids[0], ids[1], "both senders must land in the same conversation");
    }

    assert_eq!(
        scalar(&setup, "SELECT COUNT(*) FROM conversations"),
        pairs.len() as i64
    );
    assert_eq!(
        scalar(&setup, "SELECT COUNT(*) FROM messages"),
        2 * pairs.len() as i64
    );
}

// -- Messages --

#[test]
fn send_returns_plaintext_and_stores_ciphertext() {
    let f = fixture();
    let (a, b) = (user(&f.db, "Alice"), user(&f.db, "Bob"));

    let sent = f.app.messages.send(a, b, "Can you teach me guitar?").unwrap();
    assert_eq!(sent.content, "Can you teach me guitar?");
    assert!(sent.is_me);
    assert!(!sent.is_read);
    assert!(!sent.degraded);

    let stored = stored_content(&f.db, sent.id);
    assert!(skillswap_crypto::is_encrypted(&stored));
    assert!(!stored.contains("guitar"));
}

#[test]
fn empty_message_is_rejected() {
    let f = fixture();
    let (a, b) = (user(&f.db, "Alice"), user(&f.db, "Bob"));

    let err = f.app.messages.send(a, b, "   ").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert_eq!(scalar(&f.db, "SELECT COUNT(*) FROM conversations"), 0);
}

#[test]
fn append_requires_participant() {
    let f = fixture();
    let (a, b, eve) = (user(&f.db, "Alice"), user(&f.db, "Bob"), user(&f.db, "Eve"));
    let id = f.app.conversations.resolve_or_create(a, b).unwrap();

    let err = f.app.messages.append(id, eve, "let me in").unwrap_err();
    assert!(matches!(err, Error::Unauthorized(u) if u == eve));
    assert_eq!(scalar(&f.db, "SELECT COUNT(*) FROM messages"), 0);

    let missing = f.app.messages.append(id + 1, a, "hello?").unwrap_err();
    assert_eq!(missing.kind(), ErrorKind::NotFound);

    let ok = f.app.messages.append(id, b, "hi Alice").unwrap();
    assert_eq!(ok.conversation_id, id);
    assert_eq!(ok.content, "hi Alice");
}

#[test]
fn listing_orders_history_and_marks_it_read() {
    let f = fixture();
    let (a, b) = (user(&f.db, "Alice"), user(&f.db, "Bob"));

    let texts = ["one", "two", "three", "four", "five"];
    let mut conversation_id = 0;
    for text in texts {
        conversation_id = f.app.messages.send(a, b, text).unwrap().conversation_id;
    }
    f.app.messages.send(b, a, "reply from Bob").unwrap();

    assert_eq!(unread_for(&f.app, b, conversation_id), 5);
    assert_eq!(unread_for(&f.app, a, conversation_id), 1);

    let listed = f.app.messages.list(conversation_id, b).unwrap();
    let contents: Vec<&str> = listed.iter().map(|m| m.content.as_str()).collect();
    assert_eq!(contents, ["one", "two", "three", "four", "five", "reply from Bob"]);
    assert!(listed[..5].iter().all(|m| !m.is_me && m.is_read));
    assert!(listed[5].is_me);
    assert!(listed.windows(2).all(|w| (w[0].created_at, w[0].id) < (w[1].created_at, w[1].id)));

    // Bob's read does not touch Alice's unread count.
    assert_eq!(unread_for(&f.app, b, conversation_id), 0);
    assert_eq!(unread_for(&f.app, a, conversation_id), 1);
}

#[test]
fn listing_is_not_found_for_outsiders() {
    let f = fixture();
    let (a, b, eve) = (user(&f.db, "Alice"), user(&f.db, "Bob"), user(&f.db, "Eve"));
    let id = f.app.messages.send(a, b, "private").unwrap().conversation_id;

    let err = f.app.messages.list(id, eve).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(unread_for(&f.app, b, id), 1);
}

#[test]
fn failed_read_receipt_still_returns_history() {
    let f = fixture();
    let (a, b) = (user(&f.db, "Alice"), user(&f.db, "Bob"));
    let id = f.app.messages.send(a, b, "are you free on Sunday?").unwrap().conversation_id;

    f.db.with_conn(|conn| {
        conn.execute_batch(
            "CREATE TRIGGER block_read_receipts BEFORE UPDATE ON messages
             BEGIN SELECT RAISE(ABORT, 'read receipts disabled'); END;",
        )
        .map_err(skillswap_db::Error::from)
    })
    .unwrap();

    let listed = f.app.messages.list(id, b).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].content, "are you free on Sunday?");
    assert!(!listed[0].is_read);
    assert_eq!(scalar(&f.db, "SELECT COUNT(*) FROM messages WHERE is_read = 0"), 1);
    assert_eq!(unread_for(&f.app, b, id), 1);
}

#[test]
fn carried_over_fernet_rows_show_placeholder() {
    let f = fixture();
    let (a, b) = (user(&f.db, "Alice"), user(&f.db, "Bob"));
    let id = f.app.conversations.resolve_or_create(a, b).unwrap();

    let token = "gAAAAABlZ3x9AAECAwQFBgcICQoLDA0ODxAREhMUFRYXGBkaGxwdHh8gISIjJCUmJygpKissLS4vMDEyMzQ1Njc4OTo7PD0-Pw==";
    f.db.with_conn(|conn| message_rows::insert(conn, id, b, token, &now_timestamp()))
        .unwrap();

    let listed = f.app.messages.list(id, a).unwrap();
    assert!(listed[0].degraded);
    assert_eq!(listed[0].content, UNAVAILABLE_PLACEHOLDER);

    let inbox = f.app.summaries.list_for_user(a).unwrap();
    assert_eq!(inbox[0].last_message_preview, UNAVAILABLE_PLACEHOLDER);
}

#[test]
fn listing_tolerates_legacy_and_foreign_rows() {
    let f = fixture();
    let (a, b) = (user(&f.db, "Alice"), user(&f.db, "Bob"));
    let id = f.app.conversations.resolve_or_create(a, b).unwrap();

    let foreign = MessageCipher::new(&generate_message_key())
        .encrypt("sealed with an old key")
        .unwrap();
    f.db.with_conn(|conn| {
        message_rows::insert(conn, id, a, "written before encryption", &now_timestamp())?;
        message_rows::insert(conn, id, b, &foreign, &now_timestamp())?;
        Ok::<_, skillswap_db::Error>(())
    })
    .unwrap();
    f.app.messages.append(id, a, "current").unwrap();

    let listed = f.app.messages.list(id, a).unwrap();
    assert_eq!(listed.len(), 3);
    assert_eq!(listed[0].content, "written before encryption");
    assert!(!listed[0].degraded);
    assert_eq!(listed[1].content, UNAVAILABLE_PLACEHOLDER);
    assert!(listed[1].degraded);
    assert_eq!(listed[2].content, "current");
}

// -- Summaries --

#[test]
fn inbox_is_ordered_by_activity() {
    let f = fixture();
    let (a, b, c) = (user(&f.db, "Alice Smith"), user(&f.db, "Bob Jones"), user(&f.db, "Carol"));

    let with_b = f.app.messages.send(a, b, "hello Bob").unwrap().conversation_id;
    thread::sleep(Duration::from_millis(2));
    let with_c = f.app.messages.send(c, a, "hello Alice").unwrap().conversation_id;

    let inbox = f.app.summaries.list_for_user(a).unwrap();
    let order: Vec<i64> = inbox.iter().map(|s| s.conversation_id).collect();
    assert_eq!(order, [with_c, with_b]);

    thread::sleep(Duration::from_millis(2));
    f.app.messages.send(b, a, "still there?").unwrap();

    let inbox = f.app.summaries.list_for_user(a).unwrap();
    assert_eq!(inbox[0].conversation_id, with_b);
    assert_eq!(inbox[0].other_participant.id, b);
    assert_eq!(inbox[0].other_participant.name, "Bob Jones");
    assert!(inbox[0].other_participant.picture.contains("name=BJ"));
    assert_eq!(inbox[0].last_message_preview, "still there?");
    assert!(inbox[0].last_message_time.is_some());
    assert_eq!(inbox[0].unread_count, 1);
    assert_eq!(inbox[1].other_participant.id, c);
    assert_eq!(inbox[1].unread_count, 1);
}

#[test]
fn inbox_preview_for_empty_and_degraded_conversations() {
    let f = fixture();
    let (a, b, c) = (user(&f.db, "Alice"), user(&f.db, "Bob"), user(&f.db, "Carol"));

    let empty = f.app.conversations.resolve_or_create(a, b).unwrap();
    let rotated = f.app.conversations.resolve_or_create(a, c).unwrap();
    let foreign = MessageCipher::new(&generate_message_key())
        .encrypt("lost to rotation")
        .unwrap();
    f.db.with_conn(|conn| message_rows::insert(conn, rotated, c, &foreign, &now_timestamp()))
        .unwrap();

    let inbox = f.app.summaries.list_for_user(a).unwrap();
    let empty = inbox.iter().find(|s| s.conversation_id == empty).unwrap();
    assert_eq!(empty.last_message_preview, "");
    assert!(empty.last_message_time.is_none());
    assert_eq!(empty.unread_count, 0);

    let rotated = inbox.iter().find(|s| s.conversation_id == rotated).unwrap();
    assert_eq!(rotated.last_message_preview, UNAVAILABLE_PLACEHOLDER);
    assert_eq!(rotated.unread_count, 1);
}

#[test]
fn inbox_only_lists_own_conversations() {
    let f = fixture();
    let (a, b, c) = (user(&f.db, "Alice"), user(&f.db, "Bob"), user(&f.db, "Carol"));
    f.app.messages.send(a, b, "hi").unwrap();

    assert!(f.app.summaries.list_for_user(c).unwrap().is_empty());
    assert_eq!(f.app.summaries.list_for_user(b).unwrap().len(), 1);
}

// -- Swap requests --

struct Swap {
    f: Fixture,
    sender: i64,
    receiver: i64,
    skill: i64,
}

fn swap_fixture() -> Swap {
    let f = fixture();
    let sender = user(&f.db, "Sam Sender");
    let receiver = user(&f.db, "Rita Receiver");
    let skill = f.db.create_skill("Guitar").unwrap();
    Swap {
        f,
        sender,
        receiver,
        skill,
    }
}

#[test]
fn duplicate_pending_request_conflicts() {
    let s = swap_fixture();
    let requests = &s.f.app.requests;

    let first = requests.create(s.sender, s.receiver, s.skill, "teach me?").unwrap();
    assert_eq!(first.status, SwapStatus::Pending);

    let err = requests.create(s.sender, s.receiver, s.skill, "again").unwrap_err();
    assert!(matches!(err, Error::DuplicatePending));
    assert_eq!(err.kind(), ErrorKind::Conflict);

    // The reverse direction is a different triple.
    requests.create(s.receiver, s.sender, s.skill, "").unwrap();
}

#[test]
fn new_request_allowed_once_previous_is_settled() {
    let s = swap_fixture();
    let requests = &s.f.app.requests;

    let first = requests.create(s.sender, s.receiver, s.skill, "").unwrap();
    requests.transition(first.id, s.receiver, SwapStatus::Rejected).unwrap();

    let second = requests.create(s.sender, s.receiver, s.skill, "try again").unwrap();
    assert_ne!(first.id, second.id);
}

#[test]
fn create_validates_parties_and_skill() {
    let s = swap_fixture();
    let requests = &s.f.app.requests;

    assert!(matches!(
        requests.create(s.sender, s.sender, s.skill, ""),
        Err(Error::SelfRequest)
    ));
    assert_eq!(
        requests.create(s.sender, s.receiver, s.skill + 7, "").unwrap_err().kind(),
        ErrorKind::NotFound
    );
    assert_eq!(
        requests.create(s.sender, 999, s.skill, "").unwrap_err().kind(),
        ErrorKind::NotFound
    );
    assert_eq!(
        requests
            .create(s.sender, s.receiver, s.skill, &"x".repeat(501))
            .unwrap_err()
            .kind(),
        ErrorKind::InvalidInput
    );
}

#[test]
fn request_message_is_sanitized() {
    let s = swap_fixture();
    let request = s
        .f
        .app
        .requests
        .create(s.sender, s.receiver, s.skill, "  <script>hi</script> ")
        .unwrap();
    assert_eq!(request.message, "&lt;script&gt;hi&lt;/script&gt;");
}

#[test]
fn only_receiver_accepts_or_rejects() {
    let s = swap_fixture();
    let outsider = user(&s.f.db, "Olga Outsider");
    let requests = &s.f.app.requests;
    let request = requests.create(s.sender, s.receiver, s.skill, "").unwrap();

    for actor in [s.sender, outsider] {
        for status in [SwapStatus::Accepted, SwapStatus::Rejected] {
            let err = requests.transition(request.id, actor, status).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Forbidden);
        }
    }

    let accepted = requests
        .transition(request.id, s.receiver, SwapStatus::Accepted)
        .unwrap();
    assert_eq!(accepted.status, SwapStatus::Accepted);
}

#[test]
fn either_party_completes_from_any_status() {
    let s = swap_fixture();
    let outsider = user(&s.f.db, "Olga Outsider");
    let requests = &s.f.app.requests;

    let pending = requests.create(s.sender, s.receiver, s.skill, "").unwrap();
    let err = requests
        .transition(pending.id, outsider, SwapStatus::Completed)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Forbidden);

    let done = requests
        .transition(pending.id, s.sender, SwapStatus::Completed)
        .unwrap();
    assert_eq!(done.status, SwapStatus::Completed);

    let other_skill = s.f.db.create_skill("Chess").unwrap();
    let rejected = requests.create(s.sender, s.receiver, other_skill, "").unwrap();
    requests.transition(rejected.id, s.receiver, SwapStatus::Rejected).unwrap();
    let closed = requests
        .transition(rejected.id, s.receiver, SwapStatus::Completed)
        .unwrap();
    assert_eq!(closed.status, SwapStatus::Completed);
}

#[test]
fn transition_errors() {
    let s = swap_fixture();
    let requests = &s.f.app.requests;
    let request = requests.create(s.sender, s.receiver, s.skill, "").unwrap();

    assert_eq!(
        requests
            .transition(request.id + 10, s.receiver, SwapStatus::Accepted)
            .unwrap_err()
            .kind(),
        ErrorKind::NotFound
    );
    assert_eq!(
        requests
            .transition(request.id, s.receiver, SwapStatus::Pending)
            .unwrap_err()
            .kind(),
        ErrorKind::InvalidInput
    );
}

#[test]
fn reviewable_only_when_completed() {
    let s = swap_fixture();
    let requests = &s.f.app.requests;
    let request = requests.create(s.sender, s.receiver, s.skill, "").unwrap();

    assert!(!requests.is_reviewable(request.id).unwrap());
    requests.transition(request.id, s.receiver, SwapStatus::Accepted).unwrap();
    assert!(!requests.is_reviewable(request.id).unwrap());
    requests.transition(request.id, s.receiver, SwapStatus::Completed).unwrap();
    assert!(requests.is_reviewable(request.id).unwrap());
    assert!(requests.is_reviewable(request.id + 1).is_err());
}

#[test]
fn request_board_splits_incoming_and_sent() {
    let s = swap_fixture();
    let requests = &s.f.app.requests;
    let chess = s.f.db.create_skill("Chess").unwrap();

    requests.create(s.sender, s.receiver, s.skill, "guitar please").unwrap();
    requests.create(s.receiver, s.sender, chess, "chess please").unwrap();

    let board = requests.list_for_user(s.sender).unwrap();
    assert_eq!(board.sent.len(), 1);
    assert_eq!(board.sent[0].skill_name, "Guitar");
    assert_eq!(board.sent[0].counterpart.id, s.receiver);
    assert_eq!(board.sent[0].counterpart.name, "Rita Receiver");
    assert_eq!(board.incoming.len(), 1);
    assert_eq!(board.incoming[0].skill_name, "Chess");
    assert_eq!(board.incoming[0].counterpart.id, s.receiver);
    assert_eq!(board.incoming[0].status, SwapStatus::Pending);
}

// -- Reviews --

#[test]
fn review_requires_completion_and_is_accepted_once() {
    let s = swap_fixture();
    let app = &s.f.app;
    let request = app.requests.create(s.sender, s.receiver, s.skill, "").unwrap();

    let err = app.reviews.create(s.sender, request.id, 5, "great").unwrap_err();
    assert!(matches!(err, Error::NotCompleted(id) if id == request.id));
    assert_eq!(err.kind(), ErrorKind::Precondition);

    app.requests
        .transition(request.id, s.receiver, SwapStatus::Completed)
        .unwrap();

    let review = app.reviews.create(s.sender, request.id, 5, "great").unwrap();
    assert_eq!(review.reviewed_id, s.receiver);
    assert_eq!(review.rating, 5);

    let again = app.reviews.create(s.sender, request.id, 4, "still great").unwrap_err();
    assert!(matches!(again, Error::DuplicateReview(_)));
    assert_eq!(again.kind(), ErrorKind::Conflict);

    // The other party keeps their own review slot.
    let back = app.reviews.create(s.receiver, request.id, 4, "").unwrap();
    assert_eq!(back.reviewed_id, s.sender);
}

#[test]
fn review_validation() {
    let s = swap_fixture();
    let outsider = user(&s.f.db, "Olga Outsider");
    let app = &s.f.app;
    let request = app.requests.create(s.sender, s.receiver, s.skill, "").unwrap();
    app.requests
        .transition(request.id, s.sender, SwapStatus::Completed)
        .unwrap();

    for rating in [0, 6, -1, 300] {
        let err = app.reviews.create(s.sender, request.id, rating, "").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }
    assert_eq!(
        app.reviews.create(outsider, request.id, 3, "").unwrap_err().kind(),
        ErrorKind::Forbidden
    );
    assert_eq!(
        app.reviews.create(s.sender, request.id + 5, 3, "").unwrap_err().kind(),
        ErrorKind::NotFound
    );
}

#[test]
fn received_reviews_and_stats() {
    let s = swap_fixture();
    let app = &s.f.app;
    let chess = s.f.db.create_skill("Chess").unwrap();
    let third = user(&s.f.db, "Theo Third");

    let first = app.requests.create(s.sender, s.receiver, s.skill, "").unwrap();
    let second = app.requests.create(third, s.receiver, chess, "").unwrap();
    for id in [first.id, second.id] {
        app.requests.transition(id, s.receiver, SwapStatus::Completed).unwrap();
    }
    app.reviews.create(s.sender, first.id, 5, "patient and clear").unwrap();
    app.reviews.create(third, second.id, 4, "").unwrap();

    let received = app.reviews.list_for_user(s.receiver).unwrap();
    assert_eq!(received.stats.count, 2);
    assert_eq!(received.stats.average, 4.5);
    assert_eq!(received.reviews.len(), 2);
    assert_eq!(received.reviews[0].reviewer.id, third);
    assert_eq!(received.reviews[1].comment, "patient and clear");

    let none = app.reviews.list_for_user(s.sender).unwrap();
    assert_eq!(none.stats.count, 0);
    assert_eq!(none.stats.average, 0.0);
}

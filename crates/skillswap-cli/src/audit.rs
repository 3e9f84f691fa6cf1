//! Offline scan of stored message bodies against the active key.

use serde::Serialize;
use tracing::warn;

use skillswap_crypto::{MessageCipher, is_encrypted};
use skillswap_db::Database;
use skillswap_db::queries::messages;

/// How the stored messages fare under the configured key.
#[derive(Debug, Default, Serialize)]
pub struct AuditReport {
    pub total: usize,
    /// Ciphertext that decrypts with the active key.
    pub readable: usize,
    /// Stored before encryption was enabled; served as-is.
    pub legacy_plaintext: usize,
    /// Ciphertext the active key cannot open, including Fernet tokens from
    /// the previous store. Shown to users as the placeholder.
    pub unreadable: usize,
    pub unreadable_ids: Vec<i64>,
}

pub fn run(db: &Database, cipher: &MessageCipher) -> skillswap_db::Result<AuditReport> {
    let rows = db.with_conn(messages::all_contents)?;

    let mut report = AuditReport {
        total: rows.len(),
        ..Default::default()
    };
    for (id, content) in rows {
        if !is_encrypted(&content) {
            report.legacy_plaintext += 1;
        } else if cipher.decrypt(&content).is_degraded() {
            report.unreadable += 1;
            report.unreadable_ids.push(id);
        } else {
            report.readable += 1;
        }
    }

    if report.unreadable > 0 {
        warn!(
            "{} of {} messages cannot be decrypted with the configured key",
            report.unreadable, report.total
        );
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use skillswap_core::MessageStore;
    use skillswap_crypto::keys::generate_message_key;
    use skillswap_db::now_timestamp;

    use super::*;

    #[test]
    fn classifies_every_row() {
        let db = Arc::new(Database::open_in_memory().unwrap());
        let alice = db.create_user("Alice", None).unwrap();
        let bob = db.create_user("Bob", None).unwrap();

        let old = MessageStore::new(db.clone(), MessageCipher::new(&generate_message_key()));
        let lost = old.send(alice, bob, "before rotation").unwrap();

        let cipher = MessageCipher::new(&generate_message_key());
        let current = MessageStore::new(db.clone(), cipher.clone());
        current.send(bob, alice, "after rotation").unwrap();
        current.send(alice, bob, "still fine").unwrap();

        db.with_conn(|conn| {
            messages::insert(conn, lost.conversation_id, bob, "plain", &now_timestamp())
        })
        .unwrap();

        let report = run(&db, &cipher).unwrap();
        assert_eq!(report.total, 4);
        assert_eq!(report.readable, 2);
        assert_eq!(report.legacy_plaintext, 1);
        assert_eq!(report.unreadable, 1);
        assert_eq!(report.unreadable_ids, [lost.id]);
    }

    #[test]
    fn fernet_rows_are_unreadable() {
        const FERNET_TOKEN: &str = "gAAAAABlZ3x9AAECAwQFBgcICQoLDA0ODxAREhMUFRYXGBkaGxwdHh8gISIjJCUmJygpKissLS4vMDEyMzQ1Njc4OTo7PD0-Pw==";

        let db = Arc::new(Database::open_in_memory().unwrap());
        let alice = db.create_user("Alice", None).unwrap();
        let bob = db.create_user("Bob", None).unwrap();
        let cipher = MessageCipher::new(&generate_message_key());
        let sent = MessageStore::new(db.clone(), cipher.clone())
            .send(alice, bob, "hello")
            .unwrap();

        let carried_over = db
            .with_conn(|conn| {
                messages::insert(conn, sent.conversation_id, bob, FERNET_TOKEN, &now_timestamp())
            })
            .unwrap();

        let report = run(&db, &cipher).unwrap();
        assert_eq!(report.total, 2);
        assert_eq!(report.readable, 1);
        assert_eq!(report.legacy_plaintext, 0);
        assert_eq!(report.unreadable_ids, [carried_over]);
    }

    #[test]
    fn empty_store() {
        let db = Database::open_in_memory().unwrap();
        let cipher = MessageCipher::new(&generate_message_key());
        let report = run(&db, &cipher).unwrap();
        assert_eq!(report.total, 0);
        assert!(report.unreadable_ids.is_empty());
    }
}

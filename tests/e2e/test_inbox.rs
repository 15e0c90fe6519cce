use std::sync::Arc;

use crate::e2e::helpers::{
    comment_mention, private_message, RecordingNotifier, ScriptedSource, TestContext,
};
use curator_bot::domain::feed::FeedServiceApi;
use pretty_assertions::assert_eq;

#[tokio::test]
async fn it_should_build_the_requested_digest_from_stored_mentions() {
    let ctx = TestContext::new().await.unwrap();
    let notifier = Arc::new(RecordingNotifier::default());
    let controller = ctx.controller(notifier.clone());

    let mut batch = vec![comment_mention(
        "t1_1",
        "alice",
        "u/-CuratorBot- 01/01/24",
        "Q1",
        "bob",
    )];
    for (i, commenter) in ["carol", "dave", "erin", "frank"].iter().enumerate() {
        batch.push(comment_mention(
            &format!("t1_{}", i + 2),
            "alice",
            "u/-CuratorBot- 01/01/24",
            "Q2",
            commenter,
        ));
    }
    batch.push(private_message("t4_1", "alice", "Feed: 01/01/24"));

    let source = ScriptedSource::new(vec![batch]);
    controller.run(&source).await.unwrap();

    let sent = notifier.sent.lock().await;
    // five acknowledgements plus the digest
    assert_eq!(sent.len(), 6);

    let feed_reply = sent.last().unwrap();
    assert_eq!(feed_reply.recipient, "alice");
    assert_eq!(feed_reply.subject, "Feed request for 01/01/24");
    assert!(feed_reply.body.starts_with("Your feed for 01/01/24:\n"));
    assert!(feed_reply
        .body
        .contains("\n- /u/bob answered [Q1](https://reddit.example/Q1)."));
    assert!(feed_reply
        .body
        .contains("\n- /u/carol, /u/dave, and /u/erin answered [Q2](https://reddit.example/Q2)."));
    assert!(feed_reply.body.contains("\n - /u/frank also answered it too!"));

    // The literal-quoted mirror follows the divider.
    assert!(feed_reply.body.contains("&nbsp;"));
    assert!(feed_reply
        .body
        .contains("\n    - /u/bob answered [Q1](https://reddit.example/Q1)."));
}

#[tokio::test]
async fn it_should_acknowledge_an_accepted_entry() {
    let ctx = TestContext::new().await.unwrap();
    let notifier = Arc::new(RecordingNotifier::default());
    let controller = ctx.controller(notifier.clone());

    let source = ScriptedSource::new(vec![vec![comment_mention(
        "t1_1",
        "alice",
        "u/-CuratorBot- 01/01/24",
        "Q1",
        "bob",
    )]]);
    controller.run(&source).await.unwrap();

    let sent = notifier.sent.lock().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].recipient, "alice");
    assert_eq!(sent[0].subject, "Adding to list for 01/01/24");
    assert!(sent[0].body.starts_with(
        "[bob's answer to the question \"Q1\"](https://reddit.example/Q1/bob?context=3) \
         has been stored for the feed dated 01/01/24."
    ));
    assert!(sent[0].body.contains("I am a bot created by"));
}

#[tokio::test]
async fn it_should_reply_feed_not_found_for_an_unknown_date() {
    let ctx = TestContext::new().await.unwrap();
    let notifier = Arc::new(RecordingNotifier::default());
    let controller = ctx.controller(notifier.clone());

    let source = ScriptedSource::new(vec![vec![private_message(
        "t4_1",
        "alice",
        "Feed: 02/02/24",
    )]]);
    controller.run(&source).await.unwrap();

    let sent = notifier.sent.lock().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].subject, "No feed found. Please recheck the date.");
    assert!(sent[0].body.starts_with("No feed found for 02/02/24."));
}

#[tokio::test]
async fn it_should_send_help_for_both_spellings() {
    let ctx = TestContext::new().await.unwrap();
    let notifier = Arc::new(RecordingNotifier::default());
    let controller = ctx.controller(notifier.clone());

    let source = ScriptedSource::new(vec![vec![
        private_message("t4_1", "alice", "u/-CuratorBot- HELP!"),
        private_message("t4_2", "bob", "/u/-CuratorBot- HELP!"),
    ]]);
    controller.run(&source).await.unwrap();

    let sent = notifier.sent.lock().await;
    assert_eq!(sent.len(), 2);
    for reply in sent.iter() {
        assert_eq!(reply.subject, "-CuratorBot- help notes");
        assert!(reply.body.contains("To add an entry to your weekly feed"));
    }
}

#[tokio::test]
async fn it_should_still_acknowledge_a_suppressed_duplicate() {
    let ctx = TestContext::new().await.unwrap();
    let notifier = Arc::new(RecordingNotifier::default());
    let controller = ctx.controller(notifier.clone());

    let mention = comment_mention("t1_1", "alice", "u/-CuratorBot- 01/01/24", "Q1", "bob");
    let duplicate = comment_mention("t1_2", "alice", "u/-CuratorBot- 01/01/24", "Q1", "bob");
    let source = ScriptedSource::new(vec![vec![mention, duplicate]]);
    controller.run(&source).await.unwrap();

    // Both senders get an acknowledgement, but the store keeps one row.
    let sent = notifier.sent.lock().await;
    assert_eq!(sent.len(), 2);

    let lines = ctx
        .feed_service
        .fetch_feed("alice", "01/01/24")
        .await
        .unwrap();
    assert_eq!(lines.len(), 1);
}

#[tokio::test]
async fn it_should_ignore_malformed_and_unrelated_messages() {
    let ctx = TestContext::new().await.unwrap();
    let notifier = Arc::new(RecordingNotifier::default());
    let controller = ctx.controller(notifier.clone());

    let source = ScriptedSource::new(vec![vec![
        // mention with no date token
        private_message("t4_1", "alice", "u/-CuratorBot-"),
        // add-entry mention that did not arrive on a comment
        private_message("t4_2", "alice", "u/-CuratorBot- 01/01/24"),
        // plain chatter
        private_message("t4_3", "bob", "thanks for the digest!"),
    ]]);
    controller.run(&source).await.unwrap();

    assert_eq!(notifier.sent.lock().await.len(), 0);
    let lines = ctx
        .feed_service
        .fetch_feed("alice", "01/01/24")
        .await
        .unwrap();
    assert_eq!(lines.len(), 0);
}

#[tokio::test]
async fn it_should_mark_each_batch_read_after_processing() {
    let ctx = TestContext::new().await.unwrap();
    let notifier = Arc::new(RecordingNotifier::default());
    let controller = ctx.controller(notifier.clone());

    let source = ScriptedSource::new(vec![
        vec![
            comment_mention("t1_1", "alice", "u/-CuratorBot- 01/01/24", "Q1", "bob"),
            private_message("t4_1", "alice", "Feed: 01/01/24"),
        ],
        vec![private_message("t4_2", "bob", "u/-CuratorBot- HELP!")],
    ]);
    controller.run(&source).await.unwrap();

    let marked = source.marked_read.lock().await;
    assert_eq!(
        *marked,
        vec![
            vec!["t1_1".to_string(), "t4_1".to_string()],
            vec!["t4_2".to_string()],
        ]
    );
}

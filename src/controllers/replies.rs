//! Private-message reply templates. The wording is load-bearing: users
//! and downstream tooling expect these bodies byte-for-byte, so keep any
//! edit deliberate.

/// The attribution block appended to every reply except help.
const BOT_SIGNATURE: &str = r#"
-----

I am a bot created by u/AB1908. [Message him](https://reddit.com/message/compose/?to=AB1908) if you have any concerns or want help or just to say thanks! For help, mention the bot and type "HELP!" like this:

    u/-CuratorBot- HELP!"#;

const BOT_HELP_SUBJECT: &str = "-CuratorBot- help notes";

const BOT_HELP_TEXT: &str = r#"
-----

To add an entry to your weekly feed, mention the bot along the desired feed date like so:

    u/-CuratorBot- dd/mm/yy

To retrieve your feed for the desired date, message or reply to the bot with the following in the body:

    Feed: dd/mm/yy"#;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub subject: String,
    pub body: String,
}

pub fn entry_accepted(
    parent_author: &str,
    submission_title: &str,
    context: &str,
    feed_date: &str,
) -> Reply {
    Reply {
        subject: format!("Adding to list for {feed_date}"),
        body: format!(
            "[{parent_author}'s answer to the question \"{submission_title}\"]({context}) \
             has been stored for the feed dated {feed_date}.{BOT_SIGNATURE}"
        ),
    }
}

pub fn feed_found(feed_date: &str, digest: &str) -> Reply {
    Reply {
        subject: format!("Feed request for {feed_date}"),
        body: format!("Your feed for {feed_date}:\n{digest}{BOT_SIGNATURE}"),
    }
}

pub fn feed_not_found(feed_date: &str) -> Reply {
    Reply {
        subject: "No feed found. Please recheck the date.".to_string(),
        body: format!("No feed found for {feed_date}.{BOT_SIGNATURE}"),
    }
}

pub fn help() -> Reply {
    Reply {
        subject: BOT_HELP_SUBJECT.to_string(),
        body: BOT_HELP_TEXT.to_string(),
    }
}

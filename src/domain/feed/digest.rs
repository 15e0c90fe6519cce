//! Digest rendering for a fetched feed.
//!
//! The same content is rendered twice: once as an inline bullet list for
//! the reply body, and once indented four spaces so the reply can also
//! reproduce it as a literal block. The two parts are separated by an
//! `&nbsp;` divider line.

use crate::domain::feed::FeedLine;

/// At most this many names are listed per line; overflow moves to
/// follow-up "also answered it too!" lines.
const AUTHOR_GROUP_SIZE: usize = 3;

const NEWLINE: &str = "\n";
const CODELINE: &str = "\n    ";

type Question = (String, String);

/// Render the two-part digest for one (feed author, feed date).
pub fn render(lines: &[FeedLine]) -> String {
    let mut feed_string = String::new();
    let mut code_string = String::new();

    for (question, commenters) in group_by_question(lines) {
        let question_answered = format!(" answered [{}]({}).", question.0, question.1);

        let mut groups = commenters.chunks(AUTHOR_GROUP_SIZE);
        if let Some(primary) = groups.next() {
            let line = format!("- {}{}", join_mentions(primary), question_answered);
            feed_string.push_str(NEWLINE);
            feed_string.push_str(&line);
            code_string.push_str(CODELINE);
            code_string.push_str(&line);
        }
        for followup in groups {
            let line = format!(" - {} also answered it too!", join_mentions(followup));
            feed_string.push_str(NEWLINE);
            feed_string.push_str(&line);
            code_string.push_str(CODELINE);
            code_string.push_str(&line);
        }
    }

    format!("{feed_string}{NEWLINE}{NEWLINE}&nbsp;{NEWLINE}{code_string}")
}

/// Group commenter names by question identity, preserving first-seen order
/// of questions and insertion order of names within a question.
fn group_by_question(lines: &[FeedLine]) -> Vec<(Question, Vec<String>)> {
    let mut grouped: Vec<(Question, Vec<String>)> = Vec::new();
    for line in lines {
        let question = (line.submission_text.clone(), line.submission_url.clone());
        match grouped.iter_mut().find(|(q, _)| *q == question) {
            Some((_, commenters)) => commenters.push(line.commenter_name.clone()),
            None => grouped.push((question, vec![line.commenter_name.clone()])),
        }
    }
    grouped
}

fn join_mentions(names: &[String]) -> String {
    let mentions: Vec<String> = names.iter().map(|name| format!("/u/{name}")).collect();
    join_authors(&mentions)
}

/// Natural-language joining for a group of one, two, or three names.
fn join_authors(names: &[String]) -> String {
    match names {
        [only] => only.clone(),
        [first, second] => format!("{first} and {second}"),
        [first, second, third] => format!("{first}, {second}, and {third}"),
        _ => unreachable!("author groups hold between one and three names"),
    }
}

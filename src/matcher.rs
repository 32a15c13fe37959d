use crate::bank::Topic;

/// Finds the topic mentioned in a free-text message.
///
/// A topic matches when its name occurs anywhere in the text, ignoring case.
/// The first match in `topics` order wins, even when a later topic is a
/// longer, more specific match.
pub fn match_topic<'a>(text: &str, topics: &'a [Topic]) -> Option<&'a Topic> {
    let text = text.to_lowercase();
    topics
        .iter()
        .find(|topic| text.contains(&topic.as_str().to_lowercase()))
}

// Content invariants for the built-in page text and asset lists.
// Native-only; nothing here touches the browser.

use std::collections::HashSet;

#[test]
fn no_messages_escalate_from_no() {
    let msgs = valentine_proposal::NO_MESSAGES;
    assert!(msgs.len() >= 6, "expected at least six labels, got {}", msgs.len());
    assert_eq!(msgs[0], "No");
    assert_eq!(msgs[1], "Wait... 🥺");
    for m in msgs {
        assert!(!m.trim().is_empty(), "blank label in NO_MESSAGES");
    }
}

#[test]
fn date_ideas_are_unique() {
    let mut seen = HashSet::new();
    for idea in valentine_proposal::DATE_IDEAS {
        assert!(seen.insert(*idea), "duplicate date idea '{}'", idea);
    }
    assert!(seen.len() >= 8);
}

#[test]
fn slideshow_has_something_to_rotate() {
    let bgs = valentine_proposal::BACKGROUNDS;
    assert!(bgs.len() >= 2);
    assert!(bgs.iter().all(|b| b.starts_with("assets/")), "backgrounds should be relative asset paths");
}

#[test]
fn scrapbook_entries_have_captions() {
    assert!(!valentine_proposal::SCRAPBOOK.is_empty());
    for (image, caption) in valentine_proposal::SCRAPBOOK {
        assert!(!image.is_empty());
        assert!(!caption.trim().is_empty(), "missing caption for '{}'", image);
    }
}

#[test]
fn letter_and_quote_are_present() {
    assert!(!valentine_proposal::LOVE_LETTER.is_empty());
    assert!(!valentine_proposal::QUOTE.is_empty());
    assert_eq!(valentine_proposal::DEFAULT_RECIPIENT, "My Love");
}

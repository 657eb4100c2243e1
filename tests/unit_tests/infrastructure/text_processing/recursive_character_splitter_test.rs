use logidoc::application::ports::TextSplitterError;
use logidoc::infrastructure::text_processing::{Fragment, RecursiveCharacterSplitter};

fn reassemble(fragments: &[Fragment]) -> String {
    let mut text = String::new();
    let mut covered = 0;
    for fragment in fragments {
        assert!(fragment.offset <= covered, "gap before offset {}", fragment.offset);
        if fragment.end() > covered {
            text.push_str(&fragment.text[covered - fragment.offset..]);
            covered = fragment.end();
        }
    }
    text
}

#[test]
fn given_five_thousand_chars_when_splitting_with_2000_and_200_then_fragments_respect_bounds() {
    let splitter = RecursiveCharacterSplitter::new(2000, 200).unwrap();
    let text = "word ".repeat(1000);
    assert_eq!(text.len(), 5000);

    let fragments = splitter.split(&text);

    assert!(fragments.len() >= 3);
    for fragment in &fragments {
        assert!(fragment.text.chars().count() <= 2000);
    }
    for pair in fragments.windows(2) {
        let (prev, next) = (&pair[0], &pair[1]);
        assert!(next.offset <= prev.end());
        let overlap = prev.end() - next.offset;
        assert!(overlap <= 200);
        assert_eq!(
            &prev.text[prev.text.len() - overlap..],
            &next.text[..overlap]
        );
    }
    assert_eq!(reassemble(&fragments), text);
}

#[test]
fn given_structured_text_when_splitting_then_prefers_coarse_separators() {
    let splitter = RecursiveCharacterSplitter::new(40, 0).unwrap();
    let text = "## Pickup\nDock 4, Dallas TX\n## Drop\nDock 9, Houston TX";

    let fragments = splitter.split(text);

    let texts: Vec<&str> = fragments.iter().map(|f| f.text.as_str()).collect();
    assert_eq!(
        texts,
        ["## Pickup\nDock 4, Dallas TX", "\n## Drop\nDock 9, Houston TX"]
    );
}

#[test]
fn given_separator_split_when_splitting_then_separator_starts_following_piece() {
    let splitter = RecursiveCharacterSplitter::new(12, 0).unwrap();

    let fragments = splitter.split("alpha beta\n\ngamma");

    assert_eq!(fragments.len(), 2);
    assert_eq!(fragments[0].text, "alpha beta");
    assert_eq!(fragments[1].text, "\n\ngamma");
    assert_eq!(fragments[1].offset, 10);
}

#[test]
fn given_word_longer_than_limit_when_splitting_then_falls_back_to_characters() {
    let splitter = RecursiveCharacterSplitter::new(4, 1).unwrap();
    let text = "abcdefghij";

    let fragments = splitter.split(text);

    assert!(fragments.iter().all(|f| f.text.chars().count() <= 4));
    assert_eq!(reassemble(&fragments), text);
}

#[test]
fn given_multibyte_text_when_splitting_then_counts_characters_not_bytes() {
    let splitter = RecursiveCharacterSplitter::new(3, 0).unwrap();
    let text = "ééééééé";

    let fragments = splitter.split(text);

    assert!(fragments.iter().all(|f| f.text.chars().count() <= 3));
    assert_eq!(reassemble(&fragments), text);
}

#[test]
fn given_mixed_document_when_splitting_then_reassembly_is_lossless() {
    let splitter = RecursiveCharacterSplitter::new(60, 15).unwrap();
    let text = "## Carrier Details\nAcme Trucking LLC. MC 123456. Phone 555-0100.\n\n\
                ### Page 2\n\nDriver John Doe, truck 77, trailer 53 ft dry van.\n\
                Special instructions: call 1 hour before arrival. No weekend delivery.";

    let fragments = splitter.split(text);

    assert!(fragments.iter().all(|f| f.text.chars().count() <= 60));
    assert_eq!(reassemble(&fragments), text);
}

#[test]
fn given_empty_text_when_splitting_then_returns_no_fragments() {
    let splitter = RecursiveCharacterSplitter::new(10, 2).unwrap();

    assert!(splitter.split("").is_empty());
}

#[test]
fn given_overlap_not_below_size_when_constructing_then_fails() {
    assert!(matches!(
        RecursiveCharacterSplitter::new(100, 100),
        Err(TextSplitterError::InvalidConfiguration(_))
    ));
    assert!(matches!(
        RecursiveCharacterSplitter::new(0, 0),
        Err(TextSplitterError::InvalidConfiguration(_))
    ));
}

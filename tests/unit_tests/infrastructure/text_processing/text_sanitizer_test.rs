use logidoc::infrastructure::text_processing::sanitize_extracted_text;

#[test]
fn given_ligature_when_sanitizing_then_normalizes_to_plain_letters() {
    assert_eq!(sanitize_extracted_text("\u{FB01}nal rate"), "final rate");
}

#[test]
fn given_word_hyphenated_across_lines_when_sanitizing_then_rejoins_it() {
    assert_eq!(
        sanitize_extracted_text("ship-\nment ready"),
        "shipment ready"
    );
}

#[test]
fn given_ragged_whitespace_when_sanitizing_then_collapses_it() {
    let raw = "  Pickup:   Dallas\t\tTX  \n\n\n\nDrop:  Houston";

    assert_eq!(
        sanitize_extracted_text(raw),
        "Pickup: Dallas TX\n\nDrop: Houston"
    );
}

#[test]
fn given_control_characters_when_sanitizing_then_drops_them() {
    assert_eq!(sanitize_extracted_text("Load\u{0007} 4821"), "Load 4821");
}

#[test]
fn given_whitespace_only_when_sanitizing_then_returns_empty() {
    assert_eq!(sanitize_extracted_text(" \n\t\n "), "");
}

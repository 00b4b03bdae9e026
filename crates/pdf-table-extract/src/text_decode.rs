use encoding_rs::{BIG5, UTF_16BE};
use lopdf::Document;

fn is_cjk(ch: char) -> bool {
    ('\u{4E00}'..='\u{9FFF}').contains(&ch) || is_cjk_extension_a(ch)
}

fn is_cjk_extension_a(ch: char) -> bool {
    ('\u{3400}'..='\u{4DBF}').contains(&ch)
}

/// Heuristic for text that came out of the wrong decoder.
pub(crate) fn looks_decoding_broken(text: &str) -> bool {
    if text.contains("?Identity-H Unimplemented?") {
        return true;
    }

    let total = text.chars().count();
    if total == 0 {
        return false;
    }

    let replacement = text.matches('\u{FFFD}').count();
    let control = text
        .chars()
        .filter(|ch| ch.is_control() && !matches!(ch, '\n' | '\r' | '\t'))
        .count();
    let cjk = text.chars().filter(|ch| is_cjk(*ch)).count();
    let extension_a = text.chars().filter(|ch| is_cjk_extension_a(*ch)).count();

    replacement * 8 > total || control * 5 > total || (cjk > 20 && extension_a * 4 > cjk)
}

fn decode_utf16(bytes: &[u8]) -> Option<String> {
    let (text, had_errors) = UTF_16BE.decode_without_bom_handling(bytes);
    (!had_errors && !text.is_empty()).then(|| text.into_owned())
}

/// Decodes a PDF string operand, retrying UTF-16BE and Big5 when the font
/// encoding lookup produced garbage.
pub(crate) fn decode_pdf_bytes(encoding: Option<&str>, bytes: &[u8]) -> String {
    let decoded = Document::decode_text(encoding, bytes);
    if !looks_decoding_broken(&decoded) {
        return decoded;
    }

    let has_bom = bytes.starts_with(&[0xFE, 0xFF]) || bytes.starts_with(&[0xFF, 0xFE]);
    if has_bom && let Some(text) = decode_utf16(bytes.get(2..).unwrap_or_default()) {
        return text;
    }

    let hint = encoding.map(str::to_ascii_lowercase).unwrap_or_default();
    let wide_hint = ["utf16", "ucs2", "identity-h", "unicode"]
        .iter()
        .any(|marker| hint.contains(marker));
    if wide_hint && let Some(text) = decode_utf16(bytes) {
        return text;
    }

    let big5_hint = ["big5", "b5", "eten", "cns"]
        .iter()
        .any(|marker| hint.contains(marker));
    if big5_hint {
        let (text, _, had_errors) = BIG5.decode(bytes);
        if !had_errors && !text.is_empty() {
            return text.into_owned();
        }
    }

    String::from_utf8_lossy(bytes).into_owned()
}

#[cfg(test)]
mod tests {
    use super::{decode_pdf_bytes, looks_decoding_broken};

    #[test]
    fn decodes_big5_when_encoding_hint_is_present() {
        let (bytes, _, had_errors) = encoding_rs::BIG5.encode("發票");
        assert!(!had_errors);
        assert_eq!(decode_pdf_bytes(Some("ETen-B5-H"), &bytes), "發票");
    }

    #[test]
    fn flags_replacement_heavy_text() {
        assert!(looks_decoding_broken("\u{FFFD}\u{FFFD}ab"));
        assert!(!looks_decoding_broken("Subtotal 12.00"));
        assert!(!looks_decoding_broken(""));
    }
}

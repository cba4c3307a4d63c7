//! Small helpers shared by the quick-xml based readers.
//!
//! The readers never enable `trim_text`: whitespace-only `w:t` content such as
//! `<w:t xml:space="preserve"> </w:t>` is significant.

use quick_xml::events::{BytesRef, BytesStart, BytesText};
use quick_xml::escape::{resolve_xml_entity, unescape};
use std::borrow::Cow;

/// Return the unescaped value of the attribute whose local name is `local`.
///
/// Prefixes are ignored, so `r:id` and `id` both match `b"id"`.
pub(crate) fn attr_value(e: &BytesStart<'_>, local: &[u8]) -> Option<String> {
    e.attributes().flatten().find_map(|attr| {
        if attr.key.local_name().as_ref() == local {
            Some(
                attr.unescape_value()
                    .unwrap_or(Cow::Borrowed(""))
                    .into_owned(),
            )
        } else {
            None
        }
    })
}

/// Whether an OOXML on/off property is switched on.
///
/// A bare element (`<w:b/>`) is on; `w:val` of `0`, `false` or `off` turns it off.
pub(crate) fn toggle_is_on(e: &BytesStart<'_>) -> bool {
    match attr_value(e, b"val") {
        Some(val) => !matches!(val.as_str(), "0" | "false" | "off"),
        None => true,
    }
}

/// Append the content of a text event to `out`.
pub(crate) fn push_text(out: &mut String, e: &BytesText<'_>) {
    let raw = String::from_utf8_lossy(e.as_ref());
    match unescape(&raw) {
        Ok(text) => out.push_str(&text),
        Err(_) => out.push_str(&raw),
    }
}

/// Append the replacement of an entity or character reference (`&amp;`, `&#x41;`)
/// to `out`. Unknown entities are kept verbatim.
pub(crate) fn push_reference(out: &mut String, e: &BytesRef<'_>) {
    let name = String::from_utf8_lossy(e.as_ref());
    let resolved = if let Some(hex) = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
        u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
    } else if let Some(dec) = name.strip_prefix('#') {
        dec.parse::<u32>().ok().and_then(char::from_u32)
    } else {
        None
    };

    if let Some(ch) = resolved {
        out.push(ch);
    } else if let Some(text) = resolve_xml_entity(&name) {
        out.push_str(text);
    } else {
        out.push('&');
        out.push_str(&name);
        out.push(';');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quick_xml::Reader;
    use quick_xml::events::Event;

    fn collect_text(xml: &str) -> String {
        let mut reader = Reader::from_str(xml);
        let mut out = String::new();
        loop {
            match reader.read_event() {
                Ok(Event::Text(e)) => push_text(&mut out, &e),
                Ok(Event::GeneralRef(e)) => push_reference(&mut out, &e),
                Ok(Event::Eof) => break,
                Ok(_) => {},
                Err(e) => panic!("unexpected XML error: {e}"),
            }
        }
        out
    }

    #[test]
    fn test_entities_are_resolved() {
        assert_eq!(collect_text("<t>Q&amp;A &lt;x&gt; &#x41;&#66;</t>"), "Q&A <x> AB");
    }

    #[test]
    fn test_whitespace_is_preserved() {
        assert_eq!(collect_text("<t>  two spaces </t>"), "  two spaces ");
    }

    #[test]
    fn test_toggle_values() {
        let on = BytesStart::from_content("w:b", 3);
        assert!(toggle_is_on(&on));
        let off = BytesStart::from_content(r#"w:b w:val="0""#, 3);
        assert!(!toggle_is_on(&off));
        let explicit = BytesStart::from_content(r#"w:b w:val="true""#, 3);
        assert!(toggle_is_on(&explicit));
    }
}

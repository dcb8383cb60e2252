use std::borrow::Cow;

use pdf_writer::{Name, Pdf, Ref};

/// A registered typeface. Immutable once the document has written it, and
/// shared by every page of that document.
#[derive(Clone, Debug)]
pub(crate) struct FontHandle {
    pub(crate) pdf_name: &'static str,
    pub(crate) style: FontStyle,
    pub(crate) font_ref: Ref,
}

impl FontHandle {
    pub(crate) fn name(&self) -> Name<'static> {
        Name(self.pdf_name.as_bytes())
    }
}

#[derive(Clone, Debug)]
pub(crate) struct FontPair {
    pub(crate) regular: FontHandle,
    pub(crate) bold: FontHandle,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FontStyle {
    Regular,
    Bold,
}

impl FontPair {
    pub(crate) fn iter(&self) -> impl Iterator<Item = &FontHandle> {
        [&self.regular, &self.bold].into_iter()
    }
}

/// Register Helvetica and Helvetica-Bold as base-14 Type1 fonts.
/// Base-14 fonts need no embedded program, so this cannot fail.
pub(crate) fn register_fonts(pdf: &mut Pdf, alloc: &mut impl FnMut() -> Ref) -> FontPair {
    let regular = register_standard_font(pdf, "Helvetica", "F1", FontStyle::Regular, alloc);
    let bold = register_standard_font(pdf, "Helvetica-Bold", "F2", FontStyle::Bold, alloc);
    FontPair { regular, bold }
}

fn register_standard_font(
    pdf: &mut Pdf,
    base_font: &'static str,
    pdf_name: &'static str,
    style: FontStyle,
    alloc: &mut impl FnMut() -> Ref,
) -> FontHandle {
    let font_ref = alloc();
    pdf.type1_font(font_ref)
        .base_font(Name(base_font.as_bytes()))
        .encoding_predefined(Name(b"WinAnsiEncoding"));
    log::debug!("register_font: {base_font} as /{pdf_name}");
    FontHandle {
        pdf_name,
        style,
        font_ref,
    }
}

/// Map a single Unicode char to its WinAnsi byte, or None if unmappable.
fn char_to_winansi(c: char) -> Option<u8> {
    let byte = match c as u32 {
        0x0020..=0x007E => c as u8,
        0x00A0..=0x00FF => c as u8,
        0x20AC => 0x80,
        0x201A => 0x82,
        0x0192 => 0x83,
        0x201E => 0x84,
        0x2026 => 0x85,
        0x2020 => 0x86,
        0x2021 => 0x87,
        0x02C6 => 0x88,
        0x2030 => 0x89,
        0x0160 => 0x8A,
        0x2039 => 0x8B,
        0x0152 => 0x8C,
        0x017D => 0x8E,
        0x2018 => 0x91,
        0x2019 => 0x92,
        0x201C => 0x93,
        0x201D => 0x94,
        0x2022 => 0x95,
        0x2013 => 0x96,
        0x2014 => 0x97,
        0x02DC => 0x98,
        0x2122 => 0x99,
        0x0161 => 0x9A,
        0x203A => 0x9B,
        0x0153 => 0x9C,
        0x017E => 0x9E,
        0x0178 => 0x9F,
        _ => return None,
    };
    Some(byte)
}

/// The text as it will appear on the page. Tabs become spaces and any char
/// WinAnsi cannot show, control characters included, becomes `?` so words
/// never vanish silently.
pub(crate) fn printable_text(s: &str) -> Cow<'_, str> {
    if s.chars().all(|c| char_to_winansi(c).is_some()) {
        return Cow::Borrowed(s);
    }
    Cow::Owned(
        s.chars()
            .map(|c| match c {
                '\t' => ' ',
                c if char_to_winansi(c).is_some() => c,
                _ => '?',
            })
            .collect(),
    )
}

/// Convert a UTF-8 string to WinAnsi (Windows-1252) bytes for a PDF string.
/// Produces one byte per char of [`printable_text`].
pub(crate) fn to_winansi_bytes(s: &str) -> Vec<u8> {
    s.chars()
        .map(|c| match c {
            '\t' => b' ',
            c => char_to_winansi(c).unwrap_or(b'?'),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swedish_letters_map_to_latin1() {
        assert_eq!(to_winansi_bytes("Möte å"), vec![b'M', 0xF6, b't', b'e', b' ', 0xE5]);
    }

    #[test]
    fn typographic_punctuation_uses_high_range() {
        assert_eq!(to_winansi_bytes("\u{2013}\u{201D}\u{20AC}"), vec![0x96, 0x94, 0x80]);
    }

    #[test]
    fn unmappable_chars_become_question_marks() {
        assert_eq!(to_winansi_bytes("a\u{4E2D}b"), b"a?b".to_vec());
        assert_eq!(to_winansi_bytes("a\u{7}\tb"), b"a? b".to_vec());
    }

    #[test]
    fn printable_text_matches_encoded_bytes() {
        assert!(matches!(printable_text("Möte å"), Cow::Borrowed(_)));
        for s in ["\u{7}", "a\u{4E2D}\tb", "ok\u{0}\u{9f}"] {
            let shown = printable_text(s);
            assert_eq!(shown.chars().count(), to_winansi_bytes(s).len());
            assert_eq!(to_winansi_bytes(&shown), to_winansi_bytes(s));
        }
        assert_eq!(printable_text("\u{7}"), "?");
        assert_eq!(printable_text("a\u{4E2D}\tb"), "a? b");
    }
}

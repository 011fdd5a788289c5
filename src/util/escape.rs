/*!
Provides convenience routines for displaying raw input bytes in error
messages.

Parsers in this crate work on `&[u8]`, and most error messages want to quote
the input that failed. Inputs are almost always UTF-8, but a parser may have
sliced one in the middle of a multi-byte codepoint, so invalid sequences are
shown as hex escapes instead of being dropped.
*/

/// Provides a convenient `Display` and `Debug` implementation for a `u8`.
///
/// ASCII bytes are shown as-is (with the usual escapes for control
/// characters), anything else as a `\xNN` escape.
#[derive(Clone, Copy)]
pub(crate) struct Byte(pub(crate) u8);

impl core::fmt::Display for Byte {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if self.0.is_ascii() {
            write!(f, "{}", char::from(self.0).escape_debug())
        } else {
            write!(f, r"\x{:02X}", self.0)
        }
    }
}

impl core::fmt::Debug for Byte {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "\"{self}\"")
    }
}

/// Provides a convenient `Display` and `Debug` implementation for `&[u8]`.
#[derive(Clone, Copy)]
pub(crate) struct Bytes<'a>(pub(crate) &'a [u8]);

impl<'a> core::fmt::Display for Bytes<'a> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        for chunk in self.0.utf8_chunks() {
            write!(f, "{}", chunk.valid().escape_debug())?;
            for &byte in chunk.invalid() {
                write!(f, r"\x{byte:02X}")?;
            }
        }
        Ok(())
    }
}

impl<'a> core::fmt::Debug for Bytes<'a> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "\"{self}\"")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes() {
        assert_eq!(r#""2024-03-05""#, format!("{:?}", Bytes(b"2024-03-05")));
        assert_eq!(r#""a\tb""#, format!("{:?}", Bytes(b"a\tb")));
        assert_eq!(r#""a\xFFb""#, format!("{:?}", Bytes(b"a\xFFb")));
        assert_eq!("☃", format!("{}", Bytes("☃".as_bytes())));
        assert_eq!(r"\xE2\x98", format!("{}", Bytes(&"☃".as_bytes()[..2])));
    }

    #[test]
    fn byte() {
        assert_eq!(r#""Z""#, format!("{:?}", Byte(b'Z')));
        assert_eq!(r"\n", format!("{}", Byte(b'\n')));
        assert_eq!(r"\xFF", format!("{}", Byte(0xFF)));
    }
}

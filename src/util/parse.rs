use crate::error::{
    util::{ParseFractionError, ParseIntError},
    Error,
};

/// Parses an `i64` number from the beginning to the end of the given slice of
/// ASCII digit characters.
///
/// If any byte in the given slice is not `[0-9]`, then this returns an error.
/// Similarly, if the number parsed does not fit into a `i64`, then this
/// returns an error. Notice that this routine does not permit parsing a
/// negative integer. (We use `i64` because everything in this crate
/// currently uses signed integers.)
#[inline(always)]
pub(crate) fn i64(bytes: &[u8]) -> Result<i64, Error> {
    if bytes.is_empty() {
        return Err(Error::from(ParseIntError::NoDigitsFound));
    }
    let mut n: i64 = 0;
    for &byte in bytes {
        if !byte.is_ascii_digit() {
            return Err(Error::from(ParseIntError::InvalidDigit(byte)));
        }
        let digit = i64::from(byte - b'0');
        n = n
            .checked_mul(10)
            .and_then(|n| n.checked_add(digit))
            .ok_or_else(|| Error::from(ParseIntError::TooBig))?;
    }
    Ok(n)
}

/// Parses up to nine ASCII digits as the fractional part of a second and
/// returns it as a number of nanoseconds.
///
/// For example, `5` is `500_000_000` and `000001` is `1_000`.
pub(crate) fn fraction(bytes: &[u8]) -> Result<i32, Error> {
    if bytes.is_empty() {
        return Err(Error::from(ParseFractionError::NoDigitsFound));
    }
    if bytes.len() > ParseFractionError::MAX_PRECISION {
        return Err(Error::from(ParseFractionError::TooManyDigits));
    }
    let mut n: i32 = 0;
    for &byte in bytes {
        if !byte.is_ascii_digit() {
            return Err(Error::from(ParseFractionError::InvalidDigit(byte)));
        }
        n = n * 10 + i32::from(byte - b'0');
    }
    for _ in bytes.len()..ParseFractionError::MAX_PRECISION {
        n *= 10;
    }
    Ok(n)
}

/// Splits the given input into two slices at the given position.
///
/// If the position is greater than the length of the slice given, then this
/// returns `None`.
#[inline(always)]
pub(crate) fn split(input: &[u8], at: usize) -> Option<(&[u8], &[u8])> {
    if at > input.len() {
        None
    } else {
        Some(input.split_at(at))
    }
}

/// Returns a function that converts two slices to an offset.
///
/// It takes the starting point as input and returns a function that, when
/// given an ending point (greater than or equal to the starting point), then
/// the corresponding pointers are subtracted and a slice spanning from the
/// start to the end is returned.
///
/// This is useful when iterating over a slice with a cursor and wanting to
/// recover the portion of the slice consumed so far.
pub(crate) fn slicer<'a>(start: &'a [u8]) -> impl Fn(&'a [u8]) -> &'a [u8] {
    move |end| {
        let consumed = start.len() - end.len();
        &start[..consumed]
    }
}

/// Returns the longest prefix of ASCII digits in `input`, along with the
/// rest of the input.
pub(crate) fn digits(input: &[u8]) -> (&[u8], &[u8]) {
    let len = input.iter().take_while(|b| b.is_ascii_digit()).count();
    input.split_at(len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_i64() {
        assert_eq!(0, i64(b"0").unwrap());
        assert_eq!(2024, i64(b"2024").unwrap());
        assert_eq!(i64::MAX, i64(b"9223372036854775807").unwrap());
        insta::assert_snapshot!(
            i64(b"9223372036854775808").unwrap_err(),
            @"number too big to parse into 64-bit integer",
        );
        insta::assert_snapshot!(
            i64(b"12a").unwrap_err(),
            @"invalid digit, expected 0-9 but got a",
        );
        insta::assert_snapshot!(
            i64(b"").unwrap_err(),
            @"invalid number, no digits found",
        );
    }

    #[test]
    fn parse_fraction() {
        assert_eq!(500_000_000, fraction(b"5").unwrap());
        assert_eq!(123_000_000, fraction(b"123").unwrap());
        assert_eq!(1_000, fraction(b"000001").unwrap());
        assert_eq!(999_999_999, fraction(b"999999999").unwrap());
        insta::assert_snapshot!(
            fraction(b"1234567890").unwrap_err(),
            @"invalid fraction, too many digits (at most 9 are allowed)",
        );
    }

    #[test]
    fn slicer_and_digits() {
        let input = b"2024-03";
        let mkslice = slicer(input);
        let (year, rest) = digits(input);
        assert_eq!(b"2024", year);
        assert_eq!(b"-03", rest);
        assert_eq!(b"2024", mkslice(rest));
    }
}

use std::sync::Arc;

pub(crate) mod civil;
pub(crate) mod fmt;
pub(crate) mod temporal;
pub(crate) mod tz;
pub(crate) mod util;

/// Creates a new ad hoc error value from `format_args!`-style arguments.
///
/// This is meant for one-off messages where a dedicated structured error
/// variant isn't worth it.
macro_rules! err {
    ($($tt:tt)*) => {{
        crate::error::Error::from_args(format_args!($($tt)*))
    }}
}

/// Creates a new parse error from `format_args!`-style arguments.
///
/// Errors created this way (or any error that has one of these in its
/// causal chain) report `true` for [`Error::is_parse`].
macro_rules! parse_err {
    ($($tt:tt)*) => {{
        crate::error::Error::from(crate::error::fmt::Error::from_args(
            format_args!($($tt)*),
        ))
    }}
}

pub(crate) use {err, parse_err};

/// An error that can occur in this crate.
///
/// Every fallible operation in this crate returns this one type. The kinds
/// of failure that can occur are:
///
/// * A field value is outside of its allowed range, e.g., a month of `13`.
/// See [`Error::is_range`].
/// * Fields that are individually valid don't form a valid date, e.g.,
/// `2023-02-29`. See [`Error::is_invalid_date`].
/// * Text could not be parsed. See [`Error::is_parse`].
/// * A civil datetime could not be resolved to a single instant in a time
/// zone because it falls in a gap or a fold and the policy in use rejects
/// that. See [`Error::is_unresolved`].
/// * Arithmetic overflowed the supported range. See [`Error::is_overflow`].
/// * A field or unit was used with a type that doesn't support it. See
/// [`Error::is_unsupported`].
/// * A time zone identifier isn't known. See [`Error::is_zone_lookup`].
///
/// # Design
///
/// Errors are a single pointer wide. They are cheap to clone and carry an
/// optional causal chain. The `Display` impl prints the full chain, with the
/// highest level context first, separated by `: `. The predicates all
/// inspect the root cause (the last error in the chain), except for
/// [`Error::is_parse`], which reports whether any error in the chain came
/// from a parser.
#[derive(Clone)]
pub struct Error {
    inner: Arc<ErrorInner>,
}

#[derive(Debug)]
struct ErrorInner {
    kind: ErrorKind,
    cause: Option<Error>,
}

impl Error {
    /// Creates a new error value from `core::fmt::Arguments`.
    ///
    /// Callers should generally use their own error types. But in some
    /// circumstances, it can be convenient to manufacture an error value
    /// specifically.
    ///
    /// # Example
    ///
    /// ```
    /// use calends::Error;
    ///
    /// let err = Error::from_args(format_args!("something failed"));
    /// assert_eq!(err.to_string(), "something failed");
    /// ```
    pub fn from_args<'a>(message: core::fmt::Arguments<'a>) -> Error {
        Error::from(ErrorKind::Adhoc(AdhocError::from_args(message)))
    }

    /// Returns true when this error originated from a field value that is
    /// out of its allowed range.
    ///
    /// # Example
    ///
    /// ```
    /// use calends::civil::Date;
    ///
    /// assert!(Date::new(2025, 13, 1).unwrap_err().is_range());
    /// ```
    pub fn is_range(&self) -> bool {
        matches!(*self.root().kind(), ErrorKind::Range(_))
    }

    /// Returns true when this error originated from fields that are each
    /// valid on their own but don't form a valid date together.
    ///
    /// # Example
    ///
    /// ```
    /// use calends::civil::Date;
    ///
    /// assert!(Date::new(2023, 2, 29).unwrap_err().is_invalid_date());
    /// assert!("2023-02-29".parse::<Date>().unwrap_err().is_invalid_date());
    /// ```
    pub fn is_invalid_date(&self) -> bool {
        matches!(*self.root().kind(), ErrorKind::Civil(_))
    }

    /// Returns true when any error in this chain was produced while parsing
    /// text.
    ///
    /// # Example
    ///
    /// ```
    /// use calends::civil::Date;
    ///
    /// assert!("2024/03/05".parse::<Date>().unwrap_err().is_parse());
    /// // The root cause here is an invalid date, but it was still found
    /// // while parsing.
    /// assert!("2023-02-29".parse::<Date>().unwrap_err().is_parse());
    /// ```
    pub fn is_parse(&self) -> bool {
        self.chain().any(|err| {
            matches!(
                *err.kind(),
                ErrorKind::Fmt(_)
                    | ErrorKind::ParseInt(_)
                    | ErrorKind::ParseFraction(_)
            )
        })
    }

    /// Returns true when this error originated from a civil datetime that
    /// could not be resolved to a single instant in a time zone.
    pub fn is_unresolved(&self) -> bool {
        matches!(*self.root().kind(), ErrorKind::TzAmbiguous(_))
    }

    /// Returns true when this error originated from arithmetic that
    /// overflowed the supported range of a value, or that divided by zero.
    ///
    /// # Example
    ///
    /// ```
    /// use calends::civil::Date;
    ///
    /// assert!(Date::MAX.checked_add_days(1).unwrap_err().is_overflow());
    /// ```
    pub fn is_overflow(&self) -> bool {
        matches!(*self.root().kind(), ErrorKind::Arithmetic(_))
    }

    /// Returns true when this error originated from using a field or unit
    /// with a value that doesn't support it.
    pub fn is_unsupported(&self) -> bool {
        use self::temporal::Error::*;

        matches!(
            *self.root().kind(),
            ErrorKind::Temporal(UnsupportedField { .. } | UnsupportedUnit { .. })
        )
    }

    /// Returns true when this error originated from an unknown time zone
    /// identifier.
    pub fn is_zone_lookup(&self) -> bool {
        matches!(
            *self.root().kind(),
            ErrorKind::Tz(self::tz::Error::NotFound { .. })
        )
    }

    /// Returns true when this error originated from an invalid parameter
    /// given to a function, e.g., dividing a duration by zero.
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(
            *self.root().kind(),
            ErrorKind::Arithmetic(
                self::util::ArithmeticError::DivideByZero { .. }
            ) | ErrorKind::Temporal(self::temporal::Error::InvalidRange { .. })
                | ErrorKind::Temporal(
                    self::temporal::Error::InvalidWeekFields { .. }
                )
        )
    }
}

impl Error {
    /// Creates a new error indicating that a `given` value is out of the
    /// specified `min..=max` range. The given `what` label is used in the
    /// error message as a human readable description of what exactly is out
    /// of range. (e.g., "seconds")
    #[inline(never)]
    #[cold]
    pub(crate) fn range(
        what: &'static str,
        given: impl Into<i128>,
        min: impl Into<i128>,
        max: impl Into<i128>,
    ) -> Error {
        Error::from(ErrorKind::Range(RangeError::new(what, given, min, max)))
    }

    /// Creates a new error indicating that arithmetic on `what` overflowed.
    #[inline(never)]
    #[cold]
    pub(crate) fn overflow(what: &'static str) -> Error {
        Error::from(self::util::ArithmeticError::Overflow { what })
    }

    #[inline(never)]
    #[cold]
    pub(crate) fn context(self, consequent: impl IntoError) -> Error {
        self.context_impl(consequent.into_error())
    }

    #[inline(never)]
    #[cold]
    fn context_impl(self, consequent: Error) -> Error {
        let mut err = consequent;
        // Clone the kind into a fresh allocation when the consequent is
        // shared, so attaching a cause never mutates someone else's error.
        let inner = match Arc::get_mut(&mut err.inner) {
            Some(inner) => inner,
            None => {
                return Error::from(ErrorKind::Adhoc(AdhocError {
                    message: err.to_string().into_boxed_str(),
                }))
                .context_impl_fresh(self);
            }
        };
        assert!(inner.cause.is_none(), "cause of consequence must be `None`");
        inner.cause = Some(self);
        err
    }

    fn context_impl_fresh(mut self, cause: Error) -> Error {
        // OK because we just created this error so the Arc has one
        // reference.
        Arc::get_mut(&mut self.inner).unwrap().cause = Some(cause);
        self
    }

    /// Returns the root error in this chain.
    fn root(&self) -> &Error {
        // OK because `Error::chain` is guaranteed to return a non-empty
        // iterator.
        self.chain().last().unwrap()
    }

    /// Returns a chain of error values.
    ///
    /// This starts with the most recent error added to the chain. That is,
    /// the highest level context. The last error in the chain is always the
    /// "root" cause. That is, the error closest to the point where something
    /// has gone wrong.
    ///
    /// The iterator returned is guaranteed to yield at least one error.
    fn chain(&self) -> impl Iterator<Item = &Error> {
        let mut err = self;
        core::iter::once(err).chain(core::iter::from_fn(move || {
            err = err.inner.cause.as_ref()?;
            Some(err)
        }))
    }

    /// Returns the kind of this error.
    fn kind(&self) -> &ErrorKind {
        &self.inner.kind
    }
}

impl std::error::Error for Error {}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let mut it = self.chain().peekable();
        while let Some(err) = it.next() {
            core::fmt::Display::fmt(err.kind(), f)?;
            if it.peek().is_some() {
                f.write_str(": ")?;
            }
        }
        Ok(())
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if !f.alternate() {
            core::fmt::Display::fmt(self, f)
        } else {
            f.debug_struct("Error")
                .field("kind", &self.inner.kind)
                .field("cause", &self.inner.cause)
                .finish()
        }
    }
}

/// The underlying kind of a [`Error`].
#[derive(Debug)]
enum ErrorKind {
    Adhoc(AdhocError),
    Arithmetic(self::util::ArithmeticError),
    Civil(self::civil::Error),
    Fmt(self::fmt::Error),
    ParseInt(self::util::ParseIntError),
    ParseFraction(self::util::ParseFractionError),
    Range(RangeError),
    Temporal(self::temporal::Error),
    Tz(self::tz::Error),
    TzAmbiguous(self::tz::AmbiguousError),
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ErrorKind::*;

        match *self {
            Adhoc(ref msg) => msg.fmt(f),
            Arithmetic(ref err) => err.fmt(f),
            Civil(ref err) => err.fmt(f),
            Fmt(ref err) => err.fmt(f),
            ParseInt(ref err) => err.fmt(f),
            ParseFraction(ref err) => err.fmt(f),
            Range(ref err) => err.fmt(f),
            Temporal(ref err) => err.fmt(f),
            Tz(ref err) => err.fmt(f),
            TzAmbiguous(ref err) => err.fmt(f),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error { inner: Arc::new(ErrorInner { kind, cause: None }) }
    }
}

/// A generic error message.
///
/// This supports the `Error::from_args` public API, which permits users to
/// manifest their own `Error` values from an arbitrary message. It is also
/// used internally for one-off context messages.
struct AdhocError {
    message: Box<str>,
}

impl AdhocError {
    fn from_args<'a>(message: core::fmt::Arguments<'a>) -> AdhocError {
        AdhocError { message: message.to_string().into_boxed_str() }
    }
}

impl core::fmt::Display for AdhocError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.message, f)
    }
}

impl core::fmt::Debug for AdhocError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Debug::fmt(&self.message, f)
    }
}

/// An error that occurs when an input value is out of bounds.
///
/// The error message produced by this type will include a name describing
/// which input was out of bounds, the value given and its minimum and maximum
/// allowed values.
#[derive(Debug)]
struct RangeError {
    what: &'static str,
    given: i128,
    min: i128,
    max: i128,
}

impl RangeError {
    fn new(
        what: &'static str,
        given: impl Into<i128>,
        min: impl Into<i128>,
        max: impl Into<i128>,
    ) -> RangeError {
        RangeError { what, given: given.into(), min: min.into(), max: max.into() }
    }
}

impl core::fmt::Display for RangeError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let RangeError { what, given, min, max } = *self;
        write!(
            f,
            "parameter '{what}' with value {given} \
             is not in the required range of {min}..={max}",
        )
    }
}

/// A simple trait to encapsulate automatic conversion to `Error`.
///
/// This trait basically exists to make `Error::context` work without needing
/// to rely on public `From` impls.
pub(crate) trait IntoError {
    fn into_error(self) -> Error;
}

impl IntoError for Error {
    #[inline(always)]
    fn into_error(self) -> Error {
        self
    }
}

impl IntoError for &'static str {
    #[inline(always)]
    fn into_error(self) -> Error {
        Error::from_args(format_args!("{self}"))
    }
}

/// A trait for contextualizing error values.
///
/// This makes it easy to contextualize either `Error` or `Result<T, Error>`.
/// Specifically, in the latter case, it absolves one of the need to call
/// `map_err` everywhere one wants to add context to an error.
///
/// This trick was borrowed from `anyhow`.
pub(crate) trait ErrorContext<T> {
    /// Contextualize the given consequent error with this (`self`) error as
    /// the cause.
    ///
    /// This is equivalent to saying that "consequent is caused by self."
    fn context(self, consequent: impl IntoError) -> Result<T, Error>;

    /// Like `context`, but hides error construction within a closure.
    ///
    /// This is useful when the creation of the consequent error allocates,
    /// since the closure avoids paying that cost in the happy path.
    fn with_context<C: IntoError>(
        self,
        consequent: impl FnOnce() -> C,
    ) -> Result<T, Error>;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: IntoError,
{
    fn context(self, consequent: impl IntoError) -> Result<T, Error> {
        self.map_err(|err| {
            err.into_error().context_impl(consequent.into_error())
        })
    }

    fn with_context<C: IntoError>(
        self,
        consequent: impl FnOnce() -> C,
    ) -> Result<T, Error> {
        self.map_err(|err| {
            err.into_error().context_impl(consequent().into_error())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // We test that our 'Error' type is the size we expect. This isn't an API
    // guarantee, but if the size increases, we really want to make sure we
    // decide to do that intentionally. So this should be a speed bump.
    #[test]
    fn error_size() {
        let expected_size = core::mem::size_of::<usize>();
        assert_eq!(expected_size, core::mem::size_of::<Error>());
    }

    #[test]
    fn chain_display() {
        let root = Error::range("month", 13, 1, 12);
        let err = root.context(err!("failed to build date"));
        insta::assert_snapshot!(
            err,
            @"failed to build date: parameter 'month' with value 13 is not in the required range of 1..=12",
        );
        assert!(err.is_range());
        assert!(!err.is_parse());
    }

    #[test]
    fn parse_anywhere_in_chain() {
        let root = Error::range("day", 32, 1, 31);
        let err = root.context(parse_err!("failed to parse \"2024-01-32\""));
        assert!(err.is_parse());
        assert!(err.is_range());
    }

    #[test]
    fn context_on_shared_consequent() {
        let consequent = err!("shared");
        let keep = consequent.clone();
        let err = Error::overflow("days").context(consequent);
        insta::assert_snapshot!(err, @"shared: arithmetic on days overflowed");
        insta::assert_snapshot!(keep, @"shared");
        assert!(err.is_overflow());
    }
}

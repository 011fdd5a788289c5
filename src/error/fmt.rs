use crate::error;

/// An error that occurred while parsing text.
///
/// Parsers produce a lot of distinct messages that only ever get shown to
/// humans, so this just carries the rendered message. Use the `parse_err!`
/// macro to build one.
#[derive(Clone, Debug)]
pub(crate) struct Error {
    message: Box<str>,
}

impl Error {
    pub(crate) fn from_args<'a>(message: core::fmt::Arguments<'a>) -> Error {
        Error { message: message.to_string().into_boxed_str() }
    }
}

impl From<Error> for error::Error {
    #[cold]
    #[inline(never)]
    fn from(err: Error) -> error::Error {
        error::ErrorKind::Fmt(err).into()
    }
}

impl error::IntoError for Error {
    fn into_error(self) -> error::Error {
        self.into()
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(&self.message)
    }
}

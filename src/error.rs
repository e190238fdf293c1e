/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

use std::{error::Error as StdError, fmt};

/// Result typedef used throughout this library's public API
pub type Result<T> = std::result::Result<T, Error>;

/// Opaque type representing all possible errors which can
/// occur during library usage.
pub struct Error
{
    inner: Box<internal::Error>,
}

impl Error
{
    /// The line at which the error occurred (1 indexed).
    pub fn line(&self) -> usize
    {
        self.inner.line
    }

    /// The column into the line where the error occurred.
    pub fn column(&self) -> usize
    {
        self.inner.column
    }

    /// The index into the byte stream at which the error
    /// occurred.
    pub fn at(&self) -> usize
    {
        self.inner.at
    }

    /// The name of the stream the error occurred in, if one
    /// was provided by the caller.
    pub fn filename(&self) -> Option<&str>
    {
        self.inner.filename.as_deref()
    }

    /// Categorize the error into one of the following:
    ///
    /// - [`Category::Syntax`] The YAML stream was
    ///   syntactically invalid
    /// - [`Category::Data`] The stream contained data that
    ///   could not be interpreted, including non UTF-8
    ///   byte sequences
    /// - [`Category::EOF`] The YAML stream ended
    ///   unexpectedly
    /// - [`Category::Alias`] An alias was used, resolved or
    ///   emitted where not permitted
    /// - [`Category::Disallowed`] A tag outside the
    ///   caller's allow-list was encountered
    /// - [`Category::Internal`] An internal invariant was
    ///   violated; indicates a bug in this library, not in
    ///   the caller's input
    pub fn classify(&self) -> Category
    {
        self.inner.classify()
    }

    /// Checks whether this error was contextualized.
    ///
    /// If this method returns false then the methods
    ///
    /// - [`at()`](#method.at)
    /// - [`column()`](#method.column)
    /// - [`line()`](#method.line)
    ///
    /// will return meaningless values.
    pub fn has_context(&self) -> bool
    {
        self.inner.has_context()
    }

    /// Boxes the internal error, returning new public error
    /// type
    pub(crate) fn new(err: internal::Error) -> Self
    {
        Self {
            inner: Box::new(err),
        }
    }

    /// Attach a stream name to this error, unless one has
    /// already been recorded.
    pub(crate) fn with_filename(mut self, filename: Option<&str>) -> Self
    {
        if self.inner.filename.is_none()
        {
            self.inner.filename = filename.map(Into::into);
        }

        self
    }
}

/// Rough category of an [`Error`].
///
/// Useful for making decisions upon encountering an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category
{
    /// The YAML stream was not syntactically valid
    Syntax,

    /// There was an issue with the data contained in the
    /// stream (e.g: it was not UTF-8)
    Data,

    /// The YAML stream unexpectedly terminated before it
    /// was appropriate to do so
    EOF,

    /// An alias was used where aliases are not permitted,
    /// or could not be resolved
    Alias,

    /// A tag outside the configured allow-list was found
    Disallowed,

    /// The library violated one of its own invariants
    Internal,
}

pub(crate) mod internal
{
    use std::{error::Error as StdError, fmt, str::Utf8Error};

    use super::Category;

    /// Internal error representation used throughout the
    /// library.
    ///
    /// Contains enough metadata about the position of the
    /// error that we can contextualize it later
    pub(crate) struct Error
    {
        /// Error variant encountered
        pub kind:     ErrorKind,
        /// Position in the byte stream that the error
        /// occurred
        pub at:       usize,
        /// Line number of the error (1 indexed)
        pub line:     usize,
        /// Offset into current line the error occurred at
        pub column:   usize,
        /// Name of the stream, if the caller provided one
        pub filename: Option<String>,
    }

    impl Error
    {
        /// Create a new, contextless [`Error`].
        ///
        /// Care should be taken to later apply context, if
        /// at all possible.
        pub fn new<T>(err: T) -> Self
        where
            T: Into<ErrorKind>,
        {
            Self::with_context(err, 0, 0, 0)
        }

        /// Create a new, contextualized [`Error`].
        pub fn with_context<T>(err: T, at: usize, line: usize, column: usize) -> Self
        where
            T: Into<ErrorKind>,
        {
            let kind = err.into();

            Self {
                kind,
                at,
                line,
                column,
                filename: None,
            }
        }

        /// Add context to this error, replacing the
        /// existing context (if any exists).
        pub fn context(&mut self, at: usize, line: usize, column: usize) -> &mut Self
        {
            self.at = at;
            self.line = line;
            self.column = column;

            self
        }

        /// Checks whether this error is contextualized
        pub fn has_context(&self) -> bool
        {
            // Only errors created without context will have a line
            // number of 0
            self.line != 0
        }

        /// Categorize this error
        pub fn classify(&self) -> Category
        {
            Into::into(&self.kind)
        }
    }

    /// Unified wrapper around the actual error variants we
    /// can produce
    #[derive(Debug)]
    pub(crate) enum ErrorKind
    {
        Code(ErrorCode),
        Source(SourceError),
    }

    /// Lightweight errors, specific to this library.
    ///
    /// This enum should never be polluted with large
    /// variants, or wrap underlying errors. Use
    /// [`SourceError`] for those.
    ///
    /// Library hot-paths should be able to return this
    /// without adversely affecting the speed of unwinding
    /// up the stack.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub(crate) enum ErrorCode
    {
        /*
         * ==== Grammar Errors ====
         */
        /// Got end of stream while a production still
        /// required input
        UnexpectedEOF,

        /// The grammar completed without consuming the
        /// whole stream.
        ///
        /// ## Examples
        ///
        /// ```yaml
        /// - 1
        /// - 2
        ///  bad: indent # <- no production consumes this
        /// ```
        TrailingContent,

        /// Directive was not either YAML or TAG
        UnknownDirective,

        /// A %YAML directive's version was missing or was
        /// not dotted digits
        InvalidVersion,

        /// More than one `%YAML` directive was found inside
        /// a single document's context.
        ///
        /// ## Examples
        ///
        /// ```yaml
        /// %YAML 1.2
        /// %YAML 1.2
        /// #^^^^^^^^ DuplicateVersion
        /// ---
        /// ```
        DuplicateVersion,

        /// More than one `%TAG` directive was found _for
        /// the same handle_ inside a single document's
        /// context.
        ///
        /// ## Examples
        ///
        /// ```yaml
        /// %TAG !handle! my:custom:tag/
        /// %TAG !handle! my:other:tag/
        /// #    ^^^^^^^^ DuplicateTagDirective
        /// ---
        /// ```
        DuplicateTagDirective,

        /// Directives were seen, but no `---` followed them
        MissingDocumentStart,

        /// Tag handle was not primary (!), secondary (!!)
        /// or named (!alphanumeric!)
        InvalidTagHandle,

        /// A node tag referenced a handle that has no %TAG
        /// directive.
        ///
        /// ## Examples
        ///
        /// ```yaml
        /// key: !handle!suffix value
        /// #    ^^^^^^^^ UndefinedTagHandle
        /// ```
        UndefinedTagHandle,

        /// Tag suffix (or verbatim tag body) was invalid
        InvalidTagSuffix,

        /// An anchor (&) or alias (*)'s name was invalid
        InvalidAnchorName,

        /// A quoted scalar was not terminated before the
        /// stream ended
        UnterminatedScalar,

        /// A flow scalar contained a character sequence
        /// that is not permitted
        InvalidFlowScalar,

        /// A block scalar contained a character sequence
        /// that is not permitted
        InvalidBlockScalar,

        /// A character that was not valid for the escape
        /// sequence was encountered
        UnknownEscape,

        /// A block scalar header was malformed, or a
        /// leading empty line was deeper than the detected
        /// indentation
        InvalidBlockHeader,

        /// A YAML flow sequence was missing a terminus
        /// (']') or continuation (',') symbol.
        ///
        /// ## Examples
        ///
        /// ```yaml
        /// missing terminus: [1, 2, 3
        /// #                         ^ MissingFlowSequenceEntryOrEnd
        /// ```
        MissingFlowSequenceEntryOrEnd,

        /// A YAML flow mapping was missing a terminus ('}')
        /// or continuation (',') symbol.
        ///
        /// ## Examples
        ///
        /// ```yaml
        /// missing terminus: {key1: value, key2: value
        /// #                                          ^ MissingFlowMappingEntryOrEnd
        /// ```
        MissingFlowMappingEntryOrEnd,

        /// Document content was nested deeper than the
        /// stack safe recursion limit
        RecursionLimitExceeded,

        /// An integer overflowed
        IntOverflow,
    }

    /// Heavy and/or external errors that can occur during
    /// library usage
    #[derive(Debug)]
    pub(crate) enum SourceError
    {
        /// Encountered an invalid UTF8 sequence
        UTF8(Utf8Error),

        /// An alias was emitted, or resolved, where that
        /// was not permitted; carries the offending anchor
        /// name
        BadAlias(String),

        /// A node carried a tag outside the configured
        /// allow-list; carries the offending tag
        DisallowedTag(String),

        /// An internal invariant did not hold; carries a
        /// description of the broken invariant
        Internal(&'static str),
    }

    impl fmt::Debug for Error
    {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
        {
            let mut this = f.debug_struct("Error");

            this.field("kind", &self.kind);

            if self.has_context()
            {
                this.field("line", &self.line)
                    .field("column", &self.column)
                    .field("index", &self.at);
            }

            if let Some(filename) = &self.filename
            {
                this.field("filename", filename);
            }

            this.finish()
        }
    }

    impl fmt::Display for Error
    {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
        {
            use fmt::Display;

            if self.has_context()
            {
                match &self.filename
                {
                    Some(name) => f.write_fmt(format_args!(
                        "{}, in {}, on line {}, column {}, at index {}",
                        self.kind, name, self.line, self.column, self.at
                    )),
                    None => f.write_fmt(format_args!(
                        "{}, on line {}, column {}, at index {}",
                        self.kind, self.line, self.column, self.at
                    )),
                }
            }
            else
            {
                Display::fmt(&self.kind, f)
            }
        }
    }

    impl StdError for Error
    {
        fn source(&self) -> Option<&(dyn StdError + 'static)>
        {
            StdError::source(&self.kind)
        }
    }

    impl From<Error> for super::Error
    {
        fn from(err: Error) -> Self
        {
            Self::new(err)
        }
    }

    impl<T> From<T> for Error
    where
        T: Into<ErrorKind>,
    {
        fn from(t: T) -> Self
        {
            Error::new(t.into())
        }
    }

    impl From<&'_ ErrorKind> for Category
    {
        fn from(kind: &'_ ErrorKind) -> Self
        {
            match kind
            {
                ErrorKind::Code(e) => e.into(),
                ErrorKind::Source(e) => e.into(),
            }
        }
    }

    impl fmt::Display for ErrorKind
    {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
        {
            match self
            {
                ErrorKind::Code(ref e) => fmt::Display::fmt(e, f),
                ErrorKind::Source(ref e) => fmt::Display::fmt(e, f),
            }
        }
    }

    impl StdError for ErrorKind {}

    impl From<ErrorCode> for ErrorKind
    {
        fn from(e: ErrorCode) -> Self
        {
            ErrorKind::Code(e)
        }
    }

    impl From<SourceError> for ErrorKind
    {
        fn from(e: SourceError) -> Self
        {
            ErrorKind::Source(e)
        }
    }

    impl From<ErrorCode> for Category
    {
        fn from(code: ErrorCode) -> Self
        {
            use ErrorCode::*;

            match code
            {
                TrailingContent
                | UnknownDirective
                | InvalidVersion
                | DuplicateVersion
                | DuplicateTagDirective
                | MissingDocumentStart
                | InvalidTagHandle
                | UndefinedTagHandle
                | InvalidTagSuffix
                | InvalidAnchorName
                | UnterminatedScalar
                | InvalidFlowScalar
                | InvalidBlockScalar
                | UnknownEscape
                | InvalidBlockHeader
                | MissingFlowSequenceEntryOrEnd
                | MissingFlowMappingEntryOrEnd
                | RecursionLimitExceeded => Category::Syntax,

                IntOverflow => Category::Data,

                UnexpectedEOF => Category::EOF,
            }
        }
    }

    impl From<&'_ ErrorCode> for Category
    {
        fn from(code: &'_ ErrorCode) -> Self
        {
            From::from(*code)
        }
    }

    impl fmt::Display for ErrorCode
    {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
        {
            use ErrorCode::*;

            match self
            {
                UnexpectedEOF => f.write_str("unexpected EOF"),
                TrailingContent => f.write_str("parser finished before end of input"),
                UnknownDirective => f.write_str("unknown YAML directive"),
                InvalidVersion => f.write_str("%YAML directive is invalid"),
                DuplicateVersion => f.write_str("duplicate %YAML directive found in a document"),
                DuplicateTagDirective =>
                {
                    f.write_str("duplicate %TAG directive for a handle found in a document")
                },
                MissingDocumentStart =>
                {
                    f.write_str("expected a '---' document start after directives")
                },
                InvalidTagHandle =>
                {
                    f.write_str("node tag handle is not one of !, !!, or ![a-zA-Z0-9]+!")
                },
                UndefinedTagHandle => f.write_str("node tag references an undefined handle"),
                InvalidTagSuffix => f.write_str("node tag suffix is invalid"),
                InvalidAnchorName =>
                {
                    f.write_str("node anchor or alias contains invalid characters")
                },
                UnterminatedScalar => f.write_str("quoted scalar was never terminated"),
                InvalidFlowScalar => f.write_str("flow scalar contains invalid characters"),
                InvalidBlockScalar => f.write_str("block scalar contains invalid characters"),
                UnknownEscape => f.write_str("unknown escape sequence"),
                InvalidBlockHeader => f.write_str("block scalar header is invalid"),
                MissingFlowSequenceEntryOrEnd =>
                {
                    f.write_str("missing flow sequence delimiter ',' or ']'")
                },
                MissingFlowMappingEntryOrEnd =>
                {
                    f.write_str("missing flow mapping delimiter ',' or '}'")
                },
                RecursionLimitExceeded => f.write_str("nesting exceeded the recursion limit"),
                IntOverflow => f.write_str("integer overflow while parsing"),
            }
        }
    }

    impl StdError for ErrorCode {}

    impl From<&'_ SourceError> for Category
    {
        fn from(err: &'_ SourceError) -> Self
        {
            match err
            {
                SourceError::UTF8(_) => Category::Data,
                SourceError::BadAlias(_) => Category::Alias,
                SourceError::DisallowedTag(_) => Category::Disallowed,
                SourceError::Internal(_) => Category::Internal,
            }
        }
    }

    impl fmt::Display for SourceError
    {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
        {
            match self
            {
                SourceError::UTF8(ref e) => fmt::Display::fmt(e, f),
                SourceError::BadAlias(name) =>
                {
                    f.write_fmt(format_args!("alias '{}' is not permitted here", name))
                },
                SourceError::DisallowedTag(tag) =>
                {
                    f.write_fmt(format_args!("tag '{}' is not in the allow-list", tag))
                },
                SourceError::Internal(what) =>
                {
                    f.write_fmt(format_args!("internal invariant violated: {}", what))
                },
            }
        }
    }

    impl StdError for SourceError
    {
        fn source(&self) -> Option<&(dyn StdError + 'static)>
        {
            match self
            {
                SourceError::UTF8(e) => Some(e),
                _ => None,
            }
        }
    }

    impl From<Utf8Error> for SourceError
    {
        fn from(e: Utf8Error) -> Self
        {
            SourceError::UTF8(e)
        }
    }
}

impl fmt::Debug for Error
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        fmt::Debug::fmt(&self.inner, f)
    }
}

impl fmt::Display for Error
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        fmt::Display::fmt(&self.inner, f)
    }
}

impl StdError for Error
{
    fn source(&self) -> Option<&(dyn StdError + 'static)>
    {
        StdError::source(&self.inner)
    }
}

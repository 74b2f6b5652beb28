use std::fmt;

#[allow(unused_macros)]
macro_rules! err {
    ($base:ident, $msg:literal) => {
        DexError::with_context($base, $msg.to_string())
    };
    ($base:ident, $fmtstr:literal, $($args:tt)*) => {
        DexError::with_context($base, format!($fmtstr, $($args)*))
    };
    ($msg:literal) => {
        DexError::new($msg)
    };
    ($fmtstr:literal, $($args:tt)*) => {
        DexError::new(&format!($fmtstr, $($args)*))
    };
}

/// Early-return a `MalformedInput` error from the enclosing function.
#[macro_export]
macro_rules! fail {
    ($msg:literal) => {
        return Err($crate::dex::error::DexError::new($msg))
    };
    (($msg:literal), ($context:literal)) => {
        return Err($crate::dex::error::DexError::with_context($crate::dex::error::DexError::new($msg), $context.to_string()))
    };
    ($fmtstr:literal, $($args:tt)*) => {
        return Err($crate::dex::error::DexError::new(&format!($fmtstr, $($args)*)))
    };
    (($fmtstr:literal, $($args:tt)*), ($contextfmt:literal, $($contextargs:tt)*)) => {
        return Err($crate::dex::error::DexError::with_context($crate::dex::error::DexError::new(&format!($fmtstr, $($args)*)), format!($contextfmt, $($contextargs)*)))
    };
}

/// Broad classification of a [`DexError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DexErrorKind
{
    /// Structurally invalid bytes: bad magic, truncated pool, out-of-range id, truncated instruction.
    MalformedInput,
    /// A recognised container whose format version this crate does not handle.
    UnsupportedVersion,
    /// An internal consistency check failed while building the analysis graph.
    InvariantViolation,
    /// The caller aborted the operation through a cancellation token.
    Cancelled,
}

impl fmt::Display for DexErrorKind
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        let s = match self {
            DexErrorKind::MalformedInput => "malformed input",
            DexErrorKind::UnsupportedVersion => "unsupported version",
            DexErrorKind::InvariantViolation => "invariant violation",
            DexErrorKind::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DexError
{
    kind: DexErrorKind,
    msg: String,
    contexts: Vec<String>,
}

impl DexError
{
    /// A `MalformedInput` error, the default for anything the parser rejects.
    pub(crate) fn new(msg: &str) -> Self
    {
        DexError::of_kind(DexErrorKind::MalformedInput, msg)
    }

    pub(crate) fn of_kind(kind: DexErrorKind, msg: &str) -> Self
    {
        DexError {
            kind,
            msg: msg.to_string(),
            contexts: Vec::new(),
        }
    }

    pub(crate) fn unsupported(msg: &str) -> Self
    {
        DexError::of_kind(DexErrorKind::UnsupportedVersion, msg)
    }

    pub(crate) fn invariant(msg: &str) -> Self
    {
        DexError::of_kind(DexErrorKind::InvariantViolation, msg)
    }

    pub(crate) fn cancelled() -> Self
    {
        DexError::of_kind(DexErrorKind::Cancelled, "operation cancelled")
    }

    pub(crate) fn with_context(base: DexError, context: String) -> Self
    {
        let mut contexts = base.contexts;
        contexts.push(context);
        DexError { kind: base.kind, msg: base.msg, contexts }
    }

    pub fn kind(&self) -> DexErrorKind
    {
        self.kind
    }

    pub fn message(&self) -> &str
    {
        &self.msg
    }
}

impl fmt::Display for DexError
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        write!(f, "{}: {}", self.kind, self.msg)?;
        let mut connector = " for ";
        for context in &self.contexts
        {
            write!(f, "{}{}", connector, context)?;
            connector = " of ";
        }
        Ok(())
    }
}

impl std::error::Error for DexError {}

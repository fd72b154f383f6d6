use thiserror::Error;

/// Errors raised by the fixed-function pipeline.
///
/// Like GL's error flag, an implementation keeps the first error it sees and
/// ignores the offending command; callers poll it with `Gl::take_error`.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlError {
    #[error("matrix stack overflow (depth {0})")]
    StackOverflow(usize),
    #[error("matrix stack underflow")]
    StackUnderflow,
    #[error("invalid operation: {0}")]
    InvalidOperation(&'static str),
}

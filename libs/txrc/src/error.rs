use miette::Diagnostic;
use thiserror::Error;

/// Failures while taking a binary container apart.
#[derive(Error, Diagnostic, Debug)]
pub enum ContainerError {
    #[error("container is too small (must be at least {expected:?} bytes, received {received:?} bytes)")]
    #[diagnostic(code(libtxrc::container_size_error))]
    TooSmall { expected: usize, received: usize },

    #[error("plaintext header region ends at {end:?}, past the container size {size:?}")]
    #[diagnostic(code(libtxrc::header_bounds_error))]
    HeaderOutOfBounds { end: usize, size: usize },

    #[error("section bounds are invalid (table at {table:?}, text at {text:?}, container is {size:?} bytes)")]
    #[diagnostic(code(libtxrc::section_bounds_error))]
    SectionOutOfBounds {
        table: usize,
        text: usize,
        size: usize,
    },

    #[error("pointer table size is not a multiple of 4 (received {size:?} bytes)")]
    #[diagnostic(code(libtxrc::slot_count_error))]
    SlotCountMismatch { size: usize },

    #[error("error converting an offset value")]
    #[diagnostic(code(libtxrc::integer_overflow_error))]
    IntegerOverflow,
}

/// Failures while turning the text document back into a container.
#[derive(Error, Diagnostic, Debug)]
pub enum DocumentError {
    #[error("document is missing the {marker:?} section")]
    #[diagnostic(code(libtxrc::missing_section_error))]
    MissingSection { marker: &'static str },

    #[error("section opened but never closed with {marker:?}")]
    #[diagnostic(code(libtxrc::unterminated_section_error))]
    UnterminatedSection { marker: &'static str },

    #[error("line is not valid hexadecimal: {line:?}")]
    #[diagnostic(code(libtxrc::bad_hex_error))]
    BadHexLine { line: String },

    #[error("header block is too small (must be at least {expected:?} bytes, received {received:?} bytes)")]
    #[diagnostic(code(libtxrc::header_size_error))]
    HeaderTooSmall { expected: usize, received: usize },

    #[error("index {index:?} has no matching text entry (only {entries:?} present)")]
    #[diagnostic(code(libtxrc::index_range_error))]
    IndexOutOfRange { index: usize, entries: usize },

    #[error("assembled container does not fit a 32-bit offset field ({size:?} bytes)")]
    #[diagnostic(code(libtxrc::container_size_error))]
    ContainerTooLarge { size: usize },
}

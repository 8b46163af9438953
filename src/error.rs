use miette::Diagnostic;
use thiserror::Error;

/// Main error type for knots operations
#[derive(Error, Diagnostic, Debug)]
pub enum KnotError {
    #[error("IO error: {0}")]
    #[diagnostic(code(knots::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(knots::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Could not decode image: {message}")]
    #[diagnostic(code(knots::decode))]
    Decode {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Could not encode image: {message}")]
    #[diagnostic(code(knots::encode))]
    Encode { message: String },

    #[error("Parse error: {message}")]
    #[diagnostic(code(knots::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Invalid colour: {0}")]
    #[diagnostic(
        code(knots::colour),
        help("Use exactly six hex digits, e.g. #1a2b3c")
    )]
    InvalidColour(String),

    #[error("Invalid grid dimensions {cols}x{rows}")]
    #[diagnostic(
        code(knots::dimensions),
        help("Both rows and cols must be at least 1")
    )]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("Grid is {actual_cols}x{actual_rows} but the store expects {cols}x{rows}")]
    #[diagnostic(code(knots::dimensions))]
    DimensionMismatch {
        rows: usize,
        cols: usize,
        actual_rows: usize,
        actual_cols: usize,
    },

    #[error("A {cols}x{rows} grid at {cell_size}px per knot is too large to render")]
    #[diagnostic(code(knots::render), help("Use a smaller --cell-size"))]
    ImageTooLarge {
        rows: usize,
        cols: usize,
        cell_size: u32,
    },

    #[error("Opacity must be in (0, 1], got {0}")]
    #[diagnostic(code(knots::opacity))]
    InvalidOpacity(f32),

    /// Median-cut was asked for the mean of zero pixels.
    #[error("Cannot average an empty colour sample")]
    #[diagnostic(
        code(knots::quantize::empty_sample),
        help("The source image produced no pixels to sample")
    )]
    EmptySample,

    #[error("No source image loaded")]
    #[diagnostic(code(knots::session), help("Load an image before resampling"))]
    NoSource,
}

pub type Result<T> = std::result::Result<T, KnotError>;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LatticaError {
    #[error("Invalid state domain: {0}")]
    InvalidStates(String),

    #[error("No states configured")]
    EmptyDomain,

    #[error("Invalid rule clause {clause:?}: {reason}")]
    RuleSyntax { clause: String, reason: String },

    #[error("Invalid pattern: {0}")]
    PatternSyntax(String),

    #[error("Probability {0} out of range, must be within [0, 1]")]
    InvalidProbability(f64),

    #[error("State {0} is not in the configured domain")]
    UnknownState(u8),

    #[error("Coordinate ({x}, {y}) outside {width}x{height} board")]
    OutOfBounds { x: i32, y: i32, width: u32, height: u32 },

    #[error("Board dimensions must be positive, got {0}x{1}")]
    InvalidDimensions(u32, u32),

    #[error("Board dimensions {0}x{1} and {2}x{3} do not match")]
    DimensionMismatch(u32, u32, u32, u32),

    #[error("Scenario error: {0}")]
    Scenario(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, LatticaError>;

use std::fmt;

/// Configuration problems detected before any computation starts
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    InvalidDomain { xmin: f64, xmax: f64 },
    TooFewPoints(usize),
    ZeroIterations,
    ZeroMeans,
    ZeroProbePoints,
    ZeroHistogramBins,
    InvalidIntegration(&'static str),
    InvalidCdf(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidDomain { xmin, xmax } => {
                write!(
                    f,
                    "invalid domain [{xmin}, {xmax}]: bounds must be finite with xmin < xmax"
                )
            }
            ConfigError::TooFewPoints(n) => {
                write!(f, "numpoints must be at least 2 (got {n})")
            }
            ConfigError::ZeroIterations => write!(f, "num_iterations must be positive"),
            ConfigError::ZeroMeans => write!(f, "num_means must be positive"),
            ConfigError::ZeroProbePoints => write!(f, "probe_points must be positive"),
            ConfigError::ZeroHistogramBins => write!(f, "histogram_bins must be positive"),
            ConfigError::InvalidIntegration(reason) => {
                write!(f, "invalid integration settings: {reason}")
            }
            ConfigError::InvalidCdf(reason) => write!(f, "invalid CDF: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Errors raised by the simulation pipeline
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// The candidate density is negative (or not a number) somewhere on the
    /// domain, or integrates to zero and cannot be normalized
    InvalidDensity { x: f64, value: f64 },
    /// Quadrature did not converge within the refinement budget
    IntegrationFailure {
        quantity: &'static str,
        estimate: f64,
        error: f64,
        refinements: usize,
    },
    /// A uniform draw fell outside the CDF range under the `Reject` policy
    SampleOutOfBracket { u: f64, lower: f64, upper: f64 },
    Config(ConfigError),
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::InvalidDensity { x, value } => {
                write!(
                    f,
                    "invalid density: p({x}) = {value}, a probability density must be non-negative with a positive integral"
                )
            }
            SimulationError::IntegrationFailure {
                quantity,
                estimate,
                error,
                refinements,
            } => write!(
                f,
                "integration of {quantity} did not converge after {refinements} refinements (estimate={estimate}, error={error})"
            ),
            SimulationError::SampleOutOfBracket { u, lower, upper } => {
                write!(f, "uniform draw {u} outside CDF range [{lower}, {upper}]")
            }
            SimulationError::Config(e) => write!(f, "configuration error: {e}"),
        }
    }
}

impl std::error::Error for SimulationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimulationError::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for SimulationError {
    fn from(e: ConfigError) -> Self {
        SimulationError::Config(e)
    }
}

pub type Result<T> = std::result::Result<T, SimulationError>;

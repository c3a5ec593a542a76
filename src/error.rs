use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("server count must be greater than 0")]
    NoServers,
    #[error("simulation horizon must be greater than 0 (got {0})")]
    InvalidHorizon(f64),
    #[error("mean inter-arrival time must be greater than 0 (got {0})")]
    InvalidInterarrival(f64),
    #[error("rush mean inter-arrival time must be greater than 0 (got {0})")]
    InvalidRushInterarrival(f64),
    #[error("rush window must satisfy start <= end (got {start}..{end})")]
    InvalidRushWindow { start: f64, end: f64 },
    #[error("service mean must not be negative (got {0})")]
    InvalidServiceMean(f64),
    #[error("service standard deviation must not be negative (got {0})")]
    InvalidServiceStd(f64),
    #[error("maximum wait must not be negative (got {0})")]
    InvalidMaxWait(f64),
    #[error("repair duration must not be negative (got {0})")]
    InvalidRepairDuration(f64),
    #[error("base failure probability must be within [0, 1] (got {0})")]
    InvalidFailureProbability(f64),
    #[error("failure increment must not be negative (got {0})")]
    InvalidFailureIncrement(f64),
    #[error("{0} must be a finite number")]
    NotFinite(&'static str),
    #[error("{0}")]
    ConfigIo(String),
    #[error("{0}")]
    ConfigParse(String),
    #[error("unsupported config format '{0}'")]
    UnsupportedConfigFormat(String),
    #[error("{0}")]
    Cli(String),
}

pub type Result<T> = std::result::Result<T, Error>;

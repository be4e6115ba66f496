//! Error types for the RP2040 RMII driver
//!
//! Errors are organized by domain for better diagnostics:
//! - [`ConfigError`]: Pin, PIO and state-machine assignment failures at init
//! - [`DmaError`]: Frame sizing problems on the DMA-fed transmit path
//! - [`IoError`]: Runtime management-bus and state failures
//!
//! The unified [`Error`] enum wraps all domain errors and is returned
//! by most driver methods. Receive noise (a capture window with no CRC
//! match) is not an error and never surfaces here.

// =============================================================================
// Configuration Errors
// =============================================================================

/// Configuration and initialization errors
///
/// These errors are surfaced once by `RmiiEthernet::init` and are fatal
/// to startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Invalid configuration parameter
    InvalidConfig,
    /// Invalid PHY address (must be 0-31)
    InvalidPhyAddress,
    /// PIO block index out of range (must be 0 or 1)
    InvalidPio,
    /// State machine slot leaves no room for the TX machine (must be 0-2)
    InvalidStateMachine,
    /// A pin group runs past the last usable GPIO
    InvalidPin,
    /// Two pin groups share a GPIO
    PinConflict,
    /// Neither a station address nor a board id to derive one from
    MissingAddress,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ConfigError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ConfigError::InvalidConfig => "invalid configuration",
            ConfigError::InvalidPhyAddress => "invalid PHY address",
            ConfigError::InvalidPio => "invalid PIO block",
            ConfigError::InvalidStateMachine => "invalid state machine slot",
            ConfigError::InvalidPin => "pin group out of range",
            ConfigError::PinConflict => "pin groups overlap",
            ConfigError::MissingAddress => "no MAC address or board id",
        }
    }
}

// =============================================================================
// DMA Errors
// =============================================================================

/// Transmit buffer errors
///
/// These errors are returned by `transmit` before any DMA transfer is
/// started, so the symbol buffer is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DmaError {
    /// Frame too large for buffer capacity
    FrameTooLarge,
    /// Invalid frame length (zero)
    InvalidLength,
}

impl core::fmt::Display for DmaError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl DmaError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            DmaError::FrameTooLarge => "frame too large for buffers",
            DmaError::InvalidLength => "invalid frame length",
        }
    }
}

// =============================================================================
// I/O Errors
// =============================================================================

/// Runtime errors
///
/// These errors occur on the management bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IoError {
    /// PHY communication error (MDIO pin failure)
    PhyError,
}

impl core::fmt::Display for IoError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl IoError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            IoError::PhyError => "PHY communication error",
        }
    }
}

// =============================================================================
// Unified Error Type
// =============================================================================

/// This enum wraps all domain-specific errors for unified error handling.
///
/// Match on the inner domain error for specific handling:
/// ```ignore
/// match result {
///     Err(Error::Config(ConfigError::InvalidPhyAddress)) => { /* ... */ }
///     Err(Error::Dma(DmaError::FrameTooLarge)) => { /* ... */ }
///     Err(Error::Io(IoError::PhyError)) => { /* ... */ }
///     _ => {}
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Configuration error
    Config(ConfigError),
    /// DMA error
    Dma(DmaError),
    /// I/O error
    Io(IoError),
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Config(e) => write!(f, "config: {}", e.as_str()),
            Error::Dma(e) => write!(f, "dma: {}", e.as_str()),
            Error::Io(e) => write!(f, "io: {}", e.as_str()),
        }
    }
}

// From impls for automatic conversion
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<DmaError> for Error {
    fn from(e: DmaError) -> Self {
        Error::Dma(e)
    }
}

impl From<IoError> for Error {
    fn from(e: IoError) -> Self {
        Error::Io(e)
    }
}

/// Result type alias for driver operations
pub type Result<T> = core::result::Result<T, Error>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = core::result::Result<T, ConfigError>;

/// Result type alias for DMA operations
pub type DmaResult<T> = core::result::Result<T, DmaError>;

/// Result type alias for I/O operations
pub type IoResult<T> = core::result::Result<T, IoError>;

// =============================================================================
// Unit Tests
// =============================================================================

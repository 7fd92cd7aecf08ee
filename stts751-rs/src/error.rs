/// Default base added to every numeric error code.
pub const DEFAULT_ERROR_BASE: i32 = 0x7000;

/// Offset of the success code from the error base.
pub const OK_OFFSET: i32 = 0;

#[derive(Debug, PartialEq)]
/// STTS751 driver errors.
pub enum Stts751Error<E> {
    /// Invalid function argument.
    InvalidArg,
    /// I2C bus errors.
    I2c(E),
    /// The device returned register content outside its definition.
    InvalidResponse,
    /// Manufacturer or product ID mismatch.
    NoDevice,
    /// Operation not allowed in the current run/stop mode.
    InvalidState,
    /// The driver has not been initialized.
    NotInitialized,
}

impl<E> From<E> for Stts751Error<E> {
    fn from(value: E) -> Self {
        Self::I2c(value)
    }
}

impl<E> Stts751Error<E> {
    /// Offset of this error from the error base.
    ///
    /// Bus failures and malformed register content share the
    /// invalid response code.
    pub const fn offset(&self) -> i32 {
        match self {
            Self::InvalidArg => 1,
            Self::I2c(_) | Self::InvalidResponse => 2,
            Self::NoDevice => 3,
            Self::InvalidState => 4,
            Self::NotInitialized => 5,
        }
    }

    /// Numeric error code relative to `base`.
    pub const fn code(&self, base: i32) -> i32 {
        base + self.offset()
    }
}

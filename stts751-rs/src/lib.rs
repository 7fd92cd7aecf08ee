#![cfg_attr(not(test), no_std)]
#![deny(missing_docs)]

/*! # STTS751
 *
 * A platform-agnostic driver for the STMicroelectronics STTS751 digital
 * temperature sensor, built on the [`embedded-hal`](https://docs.rs/embedded-hal)
 * and [`embedded-hal-async`](https://docs.rs/embedded-hal-async) traits.
 *
 * The driver verifies the device identity, configures resolution, conversion
 * rate and thermal limits, switches between run and stop mode, masks the event
 * output, and performs one-shot temperature conversions.
 *
 * Datasheet: <https://www.st.com/resource/en/datasheet/stts751.pdf>
 */

mod error;
mod registers;
mod registers_async;
mod sensor;
mod sensor_async;
mod temperature;
mod traits;

pub use error::{DEFAULT_ERROR_BASE, OK_OFFSET, Stts751Error};
pub use registers::{
    Configuration, ConversionRate, MANUFACTURER_ID, PRODUCT_ID_0, PRODUCT_ID_1, ReadoutResolution,
    Register, Status,
};
pub use registers_async::Stts751Async;
pub use temperature::{LIMIT_MAX, LIMIT_MIN, Reading, Temperature};
pub use traits::Addressing;

/// Results of STTS751-specific function calls.
pub type Stts751Result<T, E> = Result<T, Stts751Error<E>>;

/// Default 7-bit address (Addr/Therm pin pulled up with 7.5 kOhm).
pub const DEFAULT_ADDRESS: u8 = 0x48;

/// Interval between two status polls while a conversion is running.
pub(crate) const BUSY_POLL_MS: u32 = 100;

/// Device state shared by the blocking and async drivers.
#[derive(Debug)]
pub(crate) struct DeviceState {
    pub(crate) addr: u8,
    pub(crate) error_base: i32,
    pub(crate) product_id: u8,
    pub(crate) manufacturer_id: u8,
    pub(crate) stopped: bool,
    pub(crate) initialized: bool,
    pub(crate) resolution: ReadoutResolution,
}

impl DeviceState {
    pub(crate) fn new() -> Self {
        DeviceState {
            addr: DEFAULT_ADDRESS,
            error_base: DEFAULT_ERROR_BASE,
            product_id: 0,
            manufacturer_id: 0,
            stopped: false,
            initialized: false,
            resolution: ReadoutResolution::default(),
        }
    }

    pub(crate) fn check_initialized<E>(&self) -> Stts751Result<(), E> {
        if self.initialized {
            Ok(())
        } else {
            Err(Stts751Error::NotInitialized)
        }
    }

    pub(crate) fn code_of<T, E>(&self, result: &Stts751Result<T, E>) -> i32 {
        match result {
            Ok(_) => self.error_base + OK_OFFSET,
            Err(e) => e.code(self.error_base),
        }
    }
}

/// A STTS751 temperature sensor.
///
/// Takes ownership of an I2C bus (implementing [`I2c`](embedded_hal::i2c::I2c) trait)
/// and a timer object implementing the [`DelayNs`](embedded_hal::delay::DelayNs) trait.
///
/// Every operation except [`init`](Stts751::init) fails with
/// [`Stts751Error::NotInitialized`] until `init` has succeeded.
pub struct Stts751<I, D> {
    pub(crate) i2c: I,
    pub(crate) delay: D,
    pub(crate) state: DeviceState,
}

impl<I, D> Stts751<I, D> {
    /// Creates a new instance of `Stts751` responding to [`DEFAULT_ADDRESS`].
    pub fn new(i2c: I, delay: D) -> Self {
        Stts751 {
            i2c,
            delay,
            state: DeviceState::new(),
        }
    }

    /// Set the 7-bit bus address.
    ///
    /// The address is selected by the pull resistor on the Addr/Therm pin.
    pub fn with_address(mut self, addr: u8) -> Self {
        self.state.addr = addr;
        self
    }

    /// Set the base of the numeric error codes returned by
    /// [`error_code`](Stts751::error_code).
    pub fn with_error_base(mut self, base: i32) -> Self {
        self.state.error_base = base;
        self
    }

    /// Destroy the driver instance, return the I2C bus and delay instances.
    pub fn destroy(self) -> (I, D) {
        (self.i2c, self.delay)
    }

    /// The 7-bit bus address.
    pub fn address(&self) -> u8 {
        self.state.addr
    }

    /// Product ID read during initialization.
    pub fn product_id(&self) -> u8 {
        self.state.product_id
    }

    /// Manufacturer ID read during initialization.
    pub fn manufacturer_id(&self) -> u8 {
        self.state.manufacturer_id
    }

    /// `true` when the device is in stop (standby) mode.
    pub fn is_stopped(&self) -> bool {
        self.state.stopped
    }

    /// `true` once [`init`](Stts751::init) has succeeded.
    pub fn is_initialized(&self) -> bool {
        self.state.initialized
    }

    /// Resolution last written to the device.
    pub fn resolution(&self) -> ReadoutResolution {
        self.state.resolution
    }

    /// Numeric code of an operation result: the error base for success,
    /// base plus [`Stts751Error::offset`] for failures.
    pub fn error_code<T, E>(&self, result: &Stts751Result<T, E>) -> i32 {
        self.state.code_of(result)
    }
}

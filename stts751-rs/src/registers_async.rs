use crate::{
    BUSY_POLL_MS, DeviceState, ReadoutResolution, Register, Status, Stts751Result,
    traits::Addressing,
};
use embedded_hal_async::{
    delay::DelayNs,
    i2c::{I2c, SevenBitAddress},
};

/// A STTS751 temperature sensor.
///
/// Takes ownership of an I2C bus (implementing [`I2c`](embedded_hal_async::i2c::I2c) trait)
/// and a timer object implementing the [`DelayNs`](embedded_hal_async::delay::DelayNs) trait.
pub struct Stts751Async<I, D> {
    pub(crate) i2c: I,
    pub(crate) delay: D,
    pub(crate) state: DeviceState,
}

impl<I, D> Stts751Async<I, D> {
    /// Creates a new instance of [`Stts751Async`] responding to
    /// [`DEFAULT_ADDRESS`](crate::DEFAULT_ADDRESS).
    pub fn new(i2c: I, delay: D) -> Self {
        Self {
            i2c,
            delay,
            state: DeviceState::new(),
        }
    }

    /// Set the 7-bit bus address.
    pub fn with_address(mut self, addr: u8) -> Self {
        self.state.addr = addr;
        self
    }

    /// Set the base of the numeric error codes.
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

    /// `true` once [`init`](Stts751Async::init) has succeeded.
    pub fn is_initialized(&self) -> bool {
        self.state.initialized
    }

    /// Resolution last written to the device.
    pub fn resolution(&self) -> ReadoutResolution {
        self.state.resolution
    }

    /// Numeric code of an operation result.
    pub fn error_code<T, E>(&self, result: &Stts751Result<T, E>) -> i32 {
        self.state.code_of(result)
    }
}

impl<I: I2c<SevenBitAddress>, D: DelayNs> Stts751Async<I, D> {
    pub(crate) async fn read_byte(&mut self, reg: Register) -> Stts751Result<u8, I::Error> {
        let mut buf = [0; 1];
        self.i2c
            .write_read(self.state.addr, &[reg.into()], &mut buf)
            .await?;
        Ok(buf[0])
    }

    pub(crate) async fn write_byte(
        &mut self,
        reg: Register,
        value: u8,
    ) -> Stts751Result<(), I::Error> {
        self.i2c.write(self.state.addr, &[reg.into(), value]).await?;
        Ok(())
    }

    pub(crate) async fn read_register<R: Addressing>(&mut self) -> Stts751Result<R, I::Error> {
        Ok(R::from(self.read_byte(R::ADDR).await?))
    }

    pub(crate) async fn modify_register(
        &mut self,
        reg: Register,
        mask: u8,
        value: u8,
    ) -> Stts751Result<(), I::Error> {
        self.state.check_initialized()?;
        let current = self.read_byte(reg).await?;
        self.write_byte(reg, (current & !mask) | (value & mask)).await
    }

    pub(crate) async fn wait_busy(&mut self) -> Stts751Result<Status, I::Error> {
        self.state.check_initialized()?;
        loop {
            let status: Status = self.read_register().await?;
            self.delay.delay_ms(BUSY_POLL_MS).await;
            if !status.busy() {
                return Ok(status);
            }
            log::trace!("STTS751 {:#04x}: conversion in progress", self.state.addr);
        }
    }
}

use crate::{
    Configuration, ConversionRate, MANUFACTURER_ID, PRODUCT_ID_0, PRODUCT_ID_1, ReadoutResolution,
    Reading, Register, Status, Stts751Async, Stts751Error, Stts751Result, Temperature,
    registers::{EVENT_MASK, ONE_SHOT_TRIGGER, RATE_MASK, RESOLUTION_MASK, STOP_MASK},
    temperature,
};
use embedded_hal_async::{
    delay::DelayNs,
    i2c::{I2c, SevenBitAddress},
};

impl<I: I2c<SevenBitAddress>, D: DelayNs> Stts751Async<I, D> {
    /// Initialize the driver.
    ///
    /// Verifies the manufacturer and product IDs, reads the current
    /// run/stop mode and applies `resolution`.
    pub async fn init(&mut self, resolution: ReadoutResolution) -> Stts751Result<(), I::Error> {
        self.state.initialized = false;
        if self.state.addr > 0x7f {
            return Err(Stts751Error::InvalidArg);
        }

        let manufacturer = self.read_byte(Register::ManufacturerId).await?;
        if manufacturer != MANUFACTURER_ID {
            log::debug!(
                "STTS751 {:#04x}: unexpected manufacturer ID {:#04x}",
                self.state.addr,
                manufacturer
            );
            return Err(Stts751Error::NoDevice);
        }
        self.state.manufacturer_id = manufacturer;

        let product = self.read_byte(Register::ProductId).await?;
        if product != PRODUCT_ID_0 && product != PRODUCT_ID_1 {
            log::debug!(
                "STTS751 {:#04x}: unexpected product ID {:#04x}",
                self.state.addr,
                product
            );
            return Err(Stts751Error::NoDevice);
        }
        self.state.product_id = product;

        let config: Configuration = self.read_register().await?;
        self.state.stopped = config.stop();
        self.state.initialized = true;
        log::debug!(
            "STTS751-{} found at {:#04x}, stopped: {}",
            product,
            self.state.addr,
            self.state.stopped
        );

        self.set_resolution(resolution).await
    }

    /// Deinitialize the driver, putting the device in stop mode first.
    pub async fn deinit(&mut self) -> Stts751Result<(), I::Error> {
        self.enable(false).await?;
        self.state.initialized = false;
        Ok(())
    }

    /// Set the conversion rate used in running mode.
    pub async fn set_conversion_rate(
        &mut self,
        rate: ConversionRate,
    ) -> Stts751Result<(), I::Error> {
        self.state.check_initialized()?;
        if !rate.supported_at(self.state.resolution) {
            log::warn!(
                "STTS751 {:#04x}: {:?} is not supported at {}-bit resolution",
                self.state.addr,
                rate,
                self.state.resolution.bits()
            );
        }
        self.write_byte(Register::ConversionRate, rate as u8 & RATE_MASK)
            .await
    }

    /// Get the conversion rate.
    pub async fn conversion_rate(&mut self) -> Stts751Result<ConversionRate, I::Error> {
        self.state.check_initialized()?;
        let value = self.read_byte(Register::ConversionRate).await?;
        ConversionRate::try_from(value & RATE_MASK).map_err(|_| Stts751Error::InvalidResponse)
    }

    /// Set the measurement resolution.
    pub async fn set_resolution(
        &mut self,
        resolution: ReadoutResolution,
    ) -> Stts751Result<(), I::Error> {
        let value = Configuration::new().with_resolution(resolution).into_bits();
        self.modify_register(Register::Configuration, RESOLUTION_MASK, value)
            .await?;
        self.state.resolution = resolution;
        Ok(())
    }

    /// Set the THERM limit and its hysteresis, in degrees Celsius.
    pub async fn set_thermal_limit(
        &mut self,
        limit: i8,
        hysteresis: i8,
    ) -> Stts751Result<(), I::Error> {
        self.state.check_initialized()?;
        self.write_byte(Register::ThermLimit, limit as u8).await?;
        self.write_byte(Register::ThermHysteresis, hysteresis as u8)
            .await
    }

    /// Put the device in run (`true`) or stop (`false`) mode.
    pub async fn enable(&mut self, running: bool) -> Stts751Result<(), I::Error> {
        self.state.check_initialized()?;
        if self.state.stopped == !running {
            return Ok(());
        }
        let value = if running { 0 } else { STOP_MASK };
        self.modify_register(Register::Configuration, STOP_MASK, value)
            .await?;
        self.state.stopped = !running;
        log::debug!(
            "STTS751 {:#04x}: {}",
            self.state.addr,
            if running { "running" } else { "stopped" }
        );
        Ok(())
    }

    /// Enable or disable the EVENT output.
    pub async fn enable_event(&mut self, enabled: bool) -> Stts751Result<(), I::Error> {
        let value = if enabled { 0 } else { EVENT_MASK };
        self.modify_register(Register::Configuration, EVENT_MASK, value)
            .await
    }

    /// Perform a one-shot temperature conversion. The device must be stopped.
    pub async fn one_shot(&mut self) -> Stts751Result<Reading, I::Error> {
        self.state.check_initialized()?;
        if !self.state.stopped {
            return Err(Stts751Error::InvalidState);
        }
        self.wait_busy().await?;
        self.write_byte(Register::OneShot, ONE_SHOT_TRIGGER).await?;
        self.wait_busy().await?;
        self.read_temperature().await
    }

    /// Perform a one-shot temperature conversion, in millidegrees Celsius.
    pub async fn one_shot_millidegrees(&mut self) -> Stts751Result<i32, I::Error> {
        Ok(self.one_shot().await?.millidegrees())
    }

    /// Read the last converted temperature without triggering a conversion.
    pub async fn temperature(&mut self) -> Stts751Result<Reading, I::Error> {
        self.state.check_initialized()?;
        self.read_temperature().await
    }

    /// Read the configuration register.
    pub async fn configuration(&mut self) -> Stts751Result<Configuration, I::Error> {
        self.state.check_initialized()?;
        self.read_register().await
    }

    /// Read the status register. Clears the limit flags.
    pub async fn status(&mut self) -> Stts751Result<Status, I::Error> {
        self.state.check_initialized()?;
        self.read_register().await
    }

    /// Read the revision number.
    pub async fn revision_id(&mut self) -> Stts751Result<u8, I::Error> {
        self.state.check_initialized()?;
        self.read_byte(Register::RevisionId).await
    }

    /// Set the EVENT high limit, within
    /// [`LIMIT_MIN`](crate::LIMIT_MIN)..=[`LIMIT_MAX`](crate::LIMIT_MAX).
    pub async fn set_high_limit(&mut self, limit: Temperature) -> Stts751Result<(), I::Error> {
        self.write_limit(Register::HighLimitHigh, Register::HighLimitLow, limit)
            .await
    }

    /// Get the EVENT high limit.
    pub async fn high_limit(&mut self) -> Stts751Result<Temperature, I::Error> {
        self.read_limit(Register::HighLimitHigh, Register::HighLimitLow)
            .await
    }

    /// Set the EVENT low limit.
    pub async fn set_low_limit(&mut self, limit: Temperature) -> Stts751Result<(), I::Error> {
        self.write_limit(Register::LowLimitHigh, Register::LowLimitLow, limit)
            .await
    }

    /// Get the EVENT low limit.
    pub async fn low_limit(&mut self) -> Stts751Result<Temperature, I::Error> {
        self.read_limit(Register::LowLimitHigh, Register::LowLimitLow)
            .await
    }

    async fn read_temperature(&mut self) -> Stts751Result<Reading, I::Error> {
        let high = self.read_byte(Register::TemperatureHigh).await?;
        let low = self.read_byte(Register::TemperatureLow).await?;
        Ok(Reading::from_registers(high, low))
    }

    async fn write_limit(
        &mut self,
        high: Register,
        low: Register,
        limit: Temperature,
    ) -> Stts751Result<(), I::Error> {
        self.state.check_initialized()?;
        let [hi, lo] = temperature::to_registers(limit).ok_or(Stts751Error::InvalidArg)?;
        self.write_byte(high, hi).await?;
        self.write_byte(low, lo).await
    }

    async fn read_limit(
        &mut self,
        high: Register,
        low: Register,
    ) -> Stts751Result<Temperature, I::Error> {
        self.state.check_initialized()?;
        let hi = self.read_byte(high).await?;
        let lo = self.read_byte(low).await?;
        Ok(temperature::from_registers(hi, lo))
    }
}

use crate::{
    Configuration, ConversionRate, MANUFACTURER_ID, PRODUCT_ID_0, PRODUCT_ID_1, ReadoutResolution,
    Reading, Register, Status, Stts751, Stts751Error, Stts751Result, Temperature,
    registers::{EVENT_MASK, ONE_SHOT_TRIGGER, RATE_MASK, RESOLUTION_MASK, STOP_MASK},
    temperature,
};
use embedded_hal::{
    delay::DelayNs,
    i2c::{I2c, SevenBitAddress},
};

impl<I: I2c<SevenBitAddress>, D: DelayNs> Stts751<I, D> {
    /// Initialize the driver.
    ///
    /// Verifies the manufacturer and product IDs, reads the current
    /// run/stop mode and applies `resolution`.
    pub fn init(&mut self, resolution: ReadoutResolution) -> Stts751Result<(), I::Error> {
        self.state.initialized = false;
        if self.state.addr > 0x7f {
            return Err(Stts751Error::InvalidArg);
        }

        let manufacturer = self.read_byte(Register::ManufacturerId)?;
        if manufacturer != MANUFACTURER_ID {
            log::debug!(
                "STTS751 {:#04x}: unexpected manufacturer ID {:#04x}",
                self.state.addr,
                manufacturer
            );
            return Err(Stts751Error::NoDevice);
        }
        self.state.manufacturer_id = manufacturer;

        let product = self.read_byte(Register::ProductId)?;
        if product != PRODUCT_ID_0 && product != PRODUCT_ID_1 {
            log::debug!(
                "STTS751 {:#04x}: unexpected product ID {:#04x}",
                self.state.addr,
                product
            );
            return Err(Stts751Error::NoDevice);
        }
        self.state.product_id = product;

        let config: Configuration = self.read_register()?;
        self.state.stopped = config.stop();
        self.state.initialized = true;
        log::debug!(
            "STTS751-{} found at {:#04x}, stopped: {}",
            product,
            self.state.addr,
            self.state.stopped
        );

        self.set_resolution(resolution)
    }

    /// Deinitialize the driver.
    ///
    /// Puts the device in stop mode first.
    pub fn deinit(&mut self) -> Stts751Result<(), I::Error> {
        self.enable(false)?;
        self.state.initialized = false;
        Ok(())
    }

    /// Set the conversion rate used in running mode.
    ///
    /// Rates the current resolution cannot sustain are written anyway
    /// and logged as a warning.
    pub fn set_conversion_rate(&mut self, rate: ConversionRate) -> Stts751Result<(), I::Error> {
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
    }

    /// Get the conversion rate.
    pub fn conversion_rate(&mut self) -> Stts751Result<ConversionRate, I::Error> {
        self.state.check_initialized()?;
        let value = self.read_byte(Register::ConversionRate)?;
        ConversionRate::try_from(value & RATE_MASK).map_err(|_| Stts751Error::InvalidResponse)
    }

    /// Set the measurement resolution.
    pub fn set_resolution(&mut self, resolution: ReadoutResolution) -> Stts751Result<(), I::Error> {
        let value = Configuration::new().with_resolution(resolution).into_bits();
        self.modify_register(Register::Configuration, RESOLUTION_MASK, value)?;
        self.state.resolution = resolution;
        Ok(())
    }

    /// Set the THERM limit and its hysteresis, in degrees Celsius.
    ///
    /// The two registers are written separately. If the second write
    /// fails the new limit stays applied.
    pub fn set_thermal_limit(&mut self, limit: i8, hysteresis: i8) -> Stts751Result<(), I::Error> {
        self.state.check_initialized()?;
        self.write_byte(Register::ThermLimit, limit as u8)?;
        self.write_byte(Register::ThermHysteresis, hysteresis as u8)
    }

    /// Put the device in run (`true`) or stop (`false`) mode.
    ///
    /// Nothing is sent when the device is already in the requested mode.
    pub fn enable(&mut self, running: bool) -> Stts751Result<(), I::Error> {
        self.state.check_initialized()?;
        if self.state.stopped == !running {
            return Ok(());
        }
        let value = if running { 0 } else { STOP_MASK };
        self.modify_register(Register::Configuration, STOP_MASK, value)?;
        self.state.stopped = !running;
        log::debug!(
            "STTS751 {:#04x}: {}",
            self.state.addr,
            if running { "running" } else { "stopped" }
        );
        Ok(())
    }

    /// Enable or disable the EVENT output.
    pub fn enable_event(&mut self, enabled: bool) -> Stts751Result<(), I::Error> {
        let value = if enabled { 0 } else { EVENT_MASK };
        self.modify_register(Register::Configuration, EVENT_MASK, value)
    }

    /// Perform a one-shot temperature conversion.
    ///
    /// The device must be stopped, otherwise [`Stts751Error::InvalidState`]
    /// is returned without touching the bus. Blocks until the conversion
    /// has finished.
    pub fn one_shot(&mut self) -> Stts751Result<Reading, I::Error> {
        self.state.check_initialized()?;
        if !self.state.stopped {
            return Err(Stts751Error::InvalidState);
        }
        self.wait_busy()?;
        self.write_byte(Register::OneShot, ONE_SHOT_TRIGGER)?;
        self.wait_busy()?;
        self.read_temperature()
    }

    /// Perform a one-shot temperature conversion, in millidegrees Celsius.
    pub fn one_shot_millidegrees(&mut self) -> Stts751Result<i32, I::Error> {
        Ok(self.one_shot()?.millidegrees())
    }

    /// Read the last converted temperature without triggering a conversion.
    pub fn temperature(&mut self) -> Stts751Result<Reading, I::Error> {
        self.state.check_initialized()?;
        self.read_temperature()
    }

    /// Read the configuration register.
    pub fn configuration(&mut self) -> Stts751Result<Configuration, I::Error> {
        self.state.check_initialized()?;
        self.read_register()
    }

    /// Read the status register. Clears the limit flags.
    pub fn status(&mut self) -> Stts751Result<Status, I::Error> {
        self.state.check_initialized()?;
        self.read_register()
    }

    /// Read the revision number.
    pub fn revision_id(&mut self) -> Stts751Result<u8, I::Error> {
        self.state.check_initialized()?;
        self.read_byte(Register::RevisionId)
    }

    /// Set the EVENT high limit.
    ///
    /// Limits outside [`LIMIT_MIN`](crate::LIMIT_MIN)..=[`LIMIT_MAX`](crate::LIMIT_MAX)
    /// return [`Stts751Error::InvalidArg`] without touching the bus.
    pub fn set_high_limit(&mut self, limit: Temperature) -> Stts751Result<(), I::Error> {
        self.write_limit(Register::HighLimitHigh, Register::HighLimitLow, limit)
    }

    /// Get the EVENT high limit.
    pub fn high_limit(&mut self) -> Stts751Result<Temperature, I::Error> {
        self.read_limit(Register::HighLimitHigh, Register::HighLimitLow)
    }

    /// Set the EVENT low limit.
    ///
    /// Same range as [`set_high_limit`](Stts751::set_high_limit).
    pub fn set_low_limit(&mut self, limit: Temperature) -> Stts751Result<(), I::Error> {
        self.write_limit(Register::LowLimitHigh, Register::LowLimitLow, limit)
    }

    /// Get the EVENT low limit.
    pub fn low_limit(&mut self) -> Stts751Result<Temperature, I::Error> {
        self.read_limit(Register::LowLimitHigh, Register::LowLimitLow)
    }

    fn read_temperature(&mut self) -> Stts751Result<Reading, I::Error> {
        let high = self.read_byte(Register::TemperatureHigh)?;
        let low = self.read_byte(Register::TemperatureLow)?;
        Ok(Reading::from_registers(high, low))
    }

    fn write_limit(
        &mut self,
        high: Register,
        low: Register,
        limit: Temperature,
    ) -> Stts751Result<(), I::Error> {
        self.state.check_initialized()?;
        let [hi, lo] = temperature::to_registers(limit).ok_or(Stts751Error::InvalidArg)?;
        self.write_byte(high, hi)?;
        self.write_byte(low, lo)
    }

    fn read_limit(&mut self, high: Register, low: Register) -> Stts751Result<Temperature, I::Error> {
        self.state.check_initialized()?;
        let hi = self.read_byte(high)?;
        let lo = self.read_byte(low)?;
        Ok(temperature::from_registers(hi, lo))
    }
}

#[cfg(test)]
mod tests {
    use embedded_hal::i2c::ErrorKind;
    use embedded_hal_mock::eh1::delay::NoopDelay;
    use embedded_hal_mock::eh1::i2c::{Mock, Transaction};

    use super::*;

    const ADDR: u8 = 0x48;

    fn ready(mock: Mock, stopped: bool) -> Stts751<Mock, NoopDelay> {
        let mut dev = Stts751::new(mock, NoopDelay::new());
        dev.state.initialized = true;
        dev.state.stopped = stopped;
        dev
    }

    #[test]
    fn init_reads_identity_and_mode() {
        let expectations = [
            Transaction::write_read(ADDR, vec![0xfe], vec![0x53]),
            Transaction::write_read(ADDR, vec![0xfd], vec![0x01]),
            Transaction::write_read(ADDR, vec![0x03], vec![0x4c]),
            Transaction::write_read(ADDR, vec![0x03], vec![0x4c]),
            Transaction::write(ADDR, vec![0x03, 0x40]),
        ];
        let mut dev = Stts751::new(Mock::new(&expectations), NoopDelay::new());
        let result = dev.init(ReadoutResolution::default());
        assert!(result.is_ok());
        assert!(dev.is_initialized());
        assert!(dev.is_stopped());
        assert_eq!(dev.manufacturer_id(), 0x53);
        assert_eq!(dev.product_id(), 0x01);
        assert_eq!(dev.resolution(), ReadoutResolution::Resolution10bit);
        let (mut mock, _) = dev.destroy();
        mock.done();
    }

    #[test]
    fn init_uses_configured_address() {
        let expectations = [
            Transaction::write_read(0x39, vec![0xfe], vec![0x53]),
            Transaction::write_read(0x39, vec![0xfd], vec![0x00]),
            Transaction::write_read(0x39, vec![0x03], vec![0x00]),
            Transaction::write_read(0x39, vec![0x03], vec![0x00]),
            Transaction::write(0x39, vec![0x03, 0x08]),
        ];
        let mut dev = Stts751::new(Mock::new(&expectations), NoopDelay::new()).with_address(0x39);
        assert!(dev.init(ReadoutResolution::Resolution12bit).is_ok());
        assert!(!dev.is_stopped());
        assert_eq!(dev.resolution(), ReadoutResolution::Resolution12bit);
        let (mut mock, _) = dev.destroy();
        mock.done();
    }

    #[test]
    fn init_rejects_wrong_manufacturer() {
        for id in [0x00, 0x52, 0x54, 0xff] {
            let expectations = [Transaction::write_read(ADDR, vec![0xfe], vec![id])];
            let mut dev = Stts751::new(Mock::new(&expectations), NoopDelay::new());
            let result = dev.init(ReadoutResolution::default());
            assert_eq!(result, Err(Stts751Error::NoDevice));
            assert!(!dev.is_initialized());
            let (mut mock, _) = dev.destroy();
            mock.done();
        }
    }

    #[test]
    fn init_rejects_unknown_product() {
        for id in [0x02, 0x10, 0xff] {
            let expectations = [
                Transaction::write_read(ADDR, vec![0xfe], vec![0x53]),
                Transaction::write_read(ADDR, vec![0xfd], vec![id]),
            ];
            let mut dev = Stts751::new(Mock::new(&expectations), NoopDelay::new());
            let result = dev.init(ReadoutResolution::default());
            assert_eq!(result, Err(Stts751Error::NoDevice));
            assert!(!dev.is_initialized());
            let (mut mock, _) = dev.destroy();
            mock.done();
        }
    }

    #[test]
    fn init_rejects_wide_address() {
        let mut dev = Stts751::new(Mock::new(&[]), NoopDelay::new()).with_address(0x80);
        let result = dev.init(ReadoutResolution::default());
        assert_eq!(result, Err(Stts751Error::InvalidArg));
        let (mut mock, _) = dev.destroy();
        mock.done();
    }

    #[test]
    fn init_reports_bus_failure() {
        let expectations = [
            Transaction::write_read(ADDR, vec![0xfe], vec![0x53]),
            Transaction::write_read(ADDR, vec![0xfd], vec![0x00]).with_error(ErrorKind::Other),
        ];
        let mut dev = Stts751::new(Mock::new(&expectations), NoopDelay::new());
        let result = dev.init(ReadoutResolution::default());
        assert_eq!(result, Err(Stts751Error::I2c(ErrorKind::Other)));
        assert_eq!(dev.error_code(&result), 0x7002);
        let (mut mock, _) = dev.destroy();
        mock.done();
    }

    #[test]
    fn uninitialized_operations_fail() {
        let mut dev = Stts751::new(Mock::new(&[]), NoopDelay::new());
        let not_init = Err::<(), _>(Stts751Error::<ErrorKind>::NotInitialized);
        assert_eq!(dev.deinit(), not_init);
        assert_eq!(dev.enable(true), not_init);
        assert_eq!(dev.enable(false), not_init);
        assert_eq!(dev.enable_event(true), not_init);
        assert_eq!(dev.set_resolution(ReadoutResolution::Resolution9bit), not_init);
        assert_eq!(dev.set_conversion_rate(ConversionRate::Hertz1), not_init);
        assert_eq!(dev.set_thermal_limit(80, 5), not_init);
        assert_eq!(dev.set_high_limit(Temperature::from_num(50)), not_init);
        assert_eq!(dev.set_low_limit(Temperature::from_num(-5)), not_init);
        assert!(matches!(dev.conversion_rate(), Err(Stts751Error::NotInitialized)));
        assert!(matches!(dev.one_shot(), Err(Stts751Error::NotInitialized)));
        assert!(matches!(dev.one_shot_millidegrees(), Err(Stts751Error::NotInitialized)));
        assert!(matches!(dev.temperature(), Err(Stts751Error::NotInitialized)));
        assert!(matches!(dev.configuration(), Err(Stts751Error::NotInitialized)));
        assert!(matches!(dev.status(), Err(Stts751Error::NotInitialized)));
        assert!(matches!(dev.revision_id(), Err(Stts751Error::NotInitialized)));
        assert!(matches!(dev.high_limit(), Err(Stts751Error::NotInitialized)));
        assert!(matches!(dev.low_limit(), Err(Stts751Error::NotInitialized)));
        let (mut mock, _) = dev.destroy();
        mock.done();
    }

    #[test]
    fn resolution_bits_are_isolated() {
        use ReadoutResolution::*;
        for (resolution, code) in [
            (Resolution10bit, 0b00),
            (Resolution11bit, 0b01),
            (Resolution12bit, 0b10),
            (Resolution9bit, 0b11),
        ] {
            let expectations = [
                Transaction::write_read(ADDR, vec![0x03], vec![0xff]),
                Transaction::write(ADDR, vec![0x03, 0xf3 | (code << 2)]),
                Transaction::write_read(ADDR, vec![0x03], vec![0x00]),
                Transaction::write(ADDR, vec![0x03, code << 2]),
            ];
            let mut dev = ready(Mock::new(&expectations), true);
            assert!(dev.set_resolution(resolution).is_ok());
            assert!(dev.set_resolution(resolution).is_ok());
            assert_eq!(dev.resolution(), resolution);
            let (mut mock, _) = dev.destroy();
            mock.done();
        }
    }

    #[test]
    fn failed_resolution_keeps_cached_value() {
        let expectations = [
            Transaction::write_read(ADDR, vec![0x03], vec![0x00]),
            Transaction::write(ADDR, vec![0x03, 0x04]).with_error(ErrorKind::Other),
        ];
        let mut dev = ready(Mock::new(&expectations), true);
        assert!(dev.set_resolution(ReadoutResolution::Resolution11bit).is_err());
        assert_eq!(dev.resolution(), ReadoutResolution::Resolution10bit);
        let (mut mock, _) = dev.destroy();
        mock.done();
    }

    #[test]
    fn repeated_enable_is_single_update() {
        let expectations = [
            Transaction::write_read(ADDR, vec![0x03], vec![0xc4]),
            Transaction::write(ADDR, vec![0x03, 0x84]),
        ];
        let mut dev = ready(Mock::new(&expectations), true);
        assert!(dev.enable(true).is_ok());
        assert!(!dev.is_stopped());
        assert!(dev.enable(true).is_ok());
        assert!(!dev.is_stopped());
        let (mut mock, _) = dev.destroy();
        mock.done();
    }

    #[test]
    fn failed_enable_keeps_mode() {
        let expectations = [
            Transaction::write_read(ADDR, vec![0x03], vec![0x00]),
            Transaction::write(ADDR, vec![0x03, 0x40]).with_error(ErrorKind::Other),
        ];
        let mut dev = ready(Mock::new(&expectations), false);
        assert!(dev.enable(false).is_err());
        assert!(!dev.is_stopped());
        let (mut mock, _) = dev.destroy();
        mock.done();
    }

    #[test]
    fn deinit_stops_device() {
        let expectations = [
            Transaction::write_read(ADDR, vec![0x03], vec![0x08]),
            Transaction::write(ADDR, vec![0x03, 0x48]),
        ];
        let mut dev = ready(Mock::new(&expectations), false);
        assert!(dev.deinit().is_ok());
        assert!(dev.is_stopped());
        assert!(!dev.is_initialized());
        let (mut mock, _) = dev.destroy();
        mock.done();
    }

    #[test]
    fn deinit_of_stopped_device_is_silent() {
        let mut dev = ready(Mock::new(&[]), true);
        assert!(dev.deinit().is_ok());
        assert!(!dev.is_initialized());
        let (mut mock, _) = dev.destroy();
        mock.done();
    }

    #[test]
    fn event_output_toggles_mask_bit() {
        let expectations = [
            Transaction::write_read(ADDR, vec![0x03], vec![0x48]),
            Transaction::write(ADDR, vec![0x03, 0xc8]),
            Transaction::write_read(ADDR, vec![0x03], vec![0xc8]),
            Transaction::write(ADDR, vec![0x03, 0x48]),
        ];
        let mut dev = ready(Mock::new(&expectations), true);
        assert!(dev.enable_event(false).is_ok());
        assert!(dev.enable_event(true).is_ok());
        let (mut mock, _) = dev.destroy();
        mock.done();
    }

    #[test]
    fn conversion_rate_register() {
        let expectations = [
            Transaction::write(ADDR, vec![0x04, 0x07]),
            Transaction::write_read(ADDR, vec![0x04], vec![0xf7]),
            Transaction::write_read(ADDR, vec![0x04], vec![0x0c]),
        ];
        let mut dev = ready(Mock::new(&expectations), true);
        assert!(dev.set_conversion_rate(ConversionRate::Hertz8).is_ok());
        assert_eq!(dev.conversion_rate(), Ok(ConversionRate::Hertz8));
        let result = dev.conversion_rate();
        assert_eq!(result, Err(Stts751Error::InvalidResponse));
        assert_eq!(dev.error_code(&result), 0x7002);
        let (mut mock, _) = dev.destroy();
        mock.done();
    }

    #[test]
    fn unsupported_rate_is_still_written() {
        let expectations = [Transaction::write(ADDR, vec![0x04, 0x09])];
        let mut dev = ready(Mock::new(&expectations), true);
        dev.state.resolution = ReadoutResolution::Resolution12bit;
        assert!(dev.set_conversion_rate(ConversionRate::Hertz32).is_ok());
        let (mut mock, _) = dev.destroy();
        mock.done();
    }

    #[test]
    fn thermal_limit_writes_both_registers() {
        let expectations = [
            Transaction::write(ADDR, vec![0x20, 0x55]),
            Transaction::write(ADDR, vec![0x21, 0xfb]),
        ];
        let mut dev = ready(Mock::new(&expectations), true);
        assert!(dev.set_thermal_limit(85, -5).is_ok());
        let (mut mock, _) = dev.destroy();
        mock.done();
    }

    #[test]
    fn thermal_limit_is_not_rolled_back() {
        let expectations = [
            Transaction::write(ADDR, vec![0x20, 0x55]),
            Transaction::write(ADDR, vec![0x21, 0x02]).with_error(ErrorKind::Other),
        ];
        let mut dev = ready(Mock::new(&expectations), true);
        let result = dev.set_thermal_limit(85, 2);
        assert_eq!(result, Err(Stts751Error::I2c(ErrorKind::Other)));
        let (mut mock, _) = dev.destroy();
        mock.done();
    }

    #[test]
    fn one_shot_waits_and_decodes() {
        let expectations = [
            Transaction::write_read(ADDR, vec![0x01], vec![0x00]),
            Transaction::write(ADDR, vec![0x0f, 0x01]),
            Transaction::write_read(ADDR, vec![0x01], vec![0x80]),
            Transaction::write_read(ADDR, vec![0x01], vec![0x00]),
            Transaction::write_read(ADDR, vec![0x00], vec![0x19]),
            Transaction::write_read(ADDR, vec![0x02], vec![0x80]),
        ];
        let mut dev = ready(Mock::new(&expectations), true);
        let reading = dev.one_shot().unwrap();
        assert_eq!(reading.integer(), 25);
        assert_eq!(reading.fractional(), 8);
        let (mut mock, _) = dev.destroy();
        mock.done();
    }

    #[test]
    fn one_shot_millidegrees_negative() {
        let expectations = [
            Transaction::write_read(ADDR, vec![0x01], vec![0x00]),
            Transaction::write(ADDR, vec![0x0f, 0x01]),
            Transaction::write_read(ADDR, vec![0x01], vec![0x00]),
            Transaction::write_read(ADDR, vec![0x00], vec![0xff]),
            Transaction::write_read(ADDR, vec![0x02], vec![0x10]),
        ];
        let mut dev = ready(Mock::new(&expectations), true);
        assert_eq!(dev.one_shot_millidegrees(), Ok(-938));
        let (mut mock, _) = dev.destroy();
        mock.done();
    }

    #[test]
    fn one_shot_requires_stop_mode() {
        let mut dev = ready(Mock::new(&[]), false);
        let result = dev.one_shot();
        assert_eq!(result, Err(Stts751Error::InvalidState));
        assert_eq!(dev.error_code(&result), 0x7004);
        let (mut mock, _) = dev.destroy();
        mock.done();
    }

    #[test]
    fn one_shot_trigger_failure() {
        let expectations = [
            Transaction::write_read(ADDR, vec![0x01], vec![0x00]),
            Transaction::write(ADDR, vec![0x0f, 0x01]).with_error(ErrorKind::Other),
        ];
        let mut dev = ready(Mock::new(&expectations), true);
        assert_eq!(dev.one_shot(), Err(Stts751Error::I2c(ErrorKind::Other)));
        let (mut mock, _) = dev.destroy();
        mock.done();
    }

    #[test]
    fn event_limits() {
        let expectations = [
            Transaction::write(ADDR, vec![0x05, 0x50]),
            Transaction::write(ADDR, vec![0x06, 0x80]),
            Transaction::write(ADDR, vec![0x07, 0xf6]),
            Transaction::write(ADDR, vec![0x08, 0x00]),
            Transaction::write_read(ADDR, vec![0x05], vec![0x50]),
            Transaction::write_read(ADDR, vec![0x06], vec![0x80]),
            Transaction::write_read(ADDR, vec![0x07], vec![0xf6]),
            Transaction::write_read(ADDR, vec![0x08], vec![0x00]),
        ];
        let mut dev = ready(Mock::new(&expectations), true);
        assert!(dev.set_high_limit(Temperature::from_num(80.5)).is_ok());
        assert!(dev.set_low_limit(Temperature::from_num(-10)).is_ok());
        assert_eq!(dev.high_limit(), Ok(Temperature::from_num(80.5)));
        assert_eq!(dev.low_limit(), Ok(Temperature::from_num(-10)));
        let (mut mock, _) = dev.destroy();
        mock.done();
    }

    #[test]
    fn event_limits_out_of_range() {
        let expectations = [
            Transaction::write(ADDR, vec![0x05, 0x7f]),
            Transaction::write(ADDR, vec![0x06, 0xf0]),
            Transaction::write(ADDR, vec![0x07, 0x80]),
            Transaction::write(ADDR, vec![0x08, 0x00]),
        ];
        let mut dev = ready(Mock::new(&expectations), true);
        let result = dev.set_high_limit(Temperature::from_num(200));
        assert_eq!(result, Err(Stts751Error::InvalidArg));
        assert_eq!(dev.error_code(&result), 0x7001);
        assert_eq!(dev.set_high_limit(Temperature::from_num(128)), Err(Stts751Error::InvalidArg));
        assert_eq!(
            dev.set_low_limit(Temperature::from_num(-128.5)),
            Err(Stts751Error::InvalidArg)
        );
        assert!(dev.set_high_limit(crate::LIMIT_MAX).is_ok());
        assert!(dev.set_low_limit(crate::LIMIT_MIN).is_ok());
        let (mut mock, _) = dev.destroy();
        mock.done();
    }

    #[test]
    fn register_reads() {
        let expectations = [
            Transaction::write_read(ADDR, vec![0x03], vec![0x4c]),
            Transaction::write_read(ADDR, vec![0x01], vec![0x40]),
            Transaction::write_read(ADDR, vec![0xff], vec![0x01]),
            Transaction::write_read(ADDR, vec![0x00], vec![0xe7]),
            Transaction::write_read(ADDR, vec![0x02], vec![0x00]),
        ];
        let mut dev = ready(Mock::new(&expectations), false);
        let cfg = dev.configuration().unwrap();
        assert!(cfg.stop());
        assert_eq!(cfg.resolution(), ReadoutResolution::Resolution9bit);
        assert!(dev.status().unwrap().t_high());
        assert_eq!(dev.revision_id(), Ok(0x01));
        assert_eq!(dev.temperature().map(|r| r.millidegrees()), Ok(-25_000));
        let (mut mock, _) = dev.destroy();
        mock.done();
    }

    #[test]
    fn custom_error_base() {
        let dev = Stts751::new(Mock::new(&[]), NoopDelay::new()).with_error_base(0x100);
        let ok: Stts751Result<(), ErrorKind> = Ok(());
        let err: Stts751Result<(), ErrorKind> = Err(Stts751Error::NotInitialized);
        assert_eq!(dev.error_code(&ok), 0x100);
        assert_eq!(dev.error_code(&err), 0x105);
        let (mut mock, _) = dev.destroy();
        mock.done();
    }
}

use crate::{BUSY_POLL_MS, Stts751, Stts751Result, traits::Addressing};
use bitfield_struct::bitfield;
use embedded_hal::{
    delay::DelayNs,
    i2c::{I2c, SevenBitAddress},
};

/// Manufacturer ID of STMicroelectronics.
pub const MANUFACTURER_ID: u8 = 0x53;
/// Product ID of the STTS751-0.
pub const PRODUCT_ID_0: u8 = 0x00;
/// Product ID of the STTS751-1.
pub const PRODUCT_ID_1: u8 = 0x01;

pub(crate) const ONE_SHOT_TRIGGER: u8 = 0x01;
pub(crate) const RATE_MASK: u8 = 0x0f;

/// Bits 2-3 of the configuration register.
pub(crate) const RESOLUTION_MASK: u8 = Configuration::new()
    .with_resolution(ReadoutResolution::Resolution9bit)
    .into_bits();
/// Bit 6 of the configuration register.
pub(crate) const STOP_MASK: u8 = Configuration::new().with_stop(true).into_bits();
/// Bit 7 of the configuration register.
pub(crate) const EVENT_MASK: u8 = Configuration::new().with_event_masked(true).into_bits();

/// Register addresses.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Register {
    /// Temperature value, signed integer part.
    TemperatureHigh = 0x00,
    /// Status flags.
    Status = 0x01,
    /// Temperature value, fractional part in bits 4-7.
    TemperatureLow = 0x02,
    /// Configuration.
    Configuration = 0x03,
    /// Conversion rate.
    ConversionRate = 0x04,
    /// Event high limit, integer part.
    HighLimitHigh = 0x05,
    /// Event high limit, fractional part.
    HighLimitLow = 0x06,
    /// Event low limit, integer part.
    LowLimitHigh = 0x07,
    /// Event low limit, fractional part.
    LowLimitLow = 0x08,
    /// One-shot trigger.
    OneShot = 0x0f,
    /// THERM limit.
    ThermLimit = 0x20,
    /// THERM hysteresis.
    ThermHysteresis = 0x21,
    /// Product ID.
    ProductId = 0xfd,
    /// Manufacturer ID.
    ManufacturerId = 0xfe,
    /// Revision number.
    RevisionId = 0xff,
}

impl From<Register> for u8 {
    fn from(reg: Register) -> Self {
        reg as u8
    }
}

/// Measurement resolution.
///
/// Higher resolutions lengthen the conversion time and cap the
/// maximum [`ConversionRate`].
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum ReadoutResolution {
    /// 10-bit resolution, 0.25 °C per LSB (power-on default).
    #[default]
    Resolution10bit = 0,
    /// 11-bit resolution, 0.125 °C per LSB.
    Resolution11bit = 1,
    /// 12-bit resolution, 0.0625 °C per LSB.
    Resolution12bit = 2,
    /// 9-bit resolution, 0.5 °C per LSB.
    Resolution9bit = 3,
}

impl ReadoutResolution {
    /// Number of bits of the temperature reading.
    pub const fn bits(self) -> u8 {
        use ReadoutResolution::*;
        match self {
            Resolution9bit => 9,
            Resolution10bit => 10,
            Resolution11bit => 11,
            Resolution12bit => 12,
        }
    }

    /// Two-bit code stored in the configuration register.
    pub const fn into_bits(self) -> u8 {
        self as u8
    }

    /// Decode the two-bit configuration code.
    pub const fn from_bits(value: u8) -> Self {
        use ReadoutResolution::*;
        match value & 0b11 {
            0 => Resolution10bit,
            1 => Resolution11bit,
            2 => Resolution12bit,
            _ => Resolution9bit,
        }
    }
}

impl TryFrom<u8> for ReadoutResolution {
    type Error = &'static str;

    /// Build a resolution from its bit count (9 to 12).
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        use ReadoutResolution::*;
        match value {
            9 => Ok(Resolution9bit),
            10 => Ok(Resolution10bit),
            11 => Ok(Resolution11bit),
            12 => Ok(Resolution12bit),
            _ => Err("Invalid readout resolution"),
        }
    }
}

/// Conversion rate in continuous (running) mode.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum ConversionRate {
    /// 0.0625 conversions per second.
    Hertz0_0625 = 0,
    /// 0.125 conversions per second.
    Hertz0_125,
    /// 0.25 conversions per second.
    Hertz0_25,
    /// 0.5 conversions per second.
    Hertz0_5,
    /// 1 conversion per second (power-on default).
    #[default]
    Hertz1,
    /// 2 conversions per second.
    Hertz2,
    /// 4 conversions per second.
    Hertz4,
    /// 8 conversions per second.
    Hertz8,
    /// 16 conversions per second. Only in 9, 10 or 11-bit resolution.
    Hertz16,
    /// 32 conversions per second. Only in 9 or 10-bit resolution.
    Hertz32,
}

impl ConversionRate {
    /// Whether the device can sustain this rate at `resolution`.
    pub fn supported_at(self, resolution: ReadoutResolution) -> bool {
        match self {
            ConversionRate::Hertz32 => resolution.bits() <= 10,
            ConversionRate::Hertz16 => resolution.bits() <= 11,
            _ => true,
        }
    }
}

impl TryFrom<u8> for ConversionRate {
    type Error = u8;

    /// Decode a rate code, returning the code itself when it is reserved.
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        use ConversionRate::*;
        match value {
            0 => Ok(Hertz0_0625),
            1 => Ok(Hertz0_125),
            2 => Ok(Hertz0_25),
            3 => Ok(Hertz0_5),
            4 => Ok(Hertz1),
            5 => Ok(Hertz2),
            6 => Ok(Hertz4),
            7 => Ok(Hertz8),
            8 => Ok(Hertz16),
            9 => Ok(Hertz32),
            other => Err(other),
        }
    }
}

/// # Configuration register
///
/// Holds the resolution, the run/stop bit and the event output mask.
/// After power-up the register reads 00h: running, event output enabled,
/// 10-bit resolution.
#[bitfield(u8)]
#[derive(PartialEq, Eq)]
pub struct Configuration {
    #[bits(2)]
    __: u8,
    /// Conversion resolution (Tres1:Tres0).
    #[bits(2)]
    pub resolution: ReadoutResolution,
    #[bits(2)]
    __: u8,
    /// RUN/STOP bit. When set the device is in standby and only
    /// converts on a one-shot request.
    pub stop: bool,
    /// MASK1 bit. When set the EVENT output is disabled.
    pub event_masked: bool,
}

impl Addressing for Configuration {
    const ADDR: Register = Register::Configuration;
}

/// # Status register
///
/// Read-only. Reading it clears the limit flags.
#[bitfield(u8)]
#[derive(PartialEq, Eq)]
pub struct Status {
    /// The temperature reached the THERM limit.
    pub thrm: bool,
    #[bits(4)]
    __: u8,
    /// The temperature dropped to or below the low limit.
    pub t_low: bool,
    /// The temperature exceeded the high limit.
    pub t_high: bool,
    /// A conversion is in progress.
    pub busy: bool,
}

impl Addressing for Status {
    const ADDR: Register = Register::Status;
}

impl<I: I2c<SevenBitAddress>, D: DelayNs> Stts751<I, D> {
    pub(crate) fn read_byte(&mut self, reg: Register) -> Stts751Result<u8, I::Error> {
        let mut buf = [0; 1];
        self.i2c.write_read(self.state.addr, &[reg.into()], &mut buf)?;
        Ok(buf[0])
    }

    pub(crate) fn write_byte(&mut self, reg: Register, value: u8) -> Stts751Result<(), I::Error> {
        self.i2c.write(self.state.addr, &[reg.into(), value])?;
        Ok(())
    }

    pub(crate) fn read_register<R: Addressing>(&mut self) -> Stts751Result<R, I::Error> {
        Ok(R::from(self.read_byte(R::ADDR)?))
    }

    /// Read-modify-write the bits of `reg` selected by `mask`.
    pub(crate) fn modify_register(
        &mut self,
        reg: Register,
        mask: u8,
        value: u8,
    ) -> Stts751Result<(), I::Error> {
        self.state.check_initialized()?;
        let current = self.read_byte(reg)?;
        self.write_byte(reg, (current & !mask) | (value & mask))
    }

    /// Poll the status register until no conversion is in progress.
    ///
    /// There is no retry limit: a device that stays busy blocks forever.
    pub(crate) fn wait_busy(&mut self) -> Stts751Result<Status, I::Error> {
        self.state.check_initialized()?;
        loop {
            let status: Status = self.read_register()?;
            self.delay.delay_ms(BUSY_POLL_MS);
            if !status.busy() {
                return Ok(status);
            }
            log::trace!("STTS751 {:#04x}: conversion in progress", self.state.addr);
        }
    }
}

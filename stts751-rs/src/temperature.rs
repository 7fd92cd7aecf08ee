use fixed::types::I12F4;

/// Temperature in degrees Celsius with a resolution of 1/16 °C.
pub type Temperature = I12F4;

/// A temperature reading split into whole degrees and sixteenths.
///
/// Both parts carry the sign of the reading: -1.5 °C is `(-1, -8)` and
/// -0.9375 °C is `(0, -15)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Reading {
    integer: i8,
    fractional: i8,
}

impl Reading {
    /// Decode the temperature high and low register bytes.
    ///
    /// The pair is one 16-bit two's-complement value. The reserved low
    /// nibble is cleared, then negative values are negated as a whole
    /// before being split, so a borrow across the byte boundary is
    /// accounted for.
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_registers(high: u8, low: u8) -> Self {
        let raw = i16::from_be_bytes([high, low & 0xf0]);
        let magnitude = raw.unsigned_abs();
        let integer = (magnitude >> 8) as i16;
        let fractional = ((magnitude & 0xff) >> 4) as i16;
        let sign = if raw < 0 { -1 } else { 1 };
        Reading {
            integer: (sign * integer) as i8,
            fractional: (sign * fractional) as i8,
        }
    }

    /// Whole degrees Celsius.
    pub fn integer(&self) -> i8 {
        self.integer
    }

    /// Fractional part in sixteenths of a degree, -15 to 15.
    ///
    /// Unlike a magnitude-only 0 to 15 fraction, this carries the sign of
    /// the reading, so readings between -1 °C and 0 °C stay negative.
    pub fn fractional(&self) -> i8 {
        self.fractional
    }

    /// Temperature in millidegrees Celsius, rounded half away from zero.
    pub fn millidegrees(&self) -> i32 {
        let scaled = self.sixteenths() * 1000;
        if scaled < 0 {
            (scaled - 8) / 16
        } else {
            (scaled + 8) / 16
        }
    }

    /// Temperature in degrees Celsius.
    #[allow(clippy::cast_possible_truncation)]
    pub fn celsius(&self) -> Temperature {
        Temperature::from_bits(self.sixteenths() as i16)
    }

    fn sixteenths(&self) -> i32 {
        i32::from(self.integer) * 16 + i32::from(self.fractional)
    }
}

impl From<Reading> for (i8, i8) {
    fn from(reading: Reading) -> Self {
        (reading.integer, reading.fractional)
    }
}

/// Lowest value an event limit register pair can hold, -128 °C.
pub const LIMIT_MIN: Temperature = Temperature::from_bits(-0x800);
/// Highest value an event limit register pair can hold, 127.9375 °C.
pub const LIMIT_MAX: Temperature = Temperature::from_bits(0x7ff);

/// Encode a limit as the high and low bytes of a limit register pair.
///
/// Returns `None` when `limit` is outside [`LIMIT_MIN`]..=[`LIMIT_MAX`].
pub(crate) fn to_registers(limit: Temperature) -> Option<[u8; 2]> {
    if !(LIMIT_MIN..=LIMIT_MAX).contains(&limit) {
        return None;
    }
    Some((limit.to_bits() << 4).to_be_bytes())
}

/// Decode a limit register pair.
pub(crate) fn from_registers(high: u8, low: u8) -> Temperature {
    Temperature::from_bits(i16::from_be_bytes([high, low]) >> 4)
}

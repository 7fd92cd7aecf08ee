use clap::Parser;
use embedded_hal::{delay::DelayNs, i2c::I2c};
use stts751::{
    ConversionRate, LIMIT_MAX, LIMIT_MIN, ReadoutResolution, Stts751, Stts751Result, Temperature,
};

/// Read temperatures from a STTS751 sensor
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to I2C bus (e.g., /dev/i2c-1)
    #[arg(short, long)]
    path: String,
    /// 7-bit device address, decimal or 0x-prefixed hex
    #[arg(short, long, default_value = "0x48", value_parser = parse_address)]
    address: u8,
    /// Measurement resolution in bits
    #[arg(short, long, default_value_t = 12, value_parser = clap::value_parser!(u8).range(9..=12))]
    resolution: u8,
    /// Conversion rate code (0 = 0.0625 Hz ... 9 = 32 Hz)
    #[arg(long, default_value_t = 4, value_parser = clap::value_parser!(u8).range(0..=9))]
    rate: u8,
    /// THERM limit in degrees Celsius
    #[arg(long, default_value_t = 85, allow_negative_numbers = true)]
    limit: i8,
    /// THERM hysteresis in degrees Celsius
    #[arg(long, default_value_t = 10, allow_negative_numbers = true)]
    hysteresis: i8,
    /// EVENT high limit in degrees Celsius
    #[arg(long, allow_negative_numbers = true, value_parser = parse_limit)]
    high_limit: Option<Temperature>,
    /// Number of one-shot readings, 0 reads forever
    #[arg(short, long, default_value_t = 0)]
    count: u32,
}

fn parse_address(s: &str) -> Result<u8, String> {
    let value = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => s.parse(),
    }
    .map_err(|e| e.to_string())?;
    if value > 0x7f {
        return Err(format!("{value:#04x} is not a 7-bit address"));
    }
    Ok(value)
}

fn parse_limit(s: &str) -> Result<Temperature, String> {
    let value: f32 = s.parse().map_err(|e: std::num::ParseFloatError| e.to_string())?;
    Temperature::checked_from_num(value)
        .filter(|limit| (LIMIT_MIN..=LIMIT_MAX).contains(limit))
        .ok_or_else(|| format!("{value} is outside {LIMIT_MIN}..={LIMIT_MAX} °C"))
}

fn configure<I: I2c, D: DelayNs>(
    sensor: &mut Stts751<I, D>,
    args: &Args,
) -> Stts751Result<(), I::Error> {
    let rate = ConversionRate::try_from(args.rate).unwrap_or_default();
    sensor.set_conversion_rate(rate)?;
    sensor.set_thermal_limit(args.limit, args.hysteresis)?;
    if let Some(limit) = args.high_limit {
        sensor.set_high_limit(limit)?;
        sensor.enable_event(true)?;
    }
    // one-shot conversions need stop mode
    sensor.enable(false)
}

fn main() {
    // Initialize the logger
    env_logger::init();
    // Parse command line arguments
    let args = Args::parse();
    // Open the I2C bus
    let i2c = linux_embedded_hal::I2cdev::new(&args.path).expect("Failed to open I2C device");
    let delay = linux_embedded_hal::Delay;
    let resolution =
        ReadoutResolution::try_from(args.resolution).expect("Resolution range checked by clap");
    // Create and initialize the STTS751 instance
    let mut sensor = Stts751::new(i2c, delay).with_address(args.address);
    let result = sensor.init(resolution);
    if let Err(e) = &result {
        log::error!("Init failed with code {:#x}: {:?}", sensor.error_code(&result), e);
        return;
    }
    log::info!(
        "STTS751-{} at {:#04x}, revision {:?}",
        sensor.product_id(),
        sensor.address(),
        sensor.revision_id()
    );
    configure(&mut sensor, &args).expect("Failed to configure STTS751");

    let mut taken = 0;
    while args.count == 0 || taken < args.count {
        let reading = sensor.one_shot().expect("Failed to read temperature");
        log::info!(
            "Temperature: {} °C ({} m°C)",
            reading.celsius(),
            reading.millidegrees()
        );
        taken += 1;
    }

    sensor.deinit().expect("Failed to deinitialize STTS751");
}

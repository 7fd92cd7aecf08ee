use crate::Register;

/// Addresses of typed registers in the STTS751.
///
/// Implemented by the one-byte register bitfields so the drivers
/// can read them generically.
pub trait Addressing: From<u8> {
    /// Register address.
    const ADDR: Register;
}

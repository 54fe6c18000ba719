//! Register access on top of a byte-level bus.
//!
//! Every `embedded-hal` I2C bus is a [`RegisterBus`], every `embedded-hal-async`
//! one is an [`AsyncRegisterBus`]. Implement the traits directly to put the
//! driver on anything else that can address registers.

use embedded_hal::i2c::{I2c, SevenBitAddress};
use embedded_hal_async::i2c::I2c as AsyncI2c;

/// Blocking register transport.
pub trait RegisterBus {
    type Error: core::fmt::Debug;

    /// Read `buf.len()` consecutive registers starting at `register`.
    ///
    /// Returns how many bytes were actually read.
    fn read_register_block(
        &mut self,
        address: SevenBitAddress,
        register: u8,
        buf: &mut [u8],
    ) -> Result<usize, Self::Error>;

    /// Read-modify-write: bits set in `mask` take the matching bits of
    /// `value`, the rest of the register is left untouched.
    fn configure_register_bits(
        &mut self,
        address: SevenBitAddress,
        register: u8,
        mask: u8,
        value: u8,
    ) -> Result<(), Self::Error>;
}

impl<T> RegisterBus for T
where
    T: I2c,
{
    type Error = T::Error;

    fn read_register_block(
        &mut self,
        address: SevenBitAddress,
        register: u8,
        buf: &mut [u8],
    ) -> Result<usize, Self::Error> {
        self.write_read(address, &[register], buf)?;

        Ok(buf.len())
    }

    fn configure_register_bits(
        &mut self,
        address: SevenBitAddress,
        register: u8,
        mask: u8,
        value: u8,
    ) -> Result<(), Self::Error> {
        let mut current = [0; 1];

        self.write_read(address, &[register], &mut current)?;

        let value = apply_mask(current[0], mask, value);

        self.write(address, &[register, value])
    }
}

/// Async register transport, see [`RegisterBus`].
#[allow(async_fn_in_trait)]
pub trait AsyncRegisterBus {
    type Error: core::fmt::Debug;

    async fn read_register_block(
        &mut self,
        address: SevenBitAddress,
        register: u8,
        buf: &mut [u8],
    ) -> Result<usize, Self::Error>;

    async fn configure_register_bits(
        &mut self,
        address: SevenBitAddress,
        register: u8,
        mask: u8,
        value: u8,
    ) -> Result<(), Self::Error>;
}

impl<T> AsyncRegisterBus for T
where
    T: AsyncI2c,
{
    type Error = T::Error;

    async fn read_register_block(
        &mut self,
        address: SevenBitAddress,
        register: u8,
        buf: &mut [u8],
    ) -> Result<usize, Self::Error> {
        self.write_read(address, &[register], buf).await?;

        Ok(buf.len())
    }

    async fn configure_register_bits(
        &mut self,
        address: SevenBitAddress,
        register: u8,
        mask: u8,
        value: u8,
    ) -> Result<(), Self::Error> {
        let mut current = [0; 1];

        self.write_read(address, &[register], &mut current).await?;

        let value = apply_mask(current[0], mask, value);

        self.write(address, &[register, value]).await
    }
}

pub(crate) const fn apply_mask(current: u8, mask: u8, value: u8) -> u8 {
    (current & !mask) | (value & mask)
}

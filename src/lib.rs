#![cfg_attr(not(test), no_std)]

pub mod asynch;
pub mod bus;
pub mod error;
pub mod gyroscope;
pub mod raw_data;
pub mod register_map;

#[cfg(test)]
mod mock;

use embedded_hal::i2c::SevenBitAddress;

pub use bus::{AsyncRegisterBus, RegisterBus};
pub use error::ReadError;
pub use gyroscope::Gyroscope;
pub use raw_data::{RawData, Rotation};
pub use register_map::{
    Axis, ClockSelection, FilterBypass, FullScaleRange, OutputDataRate, RegisterMap,
};

use register_map::{config, gyro_config, pwr_mgmt_1, pwr_mgmt_2, Field};

const I2C_ADDR_BASE: SevenBitAddress = 0b1101000;

const WHO_AM_I: u8 = 0x71;

/// Bus address for the given state of the AD0 line.
pub const fn device_address(ad0: bool) -> SevenBitAddress {
    I2C_ADDR_BASE | ad0 as u8
}

/// MPU-9250 gyroscope driver.
///
/// Caches the full scale range last written to `GYRO_CONFIG`; rotation reads
/// scale with that cache and never re-read the register.
pub struct Mpu9250<B> {
    bus: B,
    address: SevenBitAddress,
    full_scale: FullScaleRange,
}

impl<B> Mpu9250<B>
where
    B: RegisterBus,
{
    /// No bus traffic happens here, the range cache starts at the power-on default.
    pub fn new(bus: B, ad0: bool) -> Self {
        Self {
            bus,
            address: device_address(ad0),
            full_scale: FullScaleRange::default(),
        }
    }

    /// Give back the bus, consuming the driver
    pub fn release(self) -> B {
        self.bus
    }

    pub fn address(&self) -> SevenBitAddress {
        self.address
    }

    /// Range used for conversions
    pub fn full_scale_range(&self) -> FullScaleRange {
        self.full_scale
    }

    /// Check `WHO_AM_I` response
    pub fn detected(&mut self) -> Result<bool, B::Error> {
        let mut buf = [0; 1];

        let count = self
            .bus
            .read_register_block(self.address, RegisterMap::WhoAmI as u8, &mut buf)?;

        Ok(count == 1 && buf[0] == WHO_AM_I)
    }

    /// Read one axis and convert to degrees per second.
    ///
    /// Any failed or short read yields `0.0`.
    pub fn read_axis_rotation(&mut self, register: RegisterMap) -> f32 {
        let mut buf = [0; 2];

        match self
            .bus
            .read_register_block(self.address, register as u8, &mut buf)
        {
            Ok(2) => self.full_scale.to_dps(i16::from_be_bytes(buf)),
            _result => {
                #[cfg(feature = "defmt")]
                defmt::warn!(
                    "Gyro read at {:?} failed: {:?}",
                    register,
                    defmt::Debug2Format(&_result)
                );

                0.0
            }
        }
    }

    /// Raw `GYRO_XOUT_H..GYRO_ZOUT_L` block, returns how many bytes were read
    pub fn read_xyz(&mut self, buf: &mut [u8; RawData::SIZE]) -> Result<usize, B::Error> {
        self.bus
            .read_register_block(self.address, RegisterMap::GyroXOutH as u8, buf)
    }

    /// Read raw gyroscope measurement data
    pub fn read_gyro_data(&mut self) -> Result<RawData, ReadError<B::Error>> {
        let mut data = [0; RawData::SIZE];

        let count = self.read_xyz(&mut data).map_err(ReadError::Bus)?;

        if count != RawData::SIZE {
            return Err(ReadError::ShortRead {
                expected: RawData::SIZE,
                actual: count,
            });
        }

        Ok(data.into())
    }

    /// Read all three axes in degrees per second
    pub fn read_rotation(&mut self) -> Result<Rotation, ReadError<B::Error>> {
        Ok(self.read_gyro_data()?.scaled(self.full_scale))
    }

    pub fn set_full_scale_range(&mut self, range: FullScaleRange) -> Result<(), B::Error> {
        self.configure(RegisterMap::GyroConfig, gyro_config::GYRO_FS_SEL, range as u8)?;

        self.full_scale = range;

        #[cfg(feature = "defmt")]
        defmt::trace!("Gyro full scale set to {:?}", range);

        Ok(())
    }

    /// Takes effect only while the filter is not bypassed, see [`Self::set_filter_bypass`]
    pub fn set_output_data_rate(&mut self, rate: OutputDataRate) -> Result<(), B::Error> {
        self.configure(RegisterMap::Config, config::DLPF_CFG, rate as u8)
    }

    pub fn set_filter_bypass(&mut self, bypass: FilterBypass) -> Result<(), B::Error> {
        self.configure(RegisterMap::GyroConfig, gyro_config::FCHOICE_B, bypass as u8)
    }

    pub fn select_clock(&mut self, source: ClockSelection) -> Result<(), B::Error> {
        self.configure(RegisterMap::PwrMgmt1, pwr_mgmt_1::CLKSEL, source as u8)
    }

    /// Hard reset, every register returns to its power-on value.
    ///
    /// The cached full scale range is left alone; call
    /// [`Self::set_full_scale_range`] before reading again.
    pub fn reset(&mut self) -> Result<(), B::Error> {
        self.configure(RegisterMap::PwrMgmt1, pwr_mgmt_1::H_RESET, 0xFF)
    }

    pub fn sleep(&mut self) -> Result<(), B::Error> {
        self.configure(RegisterMap::PwrMgmt1, pwr_mgmt_1::SLEEP, 0xFF)
    }

    pub fn awake(&mut self) -> Result<(), B::Error> {
        self.configure(RegisterMap::PwrMgmt1, pwr_mgmt_1::SLEEP, 0x00)
    }

    /// Low power mode where the gyro drive stays on but sensing is off
    pub fn set_gyro_standby(&mut self, standby: bool) -> Result<(), B::Error> {
        self.configure(RegisterMap::PwrMgmt1, pwr_mgmt_1::GYRO_STANDBY, standby as u8)
    }

    /// Power the given axes, the others are disabled
    pub fn enable_axis(&mut self, axis: Axis) -> Result<(), B::Error> {
        self.configure(RegisterMap::PwrMgmt2, pwr_mgmt_2::DISABLE_G, (!axis).bits())
    }

    fn configure(
        &mut self,
        register: RegisterMap,
        field: Field,
        value: u8,
    ) -> Result<(), B::Error> {
        #[cfg(feature = "defmt")]
        defmt::trace!("Write {=u8:#x} to {:?} field {:?}", value, register, field);

        self.bus.configure_register_bits(
            self.address,
            register as u8,
            field.mask(),
            field.encode(value),
        )
    }
}

impl<B> Gyroscope for Mpu9250<B>
where
    B: RegisterBus,
{
    fn rotation_x(&mut self) -> f32 {
        self.read_axis_rotation(RegisterMap::GyroXOutH)
    }

    fn rotation_y(&mut self) -> f32 {
        self.read_axis_rotation(RegisterMap::GyroYOutH)
    }

    fn rotation_z(&mut self) -> f32 {
        self.read_axis_rotation(RegisterMap::GyroZOutH)
    }
}

//! Async flavour of [`Mpu9250`](crate::Mpu9250) for `embedded-hal-async` buses.

use embedded_hal::i2c::SevenBitAddress;

use crate::bus::AsyncRegisterBus;
use crate::error::ReadError;
use crate::raw_data::{RawData, Rotation};
use crate::register_map::{
    config, gyro_config, pwr_mgmt_1, pwr_mgmt_2, Axis, ClockSelection, Field, FilterBypass,
    FullScaleRange, OutputDataRate, RegisterMap,
};
use crate::{device_address, WHO_AM_I};

pub struct Mpu9250Async<B> {
    bus: B,
    address: SevenBitAddress,
    full_scale: FullScaleRange,
}

impl<B> Mpu9250Async<B>
where
    B: AsyncRegisterBus,
{
    pub fn new(bus: B, ad0: bool) -> Self {
        Self {
            bus,
            address: device_address(ad0),
            full_scale: FullScaleRange::default(),
        }
    }

    pub fn release(self) -> B {
        self.bus
    }

    pub fn address(&self) -> SevenBitAddress {
        self.address
    }

    pub fn full_scale_range(&self) -> FullScaleRange {
        self.full_scale
    }

    pub async fn detected(&mut self) -> Result<bool, B::Error> {
        let mut buf = [0; 1];

        let count = self
            .bus
            .read_register_block(self.address, RegisterMap::WhoAmI as u8, &mut buf)
            .await?;

        Ok(count == 1 && buf[0] == WHO_AM_I)
    }

    pub async fn rotation_x(&mut self) -> f32 {
        self.read_axis_rotation(RegisterMap::GyroXOutH).await
    }

    pub async fn rotation_y(&mut self) -> f32 {
        self.read_axis_rotation(RegisterMap::GyroYOutH).await
    }

    pub async fn rotation_z(&mut self) -> f32 {
        self.read_axis_rotation(RegisterMap::GyroZOutH).await
    }

    /// Any failed or short read yields `0.0`
    pub async fn read_axis_rotation(&mut self, register: RegisterMap) -> f32 {
        let mut buf = [0; 2];

        match self
            .bus
            .read_register_block(self.address, register as u8, &mut buf)
            .await
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

    pub async fn read_xyz(&mut self, buf: &mut [u8; RawData::SIZE]) -> Result<usize, B::Error> {
        self.bus
            .read_register_block(self.address, RegisterMap::GyroXOutH as u8, buf)
            .await
    }

    pub async fn read_gyro_data(&mut self) -> Result<RawData, ReadError<B::Error>> {
        let mut data = [0; RawData::SIZE];

        let count = self.read_xyz(&mut data).await.map_err(ReadError::Bus)?;

        if count != RawData::SIZE {
            return Err(ReadError::ShortRead {
                expected: RawData::SIZE,
                actual: count,
            });
        }

        Ok(data.into())
    }

    pub async fn read_rotation(&mut self) -> Result<Rotation, ReadError<B::Error>> {
        Ok(self.read_gyro_data().await?.scaled(self.full_scale))
    }

    pub async fn set_full_scale_range(&mut self, range: FullScaleRange) -> Result<(), B::Error> {
        self.configure(RegisterMap::GyroConfig, gyro_config::GYRO_FS_SEL, range as u8)
            .await?;

        self.full_scale = range;

        #[cfg(feature = "defmt")]
        defmt::trace!("Gyro full scale set to {:?}", range);

        Ok(())
    }

    pub async fn set_output_data_rate(&mut self, rate: OutputDataRate) -> Result<(), B::Error> {
        self.configure(RegisterMap::Config, config::DLPF_CFG, rate as u8)
            .await
    }

    pub async fn set_filter_bypass(&mut self, bypass: FilterBypass) -> Result<(), B::Error> {
        self.configure(RegisterMap::GyroConfig, gyro_config::FCHOICE_B, bypass as u8)
            .await
    }

    pub async fn select_clock(&mut self, source: ClockSelection) -> Result<(), B::Error> {
        self.configure(RegisterMap::PwrMgmt1, pwr_mgmt_1::CLKSEL, source as u8)
            .await
    }

    /// Cached full scale range is not touched, see [`crate::Mpu9250::reset`]
    pub async fn reset(&mut self) -> Result<(), B::Error> {
        self.configure(RegisterMap::PwrMgmt1, pwr_mgmt_1::H_RESET, 0xFF)
            .await
    }

    pub async fn sleep(&mut self) -> Result<(), B::Error> {
        self.configure(RegisterMap::PwrMgmt1, pwr_mgmt_1::SLEEP, 0xFF)
            .await
    }

    pub async fn awake(&mut self) -> Result<(), B::Error> {
        self.configure(RegisterMap::PwrMgmt1, pwr_mgmt_1::SLEEP, 0x00)
            .await
    }

    pub async fn set_gyro_standby(&mut self, standby: bool) -> Result<(), B::Error> {
        self.configure(RegisterMap::PwrMgmt1, pwr_mgmt_1::GYRO_STANDBY, standby as u8)
            .await
    }

    pub async fn enable_axis(&mut self, axis: Axis) -> Result<(), B::Error> {
        self.configure(RegisterMap::PwrMgmt2, pwr_mgmt_2::DISABLE_G, (!axis).bits())
            .await
    }

    async fn configure(
        &mut self,
        register: RegisterMap,
        field: Field,
        value: u8,
    ) -> Result<(), B::Error> {
        #[cfg(feature = "defmt")]
        defmt::trace!("Write {=u8:#x} to {:?} field {:?}", value, register, field);

        self.bus
            .configure_register_bits(
                self.address,
                register as u8,
                field.mask(),
                field.encode(value),
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockI2c;

    fn driver() -> Mpu9250Async<MockI2c> {
        Mpu9250Async::new(MockI2c::new(0x68), false)
    }

    #[tokio::test]
    async fn range_cache_drives_conversion() {
        let mut dev = driver();
        dev.bus.set_registers(0x43, &[0x05, 0x1E, 0xFA, 0xE2, 0x00, 0x00]);

        assert_eq!(dev.rotation_x().await, 10.0);
        assert_eq!(dev.rotation_y().await, -10.0);

        dev.set_full_scale_range(FullScaleRange::Dps2000).await.unwrap();

        assert_eq!(dev.bus.register(0x1B), 0x18);
        assert_eq!(dev.rotation_x().await, 1310.0 / 16.4);
    }

    #[tokio::test]
    async fn failed_read_is_zero() {
        let mut dev = driver();
        dev.bus.set_registers(0x47, &[0x05, 0x1E]);
        dev.bus.fail_next();

        assert_eq!(dev.rotation_z().await, 0.0);
        assert_eq!(dev.rotation_z().await, 10.0);
    }

    #[tokio::test]
    async fn power_management_bits() {
        let mut dev = driver();
        dev.bus.set_register(0x6B, 0b0000_0001);
        dev.bus.set_register(0x6C, 0b0011_1000);

        dev.sleep().await.unwrap();
        assert_eq!(dev.bus.register(0x6B), 0b0100_0001);

        dev.reset().await.unwrap();
        assert_eq!(dev.bus.register(0x6B), 0b1100_0001);

        dev.enable_axis(Axis::X | Axis::Y).await.unwrap();
        assert_eq!(dev.bus.register(0x6C), 0b0011_1001);
    }

    #[tokio::test]
    async fn configuration_errors_propagate() {
        let mut dev = driver();
        dev.bus.fail_next();

        assert!(dev.set_full_scale_range(FullScaleRange::Dps500).await.is_err());
        assert_eq!(dev.full_scale_range(), FullScaleRange::Dps250);

        dev.bus.fail_next();
        assert!(dev.select_clock(ClockSelection::BestAvailable).await.is_err());

        dev.bus.fail_next();
        assert!(dev.reset().await.is_err());

        dev.bus.fail_next();
        assert!(dev.sleep().await.is_err());

        dev.bus.fail_next();
        assert!(dev.awake().await.is_err());

        dev.bus.fail_next();
        assert!(dev.enable_axis(Axis::XYZ).await.is_err());

        dev.bus.fail_next();
        assert!(dev.set_output_data_rate(OutputDataRate::Hz188).await.is_err());

        dev.bus.fail_next();
        assert!(dev.set_filter_bypass(FilterBypass::Disabled).await.is_err());

        dev.bus.fail_next();
        assert!(dev.set_gyro_standby(false).await.is_err());

        assert!(dev.bus.transactions().is_empty());
    }

    /// Transport that delivers fewer bytes than asked for.
    struct ShortBus;

    impl AsyncRegisterBus for ShortBus {
        type Error = ();

        async fn read_register_block(
            &mut self,
            _address: SevenBitAddress,
            _register: u8,
            buf: &mut [u8],
        ) -> Result<usize, ()> {
            buf[0] = 0x7F;

            Ok(1)
        }

        async fn configure_register_bits(
            &mut self,
            _address: SevenBitAddress,
            _register: u8,
            _mask: u8,
            _value: u8,
        ) -> Result<(), ()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn short_read_is_zero() {
        let mut dev = Mpu9250Async::new(ShortBus, false);

        assert_eq!(dev.rotation_x().await, 0.0);
        assert_eq!(dev.rotation_y().await, 0.0);

        dev.set_full_scale_range(FullScaleRange::Dps1000).await.unwrap();

        assert_eq!(dev.rotation_x().await, 0.0);
        assert_eq!(dev.rotation_z().await, 0.0);
        assert_eq!(
            dev.read_gyro_data().await,
            Err(ReadError::ShortRead {
                expected: 6,
                actual: 1
            })
        );
    }

    #[tokio::test]
    async fn typed_block_read() {
        let mut dev = driver();
        dev.bus.set_registers(0x43, &[0x05, 0x1E, 0xFA, 0xE2, 0x00, 0x00]);
        dev.bus.set_register(0x75, 0x71);

        assert_eq!(dev.detected().await, Ok(true));
        assert_eq!(
            dev.read_gyro_data().await,
            Ok(RawData::new(1310, -1310, 0))
        );
        assert_eq!(
            dev.read_rotation().await,
            Ok(Rotation {
                x: 10.0,
                y: -10.0,
                z: 0.0
            })
        );
    }
}

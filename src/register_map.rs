use bitflags::bitflags;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegisterMap {
    Config = 0x1A,
    GyroConfig = 0x1B,
    GyroXOutH = 0x43,
    GyroXOutL = 0x44,
    GyroYOutH = 0x45,
    GyroYOutL = 0x46,
    GyroZOutH = 0x47,
    GyroZOutL = 0x48,
    PwrMgmt1 = 0x6B,
    PwrMgmt2 = 0x6C,
    WhoAmI = 0x75,
}

/// Packed bit-field inside an 8-bit register.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Field {
    shift: u8,
    width: u8,
}

impl Field {
    pub const fn new(shift: u8, width: u8) -> Self {
        Self { shift, width }
    }

    /// Bits covered by the field, in register position.
    pub const fn mask(&self) -> u8 {
        (((1u16 << self.width) - 1) as u8) << self.shift
    }

    /// Move `value` into register position, dropping bits wider than the field.
    pub const fn encode(&self, value: u8) -> u8 {
        (value << self.shift) & self.mask()
    }

    /// Field value read back out of a full register byte.
    pub const fn extract(&self, register: u8) -> u8 {
        (register & self.mask()) >> self.shift
    }

    /// Replace the field inside `register`, leaving every other bit as is.
    pub const fn merge(&self, register: u8, value: u8) -> u8 {
        (register & !self.mask()) | self.encode(value)
    }
}

pub mod config {
    use super::Field;

    pub const DLPF_CFG: Field = Field::new(0, 3);
    /// Not driven here, kept so callers can mask it themselves
    pub const EXT_SYNC_SET: Field = Field::new(3, 3);
}

pub mod gyro_config {
    use super::Field;

    pub const FCHOICE_B: Field = Field::new(0, 2);
    pub const GYRO_FS_SEL: Field = Field::new(3, 2);
}

pub mod pwr_mgmt_1 {
    use super::Field;

    pub const CLKSEL: Field = Field::new(0, 3);
    pub const GYRO_STANDBY: Field = Field::new(4, 1);
    /// Accel cycle mode, not driven by the gyro driver
    pub const CYCLE: Field = Field::new(5, 1);
    pub const SLEEP: Field = Field::new(6, 1);
    pub const H_RESET: Field = Field::new(7, 1);
}

pub mod pwr_mgmt_2 {
    use super::Field;

    pub const DISABLE_G: Field = Field::new(0, 3);
    /// Accel axes, not driven by the gyro driver
    pub const DISABLE_A: Field = Field::new(3, 3);
}

/// Gyro full scale select, `GYRO_FS_SEL` value.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FullScaleRange {
    /// Power-on reset default
    #[default]
    Dps250 = 0b00,
    Dps500 = 0b01,
    Dps1000 = 0b10,
    Dps2000 = 0b11,
}

impl FullScaleRange {
    /// LSB per degree/second
    pub const fn sensitivity(self) -> f32 {
        match self {
            Self::Dps250 => 131.0,
            Self::Dps500 => 65.5,
            Self::Dps1000 => 32.8,
            Self::Dps2000 => 16.4,
        }
    }

    pub const fn max_dps(self) -> u16 {
        match self {
            Self::Dps250 => 250,
            Self::Dps500 => 500,
            Self::Dps1000 => 1000,
            Self::Dps2000 => 2000,
        }
    }

    pub fn to_dps(self, raw: i16) -> f32 {
        raw as f32 / self.sensitivity()
    }
}

/// Gyro and temperature digital low pass filter, `DLPF_CFG` value.
///
/// Only effective while `FCHOICE_B` is `0b00`, see [`FilterBypass`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputDataRate {
    Hz4000 = 0,
    Hz188 = 1,
    Hz98 = 2,
    Hz42 = 3,
    Hz20 = 4,
    Hz10 = 5,
    Hz5 = 6,
    Hz4000Alt = 7,
}

impl OutputDataRate {
    pub const fn bandwidth_hz(self) -> u16 {
        match self {
            Self::Hz4000 | Self::Hz4000Alt => 4000,
            Self::Hz188 => 188,
            Self::Hz98 => 98,
            Self::Hz42 => 42,
            Self::Hz20 => 20,
            Self::Hz10 => 10,
            Self::Hz5 => 5,
        }
    }
}

/// `FCHOICE_B` value. Anything but `Disabled` bypasses the DLPF.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FilterBypass {
    Disabled = 0b00,
    Bandwidth8800Hz = 0b01,
    Bandwidth3600Hz = 0b10,
    Bandwidth8800HzAlt = 0b11,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockSelection {
    Internal20MHz = 0,
    /// PLL if ready, internal oscillator otherwise
    BestAvailable = 1,
    /// Stops the clock and keeps timing generator in reset
    Stop = 7,
}

/// Gyro axes, bit positions as in `PWR_MGMT_2`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Axis(u8);

bitflags! {
    impl Axis: u8 {
        const X = 0b100;
        const Y = 0b010;
        const Z = 0b001;
        const XY = Self::X.bits() | Self::Y.bits();
        const XZ = Self::X.bits() | Self::Z.bits();
        const YZ = Self::Y.bits() | Self::Z.bits();
        const XYZ = Self::X.bits() | Self::Y.bits() | Self::Z.bits();
    }
}

impl Axis {
    pub const NONE: Self = Self::empty();
}

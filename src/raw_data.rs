use crate::register_map::FullScaleRange;

/// Raw gyro ADC counts, as laid out in `GYRO_XOUT_H..GYRO_ZOUT_L`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawData {
    pub(crate) x: i16,
    pub(crate) y: i16,
    pub(crate) z: i16,
}

impl RawData {
    /// Bytes in one `GYRO_XOUT_H..GYRO_ZOUT_L` block read
    pub const SIZE: usize = 6;

    /// X axis counts
    pub fn x(&self) -> i16 {
        self.x
    }

    /// Y axis counts
    pub fn y(&self) -> i16 {
        self.y
    }

    /// Z axis counts
    pub fn z(&self) -> i16 {
        self.z
    }

    /// Build from counts already split per axis, e.g. out of a FIFO
    pub fn new(x: i16, y: i16, z: i16) -> Self {
        Self { x, y, z }
    }

    /// Convert to degrees per second for the given full scale range
    pub fn scaled(&self, range: FullScaleRange) -> Rotation {
        Rotation {
            x: range.to_dps(self.x),
            y: range.to_dps(self.y),
            z: range.to_dps(self.z),
        }
    }
}

/// Big-endian X, Y, Z pairs.
impl From<[u8; Self::SIZE]> for RawData {
    fn from(value: [u8; Self::SIZE]) -> Self {
        Self {
            x: i16::from_be_bytes([value[0], value[1]]),
            y: i16::from_be_bytes([value[2], value[3]]),
            z: i16::from_be_bytes([value[4], value[5]]),
        }
    }
}

/// Angular rate in degrees per second.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rotation {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

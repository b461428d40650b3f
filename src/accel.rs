/// Raw acceleration readings vector, as read from the output registers.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub struct Accel {
    pub(crate) x: i16,
    pub(crate) y: i16,
    pub(crate) z: i16,
}

impl Accel {
    pub fn new(x: i16, y: i16, z: i16) -> Self {
        Self { x, y, z }
    }

    /// Decode the big-endian X/Y/Z output burst.
    pub fn from_bytes(data: [u8; 6]) -> Self {
        Self {
            x: i16::from_be_bytes([data[0], data[1]]),
            y: i16::from_be_bytes([data[2], data[3]]),
            z: i16::from_be_bytes([data[4], data[5]]),
        }
    }

    pub fn x(&self) -> i16 {
        self.x
    }

    pub fn y(&self) -> i16 {
        self.y
    }

    pub fn z(&self) -> i16 {
        self.z
    }

    pub fn scaled(&self, scale: AccelFullScale) -> AxisSample {
        AxisSample::new(
            scale.scale_value(self.x),
            scale.scale_value(self.y),
            scale.scale_value(self.z),
        )
    }
}

/// Accelerometer full-scale range, as encoded in ACCEL_CONFIG bits 4:3.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub enum AccelFullScale {
    /// ±2 g, the reset value
    #[default]
    G2 = 0,
    G4 = 1,
    G8 = 2,
    G16 = 3,
}

impl AccelFullScale {
    /// LSB per g.
    pub const fn scale(self) -> f32 {
        match self {
            Self::G2 => 16384.0,
            Self::G4 => 8192.0,
            Self::G8 => 4096.0,
            Self::G16 => 2048.0,
        }
    }

    pub fn scale_value(self, value: i16) -> f32 {
        (value as f32) / self.scale()
    }

    pub(crate) const fn config_bits(self) -> u8 {
        (self as u8) << 3
    }
}

/// One scaled acceleration sample in g, with its vector magnitude.
///
/// Produced fresh by every acquisition; the driver keeps no history.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub struct AxisSample {
    x: f32,
    y: f32,
    z: f32,
    magnitude: f32,
}

impl AxisSample {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            x,
            y,
            z,
            magnitude: libm::sqrtf(x * x + y * y + z * z),
        }
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn z(&self) -> f32 {
        self.z
    }

    /// Euclidean norm of the three axes.
    pub fn magnitude(&self) -> f32 {
        self.magnitude
    }

    /// Deviation of the magnitude from 1 g, see [`intensity`](crate::motion::intensity).
    pub fn intensity(&self) -> f32 {
        crate::motion::intensity(self.magnitude)
    }
}

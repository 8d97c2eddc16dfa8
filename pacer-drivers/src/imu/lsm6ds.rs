//! LSM6DS-family accelerometer driver
//!
//! Minimal blocking driver for the accelerometer half of the LSM6DS
//! IMU family (LSM6DS3, LSM6DSL, LSM6DSO). Only the pieces the step
//! counter needs: one-time mode configuration and raw axis reads.

use embedded_hal::i2c::I2c;

use pacer_core::motion::RawAcceleration;
use pacer_core::traits::{MotionSensor, SensorUnavailable};

/// Default I2C address (SDO/SA0 low; high gives 0x6B)
pub const DEFAULT_ADDRESS: u8 = 0x6A;

const WHO_AM_I: u8 = 0x0F;
const CTRL1_XL: u8 = 0x10;

/// 416 Hz high-performance mode, +/-2g full scale
const CTRL1_XL_HIGH_PERFORMANCE: u8 = 0x60;

const OUTX_L_XL: u8 = 0x28;
const OUTX_H_XL: u8 = 0x29;
const OUTY_L_XL: u8 = 0x2A;
const OUTY_H_XL: u8 = 0x2B;
const OUTZ_L_XL: u8 = 0x2C;
const OUTZ_H_XL: u8 = 0x2D;

/// LSM6DS accelerometer over a shared I2C bus
pub struct Lsm6ds<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2c> Lsm6ds<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, DEFAULT_ADDRESS)
    }

    pub fn with_address(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Enable the accelerometer in high-performance mode
    ///
    /// Must run once before readings are meaningful; the part powers up
    /// with the accelerometer off.
    pub fn init(&mut self) -> Result<(), I2C::Error> {
        self.write_byte(CTRL1_XL, CTRL1_XL_HIGH_PERFORMANCE)
    }

    /// Read the chip identification register
    pub fn who_am_i(&mut self) -> Result<u8, I2C::Error> {
        self.read_byte(WHO_AM_I)
    }

    fn write_byte(&mut self, register: u8, value: u8) -> Result<(), I2C::Error> {
        self.i2c.write(self.address, &[register, value])
    }

    fn read_byte(&mut self, register: u8) -> Result<u8, I2C::Error> {
        let mut buf = [0u8];
        self.i2c.write_read(self.address, &[register], &mut buf)?;
        Ok(buf[0])
    }

    /// Assemble one signed axis value from its register pair
    fn read_axis(&mut self, low_reg: u8, high_reg: u8) -> Result<i16, I2C::Error> {
        let low = self.read_byte(low_reg)?;
        let high = self.read_byte(high_reg)?;
        Ok(((high as u16) << 8 | low as u16) as i16)
    }
}

impl<I2C: I2c> MotionSensor for Lsm6ds<I2C> {
    fn read_acceleration(&mut self) -> Result<RawAcceleration, SensorUnavailable> {
        let x = self
            .read_axis(OUTX_L_XL, OUTX_H_XL)
            .map_err(|_| SensorUnavailable)?;
        let y = self
            .read_axis(OUTY_L_XL, OUTY_H_XL)
            .map_err(|_| SensorUnavailable)?;
        let z = self
            .read_axis(OUTZ_L_XL, OUTZ_H_XL)
            .map_err(|_| SensorUnavailable)?;

        Ok(RawAcceleration { x, y, z })
    }
}

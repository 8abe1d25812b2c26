//! Interrupt routing and pin electrical configuration.
//!
//! The MMA8652FC has two interrupt outputs. Every interrupt source is routed
//! to INT2 after power-on; setting its bit in `CTRL_REG5` moves it to INT1.
//! Both pins share one polarity and driver setting in `CTRL_REG3`.
//!
//! # Examples
//!
#![cfg_attr(feature = "async", doc = "```ignore")]
#![cfg_attr(not(feature = "async"), doc = "```no_run")]
//! # fn example(mut acc: mma8652::Mma8652<impl embedded_hal::i2c::I2c, impl embedded_hal::delay::DelayNs>) {
//! use mma8652::{interrupt::*, MotionConfig};
//!
//! // Active-high, push-pull, motion events on INT1
//! let cfg = MotionConfig {
//!     pin: IntPin::Int1,
//!     level: ActiveLevel::ActiveHigh,
//!     output: OutputMode::PushPull,
//!     ..Default::default()
//! };
//! acc.enable_with(&cfg).unwrap();
//! # }
//! ```

/// Physical interrupt output that asserts on a motion event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IntPin {
  /// INT1. Requires an explicit routing write.
  Int1 = 0x1,
  /// INT2, the power-on default.
  #[default]
  Int2 = 0x0,
}

impl From<IntPin> for u8 {
  fn from(value: IntPin) -> Self {
    value as u8
  }
}

impl TryFrom<u8> for IntPin {
  type Error = ();
  fn try_from(v: u8) -> Result<Self, Self::Error> {
    match v & 0x01 {
      0 => Ok(IntPin::Int2),
      1 => Ok(IntPin::Int1),
      _ => Err(()),
    }
  }
}

/// Configures the pin output mode (push-pull or open-drain).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputMode {
  #[default]
  PushPull = 0,
  OpenDrain = 1,
}

impl From<OutputMode> for u8 {
  fn from(value: OutputMode) -> Self {
    value as u8
  }
}

impl TryFrom<u8> for OutputMode {
  type Error = ();
  fn try_from(v: u8) -> Result<Self, Self::Error> {
    match v & 0x01 {
      0 => Ok(OutputMode::PushPull),
      1 => Ok(OutputMode::OpenDrain),
      _ => Err(()),
    }
  }
}

/// Represents the active level for interrupt pins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActiveLevel {
  #[default]
  ActiveLow = 0,
  ActiveHigh = 1,
}

impl From<ActiveLevel> for u8 {
  fn from(value: ActiveLevel) -> Self {
    value as u8
  }
}

impl TryFrom<u8> for ActiveLevel {
  type Error = ();
  fn try_from(v: u8) -> Result<Self, Self::Error> {
    match v & 0x01 {
      0 => Ok(ActiveLevel::ActiveLow),
      1 => Ok(ActiveLevel::ActiveHigh),
      _ => Err(()),
    }
  }
}

/// `CTRL_REG3`: pin electrical setup and wake sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[packbits::pack(bytes = 1)]
pub(crate) struct WakeCtrl {
  #[bits(1)]
  pub output: OutputMode,
  #[bits(1)]
  pub level: ActiveLevel,
  // Freefall/motion can wake the system from auto-sleep.
  #[skip(1)]
  #[bits(1)]
  pub wake_ff_mt: bool,
}

/// `CTRL_REG4`: per-source interrupt enable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[packbits::pack(bytes = 1)]
pub(crate) struct IntEnable {
  #[skip(2)]
  #[bits(1)]
  pub ff_mt: bool,
}

/// `CTRL_REG5`: per-source routing, 1 = INT1, 0 = INT2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[packbits::pack(bytes = 1)]
pub(crate) struct IntRoute {
  #[skip(2)]
  #[bits(1)]
  pub ff_mt: IntPin,
}

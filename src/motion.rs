//! Freefall/motion detection configuration and event source.
//!
//! The detector compares the high-g magnitude of each enabled axis against a
//! 7-bit threshold in steps of 0.063 g. Once the condition has held for the
//! debounce count the event flag in `FF_MT_SRC` is set and the routed interrupt
//! pin asserts. With latching enabled the flag stays set until `FF_MT_SRC` is
//! read, which is what [`restart`](crate::Mma8652::restart) does.
//!
//! # Examples
//!
#![cfg_attr(feature = "async", doc = "```ignore")]
#![cfg_attr(not(feature = "async"), doc = "```no_run")]
//! # fn example(mut acc: mma8652::Mma8652<impl embedded_hal::i2c::I2c, impl embedded_hal::delay::DelayNs>) {
//! use mma8652::{Axes, IntPin, MotionConfig};
//!
//! // Only horizontal motion above 0.5 g, reported on INT1
//! let cfg = MotionConfig {
//!     axes: Axes { x: true, y: true, z: false },
//!     threshold_g: 0.5,
//!     pin: IntPin::Int1,
//!     ..Default::default()
//! };
//! acc.enable_with(&cfg).unwrap();
//!
//! // ...interrupt fires...
//! let src = acc.restart().unwrap();
//! if src.x_event {
//!     // moved along X
//! }
//! # }
//! ```

use micromath::F32Ext;

use crate::{defs::THS_RESOLUTION_G, interrupt::*};

/// Quantize a threshold in g into the 7-bit `FF_MT_THS` code.
///
/// The result is `floor(threshold_g / resolution_g) & 0x7F`. Values past the
/// 7-bit range wrap through the mask instead of being rejected; bit 7 of the
/// register belongs to [`DebounceMode`] and is never touched here.
pub fn quantize_threshold(threshold_g: f32, resolution_g: f32) -> u8 {
  let q = threshold_g / resolution_g;
  // Every f32 at or above 2^24 is already integral; micromath's floor goes
  // through i32 and would saturate there.
  let steps = if q >= F32_EXACT { q } else { F32Ext::floor(q) };
  (steps % 128.0) as u8
}

const F32_EXACT: f32 = 16_777_216.0;

/// Axes that take part in event detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Axes {
  pub x: bool,
  pub y: bool,
  pub z: bool,
}

impl Axes {
  pub const ALL: Axes = Axes { x: true, y: true, z: true };
}

impl Default for Axes {
  fn default() -> Self {
    Self::ALL
  }
}

/// How the per-axis conditions combine (`FF_MT_CFG.OAE`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DetectMode {
  /// Logical AND of "below threshold" on all enabled axes.
  FreeFall = 0,
  /// Logical OR of "above threshold" on any enabled axis.
  #[default]
  Motion = 1,
}

impl From<DetectMode> for u8 {
  fn from(value: DetectMode) -> Self {
    value as u8
  }
}

impl TryFrom<u8> for DetectMode {
  type Error = ();
  fn try_from(v: u8) -> Result<Self, Self::Error> {
    match v & 0x01 {
      0 => Ok(DetectMode::FreeFall),
      1 => Ok(DetectMode::Motion),
      _ => Err(()),
    }
  }
}

/// Debounce counter behaviour when the condition drops out (`FF_MT_THS.DBCNTM`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DebounceMode {
  /// Counter decrements on each non-qualifying sample.
  #[default]
  Decrement = 0,
  /// Counter clears on the first non-qualifying sample.
  Clear = 1,
}

impl From<DebounceMode> for u8 {
  fn from(value: DebounceMode) -> Self {
    value as u8
  }
}

impl TryFrom<u8> for DebounceMode {
  type Error = ();
  fn try_from(v: u8) -> Result<Self, Self::Error> {
    match v & 0x01 {
      0 => Ok(DebounceMode::Decrement),
      1 => Ok(DebounceMode::Clear),
      _ => Err(()),
    }
  }
}

/// Complete freefall/motion setup applied by
/// [`enable_with`](crate::Mma8652::enable_with).
///
/// - `threshold_g`: trigger level in g, quantized with [`quantize_threshold`]
///   at 0.063 g/LSB. Default = 1.1 g (code 17).
/// - `debounce`: consecutive qualifying samples before the event asserts.
///   Default = 16.
/// - `latch`: keep the event asserted until `FF_MT_SRC` is read. Default = on.
/// - `wake`: let an event wake the device from auto-sleep. Default = on.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotionConfig {
  pub axes: Axes,
  pub mode: DetectMode,
  pub latch: bool,
  pub threshold_g: f32,
  pub debounce: u8,
  pub debounce_mode: DebounceMode,
  pub pin: IntPin,
  pub level: ActiveLevel,
  pub output: OutputMode,
  pub wake: bool,
}

impl Default for MotionConfig {
  fn default() -> Self {
    Self {
      axes: Axes::ALL,
      mode: DetectMode::Motion,
      latch: true,
      threshold_g: 1.1,
      debounce: 16,
      debounce_mode: DebounceMode::Decrement,
      pin: IntPin::Int2,
      level: ActiveLevel::ActiveLow,
      output: OutputMode::PushPull,
      wake: true,
    }
  }
}

impl MotionConfig {
  /// Threshold code as written to the low seven bits of `FF_MT_THS`.
  pub fn threshold_code(&self) -> u8 {
    quantize_threshold(self.threshold_g, THS_RESOLUTION_G)
  }

  pub(crate) fn cfg_reg(&self) -> FfMtCfg {
    FfMtCfg { x: self.axes.x, y: self.axes.y, z: self.axes.z, mode: self.mode, latch: self.latch }
  }

  pub(crate) fn ths_reg(&self) -> FfMtThs {
    FfMtThs { threshold: self.threshold_code(), debounce_mode: self.debounce_mode }
  }

  pub(crate) fn wake_reg(&self) -> WakeCtrl {
    WakeCtrl { output: self.output, level: self.level, wake_ff_mt: self.wake }
  }
}

/// `FF_MT_CFG`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[packbits::pack(bytes = 1)]
pub(crate) struct FfMtCfg {
  #[skip(3)]
  pub x: bool,
  pub y: bool,
  pub z: bool,
  #[bits(1)]
  pub mode: DetectMode,
  pub latch: bool,
}

/// `FF_MT_THS`. Bit 7 is the debounce mode only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[packbits::pack(bytes = 1)]
pub(crate) struct FfMtThs {
  #[bits(7)]
  pub threshold: u8,
  #[bits(1)]
  pub debounce_mode: DebounceMode,
}

/// Decoded `FF_MT_SRC`.
///
/// Reading the register clears a latched event and re-arms the interrupt.
/// Polarity flags report the direction of the last event on that axis:
/// `false` = positive g, `true` = negative g.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[packbits::pack(bytes = 1)]
pub struct MotionSource {
  pub x_negative: bool,
  pub x_event: bool,
  pub y_negative: bool,
  pub y_event: bool,
  pub z_negative: bool,
  pub z_event: bool,
  /// One or more event flags were asserted.
  #[skip(1)]
  pub event_active: bool,
}

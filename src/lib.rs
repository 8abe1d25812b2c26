#![cfg_attr(not(test), no_std)]
#![doc = include_str!("../README.md")]
//!
//! ## Design Principles
//!
//! - **Sequenced**: Every operation is an ordered step list; activation is always last
//! - **Blocking by default**: Built on `embedded-hal` I2C traits, `async` feature for `embedded-hal-async`
//! - **No retries**: Bus failures are reported once and left to the caller
//! - **Type-safe**: Pins, polarity and debounce modes are enums, not magic bytes
//!
//! ## Module Organization
//!
//! - [`motion`]: Freefall/motion detector configuration and event source
//! - [`interrupt`]: Interrupt pin routing and electrical setup
//!
//! ## Basic Usage
//!
#![cfg_attr(feature = "async", doc = "```ignore")]
#![cfg_attr(not(feature = "async"), doc = "```no_run")]
//! # fn example() -> Result<(), mma8652::Error<embedded_hal::i2c::ErrorKind>> {
//! # use mma8652::{IntPin, Mma8652};
//! # let i2c: embedded_hal_mock::eh1::i2c::Mock = todo!(); // Your I2C implementation
//! # let delay = embedded_hal_mock::eh1::delay::NoopDelay::new(); // Your delay implementation
//! let mut acc = Mma8652::new(i2c, delay);
//!
//! // Reset, verify and arm motion detection on INT1
//! acc.enable(IntPin::Int1)?;
//!
//! // In the interrupt handler's deferred work: clear the latch
//! let source = acc.restart()?;
//!
//! // Power down
//! acc.disable()?;
//! # Ok(())
//! # }
//! ```

#[cfg(feature = "async")]
mod asynch;
#[cfg(not(feature = "async"))]
mod blocking;
mod defs;
pub mod interrupt;
pub mod motion;
mod sequence;
mod types;

pub use interrupt::IntPin;
pub use motion::*;
pub use types::*;

use sequence::{Policy, Step};

/// Driver error type.
///
/// Wraps the underlying I2C error and adds MMA8652FC-specific error
/// conditions. Nothing in the driver panics or retries; every failure comes
/// back through this type.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
  /// I2C transaction did not complete
  I2c(E),
  /// `WHO_AM_I` mismatch (expected 0x4A); wrong part or bus wiring fault
  InvalidChipId(u8),
  /// Register value could not be packed or unpacked
  Data,
}

/// MMA8652FC device driver instance.
///
/// Owns the I2C bus and delay provider and tracks the modeled [`State`] of
/// the device. Callers must serialize access themselves; in particular
/// [`restart`](Self::restart) must not race [`enable`](Self::enable) or
/// [`disable`](Self::disable), which `&mut self` already enforces within a
/// single owner.
///
/// # Type Parameters
///
/// - `I`: I2C implementation (`embedded_hal::i2c::I2c`, or the async
///   variant with the `async` feature)
/// - `D`: Delay provider (`embedded_hal::delay::DelayNs`, or the async variant)
pub struct Mma8652<I, D> {
  i2c: I,
  delay: D,
  state: State,
}

impl<I, D> Mma8652<I, D> {
  /// Create a new driver instance. No bus traffic happens until the first
  /// operation.
  ///
  /// # Arguments
  ///
  /// - `i2c`: I2C bus implementation
  /// - `delay`: Delay provider for the post-reset settle time
  pub fn new(i2c: I, delay: D) -> Self {
    Self { i2c, delay, state: State::Unknown }
  }

  /// Modeled lifecycle state. Not read back from the device.
  pub fn state(&self) -> State {
    self.state
  }

  /// Give the bus and delay back, ending the driver's session.
  pub fn release(self) -> (I, D) {
    (self.i2c, self.delay)
  }

  fn enter(&mut self, next: State) {
    if self.state != next {
      log::debug!("mma8652: {:?} -> {:?}", self.state, next);
      self.state = next;
    }
  }

  /// Apply `step.policy` to the outcome of its transaction.
  ///
  /// Returns `Err` only when the sequence must stop. Best-effort failures are
  /// parked in `deferred`, first one wins.
  fn apply<E>(
    &mut self,
    step: &Step,
    outcome: Result<(), Error<E>>,
    deferred: &mut Option<Error<E>>,
  ) -> Result<(), Error<E>> {
    match (outcome, step.policy) {
      (Ok(()), _) => {}
      (Err(_), Policy::Tolerated) => {
        log::warn!("mma8652: {:?} not acknowledged, continuing", step.op);
      }
      (Err(e), Policy::BestEffort) => {
        log::warn!("mma8652: {:?} failed", step.op);
        deferred.get_or_insert(e);
        return Ok(());
      }
      (Err(e), Policy::Required) => {
        log::error!("mma8652: {:?} failed, aborting", step.op);
        self.enter(State::Faulted);
        return Err(e);
      }
    }

    if let Some(next) = step.then {
      self.enter(next);
    }
    Ok(())
  }
}

/// Identification check shared by both front ends.
fn check_id<E>(id: u8) -> Result<(), Error<E>> {
  if id == defs::MMA8652_CHIP_ID {
    Ok(())
  } else {
    Err(Error::InvalidChipId(id))
  }
}

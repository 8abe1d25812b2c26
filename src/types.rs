/// Lifecycle state of the device as modeled by the driver.
///
/// The driver never reads this back from the chip; it advances the state as
/// each step of an operation is acknowledged. A latched motion event is a
/// hardware condition inside [`State::Active`] and is reported by
/// [`restart`](crate::Mma8652::restart) instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
  /// Power-on, nothing known about the device yet.
  #[default]
  Unknown,
  /// Soft reset issued, registers back at their power-on values.
  Reset,
  /// `WHO_AM_I` matched.
  Identified,
  /// At least one configuration register programmed, device still in standby.
  Configured,
  /// Active and monitoring; the interrupt line asserts on qualifying motion.
  Active,
  /// Interrupts off and device in standby (minimum power).
  Standby,
  /// A required step failed. Register contents are undefined until the next
  /// successful [`enable`](crate::Mma8652::enable).
  Faulted,
}

/// Current system mode as reported by `SYSMOD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SystemMode {
  Standby = 0b00,
  Wake = 0b01,
  Sleep = 0b10,
}

impl From<SystemMode> for u8 {
  fn from(value: SystemMode) -> Self {
    value as u8
  }
}

impl TryFrom<u8> for SystemMode {
  type Error = ();

  fn try_from(value: u8) -> Result<Self, Self::Error> {
    match value {
      0b00 => Ok(SystemMode::Standby),
      0b01 => Ok(SystemMode::Wake),
      0b10 => Ok(SystemMode::Sleep),
      _ => Err(()),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[packbits::pack(bytes = 1)]
pub(crate) struct SysMod {
  #[bits(2)]
  pub mode: SystemMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[packbits::pack(bytes = 1)]
pub(crate) struct ChipId {
  pub id: u8,
}

/// `CTRL_REG1`. Only the active bit is driven; the remaining fields stay at
/// their reset values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[packbits::pack(bytes = 1)]
pub(crate) struct CtrlReg1 {
  pub active: bool,
}

/// `CTRL_REG2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[packbits::pack(bytes = 1)]
pub(crate) struct CtrlReg2 {
  #[skip(6)]
  pub rst: bool,
}

#![allow(dead_code)]

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub(crate) enum Reg {
  Status = 0x00,
  SysMod = 0x0B,
  WhoAmI = 0x0D,
  FfMtCfg = 0x15,
  FfMtSrc = 0x16,
  FfMtThs = 0x17,
  FfMtCount = 0x18,
  CtrlReg1 = 0x2A,
  CtrlReg2 = 0x2B,
  CtrlReg3 = 0x2C,
  CtrlReg4 = 0x2D,
  CtrlReg5 = 0x2E,
}

impl From<Reg> for u8 {
  #[inline]
  fn from(r: Reg) -> Self {
    r as u8
  }
}

// Constants used across the crate
pub(crate) const MMA8652_CHIP_ID: u8 = 0x4A;
pub(crate) const SOFT_RESET_DELAY: u32 = 1; // ms, bus settles after the reset NAK

// I2C address (fixed, SA0 is not bonded out on this part)
pub(crate) const ADDR_I2C: u8 = 0x1D;

/// `FF_MT_THS` resolution, g per LSB.
pub(crate) const THS_RESOLUTION_G: f32 = 0.063;

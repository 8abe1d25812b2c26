//! Register programming sequences.
//!
//! Each driver operation is an ordered list of [`Step`]s. The executor in the
//! blocking/async front end walks the list and applies the step's [`Policy`]
//! to the outcome of its bus transaction; nothing here touches the bus.

use heapless::Vec;

use crate::{
  defs::*,
  interrupt::{IntEnable, IntPin, IntRoute},
  motion::MotionConfig,
  types::{CtrlReg1, CtrlReg2, State},
};

/// Upper bound on steps in any sequence.
pub(crate) const MAX_STEPS: usize = 12;

pub(crate) type Steps = Vec<Step, MAX_STEPS>;

/// What to do when a step's transaction fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub(crate) enum Policy {
  /// Abort the sequence and surface the error.
  Required,
  /// Log and carry on as if it succeeded.
  Tolerated,
  /// Log, keep going, report the first such error at the end.
  BestEffort,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub(crate) enum Op {
  Write(Reg, u8),
  /// Read `WHO_AM_I` and compare against the MMA8652FC signature.
  Identify,
  /// Blocking delay in milliseconds.
  Settle(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub(crate) struct Step {
  pub op: Op,
  pub policy: Policy,
  /// State entered once the step completes.
  pub then: Option<State>,
}

impl Step {
  const fn required(op: Op, then: State) -> Self {
    Self { op, policy: Policy::Required, then: Some(then) }
  }
}

fn encode<T: TryInto<[u8; 1]>>(v: T) -> Result<u8, ()> {
  v.try_into().map(|b| b[0]).map_err(drop)
}

fn push(s: &mut Steps, step: Step) -> Result<(), ()> {
  s.push(step).map_err(drop)
}

/// Reset, identify, configure, activate.
///
/// Activation is always the final step so a half-programmed detector never
/// runs.
pub(crate) fn enable(cfg: &MotionConfig) -> Result<Steps, ()> {
  let mut s = Steps::new();

  // The reset also resets the chip's I2C block, so the ACK is often lost.
  let rst = encode(CtrlReg2 { rst: true })?;
  push(&mut s, Step { op: Op::Write(Reg::CtrlReg2, rst), policy: Policy::Tolerated, then: Some(State::Reset) })?;
  push(&mut s, Step { op: Op::Settle(SOFT_RESET_DELAY), policy: Policy::Required, then: None })?;
  push(&mut s, Step::required(Op::Identify, State::Identified))?;

  let wake = encode(cfg.wake_reg())?;
  push(&mut s, Step::required(Op::Write(Reg::CtrlReg3, wake), State::Configured))?;
  if cfg.pin == IntPin::Int1 {
    let route = encode(IntRoute { ff_mt: IntPin::Int1 })?;
    push(&mut s, Step::required(Op::Write(Reg::CtrlReg5, route), State::Configured))?;
  }
  let int_en = encode(IntEnable { ff_mt: true })?;
  push(&mut s, Step::required(Op::Write(Reg::CtrlReg4, int_en), State::Configured))?;
  let mt_cfg = encode(cfg.cfg_reg())?;
  push(&mut s, Step::required(Op::Write(Reg::FfMtCfg, mt_cfg), State::Configured))?;
  let ths = encode(cfg.ths_reg())?;
  push(&mut s, Step::required(Op::Write(Reg::FfMtThs, ths), State::Configured))?;
  push(&mut s, Step::required(Op::Write(Reg::FfMtCount, cfg.debounce), State::Configured))?;

  let active = encode(CtrlReg1 { active: true })?;
  push(&mut s, Step::required(Op::Write(Reg::CtrlReg1, active), State::Active))?;

  Ok(s)
}

/// Interrupts off first, then standby, so the transition cannot glitch the pin.
pub(crate) fn disable() -> Result<Steps, ()> {
  let mut s = Steps::new();
  let int_off = encode(IntEnable { ff_mt: false })?;
  let standby = encode(CtrlReg1 { active: false })?;
  push(&mut s, Step { op: Op::Write(Reg::CtrlReg4, int_off), policy: Policy::BestEffort, then: None })?;
  push(&mut s, Step { op: Op::Write(Reg::CtrlReg1, standby), policy: Policy::BestEffort, then: Some(State::Standby) })?;
  Ok(s)
}

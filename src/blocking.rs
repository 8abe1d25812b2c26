use embedded_hal::{delay::DelayNs, i2c::*};

use crate::{
  check_id,
  defs::*,
  sequence::{self, Op, Step},
  types::{ChipId, SysMod},
  Error, IntPin, Mma8652, MotionConfig, MotionSource, SystemMode,
};

impl<I, D, E> Mma8652<I, D>
where
  I: I2c<SevenBitAddress, Error = E>,
  D: DelayNs,
{
  /// Arm motion detection with the reference configuration, interrupts on `pin`.
  ///
  /// Equivalent to [`enable_with`](Self::enable_with) with
  /// `MotionConfig { pin, ..Default::default() }`: all axes, OR logic,
  /// latched, 1.1 g threshold, 16 sample debounce.
  pub fn enable(&mut self, pin: IntPin) -> Result<(), Error<E>> {
    self.enable_with(&MotionConfig { pin, ..Default::default() })
  }

  /// Soft reset, verify `WHO_AM_I`, program the detector and go active.
  ///
  /// A lost ACK on the reset write is expected and ignored. Any later bus
  /// failure or an ID mismatch stops the sequence where it is; no rollback is
  /// attempted and [`state`](Self::state) reports [`Faulted`](crate::State::Faulted).
  pub fn enable_with(&mut self, cfg: &MotionConfig) -> Result<(), Error<E>> {
    let steps = sequence::enable(cfg).map_err(|_| Error::Data)?;
    self.run(&steps)
  }

  /// Disable the motion interrupt, then drop to standby.
  ///
  /// Both writes are always attempted; the first failure is returned.
  pub fn disable(&mut self) -> Result<(), Error<E>> {
    let steps = sequence::disable().map_err(|_| Error::Data)?;
    self.run(&steps)
  }

  /// Read `FF_MT_SRC` (clear-on-read), re-arming a latched interrupt.
  ///
  /// If this fails the latch stays set and the pin will not fire again.
  pub fn restart(&mut self) -> Result<MotionSource, Error<E>> {
    self.read(Reg::FfMtSrc)
  }

  /// Read the `WHO_AM_I` register. Should be `0x4A`.
  pub fn get_id(&mut self) -> Result<u8, Error<E>> {
    let r: ChipId = self.read(Reg::WhoAmI)?;
    Ok(r.id)
  }

  /// Read `SYSMOD`.
  pub fn get_system_mode(&mut self) -> Result<SystemMode, Error<E>> {
    let r: SysMod = self.read(Reg::SysMod)?;
    Ok(r.mode)
  }

  fn run(&mut self, steps: &[Step]) -> Result<(), Error<E>> {
    let mut deferred = None;
    for step in steps {
      let outcome = self.exec(step.op);
      self.apply(step, outcome, &mut deferred)?;
    }
    deferred.map_or(Ok(()), Err)
  }

  fn exec(&mut self, op: Op) -> Result<(), Error<E>> {
    match op {
      Op::Write(reg, v) => self.write_u8(reg, v),
      Op::Identify => check_id(self.get_id()?),
      Op::Settle(ms) => {
        self.delay.delay_ms(ms);
        Ok(())
      }
    }
  }

  fn read<const N: usize, T: TryFrom<[u8; N]>>(&mut self, reg: Reg) -> Result<T, Error<E>> {
    let mut b = [0u8; N];
    self.i2c.write_read(ADDR_I2C, &[reg.into()], &mut b).map_err(Error::I2c)?;
    TryFrom::try_from(b).map_err(|_| Error::Data)
  }

  fn write_u8(&mut self, reg: Reg, value: u8) -> Result<(), Error<E>> {
    self.i2c.write(ADDR_I2C, &[reg.into(), value]).map_err(Error::I2c)
  }
}

#[cfg(test)]
mod tests {
  use embedded_hal::i2c::ErrorKind;
  use embedded_hal_mock::eh1::{
    delay::NoopDelay,
    i2c::{Mock, Transaction},
  };

  use super::*;
  use crate::State;

  const ADDR: u8 = 0x1D;

  fn w(reg: u8, v: u8) -> Transaction {
    Transaction::write(ADDR, vec![reg, v])
  }

  fn who_am_i(id: u8) -> Transaction {
    Transaction::write_read(ADDR, vec![0x0D], vec![id])
  }

  fn fail(t: Transaction) -> Transaction {
    t.with_error(ErrorKind::Other)
  }

  fn driver(expect: &[Transaction]) -> Mma8652<Mock, NoopDelay> {
    Mma8652::new(Mock::new(expect), NoopDelay::new())
  }

  fn finish(acc: Mma8652<Mock, NoopDelay>) {
    let (mut i2c, _) = acc.release();
    i2c.done();
  }

  #[test]
  fn enable_int1_reference_sequence() {
    let mut acc = driver(&[
      w(0x2B, 0x40),
      who_am_i(0x4A),
      w(0x2C, 0x08),
      w(0x2E, 0x04),
      w(0x2D, 0x04),
      w(0x15, 0xF8),
      w(0x17, 0x11),
      w(0x18, 0x10),
      w(0x2A, 0x01),
    ]);
    acc.enable(IntPin::Int1).unwrap();
    assert_eq!(acc.state(), State::Active);
    finish(acc);
  }

  #[test]
  fn enable_int2_has_no_routing_write() {
    let mut acc = driver(&[
      w(0x2B, 0x40),
      who_am_i(0x4A),
      w(0x2C, 0x08),
      w(0x2D, 0x04),
      w(0x15, 0xF8),
      w(0x17, 0x11),
      w(0x18, 0x10),
      w(0x2A, 0x01),
    ]);
    acc.enable(IntPin::Int2).unwrap();
    assert_eq!(acc.state(), State::Active);
    finish(acc);
  }

  #[test]
  fn reset_nak_is_tolerated() {
    let mut acc = driver(&[
      fail(w(0x2B, 0x40)),
      who_am_i(0x4A),
      w(0x2C, 0x08),
      w(0x2D, 0x04),
      w(0x15, 0xF8),
      w(0x17, 0x11),
      w(0x18, 0x10),
      w(0x2A, 0x01),
    ]);
    acc.enable(IntPin::Int2).unwrap();
    assert_eq!(acc.state(), State::Active);
    finish(acc);
  }

  #[test]
  fn wrong_chip_id_stops_before_any_config_write() {
    let mut acc = driver(&[w(0x2B, 0x40), who_am_i(0x5A)]);
    let res = acc.enable(IntPin::Int1);
    assert!(matches!(res, Err(Error::InvalidChipId(0x5A))));
    assert_eq!(acc.state(), State::Faulted);
    finish(acc);
  }

  #[test]
  fn chip_id_read_failure_is_bus_error() {
    let mut acc = driver(&[w(0x2B, 0x40), fail(who_am_i(0x4A))]);
    let res = acc.enable(IntPin::Int1);
    assert!(matches!(res, Err(Error::I2c(ErrorKind::Other))));
    assert_eq!(acc.state(), State::Faulted);
    finish(acc);
  }

  #[test]
  fn config_write_failure_aborts_before_activation() {
    let mut acc = driver(&[
      w(0x2B, 0x40),
      who_am_i(0x4A),
      w(0x2C, 0x08),
      w(0x2E, 0x04),
      w(0x2D, 0x04),
      fail(w(0x15, 0xF8)),
    ]);
    let res = acc.enable(IntPin::Int1);
    assert!(matches!(res, Err(Error::I2c(ErrorKind::Other))));
    assert_eq!(acc.state(), State::Faulted);
    // no 0x17/0x18/0x2A writes, the mock would reject them
    finish(acc);
  }

  #[test]
  fn enable_with_custom_config() {
    let cfg = MotionConfig {
      threshold_g: 0.5,
      debounce: 4,
      debounce_mode: crate::DebounceMode::Clear,
      level: crate::interrupt::ActiveLevel::ActiveHigh,
      ..Default::default()
    };
    let mut acc = driver(&[
      w(0x2B, 0x40),
      who_am_i(0x4A),
      w(0x2C, 0x0A),
      w(0x2D, 0x04),
      w(0x15, 0xF8),
      w(0x17, 0x87),
      w(0x18, 0x04),
      w(0x2A, 0x01),
    ]);
    acc.enable_with(&cfg).unwrap();
    finish(acc);
  }

  #[test]
  fn re_enable_after_fault_recovers() {
    let mut acc = driver(&[
      w(0x2B, 0x40),
      fail(who_am_i(0x4A)),
      w(0x2B, 0x40),
      who_am_i(0x4A),
      w(0x2C, 0x08),
      w(0x2D, 0x04),
      w(0x15, 0xF8),
      w(0x17, 0x11),
      w(0x18, 0x10),
      w(0x2A, 0x01),
    ]);
    assert!(acc.enable(IntPin::Int2).is_err());
    assert_eq!(acc.state(), State::Faulted);
    acc.enable(IntPin::Int2).unwrap();
    assert_eq!(acc.state(), State::Active);
    finish(acc);
  }

  #[test]
  fn disable_writes_interrupts_then_standby() {
    let mut acc = driver(&[w(0x2D, 0x00), w(0x2A, 0x00)]);
    acc.disable().unwrap();
    assert_eq!(acc.state(), State::Standby);
    finish(acc);
  }

  #[test]
  fn disable_still_enters_standby_when_interrupt_write_fails() {
    let mut acc = driver(&[fail(w(0x2D, 0x00)), w(0x2A, 0x00)]);
    let res = acc.disable();
    assert!(matches!(res, Err(Error::I2c(ErrorKind::Other))));
    assert_eq!(acc.state(), State::Standby);
    finish(acc);
  }

  #[test]
  fn disable_reports_standby_failure() {
    let mut acc = driver(&[w(0x2D, 0x00), fail(w(0x2A, 0x00))]);
    assert!(matches!(acc.disable(), Err(Error::I2c(ErrorKind::Other))));
    assert_eq!(acc.state(), State::Unknown);
    finish(acc);
  }

  #[test]
  fn restart_reads_source_once() {
    let mut acc = driver(&[Transaction::write_read(ADDR, vec![0x16], vec![0x00])]);
    let src = acc.restart().unwrap();
    assert!(!src.event_active);
    finish(acc);
  }

  #[test]
  fn restart_decodes_latched_event() {
    // EA | ZHE | ZHP | XHE
    let mut acc = driver(&[Transaction::write_read(ADDR, vec![0x16], vec![0b1011_0010])]);
    let src = acc.restart().unwrap();
    assert!(src.event_active);
    assert!(src.x_event && !src.x_negative);
    assert!(!src.y_event);
    assert!(src.z_event && src.z_negative);
    finish(acc);
  }

  #[test]
  fn restart_failure_is_reported() {
    let mut acc = driver(&[fail(Transaction::write_read(ADDR, vec![0x16], vec![0x00]))]);
    assert!(matches!(acc.restart(), Err(Error::I2c(ErrorKind::Other))));
    finish(acc);
  }

  #[test]
  fn system_mode_decodes() {
    let mut acc = driver(&[
      Transaction::write_read(ADDR, vec![0x0B], vec![0x01]),
      Transaction::write_read(ADDR, vec![0x0B], vec![0x02]),
    ]);
    assert_eq!(acc.get_system_mode().unwrap(), SystemMode::Wake);
    assert_eq!(acc.get_system_mode().unwrap(), SystemMode::Sleep);
    finish(acc);
  }

  #[test]
  fn get_id_returns_raw_byte() {
    let mut acc = driver(&[who_am_i(0x4A)]);
    assert_eq!(acc.get_id().unwrap(), 0x4A);
    finish(acc);
  }
}

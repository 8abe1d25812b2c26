use embedded_hal_async::{delay::DelayNs, i2c::*};

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
  pub async fn enable(&mut self, pin: IntPin) -> Result<(), Error<E>> {
    self.enable_with(&MotionConfig { pin, ..Default::default() }).await
  }

  /// Soft reset, verify `WHO_AM_I`, program the detector and go active.
  ///
  /// Same step list and failure policy as the blocking driver.
  pub async fn enable_with(&mut self, cfg: &MotionConfig) -> Result<(), Error<E>> {
    let steps = sequence::enable(cfg).map_err(|_| Error::Data)?;
    self.run(&steps).await
  }

  /// Disable the motion interrupt, then drop to standby. Best-effort.
  pub async fn disable(&mut self) -> Result<(), Error<E>> {
    let steps = sequence::disable().map_err(|_| Error::Data)?;
    self.run(&steps).await
  }

  /// Read `FF_MT_SRC` (clear-on-read), re-arming a latched interrupt.
  pub async fn restart(&mut self) -> Result<MotionSource, Error<E>> {
    self.read(Reg::FfMtSrc).await
  }

  pub async fn get_id(&mut self) -> Result<u8, Error<E>> {
    let r: ChipId = self.read(Reg::WhoAmI).await?;
    Ok(r.id)
  }

  pub async fn get_system_mode(&mut self) -> Result<SystemMode, Error<E>> {
    let r: SysMod = self.read(Reg::SysMod).await?;
    Ok(r.mode)
  }

  async fn run(&mut self, steps: &[Step]) -> Result<(), Error<E>> {
    let mut deferred = None;
    for step in steps {
      let outcome = self.exec(step.op).await;
      self.apply(step, outcome, &mut deferred)?;
    }
    deferred.map_or(Ok(()), Err)
  }

  async fn exec(&mut self, op: Op) -> Result<(), Error<E>> {
    match op {
      Op::Write(reg, v) => self.write_u8(reg, v).await,
      Op::Identify => check_id(self.get_id().await?),
      Op::Settle(ms) => {
        self.delay.delay_ms(ms).await;
        Ok(())
      }
    }
  }

  async fn read<const N: usize, T: TryFrom<[u8; N]>>(&mut self, reg: Reg) -> Result<T, Error<E>> {
    let mut b = [0u8; N];
    self.i2c.write_read(ADDR_I2C, &[reg.into()], &mut b).await.map_err(Error::I2c)?;
    TryFrom::try_from(b).map_err(|_| Error::Data)
  }

  async fn write_u8(&mut self, reg: Reg, value: u8) -> Result<(), Error<E>> {
    self.i2c.write(ADDR_I2C, &[reg.into(), value]).await.map_err(Error::I2c)
  }
}

//! maXTouch controller over I²C.
//!
//! The controller pulls CHG low while its message FIFO is non-empty. Each
//! read of the T5 message processor pops one message.

use embassy_nrf::gpio::Input;
use embedded_hal::i2c::I2c;

use wash_panel::config::{MXT_I2C_ADDRESS, MXT_MESSAGE_LEN, MXT_T5_ADDRESS};
use wash_panel::touch::{parse_t9_message, RawTouch, TouchSource};
use wash_panel::Error;

pub struct MxtTouch<I2C> {
    i2c: I2C,
    chg: Input<'static>,
}

impl<I2C> MxtTouch<I2C>
where
    I2C: I2c,
{
    pub fn new(i2c: I2C, chg: Input<'static>) -> Self {
        Self { i2c, chg }
    }

    /// Wait until the controller has a message.
    pub async fn wait_pending(&mut self) {
        self.chg.wait_for_low().await;
    }
}

impl<I2C> TouchSource for MxtTouch<I2C>
where
    I2C: I2c,
{
    fn has_pending(&mut self) -> bool {
        self.chg.is_low()
    }

    fn read_event(&mut self) -> Result<RawTouch, Error> {
        let reg = MXT_T5_ADDRESS.to_le_bytes();
        let mut msg = [0u8; MXT_MESSAGE_LEN];
        self.i2c
            .write_read(MXT_I2C_ADDRESS, &reg, &mut msg)
            .map_err(|_| Error::TouchRead)?;
        parse_t9_message(&msg)
    }
}

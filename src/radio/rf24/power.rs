use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use crate::{
    radio::{prelude::EsbPower, Nrf24Error, RF24},
    Mode,
};

use super::{limits, registers};

impl<SPI, DO, DELAY> EsbPower for RF24<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type PowerErrorType = Nrf24Error<SPI::Error, DO::Error>;

    /// In full power down mode (a sleep state), the radio will consume approximately
    /// 900nA (.0009mA). In standby it consumes about 26uA.
    fn power_down(&mut self) -> Result<(), Self::PowerErrorType> {
        self.ce_pin.set_low().map_err(Nrf24Error::Gpo)?; // Guarantee CE is low on powerDown
        let config = self._config_reg.with_power(false);
        self.spi_write_byte(registers::CONFIG, config.into_bits())?;
        self._config_reg = config;
        self._mode = Mode::PowerDown;
        #[cfg(feature = "defmt")]
        #[cfg(target_os = "none")]
        defmt::trace!("power down");
        Ok(())
    }

    fn power_up(&mut self, delay: Option<u32>) -> Result<(), Self::PowerErrorType> {
        if self._config_reg.power() {
            return Ok(());
        }
        let config = self._config_reg.with_power(true);
        self.spi_write_byte(registers::CONFIG, config.into_bits())?;
        self._config_reg = config;

        // The oscillator needs Tpd2stby before CE may go high.
        let delay = delay.unwrap_or(limits::POWER_UP_DELAY_US);
        if delay > 0 {
            self._delay_impl.delay_us(delay);
        }
        if self._mode == Mode::PowerDown {
            self._mode = Mode::Standby;
        }
        Ok(())
    }

    fn is_powered(&self) -> bool {
        self._config_reg.power()
    }
}

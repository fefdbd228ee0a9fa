use super::{limits, registers};
use crate::radio::{prelude::EsbChannel, Nrf24Error, RF24};
use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

impl<SPI, DO, DELAY> EsbChannel for RF24<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type ChannelErrorType = Nrf24Error<SPI::Error, DO::Error>;

    /// The nRF24L01 support 126 channels. The specified `channel` is
    /// clamped to the range [0, 125].
    fn set_channel(&mut self, channel: u8) -> Result<(), Self::ChannelErrorType> {
        let channel = channel.min(limits::MAX_CHANNEL);
        self.spi_write_byte(registers::RF_CH, channel)?;
        self._channel = channel;
        Ok(())
    }

    /// See also [`RF24::set_channel()`].
    fn get_channel(&mut self) -> Result<u8, Self::ChannelErrorType> {
        self.spi_read(1, registers::RF_CH)?;
        Ok(self._buf[1])
    }

    fn set_frequency(&mut self, frequency_mhz: u16) -> Result<(), Self::ChannelErrorType> {
        if !(limits::BASE_FREQUENCY_MHZ..=limits::MAX_FREQUENCY_MHZ).contains(&frequency_mhz) {
            return Err(Nrf24Error::InvalidFrequency);
        }
        self.set_channel((frequency_mhz - limits::BASE_FREQUENCY_MHZ) as u8)
    }

    fn get_frequency(&mut self) -> Result<u16, Self::ChannelErrorType> {
        Ok(limits::BASE_FREQUENCY_MHZ + self.get_channel()? as u16)
    }
}

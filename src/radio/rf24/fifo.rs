use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use crate::radio::{prelude::EsbFifo, Nrf24Error, RF24};
use crate::FifoState;

use super::{bit_fields::FifoStatus, commands, limits, registers};

impl<SPI, DO, DELAY> EsbFifo for RF24<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type FifoErrorType = Nrf24Error<SPI::Error, DO::Error>;

    fn available(&mut self) -> Result<bool, Self::FifoErrorType> {
        self.available_pipe().map(|pipe| pipe.is_some())
    }

    /// Only RX_DR decides; the STATUS pipe number is reported while it is set.
    fn available_pipe(&mut self) -> Result<Option<u8>, Self::FifoErrorType> {
        self.spi_read(0, commands::NOP)?;
        if !self._status.rx_dr() {
            return Ok(None);
        }
        let pipe = self._status.rx_pipe();
        Ok((pipe < limits::PIPE_COUNT).then_some(pipe))
    }

    /// Use this to discard all 3 layers in the radio's RX FIFO.
    fn flush_rx(&mut self) -> Result<(), Self::FifoErrorType> {
        self.spi_read(0, commands::FLUSH_RX)
    }

    /// Use this to discard all 3 layers in the radio's TX FIFO.
    fn flush_tx(&mut self) -> Result<(), Self::FifoErrorType> {
        self.spi_read(0, commands::FLUSH_TX)
    }

    fn get_fifo_state(&mut self, about_tx: bool) -> Result<FifoState, Self::FifoErrorType> {
        self.spi_read(1, registers::FIFO_STATUS)?;
        Ok(FifoStatus::from_bits(self._buf[1]).state(about_tx))
    }
}

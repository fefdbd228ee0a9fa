use crate::radio::{
    prelude::{EsbFifo, EsbPayloadLength},
    Nrf24Error, RF24,
};
use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use super::{commands, limits, mnemonics, registers};

impl<SPI, DO, DELAY> EsbPayloadLength for RF24<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type PayloadLengthErrorType = Nrf24Error<SPI::Error, DO::Error>;

    fn set_payload_length(&mut self, length: u8) -> Result<(), Self::PayloadLengthErrorType> {
        let len = length.min(limits::MAX_PAYLOAD_LENGTH);
        for pipe in 0..limits::PIPE_COUNT {
            if self._pipes[pipe as usize].enabled {
                self.spi_write_byte(registers::RX_PW_P0 + pipe, len)?;
                self._pipes[pipe as usize].payload_length = len;
            }
        }
        self._payload_length = len;
        Ok(())
    }

    fn set_payload_length_pipe(
        &mut self,
        pipe: u8,
        length: u8,
    ) -> Result<(), Self::PayloadLengthErrorType> {
        let index = Self::pipe_index(pipe)?;
        let len = length.min(limits::MAX_PAYLOAD_LENGTH);
        self.spi_write_byte(registers::RX_PW_P0 + pipe, len)?;
        self._pipes[index].payload_length = len;
        Ok(())
    }

    fn get_payload_length(&self) -> u8 {
        self._payload_length
    }

    fn get_payload_length_pipe(&self, pipe: u8) -> Result<u8, Self::PayloadLengthErrorType> {
        let index = Self::pipe_index(pipe)?;
        Ok(self._pipes[index].payload_length)
    }

    fn set_dynamic_payloads(&mut self, enable: bool) -> Result<(), Self::PayloadLengthErrorType> {
        self.write_feature(self._feature.with_dynamic_payloads(enable))?;
        self.write_dynpd(if enable { mnemonics::ALL_PIPES } else { 0 })
    }

    fn set_dynamic_payloads_pipe(
        &mut self,
        enable: bool,
        pipe: u8,
    ) -> Result<(), Self::PayloadLengthErrorType> {
        Self::pipe_index(pipe)?;
        if enable && !self._feature.dynamic_payloads() {
            self.write_feature(self._feature.with_dynamic_payloads(true))?;
        }
        self.spi_read(1, registers::DYNPD)?;
        let mut dynpd = self._buf[1] & !(1 << pipe);
        if enable {
            dynpd |= 1 << pipe;
        }
        self.write_dynpd(dynpd)
    }

    fn get_dynamic_payloads(&self) -> bool {
        self._feature.dynamic_payloads()
    }

    fn get_dynamic_payloads_pipe(&self, pipe: u8) -> Result<bool, Self::PayloadLengthErrorType> {
        let index = Self::pipe_index(pipe)?;
        Ok(self._pipes[index].dynamic_payloads)
    }

    fn get_dynamic_payload_length(&mut self) -> Result<u8, Self::PayloadLengthErrorType> {
        self.spi_read(1, commands::R_RX_PL_WID)?;
        let width = self._buf[1];
        if width > limits::MAX_PAYLOAD_LENGTH {
            #[cfg(feature = "defmt")]
            #[cfg(target_os = "none")]
            defmt::warn!("corrupt payload width {=u8}, flushing RX FIFO", width);
            self.flush_rx()?;
            return Ok(0);
        }
        Ok(width)
    }
}

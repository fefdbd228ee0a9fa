use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use crate::radio::{prelude::EsbAutoAck, Nrf24Error, RF24};

use super::{bit_fields::SetupRetry, commands, limits, mnemonics, registers};

impl<SPI, DO, DELAY> EsbAutoAck for RF24<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type AutoAckErrorType = Nrf24Error<SPI::Error, DO::Error>;

    fn set_ack_payloads(&mut self, enable: bool) -> Result<(), Self::AutoAckErrorType> {
        if self._feature.ack_payloads() == enable {
            return Ok(());
        }
        self.write_feature(self._feature.with_ack_payloads(enable))?;
        if enable {
            // ACK packets are received on pipe 0, which needs dynamic payloads
            self.spi_read(1, registers::DYNPD)?;
            let dynpd = self._buf[1] | 1;
            self.write_dynpd(dynpd)?;
        }
        // else disable ack payloads, but leave dynamic payload features as is
        Ok(())
    }

    fn get_ack_payloads(&self) -> bool {
        self._feature.ack_payloads()
    }

    fn set_auto_ack(&mut self, enable: bool) -> Result<(), Self::AutoAckErrorType> {
        self.write_en_aa(if enable { mnemonics::ALL_PIPES } else { 0 })?;
        // accommodate ACK payloads feature
        if !enable && self._feature.ack_payloads() {
            self.set_ack_payloads(false)?;
        }
        Ok(())
    }

    fn set_auto_ack_pipe(&mut self, enable: bool, pipe: u8) -> Result<(), Self::AutoAckErrorType> {
        Self::pipe_index(pipe)?;
        self.spi_read(1, registers::EN_AA)?;
        let mask = 1 << pipe;
        let en_aa = self._buf[1] & !mask | (mask * enable as u8);
        self.write_en_aa(en_aa)?;
        if !enable && pipe == 0 && self._feature.ack_payloads() {
            self.set_ack_payloads(false)?;
        }
        Ok(())
    }

    fn get_auto_ack(&self) -> bool {
        self._pipes.iter().all(|pipe| pipe.auto_ack)
    }

    fn get_auto_ack_pipe(&self, pipe: u8) -> Result<bool, Self::AutoAckErrorType> {
        let index = Self::pipe_index(pipe)?;
        Ok(self._pipes[index].auto_ack)
    }

    fn allow_ask_no_ack(&mut self, enable: bool) -> Result<(), Self::AutoAckErrorType> {
        self.write_feature(self._feature.with_ask_no_ack(enable))
    }

    fn write_ack_payload(&mut self, pipe: u8, buf: &[u8]) -> Result<bool, Self::AutoAckErrorType> {
        Self::pipe_index(pipe)?;
        if buf.len() > limits::MAX_PAYLOAD_LENGTH as usize {
            return Err(Nrf24Error::InvalidLength);
        }
        if !self._feature.ack_payloads() {
            return Ok(false);
        }
        self.spi_command(commands::W_ACK_PAYLOAD | pipe, buf)?;
        // the status byte precedes the write, so a full TX FIFO means it was dropped
        Ok(!self._status.tx_full())
    }

    fn set_auto_retries(&mut self, delay: u8, count: u8) -> Result<(), Self::AutoAckErrorType> {
        let retry = SetupRetry::from_bits(0)
            .with_ard(delay.min(15))
            .with_arc(count.min(15));
        self.spi_write_byte(registers::SETUP_RETR, retry.into_bits())
    }

    fn set_auto_retry_delay(&mut self, delay: u8) -> Result<(), Self::AutoAckErrorType> {
        self.spi_read(1, registers::SETUP_RETR)?;
        let retry = SetupRetry::from_bits(self._buf[1]).with_ard(delay.min(15));
        self.spi_write_byte(registers::SETUP_RETR, retry.into_bits())
    }

    fn set_auto_retry_count(&mut self, count: u8) -> Result<(), Self::AutoAckErrorType> {
        self.spi_read(1, registers::SETUP_RETR)?;
        let retry = SetupRetry::from_bits(self._buf[1]).with_arc(count.min(15));
        self.spi_write_byte(registers::SETUP_RETR, retry.into_bits())
    }

    fn get_auto_retry_delay(&mut self) -> Result<u8, Self::AutoAckErrorType> {
        self.spi_read(1, registers::SETUP_RETR)?;
        Ok(SetupRetry::from_bits(self._buf[1]).ard())
    }

    fn get_auto_retry_count(&mut self) -> Result<u8, Self::AutoAckErrorType> {
        self.spi_read(1, registers::SETUP_RETR)?;
        Ok(SetupRetry::from_bits(self._buf[1]).arc())
    }
}

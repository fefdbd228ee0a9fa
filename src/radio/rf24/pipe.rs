use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use crate::{
    radio::{prelude::EsbPipe, Nrf24Error, RF24},
    PipeConfig,
};

use super::registers;

impl<SPI, DO, DELAY> EsbPipe for RF24<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type PipeErrorType = Nrf24Error<SPI::Error, DO::Error>;

    fn open_rx_pipe(&mut self, pipe: u8, address: &[u8]) -> Result<(), Self::PipeErrorType> {
        let index = Self::pipe_index(pipe)?;
        if address.is_empty() {
            return Err(Nrf24Error::InvalidLength);
        }
        // only write the bytes that were passed
        let width = address.len().min(self._address_length as usize);

        self.spi_read(1, registers::EN_RXADDR)?;
        let out = self._buf[1] | (1 << pipe);
        self.spi_write_byte(registers::EN_RXADDR, out)?;

        if pipe < 2 {
            self.spi_write_buf(registers::RX_ADDR_P0 + pipe, &address[..width])?;
        } else {
            // pipes 2-5 own a single byte; the rest comes from pipe 1
            self.spi_write_byte(registers::RX_ADDR_P0 + pipe, address[width - 1])?;
        }
        self.spi_write_byte(registers::RX_PW_P0 + pipe, self._payload_length)?;

        let cache = &mut self._pipes[index];
        let len = address.len().min(5);
        cache.address[..len].copy_from_slice(&address[..len]);
        cache.address_length = width as u8;
        cache.payload_length = self._payload_length;
        cache.enabled = true;
        #[cfg(feature = "defmt")]
        #[cfg(target_os = "none")]
        defmt::trace!("opened RX pipe {=u8}", pipe);
        Ok(())
    }

    fn open_tx_pipe(&mut self, address: &[u8]) -> Result<(), Self::PipeErrorType> {
        if address.is_empty() {
            return Err(Nrf24Error::InvalidLength);
        }
        let width = address.len().min(self._address_length as usize);
        self.spi_write_buf(registers::TX_ADDR, &address[..width])?;
        self.spi_write_buf(registers::RX_ADDR_P0, &address[..width])?;

        let len = address.len().min(5);
        self._tx_address[..len].copy_from_slice(&address[..len]);
        let pipe0 = &mut self._pipes[0];
        pipe0.address[..len].copy_from_slice(&address[..len]);
        pipe0.address_length = width as u8;
        Ok(())
    }

    /// The pipe's cached configuration is kept, see [`EsbPipe::pipe_config()`].
    fn close_rx_pipe(&mut self, pipe: u8) -> Result<(), Self::PipeErrorType> {
        let index = Self::pipe_index(pipe)?;
        self.spi_read(1, registers::EN_RXADDR)?;
        let out = self._buf[1] & !(1 << pipe);
        self.spi_write_byte(registers::EN_RXADDR, out)?;
        self._pipes[index].enabled = false;
        Ok(())
    }

    fn set_address_length(&mut self, length: u8) -> Result<(), Self::PipeErrorType> {
        let width = length.clamp(3, 5);
        self.spi_write_byte(registers::SETUP_AW, width - 2)?;
        self._address_length = width;
        for pipe in self._pipes.iter_mut() {
            pipe.address_length = width;
        }
        Ok(())
    }

    fn get_address_length(&mut self) -> Result<u8, Self::PipeErrorType> {
        self.spi_read(1, registers::SETUP_AW)?;
        match self._buf[1] & 3 {
            0 => Err(Nrf24Error::BinaryCorruption),
            encoded => Ok(encoded + 2),
        }
    }

    fn get_rx_address(&mut self, pipe: u8, address: &mut [u8]) -> Result<u8, Self::PipeErrorType> {
        Self::pipe_index(pipe)?;
        let width = self._address_length;
        let len = address.len().min(width as usize);
        if pipe < 2 {
            self.spi_read(width, registers::RX_ADDR_P0 + pipe)?;
            address[..len].copy_from_slice(&self._buf[1..=len]);
        } else {
            self.spi_read(1, registers::RX_ADDR_P0 + pipe)?;
            let own = self._buf[1];
            self.spi_read(width, registers::RX_ADDR_P0 + 1)?;
            self._buf[1] = own;
            address[..len].copy_from_slice(&self._buf[1..=len]);
        }
        Ok(len as u8)
    }

    fn get_tx_address(&self, address: &mut [u8]) -> u8 {
        let len = address.len().min(self._address_length as usize);
        address[..len].copy_from_slice(&self._tx_address[..len]);
        len as u8
    }

    fn pipe_config(&self, pipe: u8) -> Result<PipeConfig, Self::PipeErrorType> {
        let index = Self::pipe_index(pipe)?;
        Ok(self._pipes[index])
    }
}

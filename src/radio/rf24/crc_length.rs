use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use super::{registers, Config};
use crate::radio::{prelude::EsbCrcLength, Nrf24Error, RF24};
use crate::CrcLength;

impl<SPI, DO, DELAY> EsbCrcLength for RF24<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type CrcLengthErrorType = Nrf24Error<SPI::Error, DO::Error>;

    fn get_crc_length(&mut self) -> Result<CrcLength, Self::CrcLengthErrorType> {
        self.spi_read(1, registers::CONFIG)?;
        Ok(Config::from_bits(self._buf[1]).crc_length())
    }

    fn set_crc_length(&mut self, crc_length: CrcLength) -> Result<(), Self::CrcLengthErrorType> {
        let config = self._config_reg.with_crc_length(crc_length);
        self.spi_write_byte(registers::CONFIG, config.into_bits())?;
        self._config_reg = config;
        Ok(())
    }
}

/////////////////////////////////////////////////////////////////////////////////
/// unit tests
#[cfg(test)]
mod test {
    extern crate std;
    use crate::radio::prelude::EsbCrcLength;
    use crate::radio::rf24::commands;
    use crate::{spi_test_expects, test::mk_radio, CrcLength};

    use super::registers;
    use embedded_hal_mock::eh1::spi::Transaction as SpiTransaction;
    use std::vec;

    #[test]
    pub fn get_crc_length() {
        let spi_expectations = spi_test_expects![
            // get the CONFIG register value for each possible result
            (vec![registers::CONFIG, 0u8], vec![0xEu8, 0u8]),
            (vec![registers::CONFIG, 0u8], vec![0xEu8, 0x4u8]),
            (vec![registers::CONFIG, 0u8], vec![0xEu8, 0x8u8]),
            (vec![registers::CONFIG, 0u8], vec![0xEu8, 0xCu8]),
        ];
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        assert_eq!(radio.get_crc_length().unwrap(), CrcLength::Disabled);
        assert_eq!(radio.get_crc_length().unwrap(), CrcLength::Disabled);
        assert_eq!(radio.get_crc_length().unwrap(), CrcLength::Bit8);
        assert_eq!(radio.get_crc_length().unwrap(), CrcLength::Bit16);
        spi.done();
        ce_pin.done();
    }

    #[test]
    pub fn set_crc_length() {
        let spi_expectations = spi_test_expects![
            (
                vec![registers::CONFIG | commands::W_REGISTER, 0xCu8],
                vec![0xEu8, 0u8],
            ),
            // only EN_CRC is cleared
            (
                vec![registers::CONFIG | commands::W_REGISTER, 0x4u8],
                vec![0xEu8, 0u8],
            ),
            (
                vec![registers::CONFIG | commands::W_REGISTER, 0x8u8],
                vec![0xEu8, 0u8],
            ),
        ];
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        radio.set_crc_length(CrcLength::Bit16).unwrap();
        radio.set_crc_length(CrcLength::Disabled).unwrap();
        radio.set_crc_length(CrcLength::Bit8).unwrap();
        spi.done();
        ce_pin.done();
    }
}

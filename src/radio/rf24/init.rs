use super::{commands, limits, registers, Nrf24Error, RF24};
use crate::{
    radio::{
        prelude::{EsbInit, EsbPower},
        RadioConfig,
    },
    Mode, StatusFlags,
};
use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

impl<SPI, DO, DELAY> EsbInit for RF24<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type ConfigErrorType = Nrf24Error<SPI::Error, DO::Error>;

    /// Initialize the radio's hardware using the [`SpiDevice`] and [`OutputPin`] given
    /// to [`RF24::new()`].
    fn init(&mut self) -> Result<(), Self::ConfigErrorType> {
        self.ce_pin.set_low().map_err(Nrf24Error::Gpo)?;

        // Configuration bits will not necessarily stick if the radio
        // has not settled after its supply came up.
        self._delay_impl.delay_us(limits::INIT_DELAY_US);

        if !self.is_connected()? {
            #[cfg(feature = "defmt")]
            #[cfg(target_os = "none")]
            defmt::warn!("radio did not respond");
            return Err(Nrf24Error::NotConnected);
        }
        self.reset()?;

        // Bit 7 of RF_SETUP is reserved on the nRF24L01, so it only sticks on a plus variant.
        self.spi_read(1, registers::RF_SETUP)?;
        let original = self._buf[1];
        self.spi_write_byte(registers::RF_SETUP, original | 0x80)?;
        self.spi_read(1, registers::RF_SETUP)?;
        self._is_plus_variant = self._buf[1] & 0x80 == 0x80;
        self.spi_write_byte(registers::RF_SETUP, original)?;
        if self._is_plus_variant {
            self.toggle_features()?;
        }
        #[cfg(feature = "defmt")]
        #[cfg(target_os = "none")]
        defmt::debug!("radio initialized, plus variant: {=bool}", self._is_plus_variant);
        Ok(())
    }

    fn reset(&mut self) -> Result<(), Self::ConfigErrorType> {
        self.power_down()?;
        self._delay_impl.delay_us(limits::RESET_DELAY_US);
        self.with_config(&RadioConfig::default())
    }

    fn with_config(&mut self, config: &RadioConfig) -> Result<(), Self::ConfigErrorType> {
        self.ce_pin.set_low().map_err(Nrf24Error::Gpo)?;
        let config_reg = config.config_reg.with_power(false).with_is_rx(false);
        self.spi_write_byte(registers::CONFIG, config_reg.into_bits())?;
        self.spi_write_byte(registers::EN_AA, config.auto_ack())?;
        self.spi_write_byte(registers::EN_RXADDR, config.rx_pipes_enabled())?;
        let width = config.address_length();
        self.spi_write_byte(registers::SETUP_AW, width - 2)?;
        self.spi_write_byte(registers::SETUP_RETR, config.auto_retries.into_bits())?;
        self.spi_write_byte(registers::RF_CH, config.channel())?;
        // CONT_WAVE and PLL_LOCK are test modes, never part of a config
        let rf_setup = config.rf_setup.with_carrier_wave(false);
        self.spi_write_byte(registers::RF_SETUP, rf_setup.into_bits())?;
        self.spi_write_byte(registers::STATUS, StatusFlags::new().into_bits())?;
        self.spi_read(0, commands::FLUSH_TX)?;
        self.spi_read(0, commands::FLUSH_RX)?;

        let mut address = [0; 5];
        for pipe in 0..limits::PIPE_COUNT {
            config.rx_address(pipe, &mut address);
            let len = config.rx_address_length(pipe).min(width) as usize;
            if pipe < 2 {
                self.spi_write_buf(registers::RX_ADDR_P0 + pipe, &address[..len])?;
            } else {
                // pipes 2-5 only own the least significant byte
                self.spi_write_byte(registers::RX_ADDR_P0 + pipe, address[len - 1])?;
            }
        }
        config.tx_address(&mut address);
        let len = config.tx_address_length().min(width) as usize;
        self.spi_write_buf(registers::TX_ADDR, &address[..len])?;

        for pipe in 0..limits::PIPE_COUNT {
            self.spi_write_byte(registers::RX_PW_P0 + pipe, config.payload_length())?;
        }
        self.spi_write_byte(registers::FEATURE, config.feature.into_bits())?;
        self.spi_write_byte(registers::DYNPD, config.dynamic_payloads_pipes())?;

        self.cache_config(config);
        self._mode = Mode::PowerDown;
        #[cfg(feature = "defmt")]
        #[cfg(target_os = "none")]
        defmt::trace!("applied config on channel {=u8}", self._channel);
        Ok(())
    }

    fn is_connected(&mut self) -> Result<bool, Self::ConfigErrorType> {
        self.spi_read(1, registers::SETUP_AW)?;
        let setup_aw = self._buf[1];
        Ok(setup_aw & 0x0C == 0 && setup_aw & 0x03 != 0)
    }
}

/////////////////////////////////////////////////////////////////////////////////
/// unit tests
#[cfg(test)]
mod test {
    extern crate std;
    use super::{commands, registers, EsbInit};
    use crate::{
        radio::{
            prelude::{EsbAutoAck, EsbPayloadLength, EsbPipe, EsbPower, EsbRadio},
            Nrf24Error, RadioConfig,
        },
        spi_test_expects,
        test::mk_radio,
        Mode,
    };
    use embedded_hal_mock::eh1::{
        digital::{State as PinState, Transaction as PinTransaction},
        spi::Transaction as SpiTransaction,
    };
    use std::vec;
    use std::vec::Vec;

    /// Every transaction [`EsbInit::with_config()`] does for [`RadioConfig::default()`].
    fn default_config_expectations() -> Vec<SpiTransaction<u8>> {
        let mut expectations = spi_test_expects![
            (
                vec![registers::CONFIG | commands::W_REGISTER, 0x8u8],
                vec![0xEu8, 0u8],
            ),
            (
                vec![registers::EN_AA | commands::W_REGISTER, 0x3Fu8],
                vec![0xEu8, 0u8],
            ),
            (
                vec![registers::EN_RXADDR | commands::W_REGISTER, 3u8],
                vec![0xEu8, 0u8],
            ),
            (
                vec![registers::SETUP_AW | commands::W_REGISTER, 3u8],
                vec![0xEu8, 0u8],
            ),
            (
                vec![registers::SETUP_RETR | commands::W_REGISTER, 3u8],
                vec![0xEu8, 0u8],
            ),
            (
                vec![registers::RF_CH | commands::W_REGISTER, 2u8],
                vec![0xEu8, 0u8],
            ),
            (
                vec![registers::RF_SETUP | commands::W_REGISTER, 0x0Eu8],
                vec![0xEu8, 0u8],
            ),
            (
                vec![registers::STATUS | commands::W_REGISTER, 0x70u8],
                vec![0xEu8, 0u8],
            ),
            (vec![commands::FLUSH_TX], vec![0xEu8]),
            (vec![commands::FLUSH_RX], vec![0xEu8]),
            (
                vec![registers::RX_ADDR_P0 | commands::W_REGISTER, 0xE7, 0xE7, 0xE7, 0xE7, 0xE7],
                vec![0xEu8, 0, 0, 0, 0, 0],
            ),
            (
                vec![(registers::RX_ADDR_P0 + 1) | commands::W_REGISTER, 0xC2, 0xC2, 0xC2, 0xC2, 0xC2],
                vec![0xEu8, 0, 0, 0, 0, 0],
            ),
        ]
        .to_vec();
        for (pipe, addr) in [0xC3u8, 0xC4, 0xC5, 0xC6].iter().enumerate() {
            expectations.extend(spi_test_expects![(
                vec![(registers::RX_ADDR_P0 + 2 + pipe as u8) | commands::W_REGISTER, *addr],
                vec![0xEu8, 0u8],
            ),]);
        }
        expectations.extend(spi_test_expects![(
            vec![registers::TX_ADDR | commands::W_REGISTER, 0xE7, 0xE7, 0xE7, 0xE7, 0xE7],
            vec![0xEu8, 0, 0, 0, 0, 0],
        ),]);
        for pipe in 0..6u8 {
            expectations.extend(spi_test_expects![(
                vec![(registers::RX_PW_P0 + pipe) | commands::W_REGISTER, 32u8],
                vec![0xEu8, 0u8],
            ),]);
        }
        expectations.extend(spi_test_expects![
            (
                vec![registers::FEATURE | commands::W_REGISTER, 0u8],
                vec![0xEu8, 0u8],
            ),
            (
                vec![registers::DYNPD | commands::W_REGISTER, 0u8],
                vec![0xEu8, 0u8],
            ),
        ]);
        expectations
    }

    fn init_parametrized(is_plus_variant: bool) {
        let ce_expectations = [
            PinTransaction::set(PinState::Low),
            // reset(): power_down()
            PinTransaction::set(PinState::Low),
            // with_config()
            PinTransaction::set(PinState::Low),
        ];
        let mut spi_expectations = spi_test_expects![
            // is_connected()
            (vec![registers::SETUP_AW, 0u8], vec![0xEu8, 3u8]),
            // reset(): power_down()
            (
                vec![registers::CONFIG | commands::W_REGISTER, 0x8u8],
                vec![0xEu8, 0u8],
            ),
        ]
        .to_vec();
        spi_expectations.extend(default_config_expectations());
        let probed = if is_plus_variant { 0x8Eu8 } else { 0x0Eu8 };
        spi_expectations.extend(spi_test_expects![
            // probe the reserved bit of RF_SETUP
            (vec![registers::RF_SETUP, 0u8], vec![0xEu8, 0x0Eu8]),
            (
                vec![registers::RF_SETUP | commands::W_REGISTER, 0x8Eu8],
                vec![0xEu8, 0u8],
            ),
            (vec![registers::RF_SETUP, 0u8], vec![0xEu8, probed]),
            // restore RF_SETUP
            (
                vec![registers::RF_SETUP | commands::W_REGISTER, 0x0Eu8],
                vec![0xEu8, 0u8],
            ),
        ]);
        if is_plus_variant {
            spi_expectations.extend(spi_test_expects![
                // toggle_features()
                (vec![commands::ACTIVATE, 0x73u8], vec![0xEu8, 0u8]),
            ]);
        }

        let mocks = mk_radio(&ce_expectations, &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        radio.init().unwrap();
        assert_eq!(radio.is_plus_variant(), is_plus_variant);
        assert_eq!(radio.mode(), Mode::PowerDown);
        assert!(!radio.is_powered());
        spi.done();
        ce_pin.done();
    }

    #[test]
    fn init_plus_variant() {
        init_parametrized(true);
    }

    #[test]
    fn init_non_plus_variant() {
        init_parametrized(false);
    }

    #[test]
    fn init_not_connected() {
        let ce_expectations = [PinTransaction::set(PinState::Low)];
        let spi_expectations = spi_test_expects![
            // an unconnected MISO line floats high
            (vec![registers::SETUP_AW, 0u8], vec![0xFFu8, 0xFFu8]),
        ];
        let mocks = mk_radio(&ce_expectations, &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        assert_eq!(radio.init(), Err(Nrf24Error::NotConnected));
        spi.done();
        ce_pin.done();
    }

    #[test]
    fn is_connected() {
        let spi_expectations = spi_test_expects![
            (vec![registers::SETUP_AW, 0u8], vec![0xEu8, 1u8]),
            (vec![registers::SETUP_AW, 0u8], vec![0xEu8, 0u8]),
        ];
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        assert!(radio.is_connected().unwrap());
        assert!(!radio.is_connected().unwrap());
        spi.done();
        ce_pin.done();
    }

    #[test]
    fn reset_restores_defaults() {
        let ce_expectations = [
            PinTransaction::set(PinState::Low),
            PinTransaction::set(PinState::Low),
        ];
        let mut spi_expectations = spi_test_expects![
            // power_down()
            (
                vec![registers::CONFIG | commands::W_REGISTER, 0x8u8],
                vec![0xEu8, 0u8],
            ),
        ]
        .to_vec();
        spi_expectations.extend(default_config_expectations());
        let mocks = mk_radio(&ce_expectations, &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        radio._channel = 90;
        radio._payload_length = 8;
        radio.reset().unwrap();
        assert_eq!(radio._channel, 2);
        assert_eq!(radio.get_payload_length(), 32);
        assert!(radio.get_auto_ack());
        assert_eq!(radio._address_length, 5);
        spi.done();
        ce_pin.done();
    }

    #[test]
    fn with_custom_config() {
        let config = RadioConfig::default()
            .with_channel(76)
            .with_address_length(3)
            .with_payload_length(8)
            .with_rx_address(2, &[0xA0, 0xA1])
            .with_tx_address(&[0xB0, 0xB1, 0xB2, 0xB3]);
        let ce_expectations = [PinTransaction::set(PinState::Low)];
        let mut spi_expectations = spi_test_expects![
            (
                vec![registers::CONFIG | commands::W_REGISTER, 0x8u8],
                vec![0xEu8, 0u8],
            ),
            (
                vec![registers::EN_AA | commands::W_REGISTER, 0x3Fu8],
                vec![0xEu8, 0u8],
            ),
            (
                vec![registers::EN_RXADDR | commands::W_REGISTER, 7u8],
                vec![0xEu8, 0u8],
            ),
            (
                vec![registers::SETUP_AW | commands::W_REGISTER, 1u8],
                vec![0xEu8, 0u8],
            ),
            (
                vec![registers::SETUP_RETR | commands::W_REGISTER, 3u8],
                vec![0xEu8, 0u8],
            ),
            (
                vec![registers::RF_CH | commands::W_REGISTER, 76u8],
                vec![0xEu8, 0u8],
            ),
            (
                vec![registers::RF_SETUP | commands::W_REGISTER, 0x0Eu8],
                vec![0xEu8, 0u8],
            ),
            (
                vec![registers::STATUS | commands::W_REGISTER, 0x70u8],
                vec![0xEu8, 0u8],
            ),
            (vec![commands::FLUSH_TX], vec![0xEu8]),
            (vec![commands::FLUSH_RX], vec![0xEu8]),
            // only 3 bytes of each full address are written
            (
                vec![registers::RX_ADDR_P0 | commands::W_REGISTER, 0xB0, 0xB1, 0xB2],
                vec![0xEu8, 0, 0, 0],
            ),
            (
                vec![(registers::RX_ADDR_P0 + 1) | commands::W_REGISTER, 0xC2, 0xC2, 0xC2],
                vec![0xEu8, 0, 0, 0],
            ),
            // the last given byte of a short address
            (
                vec![(registers::RX_ADDR_P0 + 2) | commands::W_REGISTER, 0xA1],
                vec![0xEu8, 0u8],
            ),
            (
                vec![(registers::RX_ADDR_P0 + 3) | commands::W_REGISTER, 0xC4],
                vec![0xEu8, 0u8],
            ),
            (
                vec![(registers::RX_ADDR_P0 + 4) | commands::W_REGISTER, 0xC5],
                vec![0xEu8, 0u8],
            ),
            (
                vec![(registers::RX_ADDR_P0 + 5) | commands::W_REGISTER, 0xC6],
                vec![0xEu8, 0u8],
            ),
            (
                vec![registers::TX_ADDR | commands::W_REGISTER, 0xB0, 0xB1, 0xB2],
                vec![0xEu8, 0, 0, 0],
            ),
        ]
        .to_vec();
        for pipe in 0..6u8 {
            spi_expectations.extend(spi_test_expects![(
                vec![(registers::RX_PW_P0 + pipe) | commands::W_REGISTER, 8u8],
                vec![0xEu8, 0u8],
            ),]);
        }
        spi_expectations.extend(spi_test_expects![
            (
                vec![registers::FEATURE | commands::W_REGISTER, 0u8],
                vec![0xEu8, 0u8],
            ),
            (
                vec![registers::DYNPD | commands::W_REGISTER, 0u8],
                vec![0xEu8, 0u8],
            ),
        ]);
        let mocks = mk_radio(&ce_expectations, &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        radio.with_config(&config).unwrap();
        assert_eq!(radio._channel, 76);
        let pipe2 = radio.pipe_config(2).unwrap();
        assert!(pipe2.is_enabled());
        assert_eq!(pipe2.address(), &[0xA0, 0xA1]);
        assert_eq!(pipe2.payload_length(), 8);
        let mut tx_address = [0u8; 5];
        assert_eq!(radio.get_tx_address(&mut tx_address), 3);
        assert_eq!(tx_address[..3], [0xB0, 0xB1, 0xB2]);
        spi.done();
        ce_pin.done();
    }
}

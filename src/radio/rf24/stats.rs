use super::RF24;
use crate::Statistics;
use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

impl<SPI, DO, DELAY> RF24<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    /// Counters kept by the driver since it was created (or last reset).
    ///
    /// Only transmissions resolved by
    /// [`EsbRadio::poll_write()`](fn@crate::radio::prelude::EsbRadio::poll_write)
    /// (and the blocking `send*()` functions) and payloads fetched by
    /// [`EsbRadio::read()`](fn@crate::radio::prelude::EsbRadio::read) are counted.
    /// Unlike the chip's own lost packet count, these do not reset when the
    /// channel changes.
    pub fn statistics(&self) -> Statistics {
        self._stats
    }

    pub fn reset_statistics(&mut self) {
        self._stats = Statistics::default();
    }
}

/////////////////////////////////////////////////////////////////////////////////
/// unit tests
#[cfg(test)]
mod test {
    extern crate std;
    use super::super::{commands, registers};
    use crate::{radio::prelude::EsbRadio, spi_test_expects, test::mk_radio, Statistics};
    use embedded_hal_mock::eh1::spi::Transaction as SpiTransaction;
    use std::vec;

    #[test]
    fn accounting() {
        let spi_expectations = spi_test_expects![
            // sent after 1 retry
            (vec![commands::NOP], vec![0x2Eu8]),
            (vec![registers::OBSERVE_TX, 0u8], vec![0x2Eu8, 1u8]),
            (
                vec![registers::STATUS | commands::W_REGISTER, 0x30u8],
                vec![0x2Eu8, 0u8],
            ),
            // lost after 3 retries
            (vec![commands::NOP], vec![0x1Eu8]),
            (vec![registers::OBSERVE_TX, 0u8], vec![0x1Eu8, 0x13u8]),
            (vec![commands::FLUSH_TX], vec![0x1Eu8]),
            (
                vec![registers::STATUS | commands::W_REGISTER, 0x30u8],
                vec![0x1Eu8, 0u8],
            ),
        ];
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        assert_eq!(radio.statistics(), Statistics::default());
        assert_eq!(radio.poll_write().unwrap(), Some(true));
        assert_eq!(radio.poll_write().unwrap(), Some(false));
        let stats = radio.statistics();
        assert_eq!(stats.packets_sent, 1);
        assert_eq!(stats.packets_lost, 1);
        assert_eq!(stats.retransmits, 4);
        assert_eq!(stats.packets_received, 0);
        radio.reset_statistics();
        assert_eq!(radio.statistics(), Statistics::default());
        spi.done();
        ce_pin.done();
    }
}

use super::{Nrf24Error, RF24};
use crate::radio::prelude::EsbDetails;
use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

#[cfg(any(
    all(feature = "defmt", target_os = "none"),
    all(feature = "std", not(target_os = "none"))
))]
use super::{bit_fields::Config, registers};
#[cfg(any(
    all(feature = "defmt", target_os = "none"),
    all(feature = "std", not(target_os = "none"))
))]
use crate::radio::prelude::{
    EsbAutoAck, EsbChannel, EsbCrcLength, EsbDataRate, EsbFifo, EsbPaLevel, EsbPayloadLength,
    EsbPipe, EsbRadio,
};

#[cfg(all(feature = "std", not(target_os = "none")))]
extern crate std;

impl<SPI, DO, DELAY> EsbDetails for RF24<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type DetailsErrorType = Nrf24Error<SPI::Error, DO::Error>;

    #[cfg(feature = "defmt")]
    #[cfg(target_os = "none")]
    fn print_details(&mut self) -> Result<(), Self::DetailsErrorType> {
        defmt::println!("Is a plus variant_________{=bool}", self.is_plus_variant());
        defmt::println!("Mode______________________{}", self.mode());

        let frequency = self.get_frequency()?;
        defmt::println!(
            "Channel___________________{=u16} ~ {=u16} MHz",
            frequency - 2400,
            frequency
        );
        defmt::println!("RF Data Rate______________{}", self.get_data_rate()?);
        defmt::println!("RF Power Amplifier________{}", self.get_pa_level()?);
        defmt::println!("CRC Length________________{}", self.get_crc_length()?);
        defmt::println!(
            "Address length____________{=u8} bytes",
            self.get_address_length()?
        );
        defmt::println!(
            "Static payload length_____{=u8} bytes",
            self.get_payload_length()
        );
        defmt::println!(
            "Auto retry delay__________{=u16} microseconds",
            self.get_auto_retry_delay()? as u16 * 250 + 250
        );
        defmt::println!(
            "Auto retry attempts_______{=u8} maximum",
            self.get_auto_retry_count()?
        );

        let (lost, retries) = self.get_observe_tx()?;
        defmt::println!("Packets lost\n    on current channel____{=u8}", lost);
        defmt::println!("Retry attempts made\n    for last transmission_{=u8}", retries);

        self.spi_read(1, registers::CONFIG)?;
        let config = Config::from_bits(self._buf[1]);
        let irq = config.irq_events();
        defmt::println!("IRQ on Data Ready_________{=bool}", irq.rx_dr());
        defmt::println!("    Data Ready triggered__{=bool}", self._status.rx_dr());
        defmt::println!("IRQ on Data Sent__________{=bool}", irq.tx_ds());
        defmt::println!("    Data Sent triggered___{=bool}", self._status.tx_ds());
        defmt::println!("IRQ on Data Fail__________{=bool}", irq.max_rt());
        defmt::println!("    Data Fail triggered___{=bool}", self._status.max_rt());

        let fifo = self.get_fifo_state(true)?;
        defmt::println!("TX FIFO___________________{}", fifo);
        let fifo = self.get_fifo_state(false)?;
        defmt::println!("RX FIFO___________________{}", fifo);

        self.spi_read(1, registers::FEATURE)?;
        let features = self._buf[1];
        defmt::println!("Ask no ACK allowed________{=bool}", features & 1 > 0);
        defmt::println!("ACK Payload enabled_______{=bool}", features & 2 > 0);
        self.spi_read(1, registers::DYNPD)?;
        defmt::println!("Dynamic Payloads__________{=u8:#b}", self._buf[1]);
        self.spi_read(1, registers::EN_AA)?;
        defmt::println!("Auto Acknowledgment_______{=u8:#b}", self._buf[1]);

        let rx = defmt::intern!("R");
        let tx = defmt::intern!("T");
        defmt::println!(
            "Primary Mode______________{=istr}X",
            if config.is_rx() { rx } else { tx }
        );
        defmt::println!("Powered Up________________{=bool}", config.power());

        let mut address = [0u8; 5];
        let len = self.get_tx_address(&mut address) as usize;
        defmt::println!("TX address________________{=[u8]:X}", &address[..len]);
        self.spi_read(1, registers::EN_RXADDR)?;
        let open_pipes = self._buf[1];
        let opened = defmt::intern!(" open ");
        let closed = defmt::intern!("closed");
        for pipe in 0..6u8 {
            let len = self.get_rx_address(pipe, &mut address)? as usize;
            defmt::println!(
                "Pipe {=u8} ({=istr}) bound to {=[u8]:X}",
                pipe,
                if open_pipes & (1 << pipe) > 0 {
                    opened
                } else {
                    closed
                },
                &address[..len],
            );
        }
        defmt::println!("{}", self.statistics());
        Ok(())
    }

    #[cfg(not(target_os = "none"))]
    #[cfg(feature = "std")]
    fn print_details(&mut self) -> Result<(), Self::DetailsErrorType> {
        std::println!("Is a plus variant_________{}", self.is_plus_variant());
        std::println!("Mode______________________{}", self.mode());

        let frequency = self.get_frequency()?;
        std::println!(
            "Channel___________________{} ~ {frequency} MHz",
            frequency - 2400
        );
        std::println!("RF Data Rate______________{}", self.get_data_rate()?);
        std::println!("RF Power Amplifier________{}", self.get_pa_level()?);
        std::println!("CRC Length________________{}", self.get_crc_length()?);
        std::println!(
            "Address length____________{} bytes",
            self.get_address_length()?
        );
        std::println!(
            "Static payload length_____{} bytes",
            self.get_payload_length()
        );
        std::println!(
            "Auto retry delay__________{} microseconds",
            self.get_auto_retry_delay()? as u16 * 250 + 250
        );
        std::println!(
            "Auto retry attempts_______{} maximum",
            self.get_auto_retry_count()?
        );

        let (lost, retries) = self.get_observe_tx()?;
        std::println!("Packets lost\n    on current channel____{lost}");
        std::println!("Retry attempts made\n    for last transmission_{retries}");

        self.spi_read(1, registers::CONFIG)?;
        let config = Config::from_bits(self._buf[1]);
        let irq = config.irq_events();
        std::println!("IRQ on Data Ready_________{}", irq.rx_dr());
        std::println!("    Data Ready triggered__{}", self._status.rx_dr());
        std::println!("IRQ on Data Sent__________{}", irq.tx_ds());
        std::println!("    Data Sent triggered___{}", self._status.tx_ds());
        std::println!("IRQ on Data Fail__________{}", irq.max_rt());
        std::println!("    Data Fail triggered___{}", self._status.max_rt());

        let fifo = self.get_fifo_state(true)?;
        std::println!("TX FIFO___________________{fifo}");
        let fifo = self.get_fifo_state(false)?;
        std::println!("RX FIFO___________________{fifo}");

        self.spi_read(1, registers::FEATURE)?;
        let features = self._buf[1];
        std::println!("Ask no ACK allowed________{}", features & 1 > 0);
        std::println!("ACK Payload enabled_______{}", features & 2 > 0);
        self.spi_read(1, registers::DYNPD)?;
        std::println!("Dynamic Payloads__________{:#010b}", self._buf[1]);
        self.spi_read(1, registers::EN_AA)?;
        std::println!("Auto Acknowledgment_______{:#010b}", self._buf[1]);

        std::println!(
            "Primary Mode______________{}X",
            if config.is_rx() { "R" } else { "T" }
        );
        std::println!("Powered Up________________{}", config.power());

        let mut address = [0u8; 5];
        let len = self.get_tx_address(&mut address) as usize;
        std::println!("TX address________________{:02X?}", &address[..len]);
        self.spi_read(1, registers::EN_RXADDR)?;
        let open_pipes = self._buf[1];
        for pipe in 0..6u8 {
            let len = self.get_rx_address(pipe, &mut address)? as usize;
            std::println!(
                "Pipe {pipe} ({}) bound to {:02X?}",
                if open_pipes & (1 << pipe) > 0 {
                    " open "
                } else {
                    "closed"
                },
                &address[..len],
            );
        }
        std::println!("{}", self.statistics());
        Ok(())
    }

    #[cfg(not(any(
        all(feature = "defmt", target_os = "none"),
        all(feature = "std", not(target_os = "none"))
    )))]
    fn print_details(&mut self) -> Result<(), Self::DetailsErrorType> {
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::EsbDetails;
    use crate::test::mk_radio;

    #[test]
    #[cfg(not(feature = "std"))]
    fn print_nothing() {
        let mocks = mk_radio(&[], &[]);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        assert!(radio.print_details().is_ok());
        spi.done();
        ce_pin.done();
    }
}

//! Walks a driver through its whole lifecycle the way a caller of the
//! status-code API would.

use spiwave_core::{DriverState, SpiConfig, SpiDriver, SpiError, Status, IDLE_BYTE};

#[test]
fn bring_up_configure_and_transfer() {
    let mut spi = SpiDriver::new();

    assert_eq!(Status::from(spi.init()), Status::Success);
    assert_eq!(spi.config(), Some(SpiConfig::new(1_000_000, 0)));

    assert_eq!(
        Status::from(spi.set_config(Some(SpiConfig::new(4_000_000, 2)))),
        Status::Success
    );

    let mut buf = [0u8; 3];
    assert_eq!(
        Status::from(spi.transfer(Some(&[1, 2, 3]), Some(&mut buf), 3)),
        Status::Success
    );
    assert_eq!(buf, [1, 2, 3]);

    assert_eq!(
        Status::from(spi.transfer(None, None, 5)).code(),
        Status::InvalidArgument.code()
    );

    let tx = vec![0u8; 5000];
    let mut rx = vec![0u8; 5000];
    assert_eq!(
        spi.transfer(Some(tx.as_slice()), Some(rx.as_mut_slice()), 5000)
            .map_err(|e| e.code()),
        Err(-2)
    );

    assert_eq!(spi.state(), DriverState::Initialized);
    assert_eq!(spi.config(), Some(SpiConfig::new(4_000_000, 2)));
}

#[test]
fn driver_stays_usable_after_every_failure() {
    let mut spi = SpiDriver::new();
    let mut rx = [0u8; 4];

    assert_eq!(spi.set_config(Some(SpiConfig::default())), Err(SpiError::NotInitialized));
    assert_eq!(spi.transfer(None, Some(&mut rx), 4), Err(SpiError::NotInitialized));
    assert_eq!(spi.state(), DriverState::Uninitialized);

    spi.init().unwrap();
    assert_eq!(spi.init(), Err(SpiError::AlreadyInitialized));
    assert_eq!(spi.set_config(None), Err(SpiError::NullPointer));
    assert_eq!(spi.set_config(Some(SpiConfig::new(8_000_000, 7))), Err(SpiError::InvalidArgument));
    assert_eq!(spi.transfer(None, Some(&mut rx), 0), Err(SpiError::InvalidLength));

    spi.transfer(None, Some(&mut rx), 4).unwrap();
    assert_eq!(rx, [IDLE_BYTE; 4]);
    assert_eq!(spi.state(), DriverState::Initialized);
}

#[test]
fn independent_buses_do_not_share_state() {
    let mut a = SpiDriver::new();
    let b = SpiDriver::new();

    a.init().unwrap();
    a.set_config(Some(SpiConfig::new(8_000_000, 1))).unwrap();

    assert_eq!(a.state(), DriverState::Initialized);
    assert_eq!(b.state(), DriverState::Uninitialized);
    assert_eq!(b.config(), None);
}

#[test]
fn length_gate_holds_for_every_buffer_combination() {
    let mut spi = SpiDriver::new();
    spi.init().unwrap();

    let tx = [0x42u8; 16];
    let mut rx = [0u8; 16];
    for len in [0usize, 2049, 4096, usize::MAX] {
        assert_eq!(spi.transfer(Some(&tx), None, len), Err(SpiError::InvalidLength));
        assert_eq!(spi.transfer(None, Some(&mut rx), len), Err(SpiError::InvalidLength));
        assert_eq!(
            spi.transfer(Some(&tx), Some(&mut rx), len),
            Err(SpiError::InvalidLength)
        );
        assert_eq!(spi.state(), DriverState::Initialized);
    }
    assert_eq!(rx, [0u8; 16]);
}

#[test]
fn capture_dump_after_session() {
    let mut spi = SpiDriver::with_capture(8);
    spi.init().unwrap();

    let mut rx = [0u8; 2];
    spi.transfer(Some(&[0xDE, 0xAD]), Some(&mut rx), 2).unwrap();

    let store = spi.take_capture().unwrap();
    assert_eq!(store.to_text(false), "MOSI: DE AD\nMISO: DE AD\n");
    assert!(spi.capture().is_none());
}

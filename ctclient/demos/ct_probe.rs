//! Probe one reader through the local reader manager: list readers, show
//! card status of every slot and print the ATR of present cards.
//!
//! Usage:
//!   OPENCT_SOCKETDIR=/var/run/openct RUST_LOG=debug \
//!     cargo run -p ctclient --example ct_probe -- [reader]

use std::time::Duration;

use anyhow::Context;
use ctclient::prelude::*;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let reader: usize = match std::env::args().nth(1) {
        Some(arg) => arg.parse().context("reader index must be a number")?,
        None => 0,
    };

    let builder = ReaderBuilder::from_env();
    println!("status file: {}", builder.config().status_path().display());
    for (i, info) in builder.readers()?.iter().enumerate() {
        if info.name.is_empty() {
            continue;
        }
        println!(
            "reader {}: {} ({} slots, display={}, keypad={})",
            i,
            info.name,
            info.slots(),
            info.display,
            info.keypad
        );
    }

    let mut handle = builder
        .connect(reader)
        .with_context(|| format!("connecting to reader {}", reader))?;

    for slot in 0..handle.reader_status().slots() {
        let status = handle.card_status(slot)?;
        if !status.is_present() {
            println!("slot {}: empty", slot);
            continue;
        }

        let mut atr = [0u8; 64];
        match handle.card_request(slot, Some(Duration::from_secs(5)), None, &mut atr) {
            Ok(n) => println!("slot {}: ATR {}", slot, bytes_to_hex_spaced(&atr[..n])),
            Err(Error::Service(code)) => println!("slot {}: reset refused ({})", slot, code),
            Err(e) => return Err(e.into()),
        }
    }

    handle.disconnect()?;
    Ok(())
}

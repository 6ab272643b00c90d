mod config;
mod menu;

use crate::config::{Config, parse_address};
use crate::menu::MenuCommand;
use aqm0802_lcd::bus::{DEFAULT_ADDRESS, I2cLcdBus};
use aqm0802_lcd::driver::AQM0802Driver;
use dotenv::dotenv;
use linux_embedded_hal::{Delay, I2cdev};
use log::{debug, info};
use std::env::var;
use std::io::{BufRead, Write};
use sysinfo::System;

fn main() -> eyre::Result<()> {
    // Initialize environment and logger
    dotenv().ok();
    pretty_env_logger::init();

    const UNKNOWN_STR: &str = "???";

    info!(
        "AQM0802 console on {} ({})",
        System::host_name().as_deref().unwrap_or(UNKNOWN_STR),
        System::long_os_version().as_deref().unwrap_or(UNKNOWN_STR),
    );

    let i2c_device = var("AQM0802_I2C_DEVICE").unwrap_or_else(|_| "/dev/i2c-1".to_string());
    let i2c_address = match var("AQM0802_I2C_ADDRESS") {
        Ok(address) => parse_address(&address)?,
        Err(_) => DEFAULT_ADDRESS,
    };

    info!("LCD @ {}, address 0x{:02X}", i2c_device, i2c_address);

    debug!("Initializing LCD driver...");
    let i2c = I2cdev::new(&i2c_device)?;
    let mut lcd = AQM0802Driver::new(I2cLcdBus::with_address(i2c, i2c_address), Delay);
    lcd.init()?;
    debug!("{:?} initialized.", lcd);

    debug!("Trying to load config...");
    let mut config = match Config::try_load()? {
        Some(config) => {
            info!("Config loaded from {}.", Config::path().display());
            config
        }
        None => {
            info!("Config not found. Using default");
            let config = Config::default();
            config.save()?;
            info!("Default config saved.");
            config
        }
    };

    lcd.set_contrast(config.contrast as i32)?;

    info!("Starting menu loop...");

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        println!("Input string");
        std::io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let command = MenuCommand::parse(&line?);
        debug!("Menu command: {:?}", command);

        if let Some(contrast) = command.apply(&mut lcd)? {
            println!("contrast set to 0x{:02x}", contrast);
            config.contrast = contrast;
            config.save()?;
        }
    }

    info!("Input closed, exiting.");
    Ok(())
}

//! Build script for velox-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates velox.toml at compile time
//! - Generates `velox_config.rs` with the validated settings

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// RP2040 system clock feeding the PWM slices
const SYS_CLOCK_HZ: u64 = 125_000_000;

/// Largest packet the firmware is built to frame
const MAX_PACKET_SIZE: i64 = 64;

/// Largest software queue
const MAX_QUEUE_CAPACITY: i64 = 4096;

fn main() {
    setup_linker();
    let config = validate_config();
    let settings = read_settings(&config);
    generate_config(&settings);

    println!("cargo:warning=velox.toml validated successfully");
}

/// Set up linker search paths and scripts
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Read and parse velox.toml
fn validate_config() -> toml::Value {
    // Re-run if velox.toml changes
    println!("cargo:rerun-if-changed=velox.toml");

    let config_path = Path::new("velox.toml");

    // Check if config file exists
    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: velox.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a velox.toml configuration file.          ║\n\
            ║  Please create one in the velox-firmware directory.              ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    // Read the config file
    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read velox.toml                                ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    // Parse and validate TOML syntax
    match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in velox.toml                        ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    }
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Abort the build with a list of validation errors
fn fail(section: &str, errors: &[String]) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: Invalid {:<48} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        section,
        errors
            .iter()
            .map(|e| format!("║  • {:<62} ║", e))
            .collect::<Vec<_>>()
            .join("\n")
    );
}

/// Validated settings, one field per generated constant
struct Settings {
    baudrate: i64,
    packet_size: i64,
    rx_capacity: i64,
    tx_capacity: i64,
    rx_policy: &'static str,
    tx_policy: &'static str,
    center: i64,
    dead_zone: i64,
    axis_limit: i64,
    link_timeout_ms: i64,
    pwm_top: i64,
    pwm_divider: i64,
    min_duty: i64,
    invert_left: bool,
    invert_right: bool,
    stats_period_ms: i64,
}

/// Accessor for one `[section]` that collects errors instead of failing fast
struct Section<'a> {
    name: &'static str,
    table: Option<&'a toml::Value>,
    errors: Vec<String>,
}

impl<'a> Section<'a> {
    fn new(config: &'a toml::Value, name: &'static str, required: bool) -> Self {
        let table = config.get(name);
        let mut errors = Vec::new();
        if table.is_none() && required {
            errors.push(format!("Missing [{}] section", name));
        }
        Self { name, table, errors }
    }

    fn int(&mut self, key: &str, default: i64, min: i64, max: i64) -> i64 {
        let Some(value) = self.table.and_then(|t| t.get(key)) else {
            return default;
        };
        match value.as_integer() {
            Some(v) if (min..=max).contains(&v) => v,
            Some(v) => {
                self.errors
                    .push(format!("{}.{} = {} (must be {}..={})", self.name, key, v, min, max));
                default
            }
            None => {
                self.errors.push(format!("{}.{} must be an integer", self.name, key));
                default
            }
        }
    }

    fn flag(&mut self, key: &str, default: bool) -> bool {
        let Some(value) = self.table.and_then(|t| t.get(key)) else {
            return default;
        };
        value.as_bool().unwrap_or_else(|| {
            self.errors.push(format!("{}.{} must be true or false", self.name, key));
            default
        })
    }

    /// Overflow policy name mapped to its `OverflowPolicy` variant
    fn policy(&mut self, key: &str, default: &'static str) -> &'static str {
        let Some(value) = self.table.and_then(|t| t.get(key)) else {
            return default;
        };
        match value.as_str() {
            Some("drop_oldest") => "DropOldest",
            Some("drop_newest") => "DropNewest",
            _ => {
                self.errors.push(format!(
                    "{}.{} must be \"drop_oldest\" or \"drop_newest\"",
                    self.name, key
                ));
                default
            }
        }
    }

    fn check(&mut self, ok: bool, msg: impl Into<String>) {
        if !ok {
            self.errors.push(msg.into());
        }
    }

    fn finish(self) {
        if !self.errors.is_empty() {
            fail(&format!("[{}] section in velox.toml", self.name), &self.errors);
        }
    }
}

fn read_settings(config: &toml::Value) -> Settings {
    let mut link = Section::new(config, "link", true);
    let baudrate = link.int("baudrate", 9600, 300, 921_600);
    // The joystick packet needs x, y and command
    let packet_size = link.int("packet_size", 3, 3, MAX_PACKET_SIZE);
    let rx_capacity = link.int("rx_capacity", 50, 1, MAX_QUEUE_CAPACITY);
    let tx_capacity = link.int("tx_capacity", 50, 1, MAX_QUEUE_CAPACITY);
    let rx_policy = link.policy("rx_policy", "DropOldest");
    let tx_policy = link.policy("tx_policy", "DropNewest");
    link.check(
        rx_capacity >= packet_size,
        format!("link.rx_capacity ({}) < packet_size ({})", rx_capacity, packet_size),
    );
    link.finish();

    let mut drive = Section::new(config, "drive", true);
    let center = drive.int("center", 128, 0, 255);
    let dead_zone = drive.int("dead_zone", 8, 0, 255);
    let axis_limit = drive.int("axis_limit", 127, 1, 255);
    let link_timeout_ms = drive.int("link_timeout_ms", 500, 0, 60_000);
    let pwm_top = drive.int("pwm_top", 24_999, 1, 65_534);
    let pwm_divider = drive.int("pwm_divider", 10, 1, 255);
    let min_duty = drive.int("min_duty", 0, 0, 100);
    let invert_left = drive.flag("invert_left", false);
    let invert_right = drive.flag("invert_right", false);
    drive.check(
        dead_zone < axis_limit,
        format!("drive.dead_zone ({}) >= axis_limit ({})", dead_zone, axis_limit),
    );
    let pwm_hz = SYS_CLOCK_HZ / (pwm_divider as u64 * (pwm_top as u64 + 1));
    drive.check(
        (20..=100_000).contains(&pwm_hz),
        format!("PWM frequency {} Hz outside 20..=100000", pwm_hz),
    );
    drive.finish();

    let mut status = Section::new(config, "status", false);
    let stats_period_ms = status.int("stats_period_ms", 5000, 100, 3_600_000);
    status.finish();

    Settings {
        baudrate,
        packet_size,
        rx_capacity,
        tx_capacity,
        rx_policy,
        tx_policy,
        center,
        dead_zone,
        axis_limit,
        link_timeout_ms,
        pwm_top,
        pwm_divider,
        min_duty,
        invert_left,
        invert_right,
        stats_period_ms,
    }
}

/// Write the validated settings as Rust constants
fn generate_config(s: &Settings) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let code = format!(
        "// Generated by build.rs from velox.toml\n\
        \n\
        /// Bytes per packet\n\
        pub const PACKET_SIZE: usize = {packet_size};\n\
        /// Leftover storage of the packet receiver\n\
        pub const LEFTOVER_CAPACITY: usize = {packet_size};\n\
        /// RX queue capacity in bytes\n\
        pub const RX_CAPACITY: usize = {rx_capacity};\n\
        /// TX queue capacity in bytes\n\
        pub const TX_CAPACITY: usize = {tx_capacity};\n\
        /// Idle period between link counter logs\n\
        pub const STATS_PERIOD_MS: u64 = {stats_period_ms};\n\
        \n\
        /// Serial link settings\n\
        pub const LINK: velox_core::config::LinkConfig = velox_core::config::LinkConfig {{\n\
        \x20   uart: velox_hal_rp2040::UartConfig::with_baudrate({baudrate}),\n\
        \x20   rx_policy: velox_protocol::OverflowPolicy::{rx_policy},\n\
        \x20   tx_policy: velox_protocol::OverflowPolicy::{tx_policy},\n\
        }};\n\
        \n\
        /// Drive decoder and PWM settings\n\
        pub const DRIVE: velox_core::config::DriveConfig = velox_core::config::DriveConfig {{\n\
        \x20   center: {center},\n\
        \x20   dead_zone: {dead_zone},\n\
        \x20   axis_limit: {axis_limit},\n\
        \x20   link_timeout_ms: {link_timeout_ms},\n\
        \x20   pwm_top: {pwm_top},\n\
        \x20   pwm_divider: {pwm_divider},\n\
        }};\n\
        \n\
        /// H-bridge settings\n\
        pub const MOTORS: velox_drivers::motor::Drv8833Config = velox_drivers::motor::Drv8833Config {{\n\
        \x20   min_duty: {min_duty},\n\
        \x20   invert_left: {invert_left},\n\
        \x20   invert_right: {invert_right},\n\
        }};\n",
        packet_size = s.packet_size,
        rx_capacity = s.rx_capacity,
        tx_capacity = s.tx_capacity,
        stats_period_ms = s.stats_period_ms,
        baudrate = s.baudrate,
        rx_policy = s.rx_policy,
        tx_policy = s.tx_policy,
        center = s.center,
        dead_zone = s.dead_zone,
        axis_limit = s.axis_limit,
        link_timeout_ms = s.link_timeout_ms,
        pwm_top = s.pwm_top,
        pwm_divider = s.pwm_divider,
        min_duty = s.min_duty,
        invert_left = s.invert_left,
        invert_right = s.invert_right,
    );

    fs::write(out_dir.join("velox_config.rs"), code).unwrap();
}

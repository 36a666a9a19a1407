// CLI definitions using clap

use clap::Parser;

#[derive(Parser)]
#[command(name = "tablet-mode")]
#[command(author, version)]
#[command(about = "Reports a tablet mode switch when the USB keyboard attaches or detaches")]
pub struct Cli {
    /// Keyboard vendor id to match, hex (e.g. 258a)
    #[arg(long, value_parser = parse_hex_u16, default_value = "258a")]
    pub vendor: u16,

    /// Keyboard product id to match, hex (e.g. 0020)
    #[arg(long, value_parser = parse_hex_u16, default_value = "0020")]
    pub product: u16,
}

/// Parse a 16-bit id given as hex, with or without a `0x` prefix.
fn parse_hex_u16(value: &str) -> Result<u16, String> {
    let digits = value.trim_start_matches("0x").trim_start_matches("0X");
    u16::from_str_radix(digits, 16).map_err(|e| format!("invalid hex id '{value}': {e}"))
}

//! Command-line arguments

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use pixtext::{Color, FontStyle, Hinting, QualityTier};

pub const DEFAULT_TEXT: &str = "The quick brown fox jumped over the lazy dog";

/// Render a line of text with a TrueType font
#[derive(Parser, Debug)]
#[command(name = "pixtext")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Font file (.ttf, .otf, .ttc)
    pub font: PathBuf,

    /// Point size; one point is one pixel
    #[arg(default_value_t = 18)]
    pub ptsize: u32,

    /// Text to render
    #[arg(default_value = DEFAULT_TEXT)]
    pub text: String,

    /// Quality tier
    #[arg(long, value_enum, default_value_t = TierArg::Shaded)]
    pub tier: TierArg,

    /// How the text is handed to the library
    #[arg(long, value_enum, default_value_t = EncodingArg::Utf8)]
    pub encoding: EncodingArg,

    /// Bold
    #[arg(short = 'b', long)]
    pub bold: bool,

    /// Italic
    #[arg(short = 'i', long)]
    pub italic: bool,

    /// Underline
    #[arg(short = 'u', long)]
    pub underline: bool,

    /// Strikethrough
    #[arg(short = 's', long)]
    pub strikethrough: bool,

    /// Outline width in pixels
    #[arg(long, default_value_t = 0)]
    pub outline: u32,

    /// Hinting mode
    #[arg(long, value_enum, default_value_t = HintingArg::Normal)]
    pub hinting: HintingArg,

    /// Turn pair kerning off
    #[arg(long)]
    pub no_kerning: bool,

    /// Foreground color as R,G,B
    #[arg(long, value_parser = parse_rgb, default_value = "0,0,0")]
    pub fgcol: Color,

    /// Background color as R,G,B (Shaded tier and PPM output)
    #[arg(long, value_parser = parse_rgb, default_value = "255,255,255")]
    pub bgcol: Color,

    /// Wrap width in pixels for the wrapped tier; 0 breaks only at newlines
    #[arg(long, default_value_t = 0)]
    pub wrap: u32,

    /// Also write Shaded glyphs for '0' through 'z' as glyph-<n>.png
    #[arg(long)]
    pub dump: bool,

    /// Image to write (.png or .ppm)
    #[arg(short = 'o', long, value_parser = parse_output)]
    pub output: Option<PathBuf>,

    /// Log pipeline progress
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

impl Cli {
    pub fn style(&self) -> FontStyle {
        FontStyle::from_switches(self.bold, self.italic, self.underline, self.strikethrough)
    }

    pub fn quality_tier(&self) -> QualityTier {
        match self.tier {
            TierArg::Solid => QualityTier::Solid,
            TierArg::Shaded => QualityTier::Shaded {
                background: self.bgcol,
            },
            TierArg::Blended => QualityTier::Blended,
            TierArg::Wrapped => QualityTier::BlendedWrapped {
                wrap_width: self.wrap,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TierArg {
    Solid,
    Shaded,
    Blended,
    Wrapped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EncodingArg {
    Latin1,
    Utf8,
    Utf16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum HintingArg {
    Normal,
    Light,
    Mono,
    None,
}

impl From<HintingArg> for Hinting {
    fn from(arg: HintingArg) -> Self {
        match arg {
            HintingArg::Normal => Hinting::Normal,
            HintingArg::Light => Hinting::Light,
            HintingArg::Mono => Hinting::Mono,
            HintingArg::None => Hinting::None,
        }
    }
}

/// Parses "R,G,B" with each channel in 0..=255
pub fn parse_rgb(value: &str) -> Result<Color, String> {
    let channels = value
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<u8>()
                .map_err(|_| format!("'{}' is not a channel value in 0..=255", part.trim()))
        })
        .collect::<Result<Vec<u8>, String>>()?;
    match channels.as_slice() {
        &[r, g, b] => Ok(Color::rgb(r, g, b)),
        _ => Err(format!("expected R,G,B but got {} values", channels.len())),
    }
}

fn parse_output(value: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(value);
    if pixtext_export::exporter_for(&path, Color::white()).is_some() {
        Ok(path)
    } else {
        Err("output must end in .png or .ppm".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn rgb_triples() {
        assert_eq!(parse_rgb("255, 0,10").unwrap(), Color::rgb(255, 0, 10));
        assert!(parse_rgb("1,2").is_err());
        assert!(parse_rgb("1,2,300").is_err());
        assert!(parse_rgb("red").is_err());
    }

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["pixtext", "font.ttf"]).unwrap();
        assert_eq!(cli.ptsize, 18);
        assert_eq!(cli.text, DEFAULT_TEXT);
        assert_eq!(
            cli.quality_tier(),
            QualityTier::Shaded {
                background: Color::white()
            }
        );
        assert_eq!(cli.style(), FontStyle::NORMAL);
        assert_eq!(cli.fgcol, Color::black());
    }

    #[test]
    fn style_switches_combine() {
        let cli = Cli::try_parse_from(["pixtext", "-b", "-u", "font.ttf", "24", "hi"]).unwrap();
        assert_eq!(cli.style(), FontStyle::BOLD | FontStyle::UNDERLINE);
        assert_eq!(cli.ptsize, 24);
        assert_eq!(cli.text, "hi");
    }

    #[test]
    fn wrapped_tier_takes_wrap_width() {
        let cli =
            Cli::try_parse_from(["pixtext", "--tier", "wrapped", "--wrap", "80", "f.ttf"]).unwrap();
        assert_eq!(cli.quality_tier(), QualityTier::BlendedWrapped { wrap_width: 80 });
    }

    #[test]
    fn output_needs_known_extension() {
        assert!(Cli::try_parse_from(["pixtext", "-o", "out.gif", "f.ttf"]).is_err());
        assert!(Cli::try_parse_from(["pixtext", "-o", "out.png", "f.ttf"]).is_ok());
    }
}

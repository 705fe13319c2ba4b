//! Command-line argument parsing.

use clap::Parser;
use histo_viz::HistogramConfig;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "histo-demo")]
#[command(about = "Frequency histogram driven by a synthetic tone", long_about = None)]
pub struct Args {
    /// Lowest frequency shown (Hz)
    #[arg(long, value_name = "HZ", default_value = "1200")]
    pub min_frequency: f32,

    /// Highest frequency shown (Hz)
    #[arg(long, value_name = "HZ", default_value = "10000")]
    pub max_frequency: f32,

    /// Number of bars
    #[arg(long, default_value = "30")]
    pub bins: usize,

    /// Multiplier applied to each band magnitude
    #[arg(long, default_value = "10")]
    pub gain: f32,

    /// Fall acceleration (height units per second squared)
    #[arg(long, default_value = "10")]
    pub gravity: f32,

    /// Fraction of each bar slot left empty
    #[arg(long, default_value = "0.1")]
    pub padding: f32,

    /// Tone frequency in Hz, may be repeated
    #[arg(long = "tone", value_name = "HZ", default_values_t = [2000.0])]
    pub tones: Vec<f32>,

    /// Run time
    #[arg(long, value_name = "SECONDS", default_value = "5")]
    pub seconds: f32,

    /// Render rate
    #[arg(long, default_value = "30")]
    pub fps: f32,

    /// Samples per audio callback
    #[arg(long, value_name = "SAMPLES", default_value = "512")]
    pub buffer: usize,

    /// Width of the printed row in characters
    #[arg(long, value_name = "COLUMNS", default_value = "60")]
    pub width: u32,

    /// Height drawn as a full block
    #[arg(long, default_value = "10")]
    pub ceiling: f32,
}

impl Args {
    pub fn histogram_config(&self) -> HistogramConfig {
        HistogramConfig {
            max_frequency: self.max_frequency,
            min_frequency: self.min_frequency,
            num_of_bins: self.bins,
            padding: self.padding,
            gain: self.gain,
            gravity: self.gravity,
            ..HistogramConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_histogram_defaults() {
        let args = Args::parse_from(["histo-demo"]);
        assert_eq!(args.histogram_config(), HistogramConfig::default());
        assert_eq!(args.tones, vec![2000.0]);
    }

    #[test]
    fn test_repeated_tones() {
        let args = Args::parse_from(["histo-demo", "--tone", "440", "--tone", "5000", "--bins", "8"]);
        assert_eq!(args.tones, vec![440.0, 5000.0]);
        assert_eq!(args.histogram_config().num_of_bins, 8);
    }
}

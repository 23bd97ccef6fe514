use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Spin a six-sided cube in the terminal by dragging it with the mouse
#[derive(Debug, Clone, Parser)]
#[command(name = "sixsides", version, about)]
pub struct Args {
    /// Frames rendered per second
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..=240))]
    pub fps: u32,

    /// Width of one terminal cell, in pixels
    #[arg(long, default_value_t = 8.0, value_parser = positive_pixels)]
    pub cell_width: f32,

    /// Height of one terminal cell, in pixels
    #[arg(long, default_value_t = 16.0, value_parser = positive_pixels)]
    pub cell_height: f32,

    /// Start in wireframe mode
    #[arg(long)]
    pub wireframe: bool,

    /// Start with the debug overlay shown
    #[arg(long)]
    pub debug: bool,

    /// Write logs to this file (the terminal is busy drawing)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.fps
    }
}

fn positive_pixels(s: &str) -> Result<f32, String> {
    let value: f32 = s.parse().map_err(|e| format!("{e}"))?;
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(format!("expected a positive pixel size, got {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["sixsides"]).unwrap();
        assert_eq!(args.fps, 60);
        assert_eq!(args.cell_width, 8.0);
        assert_eq!(args.cell_height, 16.0);
        assert!(!args.wireframe);
        assert!(!args.debug);
        assert_eq!(args.log_file, None);
        assert_eq!(args.log_level, "info");
        assert_eq!(args.frame_interval(), Duration::from_nanos(16_666_666));
    }

    #[test]
    fn overrides() {
        let args = Args::try_parse_from([
            "sixsides",
            "--fps",
            "30",
            "--cell-width",
            "10",
            "--wireframe",
            "--log-file",
            "/tmp/sixsides.log",
        ])
        .unwrap();
        assert_eq!(args.fps, 30);
        assert_eq!(args.cell_width, 10.0);
        assert!(args.wireframe);
        assert_eq!(args.log_file, Some(PathBuf::from("/tmp/sixsides.log")));
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert!(Args::try_parse_from(["sixsides", "--fps", "0"]).is_err());
        assert!(Args::try_parse_from(["sixsides", "--fps", "1000"]).is_err());
        assert!(Args::try_parse_from(["sixsides", "--cell-height", "-3"]).is_err());
        assert!(Args::try_parse_from(["sixsides", "--cell-width", "nan"]).is_err());
    }
}

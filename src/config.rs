//! Startup configuration.
//!
//! [`Config`] is the raw, serde-facing shape (JSON file, CLI overrides).
//! [`Config::validate`] turns it into [`Settings`], the read-only values the
//! engine runs on. Anything degenerate is rejected here, before a frame is
//! ever drawn.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use clap::Args;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::{
    engine::{Palette, Projection, Screen},
    renderer::Rgba,
    sim::Movement,
    world::{Grid, GridError, Pose},
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("bad config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("screen must be at least 1x1, got {w}x{h}")]
    ZeroScreen { w: usize, h: usize },

    #[error("screen height {0} does not fit a row index")]
    ScreenTooTall(usize),

    #[error("ray precision must be finite, positive and below {max}, got {value}")]
    BadPrecision { value: f32, max: f32 },

    #[error("field of view must be in (0, 360) degrees, got {0}")]
    BadFov(f32),

    #[error("render period must be non-zero")]
    ZeroPeriod,

    #[error("{name} must be finite and positive, got {value}")]
    BadStep { name: &'static str, value: f32 },

    #[error("edge threshold must not be negative, got {0}")]
    NegativeThreshold(i32),

    #[error("`{0}` is not a #RRGGBB colour")]
    BadColour(String),

    #[error("bad map: {0}")]
    Grid(#[from] GridError),

    #[error("player start ({x}, {y}) is not in an open cell")]
    PlayerBlocked { x: f32, y: f32 },

    #[error("player angle must be finite, got {0}")]
    BadAngle(f32),
}

/*──────────────────────── raw sections ─────────────────────────────*/

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ScreenConfig {
    pub width: usize,
    pub height: usize,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Milliseconds between render ticks.
    pub delay_ms: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { delay_ms: 30 }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RayCastingConfig {
    pub precision: f32,
    pub edge_threshold: i32,
}

impl Default for RayCastingConfig {
    fn default() -> Self {
        Self {
            precision: 64.0,
            edge_threshold: 8,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct PlayerConfig {
    pub fov: f32,
    pub x: f32,
    pub y: f32,
    pub angle: f32,
    pub movement_step: f32,
    pub rotation_step: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        let movement = Movement::default();
        Self {
            fov: 60.0,
            x: 2.0,
            y: 2.0,
            angle: 90.0,
            movement_step: movement.movement_step,
            rotation_step: movement.rotation_step,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct PaletteConfig {
    pub sky: String,
    pub floor: String,
    pub wall: String,
    pub border: String,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        let p = Palette::default();
        Self {
            sky: format!("#{:06X}", p.sky),
            floor: format!("#{:06X}", p.floor),
            wall: format!("#{:06X}", p.wall),
            border: format!("#{:06X}", p.border),
        }
    }
}

/// Everything that can be set at startup. Missing keys keep their default.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub screen: ScreenConfig,
    pub render: RenderConfig,
    pub ray_casting: RayCastingConfig,
    pub player: PlayerConfig,
    pub palette: PaletteConfig,
    /// Map rows in text form (see `Grid`'s `FromStr`); `None` = sample room.
    pub map: Option<Vec<String>>,
}

/// Validated, read-only configuration.
#[derive(Clone, Debug)]
pub struct Settings {
    pub grid: Grid,
    pub screen: Screen,
    pub projection: Projection,
    pub palette: Palette,
    pub movement: Movement,
    pub start: Pose,
    pub frame_period: Duration,
}

impl Config {
    /// Load a JSON config file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = read(path)?;
        let cfg = serde_json::from_str(&text)?;
        debug!(path = %path.display(), "config loaded");
        Ok(cfg)
    }

    /// Replace the map with the contents of a text map file.
    pub fn load_map<P: AsRef<Path>>(&mut self, path: P) -> Result<(), ConfigError> {
        let text = read(path.as_ref())?;
        self.map = Some(text.lines().map(str::to_owned).collect());
        Ok(())
    }

    pub fn validate(self) -> Result<Settings, ConfigError> {
        let Config {
            screen,
            render,
            ray_casting,
            player,
            palette,
            map,
        } = self;

        if screen.width == 0 || screen.height == 0 {
            return Err(ConfigError::ZeroScreen {
                w: screen.width,
                h: screen.height,
            });
        }
        if i32::try_from(screen.height).is_err() {
            return Err(ConfigError::ScreenTooTall(screen.height));
        }
        if !(player.fov > 0.0 && player.fov < 360.0) {
            return Err(ConfigError::BadFov(player.fov));
        }
        if render.delay_ms == 0 {
            return Err(ConfigError::ZeroPeriod);
        }
        if ray_casting.edge_threshold < 0 {
            return Err(ConfigError::NegativeThreshold(ray_casting.edge_threshold));
        }
        positive("movement_step", player.movement_step)?;
        positive("rotation_step", player.rotation_step)?;
        if !player.angle.is_finite() {
            return Err(ConfigError::BadAngle(player.angle));
        }

        let grid = match map {
            Some(rows) => rows.join("\n").parse::<Grid>()?,
            None => Grid::sample(),
        };
        let precision = ray_casting.precision;
        let max = grid.finest_precision();
        if !(precision.is_finite() && precision > 0.0 && precision < max) {
            return Err(ConfigError::BadPrecision {
                value: precision,
                max,
            });
        }
        let start = Pose::new(player.x, player.y, player.angle);
        if !grid.is_open(start.pos) {
            return Err(ConfigError::PlayerBlocked {
                x: player.x,
                y: player.y,
            });
        }

        let palette = Palette {
            sky: parse_colour(&palette.sky)?,
            floor: parse_colour(&palette.floor)?,
            wall: parse_colour(&palette.wall)?,
            border: parse_colour(&palette.border)?,
        };

        debug!(
            w = screen.width,
            h = screen.height,
            map_w = grid.width(),
            map_h = grid.height(),
            "config validated"
        );

        Ok(Settings {
            grid,
            screen: Screen::new(screen.width, screen.height),
            projection: Projection::new(
                player.fov,
                screen.width,
                precision,
                ray_casting.edge_threshold,
            ),
            palette,
            movement: Movement {
                movement_step: player.movement_step,
                rotation_step: player.rotation_step,
            },
            start,
            frame_period: Duration::from_millis(render.delay_ms),
        })
    }
}

/// Command-line knobs shared by the binaries. Flags win over the file.
#[derive(Args, Debug, Default)]
pub struct ConfigArgs {
    /// JSON config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Text map file (one row per line, digits = walls, `.` = open)
    #[arg(short, long)]
    pub map: Option<PathBuf>,
    /// Screen width in pixels
    #[arg(long)]
    pub width: Option<usize>,
    /// Screen height in pixels
    #[arg(long)]
    pub height: Option<usize>,
    /// Horizontal field of view in degrees
    #[arg(long)]
    pub fov: Option<f32>,
    /// Ray march steps per map unit
    #[arg(long)]
    pub precision: Option<f32>,
}

impl ConfigArgs {
    /// File (or defaults) with every given flag applied on top.
    pub fn load(&self) -> Result<Config, ConfigError> {
        let mut cfg = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };
        if let Some(path) = &self.map {
            cfg.load_map(path)?;
        }
        if let Some(w) = self.width {
            cfg.screen.width = w;
        }
        if let Some(h) = self.height {
            cfg.screen.height = h;
        }
        if let Some(fov) = self.fov {
            cfg.player.fov = fov;
        }
        if let Some(p) = self.precision {
            cfg.ray_casting.precision = p;
        }
        Ok(cfg)
    }
}

fn read(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })
}

fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::BadStep { name, value })
    }
}

/// `#RRGGBB` → `0x00RRGGBB`.
fn parse_colour(s: &str) -> Result<Rgba, ConfigError> {
    let bad = || ConfigError::BadColour(s.to_owned());
    let hex = s.strip_prefix('#').ok_or_else(bad)?;
    if hex.len() != 6 {
        return Err(bad());
    }
    Rgba::from_str_radix(hex, 16).map_err(|_| bad())
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_reproduce_the_reference_setup() {
        let s = Config::default().validate().unwrap();
        assert_eq!(s.grid, Grid::sample());
        assert_eq!(s.screen, Screen::new(640, 480));
        assert_eq!(s.projection, Projection::new(60.0, 640, 64.0, 8));
        assert_eq!(s.palette, Palette::default());
        assert_eq!(s.start, Pose::new(2.0, 2.0, 90.0));
        assert_eq!(s.frame_period, Duration::from_millis(30));
    }

    #[test]
    fn degenerate_values_fail_fast() {
        let mut c = Config::default();
        c.screen.width = 0;
        assert!(matches!(c.validate(), Err(ConfigError::ZeroScreen { w: 0, .. })));

        let mut c = Config::default();
        c.screen.height = usize::MAX;
        assert!(matches!(c.validate(), Err(ConfigError::ScreenTooTall(usize::MAX))));

        // 1e8 steps per unit no longer moves a ray on a 10x10 map
        for p in [0.0, -3.0, f32::NAN, f32::INFINITY, 1e8] {
            let mut c = Config::default();
            c.ray_casting.precision = p;
            assert!(matches!(c.validate(), Err(ConfigError::BadPrecision { .. })));
        }

        let mut c = Config::default();
        c.ray_casting.precision = 1e5;
        assert!(c.validate().is_ok());

        let mut c = Config::default();
        c.player.fov = 0.0;
        assert!(matches!(c.validate(), Err(ConfigError::BadFov(_))));

        let mut c = Config::default();
        c.render.delay_ms = 0;
        assert!(matches!(c.validate(), Err(ConfigError::ZeroPeriod)));

        let mut c = Config::default();
        c.player.movement_step = -0.5;
        assert!(matches!(
            c.validate(),
            Err(ConfigError::BadStep { name: "movement_step", .. })
        ));

        let mut c = Config::default();
        c.ray_casting.edge_threshold = -1;
        assert!(matches!(c.validate(), Err(ConfigError::NegativeThreshold(-1))));
    }

    #[test]
    fn player_must_start_in_the_open() {
        let mut c = Config::default();
        c.player.x = 3.5;
        c.player.y = 3.5; // pillar
        assert!(matches!(c.validate(), Err(ConfigError::PlayerBlocked { .. })));

        let mut c = Config::default();
        c.player.x = -4.0;
        assert!(matches!(c.validate(), Err(ConfigError::PlayerBlocked { .. })));
    }

    #[test]
    fn maps_come_from_text_rows() {
        let mut c = Config::default();
        c.map = Some(vec!["1111".into(), "1..1".into(), "1111".into()]);
        c.player.x = 1.5;
        c.player.y = 1.5;
        let s = c.validate().unwrap();
        assert_eq!((s.grid.width(), s.grid.height()), (4, 3));

        let mut c = Config::default();
        c.map = Some(vec!["111".into(), "1..".into(), "111".into()]);
        assert!(matches!(
            c.validate(),
            Err(ConfigError::Grid(GridError::OpenBorder { x: 2, y: 1 }))
        ));
    }

    #[test]
    fn colours_parse_as_hex() {
        assert_eq!(parse_colour("#6495ED").unwrap(), 0x00_6495ED);
        assert_eq!(parse_colour("#a0522d").unwrap(), 0x00_A0522D);
        for bad in ["6495ED", "#6495E", "#6495EDFF", "#GGGGGG"] {
            assert!(matches!(parse_colour(bad), Err(ConfigError::BadColour(_))));
        }
        assert_eq!(PaletteConfig::default().sky, "#6495ED");
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r##"{{
                "screen": {{ "width": 320 }},
                "ray_casting": {{ "precision": 32 }},
                "palette": {{ "wall": "#112233" }}
            }}"##
        )
        .unwrap();

        let c = Config::from_file(file.path()).unwrap();
        assert_eq!(c.screen.width, 320);
        assert_eq!(c.screen.height, 480);
        assert_eq!(c.ray_casting.precision, 32.0);
        assert_eq!(c.player, PlayerConfig::default());

        let s = c.validate().unwrap();
        assert_eq!(s.palette.wall, 0x00_112233);
        assert_eq!(s.palette.sky, Palette::default().sky);
        assert_eq!(s.projection.increment_angle, 60.0 / 320.0);
    }

    #[test]
    fn unknown_keys_and_missing_files_are_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "screen": {{ "depth": 3 }} }}"#).unwrap();
        assert!(matches!(Config::from_file(file.path()), Err(ConfigError::Parse(_))));

        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        assert!(matches!(Config::from_file(&missing), Err(ConfigError::Io { .. })));
    }

    #[test]
    fn map_files_replace_the_sample() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "; corridor\n11111\n1...1\n11111").unwrap();

        let mut c = Config::default();
        c.player.x = 3.2;
        c.player.y = 1.5;
        c.load_map(file.path()).unwrap();
        let s = c.validate().unwrap();
        assert_eq!((s.grid.width(), s.grid.height()), (5, 3));
    }

    #[test]
    fn flags_override_the_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "screen": {{ "width": 320, "height": 200 }} }}"#).unwrap();

        let args = ConfigArgs {
            config: Some(file.path().to_path_buf()),
            height: Some(240),
            precision: Some(16.0),
            ..ConfigArgs::default()
        };
        let c = args.load().unwrap();
        assert_eq!((c.screen.width, c.screen.height), (320, 240));
        assert_eq!(c.ray_casting.precision, 16.0);
        assert_eq!(c.player.fov, 60.0);

        assert_eq!(ConfigArgs::default().load().unwrap(), Config::default());
    }
}

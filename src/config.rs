use crate::types::Config;
use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Config = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.video.fps.is_finite() || self.video.fps <= 0.0 {
            bail!("video.fps must be a positive number, got {}", self.video.fps);
        }
        if !self.wheel.padding.is_finite() || self.wheel.padding < 0.0 {
            bail!("wheel.padding must be >= 0, got {}", self.wheel.padding);
        }
        if !self.wheel.scale_factor.is_finite() || self.wheel.scale_factor <= 0.0 {
            bail!(
                "wheel.scale_factor must be > 0, got {}",
                self.wheel.scale_factor
            );
        }
        if self.wheel.regions.is_empty() {
            bail!("wheel.regions must contain at least one rectangle");
        }
        if !self.subject.bounding_box.is_well_formed() {
            bail!(
                "subject.bounding_box is inverted: {:?}",
                self.subject.bounding_box
            );
        }
        for (i, region) in self.wheel.regions.iter().enumerate() {
            if !region.is_well_formed() {
                bail!("wheel.regions[{}] is inverted: {:?}", i, region);
            }
        }
        Ok(())
    }
}
